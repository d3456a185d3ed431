use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::OpMarker;

#[derive(Copy, Clone, Debug)]
pub struct Scene;

impl OpMarker for Scene {
    const NAME: &'static str = "scene";
    type Phase = super::post::Phase;
    fn root_span() -> Span { info_span!("scene") }
}
