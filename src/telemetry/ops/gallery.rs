use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::OpMarker;

#[derive(Copy, Clone, Debug)]
pub struct Gallery;

impl OpMarker for Gallery {
    const NAME: &'static str = "gallery";
    type Phase = super::post::Phase;
    fn root_span() -> Span { info_span!("gallery") }
}
