use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Performer;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Parse, Map }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Parse => "parse",
        Phase::Map => "map",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Parse => info_span!("parse"),
        Phase::Map => info_span!("map"),
    }}
}

impl OpMarker for Performer {
    const NAME: &'static str = "performer";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("performer") }
}
