use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::PhaseSpan;

// Shared phases for the post pipeline (scene and gallery walk the same stages)
#[derive(Copy, Clone, Debug)]
pub enum Phase { Resolve, Profile, Match, Map }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Resolve => "resolve",
        Phase::Profile => "profile",
        Phase::Match => "match",
        Phase::Map => "map",
    }}
    fn span(&self) -> Span { match self {
        Phase::Resolve => info_span!("resolve"),
        Phase::Profile => info_span!("profile"),
        Phase::Match => info_span!("match"),
        Phase::Map => info_span!("map"),
    }}
}
