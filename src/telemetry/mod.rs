pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

// Factory helpers, one per CLI operation
pub fn scene() -> LogCtx<ops::scene::Scene> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn gallery() -> LogCtx<ops::gallery::Gallery> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn performer() -> LogCtx<ops::performer::Performer> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
