//! Built-in filters.
//!
//! Filters are the right place for cross-cutting concerns: structured
//! tracing, request-id injection, authentication-header inspection. Each one
//! here is an ordinary [`Filter`](crate::Filter) and registers like any other.
//!
//! - [`trace::TraceFilter`]: per-request span with method and path, then
//!   status and latency once the rest of the chain returns

pub mod trace;
