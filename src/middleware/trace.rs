//! Per-request tracing.

use std::time::Instant;

use tracing::{Instrument, error, info, info_span};

use crate::error::Error;
use crate::filter::{BoxFuture, Filter, Next};
use crate::pattern::UrlPattern;
use crate::request::Request;
use crate::response::Response;

/// Opens a `request` span around the rest of the chain and logs the outcome.
///
/// Register it first so the span covers every filter after it:
///
/// ```rust
/// use std::sync::Arc;
/// use sluice::{Filter, FilterChain, FilterConfig, middleware::trace::TraceFilter};
///
/// let mut chain = FilterChain::new();
/// let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(TraceFilter::new())];
/// chain.init(&FilterConfig::new("web"), filters).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraceFilter {
    pattern: UrlPattern,
}

impl TraceFilter {
    /// Traces every request (`/*`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Traces only requests matching `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self, Error> {
        Ok(Self { pattern: UrlPattern::parse(pattern)? })
    }
}

impl Filter for TraceFilter {
    fn handle<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), Error>> {
        let span = info_span!("request", method = %req.method(), path = req.uri());

        Box::pin(
            async move {
                let start = Instant::now();
                let result = next.run(&mut *req, &mut *res).await;
                let latency = start.elapsed();
                match &result {
                    Ok(()) => info!(status = res.status().as_u16(), ?latency, "request completed"),
                    Err(e) => error!(error = %e, ?latency, "request failed"),
                }
                result
            }
            .instrument(span),
        )
    }

    fn pattern(&self) -> UrlPattern {
        self.pattern.clone()
    }

    fn name(&self) -> &str {
        "trace"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{Method, StatusCode};

    use super::*;
    use crate::{FilterChain, FilterConfig, terminal_fn};

    #[test]
    fn pattern_defaults_to_everything() {
        assert_eq!(TraceFilter::new().pattern().as_str(), "/*");
        assert_eq!(TraceFilter::with_pattern("/api/*").unwrap().pattern().as_str(), "/api/*");
        assert!(TraceFilter::with_pattern("").is_err());
    }

    #[tokio::test]
    async fn passes_the_outcome_through() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut chain = FilterChain::new();
        let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(TraceFilter::new())];
        chain.init(&FilterConfig::new("web"), filters).unwrap();

        let teapot = terminal_fn(|_req, res| Box::pin(async move {
            res.set_status(StatusCode::IM_A_TEAPOT);
            Ok(())
        }));
        let mut req = Request::new(Method::GET, "/brew");
        let mut res = Response::new();
        chain.handle(&mut req, &mut res, &teapot).await.unwrap();
        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);

        let broken = terminal_fn(|_req, _res| Box::pin(async move {
            Err(Error::IllegalState("kettle missing".into()))
        }));
        let err = chain.handle(&mut req, &mut res, &broken).await.unwrap_err();
        assert_eq!(err.to_string(), "illegal state: kettle missing");
    }
}
