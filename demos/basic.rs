//! Minimal sluice example: a traced, token-guarded chain in front of a
//! plain handler.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic

use std::sync::{Arc, OnceLock};

use http::{Method, StatusCode};
use sluice::middleware::trace::TraceFilter;
use sluice::{
    BoxFuture, ContentType, Error, Filter, FilterChain, FilterConfig, Next, Request, Response,
    UrlPattern, terminal_fn,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = FilterConfig::new("demo").param("api.token", "s3cret");
    let filters: Vec<Arc<dyn Filter>> = vec![
        Arc::new(TraceFilter::new()),
        Arc::new(RequireToken::default()),
    ];

    let mut chain = FilterChain::new();
    chain.init(&config, filters)?;

    let app = terminal_fn(|req, res| Box::pin(async move {
        let body = format!(r#"{{"path":"{}"}}"#, req.path_within_context());
        res.set_body(ContentType::Json, body);
        Ok(())
    }));

    for token in [None, Some("wrong"), Some("s3cret")] {
        let mut req = Request::new(Method::GET, "/demo/api/issues").with_context_path("/demo");
        if let Some(token) = token {
            req = req.with_header("authorization", format!("Bearer {token}"));
        }
        let mut res = Response::new();
        chain.handle(&mut req, &mut res, &app).await?;
        println!("{:?} -> {} {}", token, res.status(), String::from_utf8_lossy(res.body()));
    }

    chain.destroy()
}

/// Rejects `/api/*` requests that lack the bearer token configured as the
/// `api.token` init parameter.
#[derive(Default)]
struct RequireToken {
    token: OnceLock<String>,
}

impl Filter for RequireToken {
    fn init(&self, config: &FilterConfig) -> Result<(), Error> {
        let token = config
            .init_parameter("api.token")
            .ok_or_else(|| Error::IllegalState("missing init parameter `api.token`".into()))?;
        self.token
            .set(token.to_owned())
            .map_err(|_| Error::IllegalState("token already set".into()))
    }

    fn handle<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), Error>> {
        let expected = self.token.get().map(|t| format!("Bearer {t}"));
        if req.header("authorization") != expected.as_deref() {
            res.set_status(StatusCode::UNAUTHORIZED);
            return Box::pin(async { Ok(()) });
        }
        next.run(req, res)
    }

    fn pattern(&self) -> UrlPattern {
        UrlPattern::parse("/api/*").unwrap_or_default()
    }

    fn name(&self) -> &str {
        "require-token"
    }
}
