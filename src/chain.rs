//! The filter aggregator.
//!
//! # Lifecycle
//!
//! ```text
//! FilterChain::new()            empty
//!        ↓ init(config, filters)  every filter's init, in order, fail-fast
//! handle(req, res, terminal)    zero or more times, concurrently if you like
//!        ↓ destroy()              every filter's destroy, in order, fail-fast
//! drop
//! ```
//!
//! The filter sequence is set once by `init` and never changes afterwards.
//! `init` and `destroy` take `&mut self`, so the borrow checker keeps them
//! apart from in-flight `handle` calls.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::FilterConfig;
use crate::error::Error;
use crate::filter::{Filter, Next};
use crate::pattern::UrlPattern;
use crate::request::Request;
use crate::response::Response;
use crate::terminal::Terminal;

/// An ordered collection of filters chained around a terminal handler.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
    // Parallel to the initialized prefix of `filters`. Each entry is read
    // after that filter's own init, so init may configure the pattern.
    patterns: Vec<UrlPattern>,
    initialized: bool,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `filters` in the given order and initializes each one with
    /// `config`.
    ///
    /// The first failing `init` aborts the rest and its error is returned
    /// as-is. The filters stay stored either way, so [`filters`](Self::filters)
    /// reports what was registered.
    pub fn init(
        &mut self,
        config: &FilterConfig,
        filters: impl IntoIterator<Item = Arc<dyn Filter>>,
    ) -> Result<(), Error> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        self.initialized = true;
        self.filters = filters.into_iter().collect();
        self.patterns = Vec::with_capacity(self.filters.len());

        for filter in &self.filters {
            info!(filter = filter.name(), "initializing filter");
            if let Err(e) = filter.init(config) {
                warn!(filter = filter.name(), error = %e, "filter init failed");
                return Err(e);
            }
            let pattern = filter.pattern();
            debug!(filter = filter.name(), pattern = %pattern, "filter initialized");
            self.patterns.push(pattern);
        }
        Ok(())
    }

    /// The registered filters, in registration order.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Runs one request through every filter whose pattern matches, then
    /// `terminal`.
    ///
    /// Filters run in registration order. Each decides whether the rest of
    /// the chain runs. With no matching filter, `terminal` is called directly.
    /// Errors from filters or the terminal come back unmodified.
    pub async fn handle(
        &self,
        req: &mut Request,
        res: &mut Response,
        terminal: &dyn Terminal,
    ) -> Result<(), Error> {
        let matched: Vec<&dyn Filter> = {
            let path = req.path_within_context();
            let matched: Vec<&dyn Filter> = self.filters.iter()
                .zip(&self.patterns)
                .filter(|(_, pattern)| pattern.matches(path))
                .map(|(filter, _)| &**filter)
                .collect();
            matched
        };

        let next = Next::new(&matched, terminal);
        debug!(uri = req.uri(), filters = next.remaining(), "filtering request");
        next.run(req, res).await
    }

    /// Calls every filter's `destroy` in registration order. The first
    /// failure stops the loop and is returned as-is.
    pub fn destroy(&mut self) -> Result<(), Error> {
        for filter in &self.filters {
            debug!(filter = filter.name(), "destroying filter");
            if let Err(e) = filter.destroy() {
                warn!(filter = filter.name(), error = %e, "filter destroy failed");
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::Method;

    use super::*;
    use crate::filter::BoxFuture;

    /// Records lifecycle calls into a shared journal.
    struct Journal {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        fail_destroy: bool,
    }

    impl Journal {
        fn new(label: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Filter> {
            Arc::new(Self { label, log: Arc::clone(log), fail_destroy: false })
        }

        fn failing_destroy(label: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Filter> {
            Arc::new(Self { label, log: Arc::clone(log), fail_destroy: true })
        }

        fn push(&self, event: &str) {
            self.log.lock().unwrap().push(format!("{}:{event}", self.label));
        }
    }

    impl Filter for Journal {
        fn init(&self, config: &FilterConfig) -> Result<(), Error> {
            self.push(&format!("init({})", config.name()));
            Ok(())
        }

        fn handle<'a>(
            &'a self,
            req: &'a mut Request,
            res: &'a mut Response,
            next: Next<'a>,
        ) -> BoxFuture<'a, Result<(), Error>> {
            Box::pin(async move {
                self.push("before");
                let result = next.run(&mut *req, &mut *res).await;
                self.push("after");
                result
            })
        }

        fn destroy(&self) -> Result<(), Error> {
            self.push("destroy");
            if self.fail_destroy {
                return Err(Error::IllegalState(format!("{} cannot stop", self.label)));
            }
            Ok(())
        }
    }

    fn log() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn init_runs_in_registration_order() {
        let log = log();
        let mut chain = FilterChain::new();
        chain.init(&FilterConfig::new("web"), [Journal::new("a", &log), Journal::new("b", &log)]).unwrap();

        assert_eq!(entries(&log), vec!["a:init(web)", "b:init(web)"]);
        assert_eq!(chain.filters().len(), 2);
    }

    #[test]
    fn second_init_is_rejected() {
        let log = log();
        let mut chain = FilterChain::new();
        chain.init(&FilterConfig::new("web"), [Journal::new("a", &log)]).unwrap();

        let err = chain.init(&FilterConfig::new("web"), [Journal::new("b", &log)]).unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized));
        assert_eq!(chain.filters().len(), 1);
        assert_eq!(entries(&log), vec!["a:init(web)"]);
    }

    #[test]
    fn destroy_stops_at_first_failure() {
        let log = log();
        let mut chain = FilterChain::new();
        chain.init(
            &FilterConfig::new("web"),
            [Journal::new("a", &log), Journal::failing_destroy("b", &log), Journal::new("c", &log)],
        ).unwrap();
        log.lock().unwrap().clear();

        let err = chain.destroy().unwrap_err();
        assert_eq!(err.to_string(), "illegal state: b cannot stop");
        assert_eq!(entries(&log), vec!["a:destroy", "b:destroy"]);
    }

    #[tokio::test]
    async fn filters_wrap_the_terminal() {
        let log = log();
        let mut chain = FilterChain::new();
        chain.init(&FilterConfig::new("web"), [Journal::new("a", &log), Journal::new("b", &log)]).unwrap();
        log.lock().unwrap().clear();

        let terminal_log = Arc::clone(&log);
        let terminal = crate::terminal_fn(move |_req, res| {
            let log = Arc::clone(&terminal_log);
            Box::pin(async move {
                log.lock().unwrap().push("terminal".to_owned());
                res.set_text("done");
                Ok(())
            })
        });

        let mut req = Request::new(Method::GET, "/");
        let mut res = Response::new();
        chain.handle(&mut req, &mut res, &terminal).await.unwrap();

        assert_eq!(entries(&log), vec!["a:before", "b:before", "terminal", "b:after", "a:after"]);
        assert_eq!(res.body().as_ref(), b"done");
    }
}
