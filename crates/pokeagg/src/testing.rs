//! In-memory [`Fetch`] double for aggregator tests
//!
//! Serves canned JSON per URL, answers unknown URLs with a 404, and can be
//! told to fail with a status or a network error, or to answer late. A
//! [`Probe`] keeps the request and completion order plus the peak number of
//! requests in flight.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::pokeapi::{Fetch, PokeApi};

pub const BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Clone)]
struct Route {
    reply: Result<Value, FetchError>,
    delay: Duration,
}

#[derive(Clone, Default)]
pub struct Probe {
    requests: Arc<Mutex<Vec<String>>>,
    completed: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl Probe {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeFetcher {
    routes: HashMap<String, Route>,
    probe: Probe,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, body: Value) -> Self {
        self.route(url, Ok(body), 0)
    }

    pub fn with_delay(self, url: &str, body: Value, delay_ms: u64) -> Self {
        self.route(url, Ok(body), delay_ms)
    }

    pub fn with_status(self, url: &str, code: u16, reason: &str) -> Self {
        self.route(url, Err(FetchError::status(code, Some(reason))), 0)
    }

    pub fn with_network_error(self, url: &str) -> Self {
        self.route(url, Err(FetchError::network()), 0)
    }

    fn route(mut self, url: &str, reply: Result<Value, FetchError>, delay_ms: u64) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                reply,
                delay: Duration::from_millis(delay_ms),
            },
        );
        self
    }

    pub fn probe(&self) -> Probe {
        self.probe.clone()
    }

    pub fn into_api(self) -> PokeApi {
        PokeApi::new(Box::new(self), BASE_URL)
    }
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.probe.requests.lock().unwrap().push(url.to_string());
        let current = self.probe.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.probe.peak.fetch_max(current, Ordering::SeqCst);

        let route = self.routes.get(url).cloned().unwrap_or(Route {
            reply: Err(FetchError::status(404, Some("Not Found"))),
            delay: Duration::ZERO,
        });
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        self.probe.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.probe.completed.lock().unwrap().push(url.to_string());
        route.reply
    }
}
