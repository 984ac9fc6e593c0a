use std::{
	path::PathBuf,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use serde_json::{Value, json};

use sirene_config::{Config, Elastic, Geo, Labels, Pagination, Service};
use sirene_elastic::{BoxFuture, Error, Result, SearchEngine, SearchResponse, parse_search_response};

/// Engine double that answers every request with the same canned `_search` payload and keeps
/// the request bodies it received.
#[derive(Clone)]
pub struct StaticEngine {
	response: Value,
	requests: Arc<Mutex<Vec<Value>>>,
}
impl StaticEngine {
	pub fn new(response: Value) -> Self {
		Self { response, requests: Arc::new(Mutex::new(Vec::new())) }
	}

	/// Engine payload with the given sources as hits and `total` as the match count.
	pub fn with_sources(total: u64, sources: Vec<Value>) -> Self {
		let hits: Vec<Value> = sources
			.into_iter()
			.enumerate()
			.map(|(rank, source)| {
				json!({
					"_index": "siren",
					"_id": source.get("siren").cloned().unwrap_or(Value::Null),
					"_score": 1.0 / (rank as f64 + 1.0),
					"_source": source,
				})
			})
			.collect();

		Self::new(json!({
			"took": 1,
			"timed_out": false,
			"hits": { "total": { "value": total, "relation": "eq" }, "hits": hits },
		}))
	}

	pub fn empty() -> Self {
		Self::with_sources(0, Vec::new())
	}

	pub fn requests(&self) -> Vec<Value> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_request(&self) -> Option<Value> {
		self.requests().pop()
	}
}

impl SearchEngine for StaticEngine {
	fn execute<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, Result<SearchResponse>> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(body.clone());

		let response = self.response.clone();

		Box::pin(async move { parse_search_response(response) })
	}
}

/// Engine double that fails every call, counting attempts.
#[derive(Clone, Default)]
pub struct FailingEngine {
	calls: Arc<AtomicUsize>,
}
impl FailingEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl SearchEngine for FailingEngine {
	fn execute<'a>(&'a self, _body: &'a Value) -> BoxFuture<'a, Result<SearchResponse>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			Err(Error::InvalidResponse { message: "Search engine unavailable.".to_string() })
		})
	}
}

/// In-memory configuration pointing at an unreachable engine.
pub fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		elastic: Elastic {
			url: "http://127.0.0.1:1".to_string(),
			index: "siren".to_string(),
			user: "elastic".to_string(),
			password: "secret".to_string(),
			timeout_ms: 1_000,
		},
		labels: Labels { codes_naf_path: PathBuf::from("codes_naf.json"), tranches_effectif_path: None },
		pagination: Pagination { default_per_page: 10, max_per_page: 25 },
		geo: Geo { default_radius_km: 5.0, max_radius_km: 50.0 },
	}
}
