pub mod response;

mod error;

pub use error::{Error, Result};
pub use response::{InnerHits, SearchHit, SearchHits, SearchResponse, parse_search_response};

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::Client;
use serde_json::Value;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Query-execution primitive of the search backend: one request body in, ranked hits out.
pub trait SearchEngine
where
	Self: Send + Sync,
{
	fn execute<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, Result<SearchResponse>>;
}

/// Thin client over the engine's `_search` endpoint.
#[derive(Debug, Clone)]
pub struct ElasticClient {
	client: Client,
	search_url: String,
	user: String,
	password: String,
}
impl ElasticClient {
	pub fn new(cfg: &sirene_config::Elastic) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			client,
			search_url: search_url(&cfg.url, &cfg.index),
			user: cfg.user.clone(),
			password: cfg.password.clone(),
		})
	}

	pub async fn search(&self, body: &Value) -> Result<SearchResponse> {
		let res = self
			.client
			.post(&self.search_url)
			.basic_auth(&self.user, Some(&self.password))
			.json(body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;
		let response = parse_search_response(json)?;

		if response.timed_out {
			tracing::warn!(took_ms = response.took, "Search engine reported a partial timeout.");
		}
		if !response.is_total_exact() {
			tracing::warn!(total = response.total(), "Search engine reported a lower-bound hit count.");
		}

		Ok(response)
	}
}

impl SearchEngine for ElasticClient {
	fn execute<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, Result<SearchResponse>> {
		Box::pin(self.search(body))
	}
}

fn search_url(base: &str, index: &str) -> String {
	format!("{}/{}/_search", base.trim_end_matches('/'), index)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_search_url_without_double_slash() {
		assert_eq!(search_url("http://es:9200/", "siren"), "http://es:9200/siren/_search");
		assert_eq!(search_url("http://es:9200", "siren"), "http://es:9200/siren/_search");
	}

	#[tokio::test]
	async fn unreachable_engine_is_an_error() {
		let cfg = sirene_config::Elastic {
			url: "http://127.0.0.1:1".to_string(),
			index: "siren".to_string(),
			user: "elastic".to_string(),
			password: "secret".to_string(),
			timeout_ms: 500,
		};
		let client = ElasticClient::new(&cfg).expect("client");
		let err = client
			.search(&serde_json::json!({ "query": { "match_all": {} } }))
			.await
			.expect_err("Expected connection failure.");

		assert!(matches!(err, Error::Reqwest(_)));
	}
}
