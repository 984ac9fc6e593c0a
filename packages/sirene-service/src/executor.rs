use std::time::{Duration, Instant};

use serde_json::{Value, json};

use sirene_elastic::{SearchEngine, SearchHit};

use crate::{Result, query::SearchQuery};

/// Hits of one page plus the uncapped match count.
#[derive(Debug)]
pub struct SearchResult {
	pub hits: Vec<SearchHit>,
	pub total: u64,
	pub execution_time: Duration,
}

pub fn build_request_body(query: &SearchQuery, offset: u32, page_size: u32) -> Value {
	json!({
		"query": query.to_value(),
		"from": offset,
		"size": page_size,
		"track_total_hits": true,
	})
}

/// Runs one windowed search. Engine faults are surfaced as execution errors without retry.
pub async fn execute(
	engine: &dyn SearchEngine,
	query: &SearchQuery,
	offset: u32,
	page_size: u32,
) -> Result<SearchResult> {
	let body = build_request_body(query, offset, page_size);
	let started = Instant::now();
	let response = engine.execute(&body).await;
	let execution_time = started.elapsed();
	let response = match response {
		Ok(response) => response,
		Err(err) => {
			tracing::error!(
				error = %err,
				elapsed_ms = execution_time.as_millis() as u64,
				"Search execution failed."
			);

			return Err(err.into());
		},
	};
	let total = response.total();

	tracing::debug!(
		total,
		returned = response.hits.hits.len(),
		offset,
		page_size,
		elapsed_ms = execution_time.as_millis() as u64,
		"Search executed."
	);

	Ok(SearchResult { hits: response.hits.hits, total, execution_time })
}
