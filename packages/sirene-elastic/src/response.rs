use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub took: u64,
	#[serde(default)]
	pub timed_out: bool,
	pub hits: SearchHits,
}

#[derive(Debug, Deserialize)]
pub struct SearchHits {
	pub total: Option<SearchHitsTotal>,
	#[serde(default)]
	pub hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHitsTotal {
	pub value: u64,
	pub relation: SearchHitsTotalRelation,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub enum SearchHitsTotalRelation {
	#[serde(rename = "eq")]
	Eq,
	#[serde(rename = "gte")]
	Gte,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
	#[serde(rename = "_id")]
	pub id: Option<String>,
	#[serde(rename = "_score")]
	pub score: Option<f64>,
	#[serde(rename = "_source", default)]
	pub source: Value,
	#[serde(default)]
	pub inner_hits: HashMap<String, InnerHits>,
}

#[derive(Debug, Deserialize)]
pub struct InnerHits {
	pub hits: SearchHits,
}

impl SearchResponse {
	pub fn total(&self) -> u64 {
		self.hits.total.as_ref().map(|total| total.value).unwrap_or(self.hits.hits.len() as u64)
	}

	/// False when the engine only reports a lower bound for the match count.
	pub fn is_total_exact(&self) -> bool {
		self.hits.total.as_ref().is_none_or(|total| total.relation == SearchHitsTotalRelation::Eq)
	}
}

pub fn parse_search_response(json: Value) -> crate::Result<SearchResponse> {
	if let Some(error) = json.get("error") {
		return Err(crate::Error::InvalidResponse {
			message: format!("Search engine returned an error: {error}"),
		});
	}
	if json.get("hits").is_none() {
		return Err(crate::Error::InvalidResponse {
			message: "Search response is missing hits.".to_string(),
		});
	}

	Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hits_with_inner_hits() {
		let json = serde_json::json!({
			"took": 3,
			"timed_out": false,
			"hits": {
				"total": { "value": 42, "relation": "eq" },
				"hits": [{
					"_index": "siren",
					"_id": "356000000",
					"_score": 12.5,
					"_source": { "siren": "356000000" },
					"inner_hits": {
						"etablissements": {
							"hits": {
								"total": { "value": 1, "relation": "eq" },
								"hits": [{ "_source": { "siret": "35600000000048" } }]
							}
						}
					}
				}]
			}
		});
		let response = parse_search_response(json).expect("parse failed");

		assert_eq!(response.total(), 42);
		assert!(response.is_total_exact());
		assert_eq!(response.hits.hits[0].score, Some(12.5));

		let inner = &response.hits.hits[0].inner_hits["etablissements"];

		assert_eq!(inner.hits.hits[0].source["siret"], "35600000000048");
	}

	#[test]
	fn engine_errors_are_reported() {
		let json = serde_json::json!({ "error": { "type": "index_not_found_exception" }, "status": 404 });
		let err = parse_search_response(json).expect_err("Expected error.");

		assert!(err.to_string().contains("index_not_found_exception"));
	}

	#[test]
	fn missing_total_falls_back_to_hit_count() {
		let json = serde_json::json!({ "hits": { "hits": [{ "_source": {} }, { "_source": {} }] } });
		let response = parse_search_response(json).expect("parse failed");

		assert_eq!(response.total(), 2);
		assert!(response.is_total_exact());
	}

	#[test]
	fn lower_bound_totals_are_flagged() {
		let json = serde_json::json!({
			"hits": { "total": { "value": 10000, "relation": "gte" }, "hits": [] }
		});
		let response = parse_search_response(json).expect("parse failed");

		assert_eq!(response.total(), 10_000);
		assert!(!response.is_total_exact());
	}
}
