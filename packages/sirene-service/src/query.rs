use serde_json::{Map, Value, json};

/// One clause of an engine query. Rendered to engine JSON by [`QueryClause::to_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryClause {
	Term { field: String, value: Value },
	/// Inclusive bounds.
	Range { field: String, gte: Option<Value>, lte: Option<Value> },
	/// `present: false` matches documents where the field is null or an empty list.
	Exists { field: String, present: bool },
	Match { field: String, query: String },
	MatchPhrase { field: String, query: String, boost: Option<f32> },
	MultiMatch { fields: Vec<String>, query: String },
	AnyOf(Vec<QueryClause>),
	NestedBoolean { path: String, must: Vec<QueryClause>, should: Vec<QueryClause> },
	NestedGeo { path: String, field: String, lat: f64, lon: f64, radius_km: f64 },
	MatchAll,
}
impl QueryClause {
	pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Term { field: field.into(), value: value.into() }
	}

	pub fn is_match_all(&self) -> bool {
		matches!(self, Self::MatchAll)
	}

	pub fn to_value(&self) -> Value {
		match self {
			Self::Term { field, value } => json!({ "term": { field.as_str(): value } }),
			Self::Range { field, gte, lte } => {
				let mut bounds = Map::new();

				if let Some(gte) = gte {
					bounds.insert("gte".to_string(), gte.clone());
				}
				if let Some(lte) = lte {
					bounds.insert("lte".to_string(), lte.clone());
				}

				json!({ "range": { field.as_str(): bounds } })
			},
			Self::Exists { field, present: true } => json!({ "exists": { "field": field } }),
			Self::Exists { field, present: false } => {
				json!({ "bool": { "must_not": [{ "exists": { "field": field } }] } })
			},
			Self::Match { field, query } => json!({ "match": { field.as_str(): query } }),
			Self::MatchPhrase { field, query, boost } => {
				let mut body = Map::new();

				body.insert("query".to_string(), Value::from(query.as_str()));

				if let Some(boost) = boost {
					body.insert("boost".to_string(), json!(boost));
				}

				json!({ "match_phrase": { field.as_str(): body } })
			},
			Self::MultiMatch { fields, query } => json!({
				"multi_match": {
					"query": query,
					"fields": fields,
					"type": "cross_fields",
					"operator": "and",
				}
			}),
			Self::AnyOf(clauses) => json!({
				"bool": {
					"should": clauses.iter().map(Self::to_value).collect::<Vec<_>>(),
					"minimum_should_match": 1,
				}
			}),
			Self::NestedBoolean { path, must, should } => json!({
				"nested": {
					"path": path,
					"query": {
						"bool": {
							"must": must.iter().map(Self::to_value).collect::<Vec<_>>(),
							"should": should.iter().map(Self::to_value).collect::<Vec<_>>(),
						}
					},
				}
			}),
			Self::NestedGeo { path, field, lat, lon, radius_km } => json!({
				"nested": {
					"path": path,
					"query": {
						"bool": {
							"filter": {
								"geo_distance": {
									"distance": format!("{radius_km}km"),
									field.as_str(): { "lat": lat, "lon": lon },
								}
							}
						}
					},
					"inner_hits": {},
				}
			}),
			Self::MatchAll => json!({ "match_all": {} }),
		}
	}
}

/// Everything the executor needs to build one request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
	/// ANDed, non-scoring.
	pub filters: Vec<QueryClause>,
	/// Required and scoring.
	pub text: Option<QueryClause>,
	/// ORed and scoring. At least one must match when the list is non-empty.
	pub relevance: Vec<QueryClause>,
}
impl SearchQuery {
	pub fn to_value(&self) -> Value {
		let mut relevance = Vec::new();

		for clause in &self.relevance {
			match clause {
				QueryClause::AnyOf(clauses) => relevance.extend(clauses.iter().map(QueryClause::to_value)),
				QueryClause::MatchAll => {},
				other => relevance.push(other.to_value()),
			}
		}

		let mut bool_query = Map::new();

		if !self.filters.is_empty() {
			bool_query.insert(
				"filter".to_string(),
				Value::Array(self.filters.iter().map(QueryClause::to_value).collect()),
			);
		}
		if let Some(text) = self.text.as_ref() {
			bool_query.insert("must".to_string(), Value::Array(vec![text.to_value()]));
		}
		if !relevance.is_empty() {
			bool_query.insert("should".to_string(), Value::Array(relevance));
			bool_query.insert("minimum_should_match".to_string(), Value::from(1));
		}
		if bool_query.is_empty() {
			return QueryClause::MatchAll.to_value();
		}

		json!({ "bool": bool_query })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_negative_existence_as_must_not() {
		let clause = QueryClause::Exists { field: "unite_legale.liste_rge".to_string(), present: false };

		assert_eq!(
			clause.to_value(),
			json!({ "bool": { "must_not": [{ "exists": { "field": "unite_legale.liste_rge" } }] } })
		);
	}

	#[test]
	fn renders_only_present_range_bounds() {
		let clause = QueryClause::Range {
			field: "unite_legale.bilan_financier.ca".to_string(),
			gte: Some(json!(1000)),
			lte: None,
		};

		assert_eq!(
			clause.to_value(),
			json!({ "range": { "unite_legale.bilan_financier.ca": { "gte": 1000 } } })
		);
	}

	#[test]
	fn search_query_places_clauses_by_role() {
		let query = SearchQuery {
			filters: vec![QueryClause::term("code_postal", "75001")],
			text: Some(QueryClause::Match { field: "nom_complet".to_string(), query: "poste".to_string() }),
			relevance: vec![QueryClause::AnyOf(vec![
				QueryClause::Match { field: "dirigeants_pp.nom".to_string(), query: "dupont".to_string() },
				QueryClause::Match { field: "colter_elus.nom".to_string(), query: "dupont".to_string() },
			])],
		};
		let value = query.to_value();

		assert_eq!(value["bool"]["filter"][0], json!({ "term": { "code_postal": "75001" } }));
		assert_eq!(value["bool"]["must"][0], json!({ "match": { "nom_complet": "poste" } }));
		assert_eq!(value["bool"]["should"].as_array().map(Vec::len), Some(2));
		assert_eq!(value["bool"]["minimum_should_match"], 1);
	}

	#[test]
	fn empty_query_matches_everything() {
		let query = SearchQuery { relevance: vec![QueryClause::MatchAll], ..Default::default() };

		assert_eq!(query.to_value(), json!({ "match_all": {} }));
	}
}
