use sirene_domain::{
	RawParams, Scope, SearchParameters, SearchRequest, extract_geo_parameters,
	extract_search_parameters,
};

use crate::{
	Error, Result, SireneService,
	executor::{self, SearchResult},
	filters::build_filters,
	format::{FormattedResponse, format_response, format_results},
	geo::build_geo_query,
	person::{PERSON_SPECS, build_person_query},
	query::SearchQuery,
	text::build_text_query,
};

impl SireneService {
	/// Full-text search over entities, with generic filters and person matching.
	pub async fn search(&self, raw: &RawParams) -> Result<FormattedResponse> {
		let request = extract_search_parameters(raw, self.labels.as_ref(), &self.cfg)
			.map_err(|err| rejected("search", err))?;
		let query = build_search_query(&request.params);

		self.run("search", &request, &query).await
	}

	/// Entities with at least one establishment within the requested radius.
	pub async fn near_point(&self, raw: &RawParams) -> Result<FormattedResponse> {
		let request = extract_geo_parameters(raw, self.labels.as_ref(), &self.cfg)
			.map_err(|err| rejected("near_point", err))?;
		let query = build_near_point_query(&request.params)?;

		self.run("near_point", &request, &query).await
	}

	async fn run(
		&self,
		route: &'static str,
		request: &SearchRequest,
		query: &SearchQuery,
	) -> Result<FormattedResponse> {
		let SearchResult { hits, total, execution_time } = executor::execute(
			self.engine.as_ref(),
			query,
			request.page.offset(),
			request.page.per_page,
		)
		.await?;
		let results = format_results(
			&hits,
			request.options.include_etablissements,
			request.options.include_slug,
		);

		tracing::info!(
			route,
			total_results = total,
			page = request.page.page + 1,
			per_page = request.page.per_page,
			elapsed_ms = execution_time.as_millis() as u64,
			"Search served."
		);

		Ok(format_response(results, total, request.page.page, request.page.per_page, execution_time))
	}
}

pub fn build_search_query(params: &SearchParameters) -> SearchQuery {
	let person = build_person_query(params, &PERSON_SPECS);

	SearchQuery {
		filters: build_filters(params, Scope::Entity),
		text: params.terms.as_deref().and_then(build_text_query),
		relevance: if person.is_match_all() { Vec::new() } else { vec![person] },
	}
}

/// Generic filters on the establishment scope plus exactly one distance clause.
pub fn build_near_point_query(params: &SearchParameters) -> Result<SearchQuery> {
	let (Some(lat), Some(lon), Some(radius_km)) = (params.lat, params.lon, params.radius_km) else {
		return Err(Error::Validation {
			message: "Veuillez indiquer une latitude et une longitude en nombre.".to_string(),
		});
	};
	let mut filters = build_filters(params, Scope::Establishment);

	filters.push(build_geo_query(lat, lon, radius_km));

	Ok(SearchQuery { filters, text: None, relevance: Vec::new() })
}

fn rejected(route: &'static str, err: sirene_domain::Error) -> Error {
	let err = Error::from(err);

	if let Error::Validation { message } = &err {
		tracing::warn!(route, reason = %message, "Bad request.");
	}

	err
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::QueryClause;

	#[test]
	fn geo_triple_builds_one_nested_clause() {
		let params = SearchParameters {
			lat: Some(48.85),
			lon: Some(2.35),
			radius_km: Some(5.0),
			..Default::default()
		};
		let query = build_near_point_query(&params).expect("Expected a geo query.");

		assert_eq!(query.filters.len(), 1);
		assert!(matches!(
			&query.filters[0],
			QueryClause::NestedGeo { path, field, radius_km, .. }
				if path == "etablissements" && field == "etablissements.coordonnees" && *radius_km == 5.0
		));
	}

	#[test]
	fn search_without_person_fields_has_no_relevance_clauses() {
		let params = SearchParameters {
			terms: Some("boulangerie".to_string()),
			code_postal: Some("75001".to_string()),
			..Default::default()
		};
		let query = build_search_query(&params);

		assert!(query.relevance.is_empty());
		assert!(query.text.is_some());
		assert_eq!(query.filters, vec![QueryClause::term("code_postal", "75001")]);
	}

	#[test]
	fn person_fields_feed_relevance() {
		let params =
			SearchParameters { nom_personne: Some("Dupont".to_string()), ..Default::default() };
		let query = build_search_query(&params);

		assert!(query.text.is_none());
		assert!(matches!(query.relevance.as_slice(), [QueryClause::AnyOf(nested)] if nested.len() == 2));
	}
}
