use serde_json::Value;

use sirene_domain::SearchParameters;

use crate::query::QueryClause;

/// Weight of an exact name match over a token-only match.
pub const EXACT_NAME_BOOST: f32 = 8.0;

type Selector = fn(&SearchParameters) -> Option<&str>;

/// One nested person collection and the fields a person search matches on.
#[derive(Clone, Copy, Debug)]
pub struct PersonSpec {
	pub path: &'static str,
	pub family_name_field: &'static str,
	pub given_names_field: &'static str,
	pub birth_date_field: &'static str,
	pub family_name: Selector,
	pub given_names: Selector,
	pub birth_date_min: Selector,
	pub birth_date_max: Selector,
}

/// Officers who are natural persons.
pub const DIRIGEANTS_PP: PersonSpec = PersonSpec {
	path: "dirigeants_pp",
	family_name_field: "nom",
	given_names_field: "prenoms",
	birth_date_field: "date_de_naissance",
	family_name: nom_personne,
	given_names: prenoms_personne,
	birth_date_min: min_date_naiss_personne,
	birth_date_max: max_date_naiss_personne,
};

/// Elected officials of local authorities.
pub const COLTER_ELUS: PersonSpec = PersonSpec {
	path: "colter_elus",
	family_name_field: "nom",
	given_names_field: "prenom",
	birth_date_field: "date_naissance",
	family_name: nom_personne,
	given_names: prenoms_personne,
	birth_date_min: min_date_naiss_personne,
	birth_date_max: max_date_naiss_personne,
};

pub const PERSON_SPECS: [PersonSpec; 2] = [DIRIGEANTS_PP, COLTER_ELUS];

/// ORs one nested query per contributing spec. Returns [`QueryClause::MatchAll`] when no spec
/// has anything to match.
pub fn build_person_query(params: &SearchParameters, specs: &[PersonSpec]) -> QueryClause {
	let nested: Vec<QueryClause> =
		specs.iter().filter_map(|spec| build_spec_query(params, spec)).collect();

	if nested.is_empty() {
		return QueryClause::MatchAll;
	}

	QueryClause::AnyOf(nested)
}

fn build_spec_query(params: &SearchParameters, spec: &PersonSpec) -> Option<QueryClause> {
	let mut must = Vec::new();
	let mut should = Vec::new();

	for (selector, field) in
		[(spec.family_name, spec.family_name_field), (spec.given_names, spec.given_names_field)]
	{
		let Some(name) = selector(params) else {
			continue;
		};
		let field = format!("{}.{field}", spec.path);

		must.extend(name.split_whitespace().map(|token| QueryClause::Match {
			field: field.clone(),
			query: token.to_string(),
		}));
		should.push(QueryClause::MatchPhrase {
			field: format!("{field}.keyword"),
			query: name.to_string(),
			boost: Some(EXACT_NAME_BOOST),
		});
	}

	let date_field = format!("{}.{}", spec.path, spec.birth_date_field);

	if let Some(min) = (spec.birth_date_min)(params) {
		must.push(QueryClause::Range {
			field: date_field.clone(),
			gte: Some(Value::from(min)),
			lte: None,
		});
	}
	if let Some(max) = (spec.birth_date_max)(params) {
		must.push(QueryClause::Range { field: date_field, gte: None, lte: Some(Value::from(max)) });
	}
	if must.is_empty() && should.is_empty() {
		return None;
	}

	Some(QueryClause::NestedBoolean { path: spec.path.to_string(), must, should })
}

fn nom_personne(params: &SearchParameters) -> Option<&str> {
	params.nom_personne.as_deref()
}

fn prenoms_personne(params: &SearchParameters) -> Option<&str> {
	params.prenoms_personne.as_deref()
}

fn min_date_naiss_personne(params: &SearchParameters) -> Option<&str> {
	params.min_date_naiss_personne.as_deref()
}

fn max_date_naiss_personne(params: &SearchParameters) -> Option<&str> {
	params.max_date_naiss_personne.as_deref()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokens_are_required_and_exact_phrase_is_boosted() {
		let params =
			SearchParameters { prenoms_personne: Some("Jean Pierre".to_string()), ..Default::default() };
		let QueryClause::NestedBoolean { path, must, should } =
			build_spec_query(&params, &DIRIGEANTS_PP).expect("Expected a nested query.")
		else {
			panic!("Expected a nested boolean clause.");
		};

		assert_eq!(path, "dirigeants_pp");
		assert_eq!(
			must,
			vec![
				QueryClause::Match {
					field: "dirigeants_pp.prenoms".to_string(),
					query: "Jean".to_string(),
				},
				QueryClause::Match {
					field: "dirigeants_pp.prenoms".to_string(),
					query: "Pierre".to_string(),
				},
			]
		);
		assert_eq!(
			should,
			vec![QueryClause::MatchPhrase {
				field: "dirigeants_pp.prenoms.keyword".to_string(),
				query: "Jean Pierre".to_string(),
				boost: Some(8.0),
			}]
		);
	}

	#[test]
	fn birth_date_bounds_are_inclusive_ranges() {
		let params = SearchParameters {
			min_date_naiss_personne: Some("1960-01-01".to_string()),
			max_date_naiss_personne: Some("1970-12-31".to_string()),
			..Default::default()
		};
		let Some(QueryClause::NestedBoolean { must, should, .. }) =
			build_spec_query(&params, &COLTER_ELUS)
		else {
			panic!("Expected a nested boolean clause.");
		};

		assert!(should.is_empty());
		assert_eq!(
			must,
			vec![
				QueryClause::Range {
					field: "colter_elus.date_naissance".to_string(),
					gte: Some(Value::from("1960-01-01")),
					lte: None,
				},
				QueryClause::Range {
					field: "colter_elus.date_naissance".to_string(),
					gte: None,
					lte: Some(Value::from("1970-12-31")),
				},
			]
		);
	}

	#[test]
	fn specs_are_ored() {
		let params =
			SearchParameters { nom_personne: Some("Dupont".to_string()), ..Default::default() };
		let QueryClause::AnyOf(nested) = build_person_query(&params, &PERSON_SPECS) else {
			panic!("Expected an OR of nested queries.");
		};

		assert_eq!(nested.len(), 2);
		assert!(matches!(&nested[1], QueryClause::NestedBoolean { path, .. } if path == "colter_elus"));
	}

	#[test]
	fn no_person_fields_is_neutral() {
		let params = SearchParameters { terms: Some("boulangerie".to_string()), ..Default::default() };

		assert_eq!(build_person_query(&params, &PERSON_SPECS), QueryClause::MatchAll);
	}
}
