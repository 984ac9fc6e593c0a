use serde_json::Value;

use sirene_domain::{Scope, SearchParameters, resolve_field};

use crate::query::QueryClause;

/// Generic filter fields. The geo triple and the person fields are consumed by their own
/// builders and never appear here.
enum Filter<'a> {
	Equals(&'static str, Option<&'a str>),
	Flag(&'static str, Option<bool>),
	Bounds { min: (&'static str, Option<i64>), max: (&'static str, Option<i64>) },
}

fn allow_list(params: &SearchParameters) -> Vec<Filter<'_>> {
	vec![
		Filter::Equals("activite_principale", params.activite_principale.as_deref()),
		Filter::Equals("code_postal", params.code_postal.as_deref()),
		Filter::Equals("code_commune", params.code_commune.as_deref()),
		Filter::Equals("departement", params.departement.as_deref()),
		Filter::Equals("tranche_effectif_salarie", params.tranche_effectif_salarie.as_deref()),
		Filter::Equals("etat_administratif", params.etat_administratif.as_deref()),
		Filter::Equals("id_convention_collective", params.id_convention_collective.as_deref()),
		Filter::Equals("id_finess", params.id_finess.as_deref()),
		Filter::Equals("id_rge", params.id_rge.as_deref()),
		Filter::Equals("id_uai", params.id_uai.as_deref()),
		Filter::Equals(
			"code_collectivite_territoriale",
			params.code_collectivite_territoriale.as_deref(),
		),
		Filter::Flag("est_entrepreneur_individuel", params.est_entrepreneur_individuel),
		Filter::Flag("est_association", params.est_association),
		Filter::Flag("est_bio", params.est_bio),
		Filter::Flag("est_collectivite_territoriale", params.est_collectivite_territoriale),
		Filter::Flag("est_finess", params.est_finess),
		Filter::Flag("est_rge", params.est_rge),
		Filter::Flag("est_uai", params.est_uai),
		Filter::Flag("convention_collective_renseignee", params.convention_collective_renseignee),
		Filter::Flag("bilan_renseigne", params.bilan_renseigne),
		Filter::Bounds {
			min: ("ca_min", params.ca_min),
			max: ("ca_max", params.ca_max),
		},
		Filter::Bounds {
			min: ("resultat_net_min", params.resultat_net_min),
			max: ("resultat_net_max", params.resultat_net_max),
		},
	]
}

/// Non-scoring constraints for every set generic filter, in allow-list order.
pub fn build_filters(params: &SearchParameters, scope: Scope) -> Vec<QueryClause> {
	let mut clauses = Vec::new();

	for filter in allow_list(params) {
		match filter {
			Filter::Equals(name, Some(value)) => {
				clauses.push(QueryClause::term(resolve_field(name, scope), value));
			},
			Filter::Flag(name, Some(value)) => clauses.push(flag_clause(name, value, scope)),
			Filter::Bounds { min: (min_name, min), max: (max_name, max) } => {
				if let Some(min) = min {
					clauses.push(QueryClause::Range {
						field: resolve_field(min_name, scope).to_string(),
						gte: Some(Value::from(min)),
						lte: None,
					});
				}
				if let Some(max) = max {
					clauses.push(QueryClause::Range {
						field: resolve_field(max_name, scope).to_string(),
						gte: None,
						lte: Some(Value::from(max)),
					});
				}
			},
			Filter::Equals(_, None) | Filter::Flag(_, None) => {},
		}
	}

	clauses
}

fn flag_clause(name: &str, value: bool, scope: Scope) -> QueryClause {
	let field = resolve_field(name, scope);

	if field == name {
		return QueryClause::term(field, value);
	}

	QueryClause::Exists { field: field.to_string(), present: value }
}
