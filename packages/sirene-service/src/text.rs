use crate::query::QueryClause;

/// Entity fields a free-text term is matched against.
pub const TEXT_FIELDS: [&str; 4] = ["nom_complet^3", "sigle^2", "nom_raison_sociale", "liste_enseignes"];

const SIREN_LEN: usize = 9;
const SIRET_LEN: usize = 14;

/// Required, scoring clause for the free-text term. A registry number typed as the term (with or
/// without spaces) becomes an exact lookup on the entity number; a 14-digit establishment number
/// resolves to its 9-digit entity prefix.
pub fn build_text_query(terms: &str) -> Option<QueryClause> {
	let terms = terms.trim();

	if terms.is_empty() {
		return None;
	}

	let compact: String = terms.chars().filter(|ch| !ch.is_whitespace()).collect();

	if compact.bytes().all(|b| b.is_ascii_digit()) {
		match compact.len() {
			SIREN_LEN => return Some(QueryClause::term("siren", compact)),
			SIRET_LEN => return Some(QueryClause::term("siren", &compact[..SIREN_LEN])),
			_ => {},
		}
	}

	Some(QueryClause::MultiMatch {
		fields: TEXT_FIELDS.iter().map(|field| field.to_string()).collect(),
		query: terms.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_become_multi_match() {
		let Some(QueryClause::MultiMatch { fields, query }) = build_text_query(" la poste ") else {
			panic!("Expected a multi_match clause.");
		};

		assert_eq!(query, "la poste");
		assert_eq!(fields.len(), TEXT_FIELDS.len());
	}

	#[test]
	fn registry_numbers_become_exact_lookups() {
		assert_eq!(build_text_query("356 000 000"), Some(QueryClause::term("siren", "356000000")));
		assert_eq!(
			build_text_query("35600000000048"),
			Some(QueryClause::term("siren", "356000000"))
		);
	}

	#[test]
	fn other_digit_runs_stay_textual() {
		assert!(matches!(build_text_query("75001"), Some(QueryClause::MultiMatch { .. })));
	}

	#[test]
	fn blank_terms_add_nothing() {
		assert_eq!(build_text_query("   "), None);
	}
}
