//! Logical filter names and their concrete document field paths.
//!
//! Presence filters such as `est_rge` are stored as booleans on legal-entity documents, while
//! establishment-oriented searches have to look at the list the flag is derived from
//! (`unite_legale.liste_rge`). The same logical name therefore resolves differently per scope.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
	/// Filters evaluated against legal-entity documents.
	Entity,
	/// Filters evaluated against establishment-oriented searches.
	Establishment,
}

const SHARED_FIELDS: [(&str, &str); 8] = [
	("bilan_renseigne", "unite_legale.bilan_financier.ca"),
	("ca_min", "unite_legale.bilan_financier.ca"),
	("ca_max", "unite_legale.bilan_financier.ca"),
	("resultat_net_min", "unite_legale.bilan_financier.resultat_net"),
	("resultat_net_max", "unite_legale.bilan_financier.resultat_net"),
	("code_collectivite_territoriale", "unite_legale.colter_code"),
	("est_collectivite_territoriale", "unite_legale.colter_code"),
	("est_association", "unite_legale.identifiant_association_unite_legale"),
];

// Presence flags and identifier values: fields of the same name on legal-entity documents, the
// parent's identifier lists otherwise.
const ESTABLISHMENT_FIELDS: [(&str, &str); 9] = [
	("convention_collective_renseignee", "unite_legale.liste_idcc"),
	("est_bio", "unite_legale.liste_id_bio"),
	("est_finess", "unite_legale.liste_finess"),
	("est_rge", "unite_legale.liste_rge"),
	("est_uai", "unite_legale.liste_uai"),
	("id_convention_collective", "unite_legale.liste_idcc"),
	("id_finess", "unite_legale.liste_finess"),
	("id_rge", "unite_legale.liste_rge"),
	("id_uai", "unite_legale.liste_uai"),
];

/// Resolves a logical filter name to the document field it targets.
///
/// Names without a mapping are returned unchanged, so new filters can be introduced without
/// touching this table as long as the document field carries the same name.
pub fn resolve_field(logical_name: &str, scope: Scope) -> &str {
	if scope == Scope::Establishment
		&& let Some((_, path)) = ESTABLISHMENT_FIELDS.iter().find(|(name, _)| *name == logical_name)
	{
		return path;
	}
	if let Some((_, path)) = SHARED_FIELDS.iter().find(|(name, _)| *name == logical_name) {
		return path;
	}

	logical_name
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scope_changes_presence_flag_paths() {
		assert_eq!(resolve_field("est_rge", Scope::Entity), "est_rge");
		assert_eq!(resolve_field("est_rge", Scope::Establishment), "unite_legale.liste_rge");
		assert_ne!(
			resolve_field("est_rge", Scope::Entity),
			resolve_field("est_rge", Scope::Establishment)
		);
	}

	#[test]
	fn shared_mappings_apply_to_both_scopes() {
		for scope in [Scope::Entity, Scope::Establishment] {
			assert_eq!(resolve_field("ca_min", scope), "unite_legale.bilan_financier.ca");
			assert_eq!(resolve_field("ca_max", scope), resolve_field("ca_min", scope));
			assert_eq!(
				resolve_field("est_collectivite_territoriale", scope),
				"unite_legale.colter_code"
			);
		}
	}

	#[test]
	fn identifier_values_resolve_per_scope() {
		for (name, list) in [
			("id_convention_collective", "unite_legale.liste_idcc"),
			("id_finess", "unite_legale.liste_finess"),
			("id_rge", "unite_legale.liste_rge"),
			("id_uai", "unite_legale.liste_uai"),
		] {
			assert_eq!(resolve_field(name, Scope::Entity), name);
			assert_eq!(resolve_field(name, Scope::Establishment), list);
		}
	}

	#[test]
	fn unknown_names_map_to_themselves() {
		assert_eq!(
			resolve_field("nature_juridique_unite_legale", Scope::Entity),
			"nature_juridique_unite_legale"
		);
		assert_eq!(resolve_field("not_a_filter", Scope::Establishment), "not_a_filter");
	}
}
