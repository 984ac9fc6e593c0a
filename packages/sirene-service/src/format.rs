//! Maps raw hits onto the public response schema.
//!
//! Every field is read leniently: a missing or oddly typed source value becomes `null` on the
//! formatted side, so a single malformed document never fails the page.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use sirene_elastic::SearchHit;

use crate::geo::ETABLISSEMENTS_PATH;

/// Entity fields copied verbatim.
const ENTITY_FIELDS: [&str; 17] = [
	"siren",
	"nom_complet",
	"nom_raison_sociale",
	"sigle",
	"nombre_etablissements",
	"nombre_etablissements_ouverts",
	"activite_principale",
	"section_activite_principale",
	"categorie_entreprise",
	"annee_categorie_entreprise",
	"date_creation",
	"date_mise_a_jour",
	"etat_administratif",
	"nature_juridique",
	"tranche_effectif_salarie",
	"annee_tranche_effectif_salarie",
	"statut_diffusion",
];

const ETABLISSEMENT_FIELDS: [&str; 38] = [
	"activite_principale",
	"activite_principale_registre_metier",
	"adresse",
	"cedex",
	"code_pays_etranger",
	"code_postal",
	"commune",
	"complement_adresse",
	"coordonnees",
	"date_creation",
	"date_debut_activite",
	"departement",
	"distribution_speciale",
	"enseigne_1",
	"enseigne_2",
	"enseigne_3",
	"est_siege",
	"etat_administratif",
	"geo_adresse",
	"geo_id",
	"indice_repetition",
	"latitude",
	"libelle_cedex",
	"libelle_commune",
	"libelle_commune_etranger",
	"libelle_pays_etranger",
	"libelle_voie",
	"liste_finess",
	"liste_idcc",
	"liste_rge",
	"liste_uai",
	"longitude",
	"nom_commercial",
	"numero_voie",
	"siret",
	"tranche_effectif_salarie",
	"type_voie",
	"liste_id_bio",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedEntity {
	#[serde(flatten)]
	pub fields: Map<String, Value>,
	pub siege: Map<String, Value>,
	pub dirigeants: Vec<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub matching_etablissements: Option<Vec<Map<String, Value>>>,
	pub complements: Complements,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub slug: Option<Value>,
}

/// Derived flags and secondary blocks of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Complements {
	pub collectivite_territoriale: Option<Value>,
	pub convention_collective_renseignee: bool,
	pub est_bio: bool,
	pub est_entrepreneur_individuel: bool,
	pub est_ess: bool,
	pub est_finess: bool,
	pub est_rge: bool,
	pub est_uai: bool,
	pub identifiant_association: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedResponse {
	pub results: Vec<FormattedEntity>,
	pub total_results: u64,
	/// One-based.
	pub page: u32,
	pub per_page: u32,
	pub total_pages: u64,
	#[serde(skip)]
	pub execution_time: Duration,
}

/// Flags that are true when any establishment carries a non-empty list of the given kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ListFlags {
	idcc: bool,
	id_bio: bool,
	finess: bool,
	rge: bool,
	uai: bool,
}
impl ListFlags {
	fn fold(self, etablissement: &Map<String, Value>) -> Self {
		Self {
			idcc: self.idcc || has_items(etablissement.get("liste_idcc")),
			id_bio: self.id_bio || has_items(etablissement.get("liste_id_bio")),
			finess: self.finess || has_items(etablissement.get("liste_finess")),
			rge: self.rge || has_items(etablissement.get("liste_rge")),
			uai: self.uai || has_items(etablissement.get("liste_uai")),
		}
	}
}

pub fn format_results(
	hits: &[SearchHit],
	include_etablissements: bool,
	include_slug: bool,
) -> Vec<FormattedEntity> {
	hits.iter().map(|hit| format_hit(hit, include_etablissements, include_slug)).collect()
}

pub fn format_response(
	results: Vec<FormattedEntity>,
	total_results: u64,
	page: u32,
	per_page: u32,
	execution_time: Duration,
) -> FormattedResponse {
	FormattedResponse {
		results,
		total_results,
		page: page.saturating_add(1),
		per_page,
		total_pages: total_pages(total_results, per_page),
		execution_time,
	}
}

pub fn total_pages(total_results: u64, per_page: u32) -> u64 {
	if per_page == 0 {
		return 0;
	}

	total_results.div_ceil(u64::from(per_page))
}

fn format_hit(hit: &SearchHit, include_etablissements: bool, include_slug: bool) -> FormattedEntity {
	let source = &hit.source;
	let fields = ENTITY_FIELDS
		.iter()
		.map(|name| (name.to_string(), entity_field(source, name).cloned().unwrap_or(Value::Null)))
		.collect();
	let matching_etablissements = include_etablissements.then(|| matching_etablissements(hit));
	let flags = matching_etablissements
		.iter()
		.flatten()
		.fold(ListFlags::default(), |flags, etablissement| flags.fold(etablissement));
	let complements = Complements {
		collectivite_territoriale: format_collectivite_territoriale(source),
		convention_collective_renseignee: flags.idcc
			|| entity_bool(source, "convention_collective_renseignee"),
		est_bio: flags.id_bio || entity_bool(source, "est_bio"),
		est_entrepreneur_individuel: entity_bool(source, "est_entrepreneur_individuel"),
		est_ess: format_ess(entity_field(source, "economie_sociale_solidaire_unite_legale")),
		est_finess: flags.finess || entity_bool(source, "est_finess"),
		est_rge: flags.rge || entity_bool(source, "est_rge"),
		est_uai: flags.uai || entity_bool(source, "est_uai"),
		identifiant_association: entity_field(source, "identifiant_association_unite_legale")
			.cloned()
			.unwrap_or(Value::Null),
	};

	FormattedEntity {
		fields,
		siege: format_etablissement(source.get("siege").unwrap_or(&Value::Null)),
		dirigeants: format_dirigeants(source),
		matching_etablissements,
		complements,
		slug: include_slug.then(|| source.get("slug").cloned().unwrap_or(Value::Null)),
	}
}

/// Inner hits of the nested establishment query when the engine returned them, otherwise the
/// establishment list stored on the entity.
fn matching_etablissements(hit: &SearchHit) -> Vec<Map<String, Value>> {
	if let Some(inner) = hit.inner_hits.get(ETABLISSEMENTS_PATH) {
		return inner.hits.hits.iter().map(|inner_hit| format_etablissement(&inner_hit.source)).collect();
	}

	hit.source
		.get(ETABLISSEMENTS_PATH)
		.and_then(Value::as_array)
		.map(|etablissements| etablissements.iter().map(format_etablissement).collect())
		.unwrap_or_default()
}

pub fn format_etablissement(source: &Value) -> Map<String, Value> {
	ETABLISSEMENT_FIELDS
		.iter()
		.map(|name| (name.to_string(), source.get(*name).cloned().unwrap_or(Value::Null)))
		.collect()
}

fn format_dirigeants(source: &Value) -> Vec<Value> {
	let mut dirigeants = Vec::new();

	for dirigeant in list(source, "dirigeants_pp") {
		let date = dirigeant.get("date_de_naissance").or_else(|| dirigeant.get("date_naissance"));

		dirigeants.push(serde_json::json!({
			"nom": string_or_null(dirigeant.get("nom")),
			"prenoms": string_or_null(dirigeant.get("prenoms")),
			"annee_de_naissance": birth_year(date),
			"qualite": string_or_null(dirigeant.get("qualite")),
			"type_dirigeant": "personne physique",
		}));
	}
	for dirigeant in list(source, "dirigeants_pm") {
		let sigle = dirigeant.get("sigle").and_then(Value::as_str).filter(|sigle| !sigle.is_empty());

		dirigeants.push(serde_json::json!({
			"siren": string_or_null(dirigeant.get("siren")),
			"denomination": string_or_null(dirigeant.get("denomination")),
			"sigle": sigle,
			"qualite": string_or_null(dirigeant.get("qualite")),
			"type_dirigeant": "personne morale",
		}));
	}

	dirigeants
}

fn format_collectivite_territoriale(source: &Value) -> Option<Value> {
	let code = entity_field(source, "colter_code").filter(|code| !code.is_null())?;
	let elus: Vec<Value> = list(source, "colter_elus")
		.map(|elu| {
			serde_json::json!({
				"nom": string_or_null(elu.get("nom")),
				"prenoms": string_or_null(elu.get("prenom")),
				"annee_de_naissance": birth_year(elu.get("date_naissance")),
				"fonction": string_or_null(elu.get("fonction")),
				"sexe": string_or_null(elu.get("sexe")),
			})
		})
		.collect();

	Some(serde_json::json!({
		"code": code,
		"code_insee": entity_field(source, "colter_code_insee").cloned().unwrap_or(Value::Null),
		"elus": elus,
		"niveau": entity_field(source, "colter_niveau").cloned().unwrap_or(Value::Null),
	}))
}

/// First four characters of a date string when they form a year. Anything else is `null`.
pub fn birth_year(date: Option<&Value>) -> Option<String> {
	let date = date?.as_str()?;
	let year = date.get(..4)?;

	year.bytes().all(|b| b.is_ascii_digit()).then(|| year.to_string())
}

pub fn format_ess(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => false,
		Some(Value::String(flag)) => flag != "N",
		Some(_) => true,
	}
}

fn list<'a>(source: &'a Value, name: &str) -> impl Iterator<Item = &'a Value> {
	entity_field(source, name).and_then(Value::as_array).into_iter().flatten()
}

/// Entity attributes live at the document root or under `unite_legale`.
fn entity_field<'a>(source: &'a Value, name: &str) -> Option<&'a Value> {
	source
		.get(name)
		.or_else(|| source.get("unite_legale").and_then(|unite_legale| unite_legale.get(name)))
}

fn entity_bool(source: &Value, name: &str) -> bool {
	entity_field(source, name).and_then(Value::as_bool).unwrap_or(false)
}

fn has_items(value: Option<&Value>) -> bool {
	match value {
		Some(Value::Array(items)) => !items.is_empty(),
		Some(Value::String(text)) => !text.is_empty(),
		_ => false,
	}
}

fn string_or_null(value: Option<&Value>) -> Value {
	value.filter(|value| value.is_string()).cloned().unwrap_or(Value::Null)
}
