use std::collections::HashMap;

use crate::{
	Error, Result,
	labels::ReferenceCodes,
	validate::{
		parse_page, parse_per_page, validate_activite_principale, validate_bool_token,
		validate_code_commune, validate_code_postal, validate_coordinates, validate_date,
		validate_departement, validate_etat_administratif, validate_integer, validate_min_max,
		validate_radius, validate_tranche_effectif_salarie,
	},
};

const TRUE_FALSE: (&str, &str) = ("TRUE", "FALSE");
const YES_NO: (&str, &str) = ("YES", "NO");

/// Raw query-string values, as received.
#[derive(Debug, Clone, Default)]
pub struct RawParams(HashMap<String, String>);
impl RawParams {
	pub fn new(values: HashMap<String, String>) -> Self {
		Self(values)
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Code-like value: spaces removed and upper-cased. A key that is present but blank yields
	/// `Some("")` so the format validators reject it.
	pub fn code(&self, name: &str) -> Option<String> {
		let cleaned: String = self.get(name)?.chars().filter(|ch| *ch != ' ').collect();

		Some(cleaned.to_uppercase())
	}

	/// Free identifier cleaned like [`Self::code`]. Blank values count as absent.
	pub fn identifier(&self, name: &str) -> Option<String> {
		self.code(name).filter(|value| !value.is_empty())
	}

	/// Free-text value: surrounding whitespace trimmed. Empty values count as absent.
	pub fn text(&self, name: &str) -> Option<String> {
		let trimmed = self.get(name)?.trim();

		(!trimmed.is_empty()).then(|| trimmed.to_string())
	}
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// Every filterable attribute of a request, validated and normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParameters {
	pub terms: Option<String>,
	pub activite_principale: Option<String>,
	pub code_postal: Option<String>,
	pub code_commune: Option<String>,
	pub departement: Option<String>,
	pub tranche_effectif_salarie: Option<String>,
	pub etat_administratif: Option<String>,
	pub est_entrepreneur_individuel: Option<bool>,
	pub est_association: Option<bool>,
	pub est_bio: Option<bool>,
	pub est_collectivite_territoriale: Option<bool>,
	pub est_finess: Option<bool>,
	pub est_rge: Option<bool>,
	pub est_uai: Option<bool>,
	pub convention_collective_renseignee: Option<bool>,
	pub bilan_renseigne: Option<bool>,
	pub id_convention_collective: Option<String>,
	pub id_finess: Option<String>,
	pub id_rge: Option<String>,
	pub id_uai: Option<String>,
	pub code_collectivite_territoriale: Option<String>,
	pub ca_min: Option<i64>,
	pub ca_max: Option<i64>,
	pub resultat_net_min: Option<i64>,
	pub resultat_net_max: Option<i64>,
	pub nom_personne: Option<String>,
	pub prenoms_personne: Option<String>,
	pub min_date_naiss_personne: Option<String>,
	pub max_date_naiss_personne: Option<String>,
	pub lat: Option<f64>,
	pub lon: Option<f64>,
	pub radius_km: Option<f64>,
}
impl SearchParameters {
	/// True when no field that can narrow a search is set.
	pub fn is_empty(&self) -> bool {
		let strings = [
			&self.terms,
			&self.activite_principale,
			&self.code_postal,
			&self.code_commune,
			&self.departement,
			&self.tranche_effectif_salarie,
			&self.etat_administratif,
			&self.id_convention_collective,
			&self.id_finess,
			&self.id_rge,
			&self.id_uai,
			&self.code_collectivite_territoriale,
			&self.nom_personne,
			&self.prenoms_personne,
			&self.min_date_naiss_personne,
			&self.max_date_naiss_personne,
		];
		let flags = [
			self.est_entrepreneur_individuel,
			self.est_association,
			self.est_bio,
			self.est_collectivite_territoriale,
			self.est_finess,
			self.est_rge,
			self.est_uai,
			self.convention_collective_renseignee,
			self.bilan_renseigne,
		];
		let numbers = [self.ca_min, self.ca_max, self.resultat_net_min, self.resultat_net_max];
		let coordinates = [self.lat, self.lon, self.radius_km];

		strings.iter().all(|value| value.is_none())
			&& flags.iter().all(Option::is_none)
			&& numbers.iter().all(Option::is_none)
			&& coordinates.iter().all(Option::is_none)
	}
}

/// Zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub page: u32,
	pub per_page: u32,
}
impl PageRequest {
	pub fn offset(&self) -> u32 {
		self.page.saturating_mul(self.per_page)
	}
}

/// Output-shaping switches. They never count as search criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseOptions {
	pub include_etablissements: bool,
	pub include_slug: bool,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
	pub params: SearchParameters,
	pub page: PageRequest,
	pub options: ResponseOptions,
}

/// Full-text search. The `q` key is mandatory even when other filters are present.
pub fn extract_search_parameters(
	raw: &RawParams,
	codes: &dyn ReferenceCodes,
	cfg: &sirene_config::Config,
) -> Result<SearchRequest> {
	if !raw.contains("q") {
		return Err(Error::validation(
			"Veuillez indiquer la requête avec le paramètre: ?q=ma+recherche.",
		));
	}

	let page = extract_page(raw, &cfg.pagination)?;
	let mut params = extract_filters(raw, codes)?;

	params.terms = raw.text("q");

	check_empty_params(&params)?;

	let options = ResponseOptions {
		include_etablissements: validate_bool_token(
			raw.code("include_etablissements"),
			"include_etablissements",
			TRUE_FALSE,
		)?
		.unwrap_or(false),
		include_slug: extract_include_slug(raw)?,
	};

	Ok(SearchRequest { params, page, options })
}

/// Near-point search. Matching establishments are always part of the response.
pub fn extract_geo_parameters(
	raw: &RawParams,
	codes: &dyn ReferenceCodes,
	cfg: &sirene_config::Config,
) -> Result<SearchRequest> {
	let (lat, lon) = validate_coordinates(raw.get("lat"), raw.get("long"))?;
	let radius_km = validate_radius(raw.get("radius"), &cfg.geo)?;
	let page = extract_page(raw, &cfg.pagination)?;
	let mut params = extract_filters(raw, codes)?;

	params.lat = Some(lat);
	params.lon = Some(lon);
	params.radius_km = Some(radius_km);

	check_empty_params(&params)?;

	let options =
		ResponseOptions { include_etablissements: true, include_slug: extract_include_slug(raw)? };

	Ok(SearchRequest { params, page, options })
}

pub fn check_empty_params(params: &SearchParameters) -> Result<()> {
	if params.is_empty() {
		return Err(Error::validation("Veuillez indiquer au moins un paramètre de recherche."));
	}

	Ok(())
}

fn extract_page(raw: &RawParams, cfg: &sirene_config::Pagination) -> Result<PageRequest> {
	let page = parse_page(raw.get("page"))?;
	let per_page = parse_per_page(raw.get("per_page"), cfg);

	Ok(PageRequest { page, per_page })
}

fn extract_include_slug(raw: &RawParams) -> Result<bool> {
	Ok(validate_bool_token(raw.code("include_slug"), "include_slug", TRUE_FALSE)?.unwrap_or(false))
}

fn extract_flag(raw: &RawParams, name: &str) -> Result<Option<bool>> {
	validate_bool_token(raw.code(name), name, TRUE_FALSE)
}

fn extract_filters(raw: &RawParams, codes: &dyn ReferenceCodes) -> Result<SearchParameters> {
	let ca_min = validate_integer(raw.code("ca_min"), "ca_min")?;
	let ca_max = validate_integer(raw.code("ca_max"), "ca_max")?;
	let resultat_net_min = validate_integer(raw.code("resultat_net_min"), "resultat_net_min")?;
	let resultat_net_max = validate_integer(raw.code("resultat_net_max"), "resultat_net_max")?;

	validate_min_max(("ca_min", ca_min), ("ca_max", ca_max))?;
	validate_min_max(("resultat_net_min", resultat_net_min), ("resultat_net_max", resultat_net_max))?;

	Ok(SearchParameters {
		terms: None,
		activite_principale: validate_activite_principale(raw.code("activite_principale"), codes)?,
		code_postal: validate_code_postal(raw.code("code_postal"))?,
		code_commune: validate_code_commune(raw.code("code_commune"))?,
		departement: validate_departement(raw.code("departement"))?,
		tranche_effectif_salarie: validate_tranche_effectif_salarie(
			raw.code("tranche_effectif_salarie"),
			codes,
		)?,
		etat_administratif: validate_etat_administratif(raw.code("etat_administratif"))?,
		est_entrepreneur_individuel: validate_bool_token(
			raw.code("is_entrepreneur_individuel"),
			"is_entrepreneur_individuel",
			YES_NO,
		)?,
		est_association: extract_flag(raw, "est_association")?,
		est_bio: extract_flag(raw, "est_bio")?,
		est_collectivite_territoriale: extract_flag(raw, "est_collectivite_territoriale")?,
		est_finess: extract_flag(raw, "est_finess")?,
		est_rge: extract_flag(raw, "est_rge")?,
		est_uai: extract_flag(raw, "est_uai")?,
		convention_collective_renseignee: extract_flag(raw, "convention_collective_renseignee")?,
		bilan_renseigne: extract_flag(raw, "bilan_renseigne")?,
		id_convention_collective: raw.identifier("id_convention_collective"),
		id_finess: raw.identifier("id_finess"),
		id_rge: raw.identifier("id_rge"),
		id_uai: raw.identifier("id_uai"),
		code_collectivite_territoriale: raw.identifier("code_collectivite_territoriale"),
		ca_min,
		ca_max,
		resultat_net_min,
		resultat_net_max,
		nom_personne: raw.text("nom_personne"),
		prenoms_personne: raw.text("prenoms_personne"),
		min_date_naiss_personne: validate_date(raw.text("min_date_naiss_personne"))?,
		max_date_naiss_personne: validate_date(raw.text("max_date_naiss_personne"))?,
		lat: None,
		lon: None,
		radius_km: None,
	})
}
