use std::sync::LazyLock;

use regex::Regex;
use time::{Date, macros::format_description};

use crate::{
	Error, Result,
	labels::{CodeKind, ReferenceCodes},
};

static CODE_REGIONAL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^((0[1-9])|([1-8][0-9])|(9[0-8])|(2A)|(2B))[0-9]{3}$")
		.expect("Regional code pattern must compile.")
});
static DEPARTEMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^((0[1-9])|([1-8][0-9])|(9[0-5])|(2A)|(2B)|(97[1-6]))$")
		.expect("Departement pattern must compile.")
});

pub fn validate_code_postal(code_postal: Option<String>) -> Result<Option<String>> {
	let Some(code_postal) = code_postal else {
		return Ok(None);
	};

	if code_postal.chars().count() != 5 {
		return Err(Error::validation("Code postal doit contenir 5 caractères !"));
	}
	if !CODE_REGIONAL.is_match(&code_postal) {
		return Err(Error::validation("Code postal non valide."));
	}

	Ok(Some(code_postal))
}

pub fn validate_code_commune(code_commune: Option<String>) -> Result<Option<String>> {
	let Some(code_commune) = code_commune else {
		return Ok(None);
	};

	if code_commune.chars().count() != 5 {
		return Err(Error::validation("Code commune doit contenir 5 caractères !"));
	}
	if !CODE_REGIONAL.is_match(&code_commune) {
		return Err(Error::validation("Code commune non valide."));
	}

	Ok(Some(code_commune))
}

pub fn validate_departement(departement: Option<String>) -> Result<Option<String>> {
	let Some(departement) = departement else {
		return Ok(None);
	};

	if !DEPARTEMENT.is_match(&departement) {
		return Err(Error::validation("Département non valide."));
	}

	Ok(Some(departement))
}

pub fn validate_activite_principale(
	activite_principale: Option<String>,
	codes: &dyn ReferenceCodes,
) -> Result<Option<String>> {
	let Some(activite_principale) = activite_principale else {
		return Ok(None);
	};

	if activite_principale.chars().count() != 6 {
		return Err(Error::validation("Activité principale doit contenir 6 caractères."));
	}
	if !codes.contains(CodeKind::ActivitePrincipale, &activite_principale) {
		return Err(Error::validation("Activité principale inconnue."));
	}

	Ok(Some(activite_principale))
}

pub fn validate_tranche_effectif_salarie(
	tranche: Option<String>,
	codes: &dyn ReferenceCodes,
) -> Result<Option<String>> {
	let Some(tranche) = tranche else {
		return Ok(None);
	};

	if tranche.chars().count() != 2 {
		return Err(Error::validation("Tranche salariés doit contenir 2 caractères."));
	}
	if !codes.contains(CodeKind::TrancheEffectif, &tranche) {
		return Err(Error::validation("Tranche salariés non valide."));
	}

	Ok(Some(tranche))
}

/// Accepts exactly one of two upper-cased literal tokens, e.g. `("YES", "NO")`.
pub fn validate_bool_token(
	value: Option<String>,
	name: &str,
	(yes, no): (&str, &str),
) -> Result<Option<bool>> {
	let Some(value) = value else {
		return Ok(None);
	};

	if value == yes {
		return Ok(Some(true));
	}
	if value == no {
		return Ok(Some(false));
	}

	Err(Error::validation(format!(
		"Seuls les valeurs '{}' ou bien '{}' sont possibles pour '{name}'.",
		yes.to_lowercase(),
		no.to_lowercase()
	)))
}

pub fn validate_etat_administratif(etat: Option<String>) -> Result<Option<String>> {
	match etat.as_deref() {
		None => Ok(None),
		Some("A" | "C") => Ok(etat),
		Some(_) => Err(Error::validation(
			"Seuls les valeurs 'A' ou bien 'C' sont possibles pour 'etat_administratif'.",
		)),
	}
}

pub fn validate_integer(value: Option<String>, name: &str) -> Result<Option<i64>> {
	let Some(value) = value else {
		return Ok(None);
	};

	value.parse::<i64>().map(Some).map_err(|_| {
		Error::validation(format!("Veuillez indiquer un entier pour le paramètre '{name}'."))
	})
}

pub fn validate_min_max(
	(min_name, min): (&str, Option<i64>),
	(max_name, max): (&str, Option<i64>),
) -> Result<()> {
	if let (Some(min), Some(max)) = (min, max)
		&& min > max
	{
		return Err(Error::validation(format!(
			"Le paramètre '{min_name}' doit être inférieur ou égal à '{max_name}'."
		)));
	}

	Ok(())
}

/// Dates are exchanged with the engine as `YYYY-MM-DD`; the input is returned unchanged.
pub fn validate_date(value: Option<String>) -> Result<Option<String>> {
	let Some(value) = value else {
		return Ok(None);
	};
	let format = format_description!("[year]-[month]-[day]");

	Date::parse(&value, &format).map_err(|_| {
		Error::validation(
			"Veuillez indiquer une date sous le format : aaaa-mm-jj. Exemple : '1990-01-02'",
		)
	})?;

	Ok(Some(value))
}

/// Returns the zero-based page index. Missing means the first page.
pub fn parse_page(page: Option<&str>) -> Result<u32> {
	let Some(page) = page else {
		return Ok(0);
	};

	match page.trim().parse::<u32>() {
		Ok(page) if page >= 1 => Ok(page - 1),
		_ => Err(Error::validation("Veuillez indiquer un numéro de page entier, par défaut 1.")),
	}
}

/// `per_page` never rejects: anything unusable falls back to the default and large values are
/// capped.
pub fn parse_per_page(per_page: Option<&str>, cfg: &sirene_config::Pagination) -> u32 {
	match per_page.and_then(|raw| raw.trim().parse::<u32>().ok()) {
		Some(0) | None => cfg.default_per_page,
		Some(value) => value.min(cfg.max_per_page),
	}
}

pub fn validate_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<(f64, f64)> {
	let (Some(lat), Some(lon)) = (lat, lon) else {
		return Err(Error::validation("Veuillez indiquer une latitude et une longitude en nombre."));
	};
	let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
		return Err(Error::validation("Veuillez indiquer une latitude et une longitude en nombre."));
	};

	if !(-90.0..=90.0).contains(&lat) {
		return Err(Error::validation("Veuillez indiquer une latitude entre -90° et 90°."));
	}
	if !(-180.0..=180.0).contains(&lon) {
		return Err(Error::validation("Veuillez indiquer une longitude entre -180° et 180°."));
	}

	Ok((lat, lon))
}

pub fn validate_radius(radius: Option<&str>, cfg: &sirene_config::Geo) -> Result<f64> {
	let Some(radius) = radius else {
		return Ok(cfg.default_radius_km);
	};
	let max = cfg.max_radius_km;

	match radius.trim().parse::<f64>() {
		Ok(radius) if radius > 0.0 && radius <= max => Ok(radius),
		_ => Err(Error::validation(format!(
			"Veuillez indiquer un paramètre radius entre 0 et {max} km."
		))),
	}
}
