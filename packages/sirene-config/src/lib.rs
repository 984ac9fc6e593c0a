mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Elastic, Geo, Labels, Pagination, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	for (label, value) in [
		("elastic.url", &cfg.elastic.url),
		("elastic.index", &cfg.elastic.index),
		("elastic.user", &cfg.elastic.user),
		("elastic.password", &cfg.elastic.password),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.elastic.url.starts_with("http://") && !cfg.elastic.url.starts_with("https://") {
		return Err(Error::Validation {
			message: "elastic.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.elastic.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "elastic.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.labels.codes_naf_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "labels.codes_naf_path must be non-empty.".to_string(),
		});
	}
	if cfg.pagination.default_per_page == 0 {
		return Err(Error::Validation {
			message: "pagination.default_per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.default_per_page > cfg.pagination.max_per_page {
		return Err(Error::Validation {
			message: "pagination.default_per_page must be less than or equal to pagination.max_per_page."
				.to_string(),
		});
	}
	if !cfg.geo.max_radius_km.is_finite() || cfg.geo.max_radius_km <= 0.0 {
		return Err(Error::Validation {
			message: "geo.max_radius_km must be a finite number greater than zero.".to_string(),
		});
	}
	if !cfg.geo.default_radius_km.is_finite()
		|| cfg.geo.default_radius_km <= 0.0
		|| cfg.geo.default_radius_km > cfg.geo.max_radius_km
	{
		return Err(Error::Validation {
			message: "geo.default_radius_km must be in the range (0, geo.max_radius_km]."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.elastic.url.trim().trim_end_matches('/').to_string();

	cfg.elastic.url = trimmed;

	if cfg
		.labels
		.tranches_effectif_path
		.as_deref()
		.map(|path| path.as_os_str().is_empty())
		.unwrap_or(false)
	{
		cfg.labels.tranches_effectif_path = None;
	}
}
