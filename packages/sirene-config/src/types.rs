use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub elastic: Elastic,
	pub labels: Labels,
	#[serde(default)]
	pub pagination: Pagination,
	#[serde(default)]
	pub geo: Geo,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Elastic {
	pub url: String,
	pub index: String,
	pub user: String,
	pub password: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

/// Locations of the reference code tables used during parameter validation.
#[derive(Debug, Deserialize)]
pub struct Labels {
	/// JSON object keyed by activity code (NAF), e.g. `{"01.11Z": "Culture de céréales"}`.
	pub codes_naf_path: PathBuf,
	/// Optional. Same shape, keyed by size-tranche code. The built-in table is used when unset.
	pub tranches_effectif_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
	pub default_per_page: u32,
	pub max_per_page: u32,
}
impl Default for Pagination {
	fn default() -> Self {
		Self { default_per_page: 10, max_per_page: 25 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Geo {
	pub default_radius_km: f64,
	pub max_radius_km: f64,
}
impl Default for Geo {
	fn default() -> Self {
		Self { default_radius_km: 5.0, max_radius_km: 50.0 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}
