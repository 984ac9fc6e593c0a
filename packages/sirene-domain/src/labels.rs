use std::{
	collections::{HashMap, HashSet},
	fs,
	path::Path,
};

use crate::{Error, Result};

/// Size tranches of the national registry, code and label.
pub const TRANCHES_EFFECTIF: [(&str, &str); 16] = [
	("NN", "Unité non employeuse"),
	("00", "0 salarié"),
	("01", "1 ou 2 salariés"),
	("02", "3 à 5 salariés"),
	("03", "6 à 9 salariés"),
	("11", "10 à 19 salariés"),
	("12", "20 à 49 salariés"),
	("21", "50 à 99 salariés"),
	("22", "100 à 199 salariés"),
	("31", "200 à 249 salariés"),
	("32", "250 à 499 salariés"),
	("41", "500 à 999 salariés"),
	("42", "1 000 à 1 999 salariés"),
	("51", "2 000 à 4 999 salariés"),
	("52", "5 000 à 9 999 salariés"),
	("53", "10 000 salariés et plus"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeKind {
	ActivitePrincipale,
	TrancheEffectif,
}

/// Reference code sets consulted while validating request parameters.
pub trait ReferenceCodes
where
	Self: Send + Sync,
{
	fn code_set(&self, kind: CodeKind) -> &HashSet<String>;

	fn contains(&self, kind: CodeKind, code: &str) -> bool {
		self.code_set(kind).contains(code)
	}
}

#[derive(Debug, Clone, Default)]
pub struct Labels {
	codes_naf: HashSet<String>,
	tranches_effectif: HashSet<String>,
}
impl Labels {
	pub fn load(cfg: &sirene_config::Labels) -> Result<Self> {
		let codes_naf = read_label_keys(&cfg.codes_naf_path)?;
		let tranches_effectif = match cfg.tranches_effectif_path.as_deref() {
			Some(path) => read_label_keys(path)?,
			None => default_tranches(),
		};

		Ok(Self { codes_naf, tranches_effectif })
	}

	pub fn from_codes<I, S>(codes_naf: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			codes_naf: codes_naf.into_iter().map(Into::into).collect(),
			tranches_effectif: default_tranches(),
		}
	}
}

impl ReferenceCodes for Labels {
	fn code_set(&self, kind: CodeKind) -> &HashSet<String> {
		match kind {
			CodeKind::ActivitePrincipale => &self.codes_naf,
			CodeKind::TrancheEffectif => &self.tranches_effectif,
		}
	}
}

fn default_tranches() -> HashSet<String> {
	TRANCHES_EFFECTIF.iter().map(|(code, _)| (*code).to_string()).collect()
}

// Label files are JSON objects keyed by code; only the keys matter here.
fn read_label_keys(path: &Path) -> Result<HashSet<String>> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadLabels { path: path.to_path_buf(), source: err })?;
	let labels: HashMap<String, serde_json::Value> = serde_json::from_str(&raw)
		.map_err(|err| Error::ParseLabels { path: path.to_path_buf(), source: err })?;

	Ok(labels.into_keys().map(|code| code.to_ascii_uppercase()).collect())
}
