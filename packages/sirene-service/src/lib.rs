pub mod executor;
pub mod filters;
pub mod format;
pub mod geo;
pub mod person;
pub mod query;
pub mod search;
pub mod text;

mod error;

pub use error::{Error, Result};
pub use format::{Complements, FormattedEntity, FormattedResponse};
pub use query::{QueryClause, SearchQuery};
pub use search::{build_near_point_query, build_search_query};

use std::sync::Arc;

use sirene_config::Config;
use sirene_domain::ReferenceCodes;
use sirene_elastic::SearchEngine;

/// Stateless request pipelines over shared, read-only collaborators.
pub struct SireneService {
	pub cfg: Config,
	pub labels: Arc<dyn ReferenceCodes>,
	pub engine: Arc<dyn SearchEngine>,
}
impl SireneService {
	pub fn new(
		cfg: Config,
		labels: Arc<dyn ReferenceCodes>,
		engine: Arc<dyn SearchEngine>,
	) -> Self {
		Self { cfg, labels, engine }
	}
}
