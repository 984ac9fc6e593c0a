use std::sync::Arc;

use sirene_domain::Labels;
use sirene_elastic::ElasticClient;
use sirene_service::SireneService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SireneService>,
}
impl AppState {
	pub fn new(config: sirene_config::Config) -> color_eyre::Result<Self> {
		let labels = Labels::load(&config.labels)?;
		let engine = ElasticClient::new(&config.elastic)?;

		tracing::info!(index = %config.elastic.index, "Search engine client ready.");

		let service = SireneService::new(config, Arc::new(labels), Arc::new(engine));

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: SireneService) -> Self {
		Self { service: Arc::new(service) }
	}
}
