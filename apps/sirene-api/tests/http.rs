use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use sirene_api::{routes, state::AppState};
use sirene_domain::Labels;
use sirene_elastic::SearchEngine;
use sirene_service::SireneService;
use sirene_testkit::{FailingEngine, StaticEngine, test_config};

fn app(engine: Arc<dyn SearchEngine>) -> Router {
	let service = SireneService::new(test_config(), Arc::new(Labels::from_codes(["62.01Z"])), engine);

	routes::router(AppState::from_service(service))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call the router.");
	let status = response.status();
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let body = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse JSON body.")
	};

	(status, body)
}

#[tokio::test]
async fn health_ok() {
	let (status, _) = get(app(Arc::new(StaticEngine::empty())), "/health").await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn search_serves_envelope() {
	let engine = StaticEngine::with_sources(
		1,
		vec![json!({ "siren": "356000000", "nom_complet": "la poste", "slug": "la-poste" })],
	);
	let (status, body) = get(app(Arc::new(engine)), "/search?q=la%20poste&code_postal=75%20001").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["total_results"], 1);
	assert_eq!(body["page"], 1);
	assert_eq!(body["per_page"], 10);
	assert_eq!(body["total_pages"], 1);
	assert_eq!(body["results"][0]["siren"], "356000000");
	assert!(body["results"][0].get("slug").is_none());
	assert!(body.get("execution_time").is_none());
}

#[tokio::test]
async fn missing_query_is_a_bad_request() {
	let (status, body) = get(app(Arc::new(StaticEngine::empty())), "/search?code_postal=75001").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({ "erreur": "Veuillez indiquer la requête avec le paramètre: ?q=ma+recherche." })
	);
}

#[tokio::test]
async fn malformed_postal_code_is_a_bad_request() {
	let (status, body) =
		get(app(Arc::new(StaticEngine::empty())), "/search?q=poste&code_postal=7500").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["erreur"], "Code postal doit contenir 5 caractères !");
}

#[tokio::test]
async fn engine_failure_is_service_unavailable() {
	let engine = FailingEngine::new();
	let (status, body) = get(app(Arc::new(engine.clone())), "/search?q=poste").await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["erreur"], "Search engine unavailable.");
	assert_eq!(engine.count(), 1);
}

#[tokio::test]
async fn near_point_returns_matching_establishments() {
	let engine = StaticEngine::new(json!({
		"took": 2,
		"timed_out": false,
		"hits": {
			"total": { "value": 1, "relation": "eq" },
			"hits": [{
				"_id": "356000000",
				"_score": 0.0,
				"_source": { "siren": "356000000", "etablissements": [{ "siret": "35600000000048" }] },
				"inner_hits": {
					"etablissements": {
						"hits": {
							"total": { "value": 1, "relation": "eq" },
							"hits": [{ "_source": { "siret": "35600000000055", "liste_rge": ["X1"] } }],
						}
					}
				},
			}],
		},
	}));
	let (status, body) =
		get(app(Arc::new(engine)), "/near_point?lat=48.85&long=2.35&radius=5").await;
	let entity = &body["results"][0];

	assert_eq!(status, StatusCode::OK);
	assert_eq!(entity["matching_etablissements"].as_array().map(Vec::len), Some(1));
	assert_eq!(entity["matching_etablissements"][0]["siret"], "35600000000055");
	assert_eq!(entity["complements"]["est_rge"], true);
}

#[tokio::test]
async fn near_point_rejects_out_of_range_radius() {
	let engine = FailingEngine::new();
	let (status, body) =
		get(app(Arc::new(engine.clone())), "/near_point?lat=48.85&long=2.35&radius=80").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["erreur"], "Veuillez indiquer un paramètre radius entre 0 et 50 km.");
	assert_eq!(engine.count(), 0);
}
