use crate::query::QueryClause;

pub const ETABLISSEMENTS_PATH: &str = "etablissements";
pub const COORDINATES_FIELD: &str = "etablissements.coordonnees";

/// Distance filter on nested establishment coordinates. Matching establishments come back as
/// inner hits.
pub fn build_geo_query(lat: f64, lon: f64, radius_km: f64) -> QueryClause {
	QueryClause::NestedGeo {
		path: ETABLISSEMENTS_PATH.to_string(),
		field: COORDINATES_FIELD.to_string(),
		lat,
		lon,
		radius_km,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn renders_nested_geo_distance_with_inner_hits() {
		let value = build_geo_query(48.85, 2.35, 5.0).to_value();

		assert_eq!(
			value,
			json!({
				"nested": {
					"path": "etablissements",
					"query": {
						"bool": {
							"filter": {
								"geo_distance": {
									"distance": "5km",
									"etablissements.coordonnees": { "lat": 48.85, "lon": 2.35 },
								}
							}
						}
					},
					"inner_hits": {},
				}
			})
		);
	}

	#[test]
	fn fractional_radius_keeps_its_decimals() {
		let value = build_geo_query(43.6, 1.44, 0.5).to_value();

		assert_eq!(value["nested"]["query"]["bool"]["filter"]["geo_distance"]["distance"], "0.5km");
	}
}
