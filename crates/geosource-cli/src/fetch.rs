use anyhow::Context;

use geosource_client::{GeoJsonClient, GeoJsonQuery};
use geosource_core::{AppConfig, Feature, FeatureCollection, RecordFilter, SortSpec};

use crate::FetchArgs;

/// Fetch GeoJSON for a data source and print it.
///
/// `--filter` and `--sort` are decoded locally first so shape errors are
/// reported before anything is sent to the server.
///
/// # Errors
///
/// Returns an error if the filter or sort JSON is malformed, or if the
/// request fails.
pub(crate) async fn run_fetch(config: &AppConfig, args: &FetchArgs) -> anyhow::Result<()> {
    let client = GeoJsonClient::from_config(config)?;

    let mut query = GeoJsonQuery::new();
    if let Some(raw) = &args.filter {
        let filter: RecordFilter =
            serde_json::from_str(raw).context("--filter is not a valid filter tree")?;
        query = query.filter(filter);
    }
    if let Some(raw) = &args.sort {
        let sort: Vec<SortSpec> =
            serde_json::from_str(raw).context("--sort is not a valid sort list")?;
        query = query.sort(sort);
    }
    if let Some(search) = &args.search {
        query = query.search(search.as_str());
    }
    if let Some(page) = args.page {
        query = query.page(page);
    }
    if args.all {
        query = query.all();
    }

    let collection = client
        .fetch_geojson(&args.data_source_id, &query)
        .await
        .with_context(|| format!("fetching geojson for data source {}", args.data_source_id))?;

    if args.summary {
        print_summary(&collection);
    } else {
        println!("{}", serde_json::to_string_pretty(&collection)?);
    }
    Ok(())
}

fn print_summary(collection: &FeatureCollection) {
    if collection.features.is_empty() {
        println!("no features returned");
        return;
    }

    let header = format!("{:<26}{:<12}{:<12}EXTERNAL ID", "ID", "LAT", "LNG");
    println!("{header}");
    for feature in &collection.features {
        println!("{}", summary_line(feature));
    }
    println!("{} feature(s)", collection.features.len());
}

fn summary_line(feature: &Feature) -> String {
    let id_display = if feature.id.chars().count() > 24 {
        format!("{}...", feature.id.chars().take(21).collect::<String>())
    } else {
        feature.id.clone()
    };
    format!(
        "{:<26}{:<12.5}{:<12.5}{}",
        id_display,
        feature.geometry.latitude(),
        feature.geometry.longitude(),
        feature.properties.external_id
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use geosource_core::feature::{FeatureType, GeometryType, PointGeometry};
    use geosource_core::FeatureProperties;

    use super::*;

    fn feature(id: &str) -> Feature {
        Feature {
            id: id.to_owned(),
            kind: FeatureType::Feature,
            geometry: PointGeometry {
                kind: GeometryType::Point,
                coordinates: [-0.1278, 51.5074],
            },
            properties: FeatureProperties {
                data_source_id: "ds1".to_owned(),
                external_id: "ext1".to_owned(),
                geocode_result: None,
                extra: HashMap::new(),
            },
        }
    }

    #[test]
    fn summary_line_shows_lat_then_lng() {
        let line = summary_line(&feature("abc"));
        assert!(line.starts_with("abc"));
        assert!(line.contains("51.50740"));
        assert!(line.contains("-0.12780"));
        assert!(line.ends_with("ext1"));
    }

    #[test]
    fn summary_line_truncates_long_ids() {
        let long_id = "a".repeat(40);
        let line = summary_line(&feature(&long_id));
        assert!(line.contains("..."));
        assert!(!line.contains(&long_id));
    }
}
