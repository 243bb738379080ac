//! Shared test support: tracing setup and boundary dataset fixtures.

use std::sync::Once;

use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per test binary.
///
/// `RUST_LOG` wins; otherwise our own crate logs at trace.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,regionlink=trace"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("tracing subscriber already set");
        } else if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
    });
}

/// A regency-level FeatureCollection with one feature per label.
///
/// Each feature carries `NAME_1` (province) and `NAME_2` (the label) and
/// a degenerate triangle as geometry.
pub fn boundary_collection(province: &str, labels: &[&str]) -> String {
    let features: Vec<Value> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let x = 100.0 + i as f64;
            json!({
                "type": "Feature",
                "properties": { "NAME_1": province, "NAME_2": label },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[x, -6.0], [x + 0.5, -6.0], [x, -6.5], [x, -6.0]]]
                }
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_calls_when_init_then_no_panic() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_labels_when_building_collection_then_one_feature_each() {
        let content = boundary_collection("Jawa Barat", &["Bandung", "Garut"]);

        let parsed: Value = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["features"][1]["properties"]["NAME_2"], "Garut");
    }
}
