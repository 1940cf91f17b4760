//! Property tests for Min/Max scaling.

use drpt_model::{Recipe, ReleaseOptions};
use drpt_transform::{LimitsStore, ReleaseEngine};
use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;

fn scale(values: Vec<f64>) -> (Vec<f64>, LimitsStore) {
    let recipe = Recipe::from_json_str(r#"{"version": "1"}"#).unwrap();
    let data = DataFrame::new(vec![Column::new("v".into(), values)]).unwrap();
    let mut limits = LimitsStore::new();
    let outcome = ReleaseEngine::new(&recipe, ReleaseOptions::new())
        .run(data, &mut limits)
        .unwrap();
    let scaled = outcome
        .data
        .column("v")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    (scaled, limits)
}

proptest! {
    #[test]
    fn scaled_values_stay_in_unit_interval(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)) {
        let (scaled, _) = scale(values.clone());
        prop_assert_eq!(scaled.len(), values.len());
        for v in &scaled {
            prop_assert!((0.0..=1.0).contains(v), "out of range: {}", v);
        }
    }

    #[test]
    fn observed_extremes_map_to_zero_and_one(values in prop::collection::vec(-1.0e6f64..1.0e6, 2..64)) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assume!(min < max);
        let (scaled, limits) = scale(values.clone());
        for (raw, v) in values.iter().zip(&scaled) {
            if *raw == min {
                prop_assert_eq!(*v, 0.0);
            }
            if *raw == max {
                prop_assert_eq!(*v, 1.0);
            }
        }
        let recorded = limits.get_limits("v").unwrap();
        prop_assert_eq!((recorded.min, recorded.max), (min, max));
    }
}
