//! End-to-end persistence tests through the public API

use guardar::{
    CodecRegistry, DependencySpec, Error, JsonCodec, Meta, ModelContainer, ValidationPolicy,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Centroids {
    points: Vec<Vec<f64>>,
}

impl Centroids {
    fn nearest(&self, sample: &[f64]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, point) in self.points.iter().enumerate() {
            let dist: f64 = point
                .iter()
                .zip(sample)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }
}

#[test]
fn test_dependency_spec_round_trip_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.json");

    let spec = DependencySpec::new(["a", "b", "c"]).with_meta_entry("source", json!("csv"));
    spec.save(&path).unwrap();

    let loaded = DependencySpec::load(&path).unwrap();
    assert_eq!(loaded, spec);
}

#[test]
fn test_dependency_spec_without_meta_round_trips_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.json");

    DependencySpec::new(["a"]).save(&path).unwrap();
    let loaded = DependencySpec::load(&path).unwrap();

    assert!(loaded.meta().is_none());
    assert_ne!(loaded, DependencySpec::new(["a"]).with_meta(Meta::new()));
}

#[test]
fn test_container_composition_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let model = Centroids {
        points: vec![vec![0.0, 0.0], vec![10.0, 10.0]],
    };
    let container = ModelContainer::new(
        model.clone(),
        DependencySpec::new(["f1", "f2"]),
        DependencySpec::new(["label"]),
    )
    .with_meta_entry("trained_at", json!("2024-01-01"));

    container.save(&path, &JsonCodec::new()).unwrap();

    let registry = CodecRegistry::<Centroids>::with_defaults();
    let loaded = ModelContainer::load(&path, &registry).unwrap();

    assert_eq!(loaded.x_spec().dependencies(), &["f1", "f2"]);
    assert_eq!(loaded.y_spec().dependencies(), &["label"]);
    assert_eq!(
        loaded.meta().unwrap().get("trained_at").unwrap(),
        &json!("2024-01-01")
    );

    // Same behavior on fixed inputs after reload
    for sample in [[1.0, 2.0], [9.0, 8.0], [5.0, 5.1]] {
        assert_eq!(loaded.model().nearest(&sample), model.nearest(&sample));
    }
}

#[test]
fn test_independent_saves_load_in_either_order() {
    let dir = tempfile::tempdir().unwrap();
    let path_a = dir.path().join("a.json");
    let path_b = dir.path().join("b.json");

    let spec_a = DependencySpec::new(["a1", "a2"]).with_meta_entry("origin", json!("train"));
    let spec_b = DependencySpec::new(["b1"]);
    spec_a.save(&path_a).unwrap();
    spec_b.save(&path_b).unwrap();

    // Load order must not matter: no shared state between calls
    let loaded_b = DependencySpec::load(&path_b).unwrap();
    let loaded_a = DependencySpec::load(&path_a).unwrap();
    assert_eq!(loaded_a, spec_a);
    assert_eq!(loaded_b, spec_b);

    let again_a = DependencySpec::load(&path_a).unwrap();
    let again_b = DependencySpec::load(&path_b).unwrap();
    assert_eq!(again_a, loaded_a);
    assert_eq!(again_b, loaded_b);
}

#[test]
fn test_loaded_spec_is_independent_of_original() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.json");

    let original = DependencySpec::new(["a"]).with_meta_entry("k", json!(1));
    original.save(&path).unwrap();

    let loaded = DependencySpec::load(&path).unwrap();
    drop(original);
    assert_eq!(loaded.dependencies(), &["a"]);
}

#[test]
fn test_strict_validation_workflow() {
    // A producer can insist on well-formed specs before persisting
    let spec = DependencySpec::new(["age", "income", "age"]);
    assert!(spec.validate(&ValidationPolicy::default()).is_ok());
    assert!(matches!(
        spec.validate(&ValidationPolicy::strict()),
        Err(Error::InvalidSpec(_))
    ));
}

#[test]
fn test_overwrite_leaves_only_latest_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.json");

    DependencySpec::new(["old"]).save(&path).unwrap();
    DependencySpec::new(["new1", "new2"]).save(&path).unwrap();

    let loaded = DependencySpec::load(&path).unwrap();
    assert_eq!(loaded.dependencies(), &["new1", "new2"]);
}

#[test]
fn test_inspect_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let container = ModelContainer::new(
        Centroids {
            points: vec![vec![1.0]],
        },
        DependencySpec::new(["x"]),
        DependencySpec::new(["y"]),
    );
    container.save(&path, &JsonCodec::new()).unwrap();

    // A consumer can check codec availability before committing to a load
    let info = guardar::inspect(&path).unwrap();
    let registry = CodecRegistry::<Centroids>::with_defaults();
    assert!(registry.contains(&info.codec));

    let loaded = ModelContainer::load(&path, &registry).unwrap();
    assert_eq!(loaded.model().points, vec![vec![1.0]]);
}
