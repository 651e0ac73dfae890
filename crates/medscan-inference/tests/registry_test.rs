//! ModelRegistry integration tests: resolution, cache identity, invalidation,
//! concurrent construction, and write-through materialization.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use medscan_core::config::RegistryConfig;
use medscan_core::models::{ImageTensor, ModelRecord};
use medscan_core::traits::PredictorKind;
use medscan_core::MedscanError;
use medscan_inference::ModelRegistry;
use tempfile::TempDir;
use test_fixtures::{install_registry_fixture, FixedModel, MockBackend};

fn config(dir: &TempDir) -> RegistryConfig {
    RegistryConfig {
        path: dir
            .path()
            .join("model_registry.json")
            .to_string_lossy()
            .into_owned(),
        models_dir: dir.path().join("models").to_string_lossy().into_owned(),
    }
}

fn open(dir: &TempDir, backend: &Arc<MockBackend>) -> ModelRegistry {
    ModelRegistry::open(&config(dir), backend.clone()).unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn resolve_uses_default_explicit_and_ensemble_alias() {
    let dir = tempfile::tempdir().unwrap();
    install_registry_fixture("throat_ensemble.json", dir.path());
    let registry = open(&dir, &Arc::new(MockBackend::new()));

    assert_eq!(registry.resolve("throat", None, None).unwrap(), "v2");
    assert_eq!(registry.resolve("throat", Some("v1"), None).unwrap(), "v1");
    assert_eq!(
        registry
            .resolve("throat", Some("v1"), Some("ensemble"))
            .unwrap(),
        "ensemble"
    );
}

#[test]
fn resolve_errors_are_typed() {
    let dir = tempfile::tempdir().unwrap();
    let registry = open(&dir, &Arc::new(MockBackend::new()));

    assert!(matches!(
        registry.resolve("skin", None, None),
        Err(MedscanError::UnsupportedCategory { .. })
    ));
    assert!(matches!(
        registry.resolve("ear", Some("v5"), None),
        Err(MedscanError::VersionNotFound { .. })
    ));
    // Fresh registries have no ensemble version.
    assert!(matches!(
        registry.resolve("ear", None, Some("ensemble")),
        Err(MedscanError::VersionNotFound { ref version, .. }) if version == "ensemble"
    ));
}

#[test]
fn repeated_get_returns_identical_handle() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);

    let a = registry.get("throat", "v1").unwrap();
    let b = registry.get("throat", "v1").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(backend.loads(), 1);
}

#[test]
fn missing_model_is_built_once_and_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);

    registry.get("ear", "v1").unwrap();
    assert_eq!(backend.builds(), 1);
    assert!(backend.is_stored("ear_model_resnet50_v1"));

    // A second registry over the same storage loads instead of building.
    let second = open(&dir, &backend);
    second.get("ear", "v1").unwrap();
    assert_eq!(backend.builds(), 1);
}

#[test]
fn register_invalidates_only_that_category() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);

    let throat_before = registry.get("throat", "v1").unwrap();
    let ear_before = registry.get("ear", "v1").unwrap();

    registry
        .register_version(
            "throat",
            "v2",
            ModelRecord::single("efficientnet", "throat_model_efficientnet_v2", "standard"),
            false,
        )
        .unwrap();

    let ear_after = registry.get("ear", "v1").unwrap();
    assert!(Arc::ptr_eq(&ear_before, &ear_after));

    let throat_after = registry.get("throat", "v1").unwrap();
    assert!(!Arc::ptr_eq(&throat_before, &throat_after));
}

#[test]
fn concurrent_first_access_constructs_once() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new().with_build_delay(Duration::from_millis(100)));
    let registry = Arc::new(open(&dir, &backend));
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get("throat", "v1").unwrap()
            })
        })
        .collect();
    let predictors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(backend.builds(), 1);
    assert_eq!(backend.loads(), 1);
    for p in &predictors[1..] {
        assert!(Arc::ptr_eq(&predictors[0], p));
    }
}

#[test]
fn ensemble_reuses_cached_members() {
    let dir = tempfile::tempdir().unwrap();
    install_registry_fixture("throat_ensemble.json", dir.path());
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);

    let ensemble = registry.get("throat", "ensemble").unwrap();
    assert_eq!(ensemble.kind(), PredictorKind::Ensemble);
    assert_eq!(backend.loads(), 2);

    registry.get("throat", "v1").unwrap();
    registry.get("throat", "v2").unwrap();
    assert_eq!(backend.loads(), 2);
}

#[test]
fn construction_failure_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);

    backend.set_fail_loads(true);
    assert!(matches!(
        registry.get("ear", "v1"),
        Err(MedscanError::ConstructionFailure { .. })
    ));

    backend.set_fail_loads(false);
    assert!(registry.get("ear", "v1").is_ok());
}

#[test]
fn create_ensemble_and_set_default() {
    let dir = tempfile::tempdir().unwrap();
    let registry = open(&dir, &Arc::new(MockBackend::new()));
    registry
        .register_version(
            "ear",
            "v2",
            ModelRecord::single("densenet", "ear_model_densenet_v2", "enhanced"),
            false,
        )
        .unwrap();
    registry
        .create_ensemble("ear", "ensemble", &ids(&["v1", "v2"]), None)
        .unwrap();
    registry.set_default("ear", "ensemble").unwrap();

    let snapshot = registry.snapshot();
    let ear = &snapshot.categories["ear"];
    assert_eq!(ear.default_version, "ensemble");
    assert_eq!(ear.versions, vec!["ensemble", "v1", "v2"]);
    assert_eq!(registry.preprocessing_for("ear", "v2").unwrap(), "enhanced");
    assert_eq!(registry.preprocessing_for("ear", "ensemble").unwrap(), "standard");
}

#[test]
fn nested_ensemble_is_rejected_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = install_registry_fixture("throat_ensemble.json", dir.path());
    let registry = open(&dir, &Arc::new(MockBackend::new()));
    let before = std::fs::read(&path).unwrap();

    let err = registry
        .create_ensemble("throat", "meta", &ids(&["ensemble", "v1"]), None)
        .unwrap_err();
    assert!(matches!(err, MedscanError::EnsembleConfig { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert!(registry.store().record("throat", "meta").is_none());
}

#[test]
fn custom_model_is_saved_and_registered() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);

    let model = FixedModel::new(vec![0.1, 0.2, 0.3, 0.2, 0.2]);
    let record = registry
        .register_custom_model("throat", &model, "v3", "densenet", true)
        .unwrap();
    let ModelRecord::Single(single) = &record else {
        panic!("expected single record");
    };
    assert!(single.path.ends_with("throat_model_densenet_v3"));
    assert_eq!(single.preprocessing, "standard");
    assert!(backend.is_stored(&single.path));

    assert_eq!(registry.resolve("throat", None, None).unwrap(), "v3");
    registry.get("throat", "v3").unwrap();
    assert_eq!(backend.builds(), 0);
}

#[test]
fn custom_model_creates_category_that_cannot_be_classified() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);
    registry
        .register_custom_model("skin", &FixedModel::new(vec![1.0]), "v1", "resnet50", true)
        .unwrap();
    assert_eq!(backend.saves(), 1);
    assert_eq!(registry.resolve("skin", None, None).unwrap(), "v1");

    let err = registry.get("skin", "v1").err().unwrap();
    assert!(matches!(err, MedscanError::UnsupportedCategory { ref category } if category == "skin"));
}

#[test]
fn reserved_ensemble_architecture_is_rejected_before_saving() {
    let dir = tempfile::tempdir().unwrap();
    let path = install_registry_fixture("throat_ensemble.json", dir.path());
    let backend = Arc::new(MockBackend::new());
    let registry = open(&dir, &backend);
    let before = std::fs::read(&path).unwrap();

    let err = registry
        .register_custom_model("throat", &FixedModel::new(vec![0.2; 5]), "custom", "ensemble", false)
        .unwrap_err();
    assert!(matches!(err, MedscanError::EnsembleConfig { .. }));
    assert_eq!(backend.saves(), 0);

    let err = registry
        .register_version(
            "throat",
            "custom",
            ModelRecord::single("ensemble", "throat_model_custom", "standard"),
            false,
        )
        .unwrap_err();
    assert!(matches!(err, MedscanError::EnsembleConfig { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let reopened = open(&dir, &backend);
    assert_eq!(
        reopened.snapshot().categories["throat"].versions,
        vec!["ensemble", "v1", "v2"]
    );
}

#[test]
fn reregister_during_construction_does_not_leave_stale_handle() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(
        MockBackend::new()
            .with_build_delay(Duration::from_millis(400))
            .with_build_scores("resnet50", vec![0.9, 0.0, 0.0, 0.0, 0.1])
            .with_build_scores("densenet", vec![0.0, 0.0, 0.0, 0.0, 1.0]),
    );
    let registry = Arc::new(open(&dir, &backend));

    let slow = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || registry.get("throat", "v1").unwrap())
    };
    thread::sleep(Duration::from_millis(100));
    registry
        .register_version(
            "throat",
            "v1",
            ModelRecord::single("densenet", "throat_model_densenet_v1", "standard"),
            true,
        )
        .unwrap();
    slow.join().unwrap();

    let tensor = ImageTensor::zeros(vec![1, 3, 4, 4]);
    let current = registry.get("throat", "v1").unwrap();
    assert_eq!(current.predict(&tensor).unwrap(), vec![0.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn concurrent_registrations_through_registry_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::new());
    let registry = Arc::new(open(&dir, &backend));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .register_version(
                        "ear",
                        &format!("c{i}"),
                        ModelRecord::single("resnet50", format!("ear_model_c{i}"), "standard"),
                        false,
                    )
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let reopened = open(&dir, &backend);
    assert_eq!(reopened.snapshot().categories["ear"].versions.len(), 9);
}

#[test]
fn clear_cache_and_flush() {
    let dir = tempfile::tempdir().unwrap();
    let registry = open(&dir, &Arc::new(MockBackend::new()));
    registry.get("ear", "v1").unwrap();
    registry.get("throat", "v1").unwrap();
    assert_eq!(registry.invalidate("ear"), 1);
    registry.clear_cache();
    assert!(!registry.cache().contains(&registry.cache_key("throat", "v1")));
    registry.flush().unwrap();
    assert!(registry.store().path().exists());
}
