//! Predictor backed by one loaded model.

use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::{ImageTensor, SaliencyMap, SingleRecord};
use medscan_core::traits::{ILoadedModel, IModelBackend, IPredictor, PredictorKind};
use medscan_observability::events;

pub struct SingleModelPredictor {
    locator: String,
    model: Box<dyn ILoadedModel>,
}

impl SingleModelPredictor {
    pub fn new(locator: impl Into<String>, model: Box<dyn ILoadedModel>) -> Self {
        Self {
            locator: locator.into(),
            model,
        }
    }

    /// Load the model stored at the record's locator. When nothing is stored
    /// there, build a fresh one sized to the catalog and write it back to the
    /// same locator before returning.
    pub fn materialize(
        backend: &dyn IModelBackend,
        category: &str,
        version: &str,
        record: &SingleRecord,
        num_classes: usize,
    ) -> MedscanResult<Self> {
        let failed = |e: MedscanError| MedscanError::ConstructionFailure {
            category: category.to_string(),
            version: version.to_string(),
            reason: e.to_string(),
        };

        let model = match backend.load(&record.path).map_err(failed)? {
            Some(model) => model,
            None => {
                let model = backend
                    .build(&record.architecture, num_classes)
                    .map_err(failed)?;
                backend.save(model.as_ref(), &record.path).map_err(failed)?;
                events::model_materialized(category, &record.architecture, &record.path);
                model
            }
        };
        Ok(Self::new(record.path.clone(), model))
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl IPredictor for SingleModelPredictor {
    fn predict(&self, tensor: &ImageTensor) -> MedscanResult<Vec<f32>> {
        self.model.predict(tensor)
    }

    fn attention(&self, tensor: &ImageTensor) -> MedscanResult<Option<SaliencyMap>> {
        self.model.attention(tensor)
    }

    fn kind(&self) -> PredictorKind {
        PredictorKind::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medscan_core::models::ModelRecord;
    use test_fixtures::MockBackend;

    fn record(path: &str) -> SingleRecord {
        match ModelRecord::single("resnet50", path, "standard") {
            ModelRecord::Single(s) => s,
            ModelRecord::Ensemble(_) => unreachable!(),
        }
    }

    #[test]
    fn stored_model_is_loaded_without_building() {
        let backend = MockBackend::new().with_stored("throat_v1", vec![0.1, 0.9]);
        let predictor =
            SingleModelPredictor::materialize(&backend, "throat", "v1", &record("throat_v1"), 5)
                .unwrap();
        assert_eq!(predictor.predict(&ImageTensor::zeros(vec![1])).unwrap(), vec![0.1, 0.9]);
        assert_eq!(backend.builds(), 0);
        assert_eq!(backend.saves(), 0);
    }

    #[test]
    fn missing_model_is_built_and_written_through() {
        let backend = MockBackend::new();
        let predictor =
            SingleModelPredictor::materialize(&backend, "ear", "v1", &record("ear_v1"), 5).unwrap();
        assert_eq!(predictor.predict(&ImageTensor::zeros(vec![1])).unwrap().len(), 5);
        assert_eq!(backend.builds(), 1);
        assert_eq!(backend.saves(), 1);
        assert!(backend.is_stored("ear_v1"));
        assert_eq!(predictor.locator(), "ear_v1");
    }

    #[test]
    fn backend_errors_become_construction_failures() {
        let backend = MockBackend::new();
        backend.set_fail_builds(true);
        let err = SingleModelPredictor::materialize(&backend, "ear", "v3", &record("ear_v3"), 5)
            .err()
            .unwrap();
        match err {
            MedscanError::ConstructionFailure { category, version, .. } => {
                assert_eq!(category, "ear");
                assert_eq!(version, "v3");
            }
            other => panic!("expected construction failure, got {other:?}"),
        }
    }
}
