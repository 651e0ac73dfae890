use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use medscan_core::errors::{MedscanResult, PersistenceError};
use medscan_core::models::{ImageTensor, SaliencyMap};
use medscan_core::traits::{ILoadedModel, IModelBackend};

/// A model that returns the same scores for every input.
#[derive(Debug, Clone)]
pub struct FixedModel {
    pub scores: Vec<f32>,
    pub attention: Option<SaliencyMap>,
    pub panics: bool,
}

impl FixedModel {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            attention: None,
            panics: false,
        }
    }

    /// A model whose forward pass panics.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_attention(mut self) -> Self {
        self.attention = Some(SaliencyMap {
            width: 2,
            height: 2,
            values: vec![0.1, 0.9, 0.4, 0.6],
        });
        self
    }
}

impl ILoadedModel for FixedModel {
    fn predict(&self, _tensor: &ImageTensor) -> MedscanResult<Vec<f32>> {
        if self.panics {
            panic!("model forward pass crashed");
        }
        Ok(self.scores.clone())
    }

    fn attention(&self, _tensor: &ImageTensor) -> MedscanResult<Option<SaliencyMap>> {
        Ok(self.attention.clone())
    }
}

/// In-memory backend with call counters and failure injection.
///
/// Stored models are keyed by locator. Fresh builds use the scores set for
/// their architecture, or uniform scores when none were set.
#[derive(Debug, Default)]
pub struct MockBackend {
    stored: DashMap<String, FixedModel>,
    build_scores: DashMap<String, Vec<f32>>,
    attention: bool,
    build_delay: Option<Duration>,
    fail_loads: AtomicBool,
    fail_builds: AtomicBool,
    loads: AtomicUsize,
    builds: AtomicUsize,
    saves: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stored model at `locator`.
    pub fn with_stored(self, locator: &str, scores: Vec<f32>) -> Self {
        let model = if self.attention {
            FixedModel::new(scores).with_attention()
        } else {
            FixedModel::new(scores)
        };
        self.stored.insert(locator.to_string(), model);
        self
    }

    /// Register an arbitrary stored model at `locator`.
    pub fn with_stored_model(self, locator: &str, model: FixedModel) -> Self {
        self.stored.insert(locator.to_string(), model);
        self
    }

    pub fn with_build_scores(self, architecture: &str, scores: Vec<f32>) -> Self {
        self.build_scores.insert(architecture.to_string(), scores);
        self
    }

    /// Models produced after this call expose a saliency map.
    pub fn with_attention(mut self) -> Self {
        self.attention = true;
        self
    }

    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = Some(delay);
        self
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_builds(&self, fail: bool) {
        self.fail_builds.store(fail, Ordering::SeqCst);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn is_stored(&self, locator: &str) -> bool {
        self.stored.contains_key(locator)
    }
}

impl IModelBackend for MockBackend {
    fn load(&self, locator: &str) -> MedscanResult<Option<Box<dyn ILoadedModel>>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PersistenceError::ReadFailed {
                path: locator.to_string(),
                reason: "injected load failure".to_string(),
            }
            .into());
        }
        Ok(self
            .stored
            .get(locator)
            .map(|model| Box::new(model.value().clone()) as Box<dyn ILoadedModel>))
    }

    fn build(&self, architecture: &str, num_classes: usize) -> MedscanResult<Box<dyn ILoadedModel>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.build_delay {
            std::thread::sleep(delay);
        }
        if self.fail_builds.load(Ordering::SeqCst) {
            return Err(PersistenceError::ReadFailed {
                path: architecture.to_string(),
                reason: "injected build failure".to_string(),
            }
            .into());
        }
        let scores = self
            .build_scores
            .get(architecture)
            .map(|s| s.value().clone())
            .unwrap_or_else(|| vec![1.0 / num_classes as f32; num_classes]);
        let model = FixedModel::new(scores);
        Ok(Box::new(if self.attention {
            model.with_attention()
        } else {
            model
        }))
    }

    fn save(&self, model: &dyn ILoadedModel, locator: &str) -> MedscanResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let sample = ImageTensor::zeros(vec![1]);
        let mut stored = FixedModel::new(model.predict(&sample)?);
        stored.attention = model.attention(&sample)?;
        self.stored.insert(locator.to_string(), stored);
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
