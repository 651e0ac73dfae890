//! Classification pipeline: resolve, predict, select, enrich.
//!
//! Errors from resolution, construction, or prediction are returned as-is.
//! Nothing here fabricates a result; see [`crate::response`] for that.

use std::sync::Arc;
use std::time::{Duration, Instant};

use medscan_core::catalog::{self, ConditionLabel};
use medscan_core::config::InferenceConfig;
use medscan_core::constants::FALLBACK_TOP_K;
use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::{Classification, ClassificationMode, ClassificationResult, ImageTensor};
use medscan_core::traits::{IImageCodec, PredictorKind};
use medscan_observability::{classify_span, events};

use crate::binary::BinaryReducer;
use crate::recommendation::{default_treatment, recommend_consultation, recommendation_text};
use crate::registry::ModelRegistry;

/// Parameters of one classification call. Unset thresholds fall back to the
/// pipeline's configuration.
#[derive(Debug, Clone, Default)]
pub struct ClassifyRequest {
    pub category: String,
    pub version: Option<String>,
    pub model_type: Option<String>,
    pub confidence_threshold: Option<f64>,
    pub infection_threshold: Option<f64>,
    pub return_attention: bool,
}

impl ClassifyRequest {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    pub fn confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = Some(threshold);
        self
    }

    pub fn infection_threshold(mut self, threshold: f64) -> Self {
        self.infection_threshold = Some(threshold);
        self
    }

    pub fn with_attention(mut self) -> Self {
        self.return_attention = true;
        self
    }
}

#[derive(Clone)]
pub struct ClassificationPipeline {
    registry: Arc<ModelRegistry>,
    codec: Option<Arc<dyn IImageCodec>>,
    config: InferenceConfig,
}

impl ClassificationPipeline {
    pub fn new(registry: Arc<ModelRegistry>, config: InferenceConfig) -> Self {
        Self {
            registry,
            codec: None,
            config,
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn IImageCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Multiclass classification of an already prepared tensor.
    pub fn classify(
        &self,
        tensor: &ImageTensor,
        request: &ClassifyRequest,
    ) -> MedscanResult<Classification> {
        let started = Instant::now();
        let category = request.category.as_str();
        let _span = classify_span!(category, request.version).entered();

        let labels = catalog::for_category(category).ok_or_else(|| {
            MedscanError::UnsupportedCategory {
                category: category.to_string(),
            }
        })?;
        let version = self.registry.resolve(
            category,
            request.version.as_deref(),
            request.model_type.as_deref(),
        )?;
        let predictor = self.registry.get(category, &version)?;

        let scores = predictor.predict(tensor)?;
        let threshold = request
            .confidence_threshold
            .unwrap_or(self.config.confidence_threshold);
        let results: Vec<ClassificationResult> = select_indices(&scores, threshold)
            .into_iter()
            .filter_map(|i| labels.get(i).map(|label| enrich(label, i, f64::from(scores[i]))))
            .collect();

        let attention = if request.return_attention && predictor.kind() == PredictorKind::Single {
            predictor.attention(tensor)?
        } else {
            None
        };

        events::classification_completed(
            category,
            &version,
            results.len(),
            started.elapsed().as_millis() as u64,
        );
        Ok(Classification {
            results,
            attention,
            category: category.to_string(),
            model_version: version,
            predictor_kind: predictor.kind(),
            mode: ClassificationMode::Multiclass,
        })
    }

    /// Decode raw image bytes with the version's preprocessing profile, then classify.
    pub fn classify_bytes(
        &self,
        bytes: &[u8],
        request: &ClassifyRequest,
    ) -> MedscanResult<Classification> {
        let codec = self.codec.as_ref().ok_or_else(|| MedscanError::InvalidImage {
            reason: "no image codec configured".to_string(),
        })?;
        let version = self.registry.resolve(
            &request.category,
            request.version.as_deref(),
            request.model_type.as_deref(),
        )?;
        let preprocessing = self.registry.preprocessing_for(&request.category, &version)?;
        let tensor = codec.decode(bytes, &preprocessing)?;

        let mut pinned = request.clone();
        pinned.version = Some(version);
        pinned.model_type = None;
        self.classify(&tensor, &pinned)
    }

    /// Classify, then reduce to a single normal / infected result.
    pub fn classify_binary(
        &self,
        tensor: &ImageTensor,
        request: &ClassifyRequest,
    ) -> MedscanResult<Classification> {
        let mut classification = self.classify(tensor, request)?;
        let threshold = request
            .infection_threshold
            .unwrap_or(self.config.infection_threshold);
        classification.results = BinaryReducer::reduce(&classification.results, threshold);
        classification.mode = ClassificationMode::Binary;
        Ok(classification)
    }

    /// Run [`Self::classify`] on the blocking pool, bounded by the configured
    /// construction timeout.
    pub async fn classify_with_deadline(
        &self,
        tensor: ImageTensor,
        request: ClassifyRequest,
    ) -> MedscanResult<Classification> {
        let timeout_ms = self.config.construction_timeout_ms;
        let category = request.category.clone();
        let requested_version = request.version.clone();
        let model_type = request.model_type.clone();
        let pipeline = self.clone();
        let task = tokio::task::spawn_blocking(move || pipeline.classify(&tensor, &request));
        match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => {
                let version = self
                    .registry
                    .resolve(&category, requested_version.as_deref(), model_type.as_deref())
                    .ok()
                    .or(requested_version)
                    .unwrap_or_default();
                Err(MedscanError::ConstructionFailure {
                    category,
                    version,
                    reason: format!("classification task failed: {join}"),
                })
            }
            Err(_) => Err(MedscanError::DeadlineExceeded { timeout_ms }),
        }
    }
}

/// Indices scoring above `threshold`, best first; ties keep catalog order.
/// When none qualify, the top two overall.
pub fn select_indices(scores: &[f32], threshold: f64) -> Vec<usize> {
    let mut selected: Vec<usize> = (0..scores.len())
        .filter(|&i| f64::from(scores[i]) > threshold)
        .collect();
    let fallback = selected.is_empty();
    if fallback {
        selected = (0..scores.len()).collect();
    }
    selected.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    if fallback {
        selected.truncate(FALLBACK_TOP_K);
    }
    selected
}

fn enrich(label: &ConditionLabel, index: usize, confidence: f64) -> ClassificationResult {
    let mut label = label.clone();
    if label.treatment_info.is_none() {
        label.treatment_info = Some(default_treatment(label.is_potentially_serious).to_string());
    }
    ClassificationResult {
        recommendation_text: recommendation_text(&label.name, confidence),
        recommend_consultation: recommend_consultation(label.is_potentially_serious, confidence),
        label,
        confidence,
        catalog_index: Some(index),
    }
}
