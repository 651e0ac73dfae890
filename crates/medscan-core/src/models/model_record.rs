use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ENSEMBLE_ARCHITECTURE, STANDARD_PREPROCESSING};

/// A model backed by a single stored artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRecord {
    pub architecture: String,
    /// Opaque storage locator, handed to the backend unchanged.
    pub path: String,
    pub preprocessing: String,
    pub created_at: DateTime<Utc>,
}

/// A weighted combination of Single versions of the same category.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleRecord {
    pub members: Vec<String>,
    /// Same length as `members`, normalized to sum to 1.0.
    pub weights: Vec<f64>,
    pub created_at: DateTime<Utc>,
}

/// A registered model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordDocument", into = "RecordDocument")]
pub enum ModelRecord {
    Single(SingleRecord),
    Ensemble(EnsembleRecord),
}

impl ModelRecord {
    pub fn single(
        architecture: impl Into<String>,
        path: impl Into<String>,
        preprocessing: impl Into<String>,
    ) -> Self {
        Self::Single(SingleRecord {
            architecture: architecture.into(),
            path: path.into(),
            preprocessing: preprocessing.into(),
            created_at: Utc::now(),
        })
    }

    pub fn is_ensemble(&self) -> bool {
        matches!(self, Self::Ensemble(_))
    }

    pub fn architecture(&self) -> &str {
        match self {
            Self::Single(s) => &s.architecture,
            Self::Ensemble(_) => ENSEMBLE_ARCHITECTURE,
        }
    }

    /// Preprocessing profile the input tensor should be prepared with.
    pub fn preprocessing(&self) -> &str {
        match self {
            Self::Single(s) => &s.preprocessing,
            Self::Ensemble(_) => STANDARD_PREPROCESSING,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Single(s) => s.created_at,
            Self::Ensemble(e) => e.created_at,
        }
    }
}

/// On-disk shape of a record. Ensembles are told apart by their architecture tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDocument {
    architecture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preprocessing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    members: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<f64>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecordDocument> for ModelRecord {
    type Error = String;

    fn try_from(doc: RecordDocument) -> Result<Self, Self::Error> {
        if doc.architecture == ENSEMBLE_ARCHITECTURE {
            let members = doc.members.ok_or("ensemble record without members")?;
            let weights = doc.weights.ok_or("ensemble record without weights")?;
            if members.len() != weights.len() {
                return Err(format!(
                    "ensemble record has {} members but {} weights",
                    members.len(),
                    weights.len()
                ));
            }
            Ok(Self::Ensemble(EnsembleRecord {
                members,
                weights,
                created_at: doc.created_at,
            }))
        } else {
            let path = doc
                .path
                .ok_or_else(|| format!("{} record without path", doc.architecture))?;
            Ok(Self::Single(SingleRecord {
                architecture: doc.architecture,
                path,
                preprocessing: doc
                    .preprocessing
                    .unwrap_or_else(|| STANDARD_PREPROCESSING.to_string()),
                created_at: doc.created_at,
            }))
        }
    }
}

impl From<ModelRecord> for RecordDocument {
    fn from(record: ModelRecord) -> Self {
        match record {
            ModelRecord::Single(s) => Self {
                architecture: s.architecture,
                path: Some(s.path),
                preprocessing: Some(s.preprocessing),
                members: None,
                weights: None,
                created_at: s.created_at,
            },
            ModelRecord::Ensemble(e) => Self {
                architecture: ENSEMBLE_ARCHITECTURE.to_string(),
                path: None,
                preprocessing: None,
                members: Some(e.members),
                weights: Some(e.weights),
                created_at: e.created_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_serializes_with_path() {
        let record = ModelRecord::single("resnet50", "throat_model_resnet50_v1", "standard");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["architecture"], "resnet50");
        assert_eq!(json["path"], "throat_model_resnet50_v1");
        assert!(json.get("members").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn ensemble_dispatches_on_architecture() {
        let json = r#"{
            "architecture": "ensemble",
            "members": ["v1", "v2"],
            "weights": [0.5, 0.5],
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let record: ModelRecord = serde_json::from_str(json).unwrap();
        match record {
            ModelRecord::Ensemble(e) => assert_eq!(e.members, vec!["v1", "v2"]),
            other => panic!("expected ensemble, got {other:?}"),
        }
    }

    #[test]
    fn ensemble_without_weights_is_rejected() {
        let json = r#"{"architecture":"ensemble","members":["v1"],"createdAt":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<ModelRecord>(json).is_err());
    }

    #[test]
    fn missing_preprocessing_defaults_to_standard() {
        let json = r#"{"architecture":"densenet","path":"p","createdAt":"2024-01-01T00:00:00Z"}"#;
        let record: ModelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.preprocessing(), "standard");
    }
}
