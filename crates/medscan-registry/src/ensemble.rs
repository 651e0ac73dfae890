//! Ensemble construction rules: weight normalization and membership checks.

use chrono::Utc;
use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::{CategoryRegistry, EnsembleRecord, ModelRecord};

fn config_error(category: &str, reason: impl Into<String>) -> MedscanError {
    MedscanError::EnsembleConfig {
        category: category.to_string(),
        reason: reason.into(),
    }
}

/// Resolve the weights to store for `member_count` members.
///
/// Absent weights mean uniform weighting. Supplied weights must match the
/// member count, be finite and non-negative, and have a positive sum; they
/// are divided by that sum.
pub fn normalize_weights(
    category: &str,
    member_count: usize,
    weights: Option<&[f64]>,
) -> MedscanResult<Vec<f64>> {
    if member_count == 0 {
        return Err(config_error(category, "ensemble needs at least one member"));
    }
    let Some(weights) = weights else {
        return Ok(vec![1.0 / member_count as f64; member_count]);
    };
    if weights.len() != member_count {
        return Err(config_error(
            category,
            format!(
                "{} weights supplied for {} members",
                weights.len(),
                member_count
            ),
        ));
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(config_error(
            category,
            format!("weight {bad} is not a non-negative finite number"),
        ));
    }
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Err(config_error(category, "weights sum to zero"));
    }
    Ok(weights.iter().map(|w| w / sum).collect())
}

/// Every member must be an existing Single version of the category, and the
/// ensemble must not list itself.
pub fn check_members(
    category: &str,
    registry: &CategoryRegistry,
    ensemble_id: &str,
    members: &[String],
) -> MedscanResult<()> {
    for member in members {
        if member == ensemble_id {
            return Err(config_error(
                category,
                format!("ensemble {ensemble_id} cannot include itself"),
            ));
        }
        match registry.get(member) {
            Some(ModelRecord::Single(_)) => {}
            Some(ModelRecord::Ensemble(_)) => {
                return Err(config_error(
                    category,
                    format!("member {member} is itself an ensemble"),
                ));
            }
            None => {
                return Err(config_error(
                    category,
                    format!("member {member} is not registered"),
                ));
            }
        }
    }
    Ok(())
}

/// Validate and assemble an ensemble record ready to be stored.
pub fn build_record(
    category: &str,
    registry: &CategoryRegistry,
    ensemble_id: &str,
    members: &[String],
    weights: Option<&[f64]>,
) -> MedscanResult<EnsembleRecord> {
    let weights = normalize_weights(category, members.len(), weights)?;
    check_members(category, registry, ensemble_id, members)?;
    Ok(EnsembleRecord {
        members: members.to_vec(),
        weights,
        created_at: Utc::now(),
    })
}
