//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a registry mutation (register, set-default, create-ensemble).
pub fn registry_mutated(operation: &str, category: &str, version: &str) {
    tracing::info!(
        event = "registry_mutated",
        operation = %operation,
        category = %category,
        version = %version,
        "registry mutated"
    );
}

/// Log a fresh default registry being written.
pub fn registry_bootstrapped(path: &str, reason: &str) {
    tracing::warn!(
        event = "registry_bootstrapped",
        path = %path,
        reason = %reason,
        "default registry synthesized"
    );
}

/// Log predictor cache invalidation for a category.
pub fn cache_invalidated(category: &str, dropped: usize) {
    tracing::info!(
        event = "cache_invalidated",
        category = %category,
        dropped = dropped,
        "predictor cache invalidated"
    );
}

/// Log a predictor construction.
pub fn predictor_constructed(category: &str, version: &str, kind: &str, elapsed_ms: u64) {
    tracing::info!(
        event = "predictor_constructed",
        category = %category,
        version = %version,
        kind = %kind,
        elapsed_ms = elapsed_ms,
        "predictor constructed"
    );
}

/// Log a predictor served from the cache.
pub fn predictor_cache_hit(category: &str, version: &str) {
    tracing::debug!(
        event = "predictor_cache_hit",
        category = %category,
        version = %version,
        "predictor cache hit"
    );
}

/// Log a freshly built model being written back to storage.
pub fn model_materialized(category: &str, architecture: &str, locator: &str) {
    tracing::info!(
        event = "model_materialized",
        category = %category,
        architecture = %architecture,
        locator = %locator,
        "fresh model written through to storage"
    );
}

/// Log a classification outcome.
pub fn classification_completed(category: &str, version: &str, results: usize, elapsed_ms: u64) {
    tracing::debug!(
        event = "classification_completed",
        category = %category,
        version = %version,
        results = results,
        elapsed_ms = elapsed_ms,
        "classification completed"
    );
}

/// Log a failure surfaced to the boundary layer.
pub fn boundary_fallback(category: &str, error_kind: &str, error: &str) {
    tracing::warn!(
        event = "boundary_fallback",
        category = %category,
        error_kind = %error_kind,
        error = %error,
        "returning fallback document"
    );
}
