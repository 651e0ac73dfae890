//! Span definitions per operation: classification, registry mutation, predictor construction.

/// Create a classification span.
#[macro_export]
macro_rules! classify_span {
    ($category:expr, $version:expr) => {
        tracing::info_span!("medscan.classify", category = %$category, version = ?$version)
    };
}

/// Create a registry mutation span.
#[macro_export]
macro_rules! registry_span {
    ($operation:expr, $category:expr) => {
        tracing::info_span!("medscan.registry", operation = %$operation, category = %$category)
    };
}

/// Create a predictor construction span.
#[macro_export]
macro_rules! construction_span {
    ($category:expr, $version:expr) => {
        tracing::info_span!("medscan.construction", category = %$category, version = %$version)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CLASSIFY: &str = "medscan.classify";
    pub const REGISTRY: &str = "medscan.registry";
    pub const CONSTRUCTION: &str = "medscan.construction";
}
