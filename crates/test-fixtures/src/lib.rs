//! Test support for the medscan workspace: registry JSON fixtures, an
//! in-memory model backend, and a trivial image codec.

mod backend;
mod codec;

pub use backend::{FixedModel, MockBackend};
pub use codec::FlatCodec;

use medscan_core::models::RegistryDocument;
use std::path::{Path, PathBuf};

/// Root directory of the fixture files, inside this crate.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Parse `registry/<name>` into the document a store would hold after load.
///
/// # Panics
/// Panics if the fixture is missing or is not a registry document.
pub fn load_registry_fixture(name: &str) -> RegistryDocument {
    let path = fixture_path(&format!("registry/{name}"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("registry fixture {} unreadable: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("registry fixture {} malformed: {e}", path.display()))
}

/// Copy `registry/<name>` into `dir` as `model_registry.json` and return its path.
///
/// # Panics
/// Panics if the fixture is missing or the copy fails.
pub fn install_registry_fixture(name: &str, dir: &Path) -> PathBuf {
    let source = fixture_path(&format!("registry/{name}"));
    let target = dir.join("model_registry.json");
    std::fs::copy(&source, &target)
        .unwrap_or_else(|e| panic!("Failed to copy fixture {}: {}", source.display(), e));
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_fixtures_exist() {
        for name in ["throat_ensemble.json", "nested_ensemble.json", "dangling_default.json"] {
            assert!(fixture_path(&format!("registry/{name}")).exists(), "{name}");
        }
    }

    #[test]
    fn throat_fixture_parses_as_registry() {
        let doc = load_registry_fixture("throat_ensemble.json");
        let throat = doc.category("throat").unwrap();
        assert_eq!(throat.default_version, "v2");
        assert!(throat.get("ensemble").unwrap().is_ensemble());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn nested_fixture_parses_but_fails_validation() {
        let doc = load_registry_fixture("nested_ensemble.json");
        assert!(doc.validate().is_err());
    }
}
