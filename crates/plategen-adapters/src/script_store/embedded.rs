//! Scripts compiled into the binary.

use std::sync::Arc;

use plategen_core::{application::ApplicationError, application::ports::ScriptStore, error::PlateResult};

static BUNDLED: &[(&str, &str)] = &[
    ("dubai_new.scad", include_str!("../../scripts/dubai_new.scad")),
    ("dubai_new_sm.scad", include_str!("../../scripts/dubai_new_sm.scad")),
    ("dubai_old.scad", include_str!("../../scripts/dubai_old.scad")),
    ("sharjah_old.scad", include_str!("../../scripts/sharjah_old.scad")),
];

/// The scripts shipped with Plategen.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedScriptStore;

impl EmbeddedScriptStore {
    pub fn new() -> Self {
        Self
    }

    /// Bundled script names and sources, for `plategen init`.
    pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
        BUNDLED.iter().copied()
    }

    fn find(reference: &str) -> Option<&'static str> {
        BUNDLED
            .iter()
            .find(|(name, _)| *name == reference)
            .map(|(_, source)| *source)
    }
}

impl ScriptStore for EmbeddedScriptStore {
    fn load(&self, reference: &str) -> PlateResult<Arc<str>> {
        Self::find(reference).map(Arc::from).ok_or_else(|| {
            ApplicationError::ScriptLoadFailed {
                reference: reference.to_string(),
                reason: "not bundled".into(),
            }
            .into()
        })
    }

    fn contains(&self, reference: &str) -> bool {
        Self::find(reference).is_some()
    }
}

#[cfg(test)]
mod tests {
    use plategen_core::domain::{Placeholder, TEMPLATE_REGISTRY};

    use super::*;

    #[test]
    fn every_template_is_bundled() {
        let store = EmbeddedScriptStore::new();
        for config in TEMPLATE_REGISTRY {
            assert!(store.contains(config.source_script), "{}", config.source_script);
        }
    }

    #[test]
    fn bundled_scripts_use_every_placeholder() {
        for (name, source) in EmbeddedScriptStore::entries() {
            for placeholder in Placeholder::ALL {
                assert!(
                    source.contains(placeholder.token()),
                    "{name} is missing {placeholder}"
                );
            }
        }
    }

    #[test]
    fn unknown_reference_fails() {
        assert!(EmbeddedScriptStore::new().load("monaco.scad").is_err());
    }
}
