//! Startup configuration: priority order, pass-through layers, tolerances.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use linecorral_math::Tolerance2D;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CorralError, Result};
use crate::layer::{DraftingLayer, LayerTag};
use crate::priority::PriorityTable;

/// Host-supplied corral configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorralConfig<L> {
    /// Layers in obscuring order, lowest priority first.
    pub priority: Vec<L>,
    /// Layers exempt from occlusion; always re-emitted unchanged.
    #[serde(default = "Vec::new")]
    pub pass_through: Vec<L>,
    /// Geometric tolerances.
    #[serde(default)]
    pub tolerance: Tolerance2D,
}

impl Default for CorralConfig<DraftingLayer> {
    fn default() -> Self {
        Self {
            priority: DraftingLayer::PRIORITY_ORDER.to_vec(),
            pass_through: DraftingLayer::PASS_THROUGH.to_vec(),
            tolerance: Tolerance2D::DEFAULT,
        }
    }
}

impl<L: LayerTag + DeserializeOwned> CorralConfig<L> {
    /// Parse a configuration from TOML text.
    ///
    /// ```toml
    /// priority = ["Hidden", "Beyond", "Cut"]
    /// pass_through = ["Furniture"]
    ///
    /// [tolerance]
    /// linear = 0.05
    /// parallel = 0.999845
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl<L: LayerTag> CorralConfig<L> {
    /// Validate tolerances.
    pub fn validate(&self) -> Result<()> {
        let tol = &self.tolerance;
        if !(tol.linear.is_finite() && tol.linear > 0.0) {
            return Err(CorralError::InvalidConfig(
                "tolerance.linear must be positive".into(),
            ));
        }
        if !(tol.parallel > 0.0 && tol.parallel <= 1.0) {
            return Err(CorralError::InvalidConfig(
                "tolerance.parallel must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }

    /// Validate and build the immutable rules shared by corral instances.
    pub fn build(&self) -> Result<Arc<CorralRules<L>>> {
        self.validate()?;
        Ok(Arc::new(CorralRules {
            priorities: PriorityTable::build(&self.priority)?,
            pass_through: self.pass_through.iter().copied().collect(),
            tolerance: self.tolerance,
        }))
    }
}

/// Immutable rules built once from a [`CorralConfig`].
#[derive(Debug, Clone)]
pub struct CorralRules<L: LayerTag> {
    priorities: PriorityTable<L>,
    pass_through: HashSet<L>,
    tolerance: Tolerance2D,
}

impl<L: LayerTag> CorralRules<L> {
    /// Layer priority table.
    pub fn priorities(&self) -> &PriorityTable<L> {
        &self.priorities
    }

    /// Check whether lines on `layer` bypass occlusion.
    pub fn is_pass_through(&self, layer: L) -> bool {
        self.pass_through.contains(&layer)
    }

    /// Geometric tolerances.
    pub fn tolerance(&self) -> &Tolerance2D {
        &self.tolerance
    }
}

static DRAFTING_RULES: OnceLock<Arc<CorralRules<DraftingLayer>>> = OnceLock::new();

impl DraftingLayer {
    /// Process-wide rules for the built-in drafting layers.
    ///
    /// Built on first use; concurrent first callers block until the single
    /// build finishes and then share the same table.
    pub fn shared_rules() -> Arc<CorralRules<DraftingLayer>> {
        DRAFTING_RULES
            .get_or_init(|| {
                log::debug!("building shared drafting layer priorities");
                CorralConfig::default()
                    .build()
                    .expect("built-in drafting priority order has no duplicates")
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // No `Default` impl: host layer enums rarely have one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Tag {
        Hidden,
        Beyond,
        Cut,
        Furniture,
    }

    #[test]
    fn test_default_config_builds() {
        let rules = CorralConfig::default().build().unwrap();
        assert!(rules.is_pass_through(DraftingLayer::FfeOutline));
        assert!(!rules.is_pass_through(DraftingLayer::CountertopCut));
        assert_eq!(rules.priorities().len(), 20);
        assert_eq!(*rules.tolerance(), Tolerance2D::DEFAULT);
    }

    #[test]
    fn test_from_toml() {
        let config = CorralConfig::<Tag>::from_toml_str(
            r#"
            priority = ["Hidden", "Beyond", "Cut"]
            pass_through = ["Furniture"]

            [tolerance]
            linear = 0.1
            parallel = 0.9999
            "#,
        )
        .unwrap();
        assert_eq!(config.priority, vec![Tag::Hidden, Tag::Beyond, Tag::Cut]);
        assert_eq!(config.pass_through, vec![Tag::Furniture]);
        assert!((config.tolerance.linear - 0.1).abs() < 1e-12);

        let rules = config.build().unwrap();
        assert!(rules.priorities().obscures(Tag::Cut, Tag::Hidden));
        assert!(rules.is_pass_through(Tag::Furniture));
    }

    #[test]
    fn test_toml_defaults() {
        let config = CorralConfig::<Tag>::from_toml_str(r#"priority = ["Beyond", "Cut"]"#).unwrap();
        assert!(config.pass_through.is_empty());
        assert_eq!(config.tolerance, Tolerance2D::DEFAULT);
    }

    #[test]
    fn test_toml_parse_error() {
        let err = CorralConfig::<Tag>::from_toml_str(r#"priority = ["Nope"]"#).unwrap_err();
        assert!(matches!(err, CorralError::ConfigParse(_)));
    }

    #[test]
    fn test_duplicate_priority_is_fatal() {
        let config = CorralConfig {
            priority: vec![Tag::Hidden, Tag::Cut, Tag::Hidden],
            pass_through: Vec::new(),
            tolerance: Tolerance2D::DEFAULT,
        };
        assert!(matches!(
            config.build(),
            Err(CorralError::DuplicateLayer(_))
        ));
    }

    #[test]
    fn test_invalid_tolerance() {
        let mut config = CorralConfig::default();
        config.tolerance.linear = 0.0;
        assert!(matches!(
            config.validate(),
            Err(CorralError::InvalidConfig(_))
        ));

        let mut config = CorralConfig::default();
        config.tolerance.parallel = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shared_rules_built_once_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(DraftingLayer::shared_rules))
            .collect();
        let all: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for rules in &all[1..] {
            assert!(Arc::ptr_eq(&all[0], rules));
        }
        assert!(Arc::ptr_eq(&all[0], &DraftingLayer::shared_rules()));
    }
}
