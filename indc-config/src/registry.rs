//! Tag-driven construction of indicators from external descriptors.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indc_indicators::{Indicator, IndicatorError};
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{debug, warn};

use crate::builtin;
use crate::error::{ConfigError, ConfigResult};

static INDICATOR_REGISTRY: Lazy<IndicatorRegistry> = Lazy::new(IndicatorRegistry::with_builtins);

/// Returns a handle to the global registry, pre-populated with the built-in indicators.
pub fn indicator_registry() -> &'static IndicatorRegistry {
    &INDICATOR_REGISTRY
}

/// Registers an indicator factory with the global registry.
pub fn register_indicator_factory(factory: Arc<dyn IndicatorFactory>) {
    indicator_registry().register(factory);
}

/// Decodes a JSON descriptor (`{"name": "sma", "length": 20}`) using the global registry.
pub fn load_indicator(descriptor: &Value) -> ConfigResult<Box<dyn Indicator>> {
    indicator_registry().decode(descriptor)
}

/// Decodes a TOML descriptor using the global registry.
pub fn load_indicator_toml(descriptor: &toml::Value) -> ConfigResult<Box<dyn Indicator>> {
    let json = serde_json::to_value(descriptor)
        .map_err(|err| ConfigError::malformed("toml", err))?;
    load_indicator(&json)
}

/// Returns the names registered in the global registry, sorted.
pub fn builtin_indicator_names() -> Vec<&'static str> {
    indicator_registry().names()
}

/// Factory contract used to construct indicators from descriptors.
pub trait IndicatorFactory: Send + Sync {
    /// Canonical tag for the indicator (e.g. "sma").
    fn canonical_name(&self) -> &'static str;

    /// Additional tags that should resolve to the same indicator.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Builds an indicator from its descriptor.
    ///
    /// Composite factories decode embedded descriptors through `registry`.
    fn build(&self, params: &Value, registry: &IndicatorRegistry)
        -> ConfigResult<Box<dyn Indicator>>;
}

#[derive(Default)]
struct Tables {
    /// Factories keyed by canonical name; iteration order is the listing order.
    factories: BTreeMap<&'static str, Arc<dyn IndicatorFactory>>,
    /// Every lookup key (canonical names and aliases), lowercased.
    tags: HashMap<String, Arc<dyn IndicatorFactory>>,
}

/// Thread-safe mapping from descriptor tags to indicator factories.
#[derive(Default)]
pub struct IndicatorRegistry {
    tables: RwLock<Tables>,
}

impl IndicatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in indicator.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtin::factories()
            .into_iter()
            .for_each(|factory| registry.register(factory));
        registry
    }

    /// Adds `factory` under its canonical name and aliases.
    ///
    /// A later registration wins: any tag already claimed by another factory
    /// is taken over and the takeover is logged.
    pub fn register(&self, factory: Arc<dyn IndicatorFactory>) {
        let canonical = factory.canonical_name();
        let mut tables = self.write();
        if let Some(previous) = tables.factories.insert(canonical, factory.clone()) {
            tables.tags.retain(|_, owner| !Arc::ptr_eq(owner, &previous));
            warn!(indicator = canonical, "replacing previously registered indicator");
        }
        let tags = std::iter::once(canonical).chain(factory.aliases().iter().copied());
        for tag in tags {
            if let Some(owner) = tables.tags.insert(tag_key(tag), factory.clone()) {
                if !Arc::ptr_eq(&owner, &factory) {
                    warn!(
                        tag,
                        previous = owner.canonical_name(),
                        indicator = canonical,
                        "descriptor tag now resolves to a different indicator"
                    );
                }
            }
        }
    }

    /// Decodes a descriptor by dispatching on its `name` field.
    ///
    /// A missing or unknown tag fails with [`IndicatorError::IndicatorNotSet`].
    pub fn decode(&self, descriptor: &Value) -> ConfigResult<Box<dyn Indicator>> {
        let tag = descriptor
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let factory = self
            .get(tag)
            .ok_or_else(|| IndicatorError::not_set(tag))?;
        debug!(
            indicator = factory.canonical_name(),
            "decoding indicator descriptor"
        );
        factory.build(descriptor, self)
    }

    /// Looks up a factory by canonical name or alias, ignoring case and surrounding blanks.
    pub fn get(&self, tag: &str) -> Option<Arc<dyn IndicatorFactory>> {
        self.read().tags.get(&tag_key(tag)).cloned()
    }

    /// Canonical names of every registered factory, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.read().factories.keys().copied().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn tag_key(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use indc_indicators::indicators::Sma;
    use serde_json::json;

    use super::*;

    struct DoubleSma;

    impl IndicatorFactory for DoubleSma {
        fn canonical_name(&self) -> &'static str {
            "double_sma"
        }

        fn aliases(&self) -> &'static [&'static str] {
            &["dsma"]
        }

        fn build(
            &self,
            params: &Value,
            _registry: &IndicatorRegistry,
        ) -> ConfigResult<Box<dyn Indicator>> {
            let length = params.get("length").and_then(Value::as_u64).unwrap_or(0) as usize;
            Ok(Box::new(Sma::new(length * 2)))
        }
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = IndicatorRegistry::new();
        let err = registry.decode(&json!({"name": "sma", "length": 3})).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Indicator(IndicatorError::IndicatorNotSet { .. })
        ));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn custom_factories_resolve_by_alias() {
        let registry = IndicatorRegistry::new();
        registry.register(Arc::new(DoubleSma));
        let indicator = registry
            .decode(&json!({"name": " DSMA ", "length": 4}))
            .unwrap();
        assert_eq!(indicator.count(), 8);
        assert_eq!(registry.names(), vec!["double_sma"]);
    }

    #[test]
    fn later_registration_takes_over_tags() {
        struct PlainSma;

        impl IndicatorFactory for PlainSma {
            fn canonical_name(&self) -> &'static str {
                "plain_sma"
            }

            fn aliases(&self) -> &'static [&'static str] {
                &["dsma"]
            }

            fn build(
                &self,
                params: &Value,
                _registry: &IndicatorRegistry,
            ) -> ConfigResult<Box<dyn Indicator>> {
                let length = params.get("length").and_then(Value::as_u64).unwrap_or(0) as usize;
                Ok(Box::new(Sma::new(length)))
            }
        }

        let registry = IndicatorRegistry::new();
        registry.register(Arc::new(DoubleSma));
        registry.register(Arc::new(PlainSma));
        let indicator = registry.decode(&json!({"name": "dsma", "length": 4})).unwrap();
        assert_eq!(indicator.count(), 4);
        assert_eq!(registry.names(), vec!["double_sma", "plain_sma"]);

        registry.register(Arc::new(DoubleSma));
        assert!(registry.get("dsma").is_some());
        let indicator = registry.decode(&json!({"name": "dsma", "length": 4})).unwrap();
        assert_eq!(indicator.count(), 8);
    }

    #[test]
    fn builtins_are_listed_sorted() {
        let registry = IndicatorRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec![
                "aroon", "cci", "dema", "ema", "hma", "macd", "roc", "rsi", "sma", "stoch", "wma"
            ]
        );
        assert!(registry.get("stochastic").is_some());
    }

    #[test]
    fn missing_name_is_not_set() {
        let err = indicator_registry()
            .decode(&json!({"length": 3}))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Indicator(IndicatorError::IndicatorNotSet { .. })
        ));
    }
}
