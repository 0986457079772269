//! Instance configuration and per-call option resolution.
//!
//! Resolution is field by field: explicit per-call override → instance
//! default → hard-coded default. Order and locale overrides pass the same
//! validation wherever they are supplied.

use guildtally_core::{ChannelId, ChannelKind, CounterKind, EnabledFlags, KindMap};
use guildtally_platform::JoinPolicy;
use serde::{Deserialize, Serialize};

/// Hard-coded fallback locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Instance-level defaults for counter creation and reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Channel type used for created counters.
    #[serde(default)]
    pub channel_kind: ChannelKind,
    /// Join/visibility policy applied to created counters.
    #[serde(default)]
    pub join_policy: JoinPolicy,
    /// Per-kind display-name templates; `{count}` is the substitution token.
    #[serde(default = "default_names")]
    pub names: KindMap<String>,
    /// Name of the category the counters are grouped under.
    #[serde(default = "default_category_name")]
    pub category_name: String,
    /// Creation order of the counter channels.
    #[serde(default = "default_order")]
    pub order: [CounterKind; 3],
    /// Per-kind enabled defaults.
    #[serde(default)]
    pub enabled: EnabledFlags,
    /// Locale tag used for digit grouping.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_names() -> KindMap<String> {
    KindMap {
        all: "All: {count}".to_string(),
        bots: "Bots: {count}".to_string(),
        humans: "Humans: {count}".to_string(),
    }
}

fn default_category_name() -> String {
    "\u{1f4ca} Stats".to_string()
}

fn default_order() -> [CounterKind; 3] {
    CounterKind::ALL
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            channel_kind: ChannelKind::default(),
            join_policy: JoinPolicy::default(),
            names: default_names(),
            category_name: default_category_name(),
            order: default_order(),
            enabled: EnabledFlags::default(),
            locale: default_locale(),
        }
    }
}

impl CounterConfig {
    /// Normalizes a constructed config: the order and locale fields pass the
    /// same validation as per-call overrides.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.order = valid_order(Some(&self.order));
        self.locale = valid_locale(Some(&self.locale), DEFAULT_LOCALE);
        self
    }
}

/// Per-call overrides for counter creation.
#[derive(Debug, Clone, Default)]
pub struct CreateCounterOptions {
    /// Per-kind name template overrides.
    pub names: KindMap<Option<String>>,
    /// Category name override, used only when a category is created.
    pub category_name: Option<String>,
    /// Pre-existing category channel to group the counters under.
    pub category_id: Option<ChannelId>,
    /// Per-kind enabled overrides.
    pub enabled: KindMap<Option<bool>>,
    /// Channel type override.
    pub channel_kind: Option<ChannelKind>,
    /// Creation order override; invalid shapes fall back to the default.
    pub order: Option<Vec<CounterKind>>,
    /// Locale override; anything longer than two characters falls back.
    pub locale: Option<String>,
    /// Join policy override.
    pub join_policy: Option<JoinPolicy>,
}

impl CreateCounterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, kind: CounterKind, template: impl Into<String>) -> Self {
        self.names.set(kind, Some(template.into()));
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, kind: CounterKind, state: bool) -> Self {
        self.enabled.set(kind, Some(state));
        self
    }

    #[must_use]
    pub fn with_category_id(mut self, category_id: ChannelId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: Vec<CounterKind>) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_channel_kind(mut self, kind: ChannelKind) -> Self {
        self.channel_kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_join_policy(mut self, policy: JoinPolicy) -> Self {
        self.join_policy = Some(policy);
        self
    }
}

/// Fully resolved creation parameters.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedCreate {
    pub names: KindMap<String>,
    pub category_name: String,
    pub category_id: Option<ChannelId>,
    pub enabled: EnabledFlags,
    pub channel_kind: ChannelKind,
    pub order: [CounterKind; 3],
    pub locale: String,
    pub join_policy: JoinPolicy,
}

impl CounterConfig {
    pub(crate) fn resolve(&self, options: CreateCounterOptions) -> ResolvedCreate {
        let mut names = self.names.clone();
        let mut enabled = self.enabled;
        for kind in CounterKind::ALL {
            if let Some(name) = options.names.get(kind) {
                names.set(kind, name.clone());
            }
            if let Some(state) = options.enabled.get(kind) {
                enabled.set(kind, *state);
            }
        }

        ResolvedCreate {
            names,
            category_name: options
                .category_name
                .unwrap_or_else(|| self.category_name.clone()),
            category_id: options.category_id,
            enabled,
            channel_kind: options.channel_kind.unwrap_or(self.channel_kind),
            order: valid_order(options.order.as_deref()),
            locale: valid_locale(options.locale.as_deref(), &self.locale),
            join_policy: options.join_policy.unwrap_or(self.join_policy),
        }
    }
}

/// Returns `candidate` when it is a permutation containing each counter kind
/// exactly once; any other shape (wrong length, duplicate kind, missing
/// kind, or no candidate at all) yields the canonical order.
#[must_use]
pub fn valid_order(candidate: Option<&[CounterKind]>) -> [CounterKind; 3] {
    let Some(order) = candidate else {
        return CounterKind::ALL;
    };
    if order.len() != 3 {
        return CounterKind::ALL;
    }
    for kind in CounterKind::ALL {
        if order.iter().filter(|candidate| **candidate == kind).count() != 1 {
            return CounterKind::ALL;
        }
    }
    [order[0], order[1], order[2]]
}

/// Returns `candidate` unless it is absent or longer than two characters, in
/// which case `fallback` is used. No whitelist check is performed.
#[must_use]
pub fn valid_locale(candidate: Option<&str>, fallback: &str) -> String {
    match candidate {
        Some(locale) if locale.chars().count() <= 2 => locale.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CounterKind::{All, Bots, Humans};

    #[test]
    fn test_valid_order_accepts_permutations() {
        assert_eq!(valid_order(Some(&[Bots, All, Humans])), [Bots, All, Humans]);
        assert_eq!(valid_order(Some(&[Humans, Bots, All])), [Humans, Bots, All]);
        assert_eq!(valid_order(Some(&[All, Bots, Humans])), [All, Bots, Humans]);
    }

    #[test]
    fn test_valid_order_rejects_bad_shapes() {
        assert_eq!(valid_order(None), CounterKind::ALL);
        assert_eq!(valid_order(Some(&[])), CounterKind::ALL);
        assert_eq!(valid_order(Some(&[All, Bots])), CounterKind::ALL);
        assert_eq!(valid_order(Some(&[All, All, Bots])), CounterKind::ALL);
        assert_eq!(valid_order(Some(&[All, Bots, Humans, All])), CounterKind::ALL);
    }

    #[test]
    fn test_valid_locale() {
        assert_eq!(valid_locale(Some("de"), "en"), "de");
        assert_eq!(valid_locale(Some("f"), "en"), "f");
        assert_eq!(valid_locale(Some("fr-FR"), "en"), "en");
        assert_eq!(valid_locale(None, "en"), "en");
    }

    #[test]
    fn test_resolve_merges_field_wise() {
        let config = CounterConfig::default();
        let options = CreateCounterOptions::new()
            .with_enabled(Bots, false)
            .with_name(All, "Members: {count}")
            .with_order(vec![Humans, All, Bots])
            .with_locale("this-is-not-a-locale");

        let resolved = config.resolve(options);

        assert!(!resolved.enabled.bots);
        assert!(resolved.enabled.all);
        assert_eq!(resolved.names.all, "Members: {count}");
        assert_eq!(resolved.names.humans, "Humans: {count}");
        assert_eq!(resolved.order, [Humans, All, Bots]);
        assert_eq!(resolved.locale, "en");
    }

    #[test]
    fn test_normalized_fixes_constructed_config() {
        let config = CounterConfig {
            order: [All, All, Bots],
            locale: "en-US".to_string(),
            ..CounterConfig::default()
        }
        .normalized();

        assert_eq!(config.order, CounterKind::ALL);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CounterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.names.all, "All: {count}");
        assert_eq!(config.order, CounterKind::ALL);
        assert!(config.enabled.humans);
    }
}
