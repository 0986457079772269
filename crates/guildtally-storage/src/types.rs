//! Partial-update payloads for the counter store.

use guildtally_core::{ChannelId, CounterRecord, EnabledFlags, KindMap};

/// Field-wise partial update for a stored counter record.
///
/// `None` fields are left untouched by the backend. Reconciliation sends
/// channel ids and name templates in one update; the toggle command sends
/// only the enabled flags.
#[derive(Debug, Clone, Default)]
pub struct CounterUpdate {
    pub enabled: Option<EnabledFlags>,
    pub channels: Option<KindMap<Option<ChannelId>>>,
    pub names: Option<KindMap<String>>,
    pub locale: Option<String>,
}

impl CounterUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: EnabledFlags) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_channels(mut self, channels: KindMap<Option<ChannelId>>) -> Self {
        self.channels = Some(channels);
        self
    }

    #[must_use]
    pub fn with_names(mut self, names: KindMap<String>) -> Self {
        self.names = Some(names);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.channels.is_none()
            && self.names.is_none()
            && self.locale.is_none()
    }

    /// Applies this update to a record in place.
    ///
    /// Document-style backends load, apply, and rewrite; the relational
    /// backend translates the set fields into an UPDATE statement instead.
    pub fn apply(&self, record: &mut CounterRecord) {
        if let Some(enabled) = self.enabled {
            record.enabled = enabled;
        }
        if let Some(channels) = &self.channels {
            record.channels = channels.clone();
        }
        if let Some(names) = &self.names {
            record.names = names.clone();
        }
        if let Some(locale) = &self.locale {
            record.locale = locale.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildtally_core::{ChannelKind, CounterKind, GuildId};

    fn record() -> CounterRecord {
        CounterRecord {
            guild_id: GuildId::new("g1"),
            enabled: EnabledFlags::default(),
            channels: KindMap::default(),
            names: KindMap {
                all: "All: {count}".to_string(),
                bots: "Bots: {count}".to_string(),
                humans: "Humans: {count}".to_string(),
            },
            category_id: ChannelId::new("cat-1"),
            locale: "en".to_string(),
            channel_kind: ChannelKind::Voice,
        }
    }

    #[test]
    fn test_empty_update() {
        assert!(CounterUpdate::new().is_empty());
        assert!(!CounterUpdate::new().with_locale("de").is_empty());
    }

    #[test]
    fn test_apply_is_field_wise() {
        let mut record = record();
        let mut flags = EnabledFlags::default();
        flags.set(CounterKind::Bots, false);

        CounterUpdate::new().with_enabled(flags).apply(&mut record);

        assert!(!record.enabled.bots);
        // Untouched fields keep their values.
        assert_eq!(record.locale, "en");
        assert_eq!(record.name(CounterKind::All), "All: {count}");
    }
}
