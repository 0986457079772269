//! The per-guild counter record.

use serde::{Deserialize, Serialize};

use crate::flags::EnabledFlags;
use crate::id::{ChannelId, GuildId};
use crate::kind::{ChannelKind, CounterKind, KindMap};

/// Counter configuration and platform state for one guild.
///
/// Exactly one record exists per guild. The persistence backends store these
/// fields verbatim; the engine cache holds the same shape and is the in-process
/// source of truth between startups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Opaque platform guild id; immutable primary key.
    pub guild_id: GuildId,
    /// Enabled state per counter kind.
    pub enabled: EnabledFlags,
    /// Channel backing each kind, if one has ever been created.
    pub channels: KindMap<Option<ChannelId>>,
    /// Per-kind display-name template containing the `{count}` token.
    pub names: KindMap<String>,
    /// Category channel the counters are grouped under.
    pub category_id: ChannelId,
    /// Two-letter locale tag used for digit grouping.
    pub locale: String,
    /// Platform channel type used for this guild's counters.
    pub channel_kind: ChannelKind,
}

impl CounterRecord {
    /// Channel currently backing `kind`, if any.
    #[must_use]
    pub fn channel(&self, kind: CounterKind) -> Option<&ChannelId> {
        self.channels.get(kind).as_ref()
    }

    pub fn set_channel(&mut self, kind: CounterKind, channel_id: ChannelId) {
        self.channels.set(kind, Some(channel_id));
    }

    /// Display-name template for `kind`.
    #[must_use]
    pub fn name(&self, kind: CounterKind) -> &str {
        self.names.get(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_channel_accessors() {
        let mut record = record();
        assert!(record.channel(CounterKind::All).is_none());

        record.set_channel(CounterKind::All, ChannelId::new("chan-1"));
        assert_eq!(
            record.channel(CounterKind::All).map(ChannelId::as_str),
            Some("chan-1")
        );
        assert!(record.channel(CounterKind::Bots).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let record = record();
        let json = serde_json::to_string(&record).unwrap();
        let back: CounterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
