//! Row codec between `counters` table columns and the counter record.
//!
//! The compact enabled-flag string and the lowercase channel-kind token are
//! storage details; decoding back into the record happens only here.

use guildtally_core::{ChannelId, ChannelKind, CounterRecord, EnabledFlags, GuildId, KindMap};
use guildtally_storage::StorageError;

/// One `counters` row in column order.
#[derive(Debug, Clone)]
pub(crate) struct CounterRow {
    pub guild_id: String,
    pub enabled: String,
    pub all_channel: Option<String>,
    pub bots_channel: Option<String>,
    pub humans_channel: Option<String>,
    pub category: String,
    pub all_name: String,
    pub bots_name: String,
    pub humans_name: String,
    pub locale: String,
    pub channel_kind: String,
}

impl CounterRow {
    pub(crate) fn from_record(record: &CounterRecord) -> Self {
        let channel = |id: &Option<ChannelId>| id.as_ref().map(|c| c.as_str().to_string());
        Self {
            guild_id: record.guild_id.as_str().to_string(),
            enabled: record.enabled.encode(),
            all_channel: channel(&record.channels.all),
            bots_channel: channel(&record.channels.bots),
            humans_channel: channel(&record.channels.humans),
            category: record.category_id.as_str().to_string(),
            all_name: record.names.all.clone(),
            bots_name: record.names.bots.clone(),
            humans_name: record.names.humans.clone(),
            locale: record.locale.clone(),
            channel_kind: record.channel_kind.as_str().to_string(),
        }
    }

    /// Decodes the row back into a record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the stored flag string or
    /// channel-kind token is malformed.
    pub(crate) fn into_record(self) -> Result<CounterRecord, StorageError> {
        let enabled = EnabledFlags::decode(&self.enabled)
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        let channel_kind = ChannelKind::parse(&self.channel_kind)
            .map_err(|e| StorageError::serialization(e.to_string()))?;

        Ok(CounterRecord {
            guild_id: GuildId::new(self.guild_id),
            enabled,
            channels: KindMap {
                all: self.all_channel.map(ChannelId::new),
                bots: self.bots_channel.map(ChannelId::new),
                humans: self.humans_channel.map(ChannelId::new),
            },
            names: KindMap {
                all: self.all_name,
                bots: self.bots_name,
                humans: self.humans_name,
            },
            category_id: ChannelId::new(self.category),
            locale: self.locale,
            channel_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildtally_core::CounterKind;

    fn record() -> CounterRecord {
        CounterRecord {
            guild_id: GuildId::new("g1"),
            enabled: EnabledFlags {
                all: true,
                bots: false,
                humans: true,
            },
            channels: KindMap {
                all: Some(ChannelId::new("chan-1")),
                bots: None,
                humans: Some(ChannelId::new("chan-2")),
            },
            names: KindMap {
                all: "All: {count}".to_string(),
                bots: "Bots: {count}".to_string(),
                humans: "Humans: {count}".to_string(),
            },
            category_id: ChannelId::new("cat-1"),
            locale: "fr".to_string(),
            channel_kind: ChannelKind::Stage,
        }
    }

    #[test]
    fn test_row_round_trip() {
        let record = record();
        let row = CounterRow::from_record(&record);
        assert_eq!(row.enabled, "tft");
        assert_eq!(row.bots_channel, None);
        assert_eq!(row.channel_kind, "stage");

        let back = row.into_record().expect("decode should succeed");
        assert_eq!(back, record);
    }

    #[test]
    fn test_decode_rejects_bad_flags() {
        let mut row = CounterRow::from_record(&record());
        row.enabled = "ttx".to_string();

        let err = row.into_record().unwrap_err();
        assert!(matches!(err, StorageError::Serialization { .. }));
    }

    #[test]
    fn test_decode_rejects_bad_channel_kind() {
        let mut row = CounterRow::from_record(&record());
        row.channel_kind = "forum".to_string();

        let err = row.into_record().unwrap_err();
        assert!(matches!(err, StorageError::Serialization { .. }));
    }

    #[test]
    fn test_absent_channels_stay_absent() {
        let mut base = record();
        base.channels = KindMap::default();

        let back = CounterRow::from_record(&base).into_record().unwrap();
        assert!(back.channel(CounterKind::All).is_none());
        assert!(back.channel(CounterKind::Bots).is_none());
        assert!(back.channel(CounterKind::Humans).is_none());
    }
}
