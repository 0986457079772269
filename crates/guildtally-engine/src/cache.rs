//! In-process cache of counter records.

use std::collections::HashMap;

use guildtally_core::{CounterRecord, GuildId};
use tokio::sync::RwLock;

/// The authoritative in-process view of counter records.
///
/// Filled once at startup from the persistence backend; every successful
/// command or reconcile pass writes through here before (or concurrently
/// with) the corresponding store write.
#[derive(Debug, Default)]
pub(crate) struct CounterCache {
    records: RwLock<HashMap<GuildId, CounterRecord>>,
}

impl CounterCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the cache contents with the given records.
    pub(crate) async fn fill(&self, records: Vec<CounterRecord>) {
        let mut map = self.records.write().await;
        map.clear();
        for record in records {
            map.insert(record.guild_id.clone(), record);
        }
    }

    pub(crate) async fn get(&self, guild_id: &GuildId) -> Option<CounterRecord> {
        self.records.read().await.get(guild_id).cloned()
    }

    pub(crate) async fn contains(&self, guild_id: &GuildId) -> bool {
        self.records.read().await.contains_key(guild_id)
    }

    pub(crate) async fn insert(&self, record: CounterRecord) {
        self.records
            .write()
            .await
            .insert(record.guild_id.clone(), record);
    }

    pub(crate) async fn remove(&self, guild_id: &GuildId) -> Option<CounterRecord> {
        self.records.write().await.remove(guild_id)
    }

    /// Read-only snapshot of every cached record.
    pub(crate) async fn snapshot(&self) -> Vec<CounterRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildtally_core::{ChannelId, ChannelKind, EnabledFlags, KindMap};

    fn record(guild_id: &str) -> CounterRecord {
        CounterRecord {
            guild_id: GuildId::new(guild_id),
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

    #[tokio::test]
    async fn test_fill_replaces_contents() {
        let cache = CounterCache::new();
        cache.insert(record("old")).await;

        cache.fill(vec![record("g1"), record("g2")]).await;

        assert!(!cache.contains(&GuildId::new("old")).await);
        assert!(cache.contains(&GuildId::new("g1")).await);
        assert_eq!(cache.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = CounterCache::new();
        assert!(cache.get(&GuildId::new("g1")).await.is_none());

        cache.insert(record("g1")).await;
        assert_eq!(
            cache.get(&GuildId::new("g1")).await.unwrap().guild_id,
            GuildId::new("g1")
        );

        let removed = cache.remove(&GuildId::new("g1")).await;
        assert!(removed.is_some());
        assert!(cache.get(&GuildId::new("g1")).await.is_none());
    }
}
