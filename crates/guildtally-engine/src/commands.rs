//! Guild command handlers.
//!
//! Every command completes its own cache and store write before triggering
//! reconciliation, so a reconcile pass always reads post-mutation state.
//! Store failures after a cache write are logged, not surfaced; the next
//! startup fill reconciles the drift.

use tracing::{debug, warn};

use guildtally_core::{ChannelId, CounterKind, CounterRecord, GuildId, KindMap};
use guildtally_platform::{ChannelSpec, PlatformError};
use guildtally_storage::CounterUpdate;

use crate::config::CreateCounterOptions;
use crate::error::SyncError;
use crate::manager::CounterManager;

impl CounterManager {
    /// Sets up counters for a guild: creates (or adopts) the category,
    /// creates one channel per enabled kind in the resolved order, runs one
    /// reconcile pass to put live counts in the names, and persists the
    /// record.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` when the guild already has counters, or
    /// `Platform` when the guild cannot be fetched or a channel creation
    /// fails.
    pub async fn create_counters(
        &self,
        guild_id: &GuildId,
        options: CreateCounterOptions,
    ) -> Result<CounterRecord, SyncError> {
        if self.cache.contains(guild_id).await {
            return Err(SyncError::already_registered(guild_id.as_str()));
        }

        let resolved = self.config.resolve(options);

        if self.platform.fetch_guild(guild_id).await?.is_none() {
            return Err(PlatformError::guild_unavailable(guild_id.as_str()).into());
        }

        let category_id = match resolved.category_id {
            Some(category_id) => category_id,
            None => {
                self.platform
                    .create_category(guild_id, &resolved.category_name)
                    .await?
            }
        };

        let mut channels: KindMap<Option<ChannelId>> = KindMap::default();
        for kind in resolved.order {
            if !resolved.enabled.get(kind) {
                continue;
            }
            let spec = ChannelSpec {
                name: resolved.names.get(kind).clone(),
                kind: resolved.channel_kind,
                parent: Some(category_id.clone()),
                policy: resolved.join_policy,
            };
            let channel_id = self.platform.create_channel(guild_id, &spec).await?;
            channels.set(kind, Some(channel_id));
        }

        let record = CounterRecord {
            guild_id: guild_id.clone(),
            enabled: resolved.enabled,
            channels,
            names: resolved.names,
            category_id,
            locale: resolved.locale,
            channel_kind: resolved.channel_kind,
        };
        self.cache.insert(record.clone()).await;

        // Puts the live counts into the names right away; a failure here
        // self-heals on the next membership event or startup pass.
        if let Err(error) = self.reconcile(guild_id).await {
            warn!(guild = %guild_id, %error, "initial reconcile failed");
        }

        let record = self.cache.get(guild_id).await.unwrap_or(record);
        if let Err(error) = self.store.create(&record).await {
            warn!(guild = %guild_id, %error, "best-effort store create failed");
        }

        Ok(record)
    }

    /// Tears down a guild's counters. With `delete_channels`, the three
    /// counter channels and the category are deleted best-effort (the guild
    /// may already be gone from the platform); the store row is always
    /// deleted, and the cache entry removed last.
    ///
    /// # Errors
    ///
    /// Returns `NotRegistered` when the guild has no counters.
    pub async fn remove_counters(
        &self,
        guild_id: &GuildId,
        delete_channels: bool,
    ) -> Result<CounterRecord, SyncError> {
        // Hold the guild's reconcile permit so an in-flight pass cannot
        // resurrect the cache entry after the removal below.
        let lock = self.guild_lock(guild_id).await;
        let _permit = lock.lock().await;

        let Some(record) = self.cache.get(guild_id).await else {
            return Err(SyncError::not_registered(guild_id.as_str()));
        };

        if delete_channels {
            let mut targets: Vec<ChannelId> = CounterKind::ALL
                .into_iter()
                .filter_map(|kind| record.channel(kind).cloned())
                .collect();
            targets.push(record.category_id.clone());

            for channel_id in targets {
                if let Err(error) = self.platform.delete_channel(guild_id, &channel_id).await {
                    debug!(
                        guild = %guild_id,
                        channel = %channel_id,
                        %error,
                        "channel delete failed, continuing"
                    );
                }
            }
        }

        if let Err(error) = self.store.delete(guild_id).await {
            warn!(guild = %guild_id, %error, "best-effort store delete failed");
        }
        self.cache.remove(guild_id).await;
        self.drop_guild_lock(guild_id).await;

        Ok(record)
    }

    /// Toggles one counter kind, persists the flag, and reconciles.
    ///
    /// # Errors
    ///
    /// Returns `NotRegistered` when the guild has no counters; no store
    /// write happens in that case.
    pub async fn set_counter_enabled(
        &self,
        guild_id: &GuildId,
        kind: CounterKind,
        state: bool,
    ) -> Result<CounterRecord, SyncError> {
        let Some(mut record) = self.cache.get(guild_id).await else {
            return Err(SyncError::not_registered(guild_id.as_str()));
        };

        record.enabled.set(kind, state);
        self.cache.insert(record.clone()).await;
        let update = CounterUpdate::new().with_enabled(record.enabled);
        if let Err(error) = self.store.update(guild_id, &update).await {
            warn!(guild = %guild_id, %error, "best-effort store update failed");
        }

        if let Err(error) = self.reconcile(guild_id).await {
            warn!(guild = %guild_id, %error, "reconcile after toggle failed");
        }

        Ok(self.cache.get(guild_id).await.unwrap_or(record))
    }

    /// Replaces one counter kind's name template and reconciles; the new
    /// template is persisted by reconciliation's update.
    ///
    /// # Errors
    ///
    /// Returns `NotRegistered` when the guild has no counters.
    pub async fn rename_counter(
        &self,
        guild_id: &GuildId,
        kind: CounterKind,
        template: impl Into<String>,
    ) -> Result<CounterRecord, SyncError> {
        let Some(mut record) = self.cache.get(guild_id).await else {
            return Err(SyncError::not_registered(guild_id.as_str()));
        };

        record.names.set(kind, template.into());
        self.cache.insert(record.clone()).await;

        if let Err(error) = self.reconcile(guild_id).await {
            warn!(guild = %guild_id, %error, "reconcile after rename failed");
        }

        Ok(self.cache.get(guild_id).await.unwrap_or(record))
    }

    /// Whether a counter kind is enabled: the cached flag for registered
    /// guilds, the instance default otherwise. Never errors.
    pub async fn counter_enabled(&self, guild_id: &GuildId, kind: CounterKind) -> bool {
        match self.cache.get(guild_id).await {
            Some(record) => record.enabled.get(kind),
            None => self.config.enabled.get(kind),
        }
    }

    /// Read-only snapshot of every cached record.
    pub async fn snapshot(&self) -> Vec<CounterRecord> {
        self.cache.snapshot().await
    }
}
