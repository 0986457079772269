//! Reconciliation: make a guild's platform channels match its stored
//! configuration and live member counts.

use futures_util::future::try_join_all;
use tracing::{debug, warn};

use guildtally_core::{ChannelId, CounterKind, CounterRecord, GuildId, render_name};
use guildtally_platform::{ChannelSpec, Member, PlatformError};
use guildtally_storage::CounterUpdate;

use crate::error::SyncError;
use crate::manager::CounterManager;

/// Member counts for one guild, derived from a single member-list refresh
/// and shared by all three kinds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MemberCounts {
    pub total: u64,
    pub bots: u64,
    pub humans: u64,
}

impl MemberCounts {
    pub(crate) fn for_kind(self, kind: CounterKind) -> u64 {
        match kind {
            CounterKind::All => self.total,
            CounterKind::Bots => self.bots,
            CounterKind::Humans => self.humans,
        }
    }
}

pub(crate) fn tally(members: &[Member]) -> MemberCounts {
    let bots = members.iter().filter(|member| member.bot).count() as u64;
    MemberCounts {
        total: members.len() as u64,
        bots,
        humans: members.len() as u64 - bots,
    }
}

impl CounterManager {
    /// Reconciles one guild: every enabled kind ends up with a live channel
    /// whose name renders the current count; missing channels are recreated
    /// and the new ids are written through to cache and store.
    ///
    /// Passes for the same guild are serialized, so a slower pass can never
    /// overwrite channel ids written by a later-started one.
    ///
    /// # Errors
    ///
    /// Returns `NotRegistered` when the guild has no cached record (no
    /// platform calls are made), or `Platform` when the guild cannot be
    /// fetched or a channel mutation fails. On a platform failure the
    /// remaining kinds are skipped; channels created before the failure
    /// remain and self-heal on the next pass.
    pub async fn reconcile(&self, guild_id: &GuildId) -> Result<(), SyncError> {
        let lock = self.guild_lock(guild_id).await;
        let _permit = lock.lock().await;

        // Read post-mutation state under the permit, so a command's write is
        // always visible to the reconcile it triggers.
        let record = self
            .cache
            .get(guild_id)
            .await
            .ok_or_else(|| SyncError::not_registered(guild_id.as_str()))?;

        if self.platform.fetch_guild(guild_id).await?.is_none() {
            return Err(PlatformError::guild_unavailable(guild_id.as_str()).into());
        }

        // One member refresh, shared across all three kinds.
        let members = self.platform.fetch_members(guild_id).await?;
        let counts = tally(&members);

        let enabled_kinds: Vec<CounterKind> = CounterKind::ALL
            .into_iter()
            .filter(|kind| record.enabled.get(*kind))
            .collect();
        let synced = try_join_all(
            enabled_kinds
                .iter()
                .map(|kind| self.sync_kind(&record, *kind, counts.for_kind(*kind))),
        )
        .await?;

        // Merge the (possibly new) channel ids into the freshest cached
        // record; a concurrent command may have changed other fields since
        // the read above.
        let Some(mut current) = self.cache.get(guild_id).await else {
            debug!(guild = %guild_id, "guild removed mid-reconcile, dropping result");
            return Ok(());
        };
        for (kind, channel_id) in synced {
            current.set_channel(kind, channel_id);
        }
        self.cache.insert(current.clone()).await;

        let update = CounterUpdate::new()
            .with_channels(current.channels.clone())
            .with_names(current.names.clone());
        if let Err(error) = self.store.update(guild_id, &update).await {
            warn!(guild = %guild_id, %error, "best-effort store update failed after reconcile");
        }

        Ok(())
    }

    /// Ensures one kind's channel exists and carries the rendered name.
    async fn sync_kind(
        &self,
        record: &CounterRecord,
        kind: CounterKind,
        count: u64,
    ) -> Result<(CounterKind, ChannelId), SyncError> {
        let guild_id = &record.guild_id;

        // A failing or empty fetch both mean the channel must be recreated.
        let existing = match record.channel(kind) {
            Some(channel_id) => self
                .platform
                .fetch_channel(guild_id, channel_id)
                .await
                .ok()
                .flatten()
                .map(|channel| channel.id),
            None => None,
        };

        let channel_id = match existing {
            Some(channel_id) => channel_id,
            None => {
                let spec = ChannelSpec {
                    // Placeholder; the rename below fills in the count.
                    name: record.name(kind).to_string(),
                    kind: record.channel_kind,
                    parent: Some(record.category_id.clone()),
                    policy: self.config.join_policy,
                };
                let channel_id = self.platform.create_channel(guild_id, &spec).await?;
                debug!(
                    guild = %guild_id,
                    kind = %kind,
                    channel = %channel_id,
                    "created counter channel"
                );
                channel_id
            }
        };

        let name = render_name(record.name(kind), count, &record.locale);
        self.platform
            .rename_channel(guild_id, &channel_id, &name)
            .await?;

        Ok((kind, channel_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let members = vec![
            Member::human("u1"),
            Member::bot("b1"),
            Member::human("u2"),
            Member::bot("b2"),
            Member::human("u3"),
        ];
        let counts = tally(&members);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.bots, 2);
        assert_eq!(counts.humans, 3);

        assert_eq!(counts.for_kind(CounterKind::All), 5);
        assert_eq!(counts.for_kind(CounterKind::Bots), 2);
        assert_eq!(counts.for_kind(CounterKind::Humans), 3);
    }

    #[test]
    fn test_tally_empty() {
        let counts = tally(&[]);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.bots, 0);
        assert_eq!(counts.humans, 0);
    }
}
