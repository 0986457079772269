//! In-memory platform implementation.
//!
//! A complete [`PlatformClient`] over in-process state, used by the engine's
//! tests. Guilds, members, and channels are plain maps; membership mutations
//! broadcast the matching event, so listener paths can be exercised end to
//! end.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use guildtally_core::{ChannelId, GuildId};
use tokio::sync::{RwLock, broadcast};

use crate::error::PlatformError;
use crate::events::{EventBroadcaster, MemberEvent};
use crate::traits::PlatformClient;
use crate::types::{ChannelInfo, ChannelSpec, Member, PlatformGuild};

#[derive(Debug, Default)]
struct GuildState {
    name: String,
    members: Vec<Member>,
    channels: HashMap<ChannelId, ChannelInfo>,
}

/// In-memory [`PlatformClient`] for tests.
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    guilds: RwLock<HashMap<GuildId, GuildState>>,
    next_channel: AtomicU64,
    broadcaster: EventBroadcaster,
}

impl InMemoryPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a guild with the given members.
    pub async fn add_guild(
        &self,
        guild_id: impl Into<GuildId>,
        name: impl Into<String>,
        members: Vec<Member>,
    ) {
        let state = GuildState {
            name: name.into(),
            members,
            channels: HashMap::new(),
        };
        self.guilds.write().await.insert(guild_id.into(), state);
    }

    /// Removes a guild wholesale, as if the platform lost it.
    pub async fn drop_guild(&self, guild_id: &GuildId) {
        self.guilds.write().await.remove(guild_id);
    }

    /// Adds a member and broadcasts the joined event.
    pub async fn add_member(&self, guild_id: &GuildId, member: Member) {
        if let Some(state) = self.guilds.write().await.get_mut(guild_id) {
            state.members.push(member);
        }
        self.broadcaster.send(MemberEvent::joined(guild_id.clone()));
    }

    /// Removes a member and broadcasts the left event.
    pub async fn remove_member(&self, guild_id: &GuildId, member_id: &str) {
        if let Some(state) = self.guilds.write().await.get_mut(guild_id) {
            state.members.retain(|member| member.id != member_id);
        }
        self.broadcaster.send(MemberEvent::left(guild_id.clone()));
    }

    /// Channel count for assertions.
    pub async fn channel_count(&self, guild_id: &GuildId) -> usize {
        self.guilds
            .read()
            .await
            .get(guild_id)
            .map_or(0, |state| state.channels.len())
    }

    /// Channel name lookup for assertions.
    pub async fn channel_name(&self, guild_id: &GuildId, channel_id: &ChannelId) -> Option<String> {
        self.guilds
            .read()
            .await
            .get(guild_id)?
            .channels
            .get(channel_id)
            .map(|channel| channel.name.clone())
    }

    fn mint_channel_id(&self) -> ChannelId {
        let n = self.next_channel.fetch_add(1, Ordering::SeqCst) + 1;
        ChannelId::new(format!("chan-{n}"))
    }
}

#[async_trait]
impl PlatformClient for InMemoryPlatform {
    async fn fetch_guild(
        &self,
        guild_id: &GuildId,
    ) -> Result<Option<PlatformGuild>, PlatformError> {
        Ok(self.guilds.read().await.get(guild_id).map(|state| PlatformGuild {
            id: guild_id.clone(),
            name: state.name.clone(),
        }))
    }

    async fn known_guilds(&self) -> Result<Vec<GuildId>, PlatformError> {
        Ok(self.guilds.read().await.keys().cloned().collect())
    }

    async fn fetch_members(&self, guild_id: &GuildId) -> Result<Vec<Member>, PlatformError> {
        self.guilds
            .read()
            .await
            .get(guild_id)
            .map(|state| state.members.clone())
            .ok_or_else(|| PlatformError::guild_unavailable(guild_id.as_str()))
    }

    async fn create_category(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<ChannelId, PlatformError> {
        let channel_id = self.mint_channel_id();
        let mut guilds = self.guilds.write().await;
        let state = guilds
            .get_mut(guild_id)
            .ok_or_else(|| PlatformError::guild_unavailable(guild_id.as_str()))?;
        state.channels.insert(
            channel_id.clone(),
            ChannelInfo {
                id: channel_id.clone(),
                name: name.to_string(),
            },
        );
        Ok(channel_id)
    }

    async fn create_channel(
        &self,
        guild_id: &GuildId,
        spec: &ChannelSpec,
    ) -> Result<ChannelId, PlatformError> {
        let channel_id = self.mint_channel_id();
        let mut guilds = self.guilds.write().await;
        let state = guilds
            .get_mut(guild_id)
            .ok_or_else(|| PlatformError::guild_unavailable(guild_id.as_str()))?;
        state.channels.insert(
            channel_id.clone(),
            ChannelInfo {
                id: channel_id.clone(),
                name: spec.name.clone(),
            },
        );
        Ok(channel_id)
    }

    async fn fetch_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelInfo>, PlatformError> {
        let guilds = self.guilds.read().await;
        let state = guilds
            .get(guild_id)
            .ok_or_else(|| PlatformError::guild_unavailable(guild_id.as_str()))?;
        Ok(state.channels.get(channel_id).cloned())
    }

    async fn rename_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
        name: &str,
    ) -> Result<(), PlatformError> {
        let mut guilds = self.guilds.write().await;
        let state = guilds
            .get_mut(guild_id)
            .ok_or_else(|| PlatformError::guild_unavailable(guild_id.as_str()))?;
        let channel = state.channels.get_mut(channel_id).ok_or_else(|| {
            PlatformError::api(format!("no such channel: {channel_id}"))
        })?;
        channel.name = name.to_string();
        Ok(())
    }

    async fn delete_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<(), PlatformError> {
        let mut guilds = self.guilds.write().await;
        let state = guilds
            .get_mut(guild_id)
            .ok_or_else(|| PlatformError::guild_unavailable(guild_id.as_str()))?;
        state.channels.remove(channel_id);
        Ok(())
    }

    fn events(&self) -> broadcast::Receiver<MemberEvent> {
        self.broadcaster.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemberEventKind;
    use guildtally_core::ChannelKind;
    use crate::types::JoinPolicy;

    #[tokio::test]
    async fn test_guild_lifecycle() {
        let platform = InMemoryPlatform::new();
        let guild_id = GuildId::new("g1");

        assert!(platform.fetch_guild(&guild_id).await.unwrap().is_none());

        platform
            .add_guild("g1", "Guild One", vec![Member::human("u1"), Member::bot("b1")])
            .await;
        assert!(platform.fetch_guild(&guild_id).await.unwrap().is_some());

        let members = platform.fetch_members(&guild_id).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members.iter().filter(|m| m.bot).count(), 1);

        platform.drop_guild(&guild_id).await;
        assert!(platform.fetch_members(&guild_id).await.is_err());
    }

    #[tokio::test]
    async fn test_channel_operations() {
        let platform = InMemoryPlatform::new();
        let guild_id = GuildId::new("g1");
        platform.add_guild("g1", "Guild One", vec![]).await;

        let category = platform.create_category(&guild_id, "Stats").await.unwrap();
        let spec = ChannelSpec {
            name: "All: {count}".to_string(),
            kind: ChannelKind::Voice,
            parent: Some(category.clone()),
            policy: JoinPolicy::Locked,
        };
        let channel = platform.create_channel(&guild_id, &spec).await.unwrap();
        assert_eq!(platform.channel_count(&guild_id).await, 2);

        platform
            .rename_channel(&guild_id, &channel, "All: 0")
            .await
            .unwrap();
        assert_eq!(
            platform.channel_name(&guild_id, &channel).await.as_deref(),
            Some("All: 0")
        );

        platform.delete_channel(&guild_id, &channel).await.unwrap();
        assert!(platform.fetch_channel(&guild_id, &channel).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_membership_events() {
        let platform = InMemoryPlatform::new();
        let guild_id = GuildId::new("g1");
        platform.add_guild("g1", "Guild One", vec![]).await;

        let mut events = platform.events();
        platform.add_member(&guild_id, Member::human("u1")).await;
        platform.remove_member(&guild_id, "u1").await;

        assert_eq!(events.recv().await.unwrap().kind, MemberEventKind::Joined);
        assert_eq!(events.recv().await.unwrap().kind, MemberEventKind::Left);
    }
}
