//! The platform client contract.

use async_trait::async_trait;
use guildtally_core::{ChannelId, GuildId};
use tokio::sync::broadcast;

use crate::error::PlatformError;
use crate::events::MemberEvent;
use crate::types::{ChannelInfo, ChannelSpec, Member, PlatformGuild};

/// Client for the collaborative platform hosting the counter channels.
///
/// Implementations must be thread-safe (`Send + Sync`). All operations are
/// keyed by guild id; channel ids are only meaningful within their guild.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetches a guild. Returns `None` when the platform does not know it.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures, not for missing guilds.
    async fn fetch_guild(&self, guild_id: &GuildId)
    -> Result<Option<PlatformGuild>, PlatformError>;

    /// Every guild currently known to the platform.
    async fn known_guilds(&self) -> Result<Vec<GuildId>, PlatformError>;

    /// Fresh member list for a guild, with automated classification.
    ///
    /// Callers needing several counts derive them all from one call.
    async fn fetch_members(&self, guild_id: &GuildId) -> Result<Vec<Member>, PlatformError>;

    /// Creates the grouping category channel and returns its id.
    async fn create_category(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<ChannelId, PlatformError>;

    /// Creates a channel per `spec` and returns its id.
    async fn create_channel(
        &self,
        guild_id: &GuildId,
        spec: &ChannelSpec,
    ) -> Result<ChannelId, PlatformError>;

    /// Fetches a channel by id. Returns `None` when the channel is gone.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures, not for missing
    /// channels.
    async fn fetch_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelInfo>, PlatformError>;

    /// Renames a channel.
    async fn rename_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
        name: &str,
    ) -> Result<(), PlatformError>;

    /// Deletes a channel.
    async fn delete_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<(), PlatformError>;

    /// Subscribes to membership-change events.
    fn events(&self) -> broadcast::Receiver<MemberEvent>;
}
