//! Data types crossing the platform boundary.

use guildtally_core::{ChannelId, ChannelKind, GuildId};
use serde::{Deserialize, Serialize};

/// A guild as seen on the platform.
#[derive(Debug, Clone)]
pub struct PlatformGuild {
    pub id: GuildId,
    pub name: String,
}

/// A guild member with its automated classification.
#[derive(Debug, Clone)]
pub struct Member {
    /// Platform member id.
    pub id: String,
    /// Whether the platform classifies this member as automated.
    pub bot: bool,
}

impl Member {
    #[must_use]
    pub fn human(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bot: false,
        }
    }

    #[must_use]
    pub fn bot(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bot: true,
        }
    }
}

/// A named channel as seen on the platform.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub name: String,
}

/// Join/visibility policy applied to created counter channels.
///
/// Counter channels are display surfaces; the default keeps members from
/// joining voice counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    Open,
    #[default]
    Locked,
}

/// Request to create a channel.
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    pub name: String,
    pub kind: ChannelKind,
    /// Category to parent the channel under, if any.
    pub parent: Option<ChannelId>,
    pub policy: JoinPolicy,
}
