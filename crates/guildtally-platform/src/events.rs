//! Membership-change event feed.
//!
//! The platform pushes member joined/left notifications through a tokio
//! broadcast channel. The engine subscribes once at startup; any number of
//! other consumers may subscribe as well.

use guildtally_core::GuildId;
use tokio::sync::broadcast;

/// Default buffer size for the broadcast channel. Slow receivers past this
/// limit observe a lag error and skip ahead.
const DEFAULT_BUFFER_SIZE: usize = 1024;

/// What happened to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberEventKind {
    Joined,
    Left,
}

/// A membership change on some guild.
#[derive(Debug, Clone)]
pub struct MemberEvent {
    pub guild_id: GuildId,
    pub kind: MemberEventKind,
}

impl MemberEvent {
    #[must_use]
    pub fn joined(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            kind: MemberEventKind::Joined,
        }
    }

    #[must_use]
    pub fn left(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            kind: MemberEventKind::Left,
        }
    }
}

/// Broadcast bus for membership events.
///
/// Thread-safe and cheap to clone; multiple subscribers receive every event
/// sent after they subscribed.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<MemberEvent>,
}

impl EventBroadcaster {
    /// Create a new broadcaster with default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new broadcaster with custom buffer size.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event; 0 when
    /// nobody is listening.
    pub fn send(&self, event: MemberEvent) -> usize {
        self.sender.send(event).unwrap_or_default()
    }

    /// Subscribe to events sent after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MemberEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_and_send() {
        let broadcaster = EventBroadcaster::new();
        assert_eq!(broadcaster.send(MemberEvent::joined(GuildId::new("g1"))), 0);

        let mut receiver = broadcaster.subscribe();
        assert_eq!(broadcaster.send(MemberEvent::left(GuildId::new("g1"))), 1);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.kind, MemberEventKind::Left);
        assert_eq!(event.guild_id.as_str(), "g1");
    }
}
