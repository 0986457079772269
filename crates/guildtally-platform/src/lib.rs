//! # guildtally-platform
//!
//! The platform collaborator boundary for the guildtally engine.
//!
//! The engine never talks to a concrete chat platform directly; everything
//! goes through the [`PlatformClient`] trait defined here: guild and member
//! lookups, channel creation/rename/delete, and the membership-change event
//! feed. A real deployment implements the trait over its platform SDK;
//! [`InMemoryPlatform`] is a complete in-memory implementation used by the
//! engine's tests.

mod error;
mod events;
mod memory;
mod traits;
mod types;

pub use error::PlatformError;
pub use events::{EventBroadcaster, MemberEvent, MemberEventKind};
pub use memory::InMemoryPlatform;
pub use traits::PlatformClient;
pub use types::{ChannelInfo, ChannelSpec, JoinPolicy, Member, PlatformGuild};

/// Type alias for a shared platform client trait object.
pub type DynPlatformClient = std::sync::Arc<dyn PlatformClient>;
