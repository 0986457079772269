//! # guildtally-core
//!
//! Core domain types for the guildtally counter synchronization engine.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: guild and channel identifiers, the three counter kinds and
//! their canonical ordering, the per-guild [`CounterRecord`], the compact
//! enabled-flag codec used at the persistence boundary, and display-name
//! rendering for counter channels.

pub mod error;
pub mod flags;
pub mod format;
pub mod id;
pub mod kind;
pub mod record;

pub use error::{CoreError, Result};
pub use flags::EnabledFlags;
pub use format::{COUNT_TOKEN, format_count, render_name};
pub use id::{ChannelId, GuildId};
pub use kind::{ChannelKind, CounterKind, KindMap};
pub use record::CounterRecord;
