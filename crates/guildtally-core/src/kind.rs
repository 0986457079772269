//! Counter kinds and the platform channel kinds that back them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A distinct countable subset of a guild's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    All,
    Bots,
    Humans,
}

impl CounterKind {
    /// Canonical ordering; also the positional mapping of the stored
    /// enabled-flag string (all=0, bots=1, humans=2).
    pub const ALL: [CounterKind; 3] = [Self::All, Self::Bots, Self::Humans];

    /// Position of this kind in the stored flag string.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            Self::All => 0,
            Self::Bots => 1,
            Self::Humans => 2,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Bots => "bots",
            Self::Humans => "humans",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The platform channel type used for a guild's counter channels.
///
/// All counters of one guild share a single kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Voice,
    Text,
    Stage,
}

impl ChannelKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Text => "text",
            Self::Stage => "stage",
        }
    }

    /// Parses the lowercase storage token.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidChannelKind` for any other input.
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        match token {
            "voice" => Ok(Self::Voice),
            "text" => Ok(Self::Text),
            "stage" => Ok(Self::Stage),
            other => Err(CoreError::invalid_channel_kind(other)),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per counter kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindMap<T> {
    pub all: T,
    pub bots: T,
    pub humans: T,
}

impl<T> KindMap<T> {
    #[must_use]
    pub fn get(&self, kind: CounterKind) -> &T {
        match kind {
            CounterKind::All => &self.all,
            CounterKind::Bots => &self.bots,
            CounterKind::Humans => &self.humans,
        }
    }

    pub fn get_mut(&mut self, kind: CounterKind) -> &mut T {
        match kind {
            CounterKind::All => &mut self.all,
            CounterKind::Bots => &mut self.bots,
            CounterKind::Humans => &mut self.humans,
        }
    }

    pub fn set(&mut self, kind: CounterKind, value: T) {
        *self.get_mut(kind) = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_mapping() {
        assert_eq!(CounterKind::All.position(), 0);
        assert_eq!(CounterKind::Bots.position(), 1);
        assert_eq!(CounterKind::Humans.position(), 2);
    }

    #[test]
    fn test_channel_kind_parse() {
        assert_eq!(ChannelKind::parse("voice").unwrap(), ChannelKind::Voice);
        assert_eq!(ChannelKind::parse("stage").unwrap(), ChannelKind::Stage);
        assert!(ChannelKind::parse("forum").is_err());
        assert!(ChannelKind::parse("Voice").is_err());
    }

    #[test]
    fn test_kind_map_access() {
        let mut map = KindMap {
            all: 1,
            bots: 2,
            humans: 3,
        };
        assert_eq!(*map.get(CounterKind::Bots), 2);
        map.set(CounterKind::Humans, 9);
        assert_eq!(*map.get(CounterKind::Humans), 9);
    }
}
