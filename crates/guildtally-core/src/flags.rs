//! Enabled-state flags for the three counter kinds.
//!
//! Internally the flags are three independent booleans. The persistence
//! backends store them as a compact positional `t`/`f` string (all, bots,
//! humans); the codec lives here so both backends share it, but nothing
//! outside the persistence boundary handles the encoded form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::kind::CounterKind;

/// Enabled state of the three counter kinds of one guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledFlags {
    pub all: bool,
    pub bots: bool,
    pub humans: bool,
}

impl Default for EnabledFlags {
    fn default() -> Self {
        Self {
            all: true,
            bots: true,
            humans: true,
        }
    }
}

impl EnabledFlags {
    #[must_use]
    pub fn get(self, kind: CounterKind) -> bool {
        match kind {
            CounterKind::All => self.all,
            CounterKind::Bots => self.bots,
            CounterKind::Humans => self.humans,
        }
    }

    pub fn set(&mut self, kind: CounterKind, state: bool) {
        match kind {
            CounterKind::All => self.all = state,
            CounterKind::Bots => self.bots = state,
            CounterKind::Humans => self.humans = state,
        }
    }

    /// Encodes to the 3-character storage form, e.g. `tft`.
    #[must_use]
    pub fn encode(self) -> String {
        let to_char = |flag: bool| if flag { 't' } else { 'f' };
        [to_char(self.all), to_char(self.bots), to_char(self.humans)]
            .iter()
            .collect()
    }

    /// Decodes the 3-character storage form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFlags` when the input is not exactly three
    /// characters or contains anything other than `t`/`f`.
    pub fn decode(encoded: &str) -> Result<Self, CoreError> {
        let mut chars = encoded.chars();
        let mut next = || match chars.next() {
            Some('t') => Ok(true),
            Some('f') => Ok(false),
            _ => Err(CoreError::invalid_flags(encoded)),
        };
        let flags = Self {
            all: next()?,
            bots: next()?,
            humans: next()?,
        };
        if chars.next().is_some() {
            return Err(CoreError::invalid_flags(encoded));
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_positions() {
        let flags = EnabledFlags {
            all: true,
            bots: false,
            humans: true,
        };
        assert_eq!(flags.encode(), "tft");
        assert_eq!(EnabledFlags::default().encode(), "ttt");
    }

    #[test]
    fn test_decode_round_trip() {
        for encoded in ["ttt", "tft", "fff", "ftf"] {
            let flags = EnabledFlags::decode(encoded).unwrap();
            assert_eq!(flags.encode(), encoded);
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let original = EnabledFlags::default();
        let encoded = original.encode();

        let mut flags = original;
        flags.set(CounterKind::Bots, false);
        assert_eq!(flags.encode(), "tft");
        flags.set(CounterKind::Bots, true);
        assert_eq!(flags.encode(), encoded);
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        assert!(EnabledFlags::decode("").is_err());
        assert!(EnabledFlags::decode("tt").is_err());
        assert!(EnabledFlags::decode("tttt").is_err());
        assert!(EnabledFlags::decode("txt").is_err());
        assert!(EnabledFlags::decode("TFT").is_err());
    }
}
