//! Security levels supported by the seed/key algorithm
//!
//! A UDS Security Access exchange uses an odd sub-function to request a seed
//! and the following even sub-function to send the key back. The security
//! level handed to the key generator is the odd request-seed value.

use automotive_diag::uds::UdsCommand;
use strum_macros::{Display, EnumIter};

/// Security level requested by the diagnostic tool.
///
/// This is a closed set. Every level has exactly one secret key in the
/// key table, and any other raw value is rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SecurityLevel {
    /// Level 0x01
    #[strum(serialize = "level 0x01")]
    Level1 = 0x01,
    /// Level 0x03
    #[strum(serialize = "level 0x03")]
    Level3 = 0x03,
}

impl SecurityLevel {
    /// Security Access service ID (0x27)
    pub fn service_id() -> u8 {
        UdsCommand::SecurityAccess.into()
    }

    /// Sub-function used to request a seed for this level
    pub fn request_seed_subfunction(self) -> u8 {
        self as u8
    }

    /// Sub-function used to send the computed key for this level
    pub fn send_key_subfunction(self) -> u8 {
        self as u8 + 1
    }

    /// Maps a send-key sub-function back to the level it unlocks.
    ///
    /// ## Returns
    /// [None] if `sub_function` is odd or does not belong to a supported level
    pub fn from_send_key(sub_function: u8) -> Option<Self> {
        if sub_function % 2 != 0 {
            return None;
        }
        let level = u32::from(sub_function).checked_sub(1)?;
        Self::try_from(level).ok()
    }
}

impl TryFrom<u32> for SecurityLevel {
    type Error = u32;

    /// Returns the raw value back as the error if it is not a supported level
    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0x01 => Ok(Self::Level1),
            0x03 => Ok(Self::Level3),
            other => Err(other),
        }
    }
}

impl From<SecurityLevel> for u32 {
    fn from(level: SecurityLevel) -> Self {
        level as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn closed_set() {
        assert_eq!(SecurityLevel::try_from(1u32), Ok(SecurityLevel::Level1));
        assert_eq!(SecurityLevel::try_from(3u32), Ok(SecurityLevel::Level3));
        for raw in [0, 2, 4, 5, 0x7F, 99, 0x101, u32::MAX] {
            assert_eq!(SecurityLevel::try_from(raw), Err(raw));
        }
    }

    #[test]
    fn sub_functions() {
        assert_eq!(SecurityLevel::service_id(), 0x27);
        for level in SecurityLevel::iter() {
            let seed = level.request_seed_subfunction();
            let key = level.send_key_subfunction();
            assert_eq!(seed % 2, 1);
            assert_eq!(key, seed + 1);
            assert_eq!(SecurityLevel::from_send_key(key), Some(level));
        }
        assert_eq!(SecurityLevel::from_send_key(0x01), None);
        assert_eq!(SecurityLevel::from_send_key(0x06), None);
        assert_eq!(SecurityLevel::from_send_key(0x00), None);
    }

    #[test]
    fn display() {
        assert_eq!(SecurityLevel::Level3.to_string(), "level 0x03");
        assert_eq!(u32::from(SecurityLevel::Level1), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        for level in SecurityLevel::iter() {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(serde_json::from_str::<SecurityLevel>(&json).unwrap(), level);
        }
        assert_eq!(serde_json::to_string(&SecurityLevel::Level3).unwrap(), "\"Level3\"");
        assert!(serde_json::from_str::<SecurityLevel>("\"Level2\"").is_err());
    }
}
