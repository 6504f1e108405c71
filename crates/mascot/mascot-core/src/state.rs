//! Animation state tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MascotError;

/// Closed set of animation states the mascot can be in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationState {
    #[default]
    Idle,
    Blink,
    Smile,
    Wave,
    Surprised,
    Shy,
    LookAt,
}

impl AnimationState {
    pub const ALL: [AnimationState; 7] = [
        Self::Idle,
        Self::Blink,
        Self::Smile,
        Self::Wave,
        Self::Surprised,
        Self::Shy,
        Self::LookAt,
    ];

    /// Wire name of this state
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Blink => "blink",
            Self::Smile => "smile",
            Self::Wave => "wave",
            Self::Surprised => "surprised",
            Self::Shy => "shy",
            Self::LookAt => "look-at",
        }
    }

    /// Whether entering this state plays a progress-driven motion curve.
    ///
    /// `idle` has its own breathing loop and `look-at` is driven by the
    /// look-at overlay instead.
    #[inline]
    pub fn has_motion(&self) -> bool {
        !matches!(self, Self::Idle | Self::LookAt)
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationState {
    type Err = MascotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| MascotError::UnknownState { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_from_str() {
        for state in AnimationState::ALL {
            assert_eq!(state.as_str().parse::<AnimationState>().unwrap(), state);
        }
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&AnimationState::LookAt).unwrap();
        assert_eq!(json, "\"look-at\"");
        let parsed: AnimationState = serde_json::from_str("\"surprised\"").unwrap();
        assert_eq!(parsed, AnimationState::Surprised);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "dance".parse::<AnimationState>().unwrap_err();
        assert_eq!(
            err,
            MascotError::UnknownState {
                name: "dance".into()
            }
        );
    }

    #[test]
    fn motion_flags() {
        assert!(!AnimationState::Idle.has_motion());
        assert!(!AnimationState::LookAt.has_motion());
        assert!(AnimationState::Wave.has_motion());
    }
}
