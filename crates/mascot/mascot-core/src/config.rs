//! Scheduler configuration and the per-state timing table.

use serde::{Deserialize, Serialize};

use crate::error::MascotError;
use crate::state::AnimationState;
use crate::Result;

/// Static timing/priority record for one animation state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Visual duration of the motion curve in milliseconds.
    pub duration_ms: f64,
    /// Higher values preempt lower ones.
    pub priority: i32,
    /// Forced return to idle after this many milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<f64>,
    /// Looping states never auto-expire.
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

impl StateConfig {
    const fn transient(duration_ms: f64, priority: i32, timeout_ms: f64) -> Self {
        Self {
            duration_ms,
            priority,
            timeout_ms: Some(timeout_ms),
            looping: false,
        }
    }

    /// Timeout to arm when this state becomes current, if any.
    #[inline]
    pub fn expiry_ms(&self) -> Option<f64> {
        if self.looping {
            None
        } else {
            self.timeout_ms
        }
    }
}

/// Configuration for every state. Missing entries in JSON fall back to the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StateTable {
    pub idle: StateConfig,
    pub blink: StateConfig,
    pub smile: StateConfig,
    pub wave: StateConfig,
    pub surprised: StateConfig,
    pub shy: StateConfig,
    pub look_at: StateConfig,
}

impl Default for StateTable {
    fn default() -> Self {
        Self {
            idle: StateConfig {
                duration_ms: 4000.0,
                priority: 0,
                timeout_ms: None,
                looping: true,
            },
            blink: StateConfig::transient(300.0, 1, 300.0),
            smile: StateConfig::transient(600.0, 2, 2000.0),
            wave: StateConfig::transient(1200.0, 3, 1200.0),
            surprised: StateConfig::transient(1500.0, 4, 2000.0),
            shy: StateConfig::transient(1500.0, 4, 2000.0),
            look_at: StateConfig {
                duration_ms: 200.0,
                priority: 1,
                timeout_ms: None,
                looping: false,
            },
        }
    }
}

impl StateTable {
    #[inline]
    pub fn get(&self, state: AnimationState) -> &StateConfig {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Blink => &self.blink,
            AnimationState::Smile => &self.smile,
            AnimationState::Wave => &self.wave,
            AnimationState::Surprised => &self.surprised,
            AnimationState::Shy => &self.shy,
            AnimationState::LookAt => &self.look_at,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for state in AnimationState::ALL {
            let cfg = self.get(state);
            if !(cfg.duration_ms.is_finite() && cfg.duration_ms > 0.0) {
                return Err(MascotError::invalid_config(format!(
                    "{state}: duration_ms must be positive, got {}",
                    cfg.duration_ms
                )));
            }
            if let Some(timeout) = cfg.timeout_ms {
                if !(timeout.is_finite() && timeout > 0.0) {
                    return Err(MascotError::invalid_config(format!(
                        "{state}: timeout_ms must be positive, got {timeout}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Random interval between involuntary blinks, `[min_ms, max_ms)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlinkInterval {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl Default for BlinkInterval {
    fn default() -> Self {
        Self {
            min_ms: 3000.0,
            max_ms: 6000.0,
        }
    }
}

/// Idle breathing: `scale_y = 1 + sin(t * rate) * amplitude`, t in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreathConfig {
    pub rate: f32,
    pub amplitude: f32,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            rate: 1.5,
            amplitude: 0.03,
        }
    }
}

/// Top-level scheduler configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Accessibility: only `idle` is ever played, no blinking or breathing.
    pub reduced_motion: bool,
    pub blink_interval_ms: BlinkInterval,
    /// Duration of the head look-at tween.
    pub look_at_duration_ms: f64,
    pub breath: BreathConfig,
    /// Fixed RNG seed for blink intervals; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub states: StateTable,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            blink_interval_ms: BlinkInterval::default(),
            look_at_duration_ms: 200.0,
            breath: BreathConfig::default(),
            seed: None,
            states: StateTable::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn reduced_motion() -> Self {
        Self {
            reduced_motion: true,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON config and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let blink = self.blink_interval_ms;
        if !(blink.min_ms.is_finite() && blink.max_ms.is_finite())
            || blink.min_ms <= 0.0
            || blink.max_ms < blink.min_ms
        {
            return Err(MascotError::invalid_config(format!(
                "blink_interval_ms must satisfy 0 < min <= max, got [{}, {})",
                blink.min_ms, blink.max_ms
            )));
        }
        if !(self.look_at_duration_ms.is_finite() && self.look_at_duration_ms > 0.0) {
            return Err(MascotError::invalid_config(format!(
                "look_at_duration_ms must be positive, got {}",
                self.look_at_duration_ms
            )));
        }
        self.states.validate()
    }
}
