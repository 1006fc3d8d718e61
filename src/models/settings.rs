use crate::models::lenient;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DAILY_TARGET_MINUTES: i64 = 480;
pub const DEFAULT_BREAK_MINUTES: i64 = 60;

fn default_target() -> i64 {
    DEFAULT_DAILY_TARGET_MINUTES
}
fn default_break() -> i64 {
    DEFAULT_BREAK_MINUTES
}

// `null` or garbage falls back to the default, never to 0: a zero target
// would count every minute as overtime.
fn lenient_target<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    lenient::integer_or(d, DEFAULT_DAILY_TARGET_MINUTES)
}
fn lenient_break<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    lenient::integer_or(d, DEFAULT_BREAK_MINUTES)
}

/// User settings persisted under the `settings` key.
///
/// The calculator only ever reads these; they change through
/// `Tracker::update_settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(
        alias = "targetMinutes",
        default = "default_target",
        deserialize_with = "lenient_target"
    )]
    pub daily_target_minutes: i64,

    #[serde(
        alias = "breakMinutes",
        default = "default_break",
        deserialize_with = "lenient_break"
    )]
    pub default_break_minutes: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_target_minutes: default_target(),
            default_break_minutes: default_break(),
        }
    }
}

impl Settings {
    /// Negative values stored by hand are clamped.
    pub fn normalized(self) -> Self {
        Self {
            daily_target_minutes: self.daily_target_minutes.max(0),
            default_break_minutes: self.default_break_minutes.max(0),
        }
    }
}
