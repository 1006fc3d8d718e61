use crate::models::balance::ShiftBalance;
use crate::models::lenient;
use crate::utils::date::{DateKey, parse_date_key};
use serde::{Deserialize, Serialize};

/// A finished shift. At most one entry exists per `date`.
///
/// `date`, `start_time` and `end_time` keep their textual form ("YYYY-MM-DD",
/// "HH:MM") so that hand-edited or legacy records survive a load untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: i64, // ⇔ creation time, epoch ms
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_time: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_time: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub break_minutes: i64, // mandatory + manual
    #[serde(default, deserialize_with = "lenient::integer")]
    pub worked_minutes: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub diff_minutes: i64, // worked - target
}

impl Entry {
    pub fn from_shift(id: i64, date: DateKey, start: &str, end: &str, shift: &ShiftBalance) -> Self {
        Self {
            id,
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            break_minutes: shift.break_minutes,
            worked_minutes: shift.effective_worked_minutes,
            diff_minutes: shift.balance_minutes,
        }
    }

    pub fn date_key(&self) -> Option<DateKey> {
        parse_date_key(&self.date)
    }
}
