pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use date::{DateKey, add_days_to_date_key, format_date_for_display, parse_date_key};
pub use time::{format_minutes_hhmm, parse_time_to_minutes};
