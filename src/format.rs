//! # Time Formatting
//!
//! Converts a local timestamp into the strings shown on the face.
//!
//! The face mimics unpadded numerals by formatting with the usual
//! `strftime`-style padding and then dropping a single leading `'0'` or
//! `' '` from the hour, day and month. Minutes and the year are always shown
//! at full width.
//!
//! | Field    | Pattern          | Stripped |
//! |----------|------------------|----------|
//! | hour     | `%H` / `%l`      | yes      |
//! | minute   | `%M`             | no       |
//! | weekday  | `%A`             | no       |
//! | day      | `%e`             | yes      |
//! | month    | `%m`             | yes      |
//! | year     | `%Y`             | no       |
//! | meridiem | `%p` (12h only)  | no       |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether the hour is shown on a 24-hour or 12-hour clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourMode {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl HourMode {
    pub fn from_24h_style(is_24h: bool) -> Self {
        if is_24h {
            HourMode::TwentyFourHour
        } else {
            HourMode::TwelveHour
        }
    }
}

/// Drop one leading `'0'` or `' '` from a padded numeral.
///
/// Strings of length one are returned untouched, so `"0"` stays `"0"`.
pub fn strip(input: &str) -> &str {
    if input.len() > 1 && (input.starts_with('0') || input.starts_with(' ')) {
        &input[1..]
    } else {
        input
    }
}

/// Every string displayed on the face for one minute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayTime {
    pub hour: String,
    pub minute: String,
    pub weekday: String,
    pub day: String,
    pub month: String,
    pub year: String,
    /// `"AM"`/`"PM"` in 12-hour mode, empty otherwise.
    pub meridiem: String,
}

impl DisplayTime {
    /// Format `time` for display.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use retro_clock_lib::format::{DisplayTime, HourMode};
    ///
    /// let time = NaiveDate::from_ymd_opt(2024, 3, 5)
    ///     .unwrap()
    ///     .and_hms_opt(9, 7, 0)
    ///     .unwrap();
    /// let shown = DisplayTime::new(&time, HourMode::TwentyFourHour);
    /// assert_eq!(shown.hour, "9");
    /// assert_eq!(shown.minute, "07");
    /// ```
    pub fn new(time: &NaiveDateTime, mode: HourMode) -> Self {
        let field = |pattern: &str| time.format(pattern).to_string();
        let stripped = |pattern: &str| strip(&field(pattern)).to_string();

        let (hour, meridiem) = match mode {
            HourMode::TwentyFourHour => (stripped("%H"), String::new()),
            HourMode::TwelveHour => (stripped("%l"), field("%p")),
        };

        Self {
            hour,
            minute: field("%M"),
            weekday: field("%A"),
            day: stripped("%e"),
            month: stripped("%m"),
            year: field("%Y"),
            meridiem,
        }
    }
}
