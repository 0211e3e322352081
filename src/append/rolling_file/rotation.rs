// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::Error;

/// The unit of a rotation [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    /// `ms`
    Millis,
    /// `h`
    Hour,
    /// `d`
    Day,
    /// `w`
    Week,
    /// `m`, approximated as 30 days.
    Month,
    /// `y`, approximated as 365 days.
    Year,
}

impl PeriodUnit {
    /// The length of one unit in milliseconds.
    pub const fn as_millis(&self) -> u64 {
        match self {
            PeriodUnit::Millis => 1,
            PeriodUnit::Hour => 3_600_000,
            PeriodUnit::Day => 86_400_000,
            PeriodUnit::Week => 604_800_000,
            PeriodUnit::Month => 2_592_000_000,
            PeriodUnit::Year => 31_536_000_000,
        }
    }

    pub const fn suffix(&self) -> &'static str {
        match self {
            PeriodUnit::Millis => "ms",
            PeriodUnit::Hour => "h",
            PeriodUnit::Day => "d",
            PeriodUnit::Week => "w",
            PeriodUnit::Month => "m",
            PeriodUnit::Year => "y",
        }
    }

    fn from_suffix(suffix: &str) -> Option<PeriodUnit> {
        match suffix {
            "ms" => Some(PeriodUnit::Millis),
            "h" => Some(PeriodUnit::Hour),
            "d" => Some(PeriodUnit::Day),
            "w" => Some(PeriodUnit::Week),
            "m" => Some(PeriodUnit::Month),
            "y" => Some(PeriodUnit::Year),
            _ => None,
        }
    }
}

/// Defines how long a log file is written before rolling over to a new one.
///
/// Parsed from `<N><unit>`, where `N` has no leading zero and `unit` is one of `ms`, `h`, `d`,
/// `w`, `m` or `y`.
///
/// # Examples
///
/// ```
/// use reqlog::Period;
/// use reqlog::PeriodUnit;
///
/// let period: Period = "12h".parse().unwrap();
/// assert_eq!(period.amount(), 12);
/// assert_eq!(period.unit(), PeriodUnit::Hour);
/// assert!("12".parse::<Period>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    amount: NonZeroU64,
    unit: PeriodUnit,
}

impl Default for Period {
    /// One day.
    fn default() -> Self {
        Period::new(NonZeroU64::MIN, PeriodUnit::Day)
    }
}

impl Period {
    pub const fn new(amount: NonZeroU64, unit: PeriodUnit) -> Self {
        Period { amount, unit }
    }

    pub const fn amount(&self) -> u64 {
        self.amount.get()
    }

    pub const fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// Whether a file created at `created_ms` is due for rotation at `now_ms`.
    ///
    /// Both instants are milliseconds since the Unix epoch.
    pub fn should_rotate(&self, now_ms: i64, created_ms: i64) -> bool {
        let elapsed = elapsed(self.unit, now_ms, created_ms);
        u64::try_from(elapsed).is_ok_and(|elapsed| elapsed >= self.amount.get())
    }
}

/// The number of whole `unit`s between `created_ms` and `now_ms`, rounded half away from zero.
///
/// Rounding means a file can roll over up to half a unit before or after the nominal
/// boundary.
pub fn elapsed(unit: PeriodUnit, now_ms: i64, created_ms: i64) -> i64 {
    let difference = now_ms.saturating_sub(created_ms);
    if unit == PeriodUnit::Millis {
        return difference;
    }
    (difference as f64 / unit.as_millis() as f64).round() as i64
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::configuration(format!(
                "invalid period format: {s:?}, expected <N><ms|h|d|w|m|y>"
            ))
        };

        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        let (amount, suffix) = s.split_at(digits);
        if amount.starts_with('0') {
            return Err(invalid());
        }

        let unit = PeriodUnit::from_suffix(suffix).ok_or_else(invalid)?;
        let amount = amount.parse::<NonZeroU64>().map_err(|_| invalid())?;
        Ok(Period::new(amount, unit))
    }
}
