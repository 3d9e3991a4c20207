use chrono::{DateTime, TimeZone};

use crate::error::TimeError;
use crate::time_of_day::TimeOfDay;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// 今日の日付に結びつけた開始・終了日時の組。
///
/// 終了が開始より後であることは検証しない。
#[derive(Clone, Debug)]
pub struct TimeRange<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeRange<Tz> {
    /// 開始・終了時刻を`now`の日付に結びつけて新しい`TimeRange`を返す。
    ///
    /// # Arguments
    ///
    /// * `start` - 開始時刻
    /// * `end` - 終了時刻
    /// * `now` - 日付の基準となる日時
    pub fn anchored(
        start: &TimeOfDay,
        end: &TimeOfDay,
        now: &DateTime<Tz>,
    ) -> Result<Self, TimeError> {
        Ok(Self {
            start: start.anchor_to(now)?,
            end: end.anchor_to(now)?,
        })
    }

    /// 開始から終了までのミリ秒。逆転している場合は負になる。
    pub fn total_ms(&self) -> i64 {
        (self.end.clone() - self.start.clone()).num_milliseconds()
    }

    /// 開始から`now`までのミリ秒。
    pub fn elapsed_ms(&self, now: &DateTime<Tz>) -> i64 {
        (now.clone() - self.start.clone()).num_milliseconds()
    }

    /// 開始から終了までの時間数。
    pub fn hours(&self) -> f64 {
        self.total_ms() as f64 / MILLIS_PER_HOUR
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}
