use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::error::TimeError;
use crate::time_of_day::TimeOfDay;
use crate::time_range::TimeRange;

const COMPLETE_PERCENT: f64 = 100.0;

/// 時間範囲の経過率。
///
/// 終了時刻を過ぎた場合だけ`Complete`になる。丸めた結果が100でも、終了前なら`InRange`のまま。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
    InRange(f64),
    Complete,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        match self {
            Progress::InRange(percent) => *percent,
            Progress::Complete => COMPLETE_PERCENT,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Progress::Complete)
    }
}

/// 小数点以下は最大2桁で、末尾の0は表示しない。
impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.percent());
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        write!(f, "{}%", trimmed)
    }
}

/// 開始・終了時刻と現在日時から経過率を計算する。
///
/// 開始・終了時刻は`now`の日付に結びつける。
/// 開始と終了が同じ場合は分母を1ミリ秒として0除算を避ける。
/// 経過率が1を超えた場合は`Progress::Complete`とする。
///
/// 終了が開始より前の場合も検証はせず、計算した結果をそのまま返す。
///
/// # Arguments
///
/// * `start` - 開始時刻
/// * `end` - 終了時刻
/// * `now` - 評価する日時
pub fn compute_progress<Tz: TimeZone>(
    start: &TimeOfDay,
    end: &TimeOfDay,
    now: &DateTime<Tz>,
) -> Result<Progress, TimeError> {
    let range = TimeRange::anchored(start, end, now)?;

    let elapsed_ms = range.elapsed_ms(now);
    let total_ms = match range.total_ms() {
        0 => 1,
        total => total,
    };
    let fraction = elapsed_ms as f64 / total_ms as f64;

    if fraction <= 1.0 {
        Ok(Progress::InRange(round_to_hundredths(fraction * 100.0)))
    } else {
        Ok(Progress::Complete)
    }
}

/// `-0.0`は`0.0`にそろえる。
fn round_to_hundredths(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// 既定の開始時刻が既に過ぎていればそれを、そうでなければ現在時刻を開始時刻とする。
///
/// # Arguments
///
/// * `default_start` - 既定の開始時刻
/// * `now` - 現在日時
pub fn default_start_time<Tz: TimeZone>(
    default_start: &TimeOfDay,
    now: &DateTime<Tz>,
) -> TimeOfDay {
    match default_start.anchor_to(now) {
        Ok(start) if start < *now => *default_start,
        _ => TimeOfDay::of(now),
    }
}
