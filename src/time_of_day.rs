use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};

use crate::error::TimeError;

const TIME_FORMAT: &str = "%H:%M";

/// 日付を持たない`HH:MM`形式の時刻。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// 時と分から`TimeOfDay`を作成する。範囲外の場合は`None`を返す。
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// 指定した日時の時刻部分を分単位で取り出す。秒以下は切り捨てる。
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let time = instant.time();
        // hour/minuteはNaiveTimeから取り出しているので必ず有効
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    /// `now`と同じ日付・タイムゾーンに時刻を結びつけた日時を返す。
    ///
    /// 呼び出しのたびに`now`から日付を取り直すため、日付をまたいだ場合は結果も変わる。
    /// 夏時間の切り替えで重複する時刻は早い方を採用し、存在しない時刻はエラーとする。
    ///
    /// # Arguments
    ///
    /// * `now` - 日付の基準となる日時
    pub fn anchor_to<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DateTime<Tz>, TimeError> {
        let naive = now.date_naive().and_time(self.0);
        now.timezone()
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| TimeError::NonexistentLocalTime(naive.to_string()))
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
            .map(Self)
            .map_err(|_| TimeError::InvalidTimeFormat(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};
    use rstest::rstest;

    use super::TimeOfDay;
    use crate::error::TimeError;

    /// 正しい形式の文字列がパースでき、ゼロ埋めした形式で表示されることを確認する。
    #[rstest]
    #[case::padded("09:00", "09:00")]
    #[case::afternoon("17:30", "17:30")]
    #[case::midnight("00:00", "00:00")]
    #[case::last_minute("23:59", "23:59")]
    #[case::surrounding_spaces(" 08:05 ", "08:05")]
    fn test_parse(#[case] input: &str, #[case] expected: &str) {
        let time: TimeOfDay = input.parse().unwrap();

        assert_eq!(time.to_string(), expected);
    }

    /// 不正な形式の文字列はエラーになることを確認する。
    #[rstest]
    #[case::empty("")]
    #[case::text("noon")]
    #[case::hour_out_of_range("24:00")]
    #[case::minute_out_of_range("12:60")]
    #[case::with_seconds("12:00:00")]
    fn test_parse_invalid(#[case] input: &str) {
        let result = input.parse::<TimeOfDay>();

        assert_eq!(result, Err(TimeError::InvalidTimeFormat(input.to_string())));
    }

    #[test]
    fn test_from_hm_out_of_range() {
        assert!(TimeOfDay::from_hm(25, 0).is_none());
        assert_eq!(TimeOfDay::from_hm(7, 5).unwrap().to_string(), "07:05");
    }

    /// 秒は切り捨てて時刻を取り出すことを確認する。
    #[test]
    fn test_of_truncates_seconds() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 13, 4, 59).unwrap();

        assert_eq!(TimeOfDay::of(&instant).to_string(), "13:04");
    }

    /// 基準日時と同じ日付・タイムゾーンに結びつくことを確認する。
    #[test]
    fn test_anchor_to_keeps_date_and_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap();
        let time: TimeOfDay = "09:15".parse().unwrap();

        let anchored = time.anchor_to(&now).unwrap();

        assert_eq!(
            anchored,
            offset.with_ymd_and_hms(2024, 3, 5, 9, 15, 0).unwrap()
        );
    }
}
