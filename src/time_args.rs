use chrono::{DateTime, TimeZone};

use crate::config::Config;
use crate::progress::default_start_time;
use crate::time_of_day::TimeOfDay;

/// 開始・終了時刻を指定するための共通の引数。
#[derive(Debug, Default, clap::Args)]
pub struct TimeArgs {
    #[clap(
        short = 's',
        long = "start",
        help = "Sets the start time in the format HH:MM"
    )]
    pub start: Option<TimeOfDay>,

    #[clap(
        long = "start-now",
        conflicts_with = "start",
        help = "Uses the current time as the start time"
    )]
    pub start_now: bool,

    #[clap(short = 'e', long = "end", help = "Sets the end time in the format HH:MM")]
    pub end: Option<TimeOfDay>,

    #[clap(
        long = "end-now",
        conflicts_with = "end",
        help = "Uses the current time as the end time"
    )]
    pub end_now: bool,
}

impl TimeArgs {
    /// 引数と設定から開始・終了時刻を決める。
    ///
    /// `--start-now`/`--end-now`は時刻の指定とは同時に使えない(clapが拒否する)。
    /// 開始時刻が無い場合は既定の開始時刻(まだ来ていなければ現在時刻)、
    /// 終了時刻が無い場合は既定の終了時刻を使う。
    pub fn resolve<Tz: TimeZone>(&self, config: &Config, now: &DateTime<Tz>) -> (TimeOfDay, TimeOfDay) {
        let start = if self.start_now {
            TimeOfDay::of(now)
        } else {
            self.start
                .unwrap_or_else(|| default_start_time(&config.default_start, now))
        };
        let end = if self.end_now {
            TimeOfDay::of(now)
        } else {
            self.end.unwrap_or(config.default_end)
        };

        (start, end)
    }
}
