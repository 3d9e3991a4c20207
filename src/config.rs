use std::path::PathBuf;
use std::time::Duration;

use log::debug;

use crate::time_of_day::TimeOfDay;

/// 既定の開始時刻。
pub const DEFAULT_START: (u32, u32) = (9, 0);
/// 既定の終了時刻。
pub const DEFAULT_END: (u32, u32) = (17, 0);
/// 表示の更新間隔(ミリ秒)。
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1001;

/// 各サブコマンドで共通の設定。
#[derive(Clone, Debug)]
pub struct Config {
    pub default_start: TimeOfDay,
    pub default_end: TimeOfDay,
    pub export_dir: PathBuf,
    pub tick_interval: Duration,
}

impl Config {
    /// 既定値で新しい`Config`を返す。
    ///
    /// 保存先はユーザーのダウンロードディレクトリで、取得できない場合はカレントディレクトリとする。
    pub fn new() -> Self {
        let export_dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        debug!("Default export directory: {}", export_dir.display());

        Self {
            default_start: time_of_day(DEFAULT_START),
            default_end: time_of_day(DEFAULT_END),
            export_dir,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }

    /// 保存先ディレクトリを上書きする。
    pub fn with_export_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.export_dir = dir;
        }
        self
    }

    /// 更新間隔を上書きする。0は無視する。
    pub fn with_tick_interval_ms(mut self, interval_ms: Option<u64>) -> Self {
        if let Some(ms) = interval_ms.filter(|ms| *ms > 0) {
            self.tick_interval = Duration::from_millis(ms);
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn time_of_day((hour, minute): (u32, u32)) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap_or_default()
}
