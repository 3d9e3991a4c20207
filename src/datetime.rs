use chrono::{DateTime, Local};

/// 時刻を「今日」に結びつけるときに使う現在時刻。
///
/// アプリケーション内で壁時計を読むのはここだけにしている。
#[cfg(not(test))]
pub fn now() -> DateTime<Local> {
    Local::now()
}


#[cfg(test)]
pub use mock_datetime::now;
