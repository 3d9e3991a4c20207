use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::TimeError;
use crate::file_saver::FileSaver;
use crate::time_of_day::TimeOfDay;
use crate::time_range::TimeRange;

const EXPORT_FILE_EXT: &str = ".json";
const FILE_NAME_PREFIX: &str = "time-export_";
/// en-USロケールの`toLocaleString`相当の書式。
const LOCAL_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// エクスポートする1件分のデータ。
///
/// `comments`が無い場合はキー自体を出力しない。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub date_created_local: String,
    #[serde(rename = "dateCreatedUTC")]
    pub date_created_utc: String,
    pub start_time: String,
    pub end_time: String,
    pub hours_logged: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// 開始・終了時刻とコメントからエクスポートするデータを作成する。
///
/// `hours_logged`は呼び出しのたびに`now`の日付へ結びつけ直して計算する。
/// 終了が開始より前の場合は負の値になる。
///
/// # Arguments
///
/// * `start` - 開始時刻
/// * `end` - 終了時刻
/// * `comment` - 任意のコメント
/// * `now` - 作成日時
pub fn build_record<Tz>(
    start: &TimeOfDay,
    end: &TimeOfDay,
    comment: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<ExportRecord, TimeError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let range = TimeRange::anchored(start, end, now)?;
    if range.is_inverted() {
        warn!("Exporting inverted range {} ~ {}", start, end);
    }

    Ok(ExportRecord {
        date_created_local: now.format(LOCAL_DATETIME_FORMAT).to_string(),
        date_created_utc: now
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        start_time: start.to_string(),
        end_time: end.to_string(),
        hours_logged: range.hours(),
        comments: comment.map(str::to_string),
    })
}

/// 4スペースでインデントしたJSONに変換する。
pub fn serialize(record: &ExportRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    record
        .serialize(&mut serializer)
        .context("Failed to serialize export record")?;

    Ok(buf)
}

/// 日付から既定のファイル名(拡張子なし)を作成する。
///
/// 日付は`M-D-YYYY`形式で、`/`は含まない。
pub fn suggest_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date_stamp = now.format("%-m/%-d/%Y").to_string().replace('/', "-");
    format!("{}{}", FILE_NAME_PREFIX, date_stamp)
}

/// 拡張子を除いたエクスポートファイル名。パス区切り文字は含まない。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    /// 指定されたファイル名か、指定が無い場合は日付から作成したファイル名を返す。
    ///
    /// 空白だけの指定は未指定として扱い、`/`と`\`は`-`に置き換える。
    ///
    /// # Arguments
    ///
    /// * `stub` - ユーザーが指定したファイル名
    /// * `now` - 既定のファイル名に利用する日時
    pub fn resolve<Tz>(stub: Option<&str>, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match stub.map(str::trim).filter(|s| !s.is_empty()) {
            Some(stub) => Self(stub.replace(['/', '\\'], "-")),
            None => Self(suggest_file_name(now)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 拡張子を付けたファイル名を返す。
    pub fn with_extension(&self) -> String {
        format!("{}{}", self.0, EXPORT_FILE_EXT)
    }
}

/// データをJSONに変換し、ファイルとして保存する。
///
/// 保存に失敗した場合はそのままエラーを返し、再試行はしない。
///
/// # Arguments
///
/// * `record` - 保存するデータ
/// * `file_name_override` - ユーザーが指定したファイル名
/// * `now` - 既定のファイル名に利用する日時
/// * `saver` - 保存先
pub fn export_to_file<S, Tz>(
    record: &ExportRecord,
    file_name_override: Option<&str>,
    now: &DateTime<Tz>,
    saver: &S,
) -> Result<PathBuf>
where
    S: FileSaver,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let file_name = FileName::resolve(file_name_override, now);
    info!("Exporting as {}", file_name.as_str());
    let file_name = file_name.with_extension();
    let payload = serialize(record)?;
    let path = saver
        .save(&file_name, &payload)
        .with_context(|| format!("Failed to save export file: {}", file_name))?;
    info!("Exported {} hours to {}", record.hours_logged, path.display());

    Ok(path)
}
