use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::datetime;
use crate::error::TimeError;
use crate::export::{build_record, export_to_file};
use crate::file_saver::FileSaver;
use crate::time_args::TimeArgs;

const MAX_COMMENT_CHARS: usize = 40;

/// `export`サブコマンドの引数。
#[derive(Debug, Default, clap::Args)]
pub struct ExportArgs {
    #[clap(flatten)]
    times: TimeArgs,

    #[clap(
        short = 'n',
        long = "name",
        help = "Sets the file name without extension (defaults to time-export_M-D-YYYY)"
    )]
    name: Option<String>,

    #[clap(
        short = 'c',
        long = "comment",
        help = "Adds a comment such as Meeting or Holiday (max 40 characters)"
    )]
    comment: Option<String>,

    #[clap(
        short = 'd',
        long = "dir",
        help = "Sets the directory to save the file (defaults to the download directory)",
        parse(from_os_str)
    )]
    pub dir: Option<PathBuf>,
}

pub struct ExportCommand<'a, S: FileSaver> {
    saver: &'a S,
    config: &'a Config,
}

impl<'a, S: FileSaver> ExportCommand<'a, S> {
    /// 新しい`ExportCommand`を返す。
    ///
    /// # Arguments
    /// * `saver` - エクスポートしたファイルの保存先
    /// * `config` - 既定の開始・終了時刻などの設定
    pub fn new(saver: &'a S, config: &'a Config) -> Self {
        Self { saver, config }
    }

    /// `export`サブコマンドの処理を行う。
    ///
    /// 開始・終了時刻とコメントからデータを作成し、JSONファイルとして保存する。
    /// 保存したファイルのパスを返す。
    ///
    /// # Arguments
    ///
    /// * `args` - `export`サブコマンドの引数
    pub fn run(&self, args: ExportArgs) -> Result<PathBuf> {
        let comment = validate_comment(args.comment.as_deref())?;
        let now = datetime::now();
        let (start, end) = args.times.resolve(self.config, &now);
        info!("Start at: {}, End at: {}", start, end);

        let record = build_record(&start, &end, comment, &now)
            .context("Failed to build export record")?;
        let path = export_to_file(&record, args.name.as_deref(), &now, self.saver)?;

        Ok(path)
    }
}

/// 空白だけのコメントは無しとして扱い、長すぎるコメントはエラーとする。
fn validate_comment(comment: Option<&str>) -> Result<Option<&str>, TimeError> {
    match comment.filter(|c| !c.trim().is_empty()) {
        Some(c) if c.chars().count() > MAX_COMMENT_CHARS => Err(TimeError::CommentTooLong {
            max: MAX_COMMENT_CHARS,
            actual: c.chars().count(),
        }),
        other => Ok(other),
    }
}
