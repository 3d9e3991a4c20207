use std::io::Write;

use anyhow::{Context, Result};
#[cfg(test)]
use mockall::automock;

use crate::progress::Progress;

const BAR_WIDTH: usize = 30;

/// Consoleに経過率を表示するためのtrait。
#[cfg_attr(test, automock)]
pub trait ProgressPresenter {
    /// 経過率を表示する。
    ///
    /// # Arguments
    ///
    /// * `progress` - 表示する経過率
    fn show_progress(&mut self, progress: &Progress) -> Result<()>;

    /// 表示を終える。
    fn finish(&mut self) -> Result<()>;
}

/// 経過率を1行のプログレスバーとして表示する。
///
/// 表示のたびに行頭に戻って同じ行を書き換える。
pub struct ConsoleProgressBar<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleProgressBar<W> {
    /// 新しい`ConsoleProgressBar`を返す。
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressPresenter for ConsoleProgressBar<W> {
    fn show_progress(&mut self, progress: &Progress) -> Result<()> {
        let suffix = if progress.is_complete() {
            " (complete)"
        } else {
            ""
        };
        write!(
            self.writer,
            "\rPercent Completion: {} [{}]{}",
            progress,
            render_bar(progress.percent()),
            suffix
        )
        .with_context(|| format!("Failed to write progress: {:?}", progress))?;
        self.writer.flush().context("Failed to flush progress")?;

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer).context("Failed to finish progress line")?;
        self.writer.flush().context("Failed to flush progress")?;

        Ok(())
    }
}

/// 0から100の範囲に丸めてバーを描画する。
fn render_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
