use std::future::Future;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};

use crate::config::Config;
use crate::console::ProgressPresenter;
use crate::datetime;
use crate::progress::compute_progress;
use crate::ticker::Ticker;
use crate::time_args::TimeArgs;
use crate::time_of_day::TimeOfDay;

/// `progress`サブコマンドの引数。
#[derive(Debug, Default, clap::Args)]
pub struct ProgressArgs {
    #[clap(flatten)]
    times: TimeArgs,

    #[clap(
        long = "interval-ms",
        help = "Sets the refresh interval in milliseconds (default 1001)"
    )]
    interval_ms: Option<u64>,

    #[clap(long = "once", help = "Shows the progress once and exits")]
    once: bool,
}

pub struct ProgressCommand<'a> {
    config: &'a Config,
}

impl<'a> ProgressCommand<'a> {
    /// 新しい`ProgressCommand`を返す。
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// `progress`サブコマンドの処理を行う。
    ///
    /// 一定間隔で経過率を計算して表示し、`shutdown`が完了した時点で表示を止める。
    /// `--once`が指定された場合は1回だけ表示して終了する。
    ///
    /// # Arguments
    ///
    /// * `args` - `progress`サブコマンドの引数
    /// * `presenter` - 経過率の表示先
    /// * `shutdown` - 表示を止めるきっかけ
    pub async fn run<P, F>(&self, args: ProgressArgs, mut presenter: P, shutdown: F) -> Result<()>
    where
        P: ProgressPresenter + Send + 'static,
        F: Future<Output = ()>,
    {
        let (start, end) = args.times.resolve(self.config, &datetime::now());
        info!("Start at: {}, End at: {}", start, end);
        warn_if_inverted(&start, &end);

        if args.once {
            let progress = compute_progress(&start, &end, &datetime::now())
                .context("Failed to compute progress")?;
            presenter.show_progress(&progress)?;
            return presenter.finish();
        }

        let config = self.config.clone().with_tick_interval_ms(args.interval_ms);
        let presenter = Arc::new(Mutex::new(presenter));
        let tick_presenter = Arc::clone(&presenter);
        let ticker = Ticker::start(config.tick_interval, move || {
            let progress = compute_progress(&start, &end, &datetime::now())?;
            debug!("Progress: {}", progress);
            tick_presenter
                .lock()
                .map_err(|_| anyhow!("Progress presenter lock poisoned"))?
                .show_progress(&progress)
        });

        shutdown.await;
        info!("Stopping progress display.");
        ticker.stop().await?;

        let mut presenter = presenter
            .lock()
            .map_err(|_| anyhow!("Progress presenter lock poisoned"))?;
        presenter.finish()
    }
}

/// 終了が開始より前なら一度だけ警告する。経過率は負の値のまま表示する。
fn warn_if_inverted(start: &TimeOfDay, end: &TimeOfDay) -> bool {
    let inverted = end < start;
    if inverted {
        warn!("End time {} is before start time {}", end, start);
    }
    inverted
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{Local, TimeZone};
    use mockall::predicate::function;
    use rstest::rstest;

    use super::{warn_if_inverted, ProgressArgs, ProgressCommand};
    use crate::config::Config;
    use crate::console::MockProgressPresenter;
    use crate::datetime::mock_datetime;
    use crate::progress::Progress;
    use crate::time_args::TimeArgs;

    fn working_hours() -> TimeArgs {
        TimeArgs {
            start: Some("09:00".parse().unwrap()),
            end: Some("17:00".parse().unwrap()),
            ..TimeArgs::default()
        }
    }

    #[tokio::test]
    async fn test_progress_command_once() {
        mock_datetime::freeze_at(Local.with_ymd_and_hms(2024, 1, 15, 13, 0, 0).unwrap());
        let args = ProgressArgs {
            times: working_hours(),
            once: true,
            ..ProgressArgs::default()
        };
        let mut presenter = MockProgressPresenter::new();
        presenter
            .expect_show_progress()
            .with(function(|progress: &Progress| progress.percent() == 50.0))
            .times(1)
            .returning(|_| Ok(()));
        presenter.expect_finish().times(1).returning(|| Ok(()));

        let config = Config::new();
        let command = ProgressCommand::new(&config);
        let result = command.run(args, presenter, async {}).await;
        mock_datetime::unfreeze();

        assert!(result.is_ok());
    }

    /// 停止するまで繰り返し表示することを確認する。
    #[tokio::test]
    async fn test_progress_command_until_shutdown() {
        let args = ProgressArgs {
            times: working_hours(),
            interval_ms: Some(10),
            once: false,
        };
        let mut presenter = MockProgressPresenter::new();
        presenter
            .expect_show_progress()
            .times(2..)
            .returning(|_| Ok(()));
        presenter.expect_finish().times(1).returning(|| Ok(()));

        let config = Config::new();
        let command = ProgressCommand::new(&config);
        let result = command
            .run(args, presenter, tokio::time::sleep(Duration::from_millis(45)))
            .await;

        assert!(result.is_ok());
    }

    #[rstest]
    #[case::ordered("09:00", "17:00", false)]
    #[case::same("09:00", "09:00", false)]
    #[case::inverted("17:00", "09:00", true)]
    fn test_warn_if_inverted(#[case] start: &str, #[case] end: &str, #[case] expected: bool) {
        let inverted = warn_if_inverted(&start.parse().unwrap(), &end.parse().unwrap());

        assert_eq!(inverted, expected);
    }

    /// 逆転した範囲でも、毎回の計算ではなく開始時に判定して表示を続けることを確認する。
    #[tokio::test]
    async fn test_progress_command_inverted_range() {
        mock_datetime::freeze_at(Local.with_ymd_and_hms(2024, 1, 15, 21, 0, 0).unwrap());
        let args = ProgressArgs {
            times: TimeArgs {
                start: Some("17:00".parse().unwrap()),
                end: Some("09:00".parse().unwrap()),
                ..TimeArgs::default()
            },
            once: true,
            ..ProgressArgs::default()
        };
        let mut presenter = MockProgressPresenter::new();
        presenter
            .expect_show_progress()
            .with(function(|progress: &Progress| progress.percent() == -50.0))
            .times(1)
            .returning(|_| Ok(()));
        presenter.expect_finish().times(1).returning(|| Ok(()));

        let config = Config::new();
        let result = ProgressCommand::new(&config)
            .run(args, presenter, async {})
            .await;
        mock_datetime::unfreeze();

        assert!(result.is_ok());
    }
}
