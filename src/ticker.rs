use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// 一定間隔でコールバックを呼び出す、停止可能なタスク。
///
/// 最初の呼び出しは開始直後に行う。`stop`するか、dropした時点で停止する。
pub struct Ticker {
    handle: JoinHandle<()>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl Ticker {
    /// 新しいタスクを起動して`Ticker`を返す。
    ///
    /// コールバックがエラーを返した場合はログに出力し、次の周期も呼び出しを続ける。
    ///
    /// # Arguments
    ///
    /// * `period` - 呼び出し間隔
    /// * `on_tick` - 呼び出すコールバック
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        debug!("Ticker stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = on_tick() {
                            warn!("Tick failed: {:#}", e);
                        }
                    }
                }
            }
        });

        Self {
            handle,
            stop_tx: Some(stop_tx),
        }
    }

    /// タスクを停止し、終了を待つ。
    pub async fn stop(mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        (&mut self.handle)
            .await
            .context("Ticker task terminated abnormally")?;

        Ok(())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}
