//! Lifecycle sweeper task.
//!
//! 一定間隔で SweepRoomsUseCase を実行し、1 時間制限とホスト猶予期間の
//! 期限を過ぎた Room を終了させます。

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::usecase::SweepRoomsUseCase;

/// Spawn the sweeper loop
///
/// The loop stops once `shutdown` observes `true` or its sender is dropped.
pub fn spawn_sweeper(
    usecase: Arc<SweepRoomsUseCase>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!("Sweeper started (interval: {:?})", interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let closed = usecase.execute().await;
                    if !closed.is_empty() {
                        tracing::debug!("Sweeper closed {} room(s)", closed.len());
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Sweeper stopped");
    })
}
