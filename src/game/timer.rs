//! Round Timer
//!
//! A timed round runs on a detached task: sleep for the round length, force
//! game over, wait out the grace window, then reset and start the next round
//! with the same settings. The engine holds the task's `AbortHandle` and
//! aborts it on a manual reset, so an operator reset never races a pending
//! automatic restart.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

use crate::game::engine::GameEngine;

/// Spawn the expire/restart loop for one timed round series.
pub(crate) fn spawn(engine: Arc<GameEngine>, round_length: Duration, grace: Duration) -> AbortHandle {
    let handle = tokio::spawn(async move {
        loop {
            debug!(?round_length, "round timer armed");
            tokio::time::sleep(round_length).await;
            engine.expire_round();

            tokio::time::sleep(grace).await;
            if !engine.restart_round() {
                break;
            }
        }
    });
    handle.abort_handle()
}
