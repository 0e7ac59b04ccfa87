//! Cache Housekeeper Task
//!
//! Background sweep that periodically removes expired entries from an
//! inventory, independent of how often the inventory is read.
//!
//! Inside a tokio runtime the sweep is a spawned task. Without one it runs
//! on a dedicated OS thread, so an inventory can be built from plain sync
//! code too.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Shelf;
use crate::error::{CacheError, Result};

const THREAD_NAME: &str = "cache-housekeeper";

// == Housekeeper ==
/// Handle on a running sweep, owned by its inventory.
#[derive(Debug)]
pub(crate) struct Housekeeper {
    runner: Runner,
    alive: Arc<AtomicBool>,
}

#[derive(Debug)]
enum Runner {
    Task(JoinHandle<()>),
    Thread {
        handle: thread::JoinHandle<()>,
        stop: Arc<StopSignal>,
    },
}

impl Housekeeper {
    /// True until the sweep loop has exited or been cancelled.
    pub(crate) fn is_running(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Cancels the sweep. A sweep thread is woken and joined, so it is gone
    /// when this returns. A task is aborted and dropped by its runtime at
    /// its next yield point.
    pub(crate) fn stop(self) {
        match self.runner {
            Runner::Task(handle) => handle.abort(),
            Runner::Thread { handle, stop } => {
                stop.raise();
                if handle.join().is_err() {
                    warn!("Cache housekeeper thread panicked");
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn liveness(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.alive)
    }
}

/// Clears the liveness flag when the sweep loop ends, including when an
/// aborted task's future is dropped.
struct Liveness(Arc<AtomicBool>);

impl Drop for Liveness {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// == Stop Signal ==
#[derive(Debug, Default)]
struct StopSignal {
    raised: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    fn raise(&self) {
        *self.raised.lock() = true;
        self.wake.notify_all();
    }

    /// Sleeps for `period` or until raised. Returns true once raised.
    fn wait(&self, period: Duration) -> bool {
        let deadline = Instant::now() + period;
        let mut raised = self.raised.lock();
        while !*raised {
            if self.wake.wait_until(&mut raised, deadline).timed_out() {
                break;
            }
        }
        *raised
    }
}

// == Spawn ==
/// Starts the sweep loop for one inventory.
///
/// The loop sleeps for `period`, takes the inventory lock, removes expired
/// entries, releases the lock and sleeps again. It holds only a weak
/// reference and exits once the inventory's state is gone. Neither form
/// keeps the process alive: tokio does not wait for spawned tasks at
/// shutdown, and the thread is stopped when its inventory is dropped.
///
/// # Errors
/// `CacheError::Internal` if the OS refuses to start the sweep thread.
pub(crate) fn spawn_housekeeper<V>(
    shelf: Weak<Mutex<Shelf<V>>>,
    period: Duration,
) -> Result<Housekeeper>
where
    V: Send + 'static,
{
    let alive = Arc::new(AtomicBool::new(true));
    let liveness = Liveness(Arc::clone(&alive));

    let runner = match Handle::try_current() {
        Ok(runtime) => Runner::Task(runtime.spawn(async move {
            let _liveness = liveness;
            log_start(period);

            loop {
                tokio::time::sleep(period).await;
                if !sweep_once(&shelf) {
                    break;
                }
            }
        })),
        Err(_) => {
            let stop = Arc::new(StopSignal::default());
            let signal = Arc::clone(&stop);
            let handle = thread::Builder::new()
                .name(THREAD_NAME.to_string())
                .spawn(move || {
                    let _liveness = liveness;
                    log_start(period);

                    while !signal.wait(period) {
                        if !sweep_once(&shelf) {
                            break;
                        }
                    }
                })
                .map_err(|e| {
                    CacheError::Internal(format!("Failed to start cache housekeeper: {}", e))
                })?;
            Runner::Thread { handle, stop }
        }
    };

    Ok(Housekeeper { runner, alive })
}

fn log_start(period: Duration) {
    info!(
        "Starting cache housekeeper with a period of {:.1} seconds",
        period.as_secs_f64()
    );
}

/// One sweep pass. Returns false once the inventory is gone.
fn sweep_once<V>(shelf: &Weak<Mutex<Shelf<V>>>) -> bool {
    let Some(strong) = shelf.upgrade() else {
        debug!("Cache inventory dropped, housekeeper exiting");
        return false;
    };

    let (removed, remaining) = {
        let mut guard = strong.lock();
        let removed = guard.sweep();
        (removed, guard.len())
    };

    if removed > 0 {
        info!(
            "Cache housekeeping: removed {} expired entries, {} remaining",
            removed, remaining
        );
    } else {
        debug!(
            "Cache housekeeping: no expired entries, {} remaining",
            remaining
        );
    }
    true
}
