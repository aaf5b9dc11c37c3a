use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Marker sent once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick;

/// Background frame clock. Stopping (or dropping) it wakes and joins the
/// thread, so no ticks are sent afterwards.
pub struct FrameTicker {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl FrameTicker {
    pub fn start(interval: Duration, tx: Sender<FrameTick>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let join = thread::spawn(move || {
            loop {
                thread::park_timeout(interval);
                if stop_flag.load(Ordering::Acquire) {
                    break;
                }
                if tx.send(FrameTick).is_err() {
                    break;
                }
            }
        });

        Self {
            stop,
            join: Some(join),
        }
    }

    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(h) = self.join.take() {
            h.thread().unpark();
            let _ = h.join();
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
