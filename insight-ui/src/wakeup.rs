//! Wakeup channel for the event loop.
//!
//! The loop sleeps while nothing is animating. Work that finishes off the
//! UI task (a speech engine reporting that playback started or ended) sends
//! a wakeup so the loop drains its queues and redraws.

use tokio::sync::mpsc;

/// Sender half of the wakeup channel. Clone-able, can be moved into tasks.
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Non-blocking. A full buffer already guarantees a pending wakeup, and a
    /// dropped receiver means the loop is shutting down.
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }
}

#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Discard wakeups that piled up while the loop was busy.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(16);
    (WakeupSender { tx }, WakeupReceiver { rx })
}
