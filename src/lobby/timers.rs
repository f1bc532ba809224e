use tokio::task::JoinHandle;
use tracing::debug;

/// Background tasks driving one lobby.
///
/// The countdown and the hint reveal are periodic and belong to the current
/// round. Delayed round ends and bot turns are one-shots; they check the round
/// number when they fire, so they only need aborting when a new round starts
/// or the lobby goes away.
#[derive(Default)]
pub struct RoundTimers {
    countdown: Option<JoinHandle<()>>,
    hints: Option<JoinHandle<()>>,
    pending: Vec<JoinHandle<()>>,
}

impl RoundTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the periodic tasks of a fresh round, dropping anything older
    pub fn start_round(&mut self, countdown: JoinHandle<()>, hints: JoinHandle<()>) {
        self.cancel_all();
        self.countdown = Some(countdown);
        self.hints = Some(hints);
    }

    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle);
    }

    pub fn stop_round_timers(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        if let Some(handle) = self.hints.take() {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.stop_round_timers();
        let pending = self.pending.len();
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        if pending > 0 {
            debug!(pending, "Cancelled pending lobby tasks");
        }
    }

    pub fn has_round_timers(&self) -> bool {
        self.countdown.is_some() || self.hints.is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for RoundTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
