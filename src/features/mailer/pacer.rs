//! # Send Pacing
//!
//! Sliding-window pacer for outbound provider calls. The email API
//! caps request throughput, and a scheduling batch can queue hundreds
//! of sends back to back, so every send claims a slot here first.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//! - **Toggleable**: false

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// The provider accepts two requests per second.
pub const PROVIDER_MAX_SENDS: usize = 2;
pub const PROVIDER_WINDOW: Duration = Duration::from_secs(1);

/// Tracks recent sends and delays callers that would exceed the window.
pub struct SendPacer {
    sends: Mutex<Vec<Instant>>,
    max_sends: usize,
    window: Duration,
}

impl SendPacer {
    pub fn new(max_sends: usize, window: Duration) -> SendPacer {
        SendPacer {
            sends: Mutex::new(Vec::new()),
            max_sends,
            window,
        }
    }

    /// Wait until an outbound call may proceed, then claim the slot.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut sends = self.sends.lock().await;
                let now = Instant::now();
                sends.retain(|&sent_at| now.duration_since(sent_at) < self.window);
                if sends.len() < self.max_sends {
                    sends.push(now);
                    None
                } else {
                    // oldest send ages out of the window first
                    Some(self.window.saturating_sub(sends[0].elapsed()))
                }
            };
            match wait {
                None => return,
                Some(delay) if delay.is_zero() => continue,
                Some(delay) => sleep(delay).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sends_inside_window_pass_immediately() {
        let pacer = SendPacer::new(2, Duration::from_secs(1));
        let started = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_third_send_waits_for_the_window() {
        let pacer = SendPacer::new(2, Duration::from_secs(1));
        pacer.acquire().await;
        pacer.acquire().await;

        let started = Instant::now();
        pacer.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_refills_after_idle() {
        let pacer = SendPacer::new(2, Duration::from_secs(1));
        pacer.acquire().await;
        pacer.acquire().await;
        sleep(Duration::from_millis(1100)).await;

        let started = Instant::now();
        pacer.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(10));
    }
}
