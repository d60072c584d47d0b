use std::time::{Duration, Instant};

/// Recurring tick timer that only exists between `start` and `stop`.
///
/// A late poll fires a single tick and re-arms from the poll time, so missed
/// ticks are dropped instead of queued.
#[derive(Debug, Default)]
pub struct TickTimer {
    next_tick: Option<Instant>,
}

impl TickTimer {
    pub fn new() -> Self {
        TickTimer { next_tick: None }
    }

    pub fn start(&mut self, now: Instant, interval: Duration) {
        self.next_tick = Some(now + interval);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// `interval` is read on every re-arm, so a changed difficulty applies from
    /// the following tick.
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        match self.next_tick {
            Some(due) if now >= due => {
                self.next_tick = Some(now + interval);
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_130: Duration = Duration::from_millis(130);

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = TickTimer::new();
        let now = Instant::now();
        assert!(!timer.poll(now + Duration::from_secs(10), MS_130));
        assert_eq!(timer.time_until_due(now), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut timer = TickTimer::new();
        let t0 = Instant::now();
        timer.start(t0, MS_130);

        assert!(!timer.poll(t0 + Duration::from_millis(129), MS_130));
        assert!(timer.poll(t0 + MS_130, MS_130));
        assert!(!timer.poll(t0 + MS_130, MS_130));
        assert_eq!(timer.time_until_due(t0 + MS_130), Some(MS_130));
    }

    #[test]
    fn late_polls_do_not_queue_ticks() {
        let mut timer = TickTimer::new();
        let t0 = Instant::now();
        timer.start(t0, MS_130);

        let late = t0 + Duration::from_secs(2);
        assert!(timer.poll(late, MS_130));
        assert!(!timer.poll(late + Duration::from_millis(1), MS_130));
    }

    #[test]
    fn stop_cancels_a_pending_tick() {
        let mut timer = TickTimer::new();
        let t0 = Instant::now();
        timer.start(t0, MS_130);
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.poll(t0 + MS_130, MS_130));
    }

    #[test]
    fn new_interval_applies_on_rearm() {
        let mut timer = TickTimer::new();
        let t0 = Instant::now();
        timer.start(t0, MS_130);
        let fast = Duration::from_millis(50);
        assert!(timer.poll(t0 + MS_130, fast));
        assert!(timer.poll(t0 + MS_130 + fast, fast));
    }
}
