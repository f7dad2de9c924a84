// clock.rs
use std::time::Duration;

// Game timer measured against a caller-supplied monotonic `now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundClock {
    started_at: Option<Duration>,
    stopped_at: Option<Duration>,
}

impl RoundClock {
    pub fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
        self.stopped_at = None;
    }

    pub fn stop(&mut self, now: Duration) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    // Zero before the first start, frozen once stopped
    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(start) => self.stopped_at.unwrap_or(now).saturating_sub(start),
            None => Duration::ZERO,
        }
    }
}

/// Formats milliseconds as `MM:SS`, rounding down. Non-finite input reads as 0.
pub fn format_ms(ms: f64) -> String {
    let safe_ms = if ms.is_finite() { ms } else { 0.0 };
    let total_seconds = (safe_ms / 1000.0).floor().max(0.0) as u64;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn format_duration(elapsed: Duration) -> String {
    format_ms(elapsed.as_millis() as f64)
}

pub fn format_best(best_ms: Option<u64>) -> String {
    match best_ms {
        Some(ms) => format_ms(ms as f64),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_ms(0.0), "00:00");
        assert_eq!(format_ms(65_000.0), "01:05");
        assert_eq!(format_ms(59_999.0), "00:59");
        assert_eq!(format_ms(3_600_000.0), "60:00");
    }

    #[test]
    fn odd_inputs_render_as_zero() {
        assert_eq!(format_ms(f64::NAN), "00:00");
        assert_eq!(format_ms(f64::INFINITY), "00:00");
        assert_eq!(format_ms(-4_000.0), "00:00");
    }

    #[test]
    fn best_time_placeholder() {
        assert_eq!(format_best(None), "--");
        assert_eq!(format_best(Some(5_000)), "00:05");
    }

    #[test]
    fn clock_freezes_when_stopped() {
        let mut clock = RoundClock::default();
        assert_eq!(clock.elapsed(Duration::from_secs(3)), Duration::ZERO);

        clock.start(Duration::from_secs(10));
        assert!(clock.is_running());
        assert_eq!(clock.elapsed(Duration::from_secs(12)), Duration::from_secs(2));

        clock.stop(Duration::from_secs(15));
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(Duration::from_secs(40)), Duration::from_secs(5));

        clock.start(Duration::from_secs(50));
        assert_eq!(clock.elapsed(Duration::from_secs(51)), Duration::from_secs(1));
    }
}
