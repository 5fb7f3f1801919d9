//! Time management utilities

use std::time::{Duration, Instant};

/// Pausable timer measuring time since it was last started
///
/// Starting a paused timer moves its start point to the current instant;
/// stopping it freezes the elapsed value until the next start.
#[derive(Debug, Clone)]
pub struct Timer {
    paused: bool,
    start: Instant,
    end: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Timer {
    /// Create a new timer, optionally already running
    pub fn new(paused: bool) -> Self {
        let now = Instant::now();
        Self {
            paused,
            start: now,
            end: now,
        }
    }

    /// Create a new timer and start it immediately
    pub fn start_new() -> Self {
        Self::new(false)
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        (self.raw_duration().as_secs_f64() * 1000.0) as f32
    }

    /// Get the elapsed time in whole milliseconds
    pub fn elapsed_whole_millis(&self) -> u64 {
        u64::try_from(self.raw_duration().as_millis()).unwrap_or(u64::MAX)
    }

    /// Get the elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        Self::millis_to_secs(self.elapsed_millis())
    }

    /// Get the elapsed time in minutes
    pub fn elapsed_mins(&self) -> f32 {
        Self::secs_to_mins(self.elapsed_secs())
    }

    /// Get the elapsed time in hours
    pub fn elapsed_hrs(&self) -> f32 {
        Self::mins_to_hrs(self.elapsed_mins())
    }

    /// Reset the elapsed time to zero without changing the pause state
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.end = now;
    }

    /// Unpause the timer. Does nothing if already running.
    pub fn start(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.start = Instant::now();
    }

    /// Pause the timer. Does nothing if already paused.
    pub fn stop(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.end = Instant::now();
    }

    /// Check if the timer is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Convert milliseconds to seconds
    pub fn millis_to_secs(millis: f32) -> f32 {
        millis / 1000.0
    }

    /// Convert seconds to milliseconds
    pub fn secs_to_millis(secs: f32) -> f32 {
        secs * 1000.0
    }

    /// Convert seconds to minutes
    pub fn secs_to_mins(secs: f32) -> f32 {
        secs / 60.0
    }

    /// Convert minutes to seconds
    pub fn mins_to_secs(mins: f32) -> f32 {
        mins * 60.0
    }

    /// Convert minutes to hours
    pub fn mins_to_hrs(mins: f32) -> f32 {
        mins / 60.0
    }

    /// Convert hours to minutes
    pub fn hrs_to_mins(hrs: f32) -> f32 {
        hrs * 60.0
    }

    fn raw_duration(&self) -> Duration {
        if self.paused {
            self.end.saturating_duration_since(self.start)
        } else {
            self.start.elapsed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_paused_timer_does_not_advance() {
        let timer = Timer::new(true);
        thread::sleep(Duration::from_millis(5));
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed_millis(), 0.0);
    }

    #[test]
    fn test_running_timer_advances() {
        let timer = Timer::start_new();
        thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed_millis() >= 4.0);
    }

    #[test]
    fn test_stop_freezes_elapsed() {
        let mut timer = Timer::start_new();
        thread::sleep(Duration::from_millis(5));
        timer.stop();
        let frozen = timer.elapsed_millis();
        thread::sleep(Duration::from_millis(5));
        assert_eq!(timer.elapsed_millis(), frozen);
        assert!(frozen >= 4.0);
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let mut timer = Timer::start_new();
        thread::sleep(Duration::from_millis(5));
        // Already running: the start point must not move
        timer.start();
        assert!(timer.elapsed_millis() >= 4.0);

        timer.stop();
        let frozen = timer.elapsed_millis();
        thread::sleep(Duration::from_millis(2));
        timer.stop();
        assert_eq!(timer.elapsed_millis(), frozen);
    }

    #[test]
    fn test_reset_while_paused() {
        let mut timer = Timer::start_new();
        thread::sleep(Duration::from_millis(2));
        timer.stop();
        timer.reset();
        assert_eq!(timer.elapsed_millis(), 0.0);
        assert!(timer.is_paused());
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(Timer::millis_to_secs(1500.0), 1.5);
        assert_eq!(Timer::secs_to_millis(2.0), 2000.0);
        assert_eq!(Timer::secs_to_mins(90.0), 1.5);
        assert_eq!(Timer::mins_to_secs(2.0), 120.0);
        assert_eq!(Timer::mins_to_hrs(30.0), 0.5);
        assert_eq!(Timer::hrs_to_mins(1.5), 90.0);
    }
}
