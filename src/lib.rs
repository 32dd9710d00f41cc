use anyhow::anyhow;
use log::{debug, trace};
use std::fmt;
use tokio::time::{Duration, Instant};

pub const MICROS_PER_MILLI: f64 = 1000.0;

const MILLIS_PER_SEC: f64 = 1000.0;

/// A stopwatch over a monotonic clock.
///
/// Every `start()` opens a cycle and every `stop()` commits the time since the
/// most recent `start()` to the running total. Totals are kept in whole
/// microseconds and only converted to fractional milliseconds when read.
///
/// The timer does no locking. Keep one per thread or task.
#[derive(Debug, Clone)]
pub struct Timer {
  start_reading: Instant,
  stop_reading: Instant,
  total_micros: u64,
  cycle_count: u64,
  running: bool,
}

impl Timer {
  pub fn new() -> Self {
    let now = Instant::now();

    Timer {
      start_reading: now,
      stop_reading: now,
      total_micros: 0,
      cycle_count: 0,
      running: false,
    }
  }

  /// Re-baselines both readings to now and drops all statistics, including an
  /// interval that is still open.
  pub fn reset(&mut self) {
    trace!(
      "Resetting timer after {} cycles ({}us).",
      self.cycle_count,
      self.total_micros
    );

    *self = Self::new();
  }

  /// Opens a cycle. Calling this on a running timer moves the start point and
  /// still counts a new cycle.
  pub fn start(&mut self) {
    if self.running {
      debug!("Timer restarted before stop, the open interval is discarded.");
    }

    self.start_reading = Instant::now();
    self.cycle_count = self.cycle_count.saturating_add(1);
    self.running = true;
  }

  /// Closes the open cycle and adds it to the total.
  ///
  /// Stopping an idle timer measures against the last start reading (or the
  /// construction/reset reading) and still commits the result.
  pub fn stop(&mut self) {
    if !self.running {
      debug!("Timer stopped without an open interval.");
    }

    self.stop_reading = Instant::now();
    self.running = false;

    let delta = Self::to_micros(self.last_duration());
    self.total_micros = self.total_micros.saturating_add(delta);

    trace!("Timer cycle {} took {}us.", self.cycle_count, delta);
  }

  pub fn last_duration(&self) -> Duration {
    self
      .stop_reading
      .saturating_duration_since(self.start_reading)
  }

  pub fn last_time_ms(&self) -> f64 {
    Self::to_millis(self.last_duration())
  }

  /// Fails when no cycle has been started since construction or the last reset.
  pub fn avg_time_ms(&self) -> anyhow::Result<f64> {
    if self.cycle_count == 0 {
      return Err(anyhow!("The timer has no recorded cycles."));
    }

    Ok(self.total_micros as f64 / MICROS_PER_MILLI / self.cycle_count as f64)
  }

  pub fn time_since_last_start_ms(&self) -> f64 {
    Self::to_millis(Instant::now().saturating_duration_since(self.start_reading))
  }

  pub fn cycle_count(&self) -> u64 {
    self.cycle_count
  }

  pub fn total_elapsed_micros(&self) -> u64 {
    self.total_micros
  }

  pub fn total_elapsed(&self) -> Duration {
    Duration::from_micros(self.total_micros)
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  /// Runs `work` as one full cycle and hands back its output.
  pub fn measure<F, R>(&mut self, work: F) -> R
  where
    F: FnOnce() -> R,
  {
    self.start();

    let output = work();

    self.stop();

    output
  }

  // conversion split

  fn to_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
  }

  fn to_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * MILLIS_PER_SEC
  }
}

impl Default for Timer {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for Timer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "last: {:.3}ms, avg: ", self.last_time_ms())?;

    match self.avg_time_ms() {
      Ok(avg) => write!(f, "{avg:.3}ms")?,
      Err(_) => write!(f, "n/a")?,
    }

    write!(f, " ({} cycles)", self.cycle_count)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fresh_timer_has_no_average() {
    let timer = Timer::new();

    assert_eq!(timer.cycle_count(), 0);
    assert_eq!(timer.total_elapsed_micros(), 0);
    assert!(!timer.is_running());
    assert!(timer.avg_time_ms().is_err());
  }

  #[test]
  fn display_without_cycles() {
    let timer = Timer::new();

    assert_eq!(timer.to_string(), "last: 0.000ms, avg: n/a (0 cycles)");
  }

  #[test]
  fn display_with_cycles() {
    let now = Instant::now();
    let timer = Timer {
      start_reading: now,
      stop_reading: now + Duration::from_micros(1500),
      total_micros: 3000,
      cycle_count: 2,
      running: false,
    };

    assert_eq!(timer.to_string(), "last: 1.500ms, avg: 1.500ms (2 cycles)");
  }

  #[test]
  fn conversions_keep_fractions() {
    assert_eq!(Timer::to_micros(Duration::from_nanos(2_999)), 2);
    assert!((Timer::to_millis(Duration::from_micros(250)) - 0.25).abs() < 1e-9);
  }
}
