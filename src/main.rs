use anyhow::Context;
use hires_timer::Timer;
use log::info;
use std::thread;
use std::time::Duration;

const DEFAULT_CYCLES: u32 = 5;
const DEFAULT_SLEEP_MS: u64 = 20;

struct Demo {}

fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  Demo::timed_sleeps()?;

  Demo::timed_work()?;

  Ok(())
}

impl Demo {
  fn timed_sleeps() -> anyhow::Result<()> {
    let mut timer = Timer::new();

    for cycle in 1..=DEFAULT_CYCLES {
      timer.start();

      thread::sleep(Duration::from_millis(DEFAULT_SLEEP_MS * u64::from(cycle)));

      timer.stop();

      info!("Cycle {cycle} took {:.3}ms", timer.last_time_ms());
    }

    let average = timer
      .avg_time_ms()
      .context("Averaging the sleep cycles")?;

    info!("Average sleep took {average:.3}ms over {} cycles", timer.cycle_count());

    Ok(())
  }

  fn timed_work() -> anyhow::Result<()> {
    let mut timer = Timer::new();

    let sum = timer.measure(|| (0..5_000_000u64).fold(0u64, |acc, x| acc.wrapping_add(x * x)));

    info!("Summed squares to {sum}");
    info!("{timer}");

    timer.reset();

    match timer.avg_time_ms() {
      Ok(average) => info!("Average after reset is {average:.3}ms"),
      Err(error) => info!("After reset: {error}"),
    }

    Ok(())
  }
}
