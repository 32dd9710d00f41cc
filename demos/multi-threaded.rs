use hires_timer::{Timer, MICROS_PER_MILLI};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
  let handles: Vec<_> = (1..=4u64)
    .map(|worker| {
      thread::spawn(move || {
        let mut timer = Timer::new();

        for _ in 0..3 {
          timer.measure(|| thread::sleep(Duration::from_millis(5 * worker)));
        }

        timer
      })
    })
    .collect();

  let mut total_micros = 0;
  let mut cycles = 0;

  for (worker, handle) in handles.into_iter().enumerate() {
    let timer = handle
      .join()
      .map_err(|_| anyhow::anyhow!("Worker {worker} panicked."))?;

    println!("Worker {worker}: {timer}");

    total_micros += timer.total_elapsed_micros();
    cycles += timer.cycle_count();
  }

  println!(
    "Across all workers: {:.3}ms per cycle",
    total_micros as f64 / MICROS_PER_MILLI / cycles as f64
  );

  Ok(())
}
