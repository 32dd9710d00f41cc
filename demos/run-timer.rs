use hires_timer::Timer;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
  let mut timer = Timer::new();

  for _ in 0..5 {
    timer.start();

    thread::sleep(Duration::from_millis(10));

    timer.stop();

    println!("The last cycle took {:.3}ms", timer.last_time_ms());
  }

  // returns an error if no cycle was recorded
  let average = timer.avg_time_ms()?;

  println!("The average cycle took {average:.3}ms");

  Ok(())
}
