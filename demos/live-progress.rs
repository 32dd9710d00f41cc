use hires_timer::Timer;
use std::thread;
use std::time::Duration;

fn main() {
  env_logger::init();

  let mut timer = Timer::new();

  timer.start();

  for step in 1..=5 {
    thread::sleep(Duration::from_millis(50));

    println!(
      "Step {step}/5 running for {:.1}ms",
      timer.time_since_last_start_ms()
    );
  }

  timer.stop();

  println!("Finished in {:.1}ms", timer.last_time_ms());
}
