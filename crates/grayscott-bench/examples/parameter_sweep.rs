//! Run a small feed/kill sweep and stream frames to a consumer thread.
//!
//! Each run uses a ramped parameter field, so one grid covers a band of
//! (feed, kill) space. The consumer stands in for a renderer: it only
//! records the mean V concentration of each frame.

use std::io::Write;

use grayscott_bench::ramp_profile;
use grayscott_engine::{ChannelSink, OutputSpecies, Progress, ProgressReporter, Simulation};

struct Console;

impl ProgressReporter for Console {
    fn report(&mut self, progress: &Progress) {
        print!("\r {progress}");
        let _ = std::io::stdout().flush();
    }
}

fn main() {
    println!("=== Gray-Scott parameter sweep ===\n");

    for (feed, kill) in [(0.002, 0.031), (0.01, 0.045)] {
        let mut config = ramp_profile(128, feed, kill);
        config.timesteps = 2_001;
        config.out_freq = 250;
        config.output = OutputSpecies::V;
        println!("Currently running f={feed}, k={kill} -> {}", config.run_label());

        let (sink, rx) = ChannelSink::bounded(4);
        let consumer = std::thread::spawn(move || {
            rx.iter()
                .map(|s| {
                    let cells = s.field.len() as f64;
                    (s.frame, s.field.as_slice().iter().sum::<f64>() / cells)
                })
                .collect::<Vec<_>>()
        });

        let mut sim = Simulation::new(config).unwrap();
        let summary = sim.run(sink, Console).unwrap();
        let frames = consumer.join().unwrap();

        println!(
            "\n  {} steps in {:.2}s ({:.1} us/step)",
            summary.timesteps_run,
            summary.elapsed.as_secs_f64(),
            summary.metrics.mean_step_us().unwrap_or(0.0)
        );
        for (frame, mean_v) in frames {
            println!("  frame {frame:>3}: mean V = {mean_v:.5}");
        }
        println!();
    }
}
