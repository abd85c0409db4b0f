use std::hint::black_box;
use std::time::Instant;

use tickwork_timer::{ManualClock, MonotonicClock, Timer};

fn bench_manual_advance(tps: f64, delta: f64, iterations: usize) {
    let clock = ManualClock::new();
    let mut timer = Timer::with_clock(tps, clock.clone()).unwrap();

    let start = Instant::now();
    for _ in 0..iterations {
        clock.advance(black_box(delta));
        timer.advance();
        black_box(timer.ticks_this_frame());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  manual advance ({tps} tps, dt={delta}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_monotonic_advance(tps: f64, iterations: usize) {
    let mut timer = Timer::with_clock(tps, MonotonicClock::new()).unwrap();

    let start = Instant::now();
    for _ in 0..iterations {
        timer.advance();
        black_box(timer.interpolation());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  monotonic advance ({tps} tps, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, ticks {}",
        timer.total_ticks()
    );
}

fn main() {
    println!("=== Timer Benchmarks ===\n");

    println!("Manual clock:");
    bench_manual_advance(60.0, 1.0 / 144.0, 1_000_000);
    bench_manual_advance(1000.0, 0.5, 1_000_000);

    println!("\nMonotonic clock:");
    bench_monotonic_advance(60.0, 1_000_000);

    println!("\n=== Done ===");
}
