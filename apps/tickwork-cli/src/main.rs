use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use glam::Vec3;
use tickwork_timer::{Clock, ManualClock, MonotonicClock, Timer, TimerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tickwork-cli", about = "Drive and inspect the fixed-step timer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML timer config (ticks_per_second, time_scale)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the loaded config.
#[derive(clap::Args)]
struct RateArgs {
    /// Simulation ticks per second
    #[arg(long)]
    tps: Option<f64>,
    /// Time scale (0 pauses)
    #[arg(long)]
    scale: Option<f64>,
    /// Print frame stats as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and timer limits
    Info,
    /// Run a real-time loop on the monotonic clock
    Run {
        /// Wall-clock seconds to run for
        #[arg(short, long, default_value = "2.0")]
        seconds: f64,
        /// Sleep between frames, in milliseconds
        #[arg(long, default_value = "4")]
        frame_ms: u64,
        #[command(flatten)]
        rate: RateArgs,
    },
    /// Feed scripted frame deltas through a manual clock
    Simulate {
        /// Comma-separated real-time deltas in seconds, e.g. 0.05,0.05,-1,10
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        deltas: Vec<f64>,
        #[command(flatten)]
        rate: RateArgs,
    },
}

fn resolve_config(path: Option<&PathBuf>, rate: &RateArgs) -> anyhow::Result<TimerConfig> {
    let mut config = match path {
        Some(p) => TimerConfig::load(p)?,
        None => TimerConfig::default(),
    };
    if let Some(tps) = rate.tps {
        config.ticks_per_second = tps;
    }
    if let Some(scale) = rate.scale {
        config.time_scale = scale;
    }
    config.validate()?;
    Ok(config)
}

/// A point moving at constant velocity, stepped once per tick.
struct Mover {
    previous: Vec3,
    current: Vec3,
    velocity: Vec3,
}

impl Mover {
    fn new(velocity: Vec3) -> Self {
        Self {
            previous: Vec3::ZERO,
            current: Vec3::ZERO,
            velocity,
        }
    }

    fn step(&mut self, dt: f32) {
        self.previous = self.current;
        self.current += self.velocity * dt;
    }

    fn render_position(&self, alpha: f64) -> Vec3 {
        self.previous.lerp(self.current, alpha as f32)
    }
}

fn run_frame<C: Clock>(timer: &mut Timer<C>, mover: &mut Mover) -> Vec3 {
    timer.advance();
    let dt = timer.tick_duration() as f32;
    for _ in 0..timer.ticks_this_frame() {
        mover.step(dt);
    }
    mover.render_position(timer.interpolation())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("tickwork-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "max ticks per update: {}",
                Timer::<MonotonicClock>::MAX_TICKS_PER_UPDATE
            );
            println!(
                "max elapsed seconds per update: {}",
                Timer::<MonotonicClock>::MAX_ELAPSED_SECONDS
            );
            let config = TimerConfig::default();
            println!(
                "default config: tps={}, scale={}",
                config.ticks_per_second, config.time_scale
            );
        }
        Commands::Run {
            seconds,
            frame_ms,
            rate,
        } => {
            let config = resolve_config(cli.config.as_ref(), &rate)?;
            tracing::info!(
                tps = config.ticks_per_second,
                scale = config.time_scale,
                seconds,
                "running real-time loop"
            );

            let mut timer = Timer::from_config(&config, MonotonicClock::new())?;
            let mut mover = Mover::new(Vec3::new(1.0, 0.0, 0.5));
            let pause = Duration::from_millis(frame_ms);
            let start = timer.current_time();
            let mut position = Vec3::ZERO;

            while timer.current_time() - start < seconds {
                std::thread::sleep(pause);
                position = run_frame(&mut timer, &mut mover);
                tracing::debug!(
                    ticks = timer.ticks_this_frame(),
                    alpha = timer.interpolation(),
                    fps = timer.fps(),
                    "frame"
                );
            }

            if rate.json {
                println!("{}", serde_json::to_string_pretty(&timer.stats())?);
            } else {
                let wall = timer.current_time() - start;
                println!(
                    "Frames: {}, ticks: {}, wall: {:.3}s",
                    timer.frames(),
                    timer.total_ticks(),
                    wall
                );
                println!(
                    "Average fps: {:.1}, ticks/s: {:.1}, dropped: {:.3}s",
                    timer.frames() as f64 / wall,
                    timer.total_ticks() as f64 / wall,
                    timer.dropped_seconds()
                );
                println!(
                    "Rendered position: ({:.3}, {:.3}, {:.3})",
                    position.x, position.y, position.z
                );
            }
        }
        Commands::Simulate { deltas, rate } => {
            let config = resolve_config(cli.config.as_ref(), &rate)?;
            let clock = ManualClock::new();
            let mut timer = Timer::from_config(&config, clock.clone())?;

            if !rate.json {
                println!(
                    "{:>5} {:>10} {:>6} {:>8} {:>10}",
                    "frame", "delta", "ticks", "alpha", "fps"
                );
            }
            for delta in deltas {
                clock.advance(delta);
                timer.advance();
                if rate.json {
                    println!("{}", serde_json::to_string(&timer.stats())?);
                } else {
                    println!(
                        "{:>5} {:>10.4} {:>6} {:>8.4} {:>10.2}",
                        timer.frames(),
                        delta,
                        timer.ticks_this_frame(),
                        timer.interpolation(),
                        timer.fps()
                    );
                }
            }
            if !rate.json {
                println!(
                    "Total ticks: {}, dropped: {:.3}s",
                    timer.total_ticks(),
                    timer.dropped_seconds()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_negative_deltas() {
        let cli = Cli::try_parse_from([
            "tickwork-cli",
            "simulate",
            "--deltas",
            "0.05,-1,10",
            "--tps",
            "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate { deltas, rate } => {
                assert_eq!(deltas, vec![0.05, -1.0, 10.0]);
                assert_eq!(rate.tps, Some(20.0));
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn overrides_replace_defaults() {
        let rate = RateArgs {
            tps: Some(30.0),
            scale: Some(0.0),
            json: false,
        };
        let config = resolve_config(None, &rate).unwrap();
        assert_eq!(config.ticks_per_second, 30.0);
        assert_eq!(config.time_scale, 0.0);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let rate = RateArgs {
            tps: Some(-5.0),
            scale: None,
            json: false,
        };
        assert!(resolve_config(None, &rate).is_err());
    }

    #[test]
    fn mover_interpolates_between_ticks() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(4.0, clock.clone()).unwrap();
        let mut mover = Mover::new(Vec3::new(4.0, 0.0, 0.0));

        clock.advance(0.375);
        let pos = run_frame(&mut timer, &mut mover);
        // One tick moves 1.0; half way into the next.
        assert_eq!(mover.current, Vec3::new(1.0, 0.0, 0.0));
        assert!((pos.x - 0.5).abs() < 1e-6);
    }
}
