//! Command-line configuration.

use std::path::PathBuf;

pub const DEFAULT_FPS: u32 = 60;

pub struct Args {
    /// Target frames (and updates) per second.
    pub fps: u32,
    /// Where the high-score table is persisted.
    pub scores: PathBuf,
    /// Seed for the random number generator; random when absent.
    pub seed: Option<u64>,
}

impl Args {
    /// The update period in nanoseconds derived from the FPS target.
    pub fn period_ns(&self) -> u64 {
        1_000_000_000 / self.fps as u64
    }
}

fn default_scores_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".rage_invaders_scores")
}

pub fn parse() -> Args {
    let mut args = Args {
        fps: DEFAULT_FPS,
        scores: default_scores_path(),
        seed: None,
    };
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fps" | "-f" => {
                let value = iter.next().unwrap_or_else(|| {
                    eprintln!("Error: --fps requires a value");
                    std::process::exit(1);
                });
                args.fps = match value.parse::<u32>() {
                    Ok(fps) if fps > 0 => fps,
                    _ => {
                        eprintln!("Error: --fps must be a positive integer");
                        std::process::exit(1);
                    }
                };
            }
            "--scores" => {
                if let Some(value) = iter.next() {
                    args.scores = PathBuf::from(value);
                } else {
                    eprintln!("Error: --scores requires a path");
                    std::process::exit(1);
                }
            }
            "--seed" | "-s" => {
                if let Some(value) = iter.next() {
                    args.seed = Some(
                        value
                            .parse::<u64>()
                            .expect("seed must be a valid integer"),
                    );
                } else {
                    eprintln!("Error: --seed requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Usage: rage_invaders [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --fps <INT>     Target frames per second (default {DEFAULT_FPS})");
                println!("      --scores <PATH> High-score file location");
                println!("  -s, --seed <INT>    Seed for the random number generator");
                println!("  -h, --help          Print help");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    args
}
