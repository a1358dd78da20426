use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod device;
mod parse;

mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;
mod day20;
mod day21;
mod day22;
mod day23;
mod day24;
mod day25;

type Solver = fn(u8, &str) -> Result<String>;

const DAYS: [Solver; 25] = [
    day01::solve, day02::solve, day03::solve, day04::solve, day05::solve,
    day06::solve, day07::solve, day08::solve, day09::solve, day10::solve,
    day11::solve, day12::solve, day13::solve, day14::solve, day15::solve,
    day16::solve, day17::solve, day18::solve, day19::solve, day20::solve,
    day21::solve, day22::solve, day23::solve, day24::solve, day25::solve,
];

/// Advent of Code 2018 solvers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Day number, 1 to 25
    day: usize,

    /// Puzzle part, 1 or 2; both parts when omitted
    part: Option<u8>,

    /// Read the example input `day<DAY>test<N>.in` instead of `day<DAY>.in`
    #[arg(short, long)]
    test: Option<u32>,

    /// Directory holding the puzzle inputs
    #[arg(short, long, env = "AOC2018_INPUT_DIR", default_value = ".")]
    input_dir: PathBuf,

    /// Log simulation progress
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn input_path(&self) -> PathBuf {
        let fname = match self.test {
            Some(n) => format!("day{}test{}.in", self.day, n),
            None => format!("day{}.in", self.day),
        };
        self.input_dir.join(fname)
    }
}

fn run(args: &Args) -> Result<()> {
    ensure!((1 ..= DAYS.len()).contains(&args.day), "no such day {}", args.day);
    let parts: &[u8] = match args.part {
        Some(1) => &[1],
        Some(2) => &[2],
        Some(p) => anyhow::bail!("part must be 1 or 2, got {}", p),
        None => &[1, 2],
    };

    let path = args.input_path();
    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    info!(path = %path.display(), bytes = input.len(), "loaded input");

    for &part in parts {
        let time = Instant::now();
        let answer = DAYS[args.day - 1](part, &input)
            .with_context(|| format!("solving day {} part {}", args.day, part))?;
        println!("{}", answer);
        info!(day = args.day, part, elapsed = ?time.elapsed(), "solved");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default = if args.verbose {"debug"} else {"info"};
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();

    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_path_follows_day_and_test_number() {
        let args = Args::parse_from(["aoc2018", "7", "2", "--test", "3", "--input-dir", "inputs"]);
        assert_eq!(args.input_path(), PathBuf::from("inputs/day7test3.in"));
        let args = Args::parse_from(["aoc2018", "12"]);
        assert_eq!(args.part, None);
        assert!(args.input_path().ends_with("day12.in"));
    }

    #[test]
    fn rejects_days_out_of_range() {
        let args = Args::parse_from(["aoc2018", "26"]);
        assert!(run(&args).is_err());
    }
}
