use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{ensure, Result};
use clap::Parser;
use log::debug;

use aoc2022::{load_input, Solution, ALL_SOLUTIONS};

#[derive(Debug, Parser)]
#[command(about = "Solves Advent of Code 2022 puzzles")]
struct CliArgs {
    /// Directory holding one `<day>.txt` input per day.
    #[arg(long, default_value = "inputs")]
    inputs: PathBuf,
    /// Days to run. Runs every solved day when omitted.
    days: Vec<usize>,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let days = if args.days.is_empty() {
        (1..=ALL_SOLUTIONS.len()).collect()
    } else {
        args.days
    };
    for &n in &days {
        ensure!(
            (1..=ALL_SOLUTIONS.len()).contains(&n),
            "no solution for day {} (solved: 1-{})",
            n,
            ALL_SOLUTIONS.len()
        );
    }
    debug!("running days {:?} with inputs from {}", days, args.inputs.display());

    let mut total = Duration::default();
    for n in days {
        let input = load_input(&args.inputs, n)?;
        total += execute_day(n, ALL_SOLUTIONS[n - 1], &input)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day(n: usize, f: Solution, input: &str) -> Result<Duration> {
    println!("Day {}:", n);

    let start = Instant::now();
    let (part1, part2) = f(input)?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
