use std::fmt;

use anyhow::{bail, ensure, Context, Result};

const SAMPLE_CYCLES: [usize; 6] = [20, 60, 100, 140, 180, 220];
const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Noop,
    Addx(i32),
}

impl Instruction {
    fn cycles(self) -> usize {
        match self {
            Instruction::Noop => 1,
            Instruction::Addx(_) => 2,
        }
    }
}

fn parse_program(input: &str) -> Result<Vec<Instruction>> {
    input
        .lines()
        .map(|line| -> Result<Instruction> {
            match line.split_once(' ') {
                None if line == "noop" => Ok(Instruction::Noop),
                Some(("addx", value)) => Ok(Instruction::Addx(
                    value
                        .parse::<i32>()
                        .with_context(|| format!("invalid addx operand in {:?}", line))?,
                )),
                _ => bail!("unknown instruction {:?}", line),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tick {
    cycle: usize,
    /// Value of X during the cycle.
    x: i32,
}

/// Runs a program one cycle at a time. Effects of an instruction apply at
/// the end of its last cycle.
struct Cpu<I> {
    program: I,
    x: i32,
    cycle: usize,
    /// The instruction in flight and its remaining cycles.
    current: Option<(Instruction, usize)>,
}

impl<I: Iterator<Item = Instruction>> Cpu<I> {
    fn new(program: I) -> Self {
        Self {
            program,
            x: 1,
            cycle: 0,
            current: None,
        }
    }
}

impl<I: Iterator<Item = Instruction>> Iterator for Cpu<I> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let (instruction, remaining) = match self.current.take() {
            Some(current) => current,
            None => {
                let instruction = self.program.next()?;
                (instruction, instruction.cycles())
            }
        };

        self.cycle += 1;
        let tick = Tick {
            cycle: self.cycle,
            x: self.x,
        };

        if remaining > 1 {
            self.current = Some((instruction, remaining - 1));
        } else if let Instruction::Addx(value) = instruction {
            self.x += value;
        }
        Some(tick)
    }
}

/// CRT image. Every row is written on its own line, starting with a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lit: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Screen {
    fn draw(ticks: impl IntoIterator<Item = Tick>) -> Self {
        let mut lit = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];
        for tick in ticks {
            let (row, col) = ((tick.cycle - 1) / SCREEN_WIDTH, (tick.cycle - 1) % SCREEN_WIDTH);
            if row >= SCREEN_HEIGHT {
                break;
            }
            lit[row][col] = (col as i32 - tick.x).abs() <= 1;
        }
        Self { lit }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.lit {
            writeln!(f)?;
            for &pixel in row {
                f.write_str(if pixel { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

pub fn day10(input: &str) -> Result<(i32, Screen)> {
    let program = parse_program(input)?;

    let samples: Vec<Tick> = Cpu::new(program.iter().copied())
        .filter(|tick| SAMPLE_CYCLES.contains(&tick.cycle))
        .collect();
    ensure!(
        samples.len() == SAMPLE_CYCLES.len(),
        "program halts before cycle {}",
        SAMPLE_CYCLES[samples.len()]
    );
    let strength = samples.iter().map(|tick| tick.cycle as i32 * tick.x).sum::<i32>();

    Ok((strength, Screen::draw(Cpu::new(program.into_iter()))))
}
