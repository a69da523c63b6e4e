use anyhow::{ensure, Context, Result};
use regex::Regex;

type Stack = Vec<u8>;

#[derive(Debug, Clone, Copy)]
struct Move {
    count: usize,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone, Copy)]
enum Crane {
    /// Lifts one crate at a time.
    CrateMover9000,
    /// Lifts the whole pile at once, keeping its order.
    CrateMover9001,
}

fn parse_drawing(drawing: &str) -> Result<Vec<Stack>> {
    let mut lines = drawing.lines().rev();
    let labels = lines.next().context("missing stack labels")?;
    let n = labels.split_whitespace().count();
    ensure!(n > 0, "no stacks in drawing");

    let mut stacks = vec![Stack::new(); n];
    // Bottom to top.
    for line in lines {
        let line = line.as_bytes();
        for (i, stack) in stacks.iter_mut().enumerate() {
            match line.get(4 * i + 1) {
                Some(b' ') | None => {}
                Some(&label) => {
                    ensure!(label.is_ascii_uppercase(), "invalid crate {:?}", label as char);
                    stack.push(label);
                }
            }
        }
    }
    Ok(stacks)
}

fn parse_moves(procedure: &str, stacks: usize) -> Result<Vec<Move>> {
    let re = Regex::new(r"^move ([0-9]+) from ([0-9]+) to ([0-9]+)$")?;
    procedure
        .lines()
        .map(|line| -> Result<Move> {
            let caps = re
                .captures(line)
                .with_context(|| format!("malformed move {:?}", line))?;
            let stack = |i: usize| -> Result<usize> {
                let n: usize = caps[i].parse()?;
                ensure!((1..=stacks).contains(&n), "no stack {} in {:?}", n, line);
                Ok(n - 1)
            };
            Ok(Move {
                count: caps[1].parse()?,
                from: stack(2)?,
                to: stack(3)?,
            })
        })
        .collect()
}

fn rearrange(mut stacks: Vec<Stack>, moves: &[Move], crane: Crane) -> Result<String> {
    for m in moves {
        let source = &mut stacks[m.from];
        ensure!(
            source.len() >= m.count,
            "cannot move {} crates from stack {} holding {}",
            m.count,
            m.from + 1,
            source.len()
        );
        let lifted = source.split_off(source.len() - m.count);
        let target = &mut stacks[m.to];
        match crane {
            Crane::CrateMover9000 => target.extend(lifted.into_iter().rev()),
            Crane::CrateMover9001 => target.extend(lifted),
        }
    }

    Ok(stacks
        .iter()
        .filter_map(|stack| stack.last())
        .map(|&label| label as char)
        .collect())
}

pub fn day5(input: &str) -> Result<(String, String)> {
    let (drawing, procedure) = input
        .split_once("\n\n")
        .context("missing blank line between drawing and procedure")?;
    let stacks = parse_drawing(drawing)?;
    let moves = parse_moves(procedure, stacks.len())?;

    Ok((
        rearrange(stacks.clone(), &moves, Crane::CrateMover9000)?,
        rearrange(stacks, &moves, Crane::CrateMover9001)?,
    ))
}
