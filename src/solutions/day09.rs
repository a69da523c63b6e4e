use anyhow::{bail, Context, Result};
use nalgebra::Vector2;
use rustc_hash::FxHashSet;

type Position = Vector2<i32>;

struct Motion {
    direction: Position,
    steps: u32,
}

fn parse_motions(input: &str) -> Result<Vec<Motion>> {
    input
        .lines()
        .map(|line| -> Result<Motion> {
            let (direction, steps) = line
                .split_once(' ')
                .with_context(|| format!("malformed motion {:?}", line))?;
            let direction = match direction {
                "U" => Position::new(0, 1),
                "D" => Position::new(0, -1),
                "R" => Position::new(1, 0),
                "L" => Position::new(-1, 0),
                _ => bail!("unknown direction {:?}", direction),
            };
            let steps = steps
                .parse::<u32>()
                .with_context(|| format!("invalid step count in {:?}", line))?;
            Ok(Motion { direction, steps })
        })
        .collect()
}

struct Rope {
    knots: Vec<Position>,
}

impl Rope {
    fn new(knots: usize) -> Self {
        assert!(knots > 0, "a rope needs at least one knot");
        Self {
            knots: vec![Position::zeros(); knots],
        }
    }

    fn tail(&self) -> Position {
        self.knots[self.knots.len() - 1]
    }

    /// Moves the head one step; every knot that stops touching its
    /// predecessor moves one step towards it on each axis.
    fn step(&mut self, direction: Position) {
        self.knots[0] += direction;
        for i in 1..self.knots.len() {
            let gap = self.knots[i - 1] - self.knots[i];
            if gap.x.abs() <= 1 && gap.y.abs() <= 1 {
                break;
            }
            self.knots[i] += gap.map(i32::signum);
        }
    }
}

/// Distinct positions visited by the tail of a rope with `knots` knots.
fn tail_positions(motions: &[Motion], knots: usize) -> usize {
    let mut rope = Rope::new(knots);
    let mut visited = FxHashSet::default();
    visited.insert(rope.tail());
    for motion in motions {
        for _ in 0..motion.steps {
            rope.step(motion.direction);
            visited.insert(rope.tail());
        }
    }
    visited.len()
}

pub fn day9(input: &str) -> Result<(usize, usize)> {
    let motions = parse_motions(input)?;
    Ok((tail_positions(&motions, 2), tail_positions(&motions, 10)))
}
