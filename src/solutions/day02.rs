use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    fn score(self) -> u32 {
        match self {
            Shape::Rock => 1,
            Shape::Paper => 2,
            Shape::Scissors => 3,
        }
    }

    /// The shape this one defeats.
    fn beats(self) -> Shape {
        match self {
            Shape::Rock => Shape::Scissors,
            Shape::Paper => Shape::Rock,
            Shape::Scissors => Shape::Paper,
        }
    }

    fn beaten_by(self) -> Shape {
        match self {
            Shape::Rock => Shape::Paper,
            Shape::Paper => Shape::Scissors,
            Shape::Scissors => Shape::Rock,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    fn of(own: Shape, opponent: Shape) -> Outcome {
        if own == opponent {
            Outcome::Draw
        } else if own.beats() == opponent {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    fn score(self) -> u32 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }

    fn response_to(self, opponent: Shape) -> Shape {
        match self {
            Outcome::Loss => opponent.beats(),
            Outcome::Draw => opponent,
            Outcome::Win => opponent.beaten_by(),
        }
    }
}

fn round_score(own: Shape, opponent: Shape) -> u32 {
    own.score() + Outcome::of(own, opponent).score()
}

pub fn day2(input: &str) -> Result<(u32, u32)> {
    let mut total_part1 = 0;
    let mut total_part2 = 0;

    for line in input.lines() {
        let (opponent, column) = match line.as_bytes() {
            [opponent, b' ', column] => (*opponent, *column),
            _ => bail!("malformed strategy line {:?}", line),
        };
        let opponent = match opponent {
            b'A' => Shape::Rock,
            b'B' => Shape::Paper,
            b'C' => Shape::Scissors,
            _ => bail!("unknown opponent shape in {:?}", line),
        };
        let (own, outcome) = match column {
            b'X' => (Shape::Rock, Outcome::Loss),
            b'Y' => (Shape::Paper, Outcome::Draw),
            b'Z' => (Shape::Scissors, Outcome::Win),
            _ => bail!("unknown response in {:?}", line),
        };

        total_part1 += round_score(own, opponent);
        total_part2 += round_score(outcome.response_to(opponent), opponent);
    }

    Ok((total_part1, total_part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            A Y
            B X
            C Z
        "};
        assert_eq!(day2(example)?, (15, 12));
        assert!(day2("A W\n").is_err());
        assert!(day2("AX\n").is_err());
        Ok(())
    }
}
