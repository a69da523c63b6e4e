use anyhow::Result;

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

pub use day01::day1;
pub use day02::day2;
pub use day03::day3;
pub use day04::day4;
pub use day05::day5;
pub use day06::day6;
pub use day07::day7;
pub use day08::day8;
pub use day09::day9;
pub use day10::{day10, Screen};
pub use day11::day11;
pub use day12::day12;
pub use day13::day13;
pub use day14::day14;
pub use day15::day15;

/// A day's solution with both answers rendered to text.
pub type Solution = fn(&str) -> Result<(String, String)>;

macro_rules! erased {
    ($($day:ident),* $(,)?) => {
        [$(|input: &str| -> Result<(String, String)> {
            let (part1, part2) = $day(input)?;
            Ok((part1.to_string(), part2.to_string()))
        }),*]
    };
}

/// Every solved day; entry `i` solves day `i + 1`.
pub const ALL_SOLUTIONS: [Solution; 15] = erased![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14,
    day15,
];

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_all_solutions() -> Result<()> {
        let example = indoc! {"
            Sabqponm
            abcryxxl
            accszExk
            acctuvwj
            abdefghi
        "};
        assert_eq!(day12(example)?, (31, 29));
        assert_eq!(
            ALL_SOLUTIONS[11](example)?,
            ("31".to_string(), "29".to_string())
        );
        assert_eq!(
            ALL_SOLUTIONS[5]("mjqjpqmgbljsphdztnvjfqwrcgsmlb")?,
            ("7".to_string(), "19".to_string())
        );
        assert!(ALL_SOLUTIONS[0]("").is_err());
        Ok(())
    }
}
