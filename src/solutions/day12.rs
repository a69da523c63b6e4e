use anyhow::{Context, Result};

use crate::heightmap::{HikingArea, LOWEST};

pub fn day12(input: &str) -> Result<(usize, usize)> {
    let area: HikingArea = input.parse()?;

    let from_start = area
        .map
        .shortest_path(area.start, area.goal)
        .with_context(|| format!("no path from {} to {}", area.start, area.goal))?;
    let from_any_low = area
        .map
        .fewest_steps_from_any(LOWEST, area.goal)
        .context("no lowest cell reaches the goal")?;

    Ok((from_start.steps(), from_any_low))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day12() -> Result<()> {
        let example = indoc! {"
            Sabqponm
            abcryxxl
            accszExk
            acctuvwj
            abdefghi
        "};
        assert_eq!(day12(example)?, (31, 29));
        assert!(day12("Szz\nazE\n").is_err());
        Ok(())
    }
}
