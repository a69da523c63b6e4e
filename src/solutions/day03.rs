use anyhow::{bail, ensure, Context, Result};

/// Items as a bitset indexed by priority.
fn items(contents: &[u8]) -> Result<u64> {
    contents.iter().try_fold(0u64, |set, &item| {
        let priority = match item {
            b'a'..=b'z' => item - b'a' + 1,
            b'A'..=b'Z' => item - b'A' + 27,
            _ => bail!("invalid item {:?}", item as char),
        };
        Ok(set | 1 << priority)
    })
}

fn single_priority(set: u64) -> Result<u32> {
    ensure!(set.count_ones() == 1, "expected exactly one shared item, found {}", set.count_ones());
    Ok(set.trailing_zeros())
}

pub fn day3(input: &str) -> Result<(u32, u32)> {
    let rucksacks: Vec<&[u8]> = input.lines().map(str::as_bytes).collect();

    let mut sum_part1 = 0;
    for (i, rucksack) in rucksacks.iter().enumerate() {
        ensure!(rucksack.len() % 2 == 0, "rucksack {} has an odd item count", i + 1);
        let (left, right) = rucksack.split_at(rucksack.len() / 2);
        sum_part1 += single_priority(items(left)? & items(right)?)
            .with_context(|| format!("rucksack {}", i + 1))?;
    }

    ensure!(rucksacks.len() % 3 == 0, "rucksacks do not split into groups of three");
    let mut sum_part2 = 0;
    for (i, group) in rucksacks.chunks_exact(3).enumerate() {
        let mut shared = u64::MAX;
        for rucksack in group {
            shared &= items(rucksack)?;
        }
        sum_part2 += single_priority(shared).with_context(|| format!("group {}", i + 1))?;
    }

    Ok((sum_part1, sum_part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day3() -> Result<()> {
        let example = indoc! {"
            vJrwpWtwJgWrhcsFMMfFFhFp
            jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
            PmmdzqPrVvPwwTWBwg
            wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
            ttgJtRGJQctTZtZT
            CrZsJsPPZsGzwwsLwLmpwMDw
        "};
        assert_eq!(day3(example)?, (157, 70));
        assert!(day3("abc\n").is_err());
        Ok(())
    }

    #[test]
    fn test_priorities() -> Result<()> {
        assert_eq!(single_priority(items(b"p")?)?, 16);
        assert_eq!(single_priority(items(b"L")?)?, 38);
        assert!(single_priority(items(b"ab")?).is_err());
        Ok(())
    }
}
