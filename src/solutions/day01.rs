use anyhow::{ensure, Result};
use memchr::memchr_iter;

use crate::parse_u32_from_bytes;

pub fn day1(input: &str) -> Result<(usize, usize)> {
    let bytes = input.as_bytes();
    let mut totals = Vec::new();
    let mut current = 0;
    let mut carrying = false;

    let mut start = 0;
    for end in memchr_iter(b'\n', bytes).chain([bytes.len()]) {
        let line = bytes[start..end].trim_ascii_end();
        start = end + 1;

        if line.is_empty() {
            if carrying {
                totals.push(current);
            }
            current = 0;
            carrying = false;
        } else {
            ensure!(
                line.iter().all(u8::is_ascii_digit),
                "invalid calorie count {:?}",
                String::from_utf8_lossy(line)
            );
            current += parse_u32_from_bytes(line);
            carrying = true;
        }
    }
    if carrying {
        totals.push(current);
    }
    ensure!(!totals.is_empty(), "no elves in input");

    totals.sort_unstable_by(|a, b| b.cmp(a));
    Ok((totals[0], totals.iter().take(3).sum()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day1() -> Result<()> {
        let example = indoc! {"
            1000
            2000
            3000

            4000

            5000
            6000

            7000
            8000
            9000

            10000
        "};
        assert_eq!(day1(example)?, (24000, 45000));
        assert_eq!(day1("5\n\n\n7\n")?, (7, 12));
        assert!(day1("\n\n").is_err());
        assert!(day1("12a\n").is_err());
        Ok(())
    }
}
