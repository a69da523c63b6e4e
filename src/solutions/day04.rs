use std::ops::RangeInclusive;

use anyhow::{ensure, Context, Result};

use crate::parse_u32_from_bytes;

type Sections = RangeInclusive<usize>;

fn parse_sections(s: &str) -> Result<Sections> {
    let (start, end) = s.split_once('-').context("missing '-' in section range")?;
    for bound in [start, end] {
        ensure!(
            !bound.is_empty() && bound.bytes().all(|b| b.is_ascii_digit()),
            "invalid section id {:?}",
            bound
        );
    }
    Ok(parse_u32_from_bytes(start.as_bytes())..=parse_u32_from_bytes(end.as_bytes()))
}

fn fully_contains(outer: &Sections, inner: &Sections) -> bool {
    outer.contains(inner.start()) && outer.contains(inner.end())
}

fn overlap(a: &Sections, b: &Sections) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let mut containing = 0;
    let mut overlapping = 0;

    for line in input.lines() {
        let (first, second) = line
            .split_once(',')
            .with_context(|| format!("missing ',' in {:?}", line))?;
        let first = parse_sections(first)?;
        let second = parse_sections(second)?;

        if fully_contains(&first, &second) || fully_contains(&second, &first) {
            containing += 1;
        }
        if overlap(&first, &second) {
            overlapping += 1;
        }
    }

    Ok((containing, overlapping))
}
