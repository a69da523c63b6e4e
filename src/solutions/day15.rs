use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashSet;

const ROW: i64 = 2_000_000;
const SEARCH_LIMIT: i64 = 4_000_000;

type Point = (i64, i64);

struct Sensor {
    position: Point,
    beacon: Point,
    /// Manhattan distance to the closest beacon.
    radius: i64,
}

fn manhattan(a: Point, b: Point) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

fn parse_sensors(input: &str) -> Result<Vec<Sensor>> {
    let re = Regex::new(
        r"^Sensor at x=(-?[0-9]+), y=(-?[0-9]+): closest beacon is at x=(-?[0-9]+), y=(-?[0-9]+)$",
    )?;
    input
        .lines()
        .map(|line| -> Result<Sensor> {
            let caps = re
                .captures(line)
                .with_context(|| format!("malformed sensor report {:?}", line))?;
            let position: Point = (caps[1].parse()?, caps[2].parse()?);
            let beacon: Point = (caps[3].parse()?, caps[4].parse()?);
            Ok(Sensor {
                position,
                beacon,
                radius: manhattan(position, beacon),
            })
        })
        .collect()
}

/// Inclusive x spans covered on row `y`, sorted and merged.
fn coverage(sensors: &[Sensor], y: i64) -> Vec<(i64, i64)> {
    let mut spans: Vec<(i64, i64)> = sensors
        .iter()
        .filter_map(|sensor| {
            let reach = sensor.radius - (sensor.position.1 - y).abs();
            (reach >= 0).then(|| (sensor.position.0 - reach, sensor.position.0 + reach))
        })
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 + 1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Cells on row `y` where no beacon can be.
fn excluded_on_row(sensors: &[Sensor], y: i64) -> usize {
    let covered: i64 = coverage(sensors, y)
        .iter()
        .map(|(start, end)| end - start + 1)
        .sum();
    let beacons: FxHashSet<Point> = sensors
        .iter()
        .map(|sensor| sensor.beacon)
        .filter(|beacon| beacon.1 == y)
        .collect();
    covered as usize - beacons.len()
}

/// The single cell within `0..=limit` on both axes no sensor covers.
fn distress_beacon(sensors: &[Sensor], limit: i64) -> Option<Point> {
    (0..=limit).into_par_iter().find_map_any(|y| {
        let mut x: i64 = 0;
        for (start, end) in coverage(sensors, y) {
            if start > x {
                break;
            }
            x = x.max(end + 1);
        }
        (x <= limit).then_some((x, y))
    })
}

fn tuning_frequency((x, y): Point) -> i64 {
    x * 4_000_000 + y
}

fn scan(input: &str, row: i64, limit: i64) -> Result<(usize, i64)> {
    let sensors = parse_sensors(input)?;
    let beacon = distress_beacon(&sensors, limit).context("no uncovered cell in the search area")?;
    Ok((excluded_on_row(&sensors, row), tuning_frequency(beacon)))
}

pub fn day15(input: &str) -> Result<(usize, i64)> {
    scan(input, ROW, SEARCH_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Sensor at x=2, y=18: closest beacon is at x=-2, y=15
        Sensor at x=9, y=16: closest beacon is at x=10, y=16
        Sensor at x=13, y=2: closest beacon is at x=15, y=3
        Sensor at x=12, y=14: closest beacon is at x=10, y=16
        Sensor at x=10, y=20: closest beacon is at x=10, y=16
        Sensor at x=14, y=17: closest beacon is at x=10, y=16
        Sensor at x=8, y=7: closest beacon is at x=2, y=10
        Sensor at x=2, y=0: closest beacon is at x=2, y=10
        Sensor at x=0, y=11: closest beacon is at x=2, y=10
        Sensor at x=20, y=14: closest beacon is at x=25, y=17
        Sensor at x=17, y=20: closest beacon is at x=21, y=22
        Sensor at x=16, y=7: closest beacon is at x=15, y=3
        Sensor at x=14, y=3: closest beacon is at x=15, y=3
        Sensor at x=20, y=1: closest beacon is at x=15, y=3
    "};

    #[test]
    fn test_day15() -> Result<()> {
        assert_eq!(scan(EXAMPLE, 10, 20)?, (26, 56000011));
        Ok(())
    }

    #[test]
    fn test_coverage_merges_touching_spans() -> Result<()> {
        let sensors = parse_sensors(indoc! {"
            Sensor at x=0, y=0: closest beacon is at x=2, y=0
            Sensor at x=4, y=0: closest beacon is at x=5, y=0
        "})?;
        assert_eq!(coverage(&sensors, 0), [(-2, 5)]);
        assert_eq!(coverage(&sensors, 2), [(0, 0)]);
        assert_eq!(excluded_on_row(&sensors, 0), 6);
        Ok(())
    }

    #[test]
    fn test_malformed_report() {
        assert!(parse_sensors("Sensor at x=2, y=18: beacon at x=-2, y=15\n").is_err());
    }
}
