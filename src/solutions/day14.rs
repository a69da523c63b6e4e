use anyhow::{ensure, Context, Result};
use rustc_hash::FxHashSet;

type Point = (i32, i32);

const SOURCE: Point = (500, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Floor {
    /// Sand below the lowest rock falls forever.
    Abyss,
    /// An endless floor two below the lowest rock.
    Solid,
}

#[derive(Debug, Clone)]
struct Cave {
    blocked: FxHashSet<Point>,
    lowest_rock: i32,
}

fn parse_point(s: &str) -> Result<Point> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("malformed point {:?}", s))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

impl Cave {
    fn parse(input: &str) -> Result<Self> {
        let mut blocked = FxHashSet::default();
        for line in input.lines() {
            let points = line
                .split(" -> ")
                .map(parse_point)
                .collect::<Result<Vec<_>>>()?;
            for segment in points.windows(2) {
                let ((x1, y1), (x2, y2)) = (segment[0], segment[1]);
                ensure!(x1 == x2 || y1 == y2, "diagonal rock segment in {:?}", line);
                for x in x1.min(x2)..=x1.max(x2) {
                    for y in y1.min(y2)..=y1.max(y2) {
                        blocked.insert((x, y));
                    }
                }
            }
            if let [single] = points[..] {
                blocked.insert(single);
            }
        }

        let lowest_rock = blocked
            .iter()
            .map(|&(_, y)| y)
            .max()
            .context("no rock in the cave")?;
        Ok(Self {
            blocked,
            lowest_rock,
        })
    }

    /// Drops one unit of sand from the source and returns where it rests.
    fn drop_sand(&mut self, floor: Floor) -> Option<Point> {
        if self.blocked.contains(&SOURCE) {
            return None;
        }

        let (mut x, mut y) = SOURCE;
        loop {
            match floor {
                Floor::Abyss if y > self.lowest_rock => return None,
                Floor::Solid if y + 1 == self.lowest_rock + 2 => break,
                _ => {}
            }
            let next = [(x, y + 1), (x - 1, y + 1), (x + 1, y + 1)]
                .into_iter()
                .find(|point| !self.blocked.contains(point));
            match next {
                Some(point) => (x, y) = point,
                None => break,
            }
        }

        self.blocked.insert((x, y));
        Some((x, y))
    }

    /// Units of sand that come to rest until sand flows away or the source is blocked.
    fn fill(mut self, floor: Floor) -> usize {
        let mut units = 0;
        while let Some(rest) = self.drop_sand(floor) {
            units += 1;
            if rest == SOURCE {
                break;
            }
        }
        units
    }
}

pub fn day14(input: &str) -> Result<(usize, usize)> {
    let cave = Cave::parse(input)?;
    Ok((cave.clone().fill(Floor::Abyss), cave.fill(Floor::Solid)))
}
