use anyhow::{bail, ensure, Context, Result};

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

struct Forest {
    heights: Vec<u8>,
    rows: usize,
    cols: usize,
}

/// What a tree sees when looking in one direction.
struct Sight {
    /// No tree at least as tall blocks the way to the edge.
    clear: bool,
    /// Trees seen up to and including the first blocking one.
    distance: usize,
}

impl Forest {
    fn parse(input: &str) -> Result<Self> {
        let cols = input.lines().next().context("empty forest")?.len();
        let mut heights = Vec::new();
        let mut rows = 0;
        for line in input.lines() {
            ensure!(line.len() == cols, "row {} is not {} trees wide", rows + 1, cols);
            for b in line.bytes() {
                match b {
                    b'0'..=b'9' => heights.push(b - b'0'),
                    _ => bail!("invalid tree height {:?}", b as char),
                }
            }
            rows += 1;
        }
        Ok(Self { heights, rows, cols })
    }

    fn height(&self, row: usize, col: usize) -> u8 {
        self.heights[row * self.cols + col]
    }

    fn look(&self, row: usize, col: usize, (dr, dc): (isize, isize)) -> Sight {
        let height = self.height(row, col);
        let (mut r, mut c) = (row, col);
        let mut distance = 0;
        loop {
            match (r.checked_add_signed(dr), c.checked_add_signed(dc)) {
                (Some(next_r), Some(next_c)) if next_r < self.rows && next_c < self.cols => {
                    r = next_r;
                    c = next_c;
                    distance += 1;
                    if self.height(r, c) >= height {
                        return Sight {
                            clear: false,
                            distance,
                        };
                    }
                }
                _ => {
                    return Sight {
                        clear: true,
                        distance,
                    }
                }
            }
        }
    }
}

pub fn day8(input: &str) -> Result<(usize, usize)> {
    let forest = Forest::parse(input)?;

    let mut visible = 0;
    let mut best_score: usize = 0;
    for row in 0..forest.rows {
        for col in 0..forest.cols {
            let sights = DIRECTIONS.map(|direction| forest.look(row, col, direction));
            if sights.iter().any(|sight| sight.clear) {
                visible += 1;
            }
            let score = sights.iter().map(|sight| sight.distance).product::<usize>();
            best_score = best_score.max(score);
        }
    }

    Ok((visible, best_score))
}
