//! Shortest hikes across an elevation map.
//!
//! A [`Heightmap`] stores one elevation per [`Cell`]. Moving between two
//! orthogonally adjacent cells is legal when the climb is at most
//! [`MAX_CLIMB`]; descending is never restricted, so legality is directional.
//!
//! [`Heightmap::shortest_path`] is a breadth-first search. Every discovered
//! cell remembers the cell it was discovered from, which doubles as the
//! visited set, and the [`Path`] is rebuilt by walking those predecessors back
//! once the destination leaves the frontier.
//!
//! Searching from many sources at once is available in two flavours:
//!
//! - [`Heightmap::fewest_steps_from_any`] runs one independent search per
//!   source cell in parallel over the shared, read-only map.
//! - [`Heightmap::distances_to`] runs a single search backwards from the goal
//!   and answers the step count for every cell.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use log::{debug, trace};
use rayon::prelude::*;

pub type Elevation = u8;

/// Elevation of `a` and of the start marker `S`.
pub const LOWEST: Elevation = 0;
/// Elevation of `z` and of the goal marker `E`.
pub const HIGHEST: Elevation = 25;
/// The largest climb a single step may make.
pub const MAX_CLIMB: Elevation = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.row, self.col)
    }
}

/// A rectangular grid of elevations, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    elevations: Vec<Elevation>,
    rows: usize,
    cols: usize,
}

impl Heightmap {
    /// Builds a heightmap from rows of elevations. Fails on an empty grid or
    /// rows of unequal length.
    pub fn new(rows: Vec<Vec<Elevation>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            bail!("heightmap must contain at least one cell");
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                bail!("row {} has {} cells, expected {}", i + 1, row.len(), cols);
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            elevations: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Elevation of `cell`.
    ///
    /// # Panics
    ///
    /// If `cell` lies outside the map. Callers are expected to stay in bounds,
    /// so this is a bug rather than a recoverable condition.
    pub fn elevation(&self, cell: Cell) -> Elevation {
        assert!(
            self.contains(cell),
            "cell {} lies outside the {}x{} heightmap",
            cell,
            self.rows,
            self.cols
        );
        self.elevations[self.index(cell)]
    }

    pub fn get(&self, cell: Cell) -> Option<Elevation> {
        self.contains(cell).then(|| self.elevations[self.index(cell)])
    }

    /// Neighbours of `cell` that can be entered from it with a legal step.
    ///
    /// Neighbours come in a fixed order: down, up, right, left.
    pub fn reachable_from(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.climbable_from(cell, MAX_CLIMB)
    }

    /// Like [`Heightmap::reachable_from`], with a custom climb tolerance.
    pub fn climbable_from(
        &self,
        cell: Cell,
        max_climb: Elevation,
    ) -> impl Iterator<Item = Cell> + '_ {
        let ceiling = self.elevation(cell).saturating_add(max_climb);
        self.neighbours(cell)
            .filter(move |&next| self.elevation(next) <= ceiling)
    }

    /// Neighbours of `cell` from which a legal step leads into `cell`.
    pub fn reaching(&self, cell: Cell, max_climb: Elevation) -> impl Iterator<Item = Cell> + '_ {
        let elevation = self.elevation(cell);
        self.neighbours(cell)
            .filter(move |&prev| elevation <= self.elevation(prev).saturating_add(max_climb))
    }

    /// All cells at `target` elevation in row-major order.
    pub fn cells_with_elevation(&self, target: Elevation) -> impl Iterator<Item = Cell> + '_ {
        self.elevations
            .iter()
            .enumerate()
            .filter(move |&(_, &elevation)| elevation == target)
            .map(|(index, _)| self.cell(index))
    }

    /// Shortest legal path from `source` to `destination`, or `None` if the
    /// destination cannot be reached.
    pub fn shortest_path(&self, source: Cell, destination: Cell) -> Option<Path> {
        self.shortest_path_with(source, destination, MAX_CLIMB)
    }

    /// Like [`Heightmap::shortest_path`], with a custom climb tolerance.
    pub fn shortest_path_with(
        &self,
        source: Cell,
        destination: Cell,
        max_climb: Elevation,
    ) -> Option<Path> {
        assert!(self.contains(source), "source {} lies outside the heightmap", source);
        assert!(
            self.contains(destination),
            "destination {} lies outside the heightmap",
            destination
        );

        // Cells are marked when enqueued; the source points at itself.
        let mut came_from: Vec<Option<usize>> = vec![None; self.elevations.len()];
        let mut frontier = VecDeque::new();
        let start = self.index(source);
        came_from[start] = Some(start);
        frontier.push_back(source);

        while let Some(cell) = frontier.pop_front() {
            if cell == destination {
                let path = self.unwind(&came_from, cell);
                trace!("{} -> {}: {} steps", source, destination, path.steps());
                return Some(path);
            }

            let from = self.index(cell);
            for next in self.climbable_from(cell, max_climb) {
                let slot = &mut came_from[self.index(next)];
                if slot.is_none() {
                    *slot = Some(from);
                    frontier.push_back(next);
                }
            }
        }

        debug!("{} -> {}: no path", source, destination);
        None
    }

    /// Fewest steps from any cell at `elevation` to `goal`. Sources that cannot
    /// reach the goal are ignored; `None` if none can.
    ///
    /// Every source gets its own search, run in parallel.
    pub fn fewest_steps_from_any(&self, elevation: Elevation, goal: Cell) -> Option<usize> {
        let sources: Vec<Cell> = self.cells_with_elevation(elevation).collect();
        debug!("searching from {} cells at elevation {}", sources.len(), elevation);
        sources
            .into_par_iter()
            .filter_map(|source| self.shortest_path(source, goal))
            .map(|path| path.steps())
            .min()
    }

    /// Step counts from every cell to `goal`, computed by a single search that
    /// follows legal steps backwards.
    pub fn distances_to(&self, goal: Cell) -> DistanceMap<'_> {
        assert!(self.contains(goal), "goal {} lies outside the heightmap", goal);

        let mut steps = vec![None; self.elevations.len()];
        let mut frontier = VecDeque::new();
        steps[self.index(goal)] = Some(0);
        frontier.push_back((goal, 0));

        while let Some((cell, distance)) = frontier.pop_front() {
            for prev in self.reaching(cell, MAX_CLIMB) {
                let slot = &mut steps[self.index(prev)];
                if slot.is_none() {
                    *slot = Some(distance + 1);
                    frontier.push_back((prev, distance + 1));
                }
            }
        }

        DistanceMap { map: self, steps }
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    fn cell(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let down = (cell.row + 1 < self.rows).then(|| Cell::new(cell.row + 1, cell.col));
        let up = cell.row.checked_sub(1).map(|row| Cell::new(row, cell.col));
        let right = (cell.col + 1 < self.cols).then(|| Cell::new(cell.row, cell.col + 1));
        let left = cell.col.checked_sub(1).map(|col| Cell::new(cell.row, col));
        [down, up, right, left].into_iter().flatten()
    }

    fn unwind(&self, came_from: &[Option<usize>], destination: Cell) -> Path {
        let mut cells = vec![destination];
        let mut index = self.index(destination);
        while let Some(prev) = came_from[index].filter(|&prev| prev != index) {
            cells.push(self.cell(prev));
            index = prev;
        }
        cells.reverse();
        Path(cells)
    }
}

/// Result of [`Heightmap::distances_to`].
#[derive(Debug, Clone)]
pub struct DistanceMap<'a> {
    map: &'a Heightmap,
    steps: Vec<Option<usize>>,
}

impl DistanceMap<'_> {
    /// Steps from `cell` to the goal, `None` if the goal is out of reach.
    pub fn steps_from(&self, cell: Cell) -> Option<usize> {
        self.map
            .contains(cell)
            .then(|| self.steps[self.map.index(cell)])
            .flatten()
    }

    /// Fewest steps to the goal from any cell at `elevation`.
    pub fn fewest_from_elevation(&self, elevation: Elevation) -> Option<usize> {
        self.map
            .cells_with_elevation(elevation)
            .filter_map(|cell| self.steps_from(cell))
            .min()
    }
}

/// Cells from a source to a destination, consecutive cells joined by legal
/// steps, no cell repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Cell>);

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }
}

/// The parsed puzzle: a heightmap plus the start (`S`) and goal (`E`) cells.
#[derive(Debug, Clone)]
pub struct HikingArea {
    pub map: Heightmap,
    pub start: Cell,
    pub goal: Cell,
}

impl FromStr for HikingArea {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut start = None;
        let mut goal = None;

        let rows = s
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.bytes()
                    .enumerate()
                    .map(|(col, b)| -> Result<Elevation> {
                        let cell = Cell::new(row, col);
                        match b {
                            b'a'..=b'z' => Ok(b - b'a'),
                            b'S' => mark(&mut start, cell, "start").map(|_| LOWEST),
                            b'E' => mark(&mut goal, cell, "goal").map(|_| HIGHEST),
                            _ => bail!("invalid elevation {:?} at {}", b as char, cell),
                        }
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            map: Heightmap::new(rows)?,
            start: start.context("heightmap has no start marker `S`")?,
            goal: goal.context("heightmap has no goal marker `E`")?,
        })
    }
}

fn mark(slot: &mut Option<Cell>, cell: Cell, what: &str) -> Result<()> {
    if let Some(first) = slot.replace(cell) {
        bail!("second {} marker at {} (first at {})", what, cell, first);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Sabqponm
        abcryxxl
        accszExk
        acctuvwj
        abdefghi
    "};

    fn assert_legal(map: &Heightmap, path: &Path) {
        let cells = path.cells();
        for pair in cells.windows(2) {
            assert!(map.reachable_from(pair[0]).any(|next| next == pair[1]));
        }
        let mut sorted = cells.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), cells.len(), "path repeats a cell");
    }

    /// Every 3x3 grid with elevations 0..=2.
    fn small_grids() -> impl Iterator<Item = Heightmap> {
        (0..3usize.pow(9)).map(|code| {
            let mut rows = vec![vec![0; 3]; 3];
            let mut rest = code;
            for elevation in rows.iter_mut().flatten() {
                *elevation = (rest % 3) as Elevation;
                rest /= 3;
            }
            Heightmap::new(rows).unwrap()
        })
    }

    /// Fewest steps from `source` to every cell, found by trying every simple path.
    fn brute_force(map: &Heightmap, source: Cell, max_climb: Elevation) -> Vec<Option<usize>> {
        fn explore(
            map: &Heightmap,
            cell: Cell,
            depth: usize,
            max_climb: Elevation,
            on_path: &mut [bool],
            best: &mut [Option<usize>],
        ) {
            let i = map.index(cell);
            best[i] = Some(best[i].map_or(depth, |b| b.min(depth)));
            on_path[i] = true;
            for next in map.climbable_from(cell, max_climb) {
                if !on_path[map.index(next)] {
                    explore(map, next, depth + 1, max_climb, on_path, best);
                }
            }
            on_path[i] = false;
        }

        let cells = map.rows() * map.cols();
        let mut on_path = vec![false; cells];
        let mut best = vec![None; cells];
        explore(map, source, 0, max_climb, &mut on_path, &mut best);
        best
    }

    #[test]
    fn test_example() -> Result<()> {
        let area: HikingArea = EXAMPLE.parse()?;
        assert_eq!(area.start, Cell::new(0, 0));
        assert_eq!(area.goal, Cell::new(2, 5));

        let path = area.map.shortest_path(area.start, area.goal).unwrap();
        assert_eq!(path.steps(), 31);
        assert_eq!(path.cells().first(), Some(&area.start));
        assert_eq!(path.cells().last(), Some(&area.goal));
        assert_legal(&area.map, &path);

        assert_eq!(area.map.fewest_steps_from_any(LOWEST, area.goal), Some(29));
        let distances = area.map.distances_to(area.goal);
        assert_eq!(distances.steps_from(area.start), Some(31));
        assert_eq!(distances.fewest_from_elevation(LOWEST), Some(29));
        Ok(())
    }

    #[test]
    fn test_self_path() -> Result<()> {
        let area: HikingArea = EXAMPLE.parse()?;
        for cell in [area.start, area.goal, Cell::new(4, 7)] {
            let path = area.map.shortest_path(cell, cell).unwrap();
            assert_eq!(path.steps(), 0);
            assert_eq!(path.cells(), &[cell]);
        }
        Ok(())
    }

    #[test]
    fn test_neighbour_order() -> Result<()> {
        let map = Heightmap::new(vec![vec![0; 3]; 3])?;
        let neighbours: Vec<_> = map.reachable_from(Cell::new(1, 1)).collect();
        assert_eq!(
            neighbours,
            [
                Cell::new(2, 1),
                Cell::new(0, 1),
                Cell::new(1, 2),
                Cell::new(1, 0)
            ]
        );
        let corner: Vec<_> = map.reachable_from(Cell::new(0, 0)).collect();
        assert_eq!(corner, [Cell::new(1, 0), Cell::new(0, 1)]);
        Ok(())
    }

    #[test]
    fn test_climb_is_directional() -> Result<()> {
        let map = Heightmap::new(vec![vec![0, 2]])?;
        let (low, high) = (Cell::new(0, 0), Cell::new(0, 1));
        assert_eq!(map.shortest_path(low, high), None);
        assert_eq!(map.shortest_path(high, low).map(|p| p.steps()), Some(1));
        Ok(())
    }

    #[test]
    fn test_climb_forces_detour() -> Result<()> {
        let map = Heightmap::new(vec![vec![0, 2], vec![1, 2]])?;
        let (low, high) = (Cell::new(0, 0), Cell::new(0, 1));
        assert_eq!(map.shortest_path(high, low).map(|p| p.steps()), Some(1));
        assert_eq!(map.shortest_path(low, high).map(|p| p.steps()), Some(3));
        Ok(())
    }

    #[test]
    fn test_unreachable_goal() -> Result<()> {
        let area: HikingArea = indoc! {"
            Szzzz
            azEzz
            azzzz
        "}
        .parse()?;
        assert_eq!(area.map.shortest_path(area.start, area.goal), None);
        assert_eq!(area.map.fewest_steps_from_any(LOWEST, area.goal), None);
        assert_eq!(area.map.distances_to(area.goal).steps_from(area.start), None);
        Ok(())
    }

    #[test]
    fn test_elevations() -> Result<()> {
        let area: HikingArea = "SbE\nazy\n".parse()?;
        assert_eq!(area.map.elevation(Cell::new(0, 0)), 0);
        assert_eq!(area.map.elevation(Cell::new(0, 1)), 1);
        assert_eq!(area.map.elevation(Cell::new(0, 2)), 25);
        assert_eq!(area.map.get(Cell::new(1, 2)), Some(24));
        assert_eq!(area.map.get(Cell::new(2, 0)), None);
        let low: Vec<_> = area.map.cells_with_elevation(LOWEST).collect();
        assert_eq!(low, [Cell::new(0, 0), Cell::new(1, 0)]);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_elevation_out_of_bounds() {
        let map = Heightmap::new(vec![vec![0, 1]]).unwrap();
        map.elevation(Cell::new(1, 0));
    }

    #[test]
    fn test_malformed_input() {
        for input in [
            "abc\nabE\n",
            "Sbc\nabc\n",
            "Sbc\nab\nabE\n",
            "SbE\nab!\n",
            "SbE\nSbc\n",
            "",
        ] {
            assert!(input.parse::<HikingArea>().is_err(), "{:?}", input);
        }
    }

    #[test]
    fn test_search_is_optimal() {
        let source = Cell::new(0, 0);
        for map in small_grids() {
            let best = brute_force(&map, source, MAX_CLIMB);
            for (index, &expected) in best.iter().enumerate() {
                let path = map.shortest_path(source, map.cell(index));
                if let Some(path) = &path {
                    assert_legal(&map, path);
                }
                assert_eq!(path.map(|p| p.steps()), expected, "{:?}", map);
            }
        }
    }

    #[test]
    fn test_tighter_climb_never_shortens() {
        let source = Cell::new(0, 0);
        for map in small_grids() {
            for index in 0..9 {
                let destination = map.cell(index);
                let steps = |climb| {
                    map.shortest_path_with(source, destination, climb)
                        .map(|p| p.steps())
                };
                for climb in 1..=2 {
                    if let Some(tight) = steps(climb - 1) {
                        let loose = steps(climb).unwrap();
                        assert!(loose <= tight, "{:?}", map);
                    }
                }
            }
        }
    }

    #[test]
    fn test_backward_search_agrees() {
        let goal = Cell::new(2, 2);
        for map in small_grids().step_by(7) {
            let distances = map.distances_to(goal);
            for index in 0..9 {
                let cell = map.cell(index);
                assert_eq!(
                    distances.steps_from(cell),
                    map.shortest_path(cell, goal).map(|p| p.steps())
                );
            }
            assert_eq!(
                distances.fewest_from_elevation(LOWEST),
                map.fewest_steps_from_any(LOWEST, goal)
            );
        }
    }
}
