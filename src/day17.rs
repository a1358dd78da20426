use anyhow::{ensure, Result};
use tracing::debug;

use crate::parse::{fixed_ints, ParseError};

const SPRING_X: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tile {Sand, Clay, Flowing, Still}

/// `tiles[y][column(x)]`, with one spare column each side of the outermost clay.
struct Ground {tiles: Vec<Vec<Tile>>, min_x: usize, min_y: usize, max_y: usize}

impl Ground {
    fn parse(input: &str) -> Result<Ground> {
        let mut veins = vec![];
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let [fixed, lo, hi] = fixed_ints::<usize, 3>(line)?;
            ensure!(lo <= hi, "backwards range in {:?}", line);
            let vein = match line.as_bytes()[0] {
                b'x' => (fixed, fixed, lo, hi),
                b'y' => (lo, hi, fixed, fixed),
                _ => return Err(ParseError::Line(line.to_owned()).into()),
            };
            veins.push(vein);
        }
        ensure!(!veins.is_empty(), "no clay");

        let min_x = veins.iter().map(|v| v.0).min().unwrap_or(SPRING_X).min(SPRING_X);
        let max_x = veins.iter().map(|v| v.1).max().unwrap_or(SPRING_X).max(SPRING_X);
        let min_y = veins.iter().map(|v| v.2).min().unwrap_or(0);
        let max_y = veins.iter().map(|v| v.3).max().unwrap_or(0);
        let mut tiles = vec![vec![Tile::Sand; max_x - min_x + 3]; max_y + 1];
        for (x1, x2, y1, y2) in veins {
            for row in &mut tiles[y1 ..= y2] {
                for tile in &mut row[x1 + 1 - min_x ..= x2 + 1 - min_x] {*tile = Tile::Clay}
            }
        }
        Ok(Ground {tiles, min_x, min_y, max_y})
    }

    fn column(&self, x: usize) -> usize {x + 1 - self.min_x}

    fn get(&self, x: usize, y: usize) -> Tile {self.tiles[y][x]}
    fn set(&mut self, x: usize, y: usize, tile: Tile) {self.tiles[y][x] = tile}

    /// Water arriving at (x, top) from above. Returns whether it drains away
    /// rather than pooling.
    fn pour(&mut self, x: usize, top: usize) -> bool {
        let mut y = top;
        while y <= self.max_y && self.get(x, y) == Tile::Sand {
            self.set(x, y, Tile::Flowing);
            y += 1;
        }
        if y > self.max_y || self.get(x, y) == Tile::Flowing {return true}
        // landed on clay or still water: fill the basin upward, row by row
        while y > top {
            y -= 1;
            let (left, right) = (self.spread(x, y, false), self.spread(x, y, true));
            let (Some(left), Some(right)) = (left, right) else {return true};
            for cx in left + 1 .. right {self.set(cx, y, Tile::Still)}
        }
        false
    }

    /// Flows sideways from (x, y) until a wall (returned) or a drop that drains (`None`).
    fn spread(&mut self, mut x: usize, y: usize, rightward: bool) -> Option<usize> {
        loop {
            let nx = if rightward {x + 1} else {x - 1};
            if self.get(nx, y) == Tile::Clay {return Some(nx)}
            self.set(nx, y, Tile::Flowing);
            x = nx;
            match self.get(x, y + 1) {
                Tile::Sand => if self.pour(x, y + 1) {return None},
                Tile::Flowing => return None,
                Tile::Clay | Tile::Still => {}
            }
        }
    }

    fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.tiles[self.min_y ..= self.max_y].iter().flatten().filter(|&&t| pred(t)).count()
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut ground = Ground::parse(input)?;
    let x = ground.column(SPRING_X);
    ground.pour(x, 1);
    let (wet, still) = (ground.count(|t| matches!(t, Tile::Flowing | Tile::Still)), ground.count(|t| t == Tile::Still));
    debug!(wet, still, "water settled");
    Ok(if part == 1 {wet} else {still}.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN: &str = "\
x=495, y=2..7
y=7, x=495..501
x=501, y=3..7
x=498, y=2..4
x=506, y=1..2
x=498, y=10..13
x=504, y=10..13
y=13, x=498..504
";

    #[test]
    fn reachable_tiles() {
        assert_eq!(solve(1, SCAN).unwrap(), "57");
    }

    #[test]
    fn retained_water() {
        assert_eq!(solve(2, SCAN).unwrap(), "29");
    }

    #[test]
    fn overflowing_bucket() {
        // a 3-wide bucket under the spring fills and spills over both rims
        let bucket = "x=499, y=3..5\nx=503, y=3..5\ny=5, x=499..503\n";
        let mut ground = Ground::parse(bucket).unwrap();
        let x = ground.column(SPRING_X);
        ground.pour(x, 1);
        assert_eq!(ground.count(|t| t == Tile::Still), 6);
        // the rim row sits above the clay range; only the two spills count
        assert_eq!(ground.count(|t| t == Tile::Flowing), 2 * 3);
    }

    #[test]
    fn clay_on_the_zero_column() {
        let scan = "x=0, y=1..2\n";
        assert_eq!(solve(1, scan).unwrap(), "2");
        assert_eq!(solve(2, scan).unwrap(), "0");
    }
}
