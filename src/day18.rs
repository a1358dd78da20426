use anyhow::{bail, ensure, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::parse::grid;

const SHORT_RUN: usize = 10;
const LONG_RUN: usize = 1_000_000_000;

const OPEN: u8 = b'.';
const TREES: u8 = b'|';
const LUMBERYARD: u8 = b'#';

fn step(area: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let rows = area.len();
    (0 .. rows).map(|y| (0 .. area[y].len()).map(|x| {
        let (mut trees, mut yards) = (0, 0);
        for ny in y.saturating_sub(1) ..= (y + 1).min(rows - 1) {
            for nx in x.saturating_sub(1) ..= x + 1 {
                if (nx, ny) == (x, y) {continue}
                match area[ny].get(nx) {Some(&TREES) => trees += 1, Some(&LUMBERYARD) => yards += 1, _ => {}}
            }
        }
        match area[y][x] {
            OPEN if trees >= 3 => TREES,
            TREES if yards >= 3 => LUMBERYARD,
            LUMBERYARD if yards == 0 || trees == 0 => OPEN,
            acre => acre,
        }
    }).collect()).collect()
}

fn resource_value(area: &[Vec<u8>]) -> usize {
    let count = |acre| area.iter().flatten().filter(|&&a| a == acre).count();
    count(TREES) * count(LUMBERYARD)
}

/// The area after `minutes`, skipping ahead once a state repeats.
fn after(mut area: Vec<Vec<u8>>, minutes: usize) -> Vec<Vec<u8>> {
    let mut seen: FxHashMap<Vec<Vec<u8>>, usize> = FxHashMap::default();
    let mut t = 0;
    while t < minutes {
        if let Some(&first) = seen.get(&area) {
            let period = t - first;
            debug!(first, period, "landscape cycles");
            for _ in 0 .. (minutes - t) % period {area = step(&area)}
            return area;
        }
        seen.insert(area.clone(), t);
        area = step(&area);
        t += 1;
    }
    area
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let area = grid(input);
    ensure!(!area.is_empty(), "empty landscape");
    if let Some(&c) = area.iter().flatten().find(|&&c| !matches!(c, OPEN | TREES | LUMBERYARD)) {
        bail!("unexpected acre {:?}", c as char)
    }
    Ok(resource_value(&after(area, if part == 1 {SHORT_RUN} else {LONG_RUN})).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: &str = "\
.#.#...|#.
.....#|##|
.|..|...#.
..|#.....#
#.#|||#|#|
...#.||...
.|....|...
||...#|.#|
|.||||..|.
...#.|..|.
";

    #[test]
    fn ten_minutes() {
        assert_eq!(solve(1, AREA).unwrap(), "1147");
    }

    #[test]
    fn skipping_ahead_matches_stepping() {
        let area = grid(AREA);
        let mut slow = area.clone();
        for _ in 0 .. 200 {slow = step(&slow)}
        assert_eq!(after(area, 200), slow);
    }

    #[test]
    fn first_minute() {
        let expected = grid("\
.......##.
......|###
.|..|...#.
..|#||...#
..##||.|#|
...#||||..
||...|||..
|||||.||.|
||||||||||
....||..|.
");
        assert_eq!(step(&grid(AREA)), expected);
    }
}
