use std::cmp::Reverse;
use std::collections::BinaryHeap;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::parse::fixed_ints;

const SWITCH_COST: u32 = 7;

/// Erosion levels, grown on demand as the search wanders past the target.
struct Cave {depth: u64, target: (usize, usize), erosion: Vec<Vec<u64>>}

impl Cave {
    fn new(depth: u64, target: (usize, usize)) -> Cave {
        let mut cave = Cave {depth, target, erosion: vec![vec![depth % 20183]]};
        cave.extend_to(target.0, target.1);
        cave
    }

    fn geologic_index(&self, x: usize, y: usize) -> u64 {
        match (x, y) {
            (0, 0) => 0,
            _ if (x, y) == self.target => 0,
            (x, 0) => x as u64 * 16807,
            (0, y) => y as u64 * 48271,
            _ => self.erosion[y][x - 1] * self.erosion[y - 1][x],
        }
    }

    fn extend_to(&mut self, x: usize, y: usize) {
        while self.erosion[0].len() <= x {
            let nx = self.erosion[0].len();
            for ny in 0 .. self.erosion.len() {
                let e = (self.geologic_index(nx, ny) + self.depth) % 20183;
                self.erosion[ny].push(e);
            }
        }
        while self.erosion.len() <= y {
            let ny = self.erosion.len();
            self.erosion.push(Vec::with_capacity(self.erosion[0].len()));
            for nx in 0 .. self.erosion[0].len() {
                let e = (self.geologic_index(nx, ny) + self.depth) % 20183;
                self.erosion[ny].push(e);
            }
        }
    }

    /// 0 rocky, 1 wet, 2 narrow.
    fn region(&mut self, x: usize, y: usize) -> u8 {
        self.extend_to(x, y);
        (self.erosion[y][x] % 3) as u8
    }

    fn risk(&mut self) -> u32 {
        let (tx, ty) = self.target;
        (0 ..= ty).flat_map(|y| (0 ..= tx).map(move |x| (x, y)))
            .map(|(x, y)| self.region(x, y) as u32).sum()
    }

    /// Tools: 0 neither, 1 torch, 2 climbing gear. A tool is usable in a
    /// region unless their numbers match.
    fn rescue_time(&mut self) -> Option<u32> {
        const TORCH: u8 = 1;
        let goal = (self.target.0, self.target.1, TORCH);
        let mut best: FxHashMap<(usize, usize, u8), u32> = FxHashMap::default();
        let mut queue = BinaryHeap::from([Reverse((0, 0, 0, TORCH))]);
        best.insert((0, 0, TORCH), 0);
        while let Some(Reverse((t, x, y, tool))) = queue.pop() {
            if (x, y, tool) == goal {
                debug!(states = best.len(), width = self.erosion[0].len(), height = self.erosion.len(), "reached target");
                return Some(t);
            }
            if best.get(&(x, y, tool)).is_some_and(|&b| b < t) {continue}
            let here = self.region(x, y);
            let mut moves = vec![(t + SWITCH_COST, x, y, 3 - here - tool)];
            for (nx, ny) in [(x.wrapping_sub(1), y), (x + 1, y), (x, y.wrapping_sub(1)), (x, y + 1)] {
                if nx == usize::MAX || ny == usize::MAX {continue}
                if self.region(nx, ny) != tool {moves.push((t + 1, nx, ny, tool))}
            }
            for (nt, nx, ny, ntool) in moves {
                if best.get(&(nx, ny, ntool)).map_or(true, |&b| nt < b) {
                    best.insert((nx, ny, ntool), nt);
                    queue.push(Reverse((nt, nx, ny, ntool)));
                }
            }
        }
        None
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let [depth, tx, ty] = fixed_ints::<u64, 3>(input)?;
    let mut cave = Cave::new(depth, (tx as usize, ty as usize));
    let answer = if part == 1 {
        cave.risk()
    } else {
        cave.rescue_time().context("target unreachable")?
    };
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAVE: &str = "depth: 510\ntarget: 10,10\n";

    #[test]
    fn risk_level() {
        assert_eq!(solve(1, CAVE).unwrap(), "114");
    }

    #[test]
    fn fastest_rescue() {
        assert_eq!(solve(2, CAVE).unwrap(), "45");
    }

    #[test]
    fn erosion_levels() {
        let mut cave = Cave::new(510, (10, 10));
        assert_eq!(cave.erosion[0][0], 510);
        assert_eq!(cave.erosion[0][1], 17317);
        assert_eq!(cave.erosion[1][0], 8415);
        assert_eq!(cave.erosion[1][1], 1805);
        assert_eq!(cave.erosion[10][10], 510);
        assert_eq!(cave.region(1, 1), 2);
    }
}
