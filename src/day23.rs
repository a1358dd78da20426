use std::cmp::Reverse;
use std::collections::BinaryHeap;

use anyhow::{ensure, Context, Result};
use tracing::debug;

use crate::parse::fixed_ints;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bot {pos: [i64; 3], r: i64}

impl Bot {
    fn reaches(&self, p: [i64; 3]) -> bool {manhattan(self.pos, p) <= self.r}
}

fn manhattan(a: [i64; 3], b: [i64; 3]) -> i64 {
    (0 .. 3).map(|i| (a[i] - b[i]).abs()).sum()
}

/// An axis-aligned cube of side `size` starting at `lo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Cube {lo: [i64; 3], size: i64}

impl Cube {
    fn dist_to(&self, p: [i64; 3]) -> i64 {
        (0 .. 3).map(|i| (self.lo[i] - p[i]).max(0) + (p[i] - (self.lo[i] + self.size - 1)).max(0)).sum()
    }

    fn in_range(&self, bots: &[Bot]) -> usize {
        bots.iter().filter(|b| self.dist_to(b.pos) <= b.r).count()
    }

    fn octants(&self) -> impl Iterator<Item = Cube> + '_ {
        let half = self.size / 2;
        (0 .. 8).map(move |o| {
            let mut lo = self.lo;
            for (i, l) in lo.iter_mut().enumerate() {
                if o >> i & 1 == 1 {*l += half}
            }
            Cube {lo, size: half}
        })
    }
}

fn parse(input: &str) -> Result<Vec<Bot>> {
    input.lines().filter(|l| !l.trim().is_empty()).map(|line| {
        let [x, y, z, r] = fixed_ints(line)?;
        Ok(Bot {pos: [x, y, z], r})
    }).collect()
}

/// Manhattan distance to the origin of the closest point in range of the most
/// bots. Best-first over an octree: cubes are ranked by how many bots reach
/// them, then by distance to the origin. The root cube spans the origin too.
fn best_spot_distance(bots: &[Bot]) -> Option<i64> {
    let lo = [0, 1, 2].map(|i| bots.iter().map(|b| b.pos[i]).min().unwrap_or(0).min(0));
    let hi = [0, 1, 2].map(|i| bots.iter().map(|b| b.pos[i]).max().unwrap_or(0).max(0));
    let extent = (0 .. 3).map(|i| hi[i] - lo[i] + 1).max()?;
    let mut size = 1;
    while size < extent {size *= 2}

    let root = Cube {lo, size};
    let mut queue = BinaryHeap::from([(root.in_range(bots), Reverse(root.dist_to([0; 3])), Reverse(size), root)]);
    let mut popped = 0;
    while let Some((count, Reverse(dist), _, cube)) = queue.pop() {
        popped += 1;
        if cube.size == 1 {
            debug!(count, popped, "found best spot");
            return Some(dist);
        }
        for sub in cube.octants() {
            queue.push((sub.in_range(bots), Reverse(sub.dist_to([0; 3])), Reverse(sub.size), sub));
        }
    }
    None
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let bots = parse(input)?;
    ensure!(!bots.is_empty(), "no nanobots");
    let answer = if part == 1 {
        let strongest = bots.iter().max_by_key(|b| b.r).context("no nanobots")?;
        bots.iter().filter(|b| strongest.reaches(b.pos)).count() as i64
    } else {
        best_spot_distance(&bots).context("empty search space")?
    };
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_of_strongest() {
        let bots = "\
pos=<0,0,0>, r=4
pos=<1,0,0>, r=1
pos=<4,0,0>, r=3
pos=<0,2,0>, r=1
pos=<0,5,0>, r=3
pos=<0,0,3>, r=1
pos=<1,1,1>, r=1
pos=<1,1,2>, r=1
pos=<1,3,1>, r=1
";
        assert_eq!(solve(1, bots).unwrap(), "7");
    }

    #[test]
    fn closest_best_spot() {
        let bots = "\
pos=<10,12,12>, r=2
pos=<12,14,12>, r=2
pos=<16,12,12>, r=4
pos=<14,14,14>, r=6
pos=<50,50,50>, r=200
pos=<10,10,10>, r=5
";
        assert_eq!(solve(2, bots).unwrap(), "36");
    }

    #[test]
    fn cube_distance_is_zero_inside() {
        let cube = Cube {lo: [0, 0, 0], size: 4};
        assert_eq!(cube.dist_to([3, 3, 3]), 0);
        assert_eq!(cube.dist_to([5, -1, 2]), 3);
        assert_eq!(cube.octants().filter(|c| c.dist_to([3, 0, 0]) == 0).count(), 1);
    }
}
