use anyhow::Result;
use tracing::debug;

use crate::parse::fixed_ints;

const REACH: i32 = 3;

struct DisjointSets {parent: Vec<usize>}

impl DisjointSets {
    fn new(n: usize) -> Self {DisjointSets {parent: (0 .. n).collect()}}

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Returns whether two separate sets were merged.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {self.parent[ra] = rb}
        ra != rb
    }
}

fn constellations(points: &[[i32; 4]]) -> usize {
    let mut sets = DisjointSets::new(points.len());
    let mut count = points.len();
    for i in 0 .. points.len() {
        for j in i + 1 .. points.len() {
            let dist: i32 = (0 .. 4).map(|k| (points[i][k] - points[j][k]).abs()).sum();
            if dist <= REACH && sets.union(i, j) {count -= 1}
        }
    }
    count
}

/// There is only one puzzle on the last day; both parts answer it.
pub fn solve(_part: u8, input: &str) -> Result<String> {
    let points = input.lines().filter(|l| !l.trim().is_empty())
        .map(fixed_ints::<i32, 4>).collect::<Result<Vec<_>, _>>()?;
    debug!(points = points.len(), "charting");
    Ok(constellations(&points).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_skies() {
        for (sky, expected) in [
            (" 0,0,0,0\n 3,0,0,0\n 0,3,0,0\n 0,0,3,0\n 0,0,0,3\n 0,0,0,6\n 9,0,0,0\n12,0,0,0\n", "2"),
            ("-1,2,2,0\n0,0,2,-2\n0,0,0,-2\n-1,2,0,0\n-2,-2,-2,2\n3,0,2,-1\n-1,3,2,2\n-1,0,-1,0\n0,2,1,-2\n3,0,0,0\n", "4"),
            ("1,-1,0,1\n2,0,-1,0\n3,2,-1,0\n0,0,3,1\n0,0,-1,-1\n2,3,-2,0\n-2,2,0,0\n2,-2,0,-1\n1,-1,0,-1\n3,2,0,2\n", "3"),
            ("1,-1,-1,-2\n-2,-2,0,1\n0,2,1,3\n-2,3,-2,1\n0,2,3,-2\n-1,-1,1,-2\n0,-2,-1,0\n-2,2,3,-1\n1,2,2,0\n-1,-2,0,-2\n", "8"),
        ] {
            assert_eq!(solve(1, sky).unwrap(), expected);
        }
    }

    #[test]
    fn chain_joins_distant_points() {
        assert_eq!(constellations(&[[0, 0, 0, 0], [3, 0, 0, 0], [6, 0, 0, 0]]), 1);
        assert_eq!(constellations(&[[0, 0, 0, 0], [6, 0, 0, 0], [3, 0, 0, 0]]), 1);
        assert_eq!(constellations(&[[0, 0, 0, 0], [4, 0, 0, 0]]), 2);
    }

    #[test]
    fn rejects_short_points() {
        assert!(solve(1, "1,2,3\n").is_err());
    }
}
