use anyhow::{Context, Result};
use bitvec::prelude::*;

use crate::parse::fixed_ints;

const SIDE: usize = 1000;

struct Claim {id: usize, x: usize, y: usize, w: usize, h: usize}

impl Claim {
    fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        (self.y .. self.y + self.h).flat_map(move |y| (self.x .. self.x + self.w).map(move |x| y * SIDE + x))
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let claims = input.lines().filter(|line| !line.trim().is_empty()).map(|line| {
        let [id, x, y, w, h] = fixed_ints(line)?;
        anyhow::ensure!(x + w <= SIDE && y + h <= SIDE, "claim {:?} leaves the fabric", line);
        Ok(Claim {id, x, y, w, h})
    }).collect::<Result<Vec<_>>>()?;

    // claimed at least once, claimed at least twice
    let mut once = bitvec![0; SIDE * SIDE];
    let mut twice = bitvec![0; SIDE * SIDE];
    for claim in &claims {
        for cell in claim.cells() {
            if once[cell] {twice.set(cell, true)} else {once.set(cell, true)}
        }
    }

    if part == 1 {
        Ok(twice.count_ones().to_string())
    } else {
        claims.iter().find(|claim| claim.cells().all(|cell| !twice[cell]))
              .map(|claim| claim.id.to_string())
              .context("every claim overlaps another")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAIMS: &str = "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2\n";

    #[test]
    fn overlap_area() {
        assert_eq!(solve(1, CLAIMS).unwrap(), "4");
    }

    #[test]
    fn intact_claim() {
        assert_eq!(solve(2, CLAIMS).unwrap(), "3");
    }

    #[test]
    fn claims_must_fit() {
        assert!(solve(1, "#1 @ 999,0: 2x2").is_err());
    }
}
