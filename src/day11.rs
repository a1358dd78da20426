use anyhow::{Context, Result};

const SIDE: usize = 300;

fn power_level(x: i64, y: i64, serial: i64) -> i64 {
    let rack = x + 10;
    (rack * y + serial) * rack / 100 % 10 - 5
}

/// `sums[y][x]` is the total power of the rectangle from (1, 1) to (x, y),
/// 1-based, so any square's total is four lookups.
struct Grid {sums: Vec<Vec<i64>>}

impl Grid {
    fn new(serial: i64) -> Grid {
        let mut sums = vec![vec![0i64; SIDE + 1]; SIDE + 1];
        for y in 1 ..= SIDE {
            for x in 1 ..= SIDE {
                sums[y][x] = power_level(x as i64, y as i64, serial)
                    + sums[y - 1][x] + sums[y][x - 1] - sums[y - 1][x - 1];
            }
        }
        Grid {sums}
    }

    fn square(&self, x: usize, y: usize, size: usize) -> i64 {
        let s = &self.sums;
        s[y + size - 1][x + size - 1] - s[y - 1][x + size - 1] - s[y + size - 1][x - 1] + s[y - 1][x - 1]
    }

    /// Best top-left corner and its power for squares of side `size`.
    fn best_of_size(&self, size: usize) -> (usize, usize, i64) {
        (1 ..= SIDE + 1 - size).flat_map(|y| (1 ..= SIDE + 1 - size).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.square(x, y, size)))
            .max_by_key(|&(x, y, power)| (power, std::cmp::Reverse((y, x))))
            .unwrap_or((1, 1, 0))
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let serial: i64 = input.trim().parse().context("grid serial number")?;
    let grid = Grid::new(serial);
    if part == 1 {
        let (x, y, _) = grid.best_of_size(3);
        Ok(format!("{},{}", x, y))
    } else {
        let (x, y, size, _) = (1 ..= SIDE).map(|size| {
            let (x, y, power) = grid.best_of_size(size);
            (x, y, size, power)
        }).max_by_key(|&(_, _, size, power)| (power, std::cmp::Reverse(size))).unwrap_or((1, 1, 1, 0));
        Ok(format!("{},{},{}", x, y, size))
    }
}
