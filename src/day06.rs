use anyhow::{ensure, Result};

use crate::parse::fixed_ints;

const SAFE_DISTANCE: i32 = 10000;

struct Bounds {minx: i32, maxx: i32, miny: i32, maxy: i32}

impl Bounds {
    fn of(pts: &[[i32; 2]]) -> Bounds {
        pts.iter().fold(
            Bounds {minx: i32::MAX, maxx: i32::MIN, miny: i32::MAX, maxy: i32::MIN},
            |b, &[x, y]| Bounds {minx: b.minx.min(x), maxx: b.maxx.max(x), miny: b.miny.min(y), maxy: b.maxy.max(y)}
        )
    }

    fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.miny ..= self.maxy).flat_map(move |y| (self.minx ..= self.maxx).map(move |x| (x, y)))
    }

    fn on_edge(&self, x: i32, y: i32) -> bool {
        x == self.minx || x == self.maxx || y == self.miny || y == self.maxy
    }
}

fn dist([px, py]: [i32; 2], x: i32, y: i32) -> i32 {(px - x).abs() + (py - y).abs()}

fn largest_finite_area(pts: &[[i32; 2]]) -> usize {
    let bounds = Bounds::of(pts);
    let mut areas = vec![0usize; pts.len()];
    // any area reaching the bounding box keeps growing past it
    let mut infinite = vec![false; pts.len()];
    for (x, y) in bounds.cells() {
        let mut best = None;
        let mut best_dist = i32::MAX;
        for (i, &p) in pts.iter().enumerate() {
            let d = dist(p, x, y);
            if d < best_dist {
                best = Some(i);
                best_dist = d;
            } else if d == best_dist {
                best = None;
            }
        }
        if let Some(i) = best {
            areas[i] += 1;
            if bounds.on_edge(x, y) {infinite[i] = true}
        }
    }
    areas.into_iter().zip(infinite).filter(|&(_, inf)| !inf).map(|(area, _)| area).max().unwrap_or(0)
}

/// Cells whose summed distance to every point is below `limit`.
fn safe_region(pts: &[[i32; 2]], limit: i32) -> usize {
    let bounds = Bounds::of(pts);
    // a safe cell can't be further out than limit / n from the bounding box
    let margin = limit / pts.len() as i32 + 1;
    let bounds = Bounds {
        minx: bounds.minx - margin, maxx: bounds.maxx + margin,
        miny: bounds.miny - margin, maxy: bounds.maxy + margin,
    };
    bounds.cells().filter(|&(x, y)| pts.iter().map(|&p| dist(p, x, y)).sum::<i32>() < limit).count()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let pts = input.lines().filter(|line| !line.trim().is_empty())
                   .map(fixed_ints).collect::<Result<Vec<[i32; 2]>, _>>()?;
    ensure!(!pts.is_empty(), "no coordinates");
    Ok(if part == 1 {largest_finite_area(&pts)} else {safe_region(&pts, SAFE_DISTANCE)}.to_string())
}
