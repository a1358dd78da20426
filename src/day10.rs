use anyhow::{ensure, Result};
use itertools::{Itertools, MinMaxResult};
use tracing::debug;

use crate::parse::fixed_ints;

#[derive(Clone, Copy)]
struct Light {px: i64, py: i64, vx: i64, vy: i64}

impl Light {
    fn at(&self, t: i64) -> (i64, i64) {(self.px + self.vx * t, self.py + self.vy * t)}
}

fn height_at(lights: &[Light], t: i64) -> i64 {
    match lights.iter().map(|l| l.at(t).1).minmax() {
        MinMaxResult::MinMax(lo, hi) => hi - lo,
        _ => 0,
    }
}

/// The moment the lights are packed tightest vertically.
fn convergence(lights: &[Light]) -> i64 {
    // ballpark the meeting time from the two lights furthest apart vertically,
    // then walk downhill from there
    let (top, bottom) = match lights.iter().minmax_by_key(|l| l.py) {
        MinMaxResult::MinMax(top, bottom) => (top, bottom),
        _ => return 0,
    };
    let closing = top.vy - bottom.vy;
    let mut t = if closing > 0 {((bottom.py - top.py) / closing).max(0)} else {0};
    let mut h = height_at(lights, t);
    loop {
        let (down, up) = (height_at(lights, t - 1), height_at(lights, t + 1));
        if t > 0 && down < h {
            t -= 1;
            h = down;
        } else if up < h {
            t += 1;
            h = up;
        } else {
            break
        }
    }
    debug!(t, height = h, "lights converged");
    t
}

fn render(lights: &[Light], t: i64) -> String {
    let pts = lights.iter().map(|l| l.at(t)).collect::<Vec<_>>();
    let (minx, maxx) = pts.iter().map(|p| p.0).minmax().into_option().unwrap_or((0, 0));
    let (miny, maxy) = pts.iter().map(|p| p.1).minmax().into_option().unwrap_or((0, 0));
    let mut buf = vec![vec![b'.'; (maxx - minx + 1) as usize]; (maxy - miny + 1) as usize];
    for (x, y) in pts {
        buf[(y - miny) as usize][(x - minx) as usize] = b'#';
    }
    buf.into_iter().map(|row| String::from_utf8_lossy(&row).into_owned()).join("\n")
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let lights = input.lines().filter(|line| !line.trim().is_empty()).map(|line| {
        let [px, py, vx, vy] = fixed_ints(line)?;
        Ok(Light {px, py, vx, vy})
    }).collect::<Result<Vec<_>>>()?;
    ensure!(!lights.is_empty(), "no lights");

    let t = convergence(&lights);
    Ok(if part == 1 {render(&lights, t)} else {t.to_string()})
}
