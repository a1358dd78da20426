use std::collections::VecDeque;

use anyhow::{bail, ensure, Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

const FAR: usize = 1000;

type Room = (i32, i32);

/// Doors as unordered room pairs, stored both ways.
fn doors(regex: &str) -> Result<FxHashSet<(Room, Room)>> {
    let body = regex.trim().strip_prefix('^').and_then(|r| r.strip_suffix('$'))
        .context("route regex must be wrapped in ^...$")?;
    let mut doors = FxHashSet::default();
    let mut branches = vec![];
    let mut at = (0, 0);
    for c in body.bytes() {
        let (dx, dy) = match c {
            b'N' => (0, -1),
            b'S' => (0, 1),
            b'E' => (1, 0),
            b'W' => (-1, 0),
            b'(' => {branches.push(at); continue}
            b'|' => {at = *branches.last().context("`|` outside a group")?; continue}
            b')' => {at = branches.pop().context("unbalanced `)`")?; continue}
            _ => bail!("unexpected {:?} in route regex", c as char),
        };
        let next = (at.0 + dx, at.1 + dy);
        doors.insert((at, next));
        doors.insert((next, at));
        at = next;
    }
    ensure!(branches.is_empty(), "unclosed group");
    Ok(doors)
}

/// Fewest doors from the starting room to every reachable room.
fn distances(doors: &FxHashSet<(Room, Room)>) -> FxHashMap<Room, usize> {
    let mut dist = FxHashMap::default();
    dist.insert((0, 0), 0);
    let mut queue = VecDeque::from([(0, 0)]);
    while let Some(room @ (x, y)) = queue.pop_front() {
        let d = dist[&room];
        for next in [(x, y - 1), (x - 1, y), (x + 1, y), (x, y + 1)] {
            if doors.contains(&(room, next)) && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let dist = distances(&doors(input)?);
    debug!(rooms = dist.len(), "mapped facility");
    let answer = if part == 1 {
        dist.values().copied().max().unwrap_or(0)
    } else {
        dist.values().filter(|&&d| d >= FAR).count()
    };
    Ok(answer.to_string())
}
