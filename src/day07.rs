use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;
use tracing::trace;

use crate::parse::ParseError;

const WORKERS: usize = 5;
const BASE_COST: u32 = 60;

const BEFORE_AT: usize = "Step ".len();
const AFTER_AT: usize = "Step ? must be finished before step ".len();

/// Steps as `b'A'`-based indices plus `prereqs[s]`, a bitmask of steps `s` waits on.
struct Deps {steps: BTreeSet<u8>, prereqs: [u32; 26]}

impl Deps {
    fn parse(input: &str) -> Result<Deps> {
        let mut deps = Deps {steps: BTreeSet::new(), prereqs: [0; 26]};
        for line in input.lines().filter(|line| !line.trim().is_empty()) {
            let step = |at: usize| -> Result<u8> {
                match line.as_bytes().get(at) {
                    Some(&c @ b'A' ..= b'Z') => Ok(c - b'A'),
                    _ => return Err(ParseError::Line(line.to_owned()).into()),
                }
            };
            let (before, after) = (step(BEFORE_AT)?, step(AFTER_AT)?);
            deps.steps.extend([before, after]);
            deps.prereqs[after as usize] |= 1 << before;
        }
        Ok(deps)
    }

    fn ready(&self, done: u32) -> impl Iterator<Item = u8> + '_ {
        self.steps.iter().copied().filter(move |&s| done & 1 << s == 0 && self.prereqs[s as usize] & !done == 0)
    }
}

fn order(deps: &Deps) -> Result<String> {
    let mut done = 0u32;
    let mut order = String::with_capacity(deps.steps.len());
    while order.len() < deps.steps.len() {
        let next = deps.ready(done).next().context("dependency cycle")?;
        done |= 1 << next;
        order.push((next + b'A') as char);
    }
    Ok(order)
}

fn assembly_time(deps: &Deps, workers: usize, base_cost: u32) -> Result<u32> {
    let mut done = 0u32;
    let mut started = 0u32;
    let mut ongoing: ArrayVec<(u8, u32), 26> = ArrayVec::new();
    let mut t = 0;
    loop {
        while ongoing.len() < workers {
            let Some(s) = deps.ready(done).find(|&s| started & 1 << s == 0) else {break};
            started |= 1 << s;
            ongoing.push((s, t + base_cost + s as u32 + 1));
            trace!(t, step = %((s + b'A') as char), "started");
        }
        let Some(&(_, finish)) = ongoing.iter().min_by_key(|&&(_, finish)| finish) else {
            if done.count_ones() as usize == deps.steps.len() {return Ok(t)}
            bail!("dependency cycle")
        };
        t = finish;
        ongoing.retain(|&mut (s, f)| if f == t {done |= 1 << s; false} else {true});
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let deps = Deps::parse(input)?;
    if part == 1 {order(&deps)} else {assembly_time(&deps, WORKERS, BASE_COST).map(|t| t.to_string())}
}
