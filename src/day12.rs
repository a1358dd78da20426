use anyhow::{bail, ensure, Context, Result};
use bitvec::prelude::*;
use tracing::debug;

const SHORT_RUN: u64 = 20;
const LONG_RUN: u64 = 50_000_000_000;

fn pot(c: u8) -> Result<bool> {
    match c {b'#' => Ok(true), b'.' => Ok(false), _ => bail!("unexpected pot {:?}", c as char)}
}

/// A row of pots, trimmed to its first and last plant; `origin` is the pot
/// number of `plants[0]`.
#[derive(Clone)]
struct Row {origin: i64, plants: BitVec}

impl Row {
    fn trimmed(origin: i64, mut plants: BitVec) -> Row {
        let Some(first) = plants.first_one() else {return Row {origin: 0, plants: BitVec::new()}};
        let last = plants.last_one().unwrap_or(first);
        plants.truncate(last + 1);
        Row {origin: origin + first as i64, plants: plants[first ..].to_bitvec()}
    }

    fn step(&self, rules: &BitArr!(for 32)) -> Row {
        // pots within two of a plant are the only ones that may change
        let mut next = bitvec![0; self.plants.len() + 4];
        let mut window = 0usize;
        for i in 0 .. self.plants.len() + 4 {
            let incoming = self.plants.get(i).is_some_and(|b| *b);
            window = (window << 1 | incoming as usize) & 0b11111;
            next.set(i, rules[window]);
        }
        // next[i] is centred on plants[i - 2], i.e. pot origin - 2 + i
        Row::trimmed(self.origin - 2, next)
    }

    fn sum(&self) -> i64 {self.plants.iter_ones().map(|i| self.origin + i as i64).sum()}
}

fn parse(input: &str) -> Result<(Row, BitArr!(for 32))> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
    let initial = lines.next().and_then(|line| line.strip_prefix("initial state: "))
        .context("missing initial state")?;
    let plants = initial.bytes().map(pot).collect::<Result<BitVec>>()?;

    let mut rules = bitarr![0; 32];
    for line in lines {
        let (pattern, result) = line.split_once(" => ").with_context(|| format!("bad rule {:?}", line))?;
        ensure!(pattern.len() == 5 && result.len() == 1, "bad rule {:?}", line);
        let ix = pattern.bytes().try_fold(0, |ix, c| Ok::<_, anyhow::Error>(ix << 1 | pot(c)? as usize))?;
        rules.set(ix, pot(result.as_bytes()[0])?);
    }
    ensure!(!rules[0], "empty pots would sprout plants forever");
    Ok((Row::trimmed(0, plants), rules))
}

fn simulate(mut row: Row, rules: &BitArr!(for 32), generations: u64) -> i64 {
    for gen in 1 ..= generations {
        let next = row.step(rules);
        if next.plants == row.plants {
            // same shape, just sliding: the sum moves by a fixed amount forever
            let drift = next.sum() - row.sum();
            debug!(gen, drift, "pattern stabilised");
            return next.sum() + drift * (generations - gen) as i64;
        }
        row = next;
    }
    row.sum()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (row, rules) = parse(input)?;
    Ok(simulate(row, &rules, if part == 1 {SHORT_RUN} else {LONG_RUN}).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POTS: &str = "\
initial state: #..#.#..##......###...###

...## => #
..#.. => #
.#... => #
.#.#. => #
.#.## => #
.##.. => #
.#### => #
#.#.# => #
#.### => #
##.#. => #
##.## => #
###.. => #
###.# => #
####. => #
";

    #[test]
    fn twenty_generations() {
        assert_eq!(solve(1, POTS).unwrap(), "325");
    }

    #[test]
    fn gliders_are_extrapolated() {
        // a lone plant hopping two pots right per generation
        let hopper = "initial state: #\n\n#.... => #\n";
        assert_eq!(solve(1, hopper).unwrap(), "40");
        assert_eq!(solve(2, hopper).unwrap(), "100000000000");
    }

    #[test]
    fn empty_rule_must_not_sprout() {
        assert!(solve(1, "initial state: #\n\n..... => #\n").is_err());
    }
}
