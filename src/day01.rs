use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

fn changes(input: &str) -> Result<Vec<i64>> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line|
        line.parse::<i64>().with_context(|| format!("bad frequency change {:?}", line))
    ).collect()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let changes = changes(input)?;
    if part == 1 {
        return Ok(changes.iter().sum::<i64>().to_string())
    }

    let mut seen = FxHashSet::default();
    let mut freq = 0i64;
    seen.insert(freq);
    // after one pass every running total only shifts by the drift, so a
    // repeat, if any, shows up before the shift outgrows the first pass's span
    let drift: i64 = changes.iter().sum();
    let (lo, hi) = changes.iter().scan(0, |f, c| {*f += c; Some(*f)})
                          .fold((0, 0), |(lo, hi), f| (lo.min(f), hi.max(f)));
    let passes = if drift == 0 {1} else {(hi - lo) / drift.abs() + 2};
    for _ in 0 .. passes {
        for f in &changes {
            freq += f;
            if !seen.insert(freq) {return Ok(freq.to_string())}
        }
    }
    anyhow::bail!("frequency never repeats")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_changes() {
        assert_eq!(solve(1, "+1\n-2\n+3\n+1\n").unwrap(), "3");
        assert_eq!(solve(1, "-1\n-2\n-3").unwrap(), "-6");
    }

    #[test]
    fn finds_first_repeat() {
        assert_eq!(solve(2, "+1\n-2\n+3\n+1").unwrap(), "2");
        assert_eq!(solve(2, "+1\n-1").unwrap(), "0");
        assert_eq!(solve(2, "+3\n+3\n+4\n-2\n-4").unwrap(), "10");
        assert_eq!(solve(2, "-6\n+3\n+8\n+5\n-6").unwrap(), "5");
        assert_eq!(solve(2, "+7\n+7\n-2\n-7\n-4").unwrap(), "14");
    }

    #[test]
    fn rejects_garbage() {
        assert!(solve(1, "+1\nfoo").is_err());
        assert!(solve(2, "+1\n+2").is_err());
    }
}
