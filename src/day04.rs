use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;

const MIN_AT: usize = "[1518-11-01 00:".len();
const EVT_AT: usize = "[1518-11-01 00:00] ".len();

/// Minutes of the midnight hour each guard spent asleep, tallied over all nights.
fn tallies(input: &str) -> Result<FxHashMap<u32, [u32; 60]>> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>();
    // the timestamps are fixed-width, so text order is chronological order
    lines.sort_unstable();

    let mut tallies: FxHashMap<u32, [u32; 60]> = FxHashMap::default();
    let mut guard = None;
    let mut fell_asleep = None;
    for line in lines {
        let minute = line.get(MIN_AT .. MIN_AT + 2).and_then(|m| m.parse::<usize>().ok())
            .with_context(|| format!("no timestamp in {:?}", line))?;
        let event = line.get(EVT_AT ..).with_context(|| format!("no event in {:?}", line))?;
        if let Some(rest) = event.strip_prefix("Guard #") {
            let id = rest.split(' ').next().unwrap_or_default();
            guard = Some(id.parse().with_context(|| format!("bad guard id in {:?}", line))?);
            fell_asleep = None;
        } else if event.starts_with("falls asleep") {
            fell_asleep = Some(minute);
        } else if event.starts_with("wakes up") {
            let (Some(id), Some(from)) = (guard, fell_asleep.take()) else {
                bail!("wake-up without a sleeping guard: {:?}", line)
            };
            let tally = tallies.entry(id).or_insert([0; 60]);
            for t in from .. minute {tally[t] += 1}
        } else {
            bail!("unknown event {:?}", line)
        }
    }
    Ok(tallies)
}

fn sleepiest_minute(tally: &[u32; 60]) -> (usize, u32) {
    // ties go to the earliest minute
    tally.iter().copied().enumerate().max_by_key(|&(min, n)| (n, std::cmp::Reverse(min))).unwrap_or((0, 0))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let tallies = tallies(input)?;
    let (id, tally) = if part == 1 {
        tallies.iter().max_by_key(|(_, tally)| tally.iter().sum::<u32>())
    } else {
        tallies.iter().max_by_key(|(_, tally)| sleepiest_minute(tally).1)
    }.context("no guard ever fell asleep")?;
    Ok((*id as usize * sleepiest_minute(tally).0).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // shuffled; the solver sorts by timestamp
    const RECORDS: &str = "\
[1518-11-01 00:05] falls asleep
[1518-11-01 00:00] Guard #10 begins shift
[1518-11-01 00:25] wakes up
[1518-11-01 00:30] falls asleep
[1518-11-01 00:55] wakes up
[1518-11-01 23:58] Guard #99 begins shift
[1518-11-02 00:40] falls asleep
[1518-11-02 00:50] wakes up
[1518-11-03 00:05] Guard #10 begins shift
[1518-11-03 00:24] falls asleep
[1518-11-03 00:29] wakes up
[1518-11-04 00:02] Guard #99 begins shift
[1518-11-04 00:36] falls asleep
[1518-11-04 00:46] wakes up
[1518-11-05 00:03] Guard #99 begins shift
[1518-11-05 00:55] wakes up
[1518-11-05 00:45] falls asleep
";

    #[test]
    fn most_asleep_guard() {
        assert_eq!(solve(1, RECORDS).unwrap(), "240");
    }

    #[test]
    fn most_regular_sleeper() {
        assert_eq!(solve(2, RECORDS).unwrap(), "4455");
    }

    #[test]
    fn tallies_per_guard() {
        let tallies = tallies(RECORDS).unwrap();
        assert_eq!(tallies[&10].iter().sum::<u32>(), 50);
        assert_eq!(sleepiest_minute(&tallies[&99]), (45, 3));
    }
}
