use anyhow::{bail, Result};
use itertools::Itertools;

fn letter_counts(id: &str) -> [u8; 26] {
    let mut counts = [0u8; 26];
    for c in id.bytes().filter(u8::is_ascii_lowercase) {counts[(c - b'a') as usize] += 1}
    counts
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let ids = input.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>();
    if part == 1 {
        let (twos, threes) = ids.iter().map(|id| letter_counts(id)).fold((0, 0), |(twos, threes), counts|
            (twos + counts.contains(&2) as usize, threes + counts.contains(&3) as usize)
        );
        return Ok((twos * threes).to_string())
    }

    for (a, b) in ids.iter().tuple_combinations() {
        if a.len() == b.len() && a.bytes().zip(b.bytes()).filter(|(ca, cb)| ca != cb).count() == 1 {
            return Ok(a.chars().zip(b.chars()).filter(|(ca, cb)| ca == cb).map(|(c, _)| c).collect())
        }
    }
    bail!("no two ids differ by exactly one letter")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum() {
        let ids = "abcdef\nbababc\nabbcde\nabcccd\naabcdd\nabcdee\nababab\n";
        assert_eq!(solve(1, ids).unwrap(), "12");
    }

    #[test]
    fn common_letters() {
        let ids = "abcde\nfghij\nklmno\npqrst\nfguij\naxcye\nwvxyz\n";
        assert_eq!(solve(2, ids).unwrap(), "fgij");
        assert!(solve(2, "abc\nxyz").is_err());
    }
}
