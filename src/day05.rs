use anyhow::{ensure, Result};

fn reacts(a: u8, b: u8) -> bool {a ^ b == 0x20 && a.is_ascii_alphabetic()}

/// Fully reacts `polymer`, skipping units of type `removed` (lowercase) if given.
fn react(polymer: impl IntoIterator<Item = u8>, removed: Option<u8>) -> Vec<u8> {
    let mut stack = vec![];
    for c in polymer {
        if Some(c.to_ascii_lowercase()) == removed {continue}
        if stack.last().is_some_and(|&top| reacts(top, c)) {stack.pop();} else {stack.push(c)}
    }
    stack
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let polymer = input.trim().as_bytes();
    ensure!(polymer.iter().all(u8::is_ascii_alphabetic), "polymer has non-letter units");
    let reacted = react(polymer.iter().copied(), None);
    if part == 1 {return Ok(reacted.len().to_string())}

    // removing a type commutes with reacting, so start from the reacted polymer
    let best = (b'a' ..= b'z').map(|unit| react(reacted.iter().copied(), Some(unit)).len())
                              .min().unwrap_or(0);
    Ok(best.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn example_polymer() {
        assert_eq!(solve(1, "dabAcCaCBAcCcaDA\n").unwrap(), "10");
        assert_eq!(solve(2, "dabAcCaCBAcCcaDA\n").unwrap(), "4");
    }

    #[test]
    fn same_case_doesnt_react() {
        assert_eq!(solve(1, "aA").unwrap(), "0");
        assert_eq!(solve(1, "aa").unwrap(), "2");
        assert_eq!(solve(1, "abBA").unwrap(), "0");
        assert_eq!(solve(1, "abAB").unwrap(), "4");
    }

    fn naive(mut polymer: Vec<u8>) -> usize {
        while let Some(i) = polymer.windows(2).position(|w| reacts(w[0], w[1])) {
            polymer.drain(i ..= i + 1);
        }
        polymer.len()
    }

    proptest! {
        #[test]
        fn stack_reaction_matches_repeated_scans(polymer in "[abcABC]{0,40}") {
            let reacted = react(polymer.bytes(), None);
            prop_assert_eq!(reacted.len(), naive(polymer.clone().into_bytes()));
            prop_assert!(reacted.windows(2).all(|w| !reacts(w[0], w[1])));
        }
    }
}
