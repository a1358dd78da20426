use anyhow::{ensure, Result};

use crate::parse::fixed_ints;

/// Plays the marble game on a circular doubly linked list kept in two index
/// arrays; marble `m` lives at index `m`.
fn high_score(players: usize, last_marble: usize) -> u64 {
    let mut scores = vec![0u64; players];
    let mut next = vec![0usize; last_marble + 1];
    let mut prev = vec![0usize; last_marble + 1];
    let mut curr = 0;
    for m in 1 ..= last_marble {
        if m % 23 == 0 {
            for _ in 0 .. 7 {curr = prev[curr]}
            scores[m % players] += (m + curr) as u64;
            let (p, n) = (prev[curr], next[curr]);
            next[p] = n;
            prev[n] = p;
            curr = n;
        } else {
            let left = next[curr];
            let right = next[left];
            next[left] = m;
            prev[m] = left;
            next[m] = right;
            prev[right] = m;
            curr = m;
        }
    }
    scores.into_iter().max().unwrap_or(0)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let [players, last_marble] = fixed_ints::<usize, 2>(input)?;
    ensure!(players > 0, "nobody to play");
    let last_marble = if part == 1 {last_marble} else {last_marble * 100};
    Ok(high_score(players, last_marble).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[test]
    fn example_games() {
        assert_eq!(high_score(9, 25), 32);
        assert_eq!(solve(1, "10 players; last marble is worth 1618 points").unwrap(), "8317");
        assert_eq!(solve(1, "13 players; last marble is worth 7999 points").unwrap(), "146373");
        assert_eq!(solve(1, "17 players; last marble is worth 1104 points").unwrap(), "2764");
        assert_eq!(solve(1, "21 players; last marble is worth 6111 points").unwrap(), "54718");
        assert_eq!(solve(1, "30 players; last marble is worth 5807 points").unwrap(), "37305");
    }

    /// The game as described: the current marble sits at the back of the deque.
    fn rotating(players: usize, last_marble: usize) -> u64 {
        let mut scores = vec![0u64; players];
        let mut circle = VecDeque::from([0usize]);
        for m in 1 ..= last_marble {
            if m % 23 == 0 {
                circle.rotate_right(7);
                scores[m % players] += (m + circle.pop_back().unwrap_or(0)) as u64;
                circle.rotate_left(1);
            } else {
                circle.rotate_left(1);
                circle.push_back(m);
            }
        }
        scores.into_iter().max().unwrap_or(0)
    }

    proptest! {
        #[test]
        fn linked_list_matches_rotating_deque(players in 1 .. 40usize, last in 0 .. 3000usize) {
            prop_assert_eq!(high_score(players, last), rotating(players, last));
        }
    }
}
