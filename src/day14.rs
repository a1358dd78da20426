use anyhow::{ensure, Result};

/// The ever-growing scoreboard and the two elves' positions on it.
struct Scoreboard {recipes: Vec<u8>, elves: [usize; 2]}

impl Scoreboard {
    fn new() -> Self {Scoreboard {recipes: vec![3, 7], elves: [0, 1]}}

    /// Appends the next one or two recipes.
    fn step(&mut self) {
        let sum = self.recipes[self.elves[0]] + self.recipes[self.elves[1]];
        if sum > 9 {self.recipes.push(1)}
        self.recipes.push(sum % 10);
        for elf in &mut self.elves {
            *elf = (*elf + self.recipes[*elf] as usize + 1) % self.recipes.len();
        }
    }
}

fn ten_after(n: usize) -> String {
    let mut board = Scoreboard::new();
    while board.recipes.len() < n + 10 {board.step()}
    board.recipes[n .. n + 10].iter().map(|&d| (d + b'0') as char).collect()
}

fn first_occurrence(digits: &[u8]) -> usize {
    let mut board = Scoreboard::new();
    let mut checked = 0;
    loop {
        // a step adds up to two recipes, so the match may end at either
        while checked + digits.len() <= board.recipes.len() {
            if board.recipes[checked ..][.. digits.len()] == *digits {return checked}
            checked += 1;
        }
        board.step();
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let input = input.trim();
    ensure!(!input.is_empty() && input.bytes().all(|c| c.is_ascii_digit()), "expected a number, got {:?}", input);
    if part == 1 {
        Ok(ten_after(input.parse()?))
    } else {
        Ok(first_occurrence(&input.bytes().map(|c| c - b'0').collect::<Vec<_>>()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_after() {
        assert_eq!(solve(1, "9").unwrap(), "5158916779");
        assert_eq!(solve(1, "5").unwrap(), "0124515891");
        assert_eq!(solve(1, "18").unwrap(), "9251071085");
        assert_eq!(solve(1, "2018\n").unwrap(), "5941429882");
    }

    #[test]
    fn recipes_before_pattern() {
        assert_eq!(solve(2, "51589").unwrap(), "9");
        assert_eq!(solve(2, "01245").unwrap(), "5");
        assert_eq!(solve(2, "92510").unwrap(), "18");
        assert_eq!(solve(2, "59414").unwrap(), "2018");
    }
}
