use std::collections::VecDeque;

use anyhow::{bail, ensure, Context, Result};
use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::parse::grid;

const HIT_POINTS: i32 = 200;
const ATTACK: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Race {Elf, Goblin}

impl Race {
    fn tile(self) -> u8 {match self {Race::Elf => b'E', Race::Goblin => b'G'}}
}

#[derive(Clone, Debug)]
struct Unit {race: Race, x: usize, y: usize, hp: i32, attack: i32}

impl Unit {
    fn alive(&self) -> bool {self.hp > 0}
}

#[derive(Debug, PartialEq, Eq)]
struct Outcome {rounds: u32, hp: i32, winner: Race}

impl Outcome {
    fn score(&self) -> i64 {self.rounds as i64 * self.hp as i64}
}

/// Adjacent squares in reading order.
fn neighbours(x: usize, y: usize) -> ArrayVec<(usize, usize), 4> {
    let mut r = ArrayVec::new();
    if let Some(y) = y.checked_sub(1) {r.push((x, y))}
    if let Some(x) = x.checked_sub(1) {r.push((x, y))}
    r.push((x + 1, y));
    r.push((x, y + 1));
    r
}

#[derive(Clone)]
struct Battle {map: Vec<Vec<u8>>, units: Vec<Unit>}

impl Battle {
    fn parse(input: &str) -> Result<Battle> {
        let map = grid(input);
        let mut units = vec![];
        for (y, row) in map.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                let race = match c {
                    b'E' => Race::Elf,
                    b'G' => Race::Goblin,
                    b'#' | b'.' => continue,
                    _ => bail!("unexpected tile {:?} at {},{}", c as char, x, y),
                };
                units.push(Unit {race, x, y, hp: HIT_POINTS, attack: ATTACK});
            }
        }
        ensure!(!units.is_empty(), "nobody to fight");
        Ok(Battle {map, units})
    }

    fn with_elf_attack(mut self, attack: i32) -> Battle {
        for unit in self.units.iter_mut().filter(|u| u.race == Race::Elf) {unit.attack = attack}
        self
    }

    fn open(&self, (x, y): (usize, usize)) -> bool {
        self.map.get(y).and_then(|row| row.get(x)) == Some(&b'.')
    }

    fn unit_at(&self, (x, y): (usize, usize)) -> Option<usize> {
        self.units.iter().position(|u| u.alive() && u.x == x && u.y == y)
    }

    /// Steps from `from` to every open square reachable through open squares.
    fn distances(&self, from: (usize, usize)) -> Vec<Vec<Option<u32>>> {
        let mut dist = self.map.iter().map(|row| vec![None; row.len()]).collect::<Vec<_>>();
        dist[from.1][from.0] = Some(0);
        let mut queue = VecDeque::from([(from, 0)]);
        while let Some(((x, y), d)) = queue.pop_front() {
            for n in neighbours(x, y) {
                if self.open(n) && dist[n.1][n.0].is_none() {
                    dist[n.1][n.0] = Some(d + 1);
                    queue.push_back((n, d + 1));
                }
            }
        }
        dist
    }

    /// The adjacent enemy with the fewest hit points, first in reading order on ties.
    fn target(&self, i: usize) -> Option<usize> {
        let unit = &self.units[i];
        neighbours(unit.x, unit.y).into_iter()
            .filter_map(|pos| self.unit_at(pos))
            .filter(|&j| self.units[j].race != unit.race)
            .min_by_key(|&j| self.units[j].hp)
    }

    /// The first step toward the nearest square in range of an enemy.
    fn step_toward_enemy(&self, i: usize) -> Option<(usize, usize)> {
        let unit = &self.units[i];
        let from_unit = self.distances((unit.x, unit.y));
        let (d, (x, y)) = self.units.iter()
            .filter(|e| e.alive() && e.race != unit.race)
            .flat_map(|e| neighbours(e.x, e.y))
            .filter(|&pos| self.open(pos))
            .filter_map(|(x, y)| from_unit[y][x].map(|d| (d, (x, y))))
            .min_by_key(|&(d, (x, y))| (d, y, x))?;
        let from_target = self.distances((x, y));
        neighbours(unit.x, unit.y).into_iter()
            .find(|&(nx, ny)| self.open((nx, ny)) && from_target[ny][nx] == Some(d - 1))
    }

    /// Plays unit `i`'s turn, returning the index of a unit it killed.
    fn turn(&mut self, i: usize) -> Option<usize> {
        if self.target(i).is_none() {
            if let Some((nx, ny)) = self.step_toward_enemy(i) {
                let unit = &mut self.units[i];
                self.map[unit.y][unit.x] = b'.';
                (unit.x, unit.y) = (nx, ny);
                self.map[ny][nx] = unit.race.tile();
            }
        }
        let j = self.target(i)?;
        self.units[j].hp -= self.units[i].attack;
        if self.units[j].alive() {return None}
        let dead = &self.units[j];
        self.map[dead.y][dead.x] = b'.';
        Some(j)
    }

    /// Fights to the end. `None` when a round changes nothing, or with
    /// `spare_elves` as soon as an elf dies.
    fn fight(&mut self, spare_elves: bool) -> Option<Outcome> {
        for rounds in 0 .. {
            let before = self.units.iter().map(|u| (u.x, u.y, u.hp)).collect::<Vec<_>>();
            let mut order = (0 .. self.units.len()).filter(|&i| self.units[i].alive()).collect::<Vec<_>>();
            order.sort_unstable_by_key(|&i| (self.units[i].y, self.units[i].x));
            for i in order {
                if !self.units[i].alive() {continue}
                let race = self.units[i].race;
                if !self.units.iter().any(|u| u.alive() && u.race != race) {
                    let hp: i32 = self.units.iter().filter(|u| u.alive()).map(|u| u.hp).sum();
                    debug!(rounds, hp, winner = ?race, "combat over");
                    return Some(Outcome {rounds, hp, winner: race});
                }
                if let Some(j) = self.turn(i) {
                    trace!(rounds, killed = ?self.units[j], "unit died");
                    if spare_elves && self.units[j].race == Race::Elf {return None}
                }
            }
            if self.units.iter().map(|u| (u.x, u.y, u.hp)).eq(before) {
                debug!(rounds, "stalemate");
                return None;
            }
        }
        unreachable!()
    }
}

/// The weakest elf attack that wins without losses, and how that battle goes.
fn flawless_victory(battle: &Battle) -> Option<(i32, Outcome)> {
    (ATTACK + 1 ..= HIT_POINTS).find_map(|attack| {
        let outcome = battle.clone().with_elf_attack(attack).fight(true)?;
        debug!(attack, ?outcome, "elves won unscathed");
        Some((attack, outcome))
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let battle = Battle::parse(input)?;
    let outcome = if part == 1 {
        battle.clone().fight(false).context("combat never ended")?
    } else {
        flawless_victory(&battle).context("elves can't win without losses")?.1
    };
    Ok(outcome.score().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAVES: [(&str, i64, i64); 5] = [
        ("#######\n#.G...#\n#...EG#\n#.#.#G#\n#..G#E#\n#.....#\n#######\n", 27730, 4988),
        ("#######\n#E..EG#\n#.#G.E#\n#E.##E#\n#G..#.#\n#..E#.#\n#######\n", 39514, 31284),
        ("#######\n#E.G#.#\n#.#G..#\n#G.#.G#\n#G..#.#\n#...E.#\n#######\n", 27755, 3478),
        ("#######\n#.E...#\n#.#..G#\n#.###.#\n#E#G#G#\n#...#G#\n#######\n", 28944, 6474),
        ("#########\n#G......#\n#.E.#...#\n#..##..G#\n#...##..#\n#...#...#\n#.G...G.#\n#.....G.#\n#########\n", 18740, 1140),
    ];

    #[test]
    fn combat_outcomes() {
        for (cave, outcome, _) in CAVES {
            assert_eq!(solve(1, cave).unwrap(), outcome.to_string(), "{}", cave);
        }
        let elves_win = "#######\n#G..#E#\n#E#E.E#\n#G.##.#\n#...#E#\n#...E.#\n#######\n";
        let outcome = Battle::parse(elves_win).unwrap().fight(false).unwrap();
        assert_eq!(outcome, Outcome {rounds: 37, hp: 982, winner: Race::Elf});
    }

    #[test]
    fn boosted_elves() {
        for (cave, _, outcome) in CAVES {
            assert_eq!(solve(2, cave).unwrap(), outcome.to_string(), "{}", cave);
        }
        let battle = Battle::parse(CAVES[0].0).unwrap();
        assert_eq!(flawless_victory(&battle).map(|(attack, _)| attack), Some(15));
    }

    #[test]
    fn moves_toward_nearest_reading_order_target() {
        let battle = Battle::parse("#######\n#E..G.#\n#...#.#\n#.G.#G#\n#######\n").unwrap();
        assert_eq!(battle.step_toward_enemy(0), Some((2, 1)));
    }

    #[test]
    fn walled_off_armies_never_finish() {
        let cave = "#####\n#E#G#\n#####\n";
        assert_eq!(Battle::parse(cave).unwrap().fight(false), None);
        assert!(solve(1, cave).is_err());
        assert!(solve(2, cave).is_err());
    }
}
