use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use regex::Regex;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Army {Immune, Infection}

#[derive(Clone, Debug)]
struct Group<'a> {
    army: Army,
    units: i64,
    hp: i64,
    weak: Vec<&'a str>,
    immune: Vec<&'a str>,
    damage: i64,
    kind: &'a str,
    initiative: i64,
}

impl<'a> Group<'a> {
    fn power(&self) -> i64 {self.units * self.damage}

    fn damage_to(&self, defender: &Group<'a>) -> i64 {
        if defender.immune.contains(&self.kind) {0}
        else if defender.weak.contains(&self.kind) {2 * self.power()}
        else {self.power()}
    }
}

fn group_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(
        r"^(\d+) units each with (\d+) hit points (?:\((.*)\) )?with an attack that does (\d+) (\w+) damage at initiative (\d+)$"
    ).unwrap())
}

fn parse(input: &str) -> Result<Vec<Group<'_>>> {
    let mut army = None;
    let mut groups = vec![];
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line {
            "Immune System:" => {army = Some(Army::Immune); continue}
            "Infection:" => {army = Some(Army::Infection); continue}
            _ => {}
        }
        let army = army.context("group listed before any army header")?;
        let caps = group_regex().captures(line).with_context(|| format!("cannot parse group {:?}", line))?;
        let num = |i: usize| caps[i].parse::<i64>();
        let (mut weak, mut immune) = (vec![], vec![]);
        if let Some(mods) = caps.get(3) {
            for part in mods.as_str().split("; ") {
                if let Some(kinds) = part.strip_prefix("weak to ") {weak.extend(kinds.split(", "))}
                else if let Some(kinds) = part.strip_prefix("immune to ") {immune.extend(kinds.split(", "))}
                else {bail!("unknown modifier {:?}", part)}
            }
        }
        groups.push(Group {
            army, weak, immune,
            units: num(1)?,
            hp: num(2)?,
            damage: num(4)?,
            kind: caps.get(5).map_or("", |m| m.as_str()),
            initiative: num(6)?,
        });
    }
    Ok(groups)
}

/// Fights to the end. `None` when a round kills nothing and the battle can
/// never finish.
fn fight(mut groups: Vec<Group>, boost: i64) -> Option<(Army, i64)> {
    for g in groups.iter_mut().filter(|g| g.army == Army::Immune) {g.damage += boost}
    let mut rounds = 0;
    loop {
        let alive = |army| groups.iter().any(|g: &Group| g.army == army);
        if !alive(Army::Immune) || !alive(Army::Infection) {break}
        rounds += 1;

        let mut order = (0 .. groups.len()).collect::<Vec<_>>();
        order.sort_by_key(|&i| std::cmp::Reverse((groups[i].power(), groups[i].initiative)));
        let mut targets: Vec<Option<usize>> = vec![None; groups.len()];
        let mut taken = vec![false; groups.len()];
        for &i in &order {
            let attacker = &groups[i];
            let choice = (0 .. groups.len())
                .filter(|&j| groups[j].army != attacker.army && !taken[j])
                .map(|j| (attacker.damage_to(&groups[j]), groups[j].power(), groups[j].initiative, j))
                .filter(|&(dmg, ..)| dmg > 0)
                .max();
            if let Some((.., j)) = choice {
                targets[i] = Some(j);
                taken[j] = true;
            }
        }

        order.sort_by_key(|&i| std::cmp::Reverse(groups[i].initiative));
        let mut killed = 0;
        for i in order {
            let Some(j) = targets[i] else {continue};
            if groups[i].units == 0 {continue}
            let dead = (groups[i].damage_to(&groups[j]) / groups[j].hp).min(groups[j].units);
            groups[j].units -= dead;
            killed += dead;
        }
        trace!(rounds, killed, "round");
        if killed == 0 {
            debug!(rounds, "stalemate");
            return None;
        }
        groups.retain(|g| g.units > 0);
    }
    let winner = groups.first()?.army;
    Some((winner, groups.iter().map(|g| g.units).sum()))
}

/// The smallest boost letting the immune system win, with its remaining units.
fn smallest_winning_boost(groups: &[Group]) -> Option<(i64, i64)> {
    let max_hp = groups.iter().map(|g| g.hp * g.units).sum::<i64>();
    (0 ..= max_hp).find_map(|boost| match fight(groups.to_vec(), boost) {
        Some((Army::Immune, units)) => Some((boost, units)),
        _ => None,
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let groups = parse(input)?;
    let units = if part == 1 {
        fight(groups, 0).context("the battle never ends")?.1
    } else {
        let (boost, units) = smallest_winning_boost(&groups).context("no boost wins")?;
        debug!(boost, "immune system wins");
        units
    };
    Ok(units.to_string())
}
