use anyhow::{ensure, Context, Result};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::device::{Cpu, DeviceError, Instruction, Opcode, Program};

const BUDGET: u64 = 100_000_000;

/// The single `eqrr` comparing against register 0: its index and the register
/// holding the candidate value.
fn halting_check(program: &Program) -> Result<(usize, usize)> {
    let checks = program.code.iter().enumerate().filter_map(|(i, &Instruction {op, a, b, ..})| match op {
        Opcode::Eqrr if a == 0 => Some((i, b)),
        Opcode::Eqrr if b == 0 => Some((i, a)),
        _ => None,
    }).collect::<Vec<_>>();
    ensure!(checks.len() == 1, "expected exactly one comparison against r0, found {}", checks.len());
    let (at, reg) = checks[0];
    let reg = usize::try_from(reg).ok().filter(|&r| r < 6).ok_or(DeviceError::Register(reg))?;
    Ok((at, reg))
}

/// Runs with r0 unmatchable until the first halting check and reports the
/// value it wanted.
fn first_candidate(program: &Program) -> Result<i64> {
    let (at, reg) = halting_check(program)?;
    let mut cpu = Cpu::new(program);
    cpu.regs[0] = -1;
    for _ in 0 .. BUDGET {
        if cpu.ip == at as i64 {return Ok(cpu.regs[reg])}
        ensure!(!cpu.halted(), "halted before reaching the check");
        cpu.step()?;
    }
    anyhow::bail!("no halting check within {} steps", BUDGET)
}

/// The hash loop in the program, lifted out: the seed is loaded right after
/// `bori _ 65536 _` and the multiplier is the largest `muli` operand.
struct Hasher {seed: i64, multiplier: i64}

impl Hasher {
    fn extract(program: &Program) -> Result<Hasher> {
        let code = &program.code;
        let mix = code.iter().position(|i| i.op == Opcode::Bori && i.b == 0x10000)
            .context("no `bori _ 65536 _` in the program")?;
        let seed = code.get(mix + 1).filter(|i| i.op == Opcode::Seti).map(|i| i.a)
            .context("no seed after the bori")?;
        let multiplier = code.iter().filter(|i| i.op == Opcode::Muli).map(|i| i.b).max().filter(|&m| m > 0xff)
            .context("no hash multiplier")?;
        Ok(Hasher {seed, multiplier})
    }

    fn next(&self, prev: i64) -> i64 {
        let mut bytes = prev | 0x10000;
        let mut h = self.seed;
        loop {
            h = ((h + (bytes & 0xff)) & 0xffffff) * self.multiplier & 0xffffff;
            if bytes < 0x100 {return h}
            bytes >>= 8;
        }
    }

    /// The last value before the sequence starts repeating.
    fn last_new(&self) -> i64 {
        let mut seen = FxHashSet::default();
        let mut h = 0;
        let mut last = 0;
        loop {
            h = self.next(h);
            if !seen.insert(h) {
                debug!(distinct = seen.len(), "hash sequence cycles");
                return last;
            }
            last = h;
        }
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let program: Program = input.parse()?;
    let answer = if part == 1 {
        first_candidate(&program)?
    } else {
        Hasher::extract(&program)?.last_new()
    };
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVATION: &str = "\
#ip 4
seti 123 0 3
bani 3 456 3
eqri 3 72 3
addr 3 4 4
seti 0 0 4
seti 0 0 3
bori 3 65536 2
seti 7586220 4 3
bani 2 255 1
addr 3 1 3
bani 3 16777215 3
muli 3 65899 3
bani 3 16777215 3
gtir 256 2 1
addr 1 4 4
addi 4 1 4
seti 27 6 4
seti 0 2 1
addi 1 1 5
muli 5 256 5
gtrr 5 2 5
addr 5 4 4
addi 4 1 4
seti 25 3 4
addi 1 1 1
seti 17 0 4
setr 1 6 2
seti 7 8 4
eqrr 3 0 1
addr 1 4 4
seti 5 6 4
";

    #[test]
    fn lifted_hash_matches_emulation() {
        let program: Program = ACTIVATION.parse().unwrap();
        assert_eq!(halting_check(&program).unwrap(), (28, 3));
        let hasher = Hasher::extract(&program).unwrap();
        assert_eq!((hasher.seed, hasher.multiplier), (7586220, 65899));
        assert_eq!(first_candidate(&program).unwrap(), hasher.next(0));
    }

    #[test]
    fn matching_r0_halts_the_program() {
        let program: Program = ACTIVATION.parse().unwrap();
        let first = solve(1, ACTIVATION).unwrap().parse::<i64>().unwrap();
        let mut cpu = Cpu::new(&program);
        cpu.regs[0] = first;
        assert!(cpu.run(BUDGET).is_ok());
    }

    #[test]
    fn sequence_eventually_repeats() {
        let hasher = Hasher {seed: 7586220, multiplier: 65899};
        let last = hasher.last_new();
        assert!((0 ..= 0xffffff).contains(&last));
    }

    #[test]
    fn comparison_against_missing_register_is_an_error() {
        let err = solve(1, "#ip 4\neqrr 0 9 1\n").unwrap_err();
        assert_eq!(err.downcast_ref::<DeviceError>(), Some(&DeviceError::Register(9)));
    }
}
