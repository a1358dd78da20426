use anyhow::{ensure, Context, Result};
use tracing::debug;

use crate::device::{Cpu, Program};

const BUDGET: u64 = 100_000_000;

fn sum_of_divisors(n: i64) -> i64 {
    (1 ..).take_while(|d| d * d <= n).filter(|d| n % d == 0)
          .map(|d| if d * d == n {d} else {d + n / d}).sum()
}

/// The program sums the divisors of a number it builds in a setup block, then
/// jumps back to instruction 1. Runs the setup only and does the sum natively.
fn divisor_sum_shortcut(program: &Program, r0: i64, budget: u64) -> Result<i64> {
    let mut cpu = Cpu::new(program);
    cpu.regs[0] = r0;
    cpu.step()?;
    let mut steps = 1;
    while cpu.ip != 1 {
        if cpu.halted() {return Ok(cpu.regs[0])}
        ensure!(steps < budget, "setup did not finish within {} steps", budget);
        cpu.step()?;
        steps += 1;
    }
    let target = cpu.regs.iter().copied().max().context("no registers")?;
    debug!(target, "setup done");
    Ok(sum_of_divisors(target))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let program: Program = input.parse()?;
    if part == 1 {
        let mut cpu = Cpu::new(&program);
        let steps = cpu.run(BUDGET)?;
        debug!(steps, "halted");
        Ok(cpu.regs[0].to_string())
    } else {
        Ok(divisor_sum_shortcut(&program, 1, BUDGET)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_to_halt() {
        let example = "#ip 0\nseti 5 0 1\nseti 6 0 2\naddi 0 1 0\naddr 1 2 3\nsetr 1 0 0\nseti 8 0 4\nseti 9 0 5\n";
        assert_eq!(solve(1, example).unwrap(), "6");
    }

    // sums the divisors of 12, or of 28 when r0 starts at 1
    const DIVISORS: &str = "\
#ip 3
addi 3 16 3
seti 1 0 1
seti 1 0 2
mulr 1 2 4
eqrr 4 5 4
addr 4 3 3
addi 3 1 3
addr 1 0 0
addi 2 1 2
gtrr 2 5 4
addr 3 4 3
seti 2 0 3
addi 1 1 1
gtrr 1 5 4
addr 4 3 3
seti 1 0 3
mulr 3 3 3
seti 12 0 5
muli 0 16 4
addr 5 4 5
seti 0 0 0
seti 0 0 3
";

    #[test]
    fn shortcut_agrees_with_emulation() {
        assert_eq!(solve(1, DIVISORS).unwrap(), "28");
        assert_eq!(solve(2, DIVISORS).unwrap(), "56");

        let program: Program = DIVISORS.parse().unwrap();
        let mut cpu = Cpu::new(&program);
        cpu.regs[0] = 1;
        cpu.run(BUDGET).unwrap();
        assert_eq!(cpu.regs[0], 56);
        assert_eq!(divisor_sum_shortcut(&program, 0, BUDGET).unwrap(), 28);
    }

    #[test]
    fn divisor_sums() {
        assert_eq!(sum_of_divisors(1), 1);
        assert_eq!(sum_of_divisors(7), 8);
        assert_eq!(sum_of_divisors(36), 91);
    }

    #[test]
    fn setup_that_never_returns_is_cut_off() {
        let spin: Program = "#ip 1\nseti -1 0 1\n".parse().unwrap();
        assert!(divisor_sum_shortcut(&spin, 1, 1000).is_err());
    }
}
