use anyhow::{bail, ensure, Context, Result};

use crate::device::Opcode;
use crate::parse::fixed_ints;

type Regs = [i64; 4];

struct Sample {before: Regs, instr: [i64; 4], after: Regs}

impl Sample {
    /// Bitmask over `Opcode::ALL` of the opcodes turning `before` into `after`.
    fn candidates(&self) -> u16 {
        let [_, a, b, c] = self.instr;
        Opcode::ALL.iter().enumerate().filter(|(_, op)| {
            let mut regs = self.before;
            op.apply(&mut regs, a, b, c).is_ok() && regs == self.after
        }).fold(0, |mask, (k, _)| mask | 1 << k)
    }
}

fn parse(input: &str) -> Result<(Vec<Sample>, Vec<[i64; 4]>)> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();
    let mut samples = vec![];
    while let Some(before) = lines.next_if(|line| line.starts_with("Before:")) {
        let (Some(instr), Some(after)) = (lines.next(), lines.next()) else {bail!("truncated sample")};
        ensure!(after.starts_with("After:"), "expected After: line, got {:?}", after);
        samples.push(Sample {before: fixed_ints(before)?, instr: fixed_ints(instr)?, after: fixed_ints(after)?});
    }
    let program = lines.map(fixed_ints).collect::<Result<Vec<_>, _>>()?;
    Ok((samples, program))
}

/// Pins every opcode number to an opcode: repeatedly fix numbers left with a
/// single candidate and strike that opcode from the rest.
fn resolve(mut candidates: [u16; 16]) -> Result<[Opcode; 16]> {
    let mut table = [None; 16];
    while let Some(num) = (0 .. 16).find(|&n| table[n].is_none() && candidates[n].count_ones() == 1) {
        let k = candidates[num].trailing_zeros();
        table[num] = Some(Opcode::ALL[k as usize]);
        for other in candidates.iter_mut() {*other &= !(1 << k)}
    }
    let mut resolved = [Opcode::Addr; 16];
    for (num, op) in table.into_iter().enumerate() {
        resolved[num] = op.with_context(|| format!("opcode number {} is ambiguous", num))?;
    }
    Ok(resolved)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (samples, program) = parse(input)?;
    if part == 1 {
        return Ok(samples.iter().filter(|s| s.candidates().count_ones() >= 3).count().to_string())
    }

    let mut candidates = [u16::MAX; 16];
    for sample in &samples {
        let num = usize::try_from(sample.instr[0]).ok().filter(|&n| n < 16)
            .with_context(|| format!("opcode number {} out of range", sample.instr[0]))?;
        candidates[num] &= sample.candidates();
    }
    let table = resolve(candidates)?;

    let mut regs: Regs = [0; 4];
    for [num, a, b, c] in program {
        let op = usize::try_from(num).ok().and_then(|n| table.get(n)).context("opcode number out of range")?;
        op.apply(&mut regs, a, b, c)?;
    }
    Ok(regs[0].to_string())
}
