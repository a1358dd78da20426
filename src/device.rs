//! The wrist device: a six-register machine with sixteen opcodes and an
//! optionally bound instruction pointer. Days 16, 19 and 21 run it.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("unknown opcode mnemonic {0:?}")]
    Mnemonic(String),
    #[error("register {0} out of range")]
    Register(i64),
    #[error("no halt within {0} steps")]
    Budget(u64),
    #[error("arithmetic overflow")]
    Overflow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    Addr, Addi, Mulr, Muli, Banr, Bani, Borr, Bori,
    Setr, Seti, Gtir, Gtri, Gtrr, Eqir, Eqri, Eqrr,
}

impl Opcode {
    pub const ALL: [Opcode; 16] = {
        use Opcode::*;
        [Addr, Addi, Mulr, Muli, Banr, Bani, Borr, Bori, Setr, Seti, Gtir, Gtri, Gtrr, Eqir, Eqri, Eqrr]
    };

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Addr => "addr", Addi => "addi", Mulr => "mulr", Muli => "muli",
            Banr => "banr", Bani => "bani", Borr => "borr", Bori => "bori",
            Setr => "setr", Seti => "seti", Gtir => "gtir", Gtri => "gtri",
            Gtrr => "gtrr", Eqir => "eqir", Eqri => "eqri", Eqrr => "eqrr",
        }
    }

    /// Whether operand `a` (resp. `b`) names a register rather than an immediate.
    pub fn reads(self) -> (bool, bool) {
        use Opcode::*;
        match self {
            Addr | Mulr | Banr | Borr | Gtrr | Eqrr => (true, true),
            Addi | Muli | Bani | Bori | Gtri | Eqri => (true, false),
            Gtir | Eqir => (false, true),
            Setr => (true, false),
            Seti => (false, false),
        }
    }

    /// Executes the operation on `regs`, writing register `c`.
    pub fn apply(self, regs: &mut [i64], a: i64, b: i64, c: i64) -> Result<(), DeviceError> {
        use Opcode::*;
        let reg = |r: i64| -> Result<i64, DeviceError> {
            usize::try_from(r).ok().and_then(|r| regs.get(r).copied()).ok_or(DeviceError::Register(r))
        };
        let (ra, rb) = self.reads();
        let va = if ra {reg(a)?} else {a};
        let vb = if rb {reg(b)?} else {b};
        let v = match self {
            Addr | Addi => va.checked_add(vb).ok_or(DeviceError::Overflow)?,
            Mulr | Muli => va.checked_mul(vb).ok_or(DeviceError::Overflow)?,
            Banr | Bani => va & vb,
            Borr | Bori => va | vb,
            Setr | Seti => va,
            Gtir | Gtri | Gtrr => (va > vb) as i64,
            Eqir | Eqri | Eqrr => (va == vb) as i64,
        };
        let slot = usize::try_from(c).ok().and_then(|c| regs.get_mut(c)).ok_or(DeviceError::Register(c))?;
        *slot = v;
        Ok(())
    }
}

impl FromStr for Opcode {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL.iter().copied().find(|op| op.mnemonic() == s)
            .ok_or_else(|| DeviceError::Mnemonic(s.to_owned()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub op: Opcode,
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (op, operands) = s.trim().split_once(' ').context("instruction without operands")?;
        let [a, b, c] = crate::parse::fixed_ints(operands)?;
        let op = op.parse()?;
        Ok(Instruction {op, a, b, c})
    }
}

/// A listing headed by `#ip N`.
#[derive(Clone, Debug)]
pub struct Program {
    pub ip_reg: usize,
    pub code: Vec<Instruction>,
}

impl FromStr for Program {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
        let header = lines.next().context("empty program")?;
        let ip_reg = header.strip_prefix("#ip ")
            .with_context(|| format!("expected #ip header, got {:?}", header))?
            .parse::<usize>()?;
        anyhow::ensure!(ip_reg < 6, "ip bound to nonexistent register {}", ip_reg);
        let code = lines.map(|line| line.parse().with_context(|| format!("in line {:?}", line)))
            .collect::<anyhow::Result<_>>()?;
        Ok(Program {ip_reg, code})
    }
}

pub struct Cpu<'p> {
    pub program: &'p Program,
    pub regs: [i64; 6],
    pub ip: i64,
}

impl<'p> Cpu<'p> {
    pub fn new(program: &'p Program) -> Self {
        Cpu {program, regs: [0; 6], ip: 0}
    }

    pub fn halted(&self) -> bool {
        usize::try_from(self.ip).map_or(true, |ip| ip >= self.program.code.len())
    }

    /// The instruction about to execute, if any.
    pub fn current(&self) -> Option<&'p Instruction> {
        usize::try_from(self.ip).ok().and_then(|ip| self.program.code.get(ip))
    }

    pub fn step(&mut self) -> Result<(), DeviceError> {
        let Some(&Instruction {op, a, b, c}) = self.current() else {return Ok(())};
        self.regs[self.program.ip_reg] = self.ip;
        op.apply(&mut self.regs, a, b, c)?;
        self.ip = self.regs[self.program.ip_reg] + 1;
        Ok(())
    }

    /// Runs until halt, returning the number of steps taken.
    pub fn run(&mut self, budget: u64) -> Result<u64, DeviceError> {
        for steps in 0 .. budget {
            if self.halted() {return Ok(steps)}
            self.step()?;
        }
        if self.halted() {Ok(budget)} else {Err(DeviceError::Budget(budget))}
    }
}
