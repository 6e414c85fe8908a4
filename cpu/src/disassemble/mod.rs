//! disassemble renders single instructions from memory, plus the per mode
//! operand formatting the trace log uses.

use std::fmt::Write as _;
use std::num::Wrapping;

use memory::Memory;

use crate::{AddressMode, OPTABLE};

/// Format an operand the way the trace log shows it, from the decoded
/// operand byte `b`, effective address `v` and pre index target `t`.
#[must_use]
pub fn operand(mode: AddressMode, b: u8, v: u16, t: u16) -> String {
    match mode {
        AddressMode::Immediate => format!("#${b:02X}"),
        AddressMode::ZeroPage => format!("${v:02X}"),
        AddressMode::ZeroPageX => format!("${t:02X},X"),
        AddressMode::ZeroPageY => format!("${t:02X},Y"),
        AddressMode::Absolute => format!("${v:04X}"),
        AddressMode::AbsoluteX => format!("${t:04X},X"),
        AddressMode::AbsoluteY => format!("${t:04X},Y"),
        AddressMode::Indirect => format!("(${t:04X})"),
        AddressMode::IndirectX => format!("(${t:02X},X)"),
        AddressMode::IndirectY => format!("(${t:02X}),Y"),
        AddressMode::Relative => format!("${b:02X}"),
        AddressMode::Implied => String::new(),
    }
}

/// step will take the given pc and Memory implementation and disassemble
/// the instruction at that location. It returns the rendered line as well
/// as the next pc to continue disassembling from.
/// As a real 6502 will wrap around if asked to step off the end this does
/// the same: disassembling 0xFFFF with a multi byte opcode reads 0x0000
/// and 0x0001 and returns a pc from that area as well.
#[must_use]
pub fn step(pc: Wrapping<u16>, r: &dyn Memory) -> (String, Wrapping<u16>) {
    let op = r.read(pc.0);
    let pc1 = r.read((pc + Wrapping(1)).0);
    let pc2 = r.read((pc + Wrapping(2)).0);

    // Sign extend the offset byte so it can be added to PC for branch
    // targets.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    let pc116 = Wrapping(i16::from(pc1 as i8) as u16);

    let entry = OPTABLE[usize::from(op)];
    let opcode = entry.op.to_string();

    let mut out = format!("{:04X} {op:02X} ", pc.0);
    let mut count = pc + Wrapping(2);

    match entry.mode {
        AddressMode::Immediate => {
            write!(out, "{pc1:02X}      {opcode} #${pc1:02X}").unwrap();
        }
        AddressMode::ZeroPage => {
            write!(out, "{pc1:02X}      {opcode} ${pc1:02X}").unwrap();
        }
        AddressMode::ZeroPageX => {
            write!(out, "{pc1:02X}      {opcode} ${pc1:02X},X").unwrap();
        }
        AddressMode::ZeroPageY => {
            write!(out, "{pc1:02X}      {opcode} ${pc1:02X},Y").unwrap();
        }
        AddressMode::IndirectX => {
            write!(out, "{pc1:02X}      {opcode} (${pc1:02X},X)").unwrap();
        }
        AddressMode::IndirectY => {
            write!(out, "{pc1:02X}      {opcode} (${pc1:02X}),Y").unwrap();
        }
        AddressMode::Absolute => {
            write!(out, "{pc1:02X} {pc2:02X}   {opcode} ${pc2:02X}{pc1:02X}").unwrap();
            count += Wrapping(1);
        }
        AddressMode::AbsoluteX => {
            write!(out, "{pc1:02X} {pc2:02X}   {opcode} ${pc2:02X}{pc1:02X},X").unwrap();
            count += Wrapping(1);
        }
        AddressMode::AbsoluteY => {
            write!(out, "{pc1:02X} {pc2:02X}   {opcode} ${pc2:02X}{pc1:02X},Y").unwrap();
            count += Wrapping(1);
        }
        AddressMode::Indirect => {
            write!(out, "{pc1:02X} {pc2:02X}   {opcode} (${pc2:02X}{pc1:02X})").unwrap();
            count += Wrapping(1);
        }
        AddressMode::Implied => {
            write!(out, "        {opcode}").unwrap();
            count -= Wrapping(1);
        }
        AddressMode::Relative => {
            write!(
                out,
                "{pc1:02X}      {opcode} ${pc1:02X} ({:04X})",
                (pc + pc116 + Wrapping(2u16)).0
            )
            .unwrap();
        }
    }

    (out, count)
}
