//! The 256 entry opcode table. Every byte decodes to something: unassigned
//! slots fall back to NOPs whose addressing mode (and so byte length and
//! cycle cost) follows the low five bits of the opcode, keeping PC movement
//! and disassembly deterministic for any byte stream.

use crate::AddressMode::{
    Absolute, AbsoluteX, AbsoluteY, Immediate, Implied, Indirect, IndirectX, IndirectY, Relative,
    ZeroPage, ZeroPageX, ZeroPageY,
};
use crate::Opcode::{
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC, CLD, CLI, CLV, CMP, CPX,
    CPY, DCP, DEC, DEX, DEY, EOR, INC, INX, INY, ISC, JMP, JSR, LAX, LDA, LDX, LDY, LSR, NOP, ORA,
    PHA, PHP, PLA, PLP, RLA, ROL, ROR, RRA, RTI, RTS, SAX, SBC, SEC, SED, SEI, SLO, SRE, STA, STX,
    STY, TAX, TAY, TRB, TSB, TSX, TXA, TXS, TYA,
};
use crate::{AddressMode, Opcode, Operation};

const fn op(op: Opcode, mode: AddressMode, cycles: u8) -> Operation {
    Operation { op, mode, cycles }
}

/// `OPTABLE` maps every opcode byte to its operation, addressing mode and
/// base cycle cost. BRK decodes as a relative so it consumes the padding
/// byte a real part skips.
#[rustfmt::skip]
pub static OPTABLE: [Operation; 256] = [
    op(BRK, Relative, 7),   // 0x00
    op(ORA, IndirectX, 6),  // 0x01
    op(NOP, Immediate, 2),  // 0x02
    op(SLO, IndirectX, 8),  // 0x03
    op(TSB, ZeroPage, 5),   // 0x04
    op(ORA, ZeroPage, 3),   // 0x05
    op(ASL, ZeroPage, 5),   // 0x06
    op(SLO, ZeroPage, 5),   // 0x07
    op(PHP, Implied, 3),    // 0x08
    op(ORA, Immediate, 2),  // 0x09
    op(ASL, Implied, 2),    // 0x0A
    op(NOP, Immediate, 2),  // 0x0B
    op(TSB, Absolute, 6),   // 0x0C
    op(ORA, Absolute, 4),   // 0x0D
    op(ASL, Absolute, 6),   // 0x0E
    op(SLO, Absolute, 6),   // 0x0F
    op(BPL, Relative, 2),   // 0x10
    op(ORA, IndirectY, 5),  // 0x11
    op(NOP, Implied, 1),    // 0x12
    op(SLO, IndirectY, 8),  // 0x13
    op(TRB, ZeroPage, 5),   // 0x14
    op(ORA, ZeroPageX, 4),  // 0x15
    op(ASL, ZeroPageX, 6),  // 0x16
    op(SLO, ZeroPageX, 6),  // 0x17
    op(CLC, Implied, 2),    // 0x18
    op(ORA, AbsoluteY, 4),  // 0x19
    op(NOP, Implied, 1),    // 0x1A
    op(SLO, AbsoluteY, 7),  // 0x1B
    op(TRB, Absolute, 6),   // 0x1C
    op(ORA, AbsoluteX, 4),  // 0x1D
    op(ASL, AbsoluteX, 7),  // 0x1E
    op(SLO, AbsoluteX, 7),  // 0x1F
    op(JSR, Absolute, 6),   // 0x20
    op(AND, IndirectX, 6),  // 0x21
    op(NOP, Immediate, 2),  // 0x22
    op(RLA, IndirectX, 8),  // 0x23
    op(BIT, ZeroPage, 3),   // 0x24
    op(AND, ZeroPage, 3),   // 0x25
    op(ROL, ZeroPage, 5),   // 0x26
    op(RLA, ZeroPage, 5),   // 0x27
    op(PLP, Implied, 4),    // 0x28
    op(AND, Immediate, 2),  // 0x29
    op(ROL, Implied, 2),    // 0x2A
    op(NOP, Immediate, 2),  // 0x2B
    op(BIT, Absolute, 4),   // 0x2C
    op(AND, Absolute, 4),   // 0x2D
    op(ROL, Absolute, 6),   // 0x2E
    op(RLA, Absolute, 6),   // 0x2F
    op(BMI, Relative, 2),   // 0x30
    op(AND, IndirectY, 5),  // 0x31
    op(NOP, Implied, 1),    // 0x32
    op(RLA, IndirectY, 8),  // 0x33
    op(NOP, ZeroPageX, 3),  // 0x34
    op(AND, ZeroPageX, 4),  // 0x35
    op(ROL, ZeroPageX, 6),  // 0x36
    op(RLA, ZeroPageX, 6),  // 0x37
    op(SEC, Implied, 2),    // 0x38
    op(AND, AbsoluteY, 4),  // 0x39
    op(NOP, Implied, 1),    // 0x3A
    op(RLA, AbsoluteY, 7),  // 0x3B
    op(NOP, AbsoluteX, 3),  // 0x3C
    op(AND, AbsoluteX, 4),  // 0x3D
    op(ROL, AbsoluteX, 7),  // 0x3E
    op(RLA, AbsoluteX, 7),  // 0x3F
    op(RTI, Implied, 6),    // 0x40
    op(EOR, IndirectX, 6),  // 0x41
    op(NOP, Immediate, 2),  // 0x42
    op(SRE, IndirectX, 8),  // 0x43
    op(NOP, ZeroPage, 2),   // 0x44
    op(EOR, ZeroPage, 3),   // 0x45
    op(LSR, ZeroPage, 5),   // 0x46
    op(SRE, ZeroPage, 5),   // 0x47
    op(PHA, Implied, 3),    // 0x48
    op(EOR, Immediate, 2),  // 0x49
    op(LSR, Implied, 2),    // 0x4A
    op(NOP, Immediate, 2),  // 0x4B
    op(JMP, Absolute, 3),   // 0x4C
    op(EOR, Absolute, 4),   // 0x4D
    op(LSR, Absolute, 6),   // 0x4E
    op(SRE, Absolute, 6),   // 0x4F
    op(BVC, Relative, 2),   // 0x50
    op(EOR, IndirectY, 5),  // 0x51
    op(NOP, Implied, 1),    // 0x52
    op(SRE, IndirectY, 8),  // 0x53
    op(NOP, ZeroPageX, 3),  // 0x54
    op(EOR, ZeroPageX, 4),  // 0x55
    op(LSR, ZeroPageX, 6),  // 0x56
    op(SRE, ZeroPageX, 6),  // 0x57
    op(CLI, Implied, 2),    // 0x58
    op(EOR, AbsoluteY, 4),  // 0x59
    op(NOP, Implied, 1),    // 0x5A
    op(SRE, AbsoluteY, 7),  // 0x5B
    op(NOP, AbsoluteX, 3),  // 0x5C
    op(EOR, AbsoluteX, 4),  // 0x5D
    op(LSR, AbsoluteX, 7),  // 0x5E
    op(SRE, AbsoluteX, 7),  // 0x5F
    op(RTS, Implied, 6),    // 0x60
    op(ADC, IndirectX, 6),  // 0x61
    op(NOP, Immediate, 2),  // 0x62
    op(RRA, IndirectX, 8),  // 0x63
    op(NOP, ZeroPage, 2),   // 0x64
    op(ADC, ZeroPage, 3),   // 0x65
    op(ROR, ZeroPage, 5),   // 0x66
    op(RRA, ZeroPage, 5),   // 0x67
    op(PLA, Implied, 4),    // 0x68
    op(ADC, Immediate, 2),  // 0x69
    op(ROR, Implied, 2),    // 0x6A
    op(NOP, Immediate, 2),  // 0x6B
    op(JMP, Indirect, 5),   // 0x6C
    op(ADC, Absolute, 4),   // 0x6D
    op(ROR, Absolute, 6),   // 0x6E
    op(RRA, Absolute, 6),   // 0x6F
    op(BVS, Relative, 2),   // 0x70
    op(ADC, IndirectY, 5),  // 0x71
    op(NOP, Implied, 1),    // 0x72
    op(RRA, IndirectY, 8),  // 0x73
    op(NOP, ZeroPageX, 3),  // 0x74
    op(ADC, ZeroPageX, 4),  // 0x75
    op(ROR, ZeroPageX, 6),  // 0x76
    op(RRA, ZeroPageX, 6),  // 0x77
    op(SEI, Implied, 2),    // 0x78
    op(ADC, AbsoluteY, 4),  // 0x79
    op(NOP, Implied, 1),    // 0x7A
    op(RRA, AbsoluteY, 7),  // 0x7B
    op(NOP, AbsoluteX, 3),  // 0x7C
    op(ADC, AbsoluteX, 4),  // 0x7D
    op(ROR, AbsoluteX, 7),  // 0x7E
    op(RRA, AbsoluteX, 7),  // 0x7F
    op(NOP, Immediate, 2),  // 0x80
    op(STA, IndirectX, 6),  // 0x81
    op(NOP, Immediate, 2),  // 0x82
    op(SAX, IndirectX, 6),  // 0x83
    op(STY, ZeroPage, 3),   // 0x84
    op(STA, ZeroPage, 3),   // 0x85
    op(STX, ZeroPage, 3),   // 0x86
    op(SAX, ZeroPage, 3),   // 0x87
    op(DEY, Implied, 2),    // 0x88
    op(NOP, Immediate, 2),  // 0x89
    op(TXA, Implied, 2),    // 0x8A
    op(NOP, Immediate, 2),  // 0x8B
    op(STY, Absolute, 4),   // 0x8C
    op(STA, Absolute, 4),   // 0x8D
    op(STX, Absolute, 4),   // 0x8E
    op(SAX, Absolute, 4),   // 0x8F
    op(BCC, Relative, 2),   // 0x90
    op(STA, IndirectY, 6),  // 0x91
    op(NOP, Implied, 1),    // 0x92
    op(NOP, IndirectY, 3),  // 0x93
    op(STY, ZeroPageX, 4),  // 0x94
    op(STA, ZeroPageX, 4),  // 0x95
    op(STX, ZeroPageY, 4),  // 0x96
    op(SAX, ZeroPageY, 4),  // 0x97
    op(TYA, Implied, 2),    // 0x98
    op(STA, AbsoluteY, 5),  // 0x99
    op(TXS, Implied, 2),    // 0x9A
    op(NOP, AbsoluteY, 3),  // 0x9B
    op(NOP, AbsoluteX, 3),  // 0x9C
    op(STA, AbsoluteX, 5),  // 0x9D
    op(NOP, AbsoluteY, 3),  // 0x9E
    op(NOP, AbsoluteX, 3),  // 0x9F
    op(LDY, Immediate, 2),  // 0xA0
    op(LDA, IndirectX, 6),  // 0xA1
    op(LDX, Immediate, 2),  // 0xA2
    op(LAX, IndirectX, 6),  // 0xA3
    op(LDY, ZeroPage, 3),   // 0xA4
    op(LDA, ZeroPage, 3),   // 0xA5
    op(LDX, ZeroPage, 3),   // 0xA6
    op(LAX, ZeroPage, 3),   // 0xA7
    op(TAY, Implied, 2),    // 0xA8
    op(LDA, Immediate, 2),  // 0xA9
    op(TAX, Implied, 2),    // 0xAA
    op(LAX, Immediate, 2),  // 0xAB
    op(LDY, Absolute, 4),   // 0xAC
    op(LDA, Absolute, 4),   // 0xAD
    op(LDX, Absolute, 4),   // 0xAE
    op(LAX, Absolute, 4),   // 0xAF
    op(BCS, Relative, 2),   // 0xB0
    op(LDA, IndirectY, 5),  // 0xB1
    op(NOP, Implied, 1),    // 0xB2
    op(LAX, IndirectY, 5),  // 0xB3
    op(LDY, ZeroPageX, 4),  // 0xB4
    op(LDA, ZeroPageX, 4),  // 0xB5
    op(LDX, ZeroPageY, 4),  // 0xB6
    op(LAX, ZeroPageY, 4),  // 0xB7
    op(CLV, Implied, 2),    // 0xB8
    op(LDA, AbsoluteY, 4),  // 0xB9
    op(TSX, Implied, 2),    // 0xBA
    op(NOP, AbsoluteY, 3),  // 0xBB
    op(LDY, AbsoluteX, 4),  // 0xBC
    op(LDA, AbsoluteX, 4),  // 0xBD
    op(LDX, AbsoluteY, 4),  // 0xBE
    op(LAX, AbsoluteY, 4),  // 0xBF
    op(CPY, Immediate, 2),  // 0xC0
    op(CMP, IndirectX, 6),  // 0xC1
    op(NOP, Immediate, 2),  // 0xC2
    op(DCP, IndirectX, 8),  // 0xC3
    op(CPY, ZeroPage, 5),   // 0xC4
    op(CMP, ZeroPage, 3),   // 0xC5
    op(DEC, ZeroPage, 5),   // 0xC6
    op(DCP, ZeroPage, 5),   // 0xC7
    op(INY, Implied, 2),    // 0xC8
    op(CMP, Immediate, 2),  // 0xC9
    op(DEX, Implied, 2),    // 0xCA
    op(NOP, Immediate, 2),  // 0xCB
    op(CPY, Absolute, 6),   // 0xCC
    op(CMP, Absolute, 4),   // 0xCD
    op(DEC, Absolute, 6),   // 0xCE
    op(DCP, Absolute, 6),   // 0xCF
    op(BNE, Relative, 2),   // 0xD0
    op(CMP, IndirectY, 5),  // 0xD1
    op(NOP, Implied, 1),    // 0xD2
    op(DCP, IndirectY, 8),  // 0xD3
    op(NOP, ZeroPageX, 3),  // 0xD4
    op(CMP, ZeroPageX, 4),  // 0xD5
    op(DEC, ZeroPageX, 6),  // 0xD6
    op(DCP, ZeroPageX, 6),  // 0xD7
    op(CLD, Implied, 2),    // 0xD8
    op(CMP, AbsoluteY, 4),  // 0xD9
    op(NOP, Implied, 1),    // 0xDA
    op(DCP, AbsoluteY, 7),  // 0xDB
    op(NOP, AbsoluteX, 3),  // 0xDC
    op(CMP, AbsoluteX, 4),  // 0xDD
    op(DEC, AbsoluteX, 7),  // 0xDE
    op(DCP, AbsoluteX, 7),  // 0xDF
    op(CPX, Immediate, 2),  // 0xE0
    op(SBC, IndirectX, 6),  // 0xE1
    op(NOP, Immediate, 2),  // 0xE2
    op(ISC, IndirectX, 8),  // 0xE3
    op(CPX, ZeroPage, 5),   // 0xE4
    op(SBC, ZeroPage, 3),   // 0xE5
    op(INC, ZeroPage, 5),   // 0xE6
    op(ISC, ZeroPage, 5),   // 0xE7
    op(INX, Implied, 2),    // 0xE8
    op(SBC, Immediate, 2),  // 0xE9
    op(NOP, Implied, 2),    // 0xEA
    op(SBC, Immediate, 2),  // 0xEB
    op(CPX, Absolute, 6),   // 0xEC
    op(SBC, Absolute, 4),   // 0xED
    op(INC, Absolute, 6),   // 0xEE
    op(ISC, Absolute, 6),   // 0xEF
    op(BEQ, Relative, 2),   // 0xF0
    op(SBC, IndirectY, 5),  // 0xF1
    op(NOP, Implied, 1),    // 0xF2
    op(ISC, IndirectY, 8),  // 0xF3
    op(NOP, ZeroPageX, 3),  // 0xF4
    op(SBC, ZeroPageX, 4),  // 0xF5
    op(INC, ZeroPageX, 6),  // 0xF6
    op(ISC, ZeroPageX, 6),  // 0xF7
    op(SED, Implied, 2),    // 0xF8
    op(SBC, AbsoluteY, 4),  // 0xF9
    op(NOP, Implied, 1),    // 0xFA
    op(ISC, AbsoluteY, 7),  // 0xFB
    op(NOP, AbsoluteX, 3),  // 0xFC
    op(SBC, AbsoluteX, 4),  // 0xFD
    op(INC, AbsoluteX, 7),  // 0xFE
    op(ISC, AbsoluteX, 7),  // 0xFF
];
