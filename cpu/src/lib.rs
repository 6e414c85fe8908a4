//! cpu defines an instruction stepped 6502 for embedding inside larger
//! system emulations. Each `step` fetches, decodes and executes one whole
//! instruction and accounts its cycles to an optional clock consumer; the
//! stable NMOS undocumented opcodes and the CMOS TRB/TSB pair are included.

use std::fmt;
use std::fmt::Write as _;
use std::num::Wrapping;

use chip::{Ticker, Type, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use color_eyre::eyre::{eyre, Result};
use irq::Sender;
use memory::Memory;
use ringbuffer::{AllocRingBuffer, RingBufferExt, RingBufferWrite};
use strum_macros::Display;
use thiserror::Error;

mod optable;
pub use crate::optable::OPTABLE;

pub mod disassemble;


/// `AddressMode` defines the 6502 addressing modes.
#[derive(Clone, Copy, Display, Debug, Default, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// `Immediate` mode uses the constant following the opcode as the
    /// operand. Example: LDA #04 loads 0x04 into A.
    #[default]
    Immediate,

    /// `ZeroPage` references the first 256 bytes.
    /// Example: LDA 0F loads the value from 0x0F into A.
    ZeroPage,

    /// `ZeroPageX` references the zero page with addition from the X
    /// register. Overflow simply wraps within the page.
    ZeroPageX,

    /// `ZeroPageY` references the zero page with addition from the Y
    /// register. Overflow simply wraps within the page.
    ZeroPageY,

    /// `IndirectX` adds X to the given zero page address, then uses that
    /// location and its successor (wrapped within the page) as a pointer to
    /// the final address.
    IndirectX,

    /// `IndirectY` reads a pointer from the given zero page address (the
    /// second byte wraps within the page) and adds Y to it to form the
    /// final address.
    IndirectY,

    /// `Absolute` references a direct 16 bit constant as an address.
    Absolute,

    /// `AbsoluteX` adds X to a direct 16 bit constant to form the final
    /// address.
    AbsoluteX,

    /// `AbsoluteY` adds Y to a direct 16 bit constant to form the final
    /// address.
    AbsoluteY,

    /// `Indirect` loads a pointer from the given address and dereferences
    /// it. Only JMP uses it. When the pointer sits on the last byte of a
    /// page the high byte is fetched from the start of that same page, as
    /// on the original part.
    Indirect,

    /// `Implied` takes no operand bytes and operates on a register
    /// (commonly A) or has no data at all.
    Implied,

    /// `Relative` adds its operand as a signed value to PC. Used for
    /// branching.
    Relative,
}

/// `Opcode` defines the operations this core implements: every documented
/// one plus the stable undocumented loads/stores/read-modify-writes and the
/// CMOS TRB/TSB pair.
#[derive(Clone, Copy, Debug, Display, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Add with carry the operand into A. Honors decimal mode unless the
    /// variant lacks it.
    ADC,

    /// Bitwise AND of the operand into A.
    AND,

    /// Arithmetic shift left of A or the operand cell. Bit 7 lands in C.
    ASL,

    /// Branch if carry is clear.
    BCC,

    /// Branch if carry is set.
    BCS,

    /// Branch if equal (Z set).
    BEQ,

    /// Bit test: N and V copy bits 7/6 of the operand, Z from A AND operand.
    BIT,

    /// Branch on minus (N set).
    BMI,

    /// Branch if not equal (Z clear).
    BNE,

    /// Branch on plus (N clear).
    BPL,

    /// Break: a software interrupt through the IRQ vector. The pushed P has
    /// the B bit set to mark the source.
    #[default]
    BRK,

    /// Branch if overflow clear.
    BVC,

    /// Branch if overflow set.
    BVS,

    /// Clear the C flag.
    CLC,

    /// Clear the D flag.
    CLD,

    /// Clear the I flag.
    CLI,

    /// Clear the V flag.
    CLV,

    /// Compare the operand against A.
    CMP,

    /// Compare the operand against X.
    CPX,

    /// Compare the operand against Y.
    CPY,

    /// Undocumented: decrement the operand cell then compare it against A.
    DCP,

    /// Decrement the operand cell.
    DEC,

    /// Decrement the X register.
    DEX,

    /// Decrement the Y register.
    DEY,

    /// Exclusive OR of the operand into A.
    EOR,

    /// Increment the operand cell.
    INC,

    /// Increment the X register.
    INX,

    /// Increment the Y register.
    INY,

    /// Undocumented: increment the operand cell then SBC it from A.
    ISC,

    /// Jump to the effective address.
    JMP,

    /// Jump to a subroutine, pushing the return point (less one) first.
    JSR,

    /// Undocumented: load the operand into both A and X.
    LAX,

    /// Load the A register from the operand.
    LDA,

    /// Load the X register from the operand.
    LDX,

    /// Load the Y register from the operand.
    LDY,

    /// Logical shift right of A or the operand cell. Bit 0 lands in C.
    LSR,

    /// No operation. Burns cycles (and operand bytes) per its table slot.
    NOP,

    /// Bitwise OR of the operand into A.
    ORA,

    /// Push A onto the stack.
    PHA,

    /// Push P onto the stack with the unused and B bits forced set on the
    /// pushed copy.
    PHP,

    /// Pull A from the stack.
    PLA,

    /// Pull P from the stack, forcing the unused bit set and B clear.
    PLP,

    /// Undocumented: ROL the operand cell then AND it into A.
    RLA,

    /// Rotate A or the operand cell left through C.
    ROL,

    /// Rotate A or the operand cell right through C.
    ROR,

    /// Undocumented: ROR the operand cell then ADC it into A.
    RRA,

    /// Return from interrupt: pull P (unused bit set, B clear) then PC.
    /// Unlike RTS the restored PC is used as is.
    RTI,

    /// Return from subroutine: pull PC and resume one byte past it.
    RTS,

    /// Undocumented: store A AND X to the effective address. No flags.
    SAX,

    /// Subtract with borrow the operand from A. Honors decimal mode unless
    /// the variant lacks it.
    SBC,

    /// Set the C flag.
    SEC,

    /// Set the D flag.
    SED,

    /// Set the I flag.
    SEI,

    /// Undocumented: ASL the operand cell then OR it into A.
    SLO,

    /// Undocumented: LSR the operand cell then EOR it into A.
    SRE,

    /// Store the A register at the effective address.
    STA,

    /// Store the X register at the effective address.
    STX,

    /// Store the Y register at the effective address.
    STY,

    /// Transfer A to X.
    TAX,

    /// Transfer A to Y.
    TAY,

    /// Test and reset bits: Z from A AND the cell, then clear A's bits in
    /// the cell. CMOS extension.
    TRB,

    /// Test and set bits: Z from A AND the cell, then set A's bits in the
    /// cell. CMOS extension.
    TSB,

    /// Transfer S to X.
    TSX,

    /// Transfer X to A.
    TXA,

    /// Transfer X to S. No flags are set from S loads.
    TXS,

    /// Transfer Y to A.
    TYA,
}

/// `Operation` ties an opcode to the addressing mode and base cycle cost a
/// particular table slot carries. Taken branches add one cycle at execution
/// time on top of `cycles`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operation {
    /// The operation, such as ADC or LDA.
    pub op: Opcode,
    /// The addressing mode this slot decodes with.
    pub mode: AddressMode,
    /// Base cycle cost charged per execution.
    pub cycles: u8,
}

pub const P_NEGATIVE: u8 = 0x80;
pub const P_OVERFLOW: u8 = 0x40;
/// The unused status bit, which reads back as set on a real part. It is
/// forced on whenever P is loaded from memory.
pub const P_S1: u8 = 0x20;
/// Set only on the copy of P pushed by PHP/BRK, never in the running P.
pub const P_B: u8 = 0x10;
pub const P_DECIMAL: u8 = 0x08;
pub const P_INTERRUPT: u8 = 0x04;
pub const P_ZERO: u8 = 0x02;
pub const P_CARRY: u8 = 0x01;

/// Base of the stack page. Pushes write `STACK_START + S` then decrement S;
/// pulls increment S then read.
pub const STACK_START: u16 = 0x0100;

/// `Register` is a point in time copy of the register file, as recorded
/// into trace entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Register {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub p: u8,
    pub pc: u16,
}

/// `TraceEntry` captures one executed instruction for the trace ring
/// buffer: the register file as it stood before execution, the decoded
/// table entry and operand values and the cycles the instruction cost.
#[derive(Clone, Debug)]
pub struct TraceEntry {
    /// Register file before the instruction ran. `pc` is the instruction
    /// address.
    pub reg: Register,
    /// The table entry the opcode byte resolved to.
    pub op: Operation,
    /// The raw opcode byte.
    pub raw: u8,
    /// The decoded operand byte.
    pub b: u8,
    /// The effective address.
    pub v: u16,
    /// The pre index target address.
    pub t: u16,
    /// Cycles attributed to this instruction.
    pub cycles: usize,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operand = disassemble::operand(self.op.mode, self.b, self.v, self.t);
        write!(
            f,
            "{:04X}: {:02X} {:>3} {:<8} p={:08b} s={:02X} a={:02X} x={:02X} y={:02X} v={:04X} b={:02X} t={:04X} c={}",
            self.reg.pc,
            self.raw,
            self.op.op.to_string(),
            operand,
            self.reg.p,
            self.reg.s,
            self.reg.a,
            self.reg.x,
            self.reg.y,
            self.v,
            self.b,
            self.t,
            self.cycles
        )
    }
}

/// Construction parameters for a [`Cpu`].
pub struct ChipDef<'a> {
    /// The CPU variant to emulate.
    pub variant: Type,

    /// Memory implementation the core drives for all bus traffic,
    /// including vector reads.
    pub ram: &'a mut dyn Memory,

    /// Optional level triggered interrupt source, polled at instruction
    /// boundaries and gated by the I flag.
    pub irq: Option<&'a dyn Sender>,

    /// Optional sink receiving one formatted trace line per executed
    /// instruction.
    pub debug: Option<&'a dyn Fn(String)>,
}

/// `CpuError` defines conditions a host can match on, beyond internal
/// invariant failures.
#[derive(Error, Debug)]
pub enum CpuError {
    /// The CPU is halted; only `reset` leaves this state.
    #[error("CPU halted at PC {pc:04X}")]
    Halted {
        /// PC at the time the halted step was attempted.
        pc: u16,
    },
}

/// An instruction stepped 6502. Not safe to drive from more than one
/// thread; every state transition happens inside a single `step` call and
/// registers are only meaningful between steps.
pub struct Cpu<'a> {
    // The specific variant implemented.
    variant: Type,

    /// Accumulator register.
    pub a: Wrapping<u8>,

    /// X index register.
    pub x: Wrapping<u8>,

    /// Y index register.
    pub y: Wrapping<u8>,

    /// Stack pointer. The stack occupies 0x0100..=0x01FF.
    pub s: Wrapping<u8>,

    /// Status register.
    pub p: u8,

    /// Program counter.
    pub pc: Wrapping<u16>,

    /// Memory implementation.
    pub ram: &'a mut dyn Memory,

    ticker: Option<&'a mut dyn Ticker>,
    irq: Option<&'a dyn Sender>,
    debug: Option<&'a dyn Fn(String)>,
    trace: Option<AllocRingBuffer<TraceEntry>>,

    halted: bool,

    // Cycles attributed to the instruction currently (or most recently)
    // stepped.
    step_cycles: usize,

    // Total cycles since construction.
    clocks: usize,
}

impl<'a> Cpu<'a> {
    /// Build a new Cpu around the given definition. Initial state matches a
    /// part that has come through its reset sequence: S = 0xFD, P has the
    /// unused and interrupt disable bits set, A/X/Y/PC are zero. Hosts
    /// either set `pc` directly or call [`Cpu::reset`] to load it from the
    /// reset vector.
    #[must_use]
    pub fn new(def: ChipDef<'a>) -> Self {
        Cpu {
            variant: def.variant,
            a: Wrapping(0x00),
            x: Wrapping(0x00),
            y: Wrapping(0x00),
            s: Wrapping(0xFD),
            p: P_S1 | P_INTERRUPT,
            pc: Wrapping(0x0000),
            ram: def.ram,
            ticker: None,
            irq: def.irq,
            debug: def.debug,
            trace: None,
            halted: false,
            step_cycles: 0,
            clocks: 0,
        }
    }

    /// Attach a clock consumer. It receives exactly one `tick` per emulated
    /// cycle, synchronously, while the owning step runs.
    pub fn attach_ticker(&mut self, t: &'a mut dyn Ticker) {
        self.ticker = Some(t);
    }

    /// Record executed instructions into a ring buffer holding the most
    /// recent `capacity` entries.
    pub fn enable_trace(&mut self, capacity: usize) {
        self.trace = Some(AllocRingBuffer::with_capacity(capacity));
    }

    /// The buffered trace entries, oldest first. Reading does not consume
    /// them. Empty when tracing was never enabled.
    #[must_use]
    pub fn trace_entries(&self) -> Vec<TraceEntry> {
        match &self.trace {
            Some(buf) => buf.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// The buffered trace rendered one instruction per line.
    #[must_use]
    pub fn trace_log(&self) -> String {
        let mut out = String::new();
        for e in self.trace_entries() {
            let _ = write!(out, "\n{e}");
        }
        out
    }

    /// Total cycles since construction.
    #[must_use]
    pub const fn clocks(&self) -> usize {
        self.clocks
    }

    /// Whether the CPU is halted. Cleared by [`Cpu::reset`].
    #[must_use]
    pub const fn halted(&self) -> bool {
        self.halted
    }

    /// Halt the CPU. Subsequent `step` calls error until [`Cpu::reset`].
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Load PC from the reset vector and leave any halted state. As on the
    /// original part the other registers are not cleared; that is the
    /// host's responsibility.
    pub fn reset(&mut self) {
        self.pc = Wrapping(self.read_u16(RESET_VECTOR));
        self.halted = false;
    }

    /// Execute one instruction (or service a raised IRQ line) and account
    /// its cycles.
    ///
    /// # Errors
    /// Stepping a halted CPU returns [`CpuError::Halted`]. Internal
    /// invariant violations also error; guest visible behavior never does.
    pub fn step(&mut self) -> Result<()> {
        if self.halted {
            return Err(CpuError::Halted { pc: self.pc.0 }.into());
        }

        // A raised IRQ line is serviced at the instruction boundary unless
        // interrupts are disabled.
        if let Some(line) = self.irq {
            if line.raised() && self.p & P_INTERRUPT == 0 {
                self.step_cycles = 0;
                self.vector_sequence(IRQ_VECTOR, self.p & !P_B);
                return self.tick(OPTABLE[0x00].cycles);
            }
        }

        let reg = Register {
            a: self.a.0,
            x: self.x.0,
            y: self.y.0,
            s: self.s.0,
            p: self.p,
            pc: self.pc.0,
        };
        self.step_cycles = 0;

        let raw = self.ram.read(self.pc.0);
        self.pc += Wrapping(1);
        let op = OPTABLE[usize::from(raw)];

        let (b, v, t) = self.decode(op.mode);
        self.execute(op, b, v)?;
        self.tick(op.cycles)?;

        if self.trace.is_some() || self.debug.is_some() {
            let entry = TraceEntry {
                reg,
                op,
                raw,
                b,
                v,
                t,
                cycles: self.step_cycles,
            };
            if let Some(debug) = self.debug {
                debug(entry.to_string());
            }
            if let Some(buf) = self.trace.as_mut() {
                buf.push(entry);
            }
        }
        Ok(())
    }

    /// Step repeatedly until a terminating condition: a 0x00 opcode byte at
    /// PC (the terminator convention for short embedded programs - the byte
    /// is consumed and the CPU halts without running BRK), PC reaching
    /// zero, or the halt flag being set. Hosts that want real BRK behavior
    /// drive [`Cpu::step`] themselves.
    ///
    /// # Errors
    /// Propagates any error from [`Cpu::step`].
    pub fn run(&mut self) -> Result<()> {
        while self.pc.0 != 0 && !self.halted {
            if self.ram.read(self.pc.0) == 0x00 {
                self.pc += Wrapping(1);
                self.halted = true;
                break;
            }
            self.step()?;
        }
        Ok(())
    }

    /// Raise a software shaped interrupt: the same sequence BRK performs
    /// but with no opcode fetch. Pushes PC and P (B set on the pushed
    /// copy), disables interrupts and vectors through the IRQ vector,
    /// charging the BRK cycle cost.
    ///
    /// # Errors
    /// Internal invariant violations error.
    pub fn interrupt(&mut self) -> Result<()> {
        self.step_cycles = 0;
        self.vector_sequence(IRQ_VECTOR, self.p | P_B);
        self.tick(OPTABLE[0x00].cycles)
    }

    /// Service a hardware IRQ if interrupts are enabled, returning whether
    /// it was taken. Unlike BRK the pushed P has B clear.
    ///
    /// # Errors
    /// Internal invariant violations error.
    pub fn irq(&mut self) -> Result<bool> {
        if self.p & P_INTERRUPT != 0 {
            return Ok(false);
        }
        self.step_cycles = 0;
        self.vector_sequence(IRQ_VECTOR, self.p & !P_B);
        self.tick(OPTABLE[0x00].cycles)?;
        Ok(true)
    }

    /// Service an NMI. Not gated by I; edge detection is the host's
    /// concern. The pushed P has B clear.
    ///
    /// # Errors
    /// Internal invariant violations error.
    pub fn nmi(&mut self) -> Result<()> {
        self.step_cycles = 0;
        self.vector_sequence(NMI_VECTOR, self.p & !P_B);
        self.tick(OPTABLE[0x00].cycles)
    }

    // The common interrupt entry: push the current PC and the given status
    // copy, disable interrupts and vector.
    #[allow(clippy::cast_possible_truncation)]
    fn vector_sequence(&mut self, vector: u16, pushed_p: u8) {
        self.stack_push((self.pc.0 >> 8) as u8);
        self.stack_push((self.pc.0 & 0xFF) as u8);
        self.stack_push(pushed_p);
        self.p |= P_INTERRUPT;
        self.pc = Wrapping(self.read_u16(vector));
    }

    // tick advances the cycle counters by n, fanning each cycle out to any
    // attached ticker.
    fn tick(&mut self, n: u8) -> Result<()> {
        if n == 0 {
            return Err(eyre!("cannot tick for 0"));
        }
        for _ in 0..n {
            if let Some(t) = self.ticker.as_deref_mut() {
                t.tick();
            }
            self.step_cycles += 1;
            self.clocks += 1;
        }
        Ok(())
    }

    fn read_u16(&self, addr: u16) -> u16 {
        u16::from(self.ram.read(addr)) | u16::from(self.ram.read(addr.wrapping_add(1))) << 8
    }

    fn stack_push(&mut self, val: u8) {
        self.ram.write(STACK_START + u16::from(self.s.0), val);
        self.s -= Wrapping(1);
    }

    fn stack_pop(&mut self) -> u8 {
        self.s += Wrapping(1);
        self.ram.read(STACK_START + u16::from(self.s.0))
    }

    // decode reads operand bytes for the given mode, advancing PC, and
    // returns (operand byte, effective address, pre index target). Zero
    // page indexing wraps within the page and the indirect mode reproduces
    // the page wrap when its pointer sits on the last byte of a page.
    fn decode(&mut self, mode: AddressMode) -> (u8, u16, u16) {
        let mut b = 0x00u8;
        let mut v = 0x0000u16;
        let mut t = 0x0000u16;
        match mode {
            AddressMode::Immediate | AddressMode::Relative => {
                b = self.ram.read(self.pc.0);
                self.pc += Wrapping(1);
            }
            AddressMode::ZeroPage => {
                v = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                b = self.ram.read(v);
            }
            AddressMode::ZeroPageX => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                v = t.wrapping_add(u16::from(self.x.0)) & 0xFF;
                b = self.ram.read(v);
            }
            AddressMode::ZeroPageY => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                v = t.wrapping_add(u16::from(self.y.0)) & 0xFF;
                b = self.ram.read(v);
            }
            AddressMode::Absolute => {
                v = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                v |= u16::from(self.ram.read(self.pc.0)) << 8;
                self.pc += Wrapping(1);
                b = self.ram.read(v);
            }
            AddressMode::AbsoluteX => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                t |= u16::from(self.ram.read(self.pc.0)) << 8;
                self.pc += Wrapping(1);
                v = t.wrapping_add(u16::from(self.x.0));
                b = self.ram.read(v);
            }
            AddressMode::AbsoluteY => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                t |= u16::from(self.ram.read(self.pc.0)) << 8;
                self.pc += Wrapping(1);
                v = t.wrapping_add(u16::from(self.y.0));
                b = self.ram.read(v);
            }
            AddressMode::Indirect => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                t |= u16::from(self.ram.read(self.pc.0)) << 8;
                self.pc += Wrapping(1);
                // The pointer's high byte comes from the start of the same
                // page when the low byte sits at 0xFF.
                let hi = if t & 0x00FF == 0x00FF {
                    t & 0xFF00
                } else {
                    t.wrapping_add(1)
                };
                v = u16::from(self.ram.read(t)) | u16::from(self.ram.read(hi)) << 8;
            }
            AddressMode::IndirectX => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                let ptr = t.wrapping_add(u16::from(self.x.0)) & 0xFF;
                v = u16::from(self.ram.read(ptr))
                    | u16::from(self.ram.read(ptr.wrapping_add(1) & 0xFF)) << 8;
                b = self.ram.read(v);
            }
            AddressMode::IndirectY => {
                t = u16::from(self.ram.read(self.pc.0));
                self.pc += Wrapping(1);
                let ptr = u16::from(self.ram.read(t))
                    | u16::from(self.ram.read(t.wrapping_add(1) & 0xFF)) << 8;
                v = ptr.wrapping_add(u16::from(self.y.0));
                b = self.ram.read(v);
            }
            AddressMode::Implied => {}
        }
        (b, v, t)
    }

    // Operation dispatch. Each operation sees the operand byte and
    // effective address its addressing mode produced.
    fn execute(&mut self, op: Operation, b: u8, v: u16) -> Result<()> {
        match op.op {
            Opcode::ADC => self.adc(b),
            Opcode::AND => {
                self.a = Wrapping(self.a.0 & b);
                self.nz_check(self.a.0);
            }
            Opcode::ASL => self.asl(v, op.mode),
            Opcode::BCC => self.branch(!self.flag(P_CARRY), b)?,
            Opcode::BCS => self.branch(self.flag(P_CARRY), b)?,
            Opcode::BEQ => self.branch(self.flag(P_ZERO), b)?,
            Opcode::BIT => self.bit(b),
            Opcode::BMI => self.branch(self.flag(P_NEGATIVE), b)?,
            Opcode::BNE => self.branch(!self.flag(P_ZERO), b)?,
            Opcode::BPL => self.branch(!self.flag(P_NEGATIVE), b)?,
            Opcode::BRK => self.vector_sequence(IRQ_VECTOR, self.p | P_B),
            Opcode::BVC => self.branch(!self.flag(P_OVERFLOW), b)?,
            Opcode::BVS => self.branch(self.flag(P_OVERFLOW), b)?,
            Opcode::CLC => self.p &= !P_CARRY,
            Opcode::CLD => self.p &= !P_DECIMAL,
            Opcode::CLI => self.p &= !P_INTERRUPT,
            Opcode::CLV => self.p &= !P_OVERFLOW,
            Opcode::CMP => self.compare(self.a.0, b),
            Opcode::CPX => self.compare(self.x.0, b),
            Opcode::CPY => self.compare(self.y.0, b),
            Opcode::DCP => {
                self.dec(b, v);
                let m = self.ram.read(v);
                self.compare(self.a.0, m);
            }
            Opcode::DEC => self.dec(b, v),
            Opcode::DEX => {
                self.x -= Wrapping(1);
                self.nz_check(self.x.0);
            }
            Opcode::DEY => {
                self.y -= Wrapping(1);
                self.nz_check(self.y.0);
            }
            Opcode::EOR => {
                self.a = Wrapping(self.a.0 ^ b);
                self.nz_check(self.a.0);
            }
            Opcode::INC => self.inc(b, v),
            Opcode::INX => {
                self.x += Wrapping(1);
                self.nz_check(self.x.0);
            }
            Opcode::INY => {
                self.y += Wrapping(1);
                self.nz_check(self.y.0);
            }
            Opcode::ISC => {
                self.inc(b, v);
                let m = self.ram.read(v);
                self.sbc(m);
            }
            Opcode::JMP => self.pc = Wrapping(v),
            Opcode::JSR => self.jsr(v),
            Opcode::LAX => {
                self.a = Wrapping(b);
                self.x = Wrapping(b);
                self.nz_check(b);
            }
            Opcode::LDA => {
                self.a = Wrapping(b);
                self.nz_check(b);
            }
            Opcode::LDX => {
                self.x = Wrapping(b);
                self.nz_check(b);
            }
            Opcode::LDY => {
                self.y = Wrapping(b);
                self.nz_check(b);
            }
            Opcode::LSR => self.lsr(v, op.mode),
            Opcode::NOP => {}
            Opcode::ORA => {
                self.a = Wrapping(self.a.0 | b);
                self.nz_check(self.a.0);
            }
            Opcode::PHA => self.stack_push(self.a.0),
            Opcode::PHP => self.stack_push(self.p | P_S1 | P_B),
            Opcode::PLA => {
                let val = self.stack_pop();
                self.a = Wrapping(val);
                self.nz_check(val);
            }
            Opcode::PLP => {
                self.p = self.stack_pop() | P_S1;
                self.p &= !P_B;
            }
            Opcode::RLA => {
                self.rol(v, op.mode);
                let m = self.ram.read(v);
                self.a = Wrapping(self.a.0 & m);
                self.nz_check(self.a.0);
            }
            Opcode::ROL => self.rol(v, op.mode),
            Opcode::ROR => self.ror(v, op.mode),
            Opcode::RRA => {
                self.ror(v, op.mode);
                let m = self.ram.read(v);
                self.adc(m);
            }
            Opcode::RTI => {
                self.p = self.stack_pop() | P_S1;
                self.p &= !P_B;
                let lo = self.stack_pop();
                let hi = self.stack_pop();
                self.pc = Wrapping(u16::from(lo) | u16::from(hi) << 8);
            }
            Opcode::RTS => {
                let lo = self.stack_pop();
                let hi = self.stack_pop();
                self.pc = Wrapping(u16::from(lo) | u16::from(hi) << 8) + Wrapping(1);
            }
            Opcode::SAX => self.ram.write(v, self.a.0 & self.x.0),
            Opcode::SBC => self.sbc(b),
            Opcode::SEC => self.p |= P_CARRY,
            Opcode::SED => self.p |= P_DECIMAL,
            Opcode::SEI => self.p |= P_INTERRUPT,
            Opcode::SLO => {
                self.asl(v, op.mode);
                let m = self.ram.read(v);
                self.a = Wrapping(self.a.0 | m);
                self.nz_check(self.a.0);
            }
            Opcode::SRE => {
                self.lsr(v, op.mode);
                let m = self.ram.read(v);
                self.a = Wrapping(self.a.0 ^ m);
                self.nz_check(self.a.0);
            }
            Opcode::STA => self.ram.write(v, self.a.0),
            Opcode::STX => self.ram.write(v, self.x.0),
            Opcode::STY => self.ram.write(v, self.y.0),
            Opcode::TAX => {
                self.x = self.a;
                self.nz_check(self.x.0);
            }
            Opcode::TAY => {
                self.y = self.a;
                self.nz_check(self.y.0);
            }
            Opcode::TRB => self.trb(v),
            Opcode::TSB => self.tsb(v),
            Opcode::TSX => {
                self.x = self.s;
                self.nz_check(self.x.0);
            }
            Opcode::TXA => {
                self.a = self.x;
                self.nz_check(self.a.0);
            }
            Opcode::TXS => self.s = self.x,
            Opcode::TYA => {
                self.a = self.y;
                self.nz_check(self.a.0);
            }
        }
        Ok(())
    }

    // Whether the given P bit is set.
    const fn flag(&self, bit: u8) -> bool {
        self.p & bit != 0
    }

    // Set Z and N from the value.
    fn nz_check(&mut self, val: u8) {
        self.p &= !(P_ZERO | P_NEGATIVE);
        if val == 0 {
            self.p |= P_ZERO;
        }
        if val & 0x80 != 0 {
            self.p |= P_NEGATIVE;
        }
    }

    // Set C from the named bit of the value about to shift out.
    fn carry_from_bit(&mut self, val: u8, bit: u8) {
        if (val >> bit) & 0x01 != 0 {
            self.p |= P_CARRY;
        } else {
            self.p &= !P_CARRY;
        }
    }

    // Taken branches charge one extra cycle and displace PC by the signed
    // offset.
    fn branch(&mut self, taken: bool, b: u8) -> Result<()> {
        if taken {
            self.tick(1)?;
            #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
            let offset = i16::from(b as i8) as u16;
            self.pc += Wrapping(offset);
        }
        Ok(())
    }

    // C = reg >= operand; N and Z from the 8 bit difference.
    fn compare(&mut self, reg: u8, operand: u8) {
        if reg >= operand {
            self.p |= P_CARRY;
        } else {
            self.p &= !P_CARRY;
        }
        self.nz_check(reg.wrapping_sub(operand));
    }

    fn bit(&mut self, b: u8) {
        if b & 0x80 != 0 {
            self.p |= P_NEGATIVE;
        } else {
            self.p &= !P_NEGATIVE;
        }
        if b & 0x40 != 0 {
            self.p |= P_OVERFLOW;
        } else {
            self.p &= !P_OVERFLOW;
        }
        if self.a.0 & b != 0 {
            self.p &= !P_ZERO;
        } else {
            self.p |= P_ZERO;
        }
    }

    const fn decimal_enabled(&self) -> bool {
        !matches!(self.variant, Type::Ricoh)
    }

    // ADC: add the operand into A with carry. V is seeded from operand sign
    // agreement and corrected against the binary intermediate, before any
    // BCD fixup reaches A.
    #[allow(clippy::cast_possible_truncation)]
    fn adc(&mut self, b: u8) {
        if (self.a.0 ^ b) & 0x80 != 0 {
            self.p &= !P_OVERFLOW;
        } else {
            self.p |= P_OVERFLOW;
        }

        let mut sum: u16;
        if self.flag(P_DECIMAL) && self.decimal_enabled() {
            sum = u16::from(self.a.0 & 0x0F) + u16::from(b & 0x0F);
            if self.flag(P_CARRY) {
                sum += 1;
            }
            if sum >= 10 {
                sum = 0x10 | (sum + 6) & 0x0F;
            }
            sum += u16::from(self.a.0 & 0xF0) + u16::from(b & 0xF0);
            if sum >= 160 {
                self.p |= P_CARRY;
                if self.flag(P_OVERFLOW) && sum >= 0x180 {
                    self.p &= !P_OVERFLOW;
                }
                sum += 0x60;
            } else {
                self.p &= !P_CARRY;
                if self.flag(P_OVERFLOW) && sum < 0x80 {
                    self.p &= !P_OVERFLOW;
                }
            }
        } else {
            sum = u16::from(self.a.0) + u16::from(b);
            if self.flag(P_CARRY) {
                sum += 1;
            }
            if sum > 0xFF {
                self.p |= P_CARRY;
                if self.flag(P_OVERFLOW) && sum >= 0x180 {
                    self.p &= !P_OVERFLOW;
                }
            } else {
                self.p &= !P_CARRY;
                if self.flag(P_OVERFLOW) && sum < 0x80 {
                    self.p &= !P_OVERFLOW;
                }
            }
        }
        self.a = Wrapping((sum & 0xFF) as u8);
        self.nz_check(self.a.0);
    }

    // SBC: subtract the operand from A with borrow. Flag handling mirrors
    // adc, including V being judged on the binary intermediate.
    #[allow(clippy::cast_possible_truncation)]
    fn sbc(&mut self, b: u8) {
        if (self.a.0 ^ b) & 0x80 != 0 {
            self.p |= P_OVERFLOW;
        } else {
            self.p &= !P_OVERFLOW;
        }

        let mut res: u16;
        if self.flag(P_DECIMAL) && self.decimal_enabled() {
            let mut w: u16 = 0;
            res = 0x0F + u16::from(self.a.0 & 0x0F) - u16::from(b & 0x0F);
            if self.flag(P_CARRY) {
                res += 1;
            }
            if res < 0x10 {
                res = res.wrapping_sub(6);
            } else {
                w = 0x10;
                res -= 0x10;
            }
            w += 0xF0 + u16::from(self.a.0 & 0xF0) - u16::from(b & 0xF0);
            if w < 0x100 {
                self.p &= !P_CARRY;
                if self.flag(P_OVERFLOW) && w < 0x80 {
                    self.p &= !P_OVERFLOW;
                }
                w = w.wrapping_sub(0x60);
            } else {
                self.p |= P_CARRY;
                if self.flag(P_OVERFLOW) && w >= 0x180 {
                    self.p &= !P_OVERFLOW;
                }
            }
            res = res.wrapping_add(w);
        } else {
            res = 0xFF + u16::from(self.a.0) - u16::from(b);
            if self.flag(P_CARRY) {
                res += 1;
            }
            if res < 0x100 {
                self.p &= !P_CARRY;
                if self.flag(P_OVERFLOW) && res < 0x80 {
                    self.p &= !P_OVERFLOW;
                }
            } else {
                self.p |= P_CARRY;
                if self.flag(P_OVERFLOW) && res >= 0x180 {
                    self.p &= !P_OVERFLOW;
                }
            }
        }
        self.a = Wrapping((res & 0xFF) as u8);
        self.nz_check(self.a.0);
    }

    // The four shifts operate on A in implied mode and on the operand cell
    // otherwise, with the written value read back for the flag checks.
    fn asl(&mut self, v: u16, mode: AddressMode) {
        if mode == AddressMode::Implied {
            self.carry_from_bit(self.a.0, 7);
            self.a <<= 1;
            self.nz_check(self.a.0);
        } else {
            let m = self.ram.read(v);
            self.carry_from_bit(m, 7);
            self.ram.write(v, m << 1);
            let val = self.ram.read(v);
            self.nz_check(val);
        }
    }

    fn lsr(&mut self, v: u16, mode: AddressMode) {
        if mode == AddressMode::Implied {
            self.carry_from_bit(self.a.0, 0);
            self.a >>= 1;
            self.nz_check(self.a.0);
        } else {
            let m = self.ram.read(v);
            self.carry_from_bit(m, 0);
            self.ram.write(v, m >> 1);
            let val = self.ram.read(v);
            self.nz_check(val);
        }
    }

    fn rol(&mut self, v: u16, mode: AddressMode) {
        let carry_in = if self.flag(P_CARRY) { 0x01 } else { 0x00 };
        if mode == AddressMode::Implied {
            self.carry_from_bit(self.a.0, 7);
            self.a = Wrapping(self.a.0 << 1 | carry_in);
            self.nz_check(self.a.0);
        } else {
            let m = self.ram.read(v);
            self.carry_from_bit(m, 7);
            self.ram.write(v, m << 1 | carry_in);
            let val = self.ram.read(v);
            self.nz_check(val);
        }
    }

    fn ror(&mut self, v: u16, mode: AddressMode) {
        let carry_in = if self.flag(P_CARRY) { 0x80 } else { 0x00 };
        if mode == AddressMode::Implied {
            self.carry_from_bit(self.a.0, 0);
            self.a = Wrapping(self.a.0 >> 1 | carry_in);
            self.nz_check(self.a.0);
        } else {
            let m = self.ram.read(v);
            self.carry_from_bit(m, 0);
            self.ram.write(v, m >> 1 | carry_in);
            let val = self.ram.read(v);
            self.nz_check(val);
        }
    }

    // INC/DEC write the adjusted operand back and take flags from a
    // re-read, not the value they computed.
    fn inc(&mut self, b: u8, v: u16) {
        self.ram.write(v, b.wrapping_add(1));
        let val = self.ram.read(v);
        self.nz_check(val);
    }

    fn dec(&mut self, b: u8, v: u16) {
        self.ram.write(v, b.wrapping_sub(1));
        let val = self.ram.read(v);
        self.nz_check(val);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn jsr(&mut self, v: u16) {
        let ret = self.pc - Wrapping(1);
        self.stack_push((ret.0 >> 8) as u8);
        self.stack_push((ret.0 & 0xFF) as u8);
        self.pc = Wrapping(v);
    }

    fn trb(&mut self, v: u16) {
        let m = self.ram.read(v);
        if self.a.0 & m != 0 {
            self.p &= !P_ZERO;
        } else {
            self.p |= P_ZERO;
        }
        self.ram.write(v, m & !self.a.0);
    }

    fn tsb(&mut self, v: u16) {
        let m = self.ram.read(v);
        if self.a.0 & m != 0 {
            self.p &= !P_ZERO;
        } else {
            self.p |= P_ZERO;
        }
        self.ram.write(v, m | self.a.0);
    }
}

impl fmt::Display for Cpu<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, " A: {:3} 0x{:02X} {:08b}", self.a.0, self.a.0, self.a.0)?;
        writeln!(f, " X: {:3} 0x{:02X} {:08b}", self.x.0, self.x.0, self.x.0)?;
        writeln!(f, " Y: {:3} 0x{:02X} {:08b}", self.y.0, self.y.0, self.y.0)?;
        writeln!(f, " P: {:3} 0x{:02X} {:08b}", self.p, self.p, self.p)?;
        writeln!(f, " S: {:3} 0x{:02X} {:08b}", self.s.0, self.s.0, self.s.0)?;
        writeln!(f, "PC: {:5} 0x{:04X} {:016b}", self.pc.0, self.pc.0, self.pc.0)
    }
}
