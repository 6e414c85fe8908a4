//! `chip` defines the basic interfaces shared by chips in the 6502 family
//! so they can be wired together into a system emulation without depending
//! on each other directly.

use strum_macros::{Display, EnumString};

/// `Ticker` is implemented by any component that consumes the CPU clock,
/// such as an audio mixer or a PPU. The CPU calls `tick` exactly once per
/// emulated cycle it attributes to an instruction, in order, before the
/// instruction's step returns. Implementations needing no subdivision
/// within an instruction are free to batch internally.
pub trait Ticker {
    /// `tick` accounts for one clock cycle.
    fn tick(&mut self);
}

/// `Type` defines the implemented variants of the 6502.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, EnumString)]
#[allow(clippy::upper_case_acronyms)]
pub enum Type {
    /// Basic NMOS 6502 including the stable undocumented opcodes.
    NMOS,

    /// Ricoh version used in the NES which is identical to NMOS except
    /// BCD mode is unimplemented.
    #[strum(to_string = "NMOS_RICOH")]
    Ricoh,
}

/// `NMI_VECTOR` is the location in memory the 6502 uses for NMI interrupts.
/// It is a pointer to the location to start execution.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// `RESET_VECTOR` is the location in memory the 6502 uses on startup to
/// begin execution. It is a pointer to the location to start execution.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// `IRQ_VECTOR` is the location in memory the 6502 uses when executing an
/// IRQ or BRK. It is a pointer to the location to start execution.
pub const IRQ_VECTOR: u16 = 0xFFFE;
