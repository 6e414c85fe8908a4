//! `irq` defines the basic interface for working with a 6502 family
//! interrupt line. A component which generates interrupts implements this
//! trait so receivers can poll its state without cross coupling component
//! logic.
//! NOTE: Chips distinguish level and edge type interrupts but the interface
//!       here doesn't; implementors account for that in their own clock
//!       management.

/// `Sender` defines the trait for an interrupt source.
pub trait Sender {
    /// `raised` indicates whether the interrupt is currently held high.
    fn raised(&self) -> bool;
}
