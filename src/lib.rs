//! prelude exports common things for the 6502 core such as the chip
//! contracts, the cpu and the memory bus.

/// prelude exports common items for the 6502 core.
pub mod prelude {
    pub use chip::*;
    pub use cpu::*;
    pub use irq::*;
    pub use memory::*;
}
