mod codegen;
mod regalloc;

pub use codegen::*;
pub use regalloc::*;
