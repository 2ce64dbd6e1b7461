mod gen;
mod tac;

pub use gen::*;
pub use tac::*;
