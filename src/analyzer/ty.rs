use std::fmt;

/// The language has a single scalar type today. Kept as its own enum so the
/// operand checks in the analyzer stay in place when more types arrive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ty {
    Number,
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Number => f.write_str("number"),
        }
    }
}
