use crate::error::EvalError;
use crate::ir::TacProgram;

use super::{ConstantFolding, ConstantPropagation, DeadCodeElimination, Peephole};

pub struct Optimizer;

impl Optimizer {
    /// Apply the four passes in order for up to `rounds` rounds. Zero rounds
    /// returns the program unchanged. Rounds stop early once a full round
    /// produces no change, so running extra rounds over a converged program
    /// is a no-op.
    pub fn optimize(program: TacProgram, rounds: u32) -> Result<TacProgram, EvalError> {
        let mut current = program;

        for _ in 0..rounds {
            let folded = ConstantFolding::run(&current)?;
            let propagated = ConstantPropagation::run(&folded)?;
            let pruned = DeadCodeElimination::run(&propagated);
            let next = Peephole::run(&pruned);

            if next == current {
                break;
            }
            current = next;
        }

        Ok(current)
    }
}
