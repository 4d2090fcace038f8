use std::fmt;

use log::info;

use crate::circuit::wires::WireTable;
use crate::cnf::cnf::Lit;
use crate::error::{CircuitError, Result};
use crate::solver::{IncrementalSolver, SolveResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    pub name: String,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Inputs are listed in declaration order.
    Satisfiable { inputs: Vec<InputValue> },
    Unsatisfiable,
}

impl Outcome {
    pub fn is_sat(&self) -> bool {
        matches!(self, Outcome::Satisfiable { .. })
    }

    pub fn value_of(&self, name: &str) -> Option<bool> {
        match self {
            Outcome::Satisfiable { inputs } => {
                inputs.iter().find(|iv| iv.name == name).map(|iv| iv.value)
            }
            Outcome::Unsatisfiable => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Satisfiable { inputs } => {
                writeln!(f, "SATISFIABLE")?;
                writeln!(f, "inputs:")?;
                for iv in inputs {
                    writeln!(f, "  {}: {}", iv.name, iv.value)?;
                }
                Ok(())
            }
            Outcome::Unsatisfiable => writeln!(f, "UNSATISFIABLE"),
        }
    }
}

/// Runs the single solve call under `assumptions` and reads back every
/// declared input on success. Inputs missing from the model read as false.
pub fn solve_and_report<S: IncrementalSolver + ?Sized>(
    solver: &mut S,
    wires: &WireTable,
    assumptions: &[Lit],
) -> Result<Outcome> {
    let result = solver.solve(assumptions);
    let stats = solver.stats();
    info!(
        "{}: {} (clauses={} decisions={} conflicts={})",
        solver.backend_name(),
        result,
        stats.clauses,
        stats.decisions,
        stats.conflicts
    );
    match result {
        SolveResult::Sat => {
            let inputs = wires
                .inputs()
                .map(|(name, id)| InputValue {
                    name: name.to_owned(),
                    value: solver.model_value(id).unwrap_or(false),
                })
                .collect();
            Ok(Outcome::Satisfiable { inputs })
        }
        SolveResult::Unsat => Ok(Outcome::Unsatisfiable),
        SolveResult::Unknown => Err(CircuitError::OracleUnknown {
            backend: solver.backend_name(),
        }),
    }
}
