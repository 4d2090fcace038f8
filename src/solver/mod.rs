pub mod dpll_backend;
pub mod varisat;

use std::fmt;

use crate::cnf::cnf::{ClauseSink, Lit};

use self::dpll_backend::DpllSolverBackend;
use self::varisat::VarisatSolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The backend gave up without deciding, e.g. a resource limit was hit.
    Unknown,
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveResult::Sat => "SATISFIABLE",
            SolveResult::Unsat => "UNSATISFIABLE",
            SolveResult::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub clauses: usize,
    pub decisions: usize,
    pub conflicts: usize,
}

/// The satisfiability oracle the compiler feeds. Clauses are pushed through
/// `ClauseSink` as they are built; assumptions only hold for one `solve`.
pub trait IncrementalSolver: ClauseSink {
    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult;
    /// Value of `var` in the last model. Only meaningful after `Sat`.
    fn model_value(&self, var: u32) -> Option<bool>;
    fn stats(&self) -> SolverStats;
    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Varisat,
    Dpll,
}

impl Backend {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "varisat" => Some(Backend::Varisat),
            "dpll" => Some(Backend::Dpll),
            _ => None,
        }
    }

    /// Builds a fresh solver. `decision_limit` only applies to the dpll backend.
    pub fn build(self, decision_limit: Option<usize>) -> Box<dyn IncrementalSolver> {
        match self {
            Backend::Varisat => Box::new(VarisatSolver::new()),
            Backend::Dpll => Box::new(DpllSolverBackend::with_decision_limit(decision_limit)),
        }
    }
}
