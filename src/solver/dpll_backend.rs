use crate::cnf::cnf::{ClauseSink, Cnf, Lit};
use crate::sat::dpll::{SatResult, solve_with_limit};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Reference backend: keeps the formula in memory and reruns a plain DPLL
/// search on every `solve`.
#[derive(Debug, Clone)]
pub struct DpllSolverBackend {
    cnf: Cnf,
    decision_limit: Option<usize>,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl DpllSolverBackend {
    pub fn new() -> Self {
        Self::with_decision_limit(None)
    }

    pub fn with_decision_limit(decision_limit: Option<usize>) -> Self {
        Self {
            cnf: Cnf::new(0),
            decision_limit,
            last_model: None,
            stats: SolverStats::default(),
        }
    }
}

impl Default for DpllSolverBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseSink for DpllSolverBackend {
    fn add_clause(&mut self, clause: Vec<Lit>) {
        self.cnf.add_clause(clause);
        self.stats.clauses += 1;
    }
}

impl IncrementalSolver for DpllSolverBackend {
    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.stats.solve_calls += 1;
        let mut work = self.cnf.clone();
        for &a in assumptions {
            work.add_clause(vec![a]);
        }
        let (result, search) = solve_with_limit(&work, self.decision_limit);
        self.stats.decisions += search.decisions;
        self.stats.conflicts += search.conflicts;
        match result {
            SatResult::Sat(model) => {
                self.last_model = Some(model);
                SolveResult::Sat
            }
            SatResult::Unsat => {
                self.last_model = None;
                SolveResult::Unsat
            }
            SatResult::Aborted => {
                self.last_model = None;
                SolveResult::Unknown
            }
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = var as usize;
        self.last_model
            .as_ref()
            .and_then(|m| if idx < m.len() { Some(m[idx]) } else { None })
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "dpll"
    }
}
