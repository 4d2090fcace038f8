use log::warn;
use varisat::ExtendFormula;

use crate::cnf::cnf::{ClauseSink, Lit};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    vars: Vec<varisat::Var>,
    last_model: Option<Vec<Option<bool>>>,
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            vars: Vec::new(),
            last_model: None,
            stats: SolverStats::default(),
        }
    }

    // wire ids are dense, so grow the solver's variables up to `v` on demand
    fn to_var(&mut self, v: u32) -> Option<varisat::Var> {
        if v == 0 {
            return None;
        }
        while self.vars.len() < v as usize {
            let var = self.inner.new_var();
            self.vars.push(var);
        }
        self.vars.get(v as usize - 1).copied()
    }

    fn to_lit(&mut self, lit: Lit) -> Option<varisat::Lit> {
        let var = self.to_var(lit.var)?;
        Some(varisat::Lit::from_var(var, lit.sign))
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseSink for VarisatSolver {
    fn add_clause(&mut self, clause: Vec<Lit>) {
        let lits = clause
            .into_iter()
            .filter_map(|x| self.to_lit(x))
            .collect::<Vec<_>>();
        self.inner.add_clause(&lits);
        self.stats.clauses += 1;
    }
}

impl IncrementalSolver for VarisatSolver {
    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.stats.solve_calls += 1;
        let assumps = assumptions
            .iter()
            .copied()
            .filter_map(|x| self.to_lit(x))
            .collect::<Vec<_>>();
        self.inner.assume(&assumps);
        match self.inner.solve() {
            Ok(true) => {
                self.last_model = self.inner.model().map(index_model);
                SolveResult::Sat
            }
            Ok(false) => {
                self.last_model = None;
                SolveResult::Unsat
            }
            Err(e) => {
                warn!("varisat gave up: {}", e);
                self.last_model = None;
                SolveResult::Unknown
            }
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = (var as usize).checked_sub(1)?;
        let v = self.vars.get(idx)?;
        let model = self.last_model.as_ref()?;
        model.get(v.index()).copied().flatten()
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "varisat"
    }
}

// model lits -> values indexed by solver variable index
fn index_model(lits: Vec<varisat::Lit>) -> Vec<Option<bool>> {
    let len = lits.iter().map(|l| l.index() + 1).max().unwrap_or(0);
    let mut values = vec![None; len];
    for lit in lits {
        values[lit.index()] = Some(lit.is_positive());
    }
    values
}
