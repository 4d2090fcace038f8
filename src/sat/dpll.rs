use crate::cnf::cnf::{Cnf, Lit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Sat(Vec<bool>),
    Unsat,
    /// The decision budget ran out before the search finished.
    Aborted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub decisions: usize,
    pub conflicts: usize,
}

/// Runs the search, giving up after `decision_limit` branching decisions.
pub fn solve_with_limit(cnf: &Cnf, decision_limit: Option<usize>) -> (SatResult, SearchStats) {
    let mut search = Search {
        cnf,
        limit: decision_limit,
        stats: SearchStats::default(),
    };
    let mut assignment = vec![None; cnf.num_vars as usize + 1];
    let result = match search.run(&mut assignment) {
        Step::Found => {
            // fill free vars deterministically
            let model = assignment
                .into_iter()
                .map(|v| v.unwrap_or(false))
                .collect::<Vec<_>>();
            SatResult::Sat(model)
        }
        Step::Refuted => SatResult::Unsat,
        Step::OutOfBudget => SatResult::Aborted,
    };
    (result, search.stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Found,
    Refuted,
    OutOfBudget,
}

struct Search<'a> {
    cnf: &'a Cnf,
    limit: Option<usize>,
    stats: SearchStats,
}

impl Search<'_> {
    fn run(&mut self, assignment: &mut [Option<bool>]) -> Step {
        if !unit_propagate(self.cnf, assignment) {
            self.stats.conflicts += 1;
            return Step::Refuted;
        }
        match self.cnf.eval_formula_partial(assignment) {
            Some(true) => return Step::Found,
            Some(false) => {
                self.stats.conflicts += 1;
                return Step::Refuted;
            }
            None => {}
        }

        let Some(var) = first_unassigned(assignment) else {
            return Step::Refuted;
        };

        for value in [true, false] {
            if self.limit.is_some_and(|limit| self.stats.decisions >= limit) {
                return Step::OutOfBudget;
            }
            self.stats.decisions += 1;

            let mut branch = assignment.to_vec();
            branch[var] = Some(value);
            match self.run(&mut branch) {
                Step::Found => {
                    assignment.copy_from_slice(&branch);
                    return Step::Found;
                }
                Step::Refuted => {}
                Step::OutOfBudget => return Step::OutOfBudget,
            }
        }

        Step::Refuted
    }
}

fn unit_propagate(cnf: &Cnf, assignment: &mut [Option<bool>]) -> bool {
    loop {
        let mut changed = false;

        for clause in &cnf.clauses {
            let mut open_count = 0usize;
            let mut last_open = Lit::new(0, true);
            let mut has_true = false;

            for &lit in clause {
                match Cnf::eval_lit_partial(lit, assignment) {
                    Some(true) => {
                        has_true = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        open_count += 1;
                        last_open = lit;
                    }
                }
            }

            if has_true {
                continue;
            }
            if open_count == 0 {
                return false;
            }
            if open_count == 1 {
                let var = last_open.var as usize;
                let need = last_open.sign;
                match assignment[var] {
                    Some(v) if v != need => return false,
                    Some(_) => {}
                    None => {
                        assignment[var] = Some(need);
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            return true;
        }
    }
}

fn first_unassigned(assignment: &[Option<bool>]) -> Option<usize> {
    (1..assignment.len()).find(|&i| assignment[i].is_none())
}

#[cfg(test)]
mod tests {
    use super::{SatResult, solve_with_limit};
    use crate::cnf::cnf::{Cnf, Lit};

    fn solve(cnf: &Cnf) -> SatResult {
        solve_with_limit(cnf, None).0
    }

    fn pigeonhole_3_in_2() -> Cnf {
        // p(i, h) = pigeon i sits in hole h, var 2*i + h + 1
        let p = |i: u32, h: u32| 2 * i + h + 1;
        let mut cnf = Cnf::new(6);
        for i in 0..3 {
            cnf.add_clause(vec![Lit::pos(p(i, 0)), Lit::pos(p(i, 1))]);
        }
        for h in 0..2 {
            for i in 0..3 {
                for j in (i + 1)..3 {
                    cnf.add_clause(vec![Lit::neg_of(p(i, h)), Lit::neg_of(p(j, h))]);
                }
            }
        }
        cnf
    }

    #[test]
    fn pigeonhole_is_unsat() {
        assert_eq!(solve(&pigeonhole_3_in_2()), SatResult::Unsat);
    }

    #[test]
    fn zero_budget_aborts_on_branching() {
        let (res, stats) = solve_with_limit(&pigeonhole_3_in_2(), Some(0));
        assert_eq!(res, SatResult::Aborted);
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn model_satisfies_formula() {
        let mut cnf = Cnf::new(3);
        cnf.add_clause(vec![Lit::pos(1), Lit::pos(2)]);
        cnf.add_clause(vec![Lit::neg_of(1)]);
        cnf.add_clause(vec![Lit::neg_of(2), Lit::pos(3)]);
        match solve(&cnf) {
            SatResult::Sat(model) => assert!(cnf.eval(&model)),
            other => panic!("expected sat, got {other:?}"),
        }
    }
}
