use super::cnf::{Cnf, Lit};

pub fn to_dimacs(cnf: &Cnf) -> String {
    to_dimacs_with_units(cnf, &[])
}

/// Renders `cnf` with each of `units` appended as a unit clause, which is how
/// solve-time assumptions are frozen into a standalone DIMACS file.
pub fn to_dimacs_with_units(cnf: &Cnf, units: &[Lit]) -> String {
    let num_vars = units.iter().map(|l| l.var).fold(cnf.num_vars, u32::max);
    let mut out = String::new();
    out.push_str(&format!(
        "p cnf {} {}\n",
        num_vars,
        cnf.clauses.len() + units.len()
    ));
    for clause in &cnf.clauses {
        push_clause(&mut out, clause);
    }
    for &unit in units {
        push_clause(&mut out, &[unit]);
    }
    out
}

fn push_clause(out: &mut String, clause: &[Lit]) {
    for &lit in clause {
        out.push_str(&format!("{} ", lit.to_dimacs()));
    }
    out.push_str("0\n");
}
