//! Direct, auxiliary-variable-free CNF encoding of n-ary parity gates.
//!
//! The gate's operands and its result form an augmented sequence of
//! `N = K + 1` variables. `res = XOR(ops)` holds exactly when an even number of
//! those `N` variables are true, and `res = XNOR(ops)` exactly when an odd
//! number are. Every assignment with the wrong true-count is ruled out by one
//! clause: for a subset `S` of positions, the clause holds the negative literal
//! of each position in `S` and the positive literal of each position outside
//! it, and is falsified only by "members of `S` true, everything else false".
//!
//! The encoding emits `2^(N-1)` clauses, one per forbidden subset.

use crate::cnf::cnf::{ClauseSink, Lit};

/// Which true-count parity over the augmented sequence is satisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Even true-count allowed, odd forbidden (XOR gates).
    Even,
    /// Odd true-count allowed, even forbidden (XNOR gates, including the
    /// all-false assignment).
    Odd,
}

impl Parity {
    fn first_forbidden_size(self) -> usize {
        match self {
            Parity::Even => 1,
            Parity::Odd => 0,
        }
    }
}

/// Calls `f` once per `size`-element subset of `0..n`, each given as strictly
/// increasing indices, in lexicographic order.
pub fn for_each_subset<F: FnMut(&[usize])>(n: usize, size: usize, mut f: F) {
    if size > n {
        return;
    }
    let mut chosen = Vec::with_capacity(size);
    choose(0, n, size, &mut chosen, &mut f);
}

fn choose<F: FnMut(&[usize])>(
    start: usize,
    n: usize,
    size: usize,
    chosen: &mut Vec<usize>,
    f: &mut F,
) {
    if chosen.len() == size {
        f(chosen.as_slice());
        return;
    }
    let remaining = size - chosen.len();
    // stop once too few positions are left to complete the subset
    for idx in start..=(n - remaining) {
        chosen.push(idx);
        choose(idx + 1, n, size, chosen, f);
        chosen.pop();
    }
}

/// Builds the clause that forbids exactly the assignment "positions in
/// `subset` true, all other positions false".
pub fn blocking_clause(vars: &[u32], subset: &[usize]) -> Vec<Lit> {
    let mut members = subset.iter().peekable();
    vars.iter()
        .enumerate()
        .map(|(idx, &var)| {
            if members.peek() == Some(&&idx) {
                members.next();
                Lit::neg_of(var)
            } else {
                Lit::pos(var)
            }
        })
        .collect()
}

/// Emits the parity clauses over `vars` (operands followed by the result) and
/// returns how many were added.
pub fn encode_parity<S: ClauseSink + ?Sized>(sink: &mut S, vars: &[u32], allowed: Parity) -> usize {
    let n = vars.len();
    let mut emitted = 0usize;
    let mut size = allowed.first_forbidden_size();
    while size <= n {
        for_each_subset(n, size, |subset| {
            sink.add_clause(blocking_clause(vars, subset));
            emitted += 1;
        });
        size += 2;
    }
    emitted
}

/// Number of clauses `encode_parity` emits for `n >= 1` variables, for either
/// parity. `None` once the count no longer fits in a `u128`.
pub fn parity_clause_count(n: usize) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    u32::try_from(n - 1)
        .ok()
        .and_then(|shift| 1u128.checked_shl(shift))
}
