use log::debug;
use thiserror::Error;

use crate::circuit::gate::{Gate, GateKind};

use super::cnf::{ClauseSink, Lit};
use super::parity::{Parity, encode_parity, parity_clause_count};

/// A gate whose operand count its kind cannot encode: NOT needs exactly one
/// operand, every other kind at least one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} gate driving var {result} cannot take {arity} operand(s)")]
pub struct ArityError {
    pub kind: GateKind,
    pub result: u32,
    pub arity: usize,
}

pub fn encodable_arity(kind: GateKind, arity: usize) -> bool {
    match kind {
        GateKind::Not => arity == 1,
        _ => arity >= 1,
    }
}

/// Emits the clauses defining `gate` into `sink` and returns how many were
/// added. Any total assignment satisfies them iff it satisfies the gate.
/// Nothing is emitted when the arity is rejected.
pub fn encode_gate<S: ClauseSink + ?Sized>(sink: &mut S, gate: &Gate) -> Result<usize, ArityError> {
    if !encodable_arity(gate.kind, gate.arity()) {
        return Err(ArityError {
            kind: gate.kind,
            result: gate.result,
            arity: gate.arity(),
        });
    }

    let res = gate.result;
    let ops = &gate.operands;
    let emitted = match gate.kind {
        GateKind::Not => encode_not(sink, res, ops[0]),
        // res -> v for each v, (and v) -> res
        GateKind::And => encode_definition(sink, res, ops, true, true),
        // !res -> v for each v, (and v) -> !res
        GateKind::Nand => encode_definition(sink, res, ops, true, false),
        // v -> res for each v, !(or v) -> !res
        GateKind::Or => encode_definition(sink, res, ops, false, true),
        // v -> !res for each v, !(or v) -> res
        GateKind::Nor => encode_definition(sink, res, ops, false, false),
        GateKind::Xor => encode_parity(sink, &augmented(gate), Parity::Even),
        GateKind::Xnor => encode_parity(sink, &augmented(gate), Parity::Odd),
    };
    debug!(
        "encoded {} gate var={} arity={} clauses={}",
        gate.kind,
        res,
        gate.arity(),
        emitted
    );
    Ok(emitted)
}

/// Number of clauses `encode_gate` emits for a gate of `kind` with `arity`
/// operands. `None` when the arity is not encodable or the count overflows.
pub fn clause_count(kind: GateKind, arity: usize) -> Option<u128> {
    if !encodable_arity(kind, arity) {
        return None;
    }
    match kind {
        GateKind::Not => Some(2),
        GateKind::And | GateKind::Nand | GateKind::Or | GateKind::Nor => {
            (arity as u128).checked_add(1)
        }
        GateKind::Xor | GateKind::Xnor => parity_clause_count(arity.checked_add(1)?),
    }
}

fn encode_not<S: ClauseSink + ?Sized>(sink: &mut S, res: u32, input: u32) -> usize {
    // res and input must differ
    sink.add_clause(vec![Lit::neg_of(res), Lit::neg_of(input)]);
    sink.add_clause(vec![Lit::pos(res), Lit::pos(input)]);
    2
}

/// Shared Tseitin shape for AND/NAND/OR/NOR.
///
/// `conjunctive` selects AND-like (true) or OR-like (false) fan-in, `positive`
/// whether the result is taken as is or complemented. Produces one binary
/// clause per operand plus one wide clause.
fn encode_definition<S: ClauseSink + ?Sized>(
    sink: &mut S,
    res: u32,
    ops: &[u32],
    conjunctive: bool,
    positive: bool,
) -> usize {
    let out = Lit::new(res, positive);
    for &v in ops {
        let op = Lit::new(v, conjunctive);
        let implied = if conjunctive { out.neg() } else { out };
        sink.add_clause(vec![op, implied]);
    }

    let mut wide = Vec::with_capacity(ops.len() + 1);
    wide.extend(ops.iter().map(|&v| Lit::new(v, !conjunctive)));
    wide.push(if conjunctive { out } else { out.neg() });
    sink.add_clause(wide);

    ops.len() + 1
}

fn augmented(gate: &Gate) -> Vec<u32> {
    let mut vars = Vec::with_capacity(gate.operands.len() + 1);
    vars.extend_from_slice(&gate.operands);
    vars.push(gate.result);
    vars
}
