//! The single compilation pass: parse each line, resolve names through the
//! wire table, and push the gate's clauses straight into the sink.

use std::collections::HashSet;
use std::io::BufRead;

use log::{info, warn};

use crate::circuit::bench::{ParseError, ParseErrorKind, Statement, parse_line};
use crate::circuit::gate::Gate;
use crate::circuit::wires::WireTable;
use crate::cnf::cnf::{ClauseSink, Lit};
use crate::cnf::encode::encode_gate;
use crate::error::Result;
use crate::report::{Outcome, solve_and_report};
use crate::solver::IncrementalSolver;

/// What to do with lines the grammar does not cover and with wires driven by
/// more than one gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Both are fatal parse errors.
    #[default]
    Strict,
    /// Unrecognized lines are skipped and redefinitions stack their clauses on
    /// the same variable. Both are logged as warnings.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub policy: ParsePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub gates: usize,
    pub clauses: usize,
    pub max_arity: usize,
    pub skipped_lines: usize,
}

#[derive(Debug, Clone)]
pub struct Compilation {
    pub wires: WireTable,
    /// One positive literal per `OUTPUT` line, duplicates kept.
    pub assumptions: Vec<Lit>,
    pub stats: CompileStats,
}

impl Compilation {
    pub fn solve<S: IncrementalSolver + ?Sized>(&self, solver: &mut S) -> Result<Outcome> {
        solve_and_report(solver, &self.wires, &self.assumptions)
    }
}

pub fn compile_str<S: ClauseSink + ?Sized>(
    src: &str,
    sink: &mut S,
    options: CompileOptions,
) -> Result<Compilation> {
    compile_reader(std::io::Cursor::new(src.as_bytes()), sink, options)
}

pub fn compile_reader<R: BufRead, S: ClauseSink + ?Sized>(
    r: R,
    sink: &mut S,
    options: CompileOptions,
) -> Result<Compilation> {
    let mut pass = Pass::new(options.policy);
    for (idx, line) in r.lines().enumerate() {
        let line = line?;
        pass.line(idx + 1, &line, sink)?;
    }

    let stats = pass.stats;
    info!(
        "compiled wires={} inputs={} outputs={} gates={} clauses={} max_arity={}",
        pass.wires.len(),
        pass.wires.num_inputs(),
        pass.assumptions.len(),
        stats.gates,
        stats.clauses,
        stats.max_arity
    );
    Ok(Compilation {
        wires: pass.wires,
        assumptions: pass.assumptions,
        stats,
    })
}

/// Compiles into `solver` and runs the one solve call.
pub fn solve_str<S: IncrementalSolver + ?Sized>(
    src: &str,
    solver: &mut S,
    options: CompileOptions,
) -> Result<Outcome> {
    let compiled = compile_str(src, solver, options)?;
    compiled.solve(solver)
}

struct Pass {
    policy: ParsePolicy,
    wires: WireTable,
    assumptions: Vec<Lit>,
    driven: HashSet<u32>,
    stats: CompileStats,
}

impl Pass {
    fn new(policy: ParsePolicy) -> Self {
        Self {
            policy,
            wires: WireTable::new(),
            assumptions: Vec::new(),
            driven: HashSet::new(),
            stats: CompileStats::default(),
        }
    }

    fn line<S: ClauseSink + ?Sized>(
        &mut self,
        line_no: usize,
        line: &str,
        sink: &mut S,
    ) -> std::result::Result<(), ParseError> {
        let stmt = match parse_line(line) {
            Ok(Some(stmt)) => stmt,
            Ok(None) => return Ok(()),
            Err(kind) if self.policy == ParsePolicy::Lenient => {
                warn!("line {}: skipped ({})", line_no, kind);
                self.stats.skipped_lines += 1;
                return Ok(());
            }
            Err(kind) => return Err(ParseError::new(line_no, kind)),
        };

        match stmt {
            Statement::Input(name) => {
                self.wires.declare_input(&name);
            }
            Statement::Output(name) => {
                let id = self.wires.get_or_insert(&name);
                self.assumptions.push(Lit::pos(id));
            }
            Statement::Gate {
                result,
                kind,
                operands,
            } => {
                let res = self.wires.get_or_insert(&result);
                if !self.driven.insert(res) {
                    let err = ParseErrorKind::Redefinition(result);
                    if self.policy == ParsePolicy::Strict {
                        return Err(ParseError::new(line_no, err));
                    }
                    warn!("line {}: {}", line_no, err);
                }
                let operands = operands
                    .iter()
                    .map(|name| self.wires.get_or_insert(name))
                    .collect::<Vec<_>>();
                let gate = Gate::new(kind, res, operands);
                self.stats.gates += 1;
                self.stats.max_arity = self.stats.max_arity.max(gate.arity());
                // the parser already bounds arity, so this only trips on a
                // mismatch between the grammar and the encoder
                let emitted = encode_gate(sink, &gate).map_err(|e| {
                    ParseError::new(
                        line_no,
                        ParseErrorKind::Arity {
                            op: e.kind,
                            expected: if e.kind.max_arity().is_some() {
                                "exactly 1"
                            } else {
                                "at least 1"
                            },
                            got: e.arity,
                        },
                    )
                })?;
                self.stats.clauses += emitted;
            }
        }
        Ok(())
    }
}
