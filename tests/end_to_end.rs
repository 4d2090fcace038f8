use circuitsat::cnf::cnf::Cnf;
use circuitsat::compile::{CompileOptions, ParsePolicy, compile_str, solve_str};
use circuitsat::error::{CircuitError, EXIT_PARSE, EXIT_UNKNOWN};
use circuitsat::report::Outcome;
use circuitsat::solver::Backend;
use circuitsat::solver::dpll_backend::DpllSolverBackend;

const BACKENDS: [Backend; 2] = [Backend::Varisat, Backend::Dpll];

fn run(src: &str, backend: Backend) -> Outcome {
    let mut solver = backend.build(None);
    solve_str(src, solver.as_mut(), CompileOptions::default()).expect("solve")
}

#[test]
fn and_output_forces_both_inputs() {
    let src = "\
INPUT(a)
INPUT(b)
c = AND(a, b)
OUTPUT(c)
";
    for backend in BACKENDS {
        let out = run(src, backend);
        assert!(out.is_sat());
        assert_eq!(out.value_of("a"), Some(true));
        assert_eq!(out.value_of("b"), Some(true));
        assert_eq!(
            out.to_string(),
            "SATISFIABLE\ninputs:\n  a: true\n  b: true\n"
        );
    }
}

#[test]
fn not_output_forces_false_input() {
    let src = "\
INPUT(a)
out = NOT(a)
OUTPUT(out)
";
    for backend in BACKENDS {
        let out = run(src, backend);
        assert_eq!(out.value_of("a"), Some(false));
    }
}

#[test]
fn xor3_output_needs_odd_inputs() {
    let src = "\
INPUT(a)
INPUT(b)
INPUT(c)
x = XOR(a, b, c)
OUTPUT(x)
";
    for backend in BACKENDS {
        let out = run(src, backend);
        let trues = ["a", "b", "c"]
            .iter()
            .filter(|n| out.value_of(n) == Some(true))
            .count();
        assert_eq!(trues % 2, 1, "{:?}: {}", backend, out);
    }
}

#[test]
fn complementary_outputs_are_unsat() {
    let src = "\
INPUT(a)
z = AND(a, a)
y = NOT(z)
OUTPUT(z)
OUTPUT(y)
";
    for backend in BACKENDS {
        let out = run(src, backend);
        assert_eq!(out, Outcome::Unsatisfiable);
        assert_eq!(out.to_string(), "UNSATISFIABLE\n");
    }
}

#[test]
fn xnor_chain_with_nxor_spelling() {
    // y forced true means a == b, and the NOR then pins both low
    let src = "\
INPUT(a)
INPUT(b)
y = NXOR(a, b)
t = NOR(a, b)
OUTPUT(y)
OUTPUT(t)
";
    for backend in BACKENDS {
        let out = run(src, backend);
        assert_eq!(out.value_of("a"), Some(false));
        assert_eq!(out.value_of("b"), Some(false));
    }
}

#[test]
fn duplicate_output_is_harmless() {
    let src = "\
INPUT(a)
INPUT(b)
o = NAND(a, b)
OUTPUT(o)
OUTPUT(o)
n = OR(a, b)
OUTPUT(n)
";
    for backend in BACKENDS {
        let out = run(src, backend);
        let a = out.value_of("a") == Some(true);
        let b = out.value_of("b") == Some(true);
        assert!(a != b, "{:?}: {}", backend, out);
    }
}

#[test]
fn no_outputs_is_trivially_sat() {
    let src = "INPUT(a)\nINPUT(b)\nc = XOR(a, b)\n";
    for backend in BACKENDS {
        assert!(run(src, backend).is_sat());
    }
}

#[test]
fn parse_error_is_fatal_by_default() {
    let src = "INPUT(a)\nb = MUX(a, a)\nOUTPUT(b)\n";
    let mut solver = DpllSolverBackend::new();
    let err = solve_str(src, &mut solver, CompileOptions::default()).expect_err("expected parse error");
    match &err {
        CircuitError::Parse(p) => assert_eq!(p.line, 2),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), EXIT_PARSE);
}

#[test]
fn redefinition_is_rejected_unless_lenient() {
    let src = "\
INPUT(a)
x = NOT(a)
x = AND(a, a)
OUTPUT(x)
";
    let mut cnf = Cnf::new(0);
    let err = compile_str(src, &mut cnf, CompileOptions::default()).expect_err("expected redefinition error");
    assert!(err.to_string().contains("already driven"), "{err}");

    // lenient mode layers both definitions: x = !a and x = a conflict
    let lenient = CompileOptions {
        policy: ParsePolicy::Lenient,
    };
    for backend in BACKENDS {
        let mut solver = backend.build(None);
        let out = solve_str(src, solver.as_mut(), lenient).expect("lenient solve");
        assert_eq!(out, Outcome::Unsatisfiable);
    }
}

#[test]
fn lenient_skips_unrecognized_lines() {
    let src = "\
INPUT(a)
q = DFF(a)
garbage here
o = NOT(a)
OUTPUT(o)
";
    let lenient = CompileOptions {
        policy: ParsePolicy::Lenient,
    };
    let mut cnf = Cnf::new(0);
    let compiled = compile_str(src, &mut cnf, lenient).expect("lenient compile");
    assert_eq!(compiled.stats.skipped_lines, 2);
    assert_eq!(compiled.stats.gates, 1);
    assert_eq!(cnf.clauses.len(), 2);
}

#[test]
fn decision_budget_yields_unknown() {
    let src = "\
INPUT(a)
INPUT(b)
INPUT(c)
x = XOR(a, b, c)
OUTPUT(x)
";
    let mut solver = DpllSolverBackend::with_decision_limit(Some(0));
    let err = solve_str(src, &mut solver, CompileOptions::default()).expect_err("expected unknown");
    assert!(matches!(err, CircuitError::OracleUnknown { backend: "dpll" }));
    assert_eq!(err.exit_code(), EXIT_UNKNOWN);
}

#[test]
fn recompiling_is_deterministic() {
    let src = "\
INPUT(a)
INPUT(b)
INPUT(c)
n1 = XNOR(a, b, c)
n2 = NOR(n1, a)
out = OR(n2, b, c)
OUTPUT(out)
";
    let mut first = Cnf::new(0);
    let mut second = Cnf::new(0);
    let c1 = compile_str(src, &mut first, CompileOptions::default()).expect("compile");
    let c2 = compile_str(src, &mut second, CompileOptions::default()).expect("compile");
    assert_eq!(first, second);
    assert_eq!(c1.stats, c2.stats);
    assert_eq!(c1.assumptions, c2.assumptions);
    // XNOR/3 -> 8, NOR/2 -> 3, OR/3 -> 4
    assert_eq!(c1.stats.clauses, 15);
    assert_eq!(first.clauses.len(), 15);
    assert_eq!(c1.stats.max_arity, 3);
}
