use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use circuitsat::cnf::cnf::{ClauseSink, Cnf, Lit};
use circuitsat::cnf::dimacs::to_dimacs_with_units;
use circuitsat::compile::{CompileOptions, ParsePolicy, compile_reader};
use circuitsat::error::{CircuitError, EXIT_USAGE};
use circuitsat::solver::{Backend, IncrementalSolver};

#[derive(Debug, Parser)]
#[command(name = "circuitsat")]
#[command(about = "Compile a combinational circuit to CNF and search for inputs that drive every output high")]
struct Cli {
    /// Circuit description (INPUT/OUTPUT declarations and gate assignments).
    path: String,
    #[arg(long, default_value = "varisat")]
    backend: String,
    /// Skip unrecognized lines and allow a wire to be driven twice.
    #[arg(long, default_value_t = false)]
    lenient: bool,
    /// Give up after this many branching decisions (dpll backend only).
    #[arg(long)]
    decision_limit: Option<usize>,
    /// Also write the compiled formula, outputs as unit clauses, to this path.
    #[arg(long)]
    emit_dimacs: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            let code = err
                .downcast_ref::<CircuitError>()
                .map(CircuitError::exit_code)
                .unwrap_or(EXIT_USAGE);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Some(backend) = Backend::parse(&cli.backend) else {
        bail!("unknown backend '{}', expected varisat|dpll", cli.backend);
    };
    if backend == Backend::Varisat && cli.decision_limit.is_some() {
        warn!("--decision-limit only applies to the dpll backend, ignoring");
    }
    let options = CompileOptions {
        policy: if cli.lenient {
            ParsePolicy::Lenient
        } else {
            ParsePolicy::Strict
        },
    };

    let file = File::open(&cli.path)
        .map_err(CircuitError::Io)
        .with_context(|| format!("cannot open '{}'", cli.path))?;

    let mut solver = backend.build(cli.decision_limit);
    let mut copy = cli.emit_dimacs.as_ref().map(|_| Cnf::new(0));
    let mut sink = Tee {
        solver: solver.as_mut(),
        copy: copy.as_mut(),
    };
    let compiled = compile_reader(BufReader::new(file), &mut sink, options)
        .with_context(|| format!("failed to compile '{}'", cli.path))?;

    if let (Some(emit), Some(cnf)) = (&cli.emit_dimacs, &copy) {
        std::fs::write(emit, to_dimacs_with_units(cnf, &compiled.assumptions))
            .map_err(CircuitError::Io)
            .with_context(|| format!("cannot write '{}'", emit))?;
        info!(
            "wrote {} vars={} clauses={}",
            emit,
            cnf.num_vars,
            cnf.clauses.len() + compiled.assumptions.len()
        );
    }

    match compiled.solve(solver.as_mut()) {
        Ok(outcome) => {
            print!("{}", outcome);
            Ok(())
        }
        Err(err @ CircuitError::OracleUnknown { .. }) => {
            println!("UNKNOWN STATUS");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Feeds the solver and, when DIMACS output was requested, an in-memory copy.
struct Tee<'a> {
    solver: &'a mut dyn IncrementalSolver,
    copy: Option<&'a mut Cnf>,
}

impl ClauseSink for Tee<'_> {
    fn add_clause(&mut self, clause: Vec<Lit>) {
        if let Some(cnf) = self.copy.as_deref_mut() {
            cnf.add_clause(clause.clone());
        }
        self.solver.add_clause(clause);
    }
}
