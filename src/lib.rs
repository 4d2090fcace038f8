pub mod circuit;
pub mod cnf;
pub mod compile;
pub mod error;
pub mod report;
pub mod sat;
pub mod solver;
