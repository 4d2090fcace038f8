pub mod cnf;
pub mod dimacs;
pub mod encode;
pub mod parity;
