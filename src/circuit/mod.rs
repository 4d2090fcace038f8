pub mod bench;
pub mod gate;
pub mod wires;
