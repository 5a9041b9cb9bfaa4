pub mod checks;
pub mod harness;
pub mod reports;
pub mod tester;

pub use tester::*;
