pub mod runtime;
pub mod simulator;

pub use runtime::*;
pub use simulator::*;
