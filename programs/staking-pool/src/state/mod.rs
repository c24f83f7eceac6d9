pub mod pool;
pub mod staker;

pub use pool::*;
pub use staker::*;
