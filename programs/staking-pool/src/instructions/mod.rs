// =============================================================================
// Instructions Module - Staking Pool
// =============================================================================

pub mod claim_rewards;
pub mod create_pool;
pub mod queries;
pub mod stake;
pub mod unstake;

pub use claim_rewards::*;
pub use create_pool::*;
pub use queries::*;
pub use stake::*;
pub use unstake::*;
