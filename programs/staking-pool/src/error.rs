use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Pool Lifecycle Errors (6000-6009)
    #[msg("Pool already created")]
    AlreadyStarted,

    #[msg("Pool has not been created yet")]
    PoolNotStarted,

    // Amount Errors (6010-6019)
    #[msg("Amount should be greater than zero")]
    InvalidAmount,

    #[msg("No rewards to claim")]
    NoRewardsToClaim,

    // Authorization Errors (6020-6029)
    #[msg("Caller does not own this staker id")]
    Unauthorized,

    // Staking Errors (6030-6039)
    #[msg("Lock-in duration not completed")]
    LockInNotElapsed,

    #[msg("Nothing staked")]
    NothingStaked,

    #[msg("No staker registered with this id")]
    StakerNotFound,

    // Math Errors (6040-6049)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors (6050-6059)
    #[msg("Invalid asset mint")]
    InvalidAssetMint,
}
