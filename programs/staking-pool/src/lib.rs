use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;
use state::StakerDetails;

// Program ID - will be updated after first deploy
declare_id!("9XjXYmL9TLB3FuszEuXCTkjC6a4vHZ5TPWczyNMLKHRg");

#[program]
pub mod staking_pool {
    use super::*;

    /// Create the staking pool and fund its reward budget
    ///
    /// One-time operation; a second call fails with `AlreadyStarted`.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `total_distribution_amount` - Reward budget, immutable afterwards
    /// * `duration_days` - Length of the distribution window
    /// * `lock_in_days` - Minimum staking time before withdrawal
    ///
    pub fn create_pool(
        ctx: Context<CreatePool>,
        total_distribution_amount: u64,
        duration_days: u64,
        lock_in_days: u64,
    ) -> Result<()> {
        instructions::create_pool::handler_create_pool(
            ctx,
            total_distribution_amount,
            duration_days,
            lock_in_days,
        )
    }

    /// Stake tokens into the pool
    ///
    /// Registers the caller with a sequential staker id on first stake.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to deposit
    ///
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount)
    }

    /// Withdraw the full principal after the lock-in period
    ///
    /// Settles pending rewards first; they remain claimable afterwards.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `staker_id` - Id of the caller's ledger row
    ///
    pub fn unstake(ctx: Context<Unstake>, staker_id: u64) -> Result<()> {
        instructions::unstake::handler_unstake(ctx, staker_id)
    }

    /// Claim settled rewards, capped by the pool's remaining budget
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `staker_id` - Id of the caller's ledger row
    ///
    pub fn claim_rewards(ctx: Context<ClaimRewards>, staker_id: u64) -> Result<()> {
        instructions::claim_rewards::handler_claim_rewards(ctx, staker_id)
    }

    /// Staker id assigned to an address
    pub fn get_staker_id(ctx: Context<StakerByAddress>, address: Pubkey) -> Result<u64> {
        instructions::queries::handler_get_staker_id(ctx, address)
    }

    /// Ledger row details, looked up by staker id
    pub fn get_staker_details_by_id(ctx: Context<StakerById>, id: u64) -> Result<StakerDetails> {
        instructions::queries::handler_get_staker_details_by_id(ctx, id)
    }

    /// Ledger row details, looked up by address
    pub fn get_staker_details_by_address(
        ctx: Context<StakerByAddress>,
        address: Pubkey,
    ) -> Result<StakerDetails> {
        instructions::queries::handler_get_staker_details_by_address(ctx, address)
    }

    /// Reward budget not yet paid out
    pub fn total_pool_amount_left(ctx: Context<PoolQuery>) -> Result<u64> {
        instructions::queries::handler_total_pool_amount_left(ctx)
    }

    /// Reward budget fixed at creation
    pub fn total_distribution_amount(ctx: Context<PoolQuery>) -> Result<u64> {
        instructions::queries::handler_total_distribution_amount(ctx)
    }

    /// Whether the pool has been created
    pub fn pool_started(ctx: Context<PoolQuery>) -> Result<bool> {
        instructions::queries::handler_pool_started(ctx)
    }
}
