use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, STAKER_SEED};
use crate::error::StakingError;
use crate::state::{Pool, Staker, StakerDetails};

// =============================================================================
// Query Layer
// =============================================================================
// Read-only projections over the pool and the staker registry. Values are
// returned through instruction return data; no account is mutated. A missing
// row surfaces as an account resolution error.
// =============================================================================

#[derive(Accounts)]
pub struct PoolQuery<'info> {
    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
#[instruction(address: Pubkey)]
pub struct StakerByAddress<'info> {
    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Ledger row of the queried address
    #[account(
        seeds = [STAKER_SEED, pool.key().as_ref(), address.as_ref()],
        bump = staker.bump
    )]
    pub staker: Account<'info, Staker>,
}

#[derive(Accounts)]
#[instruction(id: u64)]
pub struct StakerById<'info> {
    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Ledger row with the queried id. Ids are unique, and the seeds check
    /// against the row's own recorded owner proves this is a registry row
    /// of this pool, so the id match fully determines the row.
    #[account(
        seeds = [STAKER_SEED, pool.key().as_ref(), staker.owner.as_ref()],
        bump = staker.bump,
        constraint = staker.id == id @ StakingError::StakerNotFound
    )]
    pub staker: Account<'info, Staker>,
}

pub fn handler_get_staker_id(ctx: Context<StakerByAddress>, _address: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.staker.id)
}

pub fn handler_get_staker_details_by_id(
    ctx: Context<StakerById>,
    _id: u64,
) -> Result<StakerDetails> {
    Ok(ctx.accounts.staker.details())
}

pub fn handler_get_staker_details_by_address(
    ctx: Context<StakerByAddress>,
    _address: Pubkey,
) -> Result<StakerDetails> {
    Ok(ctx.accounts.staker.details())
}

pub fn handler_total_pool_amount_left(ctx: Context<PoolQuery>) -> Result<u64> {
    Ok(ctx.accounts.pool.amount_remaining)
}

pub fn handler_total_distribution_amount(ctx: Context<PoolQuery>) -> Result<u64> {
    Ok(ctx.accounts.pool.total_distribution_amount)
}

pub fn handler_pool_started(ctx: Context<PoolQuery>) -> Result<bool> {
    Ok(ctx.accounts.pool.started)
}
