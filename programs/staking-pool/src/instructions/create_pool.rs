use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use crate::error::StakingError;
use crate::state::Pool;

/// Create the staking pool and fund its reward budget
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `total_distribution_amount` - Reward budget, fixed for the pool's lifetime
/// * `duration_days` - Length of the distribution window
/// * `lock_in_days` - Minimum staking time before principal can be withdrawn
///
/// # Flow
/// 1. Reject re-creation; the pool is a one-time singleton
/// 2. Transfer the full budget from the creator into the reward vault
/// 3. Commit pool state and mark it started
///
#[derive(Accounts)]
pub struct CreatePool<'info> {
    /// Creator funding the reward budget
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Pool PDA; fixed seeds, so at most one pool can ever exist
    #[account(
        init_if_needed,
        payer = creator,
        space = Pool::SIZE,
        seeds = [POOL_SEED],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Asset accepted for staking and paid out as rewards
    pub asset_mint: Account<'info, Mint>,

    /// Vault to hold staked principal
    #[account(
        init_if_needed,
        payer = creator,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault to hold the undistributed reward budget
    #[account(
        init_if_needed,
        payer = creator,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Creator's token account funding the budget
    #[account(
        mut,
        token::mint = asset_mint,
        token::authority = creator
    )]
    pub creator_asset_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_create_pool(
    ctx: Context<CreatePool>,
    total_distribution_amount: u64,
    duration_days: u64,
    lock_in_days: u64,
) -> Result<()> {
    require!(!ctx.accounts.pool.started, StakingError::AlreadyStarted);
    require!(total_distribution_amount > 0, StakingError::InvalidAmount);
    require!(duration_days > 0, StakingError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;

    // Fund the reward vault before committing any pool state
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.creator_asset_account.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.creator.to_account_info(),
            },
        ),
        total_distribution_amount,
    )?;

    let pool = &mut ctx.accounts.pool;

    pool.asset_mint = ctx.accounts.asset_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();

    pool.total_distribution_amount = total_distribution_amount;
    pool.duration_days = duration_days;
    pool.lock_in_days = lock_in_days;
    pool.created_at = now;
    pool.amount_remaining = total_distribution_amount;

    pool.total_staked = 0;
    pool.staker_count = 0;
    pool.started = true;

    pool.bump = ctx.bumps.pool;
    pool.stake_vault_bump = ctx.bumps.stake_vault;
    pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Pool created: asset={}, budget={}, duration={}d, lock_in={}d",
        pool.asset_mint,
        pool.total_distribution_amount,
        pool.duration_days,
        pool.lock_in_days
    );

    Ok(())
}
