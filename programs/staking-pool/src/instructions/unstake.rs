use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, STAKER_SEED, STAKE_VAULT_SEED};
use crate::error::StakingError;
use crate::state::{Pool, Staker};

/// Withdraw the caller's full principal after the lock-in period
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `staker_id` - Id of the ledger row being withdrawn
///
/// # Flow
/// 1. Verify ownership and the lock-in gate
/// 2. Settle pending entitlement so withdrawal never forfeits earned rewards
/// 3. Transfer the full principal from the stake vault back to the caller
/// 4. Zero the row's principal and shrink the pool total
///
/// Rewards are not auto-claimed; settled entitlement stays claimable.
///
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// User withdrawing their principal
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Caller's ledger row
    #[account(
        mut,
        seeds = [STAKER_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = staker.bump,
        constraint = staker.owner == user.key() @ StakingError::Unauthorized
    )]
    pub staker: Account<'info, Staker>,

    /// Pool asset mint
    #[account(
        constraint = asset_mint.key() == pool.asset_mint @ StakingError::InvalidAssetMint
    )]
    pub asset_mint: Account<'info, Mint>,

    /// User's token account for the pool asset
    #[account(
        mut,
        token::mint = asset_mint,
        token::authority = user
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.stake_vault_bump,
        token::mint = asset_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_unstake(ctx: Context<Unstake>, staker_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    let staker = &mut ctx.accounts.staker;

    require!(staker.id == staker_id, StakingError::Unauthorized);
    require!(
        pool.is_unlocked(staker, now)?,
        StakingError::LockInNotElapsed
    );
    require!(staker.principal > 0, StakingError::NothingStaked);

    // Settle before touching principal; the entitlement earned so far
    // stays on the row, claimable later
    pool.settle_rewards(staker, now)?;

    let amount = staker.principal;

    // Transfer principal from stake vault back to user; pool PDA signs
    let seeds = &[POOL_SEED, &[pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.user_asset_account.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    staker.record_unstake();

    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::MathUnderflow)?;

    msg!(
        "Unstaked {}. Staker #{} unclaimed rewards: {}, pool total: {}",
        amount,
        staker.id,
        staker.unclaimed_rewards,
        pool.total_staked
    );

    Ok(())
}
