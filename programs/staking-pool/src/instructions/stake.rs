use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, STAKER_SEED, STAKE_VAULT_SEED};
use crate::error::StakingError;
use crate::state::{Pool, Staker};

/// Stake tokens into the pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to deposit
///
/// # Flow
/// 1. Validate amount
/// 2. Register the caller on first stake (sequential id)
/// 3. Settle pending entitlement at the old principal
/// 4. Transfer tokens from the caller to the stake vault
/// 5. Update the ledger row and pool total
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// User depositing tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
        constraint = pool.started @ StakingError::PoolNotStarted
    )]
    pub pool: Account<'info, Pool>,

    /// Caller's ledger row (created on first stake)
    #[account(
        init_if_needed,
        payer = user,
        space = Staker::SIZE,
        seeds = [STAKER_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    let staker = &mut ctx.accounts.staker;

    // First stake by this address: assign the next sequential id
    let is_new_staker = staker.owner == Pubkey::default();
    if is_new_staker {
        staker.pool = pool.key();
        staker.owner = ctx.accounts.user.key();
        staker.id = pool.staker_count;
        staker.bump = ctx.bumps.staker;
        staker.last_accrual_at = now;

        pool.staker_count = pool
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
    }

    // Settle at the old principal so the new deposit earns nothing
    // retroactively
    pool.settle_rewards(staker, now)?;

    // Transfer tokens from user to stake vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_asset_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    // Update ledger row and pool total
    staker.record_stake(amount, now)?;

    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;

    msg!(
        "Staked {}. Staker #{} principal: {}, pool total: {}",
        amount,
        staker.id,
        staker.principal,
        pool.total_staked
    );

    Ok(())
}
