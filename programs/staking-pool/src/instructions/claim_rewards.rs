use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, REWARD_VAULT_SEED, STAKER_SEED};
use crate::error::StakingError;
use crate::state::{Pool, Staker};

/// Claim the caller's settled rewards
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `staker_id` - Id of the ledger row being claimed
///
/// # Flow
/// 1. Verify ownership
/// 2. Settle entitlement up to the current timestamp
/// 3. Pay out up to the pool's remaining budget from the reward vault
/// 4. Zero the row's unclaimed rewards; any excess beyond the depleted
///    budget is forfeited
///
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// User claiming their rewards
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

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump = pool.reward_vault_bump,
        token::mint = asset_mint,
        token::authority = pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_claim_rewards(ctx: Context<ClaimRewards>, staker_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    let staker = &mut ctx.accounts.staker;

    require!(staker.id == staker_id, StakingError::Unauthorized);

    pool.settle_rewards(staker, now)?;
    require!(staker.unclaimed_rewards > 0, StakingError::NoRewardsToClaim);

    // The remaining budget is the hard cap on every payout
    let payout = staker.unclaimed_rewards.min(pool.amount_remaining);

    if payout > 0 {
        let seeds = &[POOL_SEED, &[pool.bump]];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reward_vault.to_account_info(),
                    to: ctx.accounts.user_asset_account.to_account_info(),
                    authority: pool.to_account_info(),
                },
                signer_seeds,
            ),
            payout,
        )?;
    }

    pool.record_payout(payout)?;
    staker.record_claim();

    msg!(
        "Claimed {}. Staker #{}, pool budget remaining: {}",
        payout,
        staker.id,
        pool.amount_remaining
    );

    Ok(())
}
