use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Per-address ledger row
/// PDA: ["staker", pool, owner]
#[account]
#[derive(Default)]
pub struct Staker {
    /// The pool this row belongs to
    pub pool: Pubkey,

    /// Owner of this row; set on first stake, immutable afterwards
    pub owner: Pubkey,

    /// Sequential id assigned on first stake; stable for the owner's
    /// lifetime, never reused
    pub id: u64,

    /// Currently deposited principal
    pub principal: u64,

    /// Timestamp of the stake that started the current lock-in clock
    pub staked_at: i64,

    /// Timestamp through which rewards have already been settled
    pub last_accrual_at: i64,

    /// Rewards settled but not yet paid out
    pub unclaimed_rewards: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Staker {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // id
        8 +  // principal
        8 +  // staked_at
        8 +  // last_accrual_at
        8 +  // unclaimed_rewards
        1 +  // bump
        32;  // padding for future fields

    /// Record a deposit.
    ///
    /// A row with zero principal (fresh, or fully unstaked earlier) starts
    /// a new position: the lock-in clock and accrual cursor restart, while
    /// rewards settled before the earlier withdrawal stay claimable. An
    /// active row only grows its principal; additional stake does not
    /// restart the lock-in clock for what is already deposited.
    pub fn record_stake(&mut self, amount: u64, now: i64) -> Result<()> {
        if self.principal == 0 {
            self.principal = amount;
            self.staked_at = now;
            self.last_accrual_at = now;
        } else {
            self.principal = self
                .principal
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;
        }

        Ok(())
    }

    /// Withdraw the full principal. Returns the withdrawn amount.
    /// Pending entitlement must be settled by the caller beforehand.
    pub fn record_unstake(&mut self) -> u64 {
        let amount = self.principal;
        self.principal = 0;
        amount
    }

    /// Close out a claim: whatever was not paid is forfeited
    pub fn record_claim(&mut self) {
        self.unclaimed_rewards = 0;
    }

    /// Read-only projection returned by the query instructions
    pub fn details(&self) -> StakerDetails {
        StakerDetails {
            principal: self.principal,
            staked_at: self.staked_at,
            last_accrual_at: self.last_accrual_at,
            id: self.id,
            owner: self.owner,
            unclaimed_rewards: self.unclaimed_rewards,
        }
    }
}

/// Staker ledger row as seen by callers
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakerDetails {
    pub principal: u64,
    pub staked_at: i64,
    pub last_accrual_at: i64,
    pub id: u64,
    pub owner: Pubkey,
    pub unclaimed_rewards: u64,
}
