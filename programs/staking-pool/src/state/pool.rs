use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_DAY;
use crate::error::StakingError;
use crate::state::Staker;

/// Global pool state
/// PDA: ["pool"]
///
/// A single pool exists for the program's lifetime; the PDA has no
/// variable seeds, so a second pool can never be created.
#[account]
#[derive(Default)]
pub struct Pool {
    /// Asset accepted for staking and paid out as rewards
    pub asset_mint: Pubkey,

    /// Vault holding staked principal
    /// PDA: ["stake_vault", pool]
    pub stake_vault: Pubkey,

    /// Vault holding the undistributed reward budget
    /// PDA: ["reward_vault", pool]
    pub reward_vault: Pubkey,

    /// Reward budget fixed at creation, never changed afterwards
    pub total_distribution_amount: u64,

    /// Length of the distribution window, in days
    pub duration_days: u64,

    /// Minimum time principal must stay deposited, in days
    pub lock_in_days: u64,

    /// Timestamp of pool creation; accrual window is
    /// [created_at, created_at + duration_days]
    pub created_at: i64,

    /// Budget not yet paid out; decreases only on claim payouts
    pub amount_remaining: u64,

    /// Sum of principal across all stakers, kept current on every
    /// stake/unstake so accrual never scans the registry
    pub total_staked: u64,

    /// Number of staker ids assigned; also the next id to assign
    pub staker_count: u64,

    /// True once creation succeeds; gates re-creation
    pub started: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl Pool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // asset_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // total_distribution_amount
        8 +  // duration_days
        8 +  // lock_in_days
        8 +  // created_at
        8 +  // amount_remaining
        8 +  // total_staked
        8 +  // staker_count
        1 +  // started
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        32;  // padding for future fields

    /// Timestamp at which the distribution window closes.
    /// No rewards accrue past this point.
    pub fn accrual_window_end(&self) -> Result<i64> {
        let duration = i64::try_from(self.duration_days)
            .map_err(|_| StakingError::MathOverflow)?
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(StakingError::MathOverflow)?;

        self.created_at
            .checked_add(duration)
            .ok_or(error!(StakingError::MathOverflow))
    }

    /// Whether the staker's principal has passed the lock-in gate:
    /// now >= staked_at + lock_in_days
    pub fn is_unlocked(&self, staker: &Staker, now: i64) -> Result<bool> {
        let lock_in = i64::try_from(self.lock_in_days)
            .map_err(|_| StakingError::MathOverflow)?
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(StakingError::MathOverflow)?;

        let unlock_at = staker
            .staked_at
            .checked_add(lock_in)
            .ok_or(StakingError::MathOverflow)?;

        Ok(now >= unlock_at)
    }

    /// Settle the staker's pending entitlement up to `now`.
    ///
    /// Elapsed time is clamped to the distribution window, the pro-rata
    /// share is computed at the current total_staked, and the result is
    /// recorded in `unclaimed_rewards`. The budget is not reserved here;
    /// the payout path enforces `amount_remaining` as the hard cap, so
    /// accrual can never starve other stakers of unclaimed budget.
    ///
    /// Returns the newly settled amount.
    pub fn settle_rewards(&self, staker: &mut Staker, now: i64) -> Result<u64> {
        let accrue_until = now.min(self.accrual_window_end()?);

        let elapsed = accrue_until
            .checked_sub(staker.last_accrual_at)
            .ok_or(StakingError::MathOverflow)?;
        if elapsed <= 0 {
            return Ok(0);
        }

        let entitlement = self.pro_rata_entitlement(staker.principal, elapsed)?;

        staker.unclaimed_rewards = staker
            .unclaimed_rewards
            .checked_add(entitlement)
            .ok_or(StakingError::MathOverflow)?;
        staker.last_accrual_at = accrue_until;

        Ok(entitlement)
    }

    /// Theoretical entitlement for `principal` staked over `elapsed`
    /// seconds, as a share of the total budget:
    ///
    ///   entitlement = budget * principal * elapsed
    ///                 / (total_staked * duration)
    ///
    /// Integer arithmetic in u128, truncating toward zero, clamped to the
    /// remaining budget. Zero if nothing is staked.
    pub fn pro_rata_entitlement(&self, principal: u64, elapsed: i64) -> Result<u64> {
        if principal == 0 || self.total_staked == 0 {
            return Ok(0);
        }

        let duration = (self.duration_days as u128)
            .checked_mul(SECONDS_PER_DAY as u128)
            .ok_or(StakingError::MathOverflow)?;

        let numerator = (self.total_distribution_amount as u128)
            .checked_mul(principal as u128)
            .ok_or(StakingError::MathOverflow)?
            .checked_mul(elapsed as u128)
            .ok_or(StakingError::MathOverflow)?;

        let denominator = (self.total_staked as u128)
            .checked_mul(duration)
            .ok_or(StakingError::MathOverflow)?;

        let entitlement = numerator
            .checked_div(denominator)
            .ok_or(StakingError::DivisionByZero)?;

        Ok(entitlement.min(self.amount_remaining as u128) as u64)
    }

    /// Record a claim payout against the remaining budget
    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        self.amount_remaining = self
            .amount_remaining
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> i64 {
        n * SECONDS_PER_DAY
    }

    fn pool(budget: u64, duration_days: u64, lock_in_days: u64) -> Pool {
        Pool {
            total_distribution_amount: budget,
            duration_days,
            lock_in_days,
            created_at: 0,
            amount_remaining: budget,
            started: true,
            ..Pool::default()
        }
    }

    fn stake(pool: &mut Pool, staker: &mut Staker, amount: u64, now: i64) {
        pool.settle_rewards(staker, now).unwrap();
        staker.record_stake(amount, now).unwrap();
        pool.total_staked += amount;
    }

    fn unstake(pool: &mut Pool, staker: &mut Staker, now: i64) {
        pool.settle_rewards(staker, now).unwrap();
        let amount = staker.record_unstake();
        pool.total_staked -= amount;
    }

    fn claim(pool: &mut Pool, staker: &mut Staker, now: i64) -> u64 {
        pool.settle_rewards(staker, now).unwrap();
        let payout = staker.unclaimed_rewards.min(pool.amount_remaining);
        pool.record_payout(payout).unwrap();
        staker.record_claim();
        payout
    }

    #[test]
    fn sole_staker_full_window_earns_whole_budget() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        let paid = claim(&mut pool, &mut staker, day(30));

        assert_eq!(paid, 1000);
        assert_eq!(pool.amount_remaining, 0);
        assert_eq!(staker.unclaimed_rewards, 0);
    }

    #[test]
    fn accrual_is_proportional_to_elapsed_time() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        let settled = pool.settle_rewards(&mut staker, day(15)).unwrap();

        assert_eq!(settled, 500);
        assert_eq!(staker.unclaimed_rewards, 500);
        assert_eq!(staker.last_accrual_at, day(15));
        // budget is not reserved at accrual time
        assert_eq!(pool.amount_remaining, 1000);
    }

    #[test]
    fn settling_twice_at_same_timestamp_yields_nothing() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        let paid = claim(&mut pool, &mut staker, day(15));
        assert_eq!(paid, 500);

        // immediate second claim has nothing to settle
        assert_eq!(pool.settle_rewards(&mut staker, day(15)).unwrap(), 0);
        assert_eq!(staker.unclaimed_rewards, 0);
    }

    #[test]
    fn no_accrual_past_window_end() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        pool.settle_rewards(&mut staker, day(15)).unwrap();

        // ten days past the window end only earns the remaining window
        let settled = pool.settle_rewards(&mut staker, day(40)).unwrap();
        assert_eq!(settled, 500);
        assert_eq!(staker.last_accrual_at, day(30));

        assert_eq!(pool.settle_rewards(&mut staker, day(50)).unwrap(), 0);
    }

    #[test]
    fn staking_after_window_end_accrues_nothing() {
        let mut pool = pool(1000, 30, 0);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, day(35));

        assert_eq!(pool.settle_rewards(&mut staker, day(40)).unwrap(), 0);
        assert_eq!(staker.unclaimed_rewards, 0);
    }

    #[test]
    fn entitlement_is_zero_when_nothing_staked() {
        let pool = pool(1000, 30, 7);
        assert_eq!(pool.pro_rata_entitlement(0, day(15)).unwrap(), 0);
        // total_staked is still zero: division guard, not an error
        assert_eq!(pool.pro_rata_entitlement(100, day(15)).unwrap(), 0);
    }

    #[test]
    fn entitlement_truncates_toward_zero() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        // 7/30 of 1000 = 233.33.. -> 233
        assert_eq!(pool.settle_rewards(&mut staker, day(7)).unwrap(), 233);
    }

    #[test]
    fn lock_in_gate_boundaries() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);

        assert!(!pool.is_unlocked(&staker, day(7) - 1).unwrap());
        assert!(pool.is_unlocked(&staker, day(7)).unwrap());
        assert!(pool.is_unlocked(&staker, day(8)).unwrap());
    }

    #[test]
    fn top_up_keeps_lock_in_clock_and_settles_old_principal_first() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        stake(&mut pool, &mut staker, 100, day(15));

        // first half of the window was earned at the old principal
        assert_eq!(staker.unclaimed_rewards, 500);
        assert_eq!(staker.principal, 200);
        assert_eq!(staker.staked_at, 0);
        assert_eq!(pool.total_staked, 200);

        let paid = claim(&mut pool, &mut staker, day(30));
        assert_eq!(paid, 1000);
        assert_eq!(pool.amount_remaining, 0);
    }

    #[test]
    fn unstake_settles_pending_rewards_before_zeroing_principal() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        unstake(&mut pool, &mut staker, day(7));

        assert_eq!(staker.principal, 0);
        assert_eq!(pool.total_staked, 0);
        // 7/30 of the budget was earned before withdrawal
        assert_eq!(staker.unclaimed_rewards, 233);

        let paid = claim(&mut pool, &mut staker, day(10));
        assert_eq!(paid, 233);
        assert_eq!(pool.amount_remaining, 767);
    }

    #[test]
    fn restaking_restarts_clock_and_preserves_unclaimed_rewards() {
        let mut pool = pool(1000, 30, 7);
        let mut staker = Staker::default();

        stake(&mut pool, &mut staker, 100, 0);
        unstake(&mut pool, &mut staker, day(7));
        assert_eq!(staker.unclaimed_rewards, 233);

        // nothing accrues while fully unstaked
        stake(&mut pool, &mut staker, 50, day(10));
        assert_eq!(staker.unclaimed_rewards, 233);
        assert_eq!(staker.staked_at, day(10));
        assert_eq!(staker.last_accrual_at, day(10));
        assert!(!pool.is_unlocked(&staker, day(16)).unwrap());
        assert!(pool.is_unlocked(&staker, day(17)).unwrap());
    }

    #[test]
    fn two_stakers_split_the_budget() {
        let mut pool = pool(1000, 30, 7);
        let mut a = Staker::default();
        let mut b = Staker::default();

        stake(&mut pool, &mut a, 100, 0);
        stake(&mut pool, &mut b, 100, day(15));

        // both settle at total_staked = 200
        let paid_a = claim(&mut pool, &mut a, day(30));
        let paid_b = claim(&mut pool, &mut b, day(30));

        assert_eq!(paid_a, 500);
        assert_eq!(paid_b, 250);
        assert_eq!(
            pool.amount_remaining,
            pool.total_distribution_amount - paid_a - paid_b
        );
    }

    #[test]
    fn payout_is_capped_at_remaining_budget_and_excess_is_forfeited() {
        let mut pool = pool(1000, 30, 7);
        let mut a = Staker::default();
        let mut b = Staker::default();

        stake(&mut pool, &mut a, 100, 0);
        stake(&mut pool, &mut b, 100, 0);

        // a settles its half, then withdraws; b's later settlement sees
        // total_staked = 100 and computes the full budget for itself
        unstake(&mut pool, &mut a, day(30));
        assert_eq!(a.unclaimed_rewards, 500);

        let paid_b = claim(&mut pool, &mut b, day(30));
        assert_eq!(paid_b, 1000);
        assert_eq!(pool.amount_remaining, 0);

        // a's recorded entitlement now exceeds the depleted budget;
        // the claim pays what is left and forfeits the rest
        let paid_a = claim(&mut pool, &mut a, day(30));
        assert_eq!(paid_a, 0);
        assert_eq!(a.unclaimed_rewards, 0);
        assert_eq!(pool.amount_remaining, 0);
    }

    #[test]
    fn amount_remaining_never_goes_negative() {
        let mut pool = pool(100, 30, 7);
        assert!(pool.record_payout(101).is_err());
        assert_eq!(pool.amount_remaining, 100);

        pool.record_payout(100).unwrap();
        assert_eq!(pool.amount_remaining, 0);
        assert!(pool.record_payout(1).is_err());
    }

    #[test]
    fn total_staked_tracks_sum_of_principal() {
        let mut pool = pool(1000, 30, 0);
        let mut a = Staker::default();
        let mut b = Staker::default();

        stake(&mut pool, &mut a, 100, 0);
        stake(&mut pool, &mut b, 250, day(1));
        assert_eq!(pool.total_staked, a.principal + b.principal);

        unstake(&mut pool, &mut a, day(2));
        assert_eq!(pool.total_staked, a.principal + b.principal);

        stake(&mut pool, &mut a, 40, day(3));
        assert_eq!(pool.total_staked, a.principal + b.principal);
    }
}
