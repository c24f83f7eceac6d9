// =============================================================================
// Staking Pool Constants
// =============================================================================

// PDA Seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKER_SEED: &[u8] = b"staker";

// Day-to-timestamp conversion
// duration_days / lock_in_days are stored in day units and compared against
// Clock unix timestamps; this is the single place the unit is defined.
pub const SECONDS_PER_DAY: i64 = 86_400;
