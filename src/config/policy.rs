//! Behavioural switches for the points where pools and the registry may
//! either keep the reference behaviour or tighten it.

use serde::{Deserialize, Serialize};

/// How a non-initial deposit's asset amount is checked against the
/// current reserve ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    /// Accept any asset amount.  A disproportionate deposit dilutes or
    /// advantages the existing shareholders.
    #[default]
    Permissive,
    /// Reject a deposit whose asset amount is below the current ratio:
    /// `asset_in × prior_native ≥ native_in × asset_reserve`.
    Proportional,
}

/// How a withdrawal verifies that it leaves the reserve ratio intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalCheck {
    /// Cross-multiplied comparison without truncation:
    /// `|native × asset_out − asset × native_out| < max(native, asset)`.
    ///
    /// The bound is the largest deviation the two floor divisions can
    /// introduce.  Payouts computed as floored shares of each reserve
    /// always pass, so this check only rejects payouts that were not
    /// derived from the reserves.
    #[default]
    CrossMultiplied,
    /// `⌊asset / native⌋` before must equal `⌊asset' / native'⌋` after.
    ///
    /// Can reject a valid withdrawal when the true ratio sits next to an
    /// integer boundary.  Skipped when the withdrawal empties the pool.
    FloorRatio,
}

/// Whether the registry fills its pool → asset and index → asset maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReverseLookups {
    /// Never written by pool creation: reverse lookups always miss.
    #[default]
    Unpopulated,
    /// Written on every pool creation.
    Populated,
}
