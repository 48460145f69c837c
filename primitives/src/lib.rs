//! AgentTrust shared primitive types.
//!
//! Every crate in the workspace imports from this crate.
//! No pallet-specific logic lives here — only type aliases,
//! constants, the pagination and aggregation machinery shared
//! by all three registries, and the cross-pallet trait seams.
//!
//! Pallets never depend on each other's types directly;
//! they depend on primitives.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
pub use sp_core::H256;
use sp_core::sr25519;
use sp_runtime::AccountId32;

// ============================================================
// Core registry types
// ============================================================

/// Dense agent identifier, allocated sequentially starting at 0.
pub type AgentId = u64;

/// Per-client feedback index. The first feedback a client leaves
/// for an agent gets index 1; 0 means "no feedback yet".
pub type FeedbackIndex = u64;

/// Validation response score, 0–100. While a request is pending the
/// stored score is 0 and `has_response` is false.
pub type ResponseScore = u8;

// ============================================================
// Fixed-point scale constants
// ============================================================

/// WAD fixed-point scale: 10^18. Feedback values submitted at varying
/// native precisions are normalized into this scale before entering
/// the running aggregate, so mixed-precision submissions average
/// correctly.
pub const WAD: i128 = 1_000_000_000_000_000_000;

/// Decimal places of the WAD scale. Feedback summaries always report
/// this, regardless of the native precisions originally submitted.
pub const WAD_DECIMALS: u8 = 18;

/// Maximum native decimals a feedback value may carry. Anything above
/// this cannot be represented in the WAD scale without losing digits.
pub const MAX_VALUE_DECIMALS: u8 = 18;

/// Maximum validation response score.
pub const MAX_RESPONSE_SCORE: ResponseScore = 100;

// ============================================================
// Pagination constants
// ============================================================

/// Fixed page size for every list-returning query.
///
/// Each logical item costs at most 2 underlying storage reads
/// (sequence entry + record), so a full page stays within a 30-read
/// per-call budget. Deliberately NOT caller-controlled: callers
/// wanting more issue repeated cursor-carrying calls.
pub const PAGE_SIZE: u32 = 15;

// ============================================================
// Reserved metadata keys
// ============================================================

/// Metadata key reserved for the agent wallet binding. User-supplied
/// metadata writes with this key are rejected; the binding is only
/// mutable through the dedicated wallet entry points.
pub const RESERVED_METADATA_KEY: &[u8] = b"agentWallet";

// ============================================================
// Stable numeric error registry
//
// Dispatch errors are pallet `Error` enums; these constants preserve
// the registry-partitioned numeric codes (identity 1000s, validation
// 2000s, reputation 3000s) that off-chain indexers key on, so the
// mapping stays stable across deployments. Gaps in a range are
// retired codes, kept unassigned.
// ============================================================

pub mod codes {
    /// Identity registry error codes (1000–1099).
    pub mod identity {
        pub const NOT_AUTHORIZED: u16 = 1000;
        pub const AGENT_NOT_FOUND: u16 = 1001;
        pub const INVALID_SENDER: u16 = 1002;
        pub const INVALID_METADATA: u16 = 1003;
        pub const RESERVED_KEY: u16 = 1004;
        pub const INVALID_SIGNATURE: u16 = 1005;
        pub const EXPIRED_SIGNATURE: u16 = 1006;
        pub const ID_OVERFLOW: u16 = 1007;
        pub const WALLET_ALREADY_SET: u16 = 1008;
        pub const WALLET_CONFLICT: u16 = 1009;
    }

    /// Validation registry error codes (2000–2099).
    pub mod validation {
        pub const NOT_AUTHORIZED: u16 = 2000;
        pub const AGENT_NOT_FOUND: u16 = 2001;
        pub const VALIDATION_NOT_FOUND: u16 = 2002;
        pub const VALIDATION_EXISTS: u16 = 2003;
        pub const INVALID_VALIDATOR: u16 = 2004;
        pub const INVALID_RESPONSE: u16 = 2005;
    }

    /// Reputation registry error codes (3000–3099).
    pub mod reputation {
        pub const NOT_AUTHORIZED: u16 = 3000;
        pub const AGENT_NOT_FOUND: u16 = 3001;
        pub const FEEDBACK_NOT_FOUND: u16 = 3002;
        pub const ALREADY_REVOKED: u16 = 3003;
        pub const SELF_FEEDBACK: u16 = 3005;
        pub const INDEX_LIMIT_EXCEEDED: u16 = 3009;
        pub const EMPTY_URI: u16 = 3010;
        pub const INVALID_DECIMALS: u16 = 3011;
        pub const EXPIRED_SIGNATURE: u16 = 3012;
        pub const INVALID_SIGNATURE: u16 = 3013;
    }
}

// ============================================================
// Bounded byte vectors for on-chain storage
// ============================================================

pub type BoundedUri = sp_runtime::BoundedVec<u8, sp_core::ConstU32<512>>;
pub type BoundedTag = sp_runtime::BoundedVec<u8, sp_core::ConstU32<64>>;
pub type BoundedMetadataKey = sp_runtime::BoundedVec<u8, sp_core::ConstU32<64>>;
pub type BoundedMetadataValue = sp_runtime::BoundedVec<u8, sp_core::ConstU32<256>>;
/// Sr25519 signature (64 bytes) for the signed wallet-change and
/// signed feedback paths.
pub type BoundedSignature = sp_runtime::BoundedVec<u8, sp_core::ConstU32<64>>;
/// Maximum metadata entries accepted by a single `register_full` call.
pub type MaxMetadataEntries = sp_core::ConstU32<16>;

// ============================================================
// Fixed-point running aggregate
// ============================================================

/// O(1) running aggregate over a mutable set of signed values.
///
/// Maintains only `{count, sum}`; adding, removing, or replacing a
/// member is constant-size arithmetic and never iterates stored
/// history. This is what keeps `get_summary` O(1) after thousands of
/// feedback or validation events.
///
/// The reputation registry feeds it WAD-scaled values (see
/// [`wad_scale`]); the validation registry feeds it raw 0–100 scores.
#[derive(
    Clone, Copy, PartialEq, Eq,
    Encode, Decode, MaxEncodedLen, TypeInfo, Debug, Default,
)]
pub struct RunningAggregate {
    /// Number of values currently in the aggregate.
    pub count: u64,
    /// Sum of the values currently in the aggregate.
    pub sum: i128,
}

impl RunningAggregate {
    /// Add a value. Returns the updated aggregate, or `None` on
    /// arithmetic overflow.
    pub fn add(self, value: i128) -> Option<Self> {
        Some(Self {
            count: self.count.checked_add(1)?,
            sum: self.sum.checked_add(value)?,
        })
    }

    /// Remove a previously-added value (e.g. feedback revocation).
    /// Returns `None` if the aggregate is empty or on overflow.
    pub fn remove(self, value: i128) -> Option<Self> {
        Some(Self {
            count: self.count.checked_sub(1)?,
            sum: self.sum.checked_sub(value)?,
        })
    }

    /// Replace one member's value without changing the count
    /// (e.g. a validator overwriting an earlier response).
    pub fn replace(self, old: i128, new: i128) -> Option<Self> {
        Some(Self {
            count: self.count,
            sum: self.sum.checked_sub(old)?.checked_add(new)?,
        })
    }

    /// Truncating mean (integer division toward zero). 0 when empty.
    pub fn mean(&self) -> i128 {
        if self.count == 0 {
            0
        } else {
            self.sum / self.count as i128
        }
    }
}

/// Scale a native-precision value into the WAD scale:
/// `value * 10^(18 - decimals)`.
///
/// Returns `None` when `decimals > 18` or the product overflows i128
/// (unreachable for i64 inputs: |i64::MIN| * 10^18 < i128::MAX).
pub fn wad_scale(value: i64, decimals: u8) -> Option<i128> {
    if decimals > MAX_VALUE_DECIMALS {
        return None;
    }
    let factor = 10i128.checked_pow((MAX_VALUE_DECIMALS - decimals) as u32)?;
    (value as i128).checked_mul(factor)
}

// ============================================================
// Bounded cursor pagination
// ============================================================

/// One page of a cursor-driven list query.
#[derive(Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Debug)]
pub struct Page<T> {
    /// Up to [`PAGE_SIZE`] items from the scanned window.
    pub items: Vec<T>,
    /// Resume offset for the next call; `None` on the final page.
    pub cursor: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new(), cursor: None }
    }
}

/// Scan at most [`PAGE_SIZE`] consecutive logical entries of a dense
/// sequence of length `total`, starting at `cursor` (default 0).
///
/// `fetch(i)` resolves logical index `i`; returning `None` drops the
/// entry from the page (tag filtering, revoked filtering) without
/// affecting cursor advancement — the cursor always moves by the
/// scanned window, so the per-call read budget holds regardless of
/// how many entries match.
pub fn paginate<T>(
    total: u64,
    cursor: Option<u64>,
    mut fetch: impl FnMut(u64) -> Option<T>,
) -> Page<T> {
    let start = cursor.unwrap_or(0);
    if start >= total {
        return Page::default();
    }
    let end = core::cmp::min(start.saturating_add(PAGE_SIZE as u64), total);
    let mut items = Vec::with_capacity((end - start) as usize);
    for i in start..end {
        if let Some(item) = fetch(i) {
            items.push(item);
        }
    }
    let next = if end < total { Some(end) } else { None };
    Page { items, cursor: next }
}

// ============================================================
// Trait interfaces — pallets depend on these, not on each other
// ============================================================

/// Authorization surface the identity registry exposes to the
/// reputation and validation registries. This is the ONLY coupling
/// between the three pallets.
pub trait AgentRegistryInterface<AccountId> {
    fn agent_exists(agent_id: AgentId) -> bool;
    fn owner_of(agent_id: AgentId) -> Option<AccountId>;
    /// `Some(true)` if `who` is the agent's owner or an approved
    /// operator, `Some(false)` if not, `None` if the agent does not
    /// exist. The negative answer matters: the reputation registry
    /// uses it for self-dealing checks.
    fn is_authorized_or_owner(who: &AccountId, agent_id: AgentId) -> Option<bool>;
}

/// Opaque signature-verification collaborator for the signed wallet
/// and signed feedback paths. The registries never inspect signature
/// internals; they hand over `(message, signature, expected_signer)`
/// and act on the boolean.
pub trait SignatureVerifier<AccountId> {
    fn verify(message: &[u8], signature: &[u8], expected_signer: &AccountId) -> bool;
}

/// Sr25519 verifier for runtimes whose `AccountId` is the sr25519
/// public key ([`AccountId32`]). The expected signer's account bytes
/// are the verification key.
pub struct Sr25519Verifier;

impl SignatureVerifier<AccountId32> for Sr25519Verifier {
    fn verify(message: &[u8], signature: &[u8], expected_signer: &AccountId32) -> bool {
        if signature.len() != 64 {
            return false;
        }
        let mut sig_raw = [0u8; 64];
        sig_raw.copy_from_slice(signature);
        let signature = sr25519::Signature::from_raw(sig_raw);

        let raw: [u8; 32] = expected_signer.clone().into();
        let pubkey = sr25519::Public::from_raw(raw);

        sp_io::crypto::sr25519_verify(&signature, message, &pubkey)
    }
}

// ============================================================
// Tests
// ============================================================
