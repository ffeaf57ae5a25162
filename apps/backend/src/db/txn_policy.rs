//! Process-wide outcome for successful `with_txn` closures.
//!
//! Production never sets a policy and commits. Test binaries pick
//! `RollbackOnOk` once at startup so every request leaves the database
//! untouched.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    CommitOnOk,
    RollbackOnOk,
}

impl TxnPolicy {
    /// `"commit"` (any case) commits; anything else, including unset, rolls back.
    pub fn from_setting(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("commit") => Self::CommitOnOk,
            _ => Self::RollbackOnOk,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// First call wins; later calls are ignored.
pub fn set_txn_policy(policy: TxnPolicy) {
    if POLICY.set(policy).is_err() && current() != policy {
        tracing::debug!(requested = ?policy, active = ?current(), "txn policy already fixed");
    }
}
