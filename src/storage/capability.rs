//! Storage capability gate
//!
//! Computes, once per start request, whether an explicit storage
//! authorization round trip is still required before capture can begin.
//! The gate itself is pure; live permission state comes from the
//! [`StorageAuthority`] seam.

use crate::recorder::state::Mailbox;

/// Highest platform version that still uses externally-indexed public
/// storage behind an explicit write-permission grant. Newer versions get
/// scoped storage implicitly.
pub const LEGACY_STORAGE_THRESHOLD: u32 = 28;

/// Pure predicate over the platform version, computed per request and
/// treated as ordinary data by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityGate {
    platform_version: u32,
}

impl CapabilityGate {
    pub fn new(platform_version: u32) -> Self {
        Self { platform_version }
    }

    /// Gate for platforms with scoped storage; no authorization step and
    /// no public output directory.
    pub fn modern() -> Self {
        Self::new(LEGACY_STORAGE_THRESHOLD + 1)
    }

    /// Whether the legacy storage authorization step applies at all.
    /// Note this says nothing about whether the permission is currently
    /// granted; that is the authority's answer.
    pub fn authorization_required(&self) -> bool {
        self.platform_version <= LEGACY_STORAGE_THRESHOLD
    }
}

/// Live storage permission state and the asynchronous grant flow.
///
/// `request_write_permission` is fire-and-forget: the grant or denial
/// arrives later as a storage-authorization message in the session
/// mailbox, on whatever thread the platform calls back from.
pub trait StorageAuthority: Send + Sync {
    fn has_write_permission(&self) -> bool;
    fn request_write_permission(&self, mailbox: Mailbox);
}

/// Desktop storage authority: the platform grants scoped write access
/// implicitly, so the permission is always held and a request resolves
/// immediately.
pub struct ScopedStorageAuthority;

impl StorageAuthority for ScopedStorageAuthority {
    fn has_write_permission(&self) -> bool {
        true
    }

    fn request_write_permission(&self, mailbox: Mailbox) {
        // Nothing to prompt for; report the implicit grant.
        mailbox.storage_authorization(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_versions_require_authorization() {
        assert!(CapabilityGate::new(LEGACY_STORAGE_THRESHOLD).authorization_required());
        assert!(CapabilityGate::new(LEGACY_STORAGE_THRESHOLD - 5).authorization_required());
    }

    #[test]
    fn test_modern_versions_skip_authorization() {
        assert!(!CapabilityGate::new(LEGACY_STORAGE_THRESHOLD + 1).authorization_required());
        assert!(!CapabilityGate::modern().authorization_required());
    }

    #[test]
    fn test_scoped_authority_always_granted() {
        assert!(ScopedStorageAuthority.has_write_permission());
    }
}
