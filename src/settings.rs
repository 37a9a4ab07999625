//! Store configuration: item label, accessibility policy, and flags.
//!
//! `StoreSettings` is an immutable value.  Every configuration call
//! consumes the value and returns an updated copy, so a base settings
//! value can be cloned and shared across call sites without any shared
//! mutable state.

/// Backend rule describing when a stored secret may be read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    /// Readable while unlocked, only on devices with a passcode set.
    /// Never migrates to another device.
    WhenPasscodeSetThisDeviceOnly,
    /// Readable while unlocked. Never migrates to another device.
    WhenUnlockedThisDeviceOnly,
    /// Readable while unlocked.
    WhenUnlocked,
    /// Readable any time after the first unlock since boot.
    /// Never migrates to another device.
    AfterFirstUnlockThisDeviceOnly,
    /// Readable any time after the first unlock since boot.
    AfterFirstUnlock,
}

/// Immutable per-store configuration.
///
/// Carries the human-readable item label plus the optional accessibility
/// policy and item flags layered into every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    label: String,
    accessibility: Option<Accessibility>,
    synchronize: bool,
    invisible: bool,
}

impl StoreSettings {
    /// Create settings with the given item label.
    ///
    /// No accessibility policy is set and both flags default to off, so
    /// a fresh value contributes nothing but the label to a request.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accessibility: None,
            synchronize: false,
            invisible: false,
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Set the accessibility policy for stored items.
    pub fn accessibility(mut self, policy: Accessibility) -> Self {
        self.accessibility = Some(policy);
        self
    }

    /// Mark items as eligible for cross-device synchronization.
    pub fn synchronizable(mut self) -> Self {
        self.synchronize = true;
        self
    }

    /// Hide items from user-facing credential listings.
    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The human-readable item label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The accessibility policy, when one was configured.
    pub fn policy(&self) -> Option<Accessibility> {
        self.accessibility
    }

    /// Whether items may synchronize across devices.
    pub fn is_synchronizable(&self) -> bool {
        self.synchronize
    }

    /// Whether items are hidden from credential listings.
    pub fn is_invisible(&self) -> bool {
        self.invisible
    }
}

// ── Tests ────────────────────────────────────────────────────────────
