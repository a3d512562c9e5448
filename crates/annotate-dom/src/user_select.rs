//! Page-wide text selection toggle
//!
//! While an annotation is being dragged or drawn the page must not start a text
//! selection. The renderer reads [`is_user_select_disabled`] (or a local
//! [`UserSelect`]) and applies `user-select: none` accordingly.

use std::sync::atomic::{AtomicBool, Ordering};

/// Boolean-guarded selection state. Toggling is idempotent.
#[derive(Debug, Default)]
pub struct UserSelect {
    disabled: AtomicBool,
}

impl UserSelect {
    pub const fn new() -> Self {
        Self {
            disabled: AtomicBool::new(false),
        }
    }

    /// Returns `true` if this call changed the state
    pub fn disable(&self) -> bool {
        let changed = !self.disabled.swap(true, Ordering::AcqRel);
        if changed {
            tracing::debug!("User selection disabled");
        }
        changed
    }

    /// Returns `true` if this call changed the state
    pub fn enable(&self) -> bool {
        let changed = self.disabled.swap(false, Ordering::AcqRel);
        if changed {
            tracing::debug!("User selection enabled");
        }
        changed
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    /// Disable selection until the guard drops, then restore whatever state was
    /// in effect before.
    pub fn guard(&self) -> UserSelectGuard<'_> {
        let was_disabled = !self.disable();
        UserSelectGuard {
            state: self,
            was_disabled,
        }
    }
}

/// Restores the prior selection state on drop
#[must_use = "selection is re-enabled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct UserSelectGuard<'a> {
    state: &'a UserSelect,
    was_disabled: bool,
}

impl Drop for UserSelectGuard<'_> {
    fn drop(&mut self) {
        if !self.was_disabled {
            self.state.enable();
        }
    }
}

static GLOBAL: UserSelect = UserSelect::new();

/// The process-wide toggle
pub fn global() -> &'static UserSelect {
    &GLOBAL
}

pub fn disable_user_select() -> bool {
    GLOBAL.disable()
}

pub fn enable_user_select() -> bool {
    GLOBAL.enable()
}

pub fn is_user_select_disabled() -> bool {
    GLOBAL.is_disabled()
}
