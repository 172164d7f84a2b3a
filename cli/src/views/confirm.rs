//! Pending-confirmation state for destructive actions.

/// Holds at most one action awaiting the user's yes/no.
///
/// A view calls `request` when the user asks to delete something; the host
/// shows `prompt()` and then calls `accept` (returning the target to act on)
/// or `cancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation<T> {
    pending: Option<(T, &'static str)>,
}

impl<T> Default for Confirmation<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Copy> Confirmation<T> {
    /// Replaces any action already pending.
    pub fn request(&mut self, target: T, prompt: &'static str) {
        self.pending = Some((target, prompt));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn prompt(&self) -> Option<&'static str> {
        self.pending.map(|(_, prompt)| prompt)
    }

    pub fn target(&self) -> Option<T> {
        self.pending.map(|(target, _)| target)
    }

    pub fn accept(&mut self) -> Option<T> {
        self.pending.take().map(|(target, _)| target)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
