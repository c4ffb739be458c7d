//! Cart Observer

use crate::cart::CartLine;

/// Hook for reacting to items being added to a cart.
///
/// The presentation layer uses this for best-effort feedback such as a short
/// vibration. Observers cannot fail and cannot veto the addition.
pub trait CartObserver {
    /// Called after `added` units were added to `line`, whether the line was
    /// just created or an existing line was merged into.
    fn on_add(&mut self, line: &CartLine<'_>, added: u64);
}

/// Observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_add(&mut self, _line: &CartLine<'_>, _added: u64) {}
}

impl<F> CartObserver for F
where
    F: FnMut(&CartLine<'_>, u64),
{
    fn on_add(&mut self, line: &CartLine<'_>, added: u64) {
        self(line, added);
    }
}
