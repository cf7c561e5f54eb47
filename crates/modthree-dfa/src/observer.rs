// Observer hooks: diagnostics for resets, transitions and rejected symbols.
//
// Engines are generic over their observer and never log on their own. The
// caller picks `Silent`, `Traced`, or its own implementation, and owns the
// tracing subscriber that `Traced` events end up in.

use std::fmt::Debug;

use crate::StepError;

/// Receives one callback per reset, per successful transition, and per
/// rejected symbol. Callbacks cannot influence the run.
pub trait TransitionObserver<S, A> {
    fn on_reset(&self, _initial: &S) {}

    fn on_transition(&self, _from: &S, _symbol: &A, _to: &S) {}

    fn on_error(&self, _error: &StepError<S, A>) {}
}

impl<S, A, O> TransitionObserver<S, A> for &O
where
    O: TransitionObserver<S, A> + ?Sized,
{
    fn on_reset(&self, initial: &S) {
        (**self).on_reset(initial);
    }

    fn on_transition(&self, from: &S, symbol: &A, to: &S) {
        (**self).on_transition(from, symbol, to);
    }

    fn on_error(&self, error: &StepError<S, A>) {
        (**self).on_error(error);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Silent;

impl<S, A> TransitionObserver<S, A> for Silent {}

/// Observer that emits `tracing` events at `debug`. Rejected symbols are
/// also the caller's error value, so they are not raised above `debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Traced;

impl<S: Debug, A: Debug> TransitionObserver<S, A> for Traced {
    fn on_reset(&self, initial: &S) {
        tracing::debug!(state = ?initial, "automaton reset to initial state");
    }

    fn on_transition(&self, from: &S, symbol: &A, to: &S) {
        tracing::debug!(from = ?from, to = ?to, symbol = ?symbol, "transition");
    }

    fn on_error(&self, error: &StepError<S, A>) {
        tracing::debug!(%error, "symbol rejected");
    }
}
