//! Deterministic finite automaton (DFA) execution engine.
//!
//! An automaton is a value owning its formal definition
//! `{states, alphabet, initial state, accepting states, transitions}` plus a
//! single mutable cursor, the current state. Symbols are fed one at a time or
//! as a sequence; the first symbol that cannot be processed stops the run and
//! is reported as a typed error.
//!
//! # Architecture
//!
//! - [`definition`] -- The formal five-tuple and its validation rules
//! - [`hashed`] -- General engine backed by hash maps, for arbitrary state and symbol types
//! - [`dense`] -- Engine backed by a fixed-size array, for small sets known at compile time
//! - [`observer`] -- Hooks that receive resets, transitions and rejections (logging)

pub mod definition;
pub mod dense;
pub mod hashed;
pub mod observer;

pub use definition::Definition;
pub use dense::{DenseDfa, Ordinal};
pub use hashed::Dfa;
pub use observer::{Silent, Traced, TransitionObserver};

/// Error raised while processing a single input symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError<S, A> {
    /// The symbol is not a member of the alphabet.
    #[error("invalid input symbol: {symbol:?}")]
    InvalidSymbol { symbol: A },
    /// The symbol is valid but the current state has no transition for it.
    #[error("no transition defined for state {state:?} with input {symbol:?}")]
    UndefinedTransition { state: S, symbol: A },
}

impl<S, A> StepError<S, A> {
    /// The symbol that could not be processed.
    pub fn symbol(&self) -> &A {
        match self {
            StepError::InvalidSymbol { symbol } => symbol,
            StepError::UndefinedTransition { symbol, .. } => symbol,
        }
    }
}

/// Error raised by [`Automaton::process_sequence`]: the first failing step and
/// its zero-based position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error} at position {position}")]
pub struct SequenceError<S, A> {
    pub position: usize,
    pub error: StepError<S, A>,
}

/// Error raised when an automaton definition is malformed.
///
/// These are construction-time faults of whoever wrote the table, as opposed
/// to [`StepError`], which is caused by the input being processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError<S, A> {
    #[error("initial state {state:?} is not in the state set")]
    UnknownInitialState { state: S },
    #[error("final state {state:?} is not in the state set")]
    UnknownFinalState { state: S },
    #[error("transition from unknown state {state:?} on input {symbol:?}")]
    TransitionFromUnknownState { state: S, symbol: A },
    #[error("transition from state {state:?} on symbol {symbol:?}, which is not in the alphabet")]
    TransitionOnUnknownSymbol { state: S, symbol: A },
    #[error("transition from state {state:?} on input {symbol:?} targets unknown state {target:?}")]
    TransitionToUnknownState { state: S, symbol: A, target: S },
}

/// Common interface of the engine variants.
///
/// An automaton runs until the caller stops feeding symbols; there is no
/// halting state. Call [`reset`](Automaton::reset) before reusing an instance
/// for an unrelated sequence.
pub trait Automaton {
    type State: Clone;
    type Symbol: Clone;

    /// The state the automaton starts in and returns to on reset.
    fn initial_state(&self) -> Self::State;

    /// The state reached after the last processed symbol.
    fn current_state(&self) -> Self::State;

    /// Whether `state` is a member of the accepting set.
    fn is_accepting(&self, state: &Self::State) -> bool;

    /// Return the current state to the initial state.
    fn reset(&mut self);

    /// Consume one symbol and return the new current state.
    ///
    /// On error the current state is left untouched.
    fn process(
        &mut self,
        symbol: Self::Symbol,
    ) -> Result<Self::State, StepError<Self::State, Self::Symbol>>;

    /// Consume symbols in order, stopping at the first failure.
    ///
    /// Symbols processed before the failure are not rolled back. An empty
    /// sequence returns the current state unchanged.
    fn process_sequence<I>(
        &mut self,
        symbols: I,
    ) -> Result<Self::State, SequenceError<Self::State, Self::Symbol>>
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        for (position, symbol) in symbols.into_iter().enumerate() {
            self.process(symbol)
                .map_err(|error| SequenceError { position, error })?;
        }
        Ok(self.current_state())
    }

    /// Whether the current state is accepting.
    fn accepts_current(&self) -> bool {
        self.is_accepting(&self.current_state())
    }
}
