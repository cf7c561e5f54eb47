// Hash-map backed DFA engine for arbitrary state and symbol types.

use std::hash::Hash;

use hashbrown::HashSet;

use crate::definition::Definition;
use crate::observer::{Silent, TransitionObserver};
use crate::{Automaton, DefinitionError, StepError};

/// General-purpose DFA.
///
/// The definition is immutable after construction; the only field that
/// changes while running is the current state. The observer `O` receives
/// diagnostics and defaults to [`Silent`].
#[derive(Debug, Clone)]
pub struct Dfa<S, A, O = Silent> {
    definition: Definition<S, A>,
    current: S,
    observer: O,
}

impl<S, A> Dfa<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Build and validate an automaton from its five parts.
    ///
    /// The automaton starts in `initial_state`.
    pub fn new(
        states: impl IntoIterator<Item = S>,
        alphabet: impl IntoIterator<Item = A>,
        initial_state: S,
        final_states: impl IntoIterator<Item = S>,
        transitions: impl IntoIterator<Item = ((S, A), S)>,
    ) -> Result<Self, DefinitionError<S, A>> {
        Self::from_definition(Definition::new(
            states,
            alphabet,
            initial_state,
            final_states,
            transitions,
        ))
    }

    /// Build an automaton from a definition, validating it first.
    pub fn from_definition(definition: Definition<S, A>) -> Result<Self, DefinitionError<S, A>> {
        definition.validate()?;
        Ok(Self::from_definition_unchecked(definition))
    }

    /// Build an automaton from a definition the caller knows to be valid.
    ///
    /// Validation still runs in debug builds.
    pub fn from_definition_unchecked(definition: Definition<S, A>) -> Self {
        debug_assert!(
            definition.validate().is_ok(),
            "automaton definition is malformed"
        );
        Self {
            current: definition.initial_state().clone(),
            definition,
            observer: Silent,
        }
    }
}

impl<S, A, O> Dfa<S, A, O>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Replace the observer, keeping the definition and current state.
    pub fn with_observer<P>(self, observer: P) -> Dfa<S, A, P> {
        Dfa {
            definition: self.definition,
            current: self.current,
            observer,
        }
    }

    pub fn definition(&self) -> &Definition<S, A> {
        &self.definition
    }

    pub fn states(&self) -> &HashSet<S> {
        self.definition.states()
    }

    pub fn alphabet(&self) -> &HashSet<A> {
        self.definition.alphabet()
    }

    pub fn final_states(&self) -> &HashSet<S> {
        self.definition.final_states()
    }

    /// Look up δ(state, symbol) without moving the automaton.
    pub fn transition(&self, state: &S, symbol: &A) -> Option<&S> {
        self.definition.transition(state, symbol)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

impl<S, A, O> Automaton for Dfa<S, A, O>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    O: TransitionObserver<S, A>,
{
    type State = S;
    type Symbol = A;

    fn initial_state(&self) -> S {
        self.definition.initial_state().clone()
    }

    fn current_state(&self) -> S {
        self.current.clone()
    }

    fn is_accepting(&self, state: &S) -> bool {
        self.definition.final_states().contains(state)
    }

    fn reset(&mut self) {
        self.current = self.definition.initial_state().clone();
        self.observer.on_reset(&self.current);
    }

    fn process(&mut self, symbol: A) -> Result<S, StepError<S, A>> {
        if !self.definition.alphabet().contains(&symbol) {
            let error = StepError::InvalidSymbol { symbol };
            self.observer.on_error(&error);
            return Err(error);
        }

        let Some(next) = self.definition.transition(&self.current, &symbol).cloned() else {
            let error = StepError::UndefinedTransition {
                state: self.current.clone(),
                symbol,
            };
            self.observer.on_error(&error);
            return Err(error);
        };

        self.observer.on_transition(&self.current, &symbol, &next);
        self.current = next;
        Ok(self.current.clone())
    }
}
