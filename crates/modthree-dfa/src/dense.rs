// Array-backed DFA engine for small state and symbol sets.
//
// States and symbols are mapped to table indices through `Ordinal`, so a step
// is two bounds-checked array reads instead of two hash lookups.

use crate::observer::{Silent, TransitionObserver};
use crate::{Automaton, DefinitionError, StepError};

/// A type with a fixed, small number of values, each mapped to a distinct
/// index in `0..COUNT`.
pub trait Ordinal: Copy {
    const COUNT: usize;

    fn ordinal(self) -> usize;

    fn from_ordinal(ordinal: usize) -> Option<Self>;
}

/// DFA whose transition function is a `Q × N` array of optional targets.
///
/// `Q` must cover every state ordinal and `N` every symbol ordinal that the
/// table mentions; a symbol whose ordinal is `N` or above is rejected as
/// outside the alphabet. `None` cells are undefined transitions.
#[derive(Debug, Clone)]
pub struct DenseDfa<S, A, const Q: usize, const N: usize, O = Silent> {
    table: [[Option<S>; N]; Q],
    accepting: [bool; Q],
    initial: S,
    current: S,
    observer: O,
    _symbol: std::marker::PhantomData<fn(A)>,
}

impl<S, A, const Q: usize, const N: usize> DenseDfa<S, A, Q, N>
where
    S: Ordinal,
    A: Ordinal,
{
    /// Build and validate a dense automaton.
    ///
    /// Row `i` of `table` holds the transitions of the state with ordinal `i`,
    /// column `j` those on the symbol with ordinal `j`.
    pub fn new(
        initial_state: S,
        final_states: &[S],
        table: [[Option<S>; N]; Q],
    ) -> Result<Self, DefinitionError<S, A>> {
        if initial_state.ordinal() >= Q {
            return Err(DefinitionError::UnknownInitialState {
                state: initial_state,
            });
        }

        let mut accepting = [false; Q];
        for &state in final_states {
            match accepting.get_mut(state.ordinal()) {
                Some(slot) => *slot = true,
                None => return Err(DefinitionError::UnknownFinalState { state }),
            }
        }

        for (row_index, row) in table.iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                // Rows or columns with no state or symbol value are unreachable.
                let (Some(state), Some(symbol), Some(target)) =
                    (S::from_ordinal(row_index), A::from_ordinal(column), *cell)
                else {
                    continue;
                };
                if target.ordinal() >= Q {
                    return Err(DefinitionError::TransitionToUnknownState {
                        state,
                        symbol,
                        target,
                    });
                }
            }
        }

        Ok(Self::from_parts(initial_state, accepting, table))
    }

    /// Build a dense automaton from a table the caller knows to be valid.
    ///
    /// Final states outside the table are ignored. Validation still runs in
    /// debug builds.
    pub fn from_table_unchecked(
        initial_state: S,
        final_states: &[S],
        table: [[Option<S>; N]; Q],
    ) -> Self {
        debug_assert!(
            Self::new(initial_state, final_states, table).is_ok(),
            "dense automaton table is malformed"
        );
        let mut accepting = [false; Q];
        for state in final_states {
            if let Some(slot) = accepting.get_mut(state.ordinal()) {
                *slot = true;
            }
        }
        Self::from_parts(initial_state, accepting, table)
    }

    fn from_parts(initial: S, accepting: [bool; Q], table: [[Option<S>; N]; Q]) -> Self {
        Self {
            table,
            accepting,
            initial,
            current: initial,
            observer: Silent,
            _symbol: std::marker::PhantomData,
        }
    }
}

impl<S, A, const Q: usize, const N: usize, O> DenseDfa<S, A, Q, N, O>
where
    S: Ordinal,
    A: Ordinal,
{
    /// Replace the observer, keeping the table and current state.
    pub fn with_observer<P>(self, observer: P) -> DenseDfa<S, A, Q, N, P> {
        DenseDfa {
            table: self.table,
            accepting: self.accepting,
            initial: self.initial,
            current: self.current,
            observer,
            _symbol: std::marker::PhantomData,
        }
    }

    /// Look up δ(state, symbol) without moving the automaton.
    #[inline]
    pub fn transition(&self, state: S, symbol: A) -> Option<S> {
        self.table
            .get(state.ordinal())
            .and_then(|row| row.get(symbol.ordinal()))
            .copied()
            .flatten()
    }

    pub fn table(&self) -> &[[Option<S>; N]; Q] {
        &self.table
    }

    /// Whether every cell of the table is defined.
    pub fn is_total(&self) -> bool {
        self.table.iter().flatten().all(Option::is_some)
    }
}

impl<S, A, const Q: usize, const N: usize, O> Automaton for DenseDfa<S, A, Q, N, O>
where
    S: Ordinal,
    A: Ordinal,
    O: TransitionObserver<S, A>,
{
    type State = S;
    type Symbol = A;

    fn initial_state(&self) -> S {
        self.initial
    }

    fn current_state(&self) -> S {
        self.current
    }

    fn is_accepting(&self, state: &S) -> bool {
        self.accepting.get(state.ordinal()).copied().unwrap_or(false)
    }

    fn reset(&mut self) {
        self.current = self.initial;
        self.observer.on_reset(&self.current);
    }

    fn process(&mut self, symbol: A) -> Result<S, StepError<S, A>> {
        if symbol.ordinal() >= N {
            let error = StepError::InvalidSymbol { symbol };
            self.observer.on_error(&error);
            return Err(error);
        }

        let Some(next) = self.transition(self.current, symbol) else {
            let error = StepError::UndefinedTransition {
                state: self.current,
                symbol,
            };
            self.observer.on_error(&error);
            return Err(error);
        };

        self.observer.on_transition(&self.current, &symbol, &next);
        self.current = next;
        Ok(next)
    }
}
