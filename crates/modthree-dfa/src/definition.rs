// Formal automaton definition: states, alphabet, initial state, accepting
// states and the transition function, with validation.

use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::DefinitionError;

/// The five-tuple `{Q, Σ, q0, F, δ}` of a deterministic finite automaton.
///
/// The transition function is stored as one row per source state, so a lookup
/// for the current state does not need to build an owned `(state, symbol)`
/// key. A definition may be partial: pairs missing from δ are reported as
/// undefined transitions at run time, never filled in.
#[derive(Debug, Clone)]
pub struct Definition<S, A> {
    states: HashSet<S>,
    alphabet: HashSet<A>,
    initial: S,
    finals: HashSet<S>,
    transitions: HashMap<S, HashMap<A, S>>,
}

impl<S, A> Definition<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Collect a definition from its parts without checking it.
    ///
    /// When the same `(state, symbol)` key appears more than once the last
    /// entry wins. Use [`validate`](Self::validate) before running it.
    pub fn new(
        states: impl IntoIterator<Item = S>,
        alphabet: impl IntoIterator<Item = A>,
        initial_state: S,
        final_states: impl IntoIterator<Item = S>,
        transitions: impl IntoIterator<Item = ((S, A), S)>,
    ) -> Self {
        let mut rows: HashMap<S, HashMap<A, S>> = HashMap::new();
        for ((state, symbol), target) in transitions {
            rows.entry(state).or_default().insert(symbol, target);
        }
        Self {
            states: states.into_iter().collect(),
            alphabet: alphabet.into_iter().collect(),
            initial: initial_state,
            finals: final_states.into_iter().collect(),
            transitions: rows,
        }
    }

    /// Check the construction invariants: the initial and final states belong
    /// to the state set, and every transition reads an alphabet symbol from a
    /// known state into a known state.
    pub fn validate(&self) -> Result<(), DefinitionError<S, A>> {
        if !self.states.contains(&self.initial) {
            return Err(DefinitionError::UnknownInitialState {
                state: self.initial.clone(),
            });
        }

        if let Some(state) = self.finals.iter().find(|s| !self.states.contains(*s)) {
            return Err(DefinitionError::UnknownFinalState {
                state: state.clone(),
            });
        }

        for (state, row) in &self.transitions {
            for (symbol, target) in row {
                if !self.states.contains(state) {
                    return Err(DefinitionError::TransitionFromUnknownState {
                        state: state.clone(),
                        symbol: symbol.clone(),
                    });
                }
                if !self.alphabet.contains(symbol) {
                    return Err(DefinitionError::TransitionOnUnknownSymbol {
                        state: state.clone(),
                        symbol: symbol.clone(),
                    });
                }
                if !self.states.contains(target) {
                    return Err(DefinitionError::TransitionToUnknownState {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Whether δ is defined for every pair in `Q × Σ`.
    pub fn is_total(&self) -> bool {
        self.states.iter().all(|state| {
            self.transitions
                .get(state)
                .is_some_and(|row| self.alphabet.iter().all(|symbol| row.contains_key(symbol)))
        })
    }

    /// Look up δ(state, symbol).
    #[inline]
    pub fn transition(&self, state: &S, symbol: &A) -> Option<&S> {
        self.transitions.get(state).and_then(|row| row.get(symbol))
    }

    pub fn states(&self) -> &HashSet<S> {
        &self.states
    }

    pub fn alphabet(&self) -> &HashSet<A> {
        &self.alphabet
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn final_states(&self) -> &HashSet<S> {
        &self.finals
    }

    /// Number of `(state, symbol)` pairs with a defined transition.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(HashMap::len).sum()
    }

    /// Iterate over all defined transitions as `((state, symbol), target)`.
    pub fn transitions(&self) -> impl Iterator<Item = ((&S, &A), &S)> {
        self.transitions
            .iter()
            .flat_map(|(state, row)| row.iter().map(move |(symbol, target)| ((state, symbol), target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-state parity automaton over {'a', 'b'}: counts 'a' mod 2.
    fn parity() -> Definition<&'static str, char> {
        Definition::new(
            ["even", "odd"],
            ['a', 'b'],
            "even",
            ["even"],
            [
                (("even", 'a'), "odd"),
                (("even", 'b'), "even"),
                (("odd", 'a'), "even"),
                (("odd", 'b'), "odd"),
            ],
        )
    }

    #[test]
    fn valid_definition_passes() {
        let def = parity();
        assert!(def.validate().is_ok());
        assert!(def.is_total());
        assert_eq!(def.transition_count(), 4);
        assert_eq!(def.transition(&"even", &'a'), Some(&"odd"));
        assert_eq!(def.transition(&"odd", &'c'), None);
    }

    #[test]
    fn partial_definition_is_valid_but_not_total() {
        let def = Definition::new(
            ["s0", "s1"],
            ['x', 'y'],
            "s0",
            ["s1"],
            [(("s0", 'x'), "s1")],
        );
        assert!(def.validate().is_ok());
        assert!(!def.is_total());
    }

    #[test]
    fn reject_unknown_initial_state() {
        let def = Definition::new(["s0"], ['x'], "s9", ["s0"], [(("s0", 'x'), "s0")]);
        assert_eq!(
            def.validate(),
            Err(DefinitionError::UnknownInitialState { state: "s9" })
        );
    }

    #[test]
    fn reject_unknown_final_state() {
        let def = Definition::new(["s0"], ['x'], "s0", ["s0", "s7"], [(("s0", 'x'), "s0")]);
        assert_eq!(
            def.validate(),
            Err(DefinitionError::UnknownFinalState { state: "s7" })
        );
    }

    #[test]
    fn reject_transition_from_unknown_state() {
        let def = Definition::new(["s0"], ['x'], "s0", ["s0"], [(("s5", 'x'), "s0")]);
        assert_eq!(
            def.validate(),
            Err(DefinitionError::TransitionFromUnknownState {
                state: "s5",
                symbol: 'x'
            })
        );
    }

    #[test]
    fn reject_transition_on_unknown_symbol() {
        let def = Definition::new(["s0"], ['x'], "s0", ["s0"], [(("s0", 'z'), "s0")]);
        assert_eq!(
            def.validate(),
            Err(DefinitionError::TransitionOnUnknownSymbol {
                state: "s0",
                symbol: 'z'
            })
        );
    }

    #[test]
    fn reject_transition_to_unknown_state() {
        let def = Definition::new(["s0"], ['x'], "s0", ["s0"], [(("s0", 'x'), "s3")]);
        assert_eq!(
            def.validate(),
            Err(DefinitionError::TransitionToUnknownState {
                state: "s0",
                symbol: 'x',
                target: "s3"
            })
        );
    }

    #[test]
    fn duplicate_keys_keep_last_entry() {
        let def = Definition::new(
            [0u8, 1],
            ['x'],
            0,
            [0],
            [((0, 'x'), 0), ((0, 'x'), 1)],
        );
        assert_eq!(def.transition(&0, &'x'), Some(&1));
        assert_eq!(def.transition_count(), 1);
    }

    #[test]
    fn transitions_iterator_covers_table() {
        let def = parity();
        let mut entries: Vec<_> = def
            .transitions()
            .map(|((s, a), t)| (*s, *a, *t))
            .collect();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                ("even", 'a', "odd"),
                ("even", 'b', "even"),
                ("odd", 'a', "even"),
                ("odd", 'b', "odd"),
            ]
        );
    }
}
