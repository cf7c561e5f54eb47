// ModThreeHandle: a reusable mod-three automaton for front ends.
//
// The handle owns one automaton and resets it before every input, so callers
// that process many inputs build the table once. Failures are returned as
// `InvalidInput` values; a human-readable message for the same failure goes,
// independently, to an optional diagnostics sink installed by the caller.

use modthree_core::Residue;
use modthree_dfa::{Automaton, Silent, TransitionObserver};

use crate::builder::{ModThreeAutomaton, build_mod_three_automaton, build_mod_three_automaton_with};
use crate::compute::{InvalidInput, compute_with};

type DiagnosticsSink = Box<dyn FnMut(&str) + Send>;

/// Reusable mod-three calculator.
///
/// `O` observes the automaton's resets and transitions; see
/// [`modthree_dfa::Traced`] for one that forwards them to `tracing`.
pub struct ModThreeHandle<O = Silent> {
    automaton: ModThreeAutomaton<O>,
    diagnostics: Option<DiagnosticsSink>,
}

impl ModThreeHandle {
    pub fn new() -> Self {
        Self {
            automaton: build_mod_three_automaton(),
            diagnostics: None,
        }
    }
}

impl Default for ModThreeHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> ModThreeHandle<O>
where
    O: TransitionObserver<Residue, char>,
{
    /// Create a handle whose automaton reports to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self {
            automaton: build_mod_three_automaton_with(observer),
            diagnostics: None,
        }
    }

    /// Install a sink that receives one message per rejected input.
    ///
    /// The sink does not change what the computing methods return.
    pub fn set_diagnostics(&mut self, sink: impl FnMut(&str) + Send + 'static) {
        self.diagnostics = Some(Box::new(sink));
    }

    /// Remove the diagnostics sink.
    pub fn clear_diagnostics(&mut self) {
        self.diagnostics = None;
    }

    /// Terminal residue of `input`.
    pub fn residue(&mut self, input: &str) -> Result<Residue, InvalidInput> {
        let result = compute_with(&mut self.automaton, input);
        match &result {
            Ok(residue) => tracing::debug!(input, remainder = residue.value(), "computed remainder"),
            Err(err) => self.report(input, err),
        }
        result
    }

    /// Remainder of `input` divided by three.
    pub fn remainder(&mut self, input: &str) -> Result<u8, InvalidInput> {
        self.residue(input).map(Residue::value)
    }

    /// States visited while reading `input`: the initial state followed by the
    /// state after each character. The last element is the terminal state.
    pub fn trace(&mut self, input: &str) -> Result<Vec<Residue>, InvalidInput> {
        self.automaton.reset();
        let mut states = Vec::with_capacity(input.len() + 1);
        states.push(self.automaton.current_state());
        for (position, c) in input.chars().enumerate() {
            match self.automaton.process(c) {
                Ok(state) => states.push(state),
                Err(error) => {
                    let err = InvalidInput::from(modthree_dfa::SequenceError { position, error });
                    self.report(input, &err);
                    return Err(err);
                }
            }
        }
        Ok(states)
    }

    /// Return the automaton to its initial state.
    pub fn reset(&mut self) {
        self.automaton.reset();
    }

    /// The current state of the owned automaton.
    pub fn current_state(&self) -> Residue {
        self.automaton.current_state()
    }

    pub fn automaton(&self) -> &ModThreeAutomaton<O> {
        &self.automaton
    }

    fn report(&mut self, input: &str, err: &InvalidInput) {
        tracing::debug!(input, error = %err, "rejected input");
        if let Some(sink) = self.diagnostics.as_mut() {
            sink(&format!("Error processing input {input:?}: {err}"));
        }
    }
}
