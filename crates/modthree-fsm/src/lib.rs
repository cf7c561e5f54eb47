//! Remainder of a binary numeral modulo three, computed by a three-state DFA.
//!
//! Each state of the automaton is a residue class. Reading digit `d` in the
//! class of `r` moves to the class of `2 * r + d`, so after the last digit the
//! state is the remainder of the whole numeral.
//!
//! - [`builder`] -- The fixed automaton, in hashed and dense form
//! - [`compute`] -- One-shot computation and the input error type
//! - [`handle`] -- A reusable instance with tracing and a diagnostics channel

pub mod builder;
pub mod compute;
pub mod handle;

pub use builder::{build_mod_three_automaton, ModThreeAutomaton};
pub use compute::{compute_mod_three, InvalidInput, Rejection};
pub use handle::ModThreeHandle;
