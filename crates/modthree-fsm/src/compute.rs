// Remainder computation over a binary string, and the error it reports.

use modthree_core::{Bit, NotABit, Residue};
use modthree_dfa::{Automaton, SequenceError, StepError};

use crate::builder::{build_dense_mod_three_automaton, build_mod_three_automaton};

/// Why a character was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The character is not `'0'` or `'1'`.
    #[error("invalid input symbol")]
    NotInAlphabet,
    /// The automaton had no transition for the character. The mod-three table
    /// is total, so this only happens with a caller-supplied partial table.
    #[error("no transition defined for input")]
    NoTransition,
}

/// The input is not a binary numeral.
///
/// `position` is the zero-based index of `character` counted in characters,
/// not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{reason} {character:?} at position {position}")]
pub struct InvalidInput {
    pub character: char,
    pub position: usize,
    pub reason: Rejection,
}

impl<S> From<SequenceError<S, char>> for InvalidInput {
    fn from(err: SequenceError<S, char>) -> Self {
        let reason = match err.error {
            StepError::InvalidSymbol { .. } => Rejection::NotInAlphabet,
            StepError::UndefinedTransition { .. } => Rejection::NoTransition,
        };
        Self {
            character: *err.error.symbol(),
            position: err.position,
            reason,
        }
    }
}

impl<S> From<SequenceError<S, Bit>> for InvalidInput {
    fn from(err: SequenceError<S, Bit>) -> Self {
        let reason = match err.error {
            StepError::InvalidSymbol { .. } => Rejection::NotInAlphabet,
            StepError::UndefinedTransition { .. } => Rejection::NoTransition,
        };
        Self {
            character: err.error.symbol().as_char(),
            position: err.position,
            reason,
        }
    }
}

/// Remainder of the binary numeral `input` divided by three.
///
/// Digits are read most significant first. The empty string is the numeral 0.
/// Any character other than `'0'` or `'1'` fails the whole input.
pub fn compute_mod_three(input: &str) -> Result<u8, InvalidInput> {
    let mut automaton = build_mod_three_automaton();
    compute_with(&mut automaton, input).map(Residue::value)
}

/// Run `input` through an existing automaton and return the terminal residue.
///
/// The automaton is reset first, so an instance can be reused across inputs.
/// After a failure it is left in the state reached before the bad character.
pub fn compute_with<M>(automaton: &mut M, input: &str) -> Result<Residue, InvalidInput>
where
    M: Automaton<State = Residue, Symbol = char>,
{
    automaton.reset();
    Ok(automaton.process_sequence(input.chars())?)
}

/// Same as [`compute_mod_three`], through the array-backed automaton.
pub fn compute_mod_three_dense(input: &str) -> Result<u8, InvalidInput> {
    let mut automaton = build_dense_mod_three_automaton();
    compute_dense_with(&mut automaton, input).map(Residue::value)
}

/// Same as [`compute_with`] for automata over [`Bit`].
///
/// Characters are converted one at a time, so digits before a bad character
/// have already been applied when the error is returned.
pub fn compute_dense_with<M>(automaton: &mut M, input: &str) -> Result<Residue, InvalidInput>
where
    M: Automaton<State = Residue, Symbol = Bit>,
{
    automaton.reset();
    for (position, c) in input.chars().enumerate() {
        let bit = Bit::try_from(c).map_err(|NotABit(character)| InvalidInput {
            character,
            position,
            reason: Rejection::NotInAlphabet,
        })?;
        automaton
            .process(bit)
            .map_err(|error| SequenceError { position, error })?;
    }
    Ok(automaton.current_state())
}

#[cfg(test)]
mod tests {
    use modthree_dfa::Dfa;

    use super::*;

    const SCENARIOS: &[(&str, u8)] = &[
        ("1101", 1),
        ("1110", 2),
        ("1111", 0),
        ("110", 0),
        ("1010", 1),
        ("", 0),
        ("0", 0),
        ("1", 1),
        ("1001", 0),
    ];

    #[test]
    fn known_scenarios() {
        for &(input, expected) in SCENARIOS {
            assert_eq!(compute_mod_three(input), Ok(expected), "input {input:?}");
            assert_eq!(compute_mod_three_dense(input), Ok(expected), "input {input:?}");
        }
    }

    #[test]
    fn known_failures() {
        let cases = [
            ("1102", '2', 3),
            ("abc", 'a', 0),
            ("10a1", 'a', 2),
            ("2", '2', 0),
            ("01b01", 'b', 2),
        ];
        for (input, character, position) in cases {
            let expected = InvalidInput {
                character,
                position,
                reason: Rejection::NotInAlphabet,
            };
            assert_eq!(compute_mod_three(input), Err(expected), "input {input:?}");
            assert_eq!(compute_mod_three_dense(input), Err(expected), "input {input:?}");
        }
    }

    #[test]
    fn matches_integer_remainder() {
        for n in 0u64..=4096 {
            let binary = format!("{n:b}");
            let expected = (n % 3) as u8;
            assert_eq!(compute_mod_three(&binary), Ok(expected), "n = {n}");
            assert_eq!(compute_mod_three_dense(&binary), Ok(expected), "n = {n}");
        }
    }

    #[test]
    fn large_numerals() {
        let n = u64::MAX - 7;
        assert_eq!(compute_mod_three(&format!("{n:b}")), Ok((n % 3) as u8));
        // 2^200 ≡ (2^2)^100 ≡ 1 (mod 3)
        let two_pow_200 = format!("1{}", "0".repeat(200));
        assert_eq!(compute_mod_three(&two_pow_200), Ok(1));
    }

    #[test]
    fn leading_zeros_do_not_matter() {
        assert_eq!(compute_mod_three("00110"), compute_mod_three("110"));
        assert_eq!(compute_mod_three("0000"), Ok(0));
        for n in 0u64..64 {
            let padded = format!("{n:012b}");
            assert_eq!(compute_mod_three(&padded), Ok((n % 3) as u8));
        }
    }

    #[test]
    fn bad_character_fails_at_every_position() {
        for len in 1..6 {
            for position in 0..len {
                let mut chars = vec!['1'; len];
                chars[position] = 'x';
                let input: String = chars.into_iter().collect();
                let err = compute_mod_three(&input).unwrap_err();
                assert_eq!(err.character, 'x');
                assert_eq!(err.position, position);
            }
        }
    }

    #[test]
    fn position_counts_characters_not_bytes() {
        let err = compute_mod_three("1\u{00e4}0").unwrap_err();
        assert_eq!(err.character, '\u{00e4}');
        assert_eq!(err.position, 1);

        let err = compute_mod_three("\u{00e4}1\u{00f6}").unwrap_err();
        assert_eq!(err.position, 0);
    }

    #[test]
    fn reuse_after_reset_is_idempotent() {
        let mut automaton = build_mod_three_automaton();
        let first = compute_with(&mut automaton, "101101");
        let second = compute_with(&mut automaton, "101101");
        assert_eq!(first, second);
        assert_eq!(first, Ok(Residue::of(0b101101)));

        // a failed run leaves no trace on the next one
        assert!(compute_with(&mut automaton, "1x").is_err());
        assert_eq!(compute_with(&mut automaton, "10"), Ok(Residue::R2));
    }

    #[test]
    fn failed_run_keeps_partial_progress() {
        let mut automaton = build_mod_three_automaton();
        assert!(compute_with(&mut automaton, "10z1").is_err());
        // "10" was applied before 'z'
        assert_eq!(automaton.current_state(), Residue::R2);

        let mut dense = build_dense_mod_three_automaton();
        assert!(compute_dense_with(&mut dense, "10z1").is_err());
        assert_eq!(dense.current_state(), Residue::R2);
    }

    #[test]
    fn partial_table_reports_missing_transition() {
        // the R1 --'0'--> R2 entry is missing
        let mut automaton = Dfa::new(
            Residue::ALL,
            ['0', '1'],
            Residue::R0,
            Residue::ALL,
            [
                ((Residue::R0, '0'), Residue::R0),
                ((Residue::R0, '1'), Residue::R1),
                ((Residue::R1, '1'), Residue::R0),
                ((Residue::R2, '0'), Residue::R1),
                ((Residue::R2, '1'), Residue::R2),
            ],
        )
        .unwrap();
        let err = compute_with(&mut automaton, "10").unwrap_err();
        assert_eq!(
            err,
            InvalidInput {
                character: '0',
                position: 1,
                reason: Rejection::NoTransition,
            }
        );
        assert_eq!(
            err.to_string(),
            "no transition defined for input '0' at position 1"
        );
    }

    #[test]
    fn error_message_names_character_and_position() {
        let err = compute_mod_three("10a1").unwrap_err();
        assert_eq!(err.to_string(), "invalid input symbol 'a' at position 2");
    }
}
