// Construction of the mod-three automaton.
//
// States are residues R0, R1, R2; input symbols are the characters '0' and
// '1', most significant digit first. Every state is accepting because only
// the terminal state is of interest, not language membership.

use modthree_core::{Bit, Residue};
use modthree_dfa::{Definition, DenseDfa, Dfa, Silent};

use Residue::{R0, R1, R2};

/// The mod-three automaton over characters.
pub type ModThreeAutomaton<O = Silent> = Dfa<Residue, char, O>;

/// The mod-three automaton over typed digits, backed by a fixed array.
pub type DenseModThreeAutomaton<O = Silent> = DenseDfa<Residue, Bit, 3, 2, O>;

/// Input alphabet.
pub const ALPHABET: [char; 2] = ['0', '1'];

/// δ as `((state, symbol), next)` entries. Entry for `(r, d)` is the class of
/// `2 * r + d`.
pub const TRANSITIONS: [((Residue, char), Residue); 6] = [
    ((R0, '0'), R0),
    ((R0, '1'), R1),
    ((R1, '0'), R2),
    ((R1, '1'), R0),
    ((R2, '0'), R1),
    ((R2, '1'), R2),
];

/// The same table indexed by `[residue][bit]`.
pub const DENSE_TABLE: [[Option<Residue>; 2]; 3] = [
    [Some(R0), Some(R1)],
    [Some(R2), Some(R0)],
    [Some(R1), Some(R2)],
];

/// The formal definition `{Q, Σ, q0, F, δ}` of the mod-three automaton.
pub fn mod_three_definition() -> Definition<Residue, char> {
    Definition::new(Residue::ALL, ALPHABET, R0, Residue::ALL, TRANSITIONS)
}

/// Build the mod-three automaton, starting in `R0`.
pub fn build_mod_three_automaton() -> ModThreeAutomaton {
    Dfa::from_definition_unchecked(mod_three_definition())
}

/// Build the mod-three automaton with an observer attached.
pub fn build_mod_three_automaton_with<O>(observer: O) -> ModThreeAutomaton<O> {
    build_mod_three_automaton().with_observer(observer)
}

/// Build the array-backed variant of the mod-three automaton.
pub fn build_dense_mod_three_automaton() -> DenseModThreeAutomaton {
    DenseDfa::from_table_unchecked(R0, &Residue::ALL, DENSE_TABLE)
}

#[cfg(test)]
mod tests {
    use modthree_dfa::{Automaton, Ordinal};

    use super::*;

    #[test]
    fn definition_is_valid_and_total() {
        let def = mod_three_definition();
        assert!(def.validate().is_ok());
        assert!(def.is_total());
        assert_eq!(def.states().len(), 3);
        assert_eq!(def.alphabet().len(), 2);
        assert_eq!(def.transition_count(), 6);
    }

    #[test]
    fn initial_state_is_residue_zero() {
        let automaton = build_mod_three_automaton();
        assert_eq!(automaton.initial_state(), R0);
        assert_eq!(automaton.current_state(), R0);
        assert_eq!(build_dense_mod_three_automaton().current_state(), R0);
    }

    #[test]
    fn every_state_is_accepting() {
        let automaton = build_mod_three_automaton();
        let dense = build_dense_mod_three_automaton();
        for r in Residue::ALL {
            assert!(automaton.is_accepting(&r));
            assert!(dense.is_accepting(&r));
        }
    }

    #[test]
    fn table_follows_doubling_rule() {
        let automaton = build_mod_three_automaton();
        for r in Residue::ALL {
            for bit in [Bit::Zero, Bit::One] {
                let expected = r.after_digit(bit);
                assert_eq!(
                    automaton.transition(&r, &bit.as_char()),
                    Some(&expected),
                    "δ({r:?}, {bit:?})"
                );
            }
        }
    }

    #[test]
    fn dense_table_matches_hashed_table() {
        let automaton = build_mod_three_automaton();
        let dense = build_dense_mod_three_automaton();
        assert!(dense.is_total());
        for r in Residue::ALL {
            for bit in [Bit::Zero, Bit::One] {
                assert_eq!(dense.transition(r, bit), Some(r.after_digit(bit)));
                assert_eq!(
                    DENSE_TABLE[r.ordinal()][bit.ordinal()].as_ref(),
                    automaton.transition(&r, &bit.as_char())
                );
            }
        }
    }
}
