//! Rolling, keeping and tallying the four dice.

use serde::{Deserialize, Serialize};

use super::face::{kind_for_slot, DieFace, Symbol};
use crate::core::error::IntentError;
use crate::core::rng::FaceSource;
use crate::core::state::{Phase, TurnState};

/// Number of dice rolled each turn.
pub const DICE_COUNT: usize = 4;

/// Summed magnitudes of the resolved dice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTally {
    pub steps: u32,
    pub water: u32,
    pub flames: u32,
}

/// Stateless dice rules over a [`TurnState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DiceResolver;

impl DiceResolver {
    /// Check that a roll is allowed.
    ///
    /// # Errors
    ///
    /// Outside the rolling phase, or with no rolls left.
    pub fn check_roll(turn: &TurnState) -> Result<(), IntentError> {
        if turn.phase != Phase::Rolling {
            return Err(IntentError::WrongPhase { actual: turn.phase });
        }
        if turn.rolls_remaining == 0 {
            return Err(IntentError::NoRollsLeft);
        }
        Ok(())
    }

    /// Re-roll every unkept die and spend one roll.
    ///
    /// Does not resolve the dice; the caller moves to the actions phase
    /// when `rolls_remaining` reaches 0.
    ///
    /// # Errors
    ///
    /// See [`DiceResolver::check_roll`].
    pub fn roll(turn: &mut TurnState, source: &mut dyn FaceSource) -> Result<(), IntentError> {
        Self::check_roll(turn)?;

        for slot in 0..DICE_COUNT {
            if turn.kept[slot] {
                continue;
            }
            let faces = kind_for_slot(slot).faces();
            turn.dice[slot] = Some(faces[source.pick(faces.len())]);
        }
        turn.rolls_remaining -= 1;
        Ok(())
    }

    /// Check that a die can be kept or released.
    ///
    /// # Errors
    ///
    /// Outside the rolling phase, for a slot past the last die, or for a die
    /// that has not been rolled.
    pub fn check_toggle(turn: &TurnState, slot: usize) -> Result<(), IntentError> {
        if turn.phase != Phase::Rolling {
            return Err(IntentError::WrongPhase { actual: turn.phase });
        }
        if slot >= DICE_COUNT {
            return Err(IntentError::InvalidSlot(slot));
        }
        if turn.dice[slot].is_none() {
            return Err(IntentError::NotRolled);
        }
        Ok(())
    }

    /// Flip the keep flag on a die. Returns the new flag.
    ///
    /// # Errors
    ///
    /// See [`DiceResolver::check_toggle`].
    pub fn toggle_keep(turn: &mut TurnState, slot: usize) -> Result<bool, IntentError> {
        Self::check_toggle(turn, slot)?;
        turn.kept[slot] = !turn.kept[slot];
        Ok(turn.kept[slot])
    }

    /// Sum the magnitudes of all rolled dice by symbol.
    #[must_use]
    pub fn tally(dice: &[Option<DieFace>; DICE_COUNT]) -> DiceTally {
        dice.iter().flatten().fold(DiceTally::default(), |mut tally, face| {
            let magnitude = u32::from(face.magnitude);
            match face.symbol {
                Symbol::Steps => tally.steps += magnitude,
                Symbol::Water => tally.water += magnitude,
                Symbol::Flame => tally.flames += magnitude,
            }
            tally
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, ScriptedFaces};
    use crate::dice::face::{DANGEROUS_FACES, FRIENDLY_FACES};

    #[test]
    fn test_first_roll_fills_every_slot() {
        let mut turn = TurnState::new(3);
        let mut faces = ScriptedFaces::new([1, 0, 2, 4]);

        DiceResolver::roll(&mut turn, &mut faces).unwrap();

        assert_eq!(
            turn.dice,
            [
                Some(FRIENDLY_FACES[1]),
                Some(DANGEROUS_FACES[0]),
                Some(DANGEROUS_FACES[2]),
                Some(DANGEROUS_FACES[4]),
            ]
        );
        assert_eq!(turn.rolls_remaining, 2);
    }

    #[test]
    fn test_kept_die_survives_rerolls() {
        let mut turn = TurnState::new(3);
        let mut rng = GameRng::new(11);

        DiceResolver::roll(&mut turn, &mut rng).unwrap();
        let kept = turn.dice[2];
        assert!(DiceResolver::toggle_keep(&mut turn, 2).unwrap());

        DiceResolver::roll(&mut turn, &mut rng).unwrap();
        DiceResolver::roll(&mut turn, &mut rng).unwrap();

        assert_eq!(turn.dice[2], kept);
        assert_eq!(turn.rolls_remaining, 0);
    }

    #[test]
    fn test_released_die_rolls_again() {
        let mut turn = TurnState::new(3);
        let mut faces = ScriptedFaces::new([0, 0, 0, 0]);
        DiceResolver::roll(&mut turn, &mut faces).unwrap();

        DiceResolver::toggle_keep(&mut turn, 1).unwrap();
        assert!(!DiceResolver::toggle_keep(&mut turn, 1).unwrap());

        faces.extend([0, 2, 0, 0]);
        DiceResolver::roll(&mut turn, &mut faces).unwrap();
        assert_eq!(turn.dice[1], Some(DANGEROUS_FACES[2]));
    }

    #[test]
    fn test_roll_rejected_without_rolls() {
        let mut turn = TurnState::new(1);
        let mut faces = ScriptedFaces::default();
        DiceResolver::roll(&mut turn, &mut faces).unwrap();

        let before = turn.clone();
        assert_eq!(
            DiceResolver::roll(&mut turn, &mut faces),
            Err(IntentError::NoRollsLeft)
        );
        assert_eq!(turn, before);
    }

    #[test]
    fn test_toggle_rules() {
        let mut turn = TurnState::new(3);
        assert_eq!(
            DiceResolver::toggle_keep(&mut turn, 0),
            Err(IntentError::NotRolled)
        );
        assert_eq!(
            DiceResolver::toggle_keep(&mut turn, 4),
            Err(IntentError::InvalidSlot(4))
        );

        turn.phase = Phase::Actions;
        turn.rolls_remaining = 0;
        assert_eq!(
            DiceResolver::toggle_keep(&mut turn, 0),
            Err(IntentError::WrongPhase { actual: Phase::Actions })
        );
    }

    #[test]
    fn test_tally_sums_magnitudes() {
        let dice = [
            Some(DieFace::steps(2)),
            Some(DieFace::flame(3)),
            Some(DieFace::flame(2)),
            Some(DieFace::water(1)),
        ];

        let tally = DiceResolver::tally(&dice);

        assert_eq!(tally, DiceTally { steps: 2, water: 1, flames: 5 });
    }

    #[test]
    fn test_tally_of_unrolled_dice_is_empty() {
        assert_eq!(DiceResolver::tally(&[None; DICE_COUNT]), DiceTally::default());
    }
}
