//! Per-round player record

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u32,
    lives: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(STARTING_LIVES)
    }
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            name: String::new(),
            score: 0,
            lives,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// Take one life, never going below zero.
    ///
    /// Returns true only for the call that took the last life.
    pub fn remove_life(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.lives == 0
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remove_life_floors_at_zero() {
        let mut player = Player::new(3);
        assert!(!player.remove_life());
        assert!(!player.remove_life());
        assert!(player.remove_life());
        assert_eq!(player.lives(), 0);

        assert!(!player.remove_life());
        assert_eq!(player.lives(), 0);
        assert!(player.is_out_of_lives());
    }

    #[test]
    fn test_default_player() {
        let player = Player::default();
        assert_eq!(player.lives(), STARTING_LIVES);
        assert_eq!(player.score(), 0);
        assert_eq!(player.name(), "");
    }

    proptest! {
        #[test]
        fn prop_score_is_additive(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut player = Player::new(3);
            let mut expected = 0;
            for increment in ops {
                if increment {
                    player.increment_score();
                    expected += 1;
                } else {
                    player.remove_life();
                }
            }
            prop_assert_eq!(player.score(), expected);
        }
    }
}
