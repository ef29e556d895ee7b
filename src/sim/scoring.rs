//! Score, combo streaks and shot accuracy
//!
//! The combo is a two-state machine: `Idle` (combo 0) and `Streak(n)`.
//! Kills inside the combo window extend the streak; a kill outside it
//! restarts at 1. A passive timeout drops back to `Idle` once the window
//! has elapsed with no kill.

use serde::{Deserialize, Serialize};

/// Combo state derived from the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboState {
    Idle,
    Streak(u32),
}

/// Points granted for one kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillAward {
    pub base: u64,
    pub bonus: u64,
    /// Combo after this kill
    pub combo: u32,
    /// True when the kill extended an existing streak
    pub extended: bool,
}

impl KillAward {
    pub fn total(&self) -> u64 {
        self.base + self.bonus
    }
}

/// Running tallies for one match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Simulated time of the previous kill (ms)
    pub last_kill_ms: Option<f64>,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub total_kills: u32,
}

impl ScoreBoard {
    pub fn combo_state(&self) -> ComboState {
        if self.combo == 0 {
            ComboState::Idle
        } else {
            ComboState::Streak(self.combo)
        }
    }

    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    pub fn record_hit(&mut self) {
        self.shots_hit += 1;
    }

    /// Score a kill at `now_ms` and advance the combo
    pub fn register_kill(
        &mut self,
        points: u64,
        now_ms: f64,
        window_ms: f64,
        bonus_per_step: u64,
    ) -> KillAward {
        self.total_kills += 1;

        let extended = self
            .last_kill_ms
            .is_some_and(|last| now_ms - last < window_ms);
        self.combo = if extended { self.combo + 1 } else { 1 };
        self.last_kill_ms = Some(now_ms);
        self.max_combo = self.max_combo.max(self.combo);

        let award = KillAward {
            base: points,
            bonus: u64::from(self.combo - 1) * bonus_per_step,
            combo: self.combo,
            extended,
        };
        self.score += award.total();
        award
    }

    /// Drop the streak once the window has passed with no kill.
    /// Returns true if the combo was reset.
    pub fn expire_combo(&mut self, now_ms: f64, window_ms: f64) -> bool {
        match self.last_kill_ms {
            Some(last) if self.combo > 0 && now_ms - last > window_ms => {
                self.combo = 0;
                true
            }
            _ => false,
        }
    }

    pub fn accuracy(&self) -> u32 {
        accuracy(self.shots_hit, self.shots_fired)
    }
}

/// Hit percentage, rounded; 0 when nothing was fired
pub fn accuracy(shots_hit: u32, shots_fired: u32) -> u32 {
    if shots_fired == 0 {
        return 0;
    }
    (f64::from(shots_hit) / f64::from(shots_fired) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: f64 = 3000.0;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(0, 0), 0);
        assert_eq!(accuracy(3, 10), 30);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 1), 100);
    }

    #[test]
    fn test_first_kill_starts_streak() {
        let mut board = ScoreBoard::default();
        assert_eq!(board.combo_state(), ComboState::Idle);
        let award = board.register_kill(20, 500.0, WINDOW, 10);
        assert_eq!(award.combo, 1);
        assert!(!award.extended);
        assert_eq!(award.bonus, 0);
        assert_eq!(board.score, 20);
        assert_eq!(board.combo_state(), ComboState::Streak(1));
    }

    #[test]
    fn test_same_timestamp_kills_extend() {
        let mut board = ScoreBoard::default();
        let first = board.register_kill(20, 1000.0, WINDOW, 10);
        let second = board.register_kill(20, 1000.0, WINDOW, 10);
        assert!(!first.extended);
        assert!(second.extended);
        assert_eq!(board.combo, 2);
    }

    #[test]
    fn test_window_boundaries() {
        let mut board = ScoreBoard::default();
        board.register_kill(20, 10_000.0, WINDOW, 10);
        let award = board.register_kill(40, 12_999.0, WINDOW, 10);
        assert_eq!(award.combo, 2);
        assert_eq!(award.bonus, 10);
        assert_eq!(board.score, 20 + 40 + 10);

        let mut board = ScoreBoard::default();
        board.register_kill(20, 10_000.0, WINDOW, 10);
        let award = board.register_kill(40, 13_001.0, WINDOW, 10);
        assert_eq!(award.combo, 1);
        assert_eq!(award.bonus, 0);
        assert_eq!(board.max_combo, 1);
    }

    #[test]
    fn test_passive_timeout() {
        let mut board = ScoreBoard::default();
        board.register_kill(20, 0.0, WINDOW, 10);
        board.register_kill(20, 100.0, WINDOW, 10);
        assert!(!board.expire_combo(3100.0, WINDOW));
        assert_eq!(board.combo, 2);
        assert!(board.expire_combo(3100.5, WINDOW));
        assert_eq!(board.combo_state(), ComboState::Idle);
        assert_eq!(board.max_combo, 2);
        // Already idle: nothing to expire
        assert!(!board.expire_combo(10_000.0, WINDOW));
    }

    proptest! {
        #[test]
        fn prop_max_combo_is_high_water_mark(gaps in proptest::collection::vec(0u32..6000, 1..40)) {
            let mut board = ScoreBoard::default();
            let mut now = 0.0;
            let mut seen_max = 0;
            for gap in gaps {
                now += f64::from(gap);
                let award = board.register_kill(20, now, WINDOW, 10);
                seen_max = seen_max.max(award.combo);
                prop_assert!(award.combo >= 1);
                prop_assert_eq!(board.max_combo, seen_max);
            }
        }

        #[test]
        fn prop_accuracy_in_range(fired in 0u32..10_000, hit_ratio in 0.0f64..=1.0) {
            let hit = (f64::from(fired) * hit_ratio) as u32;
            let acc = accuracy(hit, fired);
            prop_assert!(acc <= 100);
        }
    }
}
