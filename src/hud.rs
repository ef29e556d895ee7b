//! Read-only HUD view of a session
//!
//! Everything the DOM overlay shows, computed in one place so the browser
//! glue only copies strings into elements.

use crate::sim::{FinalStats, GameEvent, Scene, Session, SessionPhase};

/// Label shown while the launcher can fire
pub const READY_LABEL: &str = "Ready to fire";
/// Label shown while the launcher is reloading
pub const RELOADING_LABEL: &str = "Reloading...";

#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    /// Whole seconds left
    pub timer_secs: u32,
    pub combo: u32,
    /// Reload bar fill, 0..=100
    pub reload_percent: f32,
    pub reload_label: &'static str,
    pub scene: Scene,
    pub phase: SessionPhase,
    pub final_stats: Option<FinalStats>,
}

impl HudSnapshot {
    pub fn from_session(session: &Session) -> Self {
        let state = session.match_state();
        let ready = state.reload.is_ready();
        Self {
            score: state.board.score,
            timer_secs: state.timer_secs,
            combo: state.board.combo,
            reload_percent: state.reload.progress(),
            reload_label: if ready { READY_LABEL } else { RELOADING_LABEL },
            scene: state.scene,
            phase: session.phase(),
            final_stats: session.final_stats(),
        }
    }

    /// Combo badge text; hidden until a streak of two
    pub fn combo_text(&self) -> Option<String> {
        (self.combo > 1).then(|| format!("x{}", self.combo))
    }

    /// Countdown as M:SS
    pub fn timer_text(&self) -> String {
        format!("{}:{:02}", self.timer_secs / 60, self.timer_secs % 60)
    }

    /// Caption for the scene toggle button
    pub fn scene_button_text(&self) -> &'static str {
        match self.scene {
            Scene::Surface => "Dive",
            Scene::Underwater => "Surface",
        }
    }

    /// Lines for the game-over panel
    pub fn summary_lines(&self) -> Option<[String; 4]> {
        let stats = self.final_stats?;
        Some([
            format!("Final score: {}", stats.score),
            format!("Targets sunk: {}", stats.kills),
            format!("Best combo: {}", stats.max_combo),
            format!(
                "Accuracy: {}% ({}/{})",
                stats.accuracy, stats.shots_hit, stats.shots_fired
            ),
        ])
    }
}

/// Kill feed line for a sunk target, e.g. "Carrier sunk +60"
pub fn kill_caption(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::Destroyed { name, points, .. } => Some(format!("{name} sunk +{points}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Field, TargetKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_snapshot_tracks_reload() {
        let mut session = Session::new(Tuning::default(), Field::default(), 3).unwrap();
        session.start();

        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.reload_label, READY_LABEL);
        assert_eq!(hud.reload_percent, 100.0);
        assert_eq!(hud.timer_text(), "2:00");
        assert_eq!(hud.combo_text(), None);

        session.fire(Vec2::new(0.0, 0.0));
        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.reload_label, RELOADING_LABEL);
        assert_eq!(hud.reload_percent, 0.0);
    }

    #[test]
    fn test_summary_after_match() {
        let mut session = Session::new(Tuning::default(), Field::default(), 3).unwrap();
        session.start();
        assert!(HudSnapshot::from_session(&session).summary_lines().is_none());

        session.stop();
        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.phase, SessionPhase::Ended);
        let lines = hud.summary_lines().unwrap();
        assert_eq!(lines[0], "Final score: 0");
        assert_eq!(lines[3], "Accuracy: 0% (0/0)");
    }

    #[test]
    fn test_combo_badge_and_scene_caption() {
        let mut session = Session::new(Tuning::default(), Field::default(), 3).unwrap();
        let mut hud = HudSnapshot::from_session(&session);
        hud.combo = 3;
        assert_eq!(hud.combo_text().as_deref(), Some("x3"));
        assert_eq!(hud.scene_button_text(), "Dive");

        session.toggle_scene();
        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.scene_button_text(), "Surface");
        assert_eq!(hud.phase, SessionPhase::NotStarted);
    }

    #[test]
    fn test_kill_caption_names_the_class() {
        let sunk = GameEvent::Destroyed {
            kind: TargetKind::LargeSubmarine,
            name: TargetKind::LargeSubmarine.class().name,
            pos: Vec2::ZERO,
            size: 90.0,
            points: 70,
        };
        assert_eq!(kill_caption(&sunk).as_deref(), Some("Large Submarine sunk +70"));
        let escaped = GameEvent::Escaped {
            kind: TargetKind::Carrier,
        };
        assert_eq!(kill_caption(&escaped), None);
    }

    #[test]
    fn test_timer_text_pads_seconds() {
        let mut hud = HudSnapshot::from_session(
            &Session::new(Tuning::default(), Field::default(), 3).unwrap(),
        );
        hud.timer_secs = 65;
        assert_eq!(hud.timer_text(), "1:05");
        hud.timer_secs = 9;
        assert_eq!(hud.timer_text(), "0:09");
    }
}
