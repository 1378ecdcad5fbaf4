//! HUD strings
//!
//! The frontend shows the status line only when it is non-empty.

use serde::{Deserialize, Serialize};

use crate::sim::{CameraMode, GamePhase};

/// Status banner state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HudStatus {
    #[default]
    Hidden,
    Won,
    Lost,
}

impl HudStatus {
    pub fn from_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Playing => HudStatus::Hidden,
            GamePhase::Won => HudStatus::Won,
            GamePhase::Lost => HudStatus::Lost,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            HudStatus::Hidden => "",
            HudStatus::Won => "You win! Press R to restart",
            HudStatus::Lost => "You lose. Press R to restart",
        }
    }

    pub fn is_visible(&self) -> bool {
        *self != HudStatus::Hidden
    }
}

pub fn camera_mode_label(mode: CameraMode) -> &'static str {
    match mode {
        CameraMode::Follow => "Camera: Follow",
        CameraMode::TopDown => "Camera: Top-down",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_phase() {
        assert!(!HudStatus::from_phase(GamePhase::Playing).is_visible());
        assert_eq!(HudStatus::from_phase(GamePhase::Playing).text(), "");
        assert!(HudStatus::from_phase(GamePhase::Won).text().contains("win"));
        assert!(HudStatus::from_phase(GamePhase::Lost).text().contains("lose"));
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(camera_mode_label(CameraMode::Follow), "Camera: Follow");
        assert_eq!(camera_mode_label(CameraMode::TopDown), "Camera: Top-down");
    }
}
