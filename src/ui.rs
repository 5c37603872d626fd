//! HUD model
//!
//! Everything the page shows next to the canvas, read from game state once
//! per frame. The DOM layer only copies these strings.

use crate::sim::{GamePhase, GameState, ItemKind};

/// Full-screen overlay message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Title,
    LevelClear { next_level: u32 },
    GameOver { score: u64 },
}

impl Banner {
    pub fn for_state(state: &GameState) -> Option<Self> {
        match state.phase {
            GamePhase::NotStarted => Some(Banner::Title),
            GamePhase::Playing => None,
            GamePhase::LevelTransition { .. } => Some(Banner::LevelClear {
                next_level: state.level.level + 1,
            }),
            GamePhase::GameOver => Some(Banner::GameOver {
                score: state.player.score,
            }),
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Banner::Title => "FLAG RALLY",
            Banner::LevelClear { .. } => "LEVEL CLEAR!",
            Banner::GameOver { .. } => "GAME OVER",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Banner::Title => "Arrows to drive, Space for smoke. Press R to start".to_string(),
            Banner::LevelClear { next_level } => format!("Get ready for level {next_level}"),
            Banner::GameOver { score } => format!("Final score {score}. Press R to retry"),
        }
    }
}

/// One frame of HUD values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    /// 0-100
    pub fuel_percent: u32,
    pub flags_collected: u32,
    pub flags_total: u32,
    pub banner: Option<Banner>,
    pub advice: String,
    pub best_score: u64,
    /// Secondary pickups this run
    pub fuel_pickups: usize,
    pub smoke_pickups: usize,
}

impl Hud {
    pub fn snapshot(state: &GameState, advice: &str, best_score: u64) -> Self {
        let player = &state.player;
        let picked = |kind: ItemKind| player.items.iter().filter(|&&k| k == kind).count();
        Self {
            score: player.score,
            level: state.level.level,
            fuel_percent: player.fuel.percent_of(player.max_fuel),
            flags_collected: state.level.flags_collected,
            flags_total: state.level.flags_total,
            banner: Banner::for_state(state),
            advice: advice.to_string(),
            best_score: best_score.max(player.score),
            fuel_pickups: picked(ItemKind::Fuel),
            smoke_pickups: picked(ItemKind::Smoke),
        }
    }

    pub fn flags_text(&self) -> String {
        format!("{}/{}", self.flags_collected, self.flags_total)
    }

    pub fn pickups_text(&self) -> String {
        format!("{} fuel / {} smoke", self.fuel_pickups, self.smoke_pickups)
    }

    pub fn fuel_text(&self) -> String {
        format!("{}%", self.fuel_percent)
    }

    /// Fuel gauge turns to warning color below this
    pub fn fuel_low(&self) -> bool {
        self.fuel_percent < 20
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LEVEL_TRANSITION_TICKS;
    use crate::sim::{Fuel, GameOverCause};

    #[test]
    fn test_title_before_start() {
        let state = GameState::new(7);
        let hud = Hud::snapshot(&state, "tip", 0);
        assert_eq!(hud.banner, Some(Banner::Title));
        assert_eq!(hud.level, 1);
        assert_eq!(hud.fuel_percent, 100);
        assert_eq!(hud.flags_text(), format!("0/{}", state.level.flags_total));
        assert_eq!(hud.advice, "tip");
    }

    #[test]
    fn test_fuel_percent_rounds() {
        let mut state = GameState::new(7);
        state.start();
        state.player.fuel = Fuel::from_hundredths(4995);
        let hud = Hud::snapshot(&state, "", 0);
        assert_eq!(hud.banner, None);
        assert_eq!(hud.fuel_percent, 50);
        assert_eq!(hud.fuel_text(), "50%");

        state.player.fuel = Fuel::from_units(12);
        assert!(Hud::snapshot(&state, "", 0).fuel_low());
    }

    #[test]
    fn test_pickup_counts() {
        let mut state = GameState::new(7);
        state.player.items = vec![ItemKind::Fuel, ItemKind::Smoke, ItemKind::Fuel];
        let hud = Hud::snapshot(&state, "", 0);
        assert_eq!(hud.fuel_pickups, 2);
        assert_eq!(hud.smoke_pickups, 1);
        assert_eq!(hud.pickups_text(), "2 fuel / 1 smoke");
    }

    #[test]
    fn test_level_clear_banner() {
        let mut state = GameState::new(7);
        state.start();
        state.phase = GamePhase::LevelTransition {
            ticks_remaining: LEVEL_TRANSITION_TICKS,
        };
        let banner = Hud::snapshot(&state, "", 0).banner.unwrap();
        assert_eq!(banner, Banner::LevelClear { next_level: 2 });
        assert_eq!(banner.detail(), "Get ready for level 2");
    }

    #[test]
    fn test_game_over_banner_and_best() {
        let mut state = GameState::new(7);
        state.start();
        state.player.score = 1250;
        state.game_over(GameOverCause::Caught);
        let hud = Hud::snapshot(&state, "", 900);
        assert_eq!(hud.banner, Some(Banner::GameOver { score: 1250 }));
        assert_eq!(hud.best_score, 1250);
        assert_eq!(Hud::snapshot(&state, "", 5000).best_score, 5000);
    }
}
