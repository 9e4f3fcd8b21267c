//! Wheel and keyboard paging: raw input in, at most one page turn per cooldown out.

use std::time::Duration;

use log::debug;

use super::registry::Direction;
use crate::config::ScrollSyncConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct PagingInput {
    delta_threshold: f64,
    cooldown: Duration,
    accumulated: f64,
    last_turn: Option<Duration>,
}

impl PagingInput {
    pub fn new(config: &ScrollSyncConfig) -> Self {
        Self {
            delta_threshold: config.wheel_delta_threshold,
            cooldown: config.input_cooldown(),
            accumulated: 0.0,
            last_turn: None,
        }
    }

    /// Positive `delta_y` pages forward once enough movement has accumulated.
    pub fn wheel(&mut self, delta_y: f64, now: Duration) -> Option<Direction> {
        if !delta_y.is_finite() || delta_y == 0.0 || self.cooling_down(now) {
            return None;
        }
        self.accumulated += delta_y.abs();
        if self.accumulated < self.delta_threshold {
            return None;
        }
        let direction = if delta_y > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        Some(self.turn(direction, now))
    }

    pub fn key(&mut self, key: &str, now: Duration) -> Option<Direction> {
        let direction = paging_key(key)?;
        if self.cooling_down(now) {
            return None;
        }
        Some(self.turn(direction, now))
    }

    fn cooling_down(&self, now: Duration) -> bool {
        match self.last_turn {
            Some(last) if now.saturating_sub(last) < self.cooldown => {
                debug!("Paging input throttled");
                true
            }
            _ => false,
        }
    }

    fn turn(&mut self, direction: Direction, now: Duration) -> Direction {
        self.accumulated = 0.0;
        self.last_turn = Some(now);
        direction
    }
}

/// `KeyboardEvent.key` values that page between sections.
pub fn paging_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowDown" | "PageDown" => Some(Direction::Next),
        "ArrowUp" | "PageUp" => Some(Direction::Previous),
        _ => None,
    }
}

/// Paging is a desktop affordance; narrow viewports scroll natively.
pub fn paging_enabled(viewport_width: f64, config: &ScrollSyncConfig) -> bool {
    viewport_width >= config.paging_min_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn small_deltas_accumulate() {
        let mut input = PagingInput::new(&ScrollSyncConfig::default());
        assert_eq!(input.wheel(20.0, ms(0)), None);
        assert_eq!(input.wheel(20.0, ms(10)), None);
        assert_eq!(input.wheel(20.0, ms(20)), Some(Direction::Next));
    }

    #[test]
    fn cooldown_drops_input_and_accumulation() {
        let mut input = PagingInput::new(&ScrollSyncConfig::default());
        assert_eq!(input.wheel(-100.0, ms(0)), Some(Direction::Previous));
        assert_eq!(input.wheel(-100.0, ms(500)), None);
        assert_eq!(input.key("ArrowDown", ms(799)), None);
        assert_eq!(input.wheel(10.0, ms(800)), None);
        assert_eq!(input.key("PageDown", ms(900)), Some(Direction::Next));
    }

    #[test]
    fn ignores_non_paging_keys_and_bad_deltas() {
        let mut input = PagingInput::new(&ScrollSyncConfig::default());
        assert_eq!(input.key("Space", ms(0)), None);
        assert_eq!(input.wheel(f64::NAN, ms(0)), None);
        assert_eq!(input.wheel(0.0, ms(0)), None);
        assert_eq!(input.key("ArrowUp", ms(0)), Some(Direction::Previous));
    }

    #[test]
    fn paging_disabled_on_narrow_viewports() {
        let config = ScrollSyncConfig::default();
        assert!(!paging_enabled(767.0, &config));
        assert!(paging_enabled(768.0, &config));
    }
}
