// Pointer state shared by the particle field and the proximity-line pass.
// Coordinates persist after the pointer leaves the page; only the active
// flag is cleared, so line hue and width keep tracking the last known spot.

use nalgebra_glm as glm;
use vecmath::Vector2;

pub struct Pointer {
    pub pos: Vector2<f64>,
    pub active: bool,
    pub is_touch: bool,
    last_touch_update: f64,
}

impl Pointer {
    // Touch positions can arrive faster than the frame cadence
    pub const TOUCH_INTERVAL_MS: f64 = 16.0;

    pub fn new(width: f64, height: f64, is_touch: bool) -> Pointer {
        Pointer {
            pos: [width / 2.0, height / 2.0],
            active: false,
            is_touch,
            last_touch_update: 0.0,
        }
    }

    pub fn moved_to(&mut self, x: f64, y: f64) {
        self.pos = [x, y];
        self.active = true;
    }

    pub fn cleared(&mut self) {
        self.active = false;
    }

    // Returns false when the update landed inside the throttle window
    pub fn touch_moved(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        if now_ms - self.last_touch_update < Self::TOUCH_INTERVAL_MS {
            return false;
        }
        self.last_touch_update = now_ms;
        self.moved_to(x, y);
        true
    }

    pub fn distance_to(&self, point: Vector2<f64>) -> f64 {
        let delta_x = point[0] - self.pos[0];
        let delta_y = point[1] - self.pos[1];
        glm::length(&glm::vec2(delta_x, delta_y))
    }

    /// Radial falloff of pointer influence at `point`: 1.0 on the pointer
    /// itself, fading linearly to 0.0 at `reach`.
    pub fn influence_at(&self, point: Vector2<f64>, reach: f64) -> f64 {
        (1.0 - self.distance_to(point) / reach).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_updates_are_throttled_to_one_per_window() {
        let mut pointer = Pointer::new(800.0, 600.0, true);
        assert!(pointer.touch_moved(10.0, 10.0, 100.0));
        assert!(!pointer.touch_moved(20.0, 20.0, 108.0));
        assert_eq!(pointer.pos, [10.0, 10.0]);
        assert!(pointer.touch_moved(30.0, 30.0, 116.0));
        assert_eq!(pointer.pos, [30.0, 30.0]);
    }

    #[test]
    fn clearing_keeps_the_last_position() {
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(123.0, 45.0);
        pointer.cleared();
        assert!(!pointer.active);
        assert_eq!(pointer.pos, [123.0, 45.0]);
    }

    #[test]
    fn influence_fades_linearly_and_clamps_at_reach() {
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(0.0, 0.0);
        assert!((pointer.influence_at([0.0, 0.0], 250.0) - 1.0).abs() < 1e-12);
        assert!((pointer.influence_at([125.0, 0.0], 250.0) - 0.5).abs() < 1e-12);
        assert_eq!(pointer.influence_at([400.0, 0.0], 250.0), 0.0);
    }
}
