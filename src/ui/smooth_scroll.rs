//! Slide easing with exponential ease-out.
//!
//! When the current index changes, a row displacement of one container
//! height per step is injected; a released drag adds its own offset so the
//! card continues from where the finger left it.  Each tick the displacement
//! decays toward zero, so cards glide into place and decelerate.

/// Row-offset animator added on top of the resting slide offsets.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current displacement.  Positive = content shifted down from its
    /// resting place (it slides up into position).
    row_offset: f64,
    /// Index the displacement was last computed against.
    prev_target: usize,
    /// Damping: `offset *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            row_offset: 0.0,
            prev_target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Feed the new current index.  Moving forward starts the content one
    /// screen low so it slides up; moving back does the opposite.
    pub fn set_target(&mut self, target: usize, container_height: f64) {
        if target != self.prev_target {
            let delta = target as f64 - self.prev_target as f64;
            self.row_offset += delta * container_height.max(0.0);
            self.prev_target = target;
        }
    }

    /// Carry a released drag's displacement into the animation.
    pub fn nudge(&mut self, rows: f64) {
        if rows.is_finite() {
            self.row_offset += rows;
        }
    }

    /// Decay the offset toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.row_offset *= 1.0 - self.speed;
        if self.row_offset.abs() < 0.4 {
            self.row_offset = 0.0;
        }
    }

    pub fn offset(&self) -> f64 {
        self.row_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_step_starts_one_screen_down() {
        let mut s = SmoothScroll::new(0.35);
        s.set_target(1, 30.0);
        assert_eq!(s.offset(), 30.0);
        s.set_target(1, 30.0);
        assert_eq!(s.offset(), 30.0);
    }

    #[test]
    fn released_drag_continues_from_finger() {
        let mut s = SmoothScroll::new(0.35);
        s.nudge(-9.0);
        s.set_target(1, 30.0);
        assert_eq!(s.offset(), 21.0);
    }

    #[test]
    fn settles_to_zero() {
        let mut s = SmoothScroll::new(0.5);
        s.set_target(2, 40.0);
        for _ in 0..20 {
            s.tick();
        }
        assert_eq!(s.offset(), 0.0);
    }
}
