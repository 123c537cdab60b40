//! The two tween machines.
//!
//! Positions use a duration-counted tween: a fixed per-tick delta stepped
//! for exactly `duration` ticks, then snapped to the target so float error
//! never leaves a sprite short of where it was sent.
//!
//! Sizes and text reveals use a glide: step by a fixed delta until the
//! remaining distance is within twice the delta, then snap. The two
//! termination rules ease differently at the end of a transition and both
//! are load-bearing; they are deliberately not unified.

use std::num::NonZeroU32;

/// Duration-counted linear tween toward a 2D target.
#[derive(Debug, Clone, PartialEq)]
pub struct PosTween {
    target_x: f64,
    target_y: f64,
    dx: f64,
    dy: f64,
    remaining: u32,
}

impl PosTween {
    pub fn new(from: (f64, f64), to: (f64, f64), duration: NonZeroU32) -> Self {
        let d = f64::from(duration.get());
        PosTween {
            target_x: to.0,
            target_y: to.1,
            dx: (to.0 - from.0) / d,
            dy: (to.1 - from.1) / d,
            remaining: duration.get(),
        }
    }

    /// Advance one tick. Returns the new position and `true` when the tween
    /// has finished (position is then exactly the target).
    pub fn step(&mut self, x: f64, y: f64) -> (f64, f64, bool) {
        self.remaining -= 1;
        if self.remaining == 0 {
            (self.target_x, self.target_y, true)
        } else {
            (x + self.dx, y + self.dy, false)
        }
    }
}

/// Snap-rule glide toward a scalar target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    target: f64,
    step: f64,
}

impl Glide {
    pub fn new(from: f64, to: f64, duration: NonZeroU32) -> Self {
        Glide {
            target: to,
            step: (to - from) / f64::from(duration.get()),
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance one tick from `current`. Returns the new value and `true`
    /// once snapped onto the target.
    pub fn step(&mut self, current: f64) -> (f64, bool) {
        if (self.target - current).abs() <= (self.step * 2.0).abs() {
            (self.target, true)
        } else {
            (current + self.step, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn pos_tween_lands_exactly_after_duration() {
        let mut t = PosTween::new((0.0, 0.0), (10.0, -30.0), ticks(3));
        let (mut x, mut y) = (0.0, 0.0);
        let mut done = false;
        for i in 1..=3 {
            let (nx, ny, fin) = t.step(x, y);
            x = nx;
            y = ny;
            done = fin;
            assert_eq!(done, i == 3);
        }
        assert_eq!((x, y), (10.0, -30.0));
        assert!(done);
    }

    #[test]
    fn pos_tween_snaps_over_float_drift() {
        // 1/3-pixel steps accumulate error; the final tick must still land
        // on the target exactly.
        let mut t = PosTween::new((0.0, 0.0), (1.0, 1.0), ticks(3));
        let (mut x, mut y) = (0.0, 0.0);
        for _ in 0..3 {
            let (nx, ny, _) = t.step(x, y);
            x = nx;
            y = ny;
        }
        assert_eq!((x, y), (1.0, 1.0));
    }

    #[test]
    fn glide_snaps_within_two_steps_of_target() {
        let mut g = Glide::new(5.0, 20.0, ticks(5));
        // step = 3.0; values walk 8, 11, 14, then 20 - 14 = 6 <= 6 snaps.
        let mut v = 5.0;
        let mut trace = Vec::new();
        loop {
            let (nv, done) = g.step(v);
            v = nv;
            trace.push(v);
            if done {
                break;
            }
        }
        assert_eq!(trace, vec![8.0, 11.0, 14.0, 20.0]);
    }

    #[test]
    fn glide_handles_shrinking_values() {
        let mut g = Glide::new(20.0, 5.0, ticks(5));
        let mut v = 20.0;
        loop {
            let (nv, done) = g.step(v);
            assert!(nv < v);
            v = nv;
            if done {
                break;
            }
        }
        assert_eq!(v, 5.0);
    }

    #[test]
    fn glide_never_overshoots() {
        let mut g = Glide::new(0.0, 7.0, ticks(2));
        let (v, done) = g.step(0.0);
        // step = 3.5, remaining 7 <= 7 snaps immediately.
        assert_eq!(v, 7.0);
        assert!(done);
    }
}
