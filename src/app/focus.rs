//! Focus controller - one spring-driven progress value and the pure
//! mappings that derive scale, corner radius and action bar offset from it.

use std::time::Duration;

use crate::constants::{
    BAR_OFFSET_HIDDEN, BAR_OFFSET_VISIBLE, RADIUS_FOCUSED, RADIUS_NORMAL, SCALE_FOCUSED,
    SCALE_NORMAL, SPRING_DAMPING, SPRING_MASS, SPRING_REST_DISPLACEMENT, SPRING_REST_SPEED,
    SPRING_STIFFNESS,
};

/// Integration substep
const SUBSTEP: f64 = 0.001;
/// Longest frame the integrator will catch up on in one call
const MAX_FRAME: f64 = 0.1;

/// Logical focus mode of the screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
}

impl FocusState {
    pub fn toggled(self) -> FocusState {
        match self {
            FocusState::Normal => FocusState::Focused,
            FocusState::Focused => FocusState::Normal,
        }
    }

    /// Progress value this state settles on
    pub fn target(self) -> f64 {
        match self {
            FocusState::Normal => 0.0,
            FocusState::Focused => 1.0,
        }
    }
}

/// Damped spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_displacement: f64,
    pub rest_speed: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Spring {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
            mass: SPRING_MASS,
            rest_displacement: SPRING_REST_DISPLACEMENT,
            rest_speed: SPRING_REST_SPEED,
        }
    }
}

/// A scalar that only moves by springing toward its target
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    value: f64,
    velocity: f64,
    target: f64,
    spring: Spring,
}

impl AnimatedValue {
    pub fn new(value: f64, spring: Spring) -> Self {
        AnimatedValue {
            value,
            velocity: 0.0,
            target: value,
            spring,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Retarget without resetting position or velocity
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the simulation. Returns true while still moving.
    pub fn step(&mut self, elapsed: Duration) -> bool {
        if self.is_settled() {
            return false;
        }

        let mut remaining = elapsed.as_secs_f64().min(MAX_FRAME);
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let displacement = self.value - self.target;
            let force = -self.spring.stiffness * displacement - self.spring.damping * self.velocity;
            self.velocity += force / self.spring.mass * h;
            self.value += self.velocity * h;
            remaining -= h;

            if (self.value - self.target).abs() < self.spring.rest_displacement
                && self.velocity.abs() < self.spring.rest_speed
            {
                self.value = self.target;
                self.velocity = 0.0;
                return false;
            }
        }
        true
    }
}

/// Visual outputs derived from the focus progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusTransform {
    pub scale: f64,
    pub corner_radius: f64,
    pub bar_offset: f64,
}

impl FocusTransform {
    pub fn at(progress: f64) -> Self {
        FocusTransform {
            scale: scale_at(progress),
            corner_radius: corner_radius_at(progress),
            bar_offset: bar_offset_at(progress),
        }
    }
}

impl Default for FocusTransform {
    fn default() -> Self {
        FocusTransform::at(0.0)
    }
}

/// Linear interpolation, extrapolating past the ends like an unclamped
/// animated interpolation does during overshoot
fn interpolate(progress: f64, from: f64, to: f64) -> f64 {
    from + (to - from) * progress
}

pub fn scale_at(progress: f64) -> f64 {
    interpolate(progress, SCALE_NORMAL, SCALE_FOCUSED)
}

pub fn corner_radius_at(progress: f64) -> f64 {
    interpolate(progress, RADIUS_NORMAL, RADIUS_FOCUSED).max(0.0)
}

pub fn bar_offset_at(progress: f64) -> f64 {
    interpolate(progress, BAR_OFFSET_HIDDEN, BAR_OFFSET_VISIBLE)
}

/// Owns the focus state and the single animated progress value
#[derive(Clone, Debug)]
pub struct FocusController {
    state: FocusState,
    progress: AnimatedValue,
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusController {
    pub fn new() -> Self {
        FocusController {
            state: FocusState::Normal,
            progress: AnimatedValue::new(FocusState::Normal.target(), Spring::default()),
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Follow an externally reduced focus state
    pub fn set_state(&mut self, state: FocusState) {
        self.state = state;
        self.progress.animate_to(state.target());
    }

    pub fn can_page(&self) -> bool {
        self.state == FocusState::Normal
    }

    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    pub fn is_animating(&self) -> bool {
        !self.progress.is_settled()
    }

    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.progress.step(elapsed)
    }

    pub fn transform(&self) -> FocusTransform {
        FocusTransform::at(self.progress.value())
    }
}
