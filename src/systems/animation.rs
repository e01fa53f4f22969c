//! Animation system
//!
//! Drives every time-dependent property of the scene:
//! - Self-rotation of each body, a pure function of elapsed time
//! - The orbit group rotation tween issued on each accepted advance
//! - The heading offset tweens (scroll one slide, reset on wrap)
//!
//! Time is always a [`Duration`] since application start, so the same
//! elapsed time gives the same frame regardless of how often frames ran.

use std::time::Duration;

use orbits_core::{Timeline, World};

use crate::config::AnimationConfig;
use crate::scene::SceneHandles;

/// Properties driven by tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    /// Y rotation of the orbit group, radians
    GroupRotation,
    /// Vertical offset of the heading stack, percent of viewport height
    HeadingOffset,
}

/// Animated values after a frame was applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub group_rotation: f32,
    pub heading_offset: f32,
    pub self_rotation: f32,
}

/// Self-rotation angle after `elapsed` at `speed` radians per second
#[inline]
pub fn self_rotation(elapsed: Duration, speed: f32) -> f32 {
    elapsed.as_secs_f32() * speed
}

/// Config durations are plain seconds; invalid values collapse to an instant jump
fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

/// Issues tweens and applies animated values to the world each frame
pub struct AnimationDriver {
    config: AnimationConfig,
    timeline: Timeline<AnimatedProperty>,
    group_rotation: f32,
    heading_offset: f32,
}

impl AnimationDriver {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            timeline: Timeline::new(),
            group_rotation: 0.0,
            heading_offset: 0.0,
        }
    }

    /// Scroll the headings up by one slide, relative to where they are now
    pub fn advance_headings(&mut self, now: Duration) {
        self.timeline.by(
            AnimatedProperty::HeadingOffset,
            self.heading_offset,
            -self.config.heading_step,
            now,
            seconds(self.config.heading_duration),
            self.config.heading_ease,
        );
    }

    /// Bring the headings back to the first slide
    pub fn reset_headings(&mut self, now: Duration) {
        self.timeline.to(
            AnimatedProperty::HeadingOffset,
            self.heading_offset,
            0.0,
            now,
            seconds(self.config.heading_duration),
            self.config.heading_ease,
        );
    }

    /// Turn the orbit group toward an absolute target angle
    pub fn rotate_group(&mut self, now: Duration, target: f32) {
        self.timeline.to(
            AnimatedProperty::GroupRotation,
            self.group_rotation,
            target,
            now,
            seconds(self.config.rotation_duration),
            self.config.rotation_ease,
        );
    }

    /// Sample tweens at `now` and write every animated value into `world`
    pub fn frame(&mut self, now: Duration, world: &mut World, handles: &SceneHandles) -> FrameState {
        for (property, value) in self.timeline.sample(now) {
            match property {
                AnimatedProperty::GroupRotation => self.group_rotation = value,
                AnimatedProperty::HeadingOffset => self.heading_offset = value,
            }
        }

        if let Some(group) = world.get_entity_mut(handles.group) {
            group.set_rotation_y(self.group_rotation);
        }

        let spin = self_rotation(now, self.config.self_rotation_speed);
        for key in &handles.bodies {
            if let Some(body) = world.get_entity_mut(*key) {
                body.set_rotation_y(spin);
            }
        }

        FrameState {
            group_rotation: self.group_rotation,
            heading_offset: self.heading_offset,
            self_rotation: spin,
        }
    }

    #[inline]
    pub fn group_rotation(&self) -> f32 {
        self.group_rotation
    }

    #[inline]
    pub fn heading_offset(&self) -> f32 {
        self.heading_offset
    }

    pub fn is_animating(&self, property: AnimatedProperty) -> bool {
        self.timeline.is_animating(property)
    }

    pub fn timeline(&self) -> &Timeline<AnimatedProperty> {
        &self.timeline
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;
    use orbits_core::SceneDescription;
    use std::f32::consts::FRAC_PI_2;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn scene() -> (World, SceneHandles) {
        SceneBuilder::from_description(&SceneDescription::default()).build()
    }

    #[test]
    fn test_self_rotation_is_absolute() {
        assert_eq!(self_rotation(Duration::ZERO, 0.02), 0.0);
        assert!((self_rotation(Duration::from_secs(10), 0.02) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_self_rotation_independent_of_frame_rate() {
        let (mut world_a, handles_a) = scene();
        let (mut world_b, handles_b) = scene();
        let mut fast = AnimationDriver::new(AnimationConfig::default());
        let mut slow = AnimationDriver::new(AnimationConfig::default());

        for t in (0..=5000).step_by(16) {
            fast.frame(ms(t), &mut world_a, &handles_a);
        }
        fast.frame(ms(5000), &mut world_a, &handles_a);
        slow.frame(ms(5000), &mut world_b, &handles_b);

        let a = world_a.get_entity(handles_a.bodies[2]).unwrap().transform.rotation.y;
        let b = world_b.get_entity(handles_b.bodies[2]).unwrap().transform.rotation.y;
        assert_eq!(a, b);
        assert!((a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_group_rotation_tween() {
        let (mut world, handles) = scene();
        let mut driver = AnimationDriver::new(AnimationConfig::default());
        driver.rotate_group(ms(0), FRAC_PI_2);
        assert!(driver.is_animating(AnimatedProperty::GroupRotation));

        let mid = driver.frame(ms(1000), &mut world, &handles);
        assert!(mid.group_rotation > 0.0 && mid.group_rotation < FRAC_PI_2);
        // Ease-out: past the halfway point at half time
        assert!(mid.group_rotation > FRAC_PI_2 / 2.0);

        let end = driver.frame(ms(2000), &mut world, &handles);
        assert_eq!(end.group_rotation, FRAC_PI_2);
        assert!(!driver.is_animating(AnimatedProperty::GroupRotation));
        let group = world.get_entity(handles.group).unwrap();
        assert_eq!(group.transform.rotation.y, FRAC_PI_2);
        // Tilt is untouched
        assert_eq!(group.transform.rotation.x, 0.1);
    }

    #[test]
    fn test_heading_advance_is_relative() {
        let (mut world, handles) = scene();
        let mut driver = AnimationDriver::new(AnimationConfig::default());
        driver.advance_headings(ms(0));
        driver.frame(ms(500), &mut world, &handles);
        assert_eq!(driver.heading_offset(), -100.0);

        driver.advance_headings(ms(3000));
        driver.frame(ms(3500), &mut world, &handles);
        assert_eq!(driver.heading_offset(), -200.0);
    }

    #[test]
    fn test_reset_overrides_concurrent_advance() {
        let (mut world, handles) = scene();
        let mut driver = AnimationDriver::new(AnimationConfig::default());
        driver.advance_headings(ms(0));
        driver.reset_headings(ms(0));

        let mid = driver.frame(ms(250), &mut world, &handles);
        assert!(mid.heading_offset.abs() < 1e-6);
        let end = driver.frame(ms(500), &mut world, &handles);
        assert_eq!(end.heading_offset, 0.0);
        assert_eq!(driver.timeline().active_count(), 0);
    }

    #[test]
    fn test_frame_marks_bodies_dirty() {
        let (mut world, handles) = scene();
        world.clear_all_dirty();
        let mut driver = AnimationDriver::new(AnimationConfig::default());
        driver.frame(ms(1000), &mut world, &handles);
        assert!(world.needs_transform_update(handles.bodies[0]));
        assert!(!world.get_entity(handles.group).unwrap().is_dirty());
    }
}
