//! Slideshow state
//!
//! Owns the slide index, the cool-down gate and the logical group rotation.
//! Forward gestures that pass the gate advance the index (mod the slide
//! count) and issue the matching tweens through the [`AnimationDriver`].

use std::time::Duration;

use orbits_input::{Debouncer, ScrollDirection};

use super::animation::AnimationDriver;
use crate::config::SlideshowConfig;

/// What a gesture sample did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Not a forward gesture
    Ignored,
    /// Forward, but inside the cool-down window
    RateLimited,
    /// The slide index moved to `index`; `wrapped` when it returned to 0
    Advanced { index: usize, wrapped: bool },
}

/// Mutable slideshow context
pub struct Slideshow {
    index: usize,
    slide_count: usize,
    debouncer: Debouncer,
    rotation_step: f32,
    advances: u64,
    headings: Vec<String>,
}

impl Slideshow {
    pub fn new(config: &SlideshowConfig, rotation_step: f32, headings: Vec<String>) -> Self {
        let slide_count = config.slide_count.max(1);
        if headings.len() != slide_count {
            log::warn!(
                "Scene has {} headings for {} slides; slides without a heading show the bare title",
                headings.len(),
                slide_count
            );
        }
        Self {
            index: 0,
            slide_count,
            debouncer: Debouncer::new(config.cooldown()),
            rotation_step,
            advances: 0,
            headings,
        }
    }

    /// Handle one gesture sample taken at `now`
    pub fn on_gesture(
        &mut self,
        direction: ScrollDirection,
        now: Duration,
        driver: &mut AnimationDriver,
    ) -> AdvanceOutcome {
        if direction != ScrollDirection::Forward {
            log::trace!("Ignoring backward gesture");
            return AdvanceOutcome::Ignored;
        }
        if !self.debouncer.try_accept(now) {
            log::trace!(
                "Gesture rate limited ({} ms left)",
                self.debouncer.remaining(now).as_millis()
            );
            return AdvanceOutcome::RateLimited;
        }

        self.index = (self.index + 1) % self.slide_count;
        self.advances += 1;
        let wrapped = self.index == 0;

        driver.advance_headings(now);
        driver.rotate_group(now, self.rotation_target());
        if wrapped {
            driver.reset_headings(now);
        }

        log::debug!(
            "Advanced to slide {} (rotation target {:.4}{})",
            self.index,
            self.rotation_target(),
            if wrapped { ", wrapped" } else { "" }
        );
        AdvanceOutcome::Advanced {
            index: self.index,
            wrapped,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Logical group rotation: `step * accepted advances`
    ///
    /// Computed from the advance count, so the target carries a single
    /// rounding step however many advances have been accepted.
    pub fn rotation_target(&self) -> f32 {
        (self.advances as f64 * f64::from(self.rotation_step)) as f32
    }

    /// Number of accepted advances since start
    #[inline]
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Heading shown for a heading-stack offset
    ///
    /// The offset is in percent of one slide; the nearest slide wins, so the
    /// caption switches halfway through a scroll. Slots wrap with the slide
    /// index, not with the heading list.
    pub fn heading_at(&self, offset: f32, step: f32) -> Option<&str> {
        if step <= 0.0 {
            return None;
        }
        let slot = (-offset / step).round() as i64;
        let slot = slot.rem_euclid(self.slide_count as i64) as usize;
        self.headings.get(slot).map(String::as_str)
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }
}
