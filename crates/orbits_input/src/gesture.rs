//! Normalization of wheel and touch events into scroll directions
//!
//! Wheel: winit reports a positive vertical delta when content should move
//! down (the wheel rolled away from the user is negative). A negative delta
//! therefore means "scroll down the page", which is the forward direction.
//!
//! Touch: a finger moving up the screen (its Y shrinking relative to where it
//! started) is forward. The start Y is captured per touch id on
//! `TouchPhase::Started` and forgotten on `Ended` or `Cancelled`.

use std::collections::HashMap;

use winit::event::{MouseScrollDelta, Touch, TouchPhase};

/// Direction a gesture sample points in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward the next slide
    Forward,
    /// Toward the previous slide
    Backward,
}

/// Turns raw wheel and touch events into [`ScrollDirection`] samples
#[derive(Debug, Default)]
pub struct GestureNormalizer {
    touch_starts: HashMap<u64, f64>,
}

impl GestureNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a wheel event
    ///
    /// Returns `None` when the event has no vertical component.
    pub fn wheel(&self, delta: MouseScrollDelta) -> Option<ScrollDirection> {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        Self::classify(-dy)
    }

    /// Classify a winit touch event
    pub fn touch(&mut self, touch: &Touch) -> Option<ScrollDirection> {
        self.touch_sample(touch.id, touch.phase, touch.location.y)
    }

    /// Classify one touch sample by id, phase and vertical position
    ///
    /// Only `Moved` samples produce a direction, and only for touches whose
    /// start was observed.
    pub fn touch_sample(&mut self, id: u64, phase: TouchPhase, y: f64) -> Option<ScrollDirection> {
        match phase {
            TouchPhase::Started => {
                self.touch_starts.insert(id, y);
                None
            }
            TouchPhase::Moved => {
                let Some(&start_y) = self.touch_starts.get(&id) else {
                    log::trace!("Touch {} moved without a start sample", id);
                    return None;
                };
                Self::classify(start_y - y)
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touch_starts.remove(&id);
                None
            }
        }
    }

    /// Number of touches currently being tracked
    pub fn active_touches(&self) -> usize {
        self.touch_starts.len()
    }

    /// Positive is forward, negative is backward, zero carries no direction
    fn classify(forward_amount: f64) -> Option<ScrollDirection> {
        if forward_amount > 0.0 {
            Some(ScrollDirection::Forward)
        } else if forward_amount < 0.0 {
            Some(ScrollDirection::Backward)
        } else {
            None
        }
    }
}
