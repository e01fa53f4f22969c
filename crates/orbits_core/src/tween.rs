//! Time-bounded property tweens
//!
//! A [`Tween`] interpolates one numeric property between two values over a
//! fixed duration, shaped by an [`Easing`] curve. A [`Timeline`] holds any
//! number of concurrent tweens and samples them against a clock expressed as
//! a [`Duration`] since application start.
//!
//! Tweens are sampled in creation order. When two tweens drive the same
//! property at once, the caller applies the samples in order and the later
//! tween's value is the one left standing.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized tween progress
///
/// Names follow the `family.direction` convention (`"power1.inOut"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// No shaping
    #[serde(rename = "linear", alias = "none")]
    Linear,
    /// Quadratic acceleration
    #[serde(rename = "power1.in")]
    Power1In,
    /// Quadratic deceleration
    #[default]
    #[serde(rename = "power1.out")]
    Power1Out,
    /// Quadratic acceleration then deceleration
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    /// Exponential acceleration
    #[serde(rename = "expo.in")]
    ExpoIn,
    /// Exponential deceleration
    #[serde(rename = "expo.out")]
    ExpoOut,
    /// Exponential acceleration then deceleration
    #[serde(rename = "expo.inOut")]
    ExpoInOut,
}

impl Easing {
    /// Map progress `t` in [0, 1] to eased progress
    ///
    /// Input outside [0, 1] is clamped. Every curve maps 0 to 0 and 1 to 1.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1In => t * t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Easing::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            Easing::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Canonical name of this curve
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Power1In => "power1.in",
            Easing::Power1Out => "power1.out",
            Easing::Power1InOut => "power1.inOut",
            Easing::ExpoIn => "expo.in",
            Easing::ExpoOut => "expo.out",
            Easing::ExpoInOut => "expo.inOut",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown easing name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEasing(pub String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing '{}'", self.0)
    }
}

impl std::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "none" => Ok(Easing::Linear),
            "power1.in" => Ok(Easing::Power1In),
            "power1.out" => Ok(Easing::Power1Out),
            "power1.inOut" => Ok(Easing::Power1InOut),
            "expo.in" => Ok(Easing::ExpoIn),
            "expo.out" => Ok(Easing::ExpoOut),
            "expo.inOut" => Ok(Easing::ExpoInOut),
            other => Err(UnknownEasing(other.to_string())),
        }
    }
}

/// One interpolation of a property from `from` to `to`
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<P> {
    /// Which property this tween drives
    pub property: P,
    /// Value at the start time
    pub from: f32,
    /// Value once the duration has elapsed
    pub to: f32,
    /// Clock time at which the tween starts
    pub start: Duration,
    /// Length of the interpolation
    pub duration: Duration,
    /// Shape of the interpolation
    pub easing: Easing,
}

impl<P> Tween<P> {
    /// Normalized progress at `now`, clamped to [0, 1]
    ///
    /// A zero-length tween is complete as soon as it starts.
    pub fn progress(&self, now: Duration) -> f32 {
        if now <= self.start {
            return if self.duration.is_zero() && now == self.start {
                1.0
            } else {
                0.0
            };
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = (now - self.start).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated value at `now`
    pub fn value_at(&self, now: Duration) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// True once `now` has reached the end of the tween
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }

    /// Clock time at which the tween ends
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// Collection of concurrently running tweens
#[derive(Clone, Debug)]
pub struct Timeline<P> {
    tweens: Vec<Tween<P>>,
}

impl<P: Copy + PartialEq> Timeline<P> {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self { tweens: Vec::new() }
    }

    /// Append a tween; it is sampled after every tween added before it
    pub fn add(&mut self, tween: Tween<P>) {
        self.tweens.push(tween);
    }

    /// Tween `property` from `current` to the absolute value `target`
    pub fn to(
        &mut self,
        property: P,
        current: f32,
        target: f32,
        start: Duration,
        duration: Duration,
        easing: Easing,
    ) {
        self.add(Tween {
            property,
            from: current,
            to: target,
            start,
            duration,
            easing,
        });
    }

    /// Tween `property` by `delta` relative to `current`
    pub fn by(
        &mut self,
        property: P,
        current: f32,
        delta: f32,
        start: Duration,
        duration: Duration,
        easing: Easing,
    ) {
        self.to(property, current, current + delta, start, duration, easing);
    }

    /// Sample every started tween at `now`, in creation order
    ///
    /// Finished tweens yield their exact end value on the sample that
    /// observes their completion and are then dropped from the timeline.
    pub fn sample(&mut self, now: Duration) -> Vec<(P, f32)> {
        let samples = self
            .tweens
            .iter()
            .filter(|tween| now >= tween.start)
            .map(|tween| (tween.property, tween.value_at(now)))
            .collect();
        self.tweens.retain(|tween| !tween.is_finished(now));
        samples
    }

    /// True if any tween for `property` is still pending
    pub fn is_animating(&self, property: P) -> bool {
        self.tweens.iter().any(|tween| tween.property == property)
    }

    /// Number of tweens not yet finished
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Tweens in creation order
    pub fn tweens(&self) -> &[Tween<P>] {
        &self.tweens
    }
}

impl<P: Copy + PartialEq> Default for Timeline<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::Power1In,
        Easing::Power1Out,
        Easing::Power1InOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
    ];

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Prop {
        A,
        B,
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-3, "{} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{} at 1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{} not monotonic at {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_easing_shapes() {
        assert!(Easing::Power1Out.apply(0.5) > 0.5);
        assert!(Easing::Power1In.apply(0.5) < 0.5);
        assert!((Easing::Power1InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::Power1Out.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_easing_parse_names() {
        for easing in ALL {
            assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
        }
        assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
        assert!("expo.easeOut".parse::<Easing>().is_err());
    }

    #[test]
    fn test_easing_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            ease: Easing,
        }
        let w: Wrapper = ron::from_str("(ease: \"power1.inOut\")").unwrap();
        assert_eq!(w.ease, Easing::Power1InOut);
    }

    #[test]
    fn test_tween_value_progression() {
        let tween = Tween {
            property: Prop::A,
            from: 0.0,
            to: -100.0,
            start: ms(1000),
            duration: ms(500),
            easing: Easing::Linear,
        };
        assert_eq!(tween.value_at(ms(0)), 0.0);
        assert_eq!(tween.value_at(ms(1000)), 0.0);
        assert!((tween.value_at(ms(1250)) + 50.0).abs() < 1e-4);
        assert_eq!(tween.value_at(ms(1500)), -100.0);
        assert_eq!(tween.value_at(ms(9000)), -100.0);
        assert!(tween.is_finished(ms(1500)));
        assert!(!tween.is_finished(ms(1499)));
        assert_eq!(tween.end(), ms(1500));
    }

    #[test]
    fn test_zero_duration_tween_jumps() {
        let tween = Tween {
            property: Prop::A,
            from: 1.0,
            to: 2.0,
            start: ms(10),
            duration: Duration::ZERO,
            easing: Easing::Power1Out,
        };
        assert_eq!(tween.value_at(ms(10)), 2.0);
    }

    #[test]
    fn test_relative_tween_captures_current() {
        let mut timeline = Timeline::new();
        timeline.by(Prop::A, 3.0, 1.5, ms(0), ms(100), Easing::Linear);
        let tween = &timeline.tweens()[0];
        assert_eq!(tween.from, 3.0);
        assert_eq!(tween.to, 4.5);
    }

    #[test]
    fn test_sample_creation_order_later_wins() {
        let mut timeline = Timeline::new();
        timeline.to(Prop::A, 0.0, -400.0, ms(0), ms(500), Easing::Power1InOut);
        timeline.to(Prop::A, -300.0, 0.0, ms(0), ms(500), Easing::Power1InOut);

        let samples = timeline.sample(ms(500));
        assert_eq!(samples.len(), 2);
        // Applying in order leaves the last value
        let final_value = samples
            .iter()
            .filter(|(p, _)| *p == Prop::A)
            .map(|(_, v)| *v)
            .last();
        assert_eq!(final_value, Some(0.0));
    }

    #[test]
    fn test_finished_tweens_emit_once_then_drop() {
        let mut timeline = Timeline::new();
        timeline.to(Prop::A, 0.0, 1.0, ms(0), ms(100), Easing::Linear);
        timeline.to(Prop::B, 0.0, 1.0, ms(0), ms(1000), Easing::Linear);
        assert_eq!(timeline.active_count(), 2);

        let samples = timeline.sample(ms(200));
        assert_eq!(samples, vec![(Prop::A, 1.0), (Prop::B, 0.2)]);
        assert_eq!(timeline.active_count(), 1);
        assert!(!timeline.is_animating(Prop::A));
        assert!(timeline.is_animating(Prop::B));

        let samples = timeline.sample(ms(300));
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].0, Prop::B);
    }

    #[test]
    fn test_future_tween_not_sampled() {
        let mut timeline = Timeline::new();
        timeline.to(Prop::A, 0.0, 1.0, ms(500), ms(100), Easing::Linear);
        assert!(timeline.sample(ms(100)).is_empty());
        assert_eq!(timeline.active_count(), 1);
    }
}
