//! Frame-driven property interpolation.
//!
//! Scene layouts drive opacity, scale and position from the local frame by
//! mapping it through a piecewise-linear curve. Ranges are checked once when an
//! [`Interpolation`] is built; sampling itself cannot fail.

use crate::{
    animation::ease::{Ease, Easing},
    foundation::core::Vec2,
    foundation::error::{ReelError, ReelResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Behavior outside the input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Continue the outermost segment's slope.
    #[default]
    Extend,
    /// Saturate to the nearest endpoint value.
    Clamp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    pub left: Extrapolate,
    pub right: Extrapolate,
    /// Curve applied within each segment.
    pub ease: Ease,
}

impl InterpolateOpts {
    pub fn clamped() -> Self {
        Self {
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
            ease: Ease::Linear,
        }
    }

    pub fn clamp_right() -> Self {
        Self {
            right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Piecewise-linear map from a strictly increasing input range to values.
///
/// Deserializing runs the same checks as [`Interpolation::new`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct Interpolation<T> {
    input: Vec<f64>,
    output: Vec<T>,
    opts: InterpolateOpts,
}

#[derive(serde::Deserialize)]
struct InterpolationRaw<T> {
    input: Vec<f64>,
    output: Vec<T>,
    #[serde(default)]
    opts: InterpolateOpts,
}

impl<'de, T> serde::Deserialize<'de> for Interpolation<T>
where
    T: Lerp + Clone + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <InterpolationRaw<T> as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(raw.input, raw.output, raw.opts).map_err(serde::de::Error::custom)
    }
}

impl<T> Interpolation<T>
where
    T: Lerp + Clone,
{
    pub fn new(
        input: impl Into<Vec<f64>>,
        output: impl Into<Vec<T>>,
        opts: InterpolateOpts,
    ) -> ReelResult<Self> {
        let input = input.into();
        let output = output.into();

        if input.len() < 2 {
            return Err(ReelError::validation(
                "interpolation input range needs at least 2 points",
            ));
        }
        if input.len() != output.len() {
            return Err(ReelError::validation(format!(
                "interpolation input range has {} points but output range has {}",
                input.len(),
                output.len()
            )));
        }
        if input.iter().any(|x| !x.is_finite()) {
            return Err(ReelError::validation(
                "interpolation input range must be finite",
            ));
        }
        if !input.windows(2).all(|w| w[0] < w[1]) {
            return Err(ReelError::validation(
                "interpolation input range must be strictly increasing",
            ));
        }

        Ok(Self {
            input,
            output,
            opts,
        })
    }

    pub fn sample(&self, x: f64) -> T {
        self.sample_with(x, &self.opts.ease)
    }

    /// Sample using `easing` inside segments instead of the configured [`Ease`].
    pub fn sample_with(&self, x: f64, easing: &dyn Easing) -> T {
        let last = self.input.len() - 1;
        let seg = self
            .input
            .partition_point(|v| *v <= x)
            .saturating_sub(1)
            .min(last - 1);

        let (x0, x1) = (self.input[seg], self.input[seg + 1]);
        let t = (x - x0) / (x1 - x0);

        let t = if t < 0.0 {
            match self.opts.left {
                Extrapolate::Clamp => return self.output[0].clone(),
                Extrapolate::Extend => t,
            }
        } else if t > 1.0 {
            match self.opts.right {
                Extrapolate::Clamp => return self.output[last].clone(),
                Extrapolate::Extend => t,
            }
        } else {
            easing.ease(t)
        };

        T::lerp(&self.output[seg], &self.output[seg + 1], t)
    }
}

/// Two-point [`Interpolation`] that accepts any range.
///
/// A degenerate input range (`x0 >= x1`) acts as a step at `x0`.
pub fn interpolate(x: f64, input: (f64, f64), output: (f64, f64), opts: InterpolateOpts) -> f64 {
    let (x0, x1) = input;
    let (y0, y1) = output;
    if x1 <= x0 {
        return if x < x0 { y0 } else { y1 };
    }

    let t = (x - x0) / (x1 - x0);
    let t = if t < 0.0 {
        match opts.left {
            Extrapolate::Clamp => 0.0,
            Extrapolate::Extend => t,
        }
    } else if t > 1.0 {
        match opts.right {
            Extrapolate::Clamp => 1.0,
            Extrapolate::Extend => t,
        }
    } else {
        opts.ease.apply(t)
    };
    f64::lerp(&y0, &y1, t)
}
