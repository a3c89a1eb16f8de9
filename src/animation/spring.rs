use crate::{animation::ease::Easing, foundation::core::Fps};

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub damping: f64,
    pub mass: f64,
    pub stiffness: f64,
    /// Never report a value past the target.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    // Upper bound on |1 - position| from `secs` onward.
    fn deviation_bound(&self, secs: f64) -> f64 {
        let mass = self.mass.max(1e-9);
        let stiffness = self.stiffness.max(1e-9);
        let zeta = self.damping.max(0.0) / (2.0 * (stiffness * mass).sqrt());
        let omega0 = (stiffness / mass).sqrt();
        if zeta < 1.0 {
            (-zeta * omega0 * secs).exp() / (1.0 - zeta * zeta).sqrt()
        } else {
            (-omega0 * secs).exp() * (1.0 + omega0 * secs)
        }
    }

    /// Position after `secs` seconds, starting at rest at 0 and pulled toward 1.
    pub fn position_at(&self, secs: f64) -> f64 {
        if secs <= 0.0 {
            return 0.0;
        }

        let mass = self.mass.max(1e-9);
        let stiffness = self.stiffness.max(1e-9);
        let zeta = self.damping.max(0.0) / (2.0 * (stiffness * mass).sqrt());
        let omega0 = (stiffness / mass).sqrt();
        let x0 = 1.0;

        let pos = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * secs).exp();
            1.0 - envelope
                * ((zeta * omega0 * x0 / omega1) * (omega1 * secs).sin()
                    + x0 * (omega1 * secs).cos())
        } else {
            // Critically damped response; overdamped springs settle no faster.
            let envelope = (-omega0 * secs).exp();
            1.0 - envelope * (x0 + omega0 * x0 * secs)
        };

        if self.overshoot_clamping {
            pos.min(1.0)
        } else {
            pos
        }
    }
}

/// Distance from the target never exceeds this after the spring settles.
pub const SETTLE_THRESHOLD: f64 = 0.005;

// Ten minutes of frames; undamped springs never settle.
const MEASURE_CAP_SECS: f64 = 600.0;

/// Frames until the spring stays within `threshold` of its target.
pub fn measure_spring(fps: Fps, config: SpringConfig, threshold: f64) -> u64 {
    let cap = (fps.as_f64() * MEASURE_CAP_SECS).ceil() as u64;
    let mut last_outside = 0u64;
    for f in 0..=cap {
        let secs = fps.frames_to_secs(f);
        if (1.0 - config.position_at(secs)).abs() >= threshold {
            last_outside = f;
        } else if config.deviation_bound(secs) < threshold {
            return last_outside + 1;
        }
    }
    cap
}

/// Spring progress at `frame`, 0 before the spring starts.
///
/// `frame` is signed so callers can delay a spring with `frame - delay`.
pub fn spring(frame: i64, fps: Fps, config: SpringConfig) -> f64 {
    if frame <= 0 {
        return 0.0;
    }
    config.position_at(fps.frames_to_secs(frame as u64))
}

/// Like [`spring`], with time stretched so the spring settles at `duration_frames`.
///
/// Measures the spring on every call; build a [`StretchedSpring`] once when
/// sampling many frames.
pub fn spring_over(frame: i64, fps: Fps, config: SpringConfig, duration_frames: u64) -> f64 {
    StretchedSpring::new(fps, config, duration_frames).at(frame)
}

/// A spring retimed to settle at a fixed frame, measured once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchedSpring {
    config: SpringConfig,
    fps: Fps,
    duration_frames: u64,
    natural_frames: u64,
}

impl StretchedSpring {
    pub fn new(fps: Fps, config: SpringConfig, duration_frames: u64) -> Self {
        let natural_frames = if duration_frames == 0 {
            0
        } else {
            measure_spring(fps, config, SETTLE_THRESHOLD)
        };
        Self {
            config,
            fps,
            duration_frames,
            natural_frames,
        }
    }

    /// Frames the unstretched spring takes to settle.
    pub fn natural_frames(&self) -> u64 {
        self.natural_frames
    }

    pub fn at(&self, frame: i64) -> f64 {
        if frame <= 0 {
            return 0.0;
        }
        if self.duration_frames == 0 {
            return 1.0;
        }
        let stretched =
            frame as f64 * self.natural_frames as f64 / self.duration_frames as f64;
        self.config.position_at(stretched / self.fps.as_f64())
    }
}

/// A spring used as an [`Easing`] over a fixed duration.
///
/// Progress `t` maps to `t * duration_secs` of spring time; `t >= 1` reports
/// the settled value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringEasing {
    pub config: SpringConfig,
    pub duration_secs: f64,
}

impl SpringEasing {
    pub fn new(config: SpringConfig, duration_secs: f64) -> Self {
        Self {
            config,
            duration_secs,
        }
    }
}

impl Easing for SpringEasing {
    fn ease(&self, t: f64) -> f64 {
        if t >= 1.0 {
            return 1.0;
        }
        self.config.position_at(t.max(0.0) * self.duration_secs)
    }
}
