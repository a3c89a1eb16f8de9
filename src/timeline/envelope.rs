/// Opacity envelope of a scene: fade in, hold, fade out.
///
/// All ramps are linear in frame space and saturate outside their domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FadeEnvelope {
    pub duration: u64,
    pub fade_in: u64,
    /// `0` disables the fade-out ramp entirely.
    pub fade_out: u64,
}

impl FadeEnvelope {
    pub fn new(duration: u64, fade_in: u64, fade_out: u64) -> Self {
        Self {
            duration,
            fade_in,
            fade_out,
        }
    }

    /// First local frame of the fade-out ramp.
    ///
    /// Never earlier than `fade_in + 1`, so the hold phase cannot go negative.
    pub fn fade_out_start(&self) -> Option<u64> {
        if self.fade_out == 0 {
            return None;
        }
        Some(
            self.fade_in
                .saturating_add(1)
                .max(self.duration.saturating_sub(self.fade_out)),
        )
    }

    pub fn opacity(&self, local_frame: u64) -> f64 {
        if let Some(start) = self.fade_out_start() {
            if local_frame >= self.duration {
                return 0.0;
            }
            if local_frame >= start {
                // duration > local_frame >= start, so the span is non-zero.
                let span = self.duration - start;
                return (self.duration - local_frame) as f64 / span as f64;
            }
        }

        if local_frame < self.fade_in {
            return local_frame as f64 / self.fade_in as f64;
        }
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_phase_shape() {
        let env = FadeEnvelope::new(105, 12, 12);
        assert_eq!(env.fade_out_start(), Some(93));
        assert_eq!(env.opacity(0), 0.0);
        assert_eq!(env.opacity(6), 0.5);
        assert_eq!(env.opacity(12), 1.0);
        assert_eq!(env.opacity(60), 1.0);
        assert_eq!(env.opacity(93), 1.0);
        assert!((env.opacity(104) - 1.0 / 12.0).abs() < 1e-12);
        assert_eq!(env.opacity(105), 0.0);
    }

    #[test]
    fn zero_fade_out_holds_until_the_end() {
        let env = FadeEnvelope::new(90, 12, 0);
        assert_eq!(env.fade_out_start(), None);
        for f in 12..90 {
            assert_eq!(env.opacity(f), 1.0);
        }
    }

    #[test]
    fn zero_fade_in_starts_opaque() {
        let env = FadeEnvelope::new(30, 0, 10);
        assert_eq!(env.opacity(0), 1.0);
        assert_eq!(env.fade_out_start(), Some(20));
    }

    #[test]
    fn fade_out_start_never_precedes_fade_in_end() {
        let env = FadeEnvelope::new(20, 12, 12);
        assert_eq!(env.fade_out_start(), Some(13));
        assert_eq!(env.opacity(12), 1.0);
        assert_eq!(env.opacity(13), 1.0);
        assert!(env.opacity(19) < env.opacity(14));
    }

    #[test]
    fn short_scene_never_reaches_the_ramp() {
        let env = FadeEnvelope::new(5, 12, 12);
        assert_eq!(env.fade_out_start(), Some(13));
        assert!((env.opacity(4) - 4.0 / 12.0).abs() < 1e-12);
        assert_eq!(env.opacity(5), 0.0);
    }
}
