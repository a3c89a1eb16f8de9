use proptest::prelude::*;
use scenereel::{FadeEnvelope, FrameIndex, SceneSpec, Timeline, active_scenes};

fn timeline_strategy() -> impl Strategy<Value = Timeline> {
    prop::collection::vec((0u64..500, 1u64..300, 0u64..40, 0u64..40), 0..6).prop_map(|specs| {
        let scenes = specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, dur, fade_in, fade_out))| {
                SceneSpec::new(format!("s{i}"), start, dur)
                    .with_fade_in(fade_in)
                    .with_fade_out(fade_out)
            })
            .collect();
        Timeline::new(scenes).unwrap()
    })
}

proptest! {
    #[test]
    fn frames_outside_every_window_have_no_scenes(t in timeline_strategy(), frame in 0u64..1000) {
        let f = FrameIndex(frame);
        let inside = t.scenes.iter().any(|s| s.window().contains(f));
        prop_assert_eq!(active_scenes(&t, f).is_empty(), !inside);
    }

    #[test]
    fn active_scenes_are_ordered_and_local(t in timeline_strategy(), frame in 0u64..1000) {
        let active = active_scenes(&t, FrameIndex(frame));
        prop_assert!(active.windows(2).all(|w| w[0].index < w[1].index));
        for a in &active {
            prop_assert_eq!(a.scene.start_frame.0 + a.local_frame.0, frame);
            prop_assert!(a.local_frame.0 < a.scene.duration_in_frames);
            prop_assert!((0.0..=1.0).contains(&a.opacity));
        }
    }

    #[test]
    fn evaluation_is_idempotent(t in timeline_strategy(), frame in 0u64..1000) {
        prop_assert_eq!(active_scenes(&t, FrameIndex(frame)), active_scenes(&t, FrameIndex(frame)));
    }

    #[test]
    fn zero_fade_out_holds_full_opacity(dur in 1u64..300, fade_in in 0u64..40) {
        let env = FadeEnvelope::new(dur, fade_in, 0);
        for local in fade_in..dur {
            prop_assert_eq!(env.opacity(local), 1.0);
        }
    }

    #[test]
    fn fade_ramps_are_monotonic(dur in 1u64..300, fade_in in 0u64..40, fade_out in 0u64..40) {
        let env = FadeEnvelope::new(dur, fade_in, fade_out);

        let fade_in_end = fade_in.min(dur - 1);
        for f in 0..fade_in_end {
            prop_assert!(env.opacity(f) <= env.opacity(f + 1));
        }

        if let Some(start) = env.fade_out_start() {
            for f in start..dur {
                prop_assert!(env.opacity(f + 1) <= env.opacity(f));
            }
        }
    }
}

#[test]
fn single_scene_envelope_matches_reference_values() {
    let t = Timeline::new(vec![SceneSpec::new("hook", 0, 105)]).unwrap();
    let opacity = |f: u64| active_scenes(&t, FrameIndex(f))[0].opacity;

    assert_eq!(opacity(0), 0.0);
    assert_eq!(opacity(12), 1.0);
    assert_eq!(opacity(93), 1.0);
    assert!(opacity(94) < 1.0);
    assert!((opacity(104) - 0.0833).abs() < 1e-3);
    assert!(opacity(104) > 0.0);
    assert!(active_scenes(&t, FrameIndex(105)).is_empty());
}

#[test]
fn overlapping_scenes_crossfade() {
    // Second scene opens 5 frames before the first one's nominal end (90).
    let t = Timeline::new(vec![
        SceneSpec::new("first", 0, 90),
        SceneSpec::new("second", 85, 90),
    ])
    .unwrap();

    for f in 86..90 {
        let active = active_scenes(&t, FrameIndex(f));
        assert_eq!(active.len(), 2, "frame {f}");
        assert!(active.iter().all(|a| a.opacity > 0.0), "frame {f}");
        assert!(active[0].opacity < 1.0 && active[1].opacity < 1.0);
    }

    // The incoming scene starts fully transparent at its first frame.
    let first_frame = active_scenes(&t, FrameIndex(85));
    assert_eq!(first_frame[1].opacity, 0.0);
    assert!(first_frame[0].opacity > 0.0);
}
