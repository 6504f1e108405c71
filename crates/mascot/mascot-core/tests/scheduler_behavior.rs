mod common;

use common::{approx, fixture_config, RecordingTarget};
use mascot_core::math::{rotate3, QUAT_IDENTITY};
use mascot_core::{
    AnimationState, Pose, PoseTarget, RequestOptions, RigPart, Scheduler, SchedulerConfig,
    SchedulerEvent,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use AnimationState::*;

fn quiet() -> Scheduler<RecordingTarget> {
    Scheduler::new(RecordingTarget::default(), fixture_config("quiet"))
}

fn request(s: &mut Scheduler<impl PoseTarget>, state: AnimationState) {
    s.request_state(state, RequestOptions::default());
}

/// it should auto-expire a transient state back to idle after its timeout
#[test]
fn wave_expires_after_timeout() {
    let mut s = quiet();
    request(&mut s, Wave);
    assert_eq!(s.current_state(), Wave);
    s.advance(1199.0);
    assert_eq!(s.current_state(), Wave);
    s.advance(1.0);
    assert_eq!(s.current_state(), Idle);
}

/// it should drop a preempted state instead of resuming it
#[test]
fn preempted_state_never_resumes() {
    let mut s = quiet();
    request(&mut s, Wave);
    request(&mut s, Surprised);
    s.advance(2000.0);
    assert_eq!(s.current_state(), Idle);
    s.advance(5000.0);
    assert_eq!(s.current_state(), Idle);
    assert!(s.deferred_states().is_empty());
}

#[test]
fn wave_preempts_smile_and_runs_its_own_timeout() {
    let mut s = quiet();
    request(&mut s, Smile);
    s.advance(100.0);
    request(&mut s, Wave);
    assert_eq!(s.current_state(), Wave);
    s.advance(1199.0);
    assert_eq!(s.current_state(), Wave);
    s.advance(1.0);
    assert_eq!(s.current_state(), Idle);
    assert!(s.deferred_states().is_empty());
}

/// it should play a lower-priority request immediately with skip_queue
#[test]
fn skip_queue_bypasses_priority() {
    let mut s = quiet();
    request(&mut s, Surprised);
    request(&mut s, Smile);
    assert_eq!(s.deferred_states(), vec![Smile]);

    s.request_state(Smile, RequestOptions::SKIP_QUEUE);
    assert_eq!(s.current_state(), Smile);
    // a state is never deferred while current
    assert!(s.deferred_states().is_empty());
    // surprised's expiry was cancelled: smile lasts its own 2000ms
    s.advance(1999.0);
    assert_eq!(s.current_state(), Smile);
    s.advance(1.0);
    assert_eq!(s.current_state(), Idle);
}

/// it should fire chained expiries inside a single large step
#[test]
fn chained_expiry_in_one_advance() {
    let mut s = quiet();
    request(&mut s, Wave);
    request(&mut s, Smile);
    s.advance(5000.0);
    assert_eq!(s.current_state(), Idle);

    let events = s.drain_events();
    let expired: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SchedulerEvent::Expired { state, at_ms } => Some((*state, *at_ms)),
            _ => None,
        })
        .collect();
    assert_eq!(expired, vec![(Wave, 1200.0), (Smile, 3200.0)]);
}

#[test]
fn events_describe_deferral_and_promotion() {
    let mut s = quiet();
    request(&mut s, Wave);
    request(&mut s, Smile);
    s.advance(1200.0);
    assert_eq!(
        s.drain_events(),
        vec![
            SchedulerEvent::Started {
                state: Wave,
                previous: Idle,
                at_ms: 0.0
            },
            SchedulerEvent::Deferred {
                state: Smile,
                current: Wave,
                at_ms: 0.0
            },
            SchedulerEvent::Expired {
                state: Wave,
                at_ms: 1200.0
            },
            SchedulerEvent::Promoted {
                state: Smile,
                at_ms: 1200.0
            },
            SchedulerEvent::Started {
                state: Smile,
                previous: Idle,
                at_ms: 1200.0
            },
        ]
    );
    assert!(s.drain_events().is_empty());
}

/// it should promote the best deferred request on an explicit return to idle
#[test]
fn explicit_return_to_idle_promotes() {
    let mut s = quiet();
    request(&mut s, Surprised);
    request(&mut s, Smile);
    request(&mut s, Wave);
    s.return_to_idle();
    assert_eq!(s.current_state(), Wave);
    assert_eq!(s.deferred_states(), vec![Smile]);
    assert!(s.target().resets >= 1);
}

#[test]
fn unknown_names_are_ignored() {
    let mut s = quiet();
    s.request_named("dance", RequestOptions::default());
    assert_eq!(s.current_state(), Idle);
    assert!(s.drain_events().is_empty());

    s.request_named("look-at", RequestOptions::default());
    assert_eq!(s.current_state(), LookAt);
}

/// it should make no pose-target calls once disposed
#[test]
fn dispose_silences_everything() {
    let mut s = quiet();
    request(&mut s, Wave);
    request(&mut s, Smile);
    s.advance(100.0);
    s.dispose();
    let calls = s.target().calls();

    s.advance(10_000.0);
    request(&mut s, Surprised);
    s.request_state(Shy, RequestOptions::SKIP_QUEUE);
    s.look_at([3.0, 0.0, 1.0]);
    s.return_to_idle();
    s.dispose();

    assert!(s.is_disposed());
    assert_eq!(s.current_state(), Wave);
    assert_eq!(s.target().calls(), calls);
    assert_eq!(s.pending_timers(), 0);
    assert!(s.deferred_states().is_empty());
    let disposed = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SchedulerEvent::Disposed { .. }))
        .count();
    assert_eq!(disposed, 1);
}

#[test]
fn reduced_motion_is_idle_only() {
    let mut s = Scheduler::new(RecordingTarget::default(), fixture_config("reduced-motion"));
    for state in AnimationState::ALL {
        s.request_state(state, RequestOptions::SKIP_QUEUE);
        assert_eq!(s.current_state(), Idle);
    }
    s.look_at([1.0, 1.0, 1.0]);
    s.advance(20_000.0);
    assert_eq!(s.current_state(), Idle);
    assert!(s.target().breaths.is_empty());
    assert!(s.target().motions.is_empty());
    assert_eq!(s.target().head_sets, 0);
}

/// it should blink on the configured interval and re-arm after each blink
#[test]
fn blink_fires_and_rearms() {
    let mut s = Scheduler::new(RecordingTarget::default(), fixture_config("fast-blink"));
    s.advance(999.0);
    assert_eq!(s.current_state(), Idle);
    s.advance(1.0);
    assert_eq!(s.current_state(), Blink);
    s.advance(300.0);
    assert_eq!(s.current_state(), Idle);
    s.advance(700.0);
    assert_eq!(s.current_state(), Blink);
}

/// it should defer an involuntary blink behind a higher-priority state
#[test]
fn blink_waits_behind_wave() {
    let mut s = Scheduler::new(RecordingTarget::default(), fixture_config("fast-blink"));
    request(&mut s, Wave);
    s.advance(1000.0);
    assert_eq!(s.current_state(), Wave);
    assert_eq!(s.deferred_states(), vec![Blink]);
    s.advance(200.0);
    assert_eq!(s.current_state(), Blink);
    s.advance(300.0);
    assert_eq!(s.current_state(), Idle);
}

fn first_blink_ms(seed: u64) -> f64 {
    let mut s = Scheduler::new(
        RecordingTarget::default(),
        SchedulerConfig::default().with_seed(seed),
    );
    while s.now_ms() < 10_000.0 {
        s.advance(10.0);
        let blinked = s.drain_events().into_iter().find_map(|e| match e {
            SchedulerEvent::Started {
                state: Blink,
                at_ms,
                ..
            } => Some(at_ms),
            _ => None,
        });
        if let Some(at) = blinked {
            return at;
        }
    }
    panic!("no blink within 10s");
}

#[test]
fn seeded_blink_interval_is_deterministic() {
    let a = first_blink_ms(11);
    assert_eq!(a, first_blink_ms(11));
    assert!((3000.0..6000.0).contains(&a), "first blink at {a}");
}

/// it should run a motion curve from 0 to 1 and reset the pose at the end
#[test]
fn motion_progress_and_reset() {
    let mut s = quiet();
    request(&mut s, Smile);
    assert_eq!(s.target().motions_for(Smile), vec![0.0]);
    let resets = s.target().resets;

    s.advance(300.0);
    s.advance(300.0);
    s.advance(100.0);
    let progress = s.target().motions_for(Smile);
    assert_eq!(progress.len(), 3);
    approx(progress[1], 0.5);
    approx(progress[2], 1.0);
    assert_eq!(s.target().resets, resets + 1);
    // smile stays current until its 2000ms timeout
    assert_eq!(s.current_state(), Smile);
}

#[test]
fn preempting_a_motion_restores_rest_pose_first() {
    let mut s = Scheduler::new(Pose::default(), fixture_config("quiet"));
    request(&mut s, Smile);
    s.advance(300.0);
    assert!(s.target().part(RigPart::Mouth).scale[0] > 1.2);

    request(&mut s, Wave);
    assert_eq!(s.target().part(RigPart::Mouth), s.target().rest(RigPart::Mouth));
}

#[test]
fn idle_breathes_and_transients_do_not() {
    let mut s = quiet();
    s.advance(1000.0);
    assert_eq!(s.target().breaths.len(), 1);
    approx(s.target().breaths[0], 1.0 + (1.5f32).sin() * 0.03);

    request(&mut s, Wave);
    s.advance(500.0);
    assert_eq!(s.target().breaths.len(), 1);
    assert!(!s.is_breathing());

    s.advance(700.0);
    assert!(s.is_breathing());
}

/// it should slerp the head toward the look-at point over the tween duration
#[test]
fn look_at_converges_on_target() {
    let mut s = Scheduler::new(Pose::default(), fixture_config("quiet"));
    let h = std::f32::consts::FRAC_1_SQRT_2;
    s.look_at([2.5, 0.8, 2.5]);
    assert!(s.is_looking());

    s.advance(100.0);
    let halfway = rotate3(s.target().head_rotation(), [0.0, 0.0, 1.0]);
    let quarter = std::f32::consts::FRAC_PI_8;
    approx(halfway[0], quarter.sin());
    approx(halfway[2], quarter.cos());

    s.advance(100.0);
    let facing = rotate3(s.target().head_rotation(), [0.0, 0.0, 1.0]);
    approx(facing[0], h);
    approx(facing[1], 0.0);
    approx(facing[2], h);
    assert!(!s.is_looking());
}

#[test]
fn look_at_replaces_unfinished_tween() {
    let mut s = quiet();
    s.look_at([5.0, 0.8, 0.0]);
    s.advance(100.0);
    let mid = s.target().head_rotation;
    assert_ne!(mid, QUAT_IDENTITY);

    s.look_at([0.0, 0.8, 5.0]);
    s.advance(200.0);
    let facing = rotate3(s.target().head_rotation, [0.0, 0.0, 1.0]);
    approx(facing[2], 1.0);
}

#[test]
fn look_at_own_head_is_ignored() {
    let mut s = quiet();
    s.look_at([0.0, 0.8, 0.0]);
    assert!(!s.is_looking());
}

#[test]
fn look_at_non_finite_point_is_ignored() {
    let mut s = quiet();
    s.look_at([f32::NAN, 0.0, 1.0]);
    s.look_at([0.0, f32::INFINITY, 1.0]);
    assert!(!s.is_looking());
    s.advance(250.0);
    assert_eq!(s.target().head_sets, 0);
    assert!(s.target().head_rotation.iter().all(|v| v.is_finite()));
}

#[test]
fn custom_priorities_from_fixture() {
    let mut s = Scheduler::new(RecordingTarget::default(), fixture_config("custom-priorities"));
    assert_eq!(s.config().look_at_duration_ms, 120.0);

    request(&mut s, Surprised);
    request(&mut s, Smile);
    assert_eq!(s.current_state(), Smile);
    s.advance(800.0);
    assert_eq!(s.current_state(), Idle);

    // looping wave never auto-expires
    request(&mut s, Wave);
    s.advance(60_000.0);
    assert_eq!(s.current_state(), Wave);
    assert!(s.active().is_none());
}

/// it should keep its invariants under arbitrary request/advance sequences
#[test]
fn invariants_hold_under_random_traffic() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut s = Scheduler::new(
        RecordingTarget::default(),
        SchedulerConfig::default().with_seed(5),
    );
    for _ in 0..2000 {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let state = AnimationState::ALL[rng.gen_range(0..AnimationState::ALL.len())];
                let opts = RequestOptions {
                    skip_queue: rng.gen_bool(0.2),
                };
                s.request_state(state, opts);
            }
            2 => s.advance(rng.gen_range(0.0..2500.0)),
            _ => s.look_at([rng.gen_range(-3.0..3.0), 1.0, 2.0]),
        }

        let deferred = s.deferred_states();
        assert!(!deferred.contains(&s.current_state()));
        let mut unique = deferred.clone();
        unique.sort_by_key(|st| st.as_str());
        unique.dedup();
        assert_eq!(unique.len(), deferred.len());
        // at most the blink timer plus one expiry
        assert!(s.pending_timers() <= 2);
        if let Some(active) = s.active() {
            assert_eq!(active.state, s.current_state());
        }
    }
}
