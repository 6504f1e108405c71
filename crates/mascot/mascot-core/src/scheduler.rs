//! Priority scheduler for the mascot's animation states.
//!
//! One state is current at any time. Requests with a lower priority than the
//! current state are parked in a deferred map (one slot per state, last
//! request wins) and the best of them is promoted when the current state
//! expires back to idle. All waiting is expressed as timers owned by the
//! scheduler; the host drives time with [`Scheduler::advance`].

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{SchedulerConfig, StateConfig};
use crate::ids::TimerId;
use crate::math::{look_rotation, slerp_quat, sub3, Quat, Vec3, UP};
use crate::motion;
use crate::outputs::{EventLog, SchedulerEvent};
use crate::pose::PoseTarget;
use crate::state::AnimationState;
use crate::timers::{Timer, TimerKind, TimerQueue};
use crate::Result;

/// Options for [`Scheduler::request_state`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Play immediately regardless of the current state's priority.
    #[serde(default)]
    pub skip_queue: bool,
}

impl RequestOptions {
    pub const SKIP_QUEUE: RequestOptions = RequestOptions { skip_queue: true };
}

/// A deferred request, or the current state's pending auto-expiry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledAnimation {
    pub state: AnimationState,
    pub config: StateConfig,
    pub scheduled_at_ms: f64,
    pub timer: Option<TimerId>,
}

#[derive(Clone, Copy, Debug)]
struct ActiveMotion {
    state: AnimationState,
    started_ms: f64,
    duration_ms: f64,
}

#[derive(Clone, Copy, Debug)]
struct LookAtTween {
    from: Quat,
    to: Quat,
    started_ms: f64,
    duration_ms: f64,
}

#[derive(Debug)]
pub struct Scheduler<T: PoseTarget> {
    cfg: SchedulerConfig,
    target: T,
    now_ms: f64,
    current: AnimationState,
    /// Entry for `current` while its auto-expiry timer is armed.
    active: Option<ScheduledAnimation>,
    /// Insertion-ordered so priority ties resolve to the oldest request.
    deferred: IndexMap<AnimationState, ScheduledAnimation>,
    timers: TimerQueue,
    blink_timer: Option<TimerId>,
    motion: Option<ActiveMotion>,
    breathing: bool,
    look_at: Option<LookAtTween>,
    rng: StdRng,
    returning_to_idle: bool,
    disposed: bool,
    events: EventLog,
}

impl<T: PoseTarget> Scheduler<T> {
    /// Create a scheduler in `idle`. An invalid config is replaced by the
    /// defaults (keeping `reduced_motion` and `seed`) with a warning.
    pub fn new(target: T, cfg: SchedulerConfig) -> Self {
        let cfg = match cfg.validate() {
            Ok(()) => cfg,
            Err(err) => {
                log::warn!("{err}; falling back to the default scheduler config");
                SchedulerConfig {
                    reduced_motion: cfg.reduced_motion,
                    seed: cfg.seed,
                    ..SchedulerConfig::default()
                }
            }
        };
        Self::build(target, cfg)
    }

    /// Like [`Scheduler::new`] but rejects an invalid config.
    pub fn try_new(target: T, cfg: SchedulerConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::build(target, cfg))
    }

    fn build(target: T, cfg: SchedulerConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut scheduler = Self {
            breathing: !cfg.reduced_motion,
            cfg,
            target,
            now_ms: 0.0,
            current: AnimationState::Idle,
            active: None,
            deferred: IndexMap::new(),
            timers: TimerQueue::new(),
            blink_timer: None,
            motion: None,
            look_at: None,
            rng,
            returning_to_idle: false,
            disposed: false,
            events: EventLog::default(),
        };
        scheduler.arm_blink();
        scheduler
    }

    #[inline]
    pub fn current_state(&self) -> AnimationState {
        self.current
    }

    /// Request `state`. Never fails: disposed schedulers and reduced-motion
    /// requests for anything but idle are ignored.
    pub fn request_state(&mut self, state: AnimationState, opts: RequestOptions) {
        if self.disposed {
            log::debug!("ignoring request for {state}: scheduler disposed");
            return;
        }
        if self.cfg.reduced_motion && state != AnimationState::Idle {
            log::debug!("ignoring request for {state}: reduced motion");
            return;
        }

        let config = *self.cfg.states.get(state);
        let current_priority = self.cfg.states.get(self.current).priority;
        if !opts.skip_queue && config.priority < current_priority {
            self.defer(state, config);
            return;
        }
        self.activate(state, config);
    }

    /// String entry point for hosts. Unknown names are logged and ignored.
    pub fn request_named(&mut self, name: &str, opts: RequestOptions) {
        match name.parse::<AnimationState>() {
            Ok(state) => self.request_state(state, opts),
            Err(err) => log::warn!("{err}"),
        }
    }

    fn defer(&mut self, state: AnimationState, config: StateConfig) {
        // last request wins and moves to the back of the tie-break order
        self.deferred.shift_remove(&state);
        self.deferred.insert(
            state,
            ScheduledAnimation {
                state,
                config,
                scheduled_at_ms: self.now_ms,
                timer: None,
            },
        );
        log::debug!("deferred {state} behind {}", self.current);
        self.events.push(SchedulerEvent::Deferred {
            state,
            current: self.current,
            at_ms: self.now_ms,
        });
    }

    fn activate(&mut self, state: AnimationState, config: StateConfig) {
        self.cancel_active();
        self.deferred.shift_remove(&state);
        let previous = std::mem::replace(&mut self.current, state);

        if self.motion.take().is_some() {
            self.target.reset_pose();
        }
        if state == AnimationState::Idle {
            self.target.reset_pose();
            self.breathing = !self.cfg.reduced_motion;
        } else {
            self.breathing = false;
            if state.has_motion() {
                self.target.apply_motion(state, 0.0);
                self.motion = Some(ActiveMotion {
                    state,
                    started_ms: self.now_ms,
                    duration_ms: config.duration_ms,
                });
            }
        }

        self.active = config.expiry_ms().map(|timeout| ScheduledAnimation {
            state,
            config,
            scheduled_at_ms: self.now_ms,
            timer: Some(
                self.timers
                    .arm(self.now_ms + timeout, TimerKind::Expiry(state)),
            ),
        });

        log::debug!("{previous} -> {state} at {}ms", self.now_ms);
        self.events.push(SchedulerEvent::Started {
            state,
            previous,
            at_ms: self.now_ms,
        });
    }

    fn cancel_active(&mut self) {
        if let Some(timer) = self.active.take().and_then(|a| a.timer) {
            self.timers.cancel(timer);
        }
    }

    /// End the current state: reset the pose, go idle, then promote the best
    /// deferred request (or start breathing if there is none).
    pub fn return_to_idle(&mut self) {
        if self.disposed {
            return;
        }
        debug_assert!(!self.returning_to_idle, "return_to_idle re-entered");
        self.returning_to_idle = true;

        self.cancel_active();
        let expired = std::mem::replace(&mut self.current, AnimationState::Idle);
        self.motion = None;
        self.target.reset_pose();
        if expired != AnimationState::Idle {
            self.events.push(SchedulerEvent::Expired {
                state: expired,
                at_ms: self.now_ms,
            });
        }

        match self.take_best_deferred() {
            Some(next) => {
                log::debug!("promoting deferred {}", next.state);
                self.events.push(SchedulerEvent::Promoted {
                    state: next.state,
                    at_ms: self.now_ms,
                });
                self.request_state(next.state, RequestOptions::SKIP_QUEUE);
            }
            None => {
                self.breathing = !self.cfg.reduced_motion;
            }
        }

        self.returning_to_idle = false;
    }

    /// Highest priority wins; ties go to the earliest inserted entry.
    fn take_best_deferred(&mut self) -> Option<ScheduledAnimation> {
        let mut best: Option<(usize, i32)> = None;
        for (idx, entry) in self.deferred.values().enumerate() {
            if best.map_or(true, |(_, priority)| entry.config.priority > priority) {
                best = Some((idx, entry.config.priority));
            }
        }
        let (idx, _) = best?;
        self.deferred.shift_remove_index(idx).map(|(_, entry)| entry)
    }

    fn arm_blink(&mut self) {
        if self.disposed || self.cfg.reduced_motion {
            return;
        }
        let interval = self.cfg.blink_interval_ms;
        let delay = if interval.max_ms > interval.min_ms {
            self.rng.gen_range(interval.min_ms..interval.max_ms)
        } else {
            interval.min_ms
        };
        self.blink_timer = Some(self.timers.arm(self.now_ms + delay, TimerKind::Blink));
    }

    /// Turn the head toward `point` over `look_at_duration_ms`. Runs alongside
    /// whatever state is current; a new call replaces an unfinished tween.
    /// Non-finite points are ignored.
    pub fn look_at(&mut self, point: Vec3) {
        if self.disposed || self.cfg.reduced_motion || !point.iter().all(|v| v.is_finite()) {
            return;
        }
        let head = self.target.head_world_position();
        let Some(to) = look_rotation(sub3(point, head), UP) else {
            return;
        };
        self.look_at = Some(LookAtTween {
            from: self.target.head_rotation(),
            to,
            started_ms: self.now_ms,
            duration_ms: self.cfg.look_at_duration_ms,
        });
    }

    /// Advance the scheduler clock by `dt_ms`, firing due timers in order and
    /// then stepping motion, breathing and look-at for the frame.
    pub fn advance(&mut self, dt_ms: f64) {
        if self.disposed || !dt_ms.is_finite() || dt_ms < 0.0 {
            return;
        }
        let until = self.now_ms + dt_ms;
        while let Some(timer) = self.timers.pop_due(until) {
            self.now_ms = self.now_ms.max(timer.deadline_ms);
            self.fire(timer);
        }
        self.now_ms = until;
        self.step_frame();
    }

    fn fire(&mut self, timer: Timer) {
        match timer.kind {
            TimerKind::Expiry(state) => {
                let owns = self.active.and_then(|a| a.timer) == Some(timer.id);
                if !owns {
                    log::warn!("stale expiry timer for {state} ignored");
                    return;
                }
                self.active = None;
                self.return_to_idle();
            }
            TimerKind::Blink => {
                self.blink_timer = None;
                self.request_state(AnimationState::Blink, RequestOptions::default());
                self.arm_blink();
            }
        }
    }

    fn step_frame(&mut self) {
        if let Some(active) = self.motion {
            let elapsed = (self.now_ms - active.started_ms).max(0.0);
            let progress = (elapsed / active.duration_ms).min(1.0) as f32;
            self.target.apply_motion(active.state, progress);
            if progress >= 1.0 {
                self.target.reset_pose();
                self.motion = None;
            }
        }

        if self.breathing && self.current == AnimationState::Idle {
            let t_secs = (self.now_ms / 1000.0) as f32;
            self.target
                .set_breath(motion::breath_scale(&self.cfg.breath, t_secs));
        }

        if let Some(tween) = self.look_at {
            let elapsed = (self.now_ms - tween.started_ms).max(0.0);
            let progress = (elapsed / tween.duration_ms).min(1.0) as f32;
            self.target
                .set_head_rotation(slerp_quat(tween.from, tween.to, progress));
            if progress >= 1.0 {
                self.look_at = None;
            }
        }
    }

    /// Cancel every timer and stop all frame work. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timers.clear();
        self.blink_timer = None;
        self.active = None;
        self.deferred.clear();
        self.motion = None;
        self.breathing = false;
        self.look_at = None;
        self.disposed = true;
        self.events.push(SchedulerEvent::Disposed { at_ms: self.now_ms });
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Scheduler clock in milliseconds since construction.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Deferred states in tie-break order.
    pub fn deferred_states(&self) -> Vec<AnimationState> {
        self.deferred.keys().copied().collect()
    }

    pub fn deferred(&self, state: AnimationState) -> Option<&ScheduledAnimation> {
        self.deferred.get(&state)
    }

    /// Entry for the current state while its auto-expiry is pending.
    #[inline]
    pub fn active(&self) -> Option<&ScheduledAnimation> {
        self.active.as_ref()
    }

    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn is_breathing(&self) -> bool {
        self.breathing && self.current == AnimationState::Idle
    }

    #[inline]
    pub fn is_looking(&self) -> bool {
        self.look_at.is_some()
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        self.events.drain()
    }
}
