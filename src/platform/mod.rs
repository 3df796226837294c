//! Platform abstraction layer
//!
//! The simulation never touches timers directly. Hosts provide a `Scheduler`:
//! the browser backs it with `setInterval`/`requestAnimationFrame`, tests and
//! the native binary with `ManualScheduler`, a fake clock advanced by hand.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::sim::{GameSession, Snapshot};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u32);

/// Fixed-interval callback
pub type Task = Box<dyn FnMut()>;
/// Per-frame callback, receives the frame timestamp in milliseconds
pub type FrameTask = Box<dyn FnMut(f64)>;

pub trait Scheduler {
    /// Run `task` every `interval_ms`, first run one interval from now
    fn schedule_repeating(&mut self, interval_ms: u32, task: Task) -> TaskId;
    /// Run `task` once per rendered frame
    fn schedule_frame(&mut self, task: FrameTask) -> TaskId;
    fn cancel(&mut self, id: TaskId);
}

/// Take a cancelled frame loop's callback out of its own slot
///
/// A self-rescheduling callback holds a clone of the slot it lives in, which
/// is a reference cycle until the callback is removed.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn retire_stopped<C>(alive: &Cell<bool>, slot: &RefCell<Option<C>>) -> Option<C> {
    if alive.get() {
        None
    } else {
        slot.borrow_mut().take()
    }
}

struct Repeating {
    id: TaskId,
    interval_ms: f64,
    next_due: f64,
    task: Task,
}

/// Deterministic scheduler driven by `advance`
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: f64,
    next_id: u32,
    repeating: Vec<Repeating>,
    frames: Vec<(TaskId, FrameTask)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move time forward, firing due timers in order, then one frame
    pub fn advance(&mut self, ms: f64) {
        let target = self.now_ms + ms.max(0.0);
        loop {
            let next = self
                .repeating
                .iter_mut()
                .filter(|r| r.next_due <= target)
                .min_by(|a, b| {
                    a.next_due
                        .partial_cmp(&b.next_due)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.id.0.cmp(&b.id.0))
                });
            let Some(timer) = next else { break };
            self.now_ms = timer.next_due;
            timer.next_due += timer.interval_ms;
            (timer.task)();
        }
        self.now_ms = target;

        let now = self.now_ms;
        for (_, frame) in &mut self.frames {
            frame(now);
        }
    }

    /// Render `count` frames of `frame_ms` each
    pub fn run_frames(&mut self, count: u32, frame_ms: f64) {
        for _ in 0..count {
            self.advance(frame_ms);
        }
    }

    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval_ms: u32, task: Task) -> TaskId {
        let id = self.allocate();
        let interval_ms = f64::from(interval_ms.max(1));
        self.repeating.push(Repeating {
            id,
            interval_ms,
            next_due: self.now_ms + interval_ms,
            task,
        });
        id
    }

    fn schedule_frame(&mut self, task: FrameTask) -> TaskId {
        let id = self.allocate();
        self.frames.push((id, task));
        id
    }

    fn cancel(&mut self, id: TaskId) {
        self.repeating.retain(|r| r.id != id);
        self.frames.retain(|(frame_id, _)| *frame_id != id);
    }
}

/// Wire a session to a scheduler
///
/// The simulation ticks on a fixed interval; `render` receives a fresh
/// snapshot every frame. Returns the task handles so the host can stop it.
pub fn drive<S: Scheduler>(
    session: Rc<RefCell<GameSession>>,
    scheduler: &mut S,
    mut render: impl FnMut(&Snapshot) + 'static,
) -> Vec<TaskId> {
    let tick_ms = session.borrow().config().tick_ms;

    let sim = session.clone();
    let tick_task = scheduler.schedule_repeating(
        tick_ms,
        Box::new(move || {
            let mut session = sim.borrow_mut();
            if !session.is_over() {
                session.tick();
            }
        }),
    );

    let frame_task = scheduler.schedule_frame(Box::new(move |_time| {
        let snapshot = session.borrow().snapshot();
        render(&snapshot);
    }));

    vec![tick_task, frame_task]
}
