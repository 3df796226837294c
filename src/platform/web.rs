//! Browser scheduler backed by `setInterval` and `requestAnimationFrame`

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameTask, Scheduler, Task, TaskId, retire_stopped};

enum Handle {
    Interval {
        handle: i32,
        _closure: Closure<dyn FnMut()>,
    },
    /// Frame loops stop themselves once the flag clears
    Frame(Rc<Cell<bool>>),
}

#[derive(Default)]
pub struct BrowserScheduler {
    next_id: u32,
    handles: HashMap<TaskId, Handle>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }
}

fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn release_later(closure: Closure<dyn FnMut(f64)>) {
    let Some(window) = web_sys::window() else {
        closure.forget();
        return;
    };
    let release = Closure::once_into_js(move || drop(closure));
    if window
        .set_timeout_with_callback(release.unchecked_ref())
        .is_err()
    {
        log::warn!("setTimeout unavailable, frame loop closure leaked");
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_repeating(&mut self, interval_ms: u32, mut task: Task) -> TaskId {
        let id = self.allocate();
        let closure = Closure::<dyn FnMut()>::new(move || task());
        let handle = web_sys::window()
            .and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    interval_ms as i32,
                )
                .ok()
            })
            .unwrap_or_else(|| {
                log::error!("setInterval unavailable, task {:?} will not run", id);
                -1
            });
        self.handles.insert(
            id,
            Handle::Interval {
                handle,
                _closure: closure,
            },
        );
        id
    }

    fn schedule_frame(&mut self, mut task: FrameTask) -> TaskId {
        let id = self.allocate();
        let alive = Rc::new(Cell::new(true));

        // Self-rescheduling rAF loop
        let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let next = slot.clone();
        let running = alive.clone();
        *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if !running.get() {
                // Still executing, so the drop waits for the next turn
                if let Some(closure) = retire_stopped(&running, &next) {
                    release_later(closure);
                }
                return;
            }
            task(time);
            if let Some(closure) = next.borrow().as_ref() {
                request_animation_frame(closure);
            }
        }));
        if let Some(closure) = slot.borrow().as_ref() {
            request_animation_frame(closure);
        }

        self.handles.insert(id, Handle::Frame(alive));
        id
    }

    fn cancel(&mut self, id: TaskId) {
        match self.handles.remove(&id) {
            Some(Handle::Interval { handle, .. }) => {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
            Some(Handle::Frame(alive)) => alive.set(false),
            None => log::warn!("Cancel for unknown task {:?}", id),
        }
    }
}
