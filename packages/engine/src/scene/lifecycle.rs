/// Delay between the last resize notification and the actual resize
pub const RESIZE_DEBOUNCE_MS: i32 = 100;

/// What the frame loop owner should do after a visibility change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Start,
    Stop,
    Unchanged,
}

/// Runs the loop only while the canvas intersects the viewport and the
/// document is visible.
#[derive(Clone, Debug, Default)]
pub struct AnimationGate {
    intersecting: bool,
    document_hidden: bool,
    animating: bool,
}

impl AnimationGate {
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_intersecting(&mut self, intersecting: bool) -> Transition {
        self.intersecting = intersecting;
        if intersecting && !self.document_hidden {
            self.start()
        } else if !intersecting {
            self.stop()
        } else {
            Transition::Unchanged
        }
    }

    /// Visibility only matters while the canvas is on screen
    pub fn set_document_hidden(&mut self, hidden: bool) -> Transition {
        self.document_hidden = hidden;
        if !self.intersecting {
            return Transition::Unchanged;
        }
        if hidden {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn stop(&mut self) -> Transition {
        if self.animating {
            self.animating = false;
            Transition::Stop
        } else {
            Transition::Unchanged
        }
    }

    fn start(&mut self) -> Transition {
        if self.animating {
            Transition::Unchanged
        } else {
            self.animating = true;
            Transition::Start
        }
    }
}

/// Latest-wins debounce: every request supersedes earlier ones, and only
/// the newest token fires.
#[derive(Clone, Debug, Default)]
pub struct ResizeDebounce {
    generation: u64,
    pending: bool,
}

impl ResizeDebounce {
    pub fn request(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        self.generation
    }

    /// True exactly once, for the newest outstanding token
    pub fn fire(&mut self, token: u64) -> bool {
        if self.pending && token == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Frame clock fed with `performance.now()` milliseconds
#[derive(Clone, Debug, Default)]
pub struct Clock {
    running: bool,
    old_ms: f64,
}

impl Clock {
    pub fn start(&mut self, now_ms: f64) {
        self.running = true;
        self.old_ms = now_ms;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Seconds since the previous call (0 on the call that starts the clock)
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        if !self.running {
            self.start(now_ms);
            return 0.0;
        }
        let delta = ((now_ms - self.old_ms) / 1000.0).max(0.0);
        self.old_ms = now_ms;
        delta
    }
}
