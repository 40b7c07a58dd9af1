/// Handle to a pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Display-refresh callback source (the host's `requestAnimationFrame`).
pub trait FrameScheduler {
    /// Request one callback on the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending request. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: the host calls [`ManualScheduler::fire`] to emulate a refresh.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending request, returning `true` if a callback is due.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.requested += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
