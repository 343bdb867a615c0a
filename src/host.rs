//! What the animator needs from its environment besides a canvas: a frame
//! scheduler and a resize notification source.

/// Handle of a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Display-refresh driven host. The host calls `Animator::on_frame` when a
/// requested frame fires and `Animator::notify_resize` when the watched
/// surface changes size.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn watch_resize(&mut self) -> ListenerId;
    fn unwatch_resize(&mut self, id: ListenerId);
}

impl<H: FrameHost + ?Sized> FrameHost for &mut H {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }

    fn watch_resize(&mut self) -> ListenerId {
        (**self).watch_resize()
    }

    fn unwatch_resize(&mut self, id: ListenerId) {
        (**self).unwatch_resize(id)
    }
}

/// Host driven by hand: records every request and cancellation. Used by the
/// window preview loop and by tests.
#[derive(Debug, Default, Clone)]
pub struct ManualHost {
    next: u64,
    pending: Vec<FrameHandle>,
    listeners: Vec<ListenerId>,
    pub requested: usize,
    pub cancelled: usize,
    pub unwatched: usize,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame callbacks requested and not yet fired or cancelled.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Take the oldest pending frame, as the display would when it fires.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled += 1;
    }

    fn watch_resize(&mut self) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.listeners.push(id);
        id
    }

    fn unwatch_resize(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
        self.unwatched += 1;
    }
}
