#![forbid(unsafe_code)]

//! Deferred per-frame work.
//!
//! Every "on the next paint" step of a drag is a [`FrameTask`] in a FIFO
//! queue. Queuing asks the host for a frame; `Sortable::on_frame` then runs
//! the batch that was queued before it started. Tasks queued while the batch
//! runs land in the next frame, which is what makes the autoscroll and snap
//! ticks self-rescheduling rather than recursive.

use std::collections::VecDeque;

use sortkit_core::SortHost;

/// One unit of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameTask {
    /// Re-measure and pin the pressed item.
    StartDrag,
    /// Recompute the target after the item came back into the list.
    ReenterBounds,
    /// Apply one autoscroll step.
    Autoscroll,
    /// Build the snap animation toward the placeholder.
    SnapStart,
    /// Advance the snap animation.
    SnapTick,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FrameQueue {
    tasks: VecDeque<FrameTask>,
}

impl FrameQueue {
    pub(crate) fn push<H: SortHost + ?Sized>(&mut self, task: FrameTask, host: &mut H) {
        self.tasks.push_back(task);
        host.request_frame();
    }

    /// Queue `task` unless it is already waiting. Returns whether it was added.
    pub(crate) fn push_unique<H: SortHost + ?Sized>(&mut self, task: FrameTask, host: &mut H) -> bool {
        if self.contains(task) {
            return false;
        }
        self.push(task, host);
        true
    }

    pub(crate) fn contains(&self, task: FrameTask) -> bool {
        self.tasks.contains(&task)
    }

    /// Drop every queued instance of `task`.
    pub(crate) fn cancel(&mut self, task: FrameTask) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|queued| *queued != task);
        self.tasks.len() != before
    }

    /// Take the batch for the current frame.
    pub(crate) fn take_batch(&mut self) -> Vec<FrameTask> {
        self.tasks.drain(..).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.tasks.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn pending(&self) -> impl Iterator<Item = FrameTask> + '_ {
        self.tasks.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortkit_core::Size;
    use sortkit_harness::SimHost;

    #[test]
    fn push_requests_a_frame() {
        let mut host = SimHost::new(Size::new(10.0, 10.0));
        let mut queue = FrameQueue::default();
        queue.push(FrameTask::StartDrag, &mut host);
        assert!(host.take_frame_request());
        assert!(queue.contains(FrameTask::StartDrag));
    }

    #[test]
    fn push_unique_deduplicates() {
        let mut host = SimHost::new(Size::new(10.0, 10.0));
        let mut queue = FrameQueue::default();
        assert!(queue.push_unique(FrameTask::ReenterBounds, &mut host));
        assert!(!queue.push_unique(FrameTask::ReenterBounds, &mut host));
        assert_eq!(host.frame_requests(), 1);
    }

    #[test]
    fn batch_is_fifo_and_empties_queue() {
        let mut host = SimHost::new(Size::new(10.0, 10.0));
        let mut queue = FrameQueue::default();
        queue.push(FrameTask::Autoscroll, &mut host);
        queue.push(FrameTask::SnapStart, &mut host);
        assert!(queue.cancel(FrameTask::Autoscroll));
        queue.push(FrameTask::Autoscroll, &mut host);

        assert_eq!(
            queue.take_batch(),
            vec![FrameTask::SnapStart, FrameTask::Autoscroll]
        );
        assert!(queue.is_empty());
    }
}
