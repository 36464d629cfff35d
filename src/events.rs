//! Publish point for controller squeeze changes.
//!
//! Publishing only queues the event. The scene drains the queue right after
//! the input that produced it and hands each event to a snapshot of the
//! listeners, so a listener added while an event is delivered starts with the
//! next event.

use std::collections::VecDeque;

use crate::{input::InputHandle, objects::ObjectId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SqueezeEvent {
    pub input: InputHandle,
    pub pressed: bool,
}

/// Who reacts to squeeze events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqueezeListener {
    /// Resolves the mesh under the pointer and grabs its object on press.
    Grab,
    /// Releases the object once its grabbing input lets go.
    Release(ObjectId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug)]
pub struct EventStream<E, L> {
    queue: VecDeque<E>,
    listeners: Vec<(SubscriptionId, L)>,
    next_id: u64,
}

impl<E, L: Copy> EventStream<E, L> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn publish(&mut self, event: E) {
        self.queue.push_back(event);
    }

    pub fn next_event(&mut self) -> Option<E> {
        self.queue.pop_front()
    }

    pub fn subscribe(&mut self, listener: L) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Listeners in subscription order, detached from the stream.
    pub fn listeners(&self) -> Vec<(SubscriptionId, L)> {
        self.listeners.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.listeners.clear();
    }
}

impl<E, L: Copy> Default for EventStream<E, L> {
    fn default() -> Self {
        Self::new()
    }
}

pub type SqueezeStream = EventStream<SqueezeEvent, SqueezeListener>;
