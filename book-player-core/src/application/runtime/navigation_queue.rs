use crate::domain::Direction;
use crate::traits::NavigationController;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Bounded FIFO of navigation requests
///
/// Activity contexts push into it; the player drains it after each step, so
/// an activity never re-enters the host from inside its own `start`.
#[derive(Debug)]
pub struct NavigationQueue {
    queue: Mutex<VecDeque<Direction>>,
    max_size: usize,
}

impl NavigationQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(max_size)),
            max_size,
        }
    }

    /// Push a request (returns error if full)
    pub fn push(&self, direction: Direction) -> Result<(), QueueError> {
        let mut queue = self.lock();
        if queue.len() >= self.max_size {
            return Err(QueueError::Full { max: self.max_size });
        }
        queue.push_back(direction);
        Ok(())
    }

    /// Pop next request
    pub fn pop(&self) -> Option<Direction> {
        self.lock().pop_front()
    }

    /// Drain all requests (for batch processing)
    pub fn drain(&self) -> Vec<Direction> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Direction>> {
        // A poisoned queue still holds plain data
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn request(&self, direction: Direction) {
        if let Err(e) = self.push(direction) {
            tracing::warn!("Dropping {:?} navigation request: {}", direction, e);
        }
    }
}

impl NavigationController for NavigationQueue {
    fn navigate_to_next_page(&self) {
        self.request(Direction::Forward);
    }

    fn navigate_to_previous_page(&self) {
        self.request(Direction::Backward);
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueueError {
    #[error("Queue is full (max size: {max})")]
    Full { max: usize },
}

impl Default for NavigationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}
