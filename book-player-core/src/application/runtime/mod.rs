mod navigation_queue;

pub use navigation_queue::{NavigationQueue, QueueError};
