mod deque;
pub use deque::Deque;

mod monotonic_queue;
pub use monotonic_queue::MonotonicQueue;
