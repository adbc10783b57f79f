//! Rate limiting implementations

mod in_memory;
mod limiter;

pub use in_memory::InMemoryRateWindowStore;
pub use limiter::SlidingWindowLimiter;
