#[path = "core/feed.rs"]
pub mod feed;

#[path = "core/grid.rs"]
pub mod grid;

#[path = "core/prng.rs"]
pub mod prng;

#[cfg(feature = "std")]
#[path = "core/stats.rs"]
pub mod stats;

#[cfg(feature = "std")]
#[path = "core/ticker.rs"]
pub mod ticker;

pub mod observer;
