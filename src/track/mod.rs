//! The shared time track: positions, turn order, and event scanning.

mod progress;

pub use progress::{ProgressTrack, TrackEntry};
