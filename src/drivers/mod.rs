//! Presentation timing drivers owned by the GUI task.

pub mod indicator;
pub mod timer;
pub mod video;

