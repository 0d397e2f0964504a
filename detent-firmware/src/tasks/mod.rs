//! Embassy async tasks

pub mod edge;

pub use edge::edge_capture_task;
