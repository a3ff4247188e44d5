//! Filesystem adapters for scratch scripts and published models.
//!
//! `LocalFilesystem` backs real renders; `MemoryFilesystem` lets tests
//! drive the render protocol without touching disk.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
