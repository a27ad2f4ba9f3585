//! Core types describing what gets built and where.

pub mod layout;
pub mod platform;
pub mod target;

pub use layout::Layout;
pub use platform::Platform;
pub use target::Target;
