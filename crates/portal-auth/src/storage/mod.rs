//! Persistent cookie slots.

pub mod file;
pub mod memory;

pub use file::FileCookieStorage;
pub use memory::MemoryCookieStorage;
