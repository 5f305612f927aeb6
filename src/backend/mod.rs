//! Built-in filesystem backends.
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`OsFs`] | The real filesystem via `std::fs` |
//! | [`MemoryFs`] | A shared in-memory tree for tests |

mod memory;
mod os;

pub use memory::MemoryFs;
pub use os::OsFs;
