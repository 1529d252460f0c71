//! Shared types and schemas for the fdmenu proxy.
//!
//! Wire types used by both the daemon and the CLI client, the menu error
//! taxonomy, and the static school/meal account-code table.

pub mod error;
pub mod schools;
pub mod types;

pub use error::*;
pub use schools::*;
pub use types::*;
