//! Error types and result extensions for lorekeeper operations

mod builders;
mod code;
mod conversions;
mod display;
mod extensions;
mod types;

pub use code::ErrorCode;
pub use extensions::*;
pub use types::{Error, Result};
