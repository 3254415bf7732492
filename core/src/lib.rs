#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use session::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod layout;
mod session;
mod types;
