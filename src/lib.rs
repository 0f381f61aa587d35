#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

extern crate alloc;

mod utils;

mod entry;
pub use entry::Entry;

mod error;
pub use error::{Result, WindowError};

mod timestamp;
pub use timestamp::Timestamp;

mod window_max;
pub use window_max::WindowMax;

mod timed_max;
pub use timed_max::TimedMax;
