/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the quoit codecs
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Channel layout information shared by images
//! - Decoder and encoder options
//! - A logging shim that forwards to the `log` crate when enabled
//!
//! This library is `#[no_std]` with `alloc`.
//!
//! # Features
//!  - `std`: Enables `std::error::Error` impls and `BufWriter` sinks.
//!
//!  - `log`: Forward the logging macros to the [`log`](https://docs.rs/log) crate.
//!     Without it, they compile to nothing
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod log;
pub mod options;
mod serde;
