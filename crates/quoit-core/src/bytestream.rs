/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The codecs talk to their input through [`QReader`] and to
//! their output through [`QWriter`], both of which are generic over
//! the traits in this module so that in memory buffers and
//! std sinks can be used interchangeably.
pub use reader::{QByteIoError, QCursor, QReader};
pub use traits::*;
pub use writer::QWriter;

mod reader;
mod traits;
mod writer;
