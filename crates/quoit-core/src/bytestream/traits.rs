/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading and writing images in quoit
//!
//! This exposes the traits implemented by readers and writers
//! used by the quoit decoders and encoders.

use crate::bytestream::reader::QByteIoError;

/// The input trait implemented for readers.
///
/// The decoders only ever need forward reads, so this is
/// intentionally smaller than `Read + Seek`.
pub trait QByteReaderTrait {
    /// Read a single byte or return an error if the input is exhausted
    ///
    /// The implementation should try to be as fast as possible as this is called
    /// once per chunk in the decoder loop.
    fn read_byte(&mut self) -> Result<u8, QByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Errors
    /// In case of an error, the implementation should not increment the internal position
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), QByteIoError>;

    /// Report whether we are at the end of a stream.
    fn is_eof(&mut self) -> Result<bool, QByteIoError>;

    /// Return the current position of the inner cursor.
    fn q_position(&mut self) -> Result<u64, QByteIoError>;

    /// Number of bytes left before the end of the stream
    fn remaining(&mut self) -> Result<usize, QByteIoError>;
}

/// The writer trait implemented for quoit encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded images
pub trait QByteWriterTrait {
    /// Write all bytes to the buffer or return an error if something occurred
    ///
    /// This will always write all bytes, if it can't fully write all bytes, it will
    /// error out
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), QByteIoError>;
    /// Write a fixed number of bytes and error out if we can't write the bytes
    ///
    /// This is provided to allow for optimized writes where possible. (when the compiler can const fold them)
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), QByteIoError>;
    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), QByteIoError>;
    /// A hint to tell the implementation how big of a size we expect the image to be
    ///
    /// This is just a hint, akin to calling `Vec::reserve` and should be treated as such.
    /// If your implementation doesn't support such, e.g mutable slices, it's okay to return
    /// `Ok(())`
    fn reserve_capacity(&mut self, size: usize) -> Result<(), QByteIoError>;
}
