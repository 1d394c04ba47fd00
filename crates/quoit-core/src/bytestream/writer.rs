/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{QByteIoError, QByteWriterTrait};

mod sinks;
mod std_writer;

/// Encapsulates a simple Byte writer with
/// support for Endian aware writes
pub struct QWriter<T: QByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: QByteWriterTrait> QWriter<T> {
    /// Create a new writer for the sink
    pub fn new(data: T) -> QWriter<T> {
        QWriter {
            buffer:        data,
            bytes_written: 0
        }
    }
    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use quoit_core::bytestream::QWriter;
    /// let mut sink = vec![];
    /// let mut stream = QWriter::new(&mut sink);
    /// stream.write_u8_err(3).unwrap();
    /// assert_eq!(stream.bytes_written(), 1);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }
    /// Write a single byte into the sink or error out
    /// if there is not enough space
    #[inline(always)]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), QByteIoError> {
        self.write_const_bytes(&[byte])
    }
    /// Write a u32 as a big endian integer, returning an error
    /// if the underlying sink cannot support a 4 byte write.
    #[inline]
    pub fn write_u32_be_err(&mut self, value: u32) -> Result<(), QByteIoError> {
        self.write_const_bytes(&value.to_be_bytes())
    }
    /// Write a u64 as a big endian integer, returning an error
    /// if the underlying sink cannot support an 8 byte write.
    #[inline]
    pub fn write_u64_be_err(&mut self, value: u64) -> Result<(), QByteIoError> {
        self.write_const_bytes(&value.to_be_bytes())
    }
    #[inline(always)]
    pub fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), QByteIoError> {
        self.buffer.write_const_bytes(buf)?;
        self.bytes_written += N;
        Ok(())
    }
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), QByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }
    pub fn flush(&mut self) -> Result<(), QByteIoError> {
        self.buffer.flush_bytes()
    }
    /// Forward a size hint to the sink
    pub fn reserve(&mut self, size: usize) -> Result<(), QByteIoError> {
        self.buffer.reserve_capacity(size)
    }
}
