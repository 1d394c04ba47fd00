/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

pub use cursor::QCursor;

use crate::bytestream::QByteReaderTrait;

mod cursor;

/// Errors raised by the byte stream layer
pub enum QByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// requested, available
    NotEnoughBytes(usize, usize),
    /// requested, space left
    NotEnoughBuffer(usize, usize)
}

impl core::fmt::Debug for QByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            QByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            QByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            QByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
        }
    }
}

impl core::fmt::Display for QByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for QByteIoError {
    fn from(value: std::io::Error) -> Self {
        QByteIoError::StdIoError(value)
    }
}

/// Endian aware reader over any [`QByteReaderTrait`] source
pub struct QReader<T: QByteReaderTrait> {
    inner: T
}

impl<T: QByteReaderTrait> QReader<T> {
    pub fn new(source: T) -> QReader<T> {
        QReader { inner: source }
    }
    #[inline(always)]
    pub fn read_u8_err(&mut self) -> Result<u8, QByteIoError> {
        self.inner.read_byte()
    }
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], QByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes(&mut byte_store)?;
        Ok(byte_store)
    }
    /// Read a u32 as a big endian integer
    /// returning an error if the source cannot support a 4 byte read.
    #[inline]
    pub fn get_u32_be_err(&mut self) -> Result<u32, QByteIoError> {
        self.read_fixed_bytes_or_error::<4>().map(u32::from_be_bytes)
    }
    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, QByteIoError> {
        self.inner.is_eof()
    }
    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, QByteIoError> {
        self.inner.q_position()
    }
    #[inline(always)]
    pub fn remaining(&mut self) -> Result<usize, QByteIoError> {
        self.inner.remaining()
    }
}
