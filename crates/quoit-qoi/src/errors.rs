/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding.
use core::fmt::{Debug, Display, Formatter};

use quoit_core::bytestream::QByteIoError;

/// Possible Errors that may occur during decoding
pub enum QoiErrors {
    /// The image does not start with QOI magic bytes `qoif`
    ///
    /// Indicates that image is not a qoi file
    WrongMagicBytes,
    /// Fewer than the 14 header bytes were present
    ///
    /// The argument is the number of bytes actually found
    TruncatedHeader(usize),
    /// The chunk stream ran out before every pixel was reconstructed
    ///
    /// # Arguments
    /// - 1st argument is the number of pixels the header promised
    /// - 2nd argument is the number of pixels produced before the stream ended
    TruncatedStream(usize, usize),
    /// The header contains an invalid channel number
    ///
    /// The only supported types are `3` and `4`, this is only
    /// reported in strict mode
    UnknownChannels(u8),
    /// A header dimension exceeds the limit configured in the options
    ///
    /// # Arguments
    /// - which dimension, `"width"` or `"height"`
    /// - the dimension found in the header
    /// - the configured limit
    TooLargeDimensions(&'static str, usize, usize),
    /// The bytes after the last chunk are not `00 00 00 00 00 00 00 01`
    ///
    /// Only reported in strict mode
    InvalidEndMarker,
    /// To small output size
    ///
    /// # Arguments
    /// - bytes needed
    /// - bytes provided
    TooSmallOutput(usize, usize),
    IoErrors(QByteIoError)
}

impl Debug for QoiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoiErrors::WrongMagicBytes => {
                writeln!(f, "Wrong magic bytes, expected `qoif` as image start")
            }
            QoiErrors::TruncatedHeader(found) => {
                writeln!(f, "Truncated header, expected 14 bytes but found {found}")
            }
            QoiErrors::TruncatedStream(expected, found) => {
                writeln!(
                    f,
                    "Truncated stream, expected {expected} pixels but data ended after {found}"
                )
            }
            QoiErrors::UnknownChannels(channel) => {
                writeln!(
                    f,
                    "Unknown channel number {channel}, expected either 3 or 4"
                )
            }
            QoiErrors::TooLargeDimensions(dimension, found, limit) => {
                writeln!(
                    f,
                    "Image {dimension} {found} greater than max configured {dimension} {limit}"
                )
            }
            QoiErrors::InvalidEndMarker => {
                writeln!(f, "Last bytes do not match QOI end marker")
            }
            QoiErrors::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            QoiErrors::IoErrors(value) => {
                writeln!(f, "I/O error {:?}", value)
            }
        }
    }
}

impl From<QByteIoError> for QoiErrors {
    fn from(value: QByteIoError) -> Self {
        QoiErrors::IoErrors(value)
    }
}

/// Errors encountered during encoding
pub enum QoiEncodeErrors {
    /// The pixel buffer is not `width * height * 4` bytes
    ///
    /// # Arguments
    /// - bytes expected
    /// - bytes given
    BufferSizeMismatch(usize, usize),
    /// The channel count is neither 3 nor 4
    UnsupportedChannels(u8),
    /// Too large dimensions
    /// The dimensions cannot be correctly encoded to a width
    TooLargeDimensions(usize),

    IoError(QByteIoError)
}

impl Debug for QoiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoiEncodeErrors::BufferSizeMismatch(expected, found) => {
                writeln!(
                    f,
                    "Pixel buffer has {found} bytes but the dimensions need {expected}"
                )
            }
            QoiEncodeErrors::UnsupportedChannels(found) => {
                writeln!(
                    f,
                    "Cannot encode image with {found} channels into QOI, supported ones are 3 and 4"
                )
            }
            QoiEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, QOI can only encode images less than {}",
                    u32::MAX
                )
            }
            QoiEncodeErrors::IoError(v) => {
                writeln!(f, "I/O error {:?}", v)
            }
        }
    }
}

impl Display for QoiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}
impl Display for QoiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QoiEncodeErrors {}

#[cfg(feature = "std")]
impl std::error::Error for QoiErrors {}

impl From<QByteIoError> for QoiEncodeErrors {
    fn from(value: QByteIoError) -> Self {
        Self::IoError(value)
    }
}
