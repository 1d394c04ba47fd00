/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding Quite Ok Image format
//!
//! [Format Specification](https://qoiformat.org/qoi-specification.pdf)
//!
//! A 14 byte header, a stream of byte aligned chunks describing each
//! pixel relative to the previous one or to a 64 slot history of
//! recent pixels, then an 8 byte end marker.
//!
//! # Features
//! - Decoding and encoding
//! - `no_std`
//! - Fuzz tested
//!
//! ## `no_std`
//! You can use `no_std` with alloc feature to compile for `no_std` endpoints
//!
//! # Example
//! ```
//! let pixels = [10, 20, 30, 255].repeat(16);
//!
//! let encoded = quoit_qoi::encode(&pixels, 4, 4, 4, 0).unwrap();
//! let (header, decoded) = quoit_qoi::decode(&encoded).unwrap();
//!
//! assert_eq!((header.width, header.height), (4, 4));
//! assert_eq!(decoded, pixels);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

use alloc::vec::Vec;

pub use cache::PixelCache;
pub use chunk::ChunkKind;
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use header::{decode_header, encode_header, Header};
pub use pixel::Pixel;
use quoit_core::bytestream::QCursor;
use quoit_core::colorspace::Channels;
use quoit_core::options::EncoderOptions;
pub use quoit_core;

mod cache;
mod chunk;
mod constants;
mod decoder;
mod encoder;
mod errors;
mod header;
mod pixel;

/// Decode a complete QOI image held in memory
///
/// Returns the header and the pixels as RGBA, four bytes per pixel,
/// `width * height` pixels in row major order.
///
/// This uses the default [`DecoderOptions`](quoit_core::options::DecoderOptions),
/// use [`QoiDecoder`] for limits or strict mode.
///
/// # Errors
/// - [`QoiErrors::TruncatedHeader`] if `bytes` is shorter than 14 bytes
/// - [`QoiErrors::WrongMagicBytes`] if the stream does not start with `qoif`
/// - [`QoiErrors::TruncatedStream`] if the chunks end before every pixel
///   was produced
pub fn decode(bytes: &[u8]) -> Result<(Header, Vec<u8>), QoiErrors> {
    let mut decoder = QoiDecoder::new(QCursor::new(bytes));

    let pixels = decoder.decode()?;
    let header = decoder.decode_headers()?;

    Ok((header, pixels))
}

/// Encode RGBA pixels into a QOI image
///
/// `pixels` must hold exactly `width * height * 4` bytes, whatever
/// `channels` is. With `channels == 3` alpha is ignored and stored as
/// 255. `colorspace` is written to the header untouched.
///
/// # Errors
/// - [`QoiEncodeErrors::BufferSizeMismatch`] if `pixels` has the wrong length
/// - [`QoiEncodeErrors::UnsupportedChannels`] if `channels` is not 3 or 4
pub fn encode(
    pixels: &[u8], width: u32, height: u32, channels: u8, colorspace: u8
) -> Result<Vec<u8>, QoiEncodeErrors> {
    let channels = Channels::from_byte(channels).ok_or(QoiEncodeErrors::UnsupportedChannels(channels))?;

    let options = EncoderOptions::default()
        .set_width(width as usize)
        .set_height(height as usize)
        .set_channels(channels)
        .set_colorspace(colorspace);
    let mut encoder = QoiEncoder::new(pixels, options);

    let mut output = Vec::new();
    encoder.encode(&mut output)?;

    Ok(output)
}

/// Read only the header of a QOI image
///
/// Nothing past the first 14 bytes is looked at, so this is a cheap
/// way to learn the dimensions before committing to a decode.
///
/// # Errors
/// Same as [`decode_header`]
pub fn read_header(bytes: &[u8]) -> Result<Header, QoiErrors> {
    decode_header(bytes)
}
