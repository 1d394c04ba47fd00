/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use quoit_core::bytestream::{QByteIoError, QByteWriterTrait, QCursor, QReader, QWriter};
use quoit_core::colorspace::Channels;

use crate::constants::{QOI_HEADER_SIZE, QOI_MAGIC};
use crate::errors::QoiErrors;

/// The fixed 14 byte header at the start of every QOI stream
///
/// `channels` and `colorspace` are kept as the raw bytes found in the
/// stream, the codec never needs to interpret `colorspace`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Header {
    pub width:      u32,
    pub height:     u32,
    pub channels:   u8,
    pub colorspace: u8
}

impl Header {
    pub const fn new(width: u32, height: u32, channels: u8, colorspace: u8) -> Header {
        Header {
            width,
            height,
            channels,
            colorspace
        }
    }

    /// `width * height`, or `None` if that does not fit a `usize`
    pub fn pixel_count(&self) -> Option<usize> {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).ok()
    }

    /// The channel layout, if the channel byte is a known one
    pub const fn channels(&self) -> Option<Channels> {
        Channels::from_byte(self.channels)
    }

    /// Serialize this header, see [`encode_header`]
    pub fn to_bytes(&self) -> [u8; QOI_HEADER_SIZE] {
        encode_header(self.width, self.height, self.channels, self.colorspace)
    }
}

fn write_header_fields<T: QByteWriterTrait>(
    writer: &mut QWriter<T>, header: &Header
) -> Result<(), QByteIoError> {
    writer.write_const_bytes(&QOI_MAGIC)?;
    writer.write_u32_be_err(header.width)?;
    writer.write_u32_be_err(header.height)?;
    writer.write_u8_err(header.channels)?;
    writer.write_u8_err(header.colorspace)?;
    Ok(())
}

/// Serialize a header: magic, big endian width and height,
/// then the channel and colorspace bytes
///
/// # Panics
/// If the fields do not serialize to exactly 14 bytes. That is a bug
/// in this function, never a property of the input.
pub fn encode_header(width: u32, height: u32, channels: u8, colorspace: u8) -> [u8; QOI_HEADER_SIZE] {
    let header = Header::new(width, height, channels, colorspace);
    let mut bytes = [0; QOI_HEADER_SIZE];

    let mut writer = QWriter::new(&mut bytes[..]);
    let result = write_header_fields(&mut writer, &header);
    let written = writer.bytes_written();

    assert!(
        result.is_ok() && written == QOI_HEADER_SIZE,
        "QOI header serialized to {written} bytes instead of {QOI_HEADER_SIZE}"
    );
    bytes
}

/// Parse the header at the start of `bytes`
///
/// Only the length and the magic are validated, a zero width or height
/// or an unknown channel byte is returned as is.
///
/// # Errors
/// - [`QoiErrors::TruncatedHeader`] if fewer than 14 bytes are present
/// - [`QoiErrors::WrongMagicBytes`] if `bytes` does not start with `qoif`
pub fn decode_header(bytes: &[u8]) -> Result<Header, QoiErrors> {
    if bytes.len() < QOI_HEADER_SIZE {
        return Err(QoiErrors::TruncatedHeader(bytes.len()));
    }
    let mut stream = QReader::new(QCursor::new(bytes));

    let magic = stream.read_fixed_bytes_or_error::<4>()?;

    if magic != QOI_MAGIC {
        return Err(QoiErrors::WrongMagicBytes);
    }

    let width = stream.get_u32_be_err()?;
    let height = stream.get_u32_be_err()?;
    let channels = stream.read_u8_err()?;
    let colorspace = stream.read_u8_err()?;

    Ok(Header::new(width, height, channels, colorspace))
}
