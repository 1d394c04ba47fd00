/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use quoit_core::bytestream::{QByteIoError, QByteReaderTrait, QReader};
use quoit_core::colorspace::Channels;
use quoit_core::log::{trace, warn};
use quoit_core::options::DecoderOptions;

use crate::chunk::CodecState;
use crate::constants::{QOI_END_MARKER, QOI_HEADER_SIZE, QOI_PADDING};
use crate::errors::QoiErrors;
use crate::{decode_header, ChunkKind, Header, Pixel};

/// Pixels `decode` reserves up front, the output grows past this
/// only as chunks actually produce pixels
const INITIAL_PIXEL_RESERVE: usize = 1 << 20;

/// A Quite OK Image decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode`] to return uncompressed pixels
///
/// Output is always RGBA, four bytes per pixel, whatever the
/// channel byte in the header says.
///
/// [`decode_headers`]:QoiDecoder::decode_headers
/// [`decode`]:QoiDecoder::decode
pub struct QoiDecoder<T>
where
    T: QByteReaderTrait
{
    header:  Option<Header>,
    stream:  QReader<T>,
    options: DecoderOptions
}

impl<T> QoiDecoder<T>
where
    T: QByteReaderTrait
{
    /// Create a new QOI format decoder with the default options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use quoit_core::bytestream::QCursor;
    /// let mut decoder = quoit_qoi::QoiDecoder::new(QCursor::new(&[]));
    /// // additional code
    /// ```
    pub fn new(data: T) -> QoiDecoder<T> {
        QoiDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new QOI format decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use quoit_core::bytestream::QCursor;
    /// use quoit_core::options::DecoderOptions;
    /// use quoit_qoi::QoiDecoder;
    /// // only decode images less than 10 in both width and height
    ///
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = QoiDecoder::new_with_options(QCursor::new([]), options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> QoiDecoder<T> {
        QoiDecoder {
            header: None,
            stream: QReader::new(data),
            options
        }
    }
    /// Decode the 14 byte header, validating it against the options
    ///
    /// Calling this again after it succeeded returns the stored header
    /// without touching the stream.
    ///
    /// # Errors
    /// - [`QoiErrors::TruncatedHeader`] and [`QoiErrors::WrongMagicBytes`]
    ///   as in [`decode_header`]
    /// - [`QoiErrors::TooLargeDimensions`] if width or height exceed the
    ///   configured limits
    /// - [`QoiErrors::UnknownChannels`] in strict mode only
    pub fn decode_headers(&mut self) -> Result<Header, QoiErrors> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        let bytes = match self.stream.read_fixed_bytes_or_error::<QOI_HEADER_SIZE>() {
            Ok(bytes) => bytes,
            Err(QByteIoError::NotEnoughBytes(_, found)) => {
                return Err(QoiErrors::TruncatedHeader(found))
            }
            Err(e) => return Err(e.into())
        };
        let header = decode_header(&bytes)?;

        let width = header.width as usize;
        let height = header.height as usize;

        if width > self.options.max_width() {
            return Err(QoiErrors::TooLargeDimensions(
                "width",
                width,
                self.options.max_width()
            ));
        }
        if height > self.options.max_height() {
            return Err(QoiErrors::TooLargeDimensions(
                "height",
                height,
                self.options.max_height()
            ));
        }
        if header.channels().is_none() {
            if self.options.strict_mode() {
                return Err(QoiErrors::UnknownChannels(header.channels));
            }
            warn!(
                "Unknown channel number {}, expected 3 or 4, decoding as RGBA",
                header.channels
            );
        }

        trace!("Image width: {:?}", header.width);
        trace!("Image height: {:?}", header.height);
        trace!("Image channels: {:?}", header.channels);
        trace!("Image colorspace: {:?}", header.colorspace);

        self.header = Some(header);

        Ok(header)
    }

    /// The decoded header, or `None` before [`decode_headers`](Self::decode_headers)
    pub const fn header(&self) -> Option<Header> {
        self.header
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .map(|header| (header.width as usize, header.height as usize))
    }

    /// Channel layout recorded in the header
    ///
    /// `None` if the headers haven't been decoded or the
    /// channel byte is not 3 or 4
    pub fn channels(&self) -> Option<Channels> {
        self.header.and_then(|header| header.channels())
    }

    /// Return the number of bytes required to hold the decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: `width * height * 4`
    ///  - `None`: headers weren't decoded or the size overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.header?.pixel_count()?.checked_mul(4)
    }

    /// Decode the image, returning RGBA pixels
    ///
    /// Either every pixel is returned or an error, never a partial image.
    ///
    /// # Errors
    /// Header errors from [`decode_headers`](Self::decode_headers),
    /// [`QoiErrors::TruncatedStream`] if the chunks run out early and
    /// [`QoiErrors::InvalidEndMarker`] in strict mode.
    pub fn decode(&mut self) -> Result<Vec<u8>, QoiErrors> {
        let header = self.decode_headers()?;

        // a count past usize can never be backed by real chunks, the
        // loop then ends in a truncated stream like any other short input
        let total = header.pixel_count().unwrap_or(usize::MAX);

        let mut output = Vec::with_capacity(total.min(INITIAL_PIXEL_RESERVE) * 4);

        self.decode_chunks(total, |pixel, count| {
            let rgba = pixel.to_rgba();
            for _ in 0..count {
                output.extend_from_slice(&rgba);
            }
        })?;

        Ok(output)
    }

    /// Decode a compressed QOI image and store the RGBA pixels
    /// into `pixels`
    ///
    /// Only the first [`output_buffer_size`](Self::output_buffer_size)
    /// bytes are written. On error the buffer may hold a partial image.
    ///
    /// # Errors
    /// As [`decode`](Self::decode), plus [`QoiErrors::TooSmallOutput`]
    /// if `pixels` cannot hold the image
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), QoiErrors> {
        self.decode_headers()?;

        let size = self.output_buffer_size().unwrap_or(usize::MAX);

        if pixels.len() < size {
            return Err(QoiErrors::TooSmallOutput(size, pixels.len()));
        }
        let mut out_chunks = pixels[..size].chunks_exact_mut(4);

        self.decode_chunks(size / 4, |pixel, count| {
            let rgba = pixel.to_rgba();
            for out in out_chunks.by_ref().take(count) {
                out.copy_from_slice(&rgba);
            }
        })
    }

    /// Run the chunk loop until `total` pixels were handed to `emit`,
    /// then check the end marker
    ///
    /// `emit` receives a pixel and how many consecutive times it repeats,
    /// the counts always sum to exactly `total`.
    fn decode_chunks<F>(&mut self, total: usize, mut emit: F) -> Result<(), QoiErrors>
    where
        F: FnMut(Pixel, usize)
    {
        let mut state = CodecState::new();

        while state.pixels_done < total {
            let done = state.pixels_done;

            let tag = self
                .stream
                .read_u8_err()
                .map_err(|_| QoiErrors::TruncatedStream(total, done))?;

            let kind = ChunkKind::classify(tag);
            let previous = state.previous_pixel;

            let pixel = match kind {
                ChunkKind::Rgba => {
                    let [r, g, b, a] = self.read_payload::<4>(total, done)?;
                    Pixel::new(r, g, b, a)
                }
                ChunkKind::Rgb => {
                    let [r, g, b] = self.read_payload::<3>(total, done)?;
                    Pixel::new(r, g, b, previous.a)
                }
                ChunkKind::Index => state.cache.lookup(tag),
                ChunkKind::Diff => apply_diff(previous, tag),
                ChunkKind::Luma => {
                    let [next] = self.read_payload::<1>(total, done)?;
                    apply_luma(previous, tag, next)
                }
                ChunkKind::Run => {
                    let count = run_length(tag, total - done);
                    state.seed_before_run();

                    emit(previous, count);
                    state.commit(previous, kind, count);
                    continue;
                }
            };
            emit(pixel, 1);
            state.commit(pixel, kind, 1);
        }

        self.check_end_marker()?;

        trace!("Finished decoding image");

        Ok(())
    }

    fn read_payload<const N: usize>(
        &mut self, total: usize, done: usize
    ) -> Result<[u8; N], QoiErrors> {
        self.stream
            .read_fixed_bytes_or_error::<N>()
            .map_err(|_| QoiErrors::TruncatedStream(total, done))
    }

    fn check_end_marker(&mut self) -> Result<(), QoiErrors> {
        let valid = matches!(
            self.stream.read_fixed_bytes_or_error::<QOI_PADDING>(),
            Ok(marker) if marker == QOI_END_MARKER
        );
        if !valid {
            if self.options.strict_mode() {
                return Err(QoiErrors::InvalidEndMarker);
            }
            warn!("Last bytes do not match QOI end marker");
        }
        Ok(())
    }
}

/// Pixels a RUN chunk produces, clamped to what the image still needs
fn run_length(tag: u8, pixels_left: usize) -> usize {
    let wanted = usize::from(tag & 0x3f) + 1;

    if wanted > pixels_left {
        warn!("Run of {wanted} pixels overshoots the image by {}, clamping", wanted - pixels_left);
        return pixels_left;
    }
    wanted
}

/// `01rrggbb`, each field is a delta biased by 2
#[inline(always)]
fn apply_diff(previous: Pixel, tag: u8) -> Pixel {
    Pixel::new(
        previous.r.wrapping_add(((tag >> 4) & 0x03).wrapping_sub(2)),
        previous.g.wrapping_add(((tag >> 2) & 0x03).wrapping_sub(2)),
        previous.b.wrapping_add((tag & 0x03).wrapping_sub(2)),
        previous.a
    )
}

/// `10gggggg rrrrbbbb`, green biased by 32, red and blue
/// relative to green and biased by 8
#[inline(always)]
fn apply_luma(previous: Pixel, tag: u8, next: u8) -> Pixel {
    let dg = (tag & 0x3f).wrapping_sub(32);
    let dr = (next >> 4).wrapping_sub(8).wrapping_add(dg);
    let db = (next & 0x0f).wrapping_sub(8).wrapping_add(dg);

    Pixel::new(
        previous.r.wrapping_add(dr),
        previous.g.wrapping_add(dg),
        previous.b.wrapping_add(db),
        previous.a
    )
}
