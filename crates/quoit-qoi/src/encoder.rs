/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use quoit_core::bytestream::{QByteWriterTrait, QWriter};
use quoit_core::log::{log_enabled, trace, Level};
use quoit_core::options::EncoderOptions;

use crate::chunk::CodecState;
use crate::constants::{
    QOI_HEADER_SIZE, QOI_MAX_RUN, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA,
    QOI_OP_RUN, QOI_PADDING
};
use crate::{encode_header, ChunkKind, Pixel, QoiEncodeErrors};

/// Quite Ok Image Encoder
///
/// Input is always RGBA, four bytes per pixel. When the options
/// ask for three channels every alpha byte is read as 255.
///
/// # Example
/// - Encode a 100 by 100 RGBA image
///
/// ```
/// use quoit_core::colorspace::Channels;
/// use quoit_core::options::EncoderOptions;
/// use quoit_qoi::QoiEncoder;
/// use quoit_qoi::QoiEncodeErrors;
///
/// const W:usize=100;
/// const H:usize=100;
///
/// fn main()->Result<(), QoiEncodeErrors>{
///     let pixels = std::array::from_fn::<u8,{W * H * 4},_>(|i| (i%256) as u8);
///     let mut encoder = QoiEncoder::new(&pixels,EncoderOptions::new(W,H,Channels::Rgba,0));
///     let mut sink = vec![];
///     let written = encoder.encode(&mut sink)?;
///     assert_eq!(written, sink.len());
///     Ok(())
///}
/// ```
pub struct QoiEncoder<'a> {
    // raw pixels, always RGBA
    pixel_data: &'a [u8],
    options:    EncoderOptions
}

impl<'a> QoiEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Pixel data, size must be equal to `width*height*4`
    /// - options: Encoder details for data, this contains width, height,
    ///   the channel layout and the colorspace byte
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> QoiEncoder<'a> {
        QoiEncoder {
            pixel_data: data,
            options
        }
    }

    /// Return the maximum size for which the encoder can safely
    /// encode the image without fearing for an out of space error
    ///
    /// Every pixel costs at most one RGBA chunk of five bytes.
    pub fn max_size(&self) -> usize {
        self.options
            .width()
            .saturating_mul(self.options.height())
            .saturating_mul(5)
            .saturating_add(QOI_HEADER_SIZE + QOI_PADDING)
    }

    /// Check the dimensions fit the header and the pixel buffer
    /// matches them, returning the header width and height
    fn validate(&self) -> Result<(u32, u32), QoiEncodeErrors> {
        let options = &self.options;

        let width = u32::try_from(options.width())
            .map_err(|_| QoiEncodeErrors::TooLargeDimensions(options.width()))?;
        let height = u32::try_from(options.height())
            .map_err(|_| QoiEncodeErrors::TooLargeDimensions(options.height()))?;

        let expected_len = options
            .width()
            .checked_mul(options.height())
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(QoiEncodeErrors::TooLargeDimensions(
                options.width().saturating_mul(options.height())
            ))?;

        if self.pixel_data.len() != expected_len {
            return Err(QoiEncodeErrors::BufferSizeMismatch(
                expected_len,
                self.pixel_data.len()
            ));
        }
        Ok((width, height))
    }

    /// Encode into `sink`, erroring out if the sink runs out of space
    ///
    /// # Returns
    /// - Ok(size): Actual bytes written to the sink
    /// - Err: The error encountered during encoding, the sink
    ///   contents are then unspecified
    pub fn encode<T: QByteWriterTrait>(&mut self, sink: T) -> Result<usize, QoiEncodeErrors> {
        let (width, height) = self.validate()?;

        let mut stream = QWriter::new(sink);
        stream.reserve(self.max_size())?;

        let channels = self.options.channels();
        stream.write_const_bytes(&encode_header(
            width,
            height,
            channels.to_byte(),
            self.options.colorspace()
        ))?;

        let alpha_blind = !channels.has_alpha();
        let total = self.pixel_data.len() / 4;

        let mut state = CodecState::new();
        let mut tally = log_enabled!(Level::Trace).then(ChunkTally::default);

        while state.pixels_done < total {
            let (chunk, count, pixel) = select_chunk(&mut state, self.pixel_data, alpha_blind);

            stream.write_all(chunk.as_bytes())?;
            state.commit(pixel, chunk.kind, count);

            if let Some(tally) = tally.as_mut() {
                tally.record(chunk.kind);
            }
        }
        // end marker, seven zeroes and a one
        stream.write_u64_be_err(0x01)?;
        stream.flush()?;

        if let Some(tally) = tally {
            trace!(
                "Chunks: {} run, {} index, {} diff, {} luma, {} rgb, {} rgba",
                tally.run,
                tally.index,
                tally.diff,
                tally.luma,
                tally.rgb,
                tally.rgba
            );
        }
        let len = stream.bytes_written();
        trace!("Encoded {total} pixels into {len} bytes");

        Ok(len)
    }
}

#[derive(Default)]
struct ChunkTally {
    rgb:   usize,
    rgba:  usize,
    index: usize,
    diff:  usize,
    luma:  usize,
    run:   usize
}

impl ChunkTally {
    fn record(&mut self, kind: ChunkKind) {
        let counter = match kind {
            ChunkKind::Rgb => &mut self.rgb,
            ChunkKind::Rgba => &mut self.rgba,
            ChunkKind::Index => &mut self.index,
            ChunkKind::Diff => &mut self.diff,
            ChunkKind::Luma => &mut self.luma,
            ChunkKind::Run => &mut self.run
        };
        *counter += 1;
    }
}

/// One encoded chunk, tag byte first
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Chunk {
    kind:  ChunkKind,
    bytes: [u8; 5]
}

impl Chunk {
    const fn new(kind: ChunkKind, bytes: [u8; 5]) -> Chunk {
        Chunk { kind, bytes }
    }

    fn run(length: usize) -> Chunk {
        debug_assert!((1..=QOI_MAX_RUN).contains(&length));
        Chunk::new(ChunkKind::Run, [QOI_OP_RUN | (length - 1) as u8, 0, 0, 0, 0])
    }

    const fn index(slot: u8) -> Chunk {
        Chunk::new(ChunkKind::Index, [QOI_OP_INDEX | slot, 0, 0, 0, 0])
    }

    const fn rgb(pixel: Pixel) -> Chunk {
        Chunk::new(ChunkKind::Rgb, [QOI_OP_RGB, pixel.r, pixel.g, pixel.b, 0])
    }

    const fn rgba(pixel: Pixel) -> Chunk {
        Chunk::new(
            ChunkKind::Rgba,
            [QOI_OP_RGBA, pixel.r, pixel.g, pixel.b, pixel.a]
        )
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..1 + self.kind.payload_len()]
    }
}

#[inline(always)]
fn read_pixel(rgba: &[u8], alpha_blind: bool) -> Pixel {
    let pixel = Pixel::from_rgba(rgba);
    if alpha_blind {
        pixel.with_alpha(255)
    } else {
        pixel
    }
}

/// Pick the chunk for the pixel at `state.pixels_done`
///
/// Returns the chunk, how many pixels it covers and the pixel
/// the state should remember.
fn select_chunk(state: &mut CodecState, pixels: &[u8], alpha_blind: bool) -> (Chunk, usize, Pixel) {
    let start = state.pixels_done * 4;
    let pixel = read_pixel(&pixels[start..start + 4], alpha_blind);
    let previous = state.previous_pixel;

    if pixel == previous {
        state.seed_before_run();
        let length = scan_run(&pixels[start..], pixel, alpha_blind);
        return (Chunk::run(length), length, pixel);
    }

    let slot = pixel.hash();

    if state.cache.lookup(slot) == pixel {
        if state.previous_kind == Some(ChunkKind::Index) && previous.hash() == slot {
            // the previous pixel is the last one stored, so it still owns the slot
            debug_assert_eq!(pixel, previous);
            let length = scan_run(&pixels[start..], pixel, alpha_blind);
            return (Chunk::run(length), length, pixel);
        }
        return (Chunk::index(slot), 1, pixel);
    }

    if alpha_blind || pixel.a == previous.a {
        let chunk = encode_diff(previous, pixel)
            .or_else(|| encode_luma(previous, pixel))
            .unwrap_or(Chunk::rgb(pixel));

        return (chunk, 1, pixel);
    }
    (Chunk::rgba(pixel), 1, pixel)
}

/// Count how many pixels from the start of `pixels` equal `pixel`,
/// up to the longest run one chunk can carry
fn scan_run(pixels: &[u8], pixel: Pixel, alpha_blind: bool) -> usize {
    pixels
        .chunks_exact(4)
        .take(QOI_MAX_RUN)
        .take_while(|rgba| read_pixel(rgba, alpha_blind) == pixel)
        .count()
}

fn encode_diff(previous: Pixel, pixel: Pixel) -> Option<Chunk> {
    let dr = pixel.r.wrapping_sub(previous.r).wrapping_add(2);
    let dg = pixel.g.wrapping_sub(previous.g).wrapping_add(2);
    let db = pixel.b.wrapping_sub(previous.b).wrapping_add(2);

    if dr < 4 && dg < 4 && db < 4 {
        let tag = QOI_OP_DIFF | dr << 4 | dg << 2 | db;
        return Some(Chunk::new(ChunkKind::Diff, [tag, 0, 0, 0, 0]));
    }
    None
}

fn encode_luma(previous: Pixel, pixel: Pixel) -> Option<Chunk> {
    let dg = pixel.g.wrapping_sub(previous.g);
    let dr_dg = pixel.r.wrapping_sub(previous.r).wrapping_sub(dg).wrapping_add(8);
    let db_dg = pixel.b.wrapping_sub(previous.b).wrapping_sub(dg).wrapping_add(8);
    let dg = dg.wrapping_add(32);

    if dg < 64 && dr_dg < 16 && db_dg < 16 {
        return Some(Chunk::new(
            ChunkKind::Luma,
            [QOI_OP_LUMA | dg, dr_dg << 4 | db_dg, 0, 0, 0]
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use quoit_core::bytestream::QCursor;
    use quoit_core::colorspace::Channels;
    use quoit_core::options::EncoderOptions;

    use crate::chunk::CodecState;
    use crate::encoder::{encode_diff, encode_luma, scan_run, select_chunk, Chunk};
    use crate::{ChunkKind, Pixel, QoiDecoder, QoiEncodeErrors, QoiEncoder};

    #[test]
    fn test_qoi_encode_rgb() {
        const W: usize = 100;
        const H: usize = 100;

        let pixels = std::array::from_fn::<u8, { W * H * 4 }, _>(|i| (i % 256) as u8);
        let mut encoder = QoiEncoder::new(&pixels, EncoderOptions::new(W, H, Channels::Rgb, 0));
        let mut output = vec![];
        encoder.encode(&mut output).unwrap();

        let mut decoder = QoiDecoder::new(QCursor::new(&output));
        let decoded_pixels = decoder.decode().unwrap();

        for (expected, found) in pixels.chunks_exact(4).zip(decoded_pixels.chunks_exact(4)) {
            assert_eq!(&expected[..3], &found[..3]);
            assert_eq!(found[3], 255);
        }
    }

    #[test]
    fn test_qoi_encode_rgba() {
        const W: usize = 100;
        const H: usize = 100;

        let pixels = std::array::from_fn::<u8, { W * H * 4 }, _>(|i| (i % 256) as u8);
        let mut encoder = QoiEncoder::new(&pixels, EncoderOptions::new(W, H, Channels::Rgba, 1));

        let mut output = vec![];
        let written = encoder.encode(&mut output).unwrap();
        assert_eq!(written, output.len());
        assert!(written <= encoder.max_size());

        let mut decoder = QoiDecoder::new(QCursor::new(&output));
        let decoded_pixels = decoder.decode().unwrap();
        assert_eq!(&pixels[..], &decoded_pixels[..]);
        assert_eq!(decoder.header().unwrap().colorspace, 1);
    }

    #[test]
    fn wrong_buffer_size() {
        let pixels = [0_u8; 7];
        let mut encoder = QoiEncoder::new(&pixels, EncoderOptions::new(1, 2, Channels::Rgba, 0));
        let mut output = vec![];

        assert!(matches!(
            encoder.encode(&mut output),
            Err(QoiEncodeErrors::BufferSizeMismatch(8, 7))
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn full_slice_sink_is_an_io_error() {
        let pixels = [9_u8; 16];
        let mut encoder = QoiEncoder::new(&pixels, EncoderOptions::new(2, 2, Channels::Rgba, 0));
        let mut output = [0_u8; 20];

        assert!(matches!(
            encoder.encode(&mut output[..]),
            Err(QoiEncodeErrors::IoError(_))
        ));
    }

    #[test]
    fn diff_and_luma_ranges() {
        let black = Pixel::INITIAL;

        let diff = encode_diff(black, Pixel::new(1, 0, 255, 255)).unwrap();
        assert_eq!(diff.as_bytes(), &[0x79]);
        assert!(encode_diff(black, Pixel::new(2, 0, 0, 255)).is_none());
        assert!(encode_diff(black, Pixel::new(0, 254, 0, 255)).is_some());
        assert!(encode_diff(black, Pixel::new(0, 253, 0, 255)).is_none());

        let luma = encode_luma(black, Pixel::new(8, 5, 3, 255)).unwrap();
        assert_eq!(luma.as_bytes(), &[0xa5, 0xb6]);
        // green at both ends of its range
        assert!(encode_luma(black, Pixel::new(0, 31, 0, 255)).is_none());
        assert!(encode_luma(black, Pixel::new(31, 31, 31, 255)).is_some());
        assert!(encode_luma(black, Pixel::new(224, 224, 224, 255)).is_some());
        assert!(encode_luma(black, Pixel::new(0, 32, 32, 255)).is_none());
    }

    #[test]
    fn runs_stop_at_62_and_at_changes() {
        let pixels = [0_u8, 0, 0, 255].repeat(70);
        assert_eq!(scan_run(&pixels, Pixel::INITIAL, false), 62);
        assert_eq!(scan_run(&pixels[..12], Pixel::INITIAL, false), 3);

        let mut broken = [0_u8, 0, 0, 255].repeat(5);
        broken[11] = 7;
        assert_eq!(scan_run(&broken, Pixel::INITIAL, false), 2);
        assert_eq!(scan_run(&broken, Pixel::INITIAL, true), 5);
    }

    #[test]
    fn run_wins_over_index() {
        let x = Pixel::new(10, 20, 30, 255);
        let pixels = [x.to_rgba(), x.to_rgba()].concat();

        let mut state = CodecState::new();
        state.commit(x, ChunkKind::Index, 0);

        let (chunk, count, pixel) = select_chunk(&mut state, &pixels, false);
        assert_eq!(chunk, Chunk::run(2));
        assert_eq!((count, pixel), (2, x));
    }

    #[test]
    fn alpha_change_needs_rgba() {
        let pixel = Pixel::new(0, 0, 0, 128);
        let mut state = CodecState::new();

        let (chunk, _, _) = select_chunk(&mut state, &pixel.to_rgba(), false);
        assert_eq!(chunk.as_bytes(), &[0xff, 0, 0, 0, 128]);

        // with three channels the same pixel reads as the initial one
        let (chunk, count, found) = select_chunk(&mut state, &pixel.to_rgba(), true);
        assert_eq!(chunk.as_bytes(), &[0xc0]);
        assert_eq!((count, found), (1, Pixel::INITIAL));
        assert!(state.cache.contains(Pixel::INITIAL));
    }
}
