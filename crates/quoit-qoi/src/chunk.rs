/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chunk kinds and the state both codec directions carry between chunks.

use crate::constants::{
    QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA
};
use crate::{Pixel, PixelCache};

/// The six chunk encodings of a QOI stream
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ChunkKind {
    /// `11111110` followed by r, g, b
    Rgb,
    /// `11111111` followed by r, g, b, a
    Rgba,
    /// `00xxxxxx`, a cache slot
    Index,
    /// `01rrggbb`, small deltas with a bias of 2
    Diff,
    /// `10gggggg rrrrbbbb`, green delta plus red and blue relative to it
    Luma,
    /// `11nnnnnn`, previous pixel repeated `n + 1` times
    Run
}

impl ChunkKind {
    /// Map a chunk's leading byte to its kind
    ///
    /// The two full byte tags are checked before the two bit prefix,
    /// since `11111110` and `11111111` would otherwise read as runs.
    ///
    /// # Example
    /// ```
    /// use quoit_qoi::ChunkKind;
    /// assert_eq!(ChunkKind::classify(0xfe), ChunkKind::Rgb);
    /// assert_eq!(ChunkKind::classify(0xfd), ChunkKind::Run);
    /// ```
    #[inline(always)]
    pub const fn classify(tag: u8) -> ChunkKind {
        match tag {
            QOI_OP_RGBA => ChunkKind::Rgba,
            QOI_OP_RGB => ChunkKind::Rgb,
            _ => match tag & QOI_MASK_2 {
                QOI_OP_INDEX => ChunkKind::Index,
                QOI_OP_DIFF => ChunkKind::Diff,
                QOI_OP_LUMA => ChunkKind::Luma,
                _ => ChunkKind::Run
            }
        }
    }

    /// Bytes following the tag byte
    pub const fn payload_len(self) -> usize {
        match self {
            ChunkKind::Rgba => 4,
            ChunkKind::Rgb => 3,
            ChunkKind::Luma => 1,
            ChunkKind::Index | ChunkKind::Diff | ChunkKind::Run => 0
        }
    }
}

/// Everything one encode or decode call remembers between chunks
///
/// A fresh state is built for every call and never outlives it.
pub(crate) struct CodecState {
    pub(crate) previous_pixel: Pixel,
    pub(crate) previous_kind:  Option<ChunkKind>,
    pub(crate) cache:          PixelCache,
    /// Pixels consumed (encoder) or produced (decoder) so far
    pub(crate) pixels_done:    usize
}

impl CodecState {
    pub(crate) const fn new() -> CodecState {
        CodecState {
            previous_pixel: Pixel::INITIAL,
            previous_kind:  None,
            cache:          PixelCache::new(),
            pixels_done:    0
        }
    }

    /// A run before any other chunk still has to leave the initial pixel
    /// in the cache, see <https://github.com/phoboslab/qoi/issues/258>
    #[inline(always)]
    pub(crate) fn seed_before_run(&mut self) {
        if self.pixels_done == 0 {
            self.cache.store(self.previous_pixel);
        }
    }

    /// Record that `count` pixels equal to `pixel` went through as one `kind` chunk
    #[inline(always)]
    pub(crate) fn commit(&mut self, pixel: Pixel, kind: ChunkKind, count: usize) {
        self.cache.store(pixel);
        self.previous_pixel = pixel;
        self.previous_kind = Some(kind);
        self.pixels_done += count;
    }
}

#[cfg(test)]
mod tests {
    use crate::chunk::CodecState;
    use crate::{ChunkKind, Pixel};

    #[test]
    fn classify_every_tag() {
        for tag in 0_u8..=255 {
            let expected = match tag {
                0xff => ChunkKind::Rgba,
                0xfe => ChunkKind::Rgb,
                0x00..=0x3f => ChunkKind::Index,
                0x40..=0x7f => ChunkKind::Diff,
                0x80..=0xbf => ChunkKind::Luma,
                _ => ChunkKind::Run
            };
            assert_eq!(ChunkKind::classify(tag), expected, "tag {tag:#010b}");
        }
    }

    #[test]
    fn payload_lengths() {
        assert_eq!(ChunkKind::Rgba.payload_len(), 4);
        assert_eq!(ChunkKind::Rgb.payload_len(), 3);
        assert_eq!(ChunkKind::Luma.payload_len(), 1);
        assert_eq!(ChunkKind::Run.payload_len(), 0);
    }

    #[test]
    fn initial_run_seeds_cache() {
        let mut state = CodecState::new();
        assert!(!state.cache.contains(Pixel::INITIAL));

        state.seed_before_run();
        assert!(state.cache.contains(Pixel::INITIAL));
    }

    #[test]
    fn later_runs_do_not_reseed() {
        let mut state = CodecState::new();
        let pixel = Pixel::new(1, 2, 3, 4);
        state.commit(pixel, ChunkKind::Rgba, 1);

        state.seed_before_run();
        assert!(!state.cache.contains(Pixel::INITIAL));
        assert_eq!(state.previous_pixel, pixel);
        assert_eq!(state.previous_kind, Some(ChunkKind::Rgba));
        assert_eq!(state.pixels_done, 1);
    }
}
