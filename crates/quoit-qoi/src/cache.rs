/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::QOI_CACHE_SIZE;
use crate::Pixel;

/// The 64 slot history of recently seen pixels
///
/// Direct mapped by [`Pixel::hash`], a store silently evicts whatever
/// pixel previously lived in the slot. Encoder and decoder perform the
/// exact same sequence of stores, which is what lets an INDEX chunk
/// refer to a slot by number.
#[derive(Copy, Clone, Debug)]
pub struct PixelCache {
    slots: [Pixel; QOI_CACHE_SIZE]
}

impl Default for PixelCache {
    fn default() -> Self {
        PixelCache::new()
    }
}

impl PixelCache {
    /// A cache with every slot holding the all zero pixel
    pub const fn new() -> PixelCache {
        PixelCache {
            slots: [Pixel::new(0, 0, 0, 0); QOI_CACHE_SIZE]
        }
    }

    /// Return whatever currently occupies `slot`
    ///
    /// Only the low six bits of `slot` are used.
    #[inline(always)]
    pub const fn lookup(&self, slot: u8) -> Pixel {
        self.slots[(slot & 63) as usize]
    }

    /// Write `pixel` to its own slot, overwriting the previous occupant
    #[inline(always)]
    pub fn store(&mut self, pixel: Pixel) {
        self.slots[usize::from(pixel.hash())] = pixel;
    }

    /// Whether `pixel` is currently cached in its slot
    #[inline(always)]
    pub fn contains(&self, pixel: Pixel) -> bool {
        self.lookup(pixel.hash()) == pixel
    }
}
