/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::QOI_CACHE_SIZE;

/// A single RGBA8 pixel
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

impl Pixel {
    /// The previous pixel both codec directions start from
    pub const INITIAL: Pixel = Pixel::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Pixel {
        Pixel { r, g, b, a }
    }

    /// Read a pixel from the first four bytes of `rgba`
    ///
    /// # Panics
    /// If `rgba` is shorter than four bytes
    #[inline(always)]
    pub fn from_rgba(rgba: &[u8]) -> Pixel {
        Pixel::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    #[inline(always)]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with a different alpha
    #[inline(always)]
    pub const fn with_alpha(self, a: u8) -> Pixel {
        Pixel::new(self.r, self.g, self.b, a)
    }

    /// The slot this pixel occupies in the history cache
    ///
    /// `(r * 3 + g * 5 + b * 7 + a * 11) % 64` computed in 8 bit
    /// wrapping arithmetic. Since 64 divides 256 the truncation never
    /// changes the slot, but both directions must agree on it so it is
    /// spelled out exactly.
    #[inline(always)]
    pub const fn hash(self) -> u8 {
        self.r
            .wrapping_mul(3)
            .wrapping_add(self.g.wrapping_mul(5))
            .wrapping_add(self.b.wrapping_mul(7))
            .wrapping_add(self.a.wrapping_mul(11))
            % (QOI_CACHE_SIZE as u8)
    }
}

#[cfg(test)]
mod tests {
    use crate::Pixel;

    #[test]
    fn hash_matches_wide_arithmetic() {
        let pixels = [
            Pixel::INITIAL,
            Pixel::new(10, 20, 30, 255),
            Pixel::new(255, 255, 255, 255),
            Pixel::new(200, 100, 50, 0),
            Pixel::new(0, 0, 0, 0)
        ];
        for pixel in pixels {
            let wide = (usize::from(pixel.r) * 3
                + usize::from(pixel.g) * 5
                + usize::from(pixel.b) * 7
                + usize::from(pixel.a) * 11)
                % 64;
            assert_eq!(usize::from(pixel.hash()), wide);
        }
    }

    #[test]
    fn known_slots() {
        assert_eq!(Pixel::INITIAL.hash(), 53);
        assert_eq!(Pixel::new(10, 20, 30, 255).hash(), 9);
        // r + 64 adds 192 to the sum, a multiple of 64
        assert_eq!(Pixel::new(74, 20, 30, 255).hash(), 9);
    }
}
