/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image channel layout information.

/// Channel layouts a QOI stream can declare in its header
///
/// Decoded pixels are always laid out as RGBA, this only
/// records what the producer of the stream had.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Channels {
    /// Red, Green, Blue
    Rgb = 3,
    /// Red, Green, Blue, Alpha
    #[default]
    Rgba = 4
}

impl Channels {
    /// Map the channel byte found in a header to a layout
    ///
    /// Returns `None` for anything other than `3` or `4`
    ///
    /// # Example
    /// ```
    /// use quoit_core::colorspace::Channels;
    /// assert_eq!(Channels::from_byte(3), Some(Channels::Rgb));
    /// assert_eq!(Channels::from_byte(2), None);
    /// ```
    pub const fn from_byte(byte: u8) -> Option<Channels> {
        match byte {
            3 => Some(Channels::Rgb),
            4 => Some(Channels::Rgba),
            _ => None
        }
    }

    /// The byte written to the header for this layout
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Number of color components in one pixel of this layout
    pub const fn num_components(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

#[cfg(test)]
mod tests {
    use crate::colorspace::Channels;

    #[test]
    fn channel_bytes_round_trip() {
        for channel in [Channels::Rgb, Channels::Rgba] {
            assert_eq!(Channels::from_byte(channel.to_byte()), Some(channel));
        }
        assert_eq!(Channels::Rgb.num_components(), 3);
        assert!(Channels::Rgba.has_alpha());
        assert!(!Channels::Rgb.has_alpha());
    }

    #[test]
    fn unknown_channel_bytes_are_rejected() {
        for byte in [0, 1, 2, 5, 255] {
            assert_eq!(Channels::from_byte(byte), None);
        }
    }
}
