/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::colorspace::Channels;

/// Meta information about an image handed to an encoder
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    channels:   Channels,
    colorspace: u8
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:      0,
            height:     0,
            channels:   Channels::Rgba,
            colorspace: 0
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    /// * `channels`: Channel layout recorded in the header
    /// * `colorspace`: Colorspace tag recorded in the header, the codec never interprets it
    ///
    /// returns: EncoderOptions
    pub const fn new(
        width: usize, height: usize, channels: Channels, colorspace: u8
    ) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            channels,
            colorspace
        }
    }
    /// Get the width for which the image will be encoded in
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get height for which the image will be encoded in
    pub const fn height(&self) -> usize {
        self.height
    }
    /// Get the channel layout for which the image will be encoded in
    pub const fn channels(&self) -> Channels {
        self.channels
    }
    /// Get the colorspace tag written to the header
    pub const fn colorspace(&self) -> u8 {
        self.colorspace
    }

    /// Set width for the image to be encoded
    ///
    /// # Example
    /// ```
    /// use quoit_core::colorspace::Channels;
    /// use quoit_core::options::EncoderOptions;
    /// let options = EncoderOptions::default().set_width(3).set_height(2).set_channels(Channels::Rgb);
    /// assert_eq!((options.width(), options.height()), (3, 2));
    /// assert_eq!(options.channels(), Channels::Rgb);
    /// ```
    pub const fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set height for the image to be encoded
    pub const fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }
    /// Set channel layout for the image to be encoded
    pub const fn set_channels(mut self, channels: Channels) -> Self {
        self.channels = channels;
        self
    }
    /// Set the colorspace tag for the image to be encoded
    pub const fn set_colorspace(mut self, colorspace: u8) -> Self {
        self.colorspace = colorspace;
        self
    }
}
