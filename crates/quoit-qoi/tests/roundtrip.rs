/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encode then decode images with different statistics

use std::io::BufWriter;

use nanorand::{Rng, WyRand};
use quoit_qoi::quoit_core::bytestream::QCursor;
use quoit_qoi::quoit_core::colorspace::Channels;
use quoit_qoi::quoit_core::options::{DecoderOptions, EncoderOptions};
use quoit_qoi::{decode, encode, QoiDecoder, QoiEncoder};

fn noise(rand: &mut WyRand, width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![0_u8; width * height * 4];
    rand.fill(&mut pixels);
    pixels
}

/// Small steps between neighbours
///
/// Red and green step by one per column, blue alternates steps of one
/// and two, so a row is DIFF and LUMA chunks in turn.
fn gradient(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                x as u8,
                (y * 2 + x) as u8,
                (x * 3 / 2 + y * 5) as u8,
                255
            ]);
        }
    }
    pixels
}

/// Few distinct colors in long and short stretches, exercises INDEX and RUN
fn palette(rand: &mut WyRand, width: usize, height: usize) -> Vec<u8> {
    let colors: Vec<[u8; 4]> = (0..12)
        .map(|_| {
            [
                rand.generate::<u8>(),
                rand.generate::<u8>(),
                rand.generate::<u8>(),
                if rand.generate_range(0_u8..4) == 0 { 255 } else { rand.generate::<u8>() }
            ]
        })
        .collect();

    let mut pixels = Vec::with_capacity(width * height * 4);
    while pixels.len() < width * height * 4 {
        let color = colors[rand.generate_range(0_usize..colors.len())];
        let stretch = rand.generate_range(1_usize..=90);
        for _ in 0..stretch {
            if pixels.len() == width * height * 4 {
                break;
            }
            pixels.extend_from_slice(&color);
        }
    }
    pixels
}

fn opaque(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(4)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2], 255])
        .collect()
}

fn check_roundtrip(pixels: &[u8], width: u32, height: u32) {
    for channels in [3, 4] {
        let encoded = encode(pixels, width, height, channels, 0).unwrap();
        let (header, decoded) = decode(&encoded).unwrap();

        assert_eq!((header.width, header.height), (width, height));
        assert_eq!(header.channels, channels);

        if channels == 4 {
            assert_eq!(decoded, pixels, "{width}x{height} rgba");
        } else {
            assert_eq!(decoded, opaque(pixels), "{width}x{height} rgb");
        }
    }
}

#[test]
fn random_noise() {
    let mut rand = WyRand::new_seed(0x5eed);

    for (width, height) in [(1, 1), (7, 3), (64, 64), (257, 13)] {
        let pixels = noise(&mut rand, width, height);
        check_roundtrip(&pixels, width as u32, height as u32);
    }
}

#[test]
fn smooth_gradient() {
    for (width, height) in [(2, 2), (100, 100), (300, 7)] {
        check_roundtrip(&gradient(width, height), width as u32, height as u32);
    }
}

#[test]
fn gradient_compresses() {
    let pixels = gradient(100, 100);
    let encoded = encode(&pixels, 100, 100, 4, 0).unwrap();

    // about one byte per DIFF and two per LUMA, plus one chunk per row start
    assert!(encoded.len() < pixels.len() / 2, "{} bytes", encoded.len());
    assert!(encoded.len() > pixels.len() / 4, "{} bytes", encoded.len());
}

#[test]
fn palette_images() {
    let mut rand = WyRand::new_seed(42);

    for _ in 0..20 {
        let width = rand.generate_range(1_usize..=80);
        let height = rand.generate_range(1_usize..=80);
        let pixels = palette(&mut rand, width, height);

        check_roundtrip(&pixels, width as u32, height as u32);
    }
}

#[test]
fn random_lengths_and_alpha() {
    let mut rand = WyRand::new_seed(7);

    for _ in 0..50 {
        let width = rand.generate_range(1_usize..=40);
        // mostly repeats of one translucent color with noise mixed in
        let base = [rand.generate::<u8>(), 9, 200, rand.generate::<u8>()];
        let mut pixels = base.repeat(width);
        for rgba in pixels.chunks_exact_mut(4) {
            if rand.generate_range(0_u8..3) == 0 {
                rand.fill(&mut *rgba);
            }
        }
        check_roundtrip(&pixels, width as u32, 1);
    }
}

#[test]
fn buf_writer_sink_matches_vec() {
    let mut rand = WyRand::new_seed(99);
    let pixels = palette(&mut rand, 33, 21);

    let options = EncoderOptions::new(33, 21, Channels::Rgba, 1);
    let mut writer = BufWriter::new(Vec::new());
    let written = QoiEncoder::new(&pixels, options)
        .encode(&mut writer)
        .unwrap();
    let from_writer = writer.into_inner().unwrap();

    assert_eq!(written, from_writer.len());
    assert_eq!(from_writer, encode(&pixels, 33, 21, 4, 1).unwrap());
}

#[test]
fn strict_decoder_accepts_encoder_output() {
    let pixels = gradient(50, 40);
    let encoded = encode(&pixels, 50, 40, 4, 0).unwrap();

    let options = DecoderOptions::default()
        .set_strict_mode(true)
        .set_max_width(50)
        .set_max_height(40);
    let mut decoder = QoiDecoder::new_with_options(QCursor::new(&encoded), options);

    decoder.decode_headers().unwrap();
    let mut output = vec![0; decoder.output_buffer_size().unwrap()];
    decoder.decode_into(&mut output).unwrap();
    assert_eq!(output, pixels);
}
