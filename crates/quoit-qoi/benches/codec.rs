use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nanorand::{Rng, WyRand};

const WIDTH: u32 = 512;
const HEIGHT: u32 = 512;

/// Soft gradients broken up by noisy patches, roughly photo like
fn synthetic_image() -> Vec<u8> {
    let mut rand = WyRand::new_seed(0xc0de);
    let mut pixels = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if (x / 32 + y / 32) % 5 == 0 {
                let mut noise = [0_u8; 4];
                rand.fill(&mut noise);
                noise[3] = 255;
                pixels.extend_from_slice(&noise);
            } else {
                pixels.extend_from_slice(&[(x / 2) as u8, (y / 2) as u8, ((x + y) / 4) as u8, 255]);
            }
        }
    }
    pixels
}

fn encode_quoit_qoi(pixels: &[u8]) -> Vec<u8>
{
    quoit_qoi::encode(pixels, WIDTH, HEIGHT, 4, 0).unwrap()
}

fn decode_quoit_qoi(data: &[u8]) -> Vec<u8>
{
    quoit_qoi::decode(data).unwrap().1
}

fn bench_codec(c: &mut Criterion)
{
    let pixels = synthetic_image();
    let encoded = encode_quoit_qoi(&pixels);

    let mut group = c.benchmark_group("qoi: Simple encode/decode");

    group.throughput(Throughput::Bytes(pixels.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| black_box(encode_quoit_qoi(pixels.as_slice())))
    });

    group.bench_function("decode", |b| {
        b.iter(|| black_box(decode_quoit_qoi(encoded.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_codec);

criterion_main!(benches);
