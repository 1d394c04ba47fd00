#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let channels = if data[0] & 1 == 0 { 3 } else { 4 };
    let pixels = &data[1..data.len() - (data.len() - 1) % 4];
    let width = (pixels.len() / 4) as u32;

    let encoded = quoit_qoi::encode(pixels, width, 1, channels, 0).unwrap();
    let (header, decoded) = quoit_qoi::decode(&encoded).unwrap();

    assert_eq!(header.width, width);
    for (input, output) in pixels.chunks_exact(4).zip(decoded.chunks_exact(4)) {
        assert_eq!(input[..3], output[..3]);
        assert_eq!(output[3], if channels == 3 { 255 } else { input[3] });
    }
});
