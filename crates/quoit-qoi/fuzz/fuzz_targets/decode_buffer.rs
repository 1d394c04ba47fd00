#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use quoit_qoi::quoit_core::bytestream::QCursor;
    use quoit_qoi::quoit_core::options::DecoderOptions;

    // keep pathological headers from allocating gigabytes
    let options = DecoderOptions::default()
        .set_max_width(1 << 12)
        .set_max_height(1 << 12);

    let mut decoder = quoit_qoi::QoiDecoder::new_with_options(QCursor::new(data), options);
    let _ = decoder.decode();
});
