#![no_main]
use libfuzzer_sys::fuzz_target;
use minibmp::{DecodeRequest, Limits, Orientation};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Must never panic, whatever the header claims
    let _ = minibmp::probe_bmp(data);
    let _ = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    let _ = DecodeRequest::new(data)
        .with_limits(&limits)
        .with_orientation(Orientation::Rotated180)
        .native(true)
        .decode(enough::Unstoppable);
    let _ = DecodeRequest::from_reader(&mut std::io::Cursor::new(data))
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    // No limits: the stream length alone has to bound the allocation
    let _ = DecodeRequest::from_reader(&mut std::io::Cursor::new(data)).decode(enough::Unstoppable);
});
