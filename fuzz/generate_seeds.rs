#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Windows V3, 1x1 24-bit
    let mut info = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    info[0] = b'B'; info[1] = b'M';
    info[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    info[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    info[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    info[18..22].copy_from_slice(&1u32.to_le_bytes()); // width
    info[22..26].copy_from_slice(&1u32.to_le_bytes()); // height
    info[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    info[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    info[54] = 0xff; info[55] = 0x00; info[56] = 0x00; // BGR
    fs::write(format!("{dir}/info_1x1.bmp"), &info).unwrap();

    // OS/2 V1, 2x1 24-bit
    let mut core = vec![0u8; 34]; // 26 header + 8 pixel (6 + 2 padding)
    core[0] = b'B'; core[1] = b'M';
    core[10..14].copy_from_slice(&26u32.to_le_bytes());
    core[14..18].copy_from_slice(&12u32.to_le_bytes());
    core[18..20].copy_from_slice(&2u16.to_le_bytes());
    core[20..22].copy_from_slice(&1u16.to_le_bytes());
    core[22..24].copy_from_slice(&1u16.to_le_bytes());
    core[24..26].copy_from_slice(&24u16.to_le_bytes());
    core[26..32].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
    fs::write(format!("{dir}/core_2x1.bmp"), &core).unwrap();

    // Windows V4, 1x2 24-bit
    let mut v4 = vec![0u8; 130]; // 122 header + 2 rows of 4
    v4[0] = b'B'; v4[1] = b'M';
    v4[10..14].copy_from_slice(&122u32.to_le_bytes());
    v4[14..18].copy_from_slice(&108u32.to_le_bytes());
    v4[18..22].copy_from_slice(&1u32.to_le_bytes());
    v4[22..26].copy_from_slice(&2u32.to_le_bytes());
    v4[26..28].copy_from_slice(&1u16.to_le_bytes());
    v4[28..30].copy_from_slice(&24u16.to_le_bytes());
    fs::write(format!("{dir}/v4_1x2.bmp"), &v4).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/info_no_pixels.bin"), &info[..54]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
