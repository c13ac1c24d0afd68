#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Smallest BMP header `imagesize` accepts, padded with black pixels.
pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

/// PNG signature plus an IHDR chunk; enough for size detection.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(33);
    bytes.extend_from_slice(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    bytes.extend_from_slice(&0u32.to_be_bytes());
    bytes
}

pub fn write_bytes(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write file");
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    write_bytes(path, &bmp_bytes(width, height));
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    write_bytes(path, &png_bytes(width, height));
}

/// Lay out a three-slide deck under `root`:
///
/// - slide 0 has an exact image,
/// - slide 1 names a `_v2` image that only exists with a timestamp suffix,
/// - slide 2 names an image that does not exist.
///
/// Returns the manifest path.
pub fn write_sample_deck(root: &Path) -> std::path::PathBuf {
    write_png(&root.join("assets/slide_1_cover_1769953112508.png"), 1024, 768);
    write_png(&root.join("assets/slide_2_teacher_1769953999000.png"), 800, 800);

    let manifest = root.join("deck.yaml");
    fs::write(
        &manifest,
        r#"assets_dir: assets
slides:
  - title: "Cover"
    content: "Welcome to the product."
    kind: title
  - title: "Teachers"
    content: "Empower your team.\n\n• Smart attendance\n• Growth tracking"
  - title: "Next Steps"
    content: "1. Sign up.\n2. Invite students."
images:
  0: slide_1_cover_1769953112508.png
  1: slide_2_teacher_v2.png
  2: slide_3_next_steps_1769952979078.png
"#,
    )
    .expect("write manifest");
    manifest
}
