//! Synthetic media bytes for unit tests.

/// Minimal JPEG: SOI, an APP1 Exif segment carrying IFD0 -> Exif IFD ->
/// DateTimeOriginal, then EOI.
pub fn jpeg_with_date_taken(date: &str) -> Vec<u8> {
    let mut ascii = date.as_bytes().to_vec();
    ascii.push(0);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    // IFD0 at 8: one entry pointing at the Exif IFD.
    let exif_ifd_offset = 8 + 2 + 12 + 4;
    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_ifd_entry(&mut tiff, 0x8769, 4, 1, exif_ifd_offset);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let value_offset = exif_ifd_offset + 2 + 12 + 4;
    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_ifd_entry(&mut tiff, 0x9003, 2, ascii.len() as u32, value_offset);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&ascii);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn jpeg_without_exif() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

fn push_ifd_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}

/// `ftyp` followed by `moov` holding a version-0 `mvhd`.
pub fn mp4_with_creation_time(seconds_since_1904: u32) -> Vec<u8> {
    let mut out = ftyp_box();

    let mut mvhd = vec![0u8; 4];
    mvhd.extend_from_slice(&seconds_since_1904.to_be_bytes());
    mvhd.extend_from_slice(&seconds_since_1904.to_be_bytes());
    mvhd.extend_from_slice(&1000u32.to_be_bytes());
    mvhd.resize(100, 0);

    out.extend_from_slice(&mp4_box(b"moov", &mp4_box(b"mvhd", &mvhd)));
    out
}

pub fn ftyp_box() -> Vec<u8> {
    mp4_box(b"ftyp", b"isom\0\0\x02\0isomiso2mp41")
}

pub fn mp4_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    out
}
