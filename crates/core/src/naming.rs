use chrono::{DateTime, Local};
use rand::Rng;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SUFFIX_LEN: usize = 4;
pub const DATE_STAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("日付ラベルが空です")]
    Empty,
    #[error("日付ラベルに使用できない文字が含まれています: {0:?}")]
    InvalidChar(char),
}

/// Uniform draw with replacement from `A-Z0-9`.
pub fn generate_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// `.ext` exactly as written on disk, or empty. Not required to be UTF-8.
pub fn extension_with_dot(path: &Path) -> OsString {
    let mut out = OsString::new();
    if let Some(ext) = path.extension() {
        out.push(".");
        out.push(ext);
    }
    out
}

fn stamped_stem(date: &DateTime<Local>, suffix: &str) -> String {
    format!("{}_{}", date.format(DATE_STAMP_FORMAT), suffix)
}

pub fn build_stamped_name(date: &DateTime<Local>, suffix: &str, extension: &OsStr) -> OsString {
    let mut name = OsString::from(stamped_stem(date, suffix));
    name.push(extension);
    name
}

pub fn build_labeled_name(label: &str, suffix: &str, extension: &OsStr) -> OsString {
    let mut name = OsString::from(format!("{}_{}", label, suffix));
    name.push(extension);
    name
}

pub fn validate_label(label: &str) -> Result<(), LabelError> {
    if label.trim().is_empty() {
        return Err(LabelError::Empty);
    }
    if let Some(ch) = label.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(LabelError::InvalidChar(ch));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        build_labeled_name, build_stamped_name, extension_with_dot, generate_suffix,
        validate_label, LabelError, DEFAULT_SUFFIX_LEN,
    };
    use chrono::{Local, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::ffi::OsStr;
    use std::path::Path;

    #[test]
    fn suffix_has_requested_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [0, 1, DEFAULT_SUFFIX_LEN, 12] {
            let suffix = generate_suffix(&mut rng, len);
            assert_eq!(suffix.len(), len);
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn suffix_calls_are_independent() {
        let mut rng = rand::thread_rng();
        let suffixes: Vec<String> = (0..32).map(|_| generate_suffix(&mut rng, 8)).collect();
        let first = &suffixes[0];
        assert!(suffixes.iter().any(|s| s != first));
    }

    #[test]
    fn stamped_name_preserves_extension_case() {
        let date = Local
            .with_ymd_and_hms(2023, 5, 1, 10, 0, 0)
            .earliest()
            .expect("valid");
        assert_eq!(
            build_stamped_name(&date, "AB12", OsStr::new(".JPG")),
            "2023-05-01_100000_AB12.JPG"
        );
        assert_eq!(
            build_stamped_name(&date, "AB12", OsStr::new("")),
            "2023-05-01_100000_AB12"
        );
    }

    #[test]
    fn labeled_name_uses_label_verbatim() {
        assert_eq!(
            build_labeled_name("2023_07_00", "Z9Z9", OsStr::new(".heic")),
            "2023_07_00_Z9Z9.heic"
        );
    }

    #[test]
    fn extension_with_dot_keeps_last_segment_only() {
        assert_eq!(extension_with_dot(Path::new("/tmp/a.tar.GZ")), ".GZ");
        assert_eq!(extension_with_dot(Path::new("/tmp/README")), "");
        assert_eq!(extension_with_dot(Path::new("/tmp/.hidden")), "");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_extension_survives_byte_for_byte() {
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/clip.m\xffv"));
        let ext = extension_with_dot(path);
        assert_eq!(ext.as_bytes(), b".m\xffv");

        let name = build_labeled_name("2023_07_00", "AAAA", &ext);
        assert_eq!(name.as_bytes(), b"2023_07_00_AAAA.m\xffv");
    }

    #[test]
    fn validate_label_rejects_empty_and_separators() {
        assert_eq!(validate_label("  "), Err(LabelError::Empty));
        assert_eq!(validate_label("2023/07"), Err(LabelError::InvalidChar('/')));
        assert_eq!(validate_label("a\\b"), Err(LabelError::InvalidChar('\\')));
        assert!(validate_label("2023_07_00").is_ok());
    }
}
