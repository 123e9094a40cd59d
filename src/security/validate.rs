use super::error::{SecurityError, ValidationResult};

/// Longest accepted path, in bytes (exclusive).
pub const MAX_PATH_LENGTH: usize = 4096;

/// Largest image file we are willing to hand to the decoder (100 MiB).
pub const MAX_FILE_SIZE: i64 = 100 * 1024 * 1024;

/// Characters that are unsafe in filenames on at least one common filesystem.
const UNSAFE_FILENAME_CHARS: &[u8] = b"<>:\"|?*";

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Check a user-supplied path before it touches the filesystem.
///
/// Any path containing `..` is rejected, including harmless names such as
/// `a..b.png`. The check is intentionally coarse.
pub fn validate_filepath(path: &str) -> ValidationResult {
    if path.is_empty() || path.contains('\0') {
        return Err(SecurityError::InvalidInput);
    }
    if path.len() >= MAX_PATH_LENGTH {
        return Err(SecurityError::PathTooLong);
    }
    if path.contains("..") {
        return Err(SecurityError::AccessDenied);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filenames
// ---------------------------------------------------------------------------

/// Rewrite a NUL-terminated filename buffer in place so it is safe to display.
///
/// The logical content ends at the first NUL, which must lie before `max_len`
/// and inside `buf`; an unterminated buffer is refused as too long. Unsafe
/// filesystem characters and bytes that are neither printable ASCII nor ASCII
/// whitespace become `_`. Once the length check passes this never fails.
pub fn sanitize_filename(buf: &mut [u8], max_len: usize) -> ValidationResult {
    if max_len == 0 || buf.is_empty() {
        return Err(SecurityError::InvalidInput);
    }

    let len = logical_len(buf);
    if len >= max_len || len == buf.len() {
        return Err(SecurityError::PathTooLong);
    }

    for byte in &mut buf[..len] {
        if UNSAFE_FILENAME_CHARS.contains(byte) || !(is_print(*byte) || is_space(*byte)) {
            *byte = b'_';
        }
    }
    Ok(())
}

/// Number of bytes before the first NUL.
pub fn logical_len(buf: &[u8]) -> usize {
    buf.iter().position(|&b| b == 0).unwrap_or(buf.len())
}

fn is_print(b: u8) -> bool {
    b.is_ascii_graphic() || b == b' '
}

// `is_ascii_whitespace` leaves out vertical tab.
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Check a file size reported by `stat` against the decode ceiling.
pub fn validate_image_size(size: i64) -> ValidationResult {
    if size < 0 {
        return Err(SecurityError::InvalidInput);
    }
    if size > MAX_FILE_SIZE {
        return Err(SecurityError::FileTooLarge);
    }
    Ok(())
}
