use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{compiler_fence, Ordering};

use super::error::{SecurityError, ValidationResult};
use super::validate::logical_len;

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Copy `src` into `dest`, stopping at the first NUL in `src` and leaving room
/// for a terminating NUL. Returns the number of bytes copied.
pub fn bounded_copy(dest: &mut [u8], src: &[u8]) -> usize {
    if dest.is_empty() {
        return 0;
    }
    let n = logical_len(src).min(dest.len() - 1);
    dest[..n].copy_from_slice(&src[..n]);
    dest[n] = 0;
    n
}

/// Overwrite `buf` with zeros in a way the optimizer cannot drop.
pub fn secure_zero(buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        // SAFETY: `byte` is a valid, aligned, exclusive reference.
        unsafe { std::ptr::write_volatile(byte, 0) };
    }
    compiler_fence(Ordering::SeqCst);
}

// ---------------------------------------------------------------------------
// SecureBuffer – checked, zero-initialised, wiped on drop
// ---------------------------------------------------------------------------

/// Heap buffer for user-derived bytes. Allocation is checked and the contents
/// are wiped before the memory is returned to the allocator.
pub struct SecureBuffer {
    bytes: Vec<u8>,
}

impl SecureBuffer {
    /// Largest single request we accept.
    pub const MAX_ALLOCATION: usize = isize::MAX as usize / 2;

    pub fn allocate(size: usize) -> ValidationResult<Self> {
        if size == 0 || size > Self::MAX_ALLOCATION {
            return Err(SecurityError::AllocationFailure);
        }
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| SecurityError::AllocationFailure)?;
        bytes.resize(size, 0);
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Bytes before the first NUL.
    pub fn content(&self) -> &[u8] {
        &self.bytes[..logical_len(&self.bytes)]
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        secure_zero(&mut self.bytes);
    }
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureBuffer").field("len", &self.len()).finish()
    }
}

// ---------------------------------------------------------------------------
// SecureString – bounded text, wiped on drop
// ---------------------------------------------------------------------------

/// A string holding user-derived text (paths, names, overlay lines).
///
/// Construction truncates to fewer than `max_len` bytes on a char boundary,
/// mirroring [`bounded_copy`]. The bytes are zeroed when the value is dropped.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SecureString(String);

impl SecureString {
    pub fn bounded(text: &str, max_len: usize) -> Self {
        if max_len == 0 {
            return Self::default();
        }
        let mut end = text.len().min(max_len - 1);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self(text[..end].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecureString {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Drop for SecureString {
    fn drop(&mut self) {
        let mut bytes = std::mem::take(&mut self.0).into_bytes();
        secure_zero(&mut bytes);
    }
}
