/// Security layer: input validation and sensitive-buffer handling.
///
/// Architecture:
/// ```text
///   untrusted path / filename / size
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  cheap, pure checks → ValidationResult
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  memory   │  bounded copies, zeroize-on-drop buffers
///   └──────────┘
/// ```

pub mod error;
pub mod memory;
pub mod validate;

pub use error::{SecurityError, ValidationResult};
