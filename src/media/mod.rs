/// Media layer: decoding, texture ownership and file metadata.
///
/// Architecture:
/// ```text
///   validated path
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  loader   │          │ metadata  │  stat + second decode
///   └──────────┘          └──────────┘
///        │  Decoder → DecodedSurface
///        ▼
///   ┌──────────┐
///   │ texture   │  TextureUploader → ImageSlot
///   └──────────┘
/// ```

pub mod decode;
pub mod loader;
pub mod metadata;
pub mod texture;
