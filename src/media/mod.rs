//! Media helpers: image encoding for request payloads and scoped temporary
//! files for per-request artefacts.
//!
//! * [`encode_image`] / [`EncodedImage`]: read an image and base64 it.
//! * [`ScratchSpace`]: allocates [`ScopedFile`]s that delete themselves on
//!   drop unless explicitly kept.

pub mod image;
pub mod scratch;

pub use image::{encode_image, EncodedImage, IMAGE_MIME_TYPE};
pub use scratch::{ScopedFile, ScratchSpace};
