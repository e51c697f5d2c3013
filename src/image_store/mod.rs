//! Delegation of product image storage to an external hosting service.
//!
//! Services talk to the [`ImageStore`] trait only; the production
//! implementation lives in [`cloudinary`].

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::types::ImageUrl;

pub mod cloudinary;

/// Upper bound of simultaneous uploads when the store does not override it.
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: usize = 4;

/// Multipart slot an image was submitted in.
///
/// The derived ordering is the order images are stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSlot {
    Image1,
    Image2,
    Image3,
    Image4,
}

impl ImageSlot {
    /// Every slot, in storage order.
    pub const ALL: [ImageSlot; 4] = [Self::Image1, Self::Image2, Self::Image3, Self::Image4];

    /// Name of the multipart field carrying this slot.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Image1 => "image1",
            Self::Image2 => "image2",
            Self::Image3 => "image3",
            Self::Image4 => "image4",
        }
    }
}

impl Display for ImageSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A binary image waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub slot: ImageSlot,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// An image accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Public URL the image is served from.
    pub url: ImageUrl,
    /// Provider-side identifier used for removal.
    pub public_id: String,
}

/// Failures raised by image store implementations.
#[derive(Debug, Error)]
pub enum ImageStoreError {
    /// The request never produced a response (connect error, timeout, ...).
    #[error("image store request failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("image store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The service answered with a body that could not be understood.
    #[error("image store returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// External binary storage for product images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload an image and return where it is served from.
    async fn upload(&self, image: &ImageUpload) -> Result<UploadedImage, ImageStoreError>;

    /// Delete a previously uploaded image.
    async fn remove(&self, image: &UploadedImage) -> Result<(), ImageStoreError>;

    /// How many uploads of a single request may be in flight at once.
    fn max_concurrent_uploads(&self) -> usize {
        DEFAULT_MAX_CONCURRENT_UPLOADS
    }
}
