use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::types::ImageUrl;
use crate::image_store::{ImageStore, ImageStoreError, ImageUpload, UploadedImage};
use crate::models::config::ImageStoreConfig;

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

impl From<reqwest::Error> for ImageStoreError {
    fn from(value: reqwest::Error) -> Self {
        ImageStoreError::Transport(value.to_string())
    }
}

/// Extract the human-readable message of a failed Cloudinary call.
fn rejection(status: StatusCode, body: &str) -> ImageStoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    ImageStoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn parse_upload_response(status: StatusCode, body: &str) -> Result<UploadedImage, ImageStoreError> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }

    let response: UploadResponse = serde_json::from_str(body)
        .map_err(|e| ImageStoreError::InvalidResponse(e.to_string()))?;
    let url = ImageUrl::new(response.secure_url)
        .map_err(|e| ImageStoreError::InvalidResponse(e.to_string()))?;

    Ok(UploadedImage {
        url,
        public_id: response.public_id,
    })
}

/// [`ImageStore`] backed by the Cloudinary upload API.
///
/// Uploads use an upload preset; removals go through the admin API with the
/// account's key and secret as basic auth.
pub struct CloudinaryImageStore {
    client: reqwest::Client,
    config: ImageStoreConfig,
}

impl CloudinaryImageStore {
    pub fn new(config: ImageStoreConfig) -> Result<Self, ImageStoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name,
            path
        )
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, image: &ImageUpload) -> Result<UploadedImage, ImageStoreError> {
        let file_name = image
            .file_name
            .clone()
            .unwrap_or_else(|| image.slot.field_name().to_string());
        let mut part = Part::bytes(image.bytes.clone()).file_name(file_name);
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .text("upload_preset", self.config.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("image/upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_upload_response(status, &body)
    }

    async fn remove(&self, image: &UploadedImage) -> Result<(), ImageStoreError> {
        let response = self
            .client
            .delete(self.endpoint("resources/image/upload"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&[("public_ids[]", image.public_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await?;
            Err(rejection(status, &body))
        }
    }

    fn max_concurrent_uploads(&self) -> usize {
        self.config.max_concurrent_uploads.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_successful_upload() {
        let body = r#"{
            "public_id": "products/abc123",
            "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/products/abc123.jpg",
            "resource_type": "image"
        }"#;

        let image = parse_upload_response(StatusCode::OK, body).unwrap();

        assert_eq!(image.public_id, "products/abc123");
        assert_eq!(
            image.url,
            "https://res.cloudinary.com/demo/image/upload/v1/products/abc123.jpg"
        );
    }

    #[test]
    fn surfaces_provider_error_message() {
        let body = r#"{"error":{"message":"Upload preset not found"}}"#;

        let err = parse_upload_response(StatusCode::BAD_REQUEST, body).unwrap_err();

        match err {
            ImageStoreError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Upload preset not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_response_without_url() {
        let err = parse_upload_response(StatusCode::OK, r#"{"public_id":"x"}"#).unwrap_err();
        assert!(matches!(err, ImageStoreError::InvalidResponse(_)));
    }

    #[test]
    fn builds_endpoint_from_config() {
        let store = CloudinaryImageStore::new(ImageStoreConfig {
            api_base: "https://api.cloudinary.com/v1_1/".into(),
            cloud_name: "demo".into(),
            ..ImageStoreConfig::default()
        })
        .unwrap();

        assert_eq!(
            store.endpoint("image/upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}
