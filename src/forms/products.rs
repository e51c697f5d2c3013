use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductId, ProductName, ProductPrice, SizeLabel,
    SubCategoryName, TypeConstraintError,
};
use crate::image_store::{ImageSlot, ImageUpload};

/// Multipart body of the add-product request.
///
/// Every field is optional here so that a missing field is reported as a
/// validation failure instead of an extractor error.
#[derive(MultipartForm)]
pub struct AddProductMultipartForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub category: Option<Text<String>>,
    #[multipart(rename = "subCategory")]
    pub sub_category: Option<Text<String>>,
    pub sizes: Option<Text<String>>,
    pub bestseller: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image1: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image2: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image3: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image4: Option<TempFile>,
}

/// Price as submitted: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// Boolean flag as submitted: a JSON boolean or text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Text(String),
}

impl FlagInput {
    /// Only `true` and the exact text `"true"` count as set.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => value == "true",
        }
    }
}

/// Size labels as submitted: a list, or a JSON-encoded list in text form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SizesInput {
    List(Vec<String>),
    Encoded(String),
}

impl SizesInput {
    fn decode(self) -> Result<Vec<SizeLabel>, AddProductFormError> {
        let labels = match self {
            Self::List(labels) => labels,
            Self::Encoded(raw) if raw.trim().is_empty() => Vec::new(),
            Self::Encoded(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .map_err(|e| AddProductFormError::MalformedSizes(e.to_string()))?,
        };

        labels
            .into_iter()
            .map(SizeLabel::new)
            .collect::<Result<_, _>>()
            .map_err(|e| AddProductFormError::MalformedSizes(e.to_string()))
    }
}

/// Typed add-product input before domain validation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductForm {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(required)]
    pub price: Option<PriceInput>,
    #[validate(required, length(min = 1))]
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub sizes: Option<SizesInput>,
    pub bestseller: Option<FlagInput>,
}

/// Validated add-product input.
#[derive(Debug, Clone, PartialEq)]
pub struct AddProductPayload {
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub sub_category: Option<SubCategoryName>,
    pub sizes: Vec<SizeLabel>,
    pub bestseller: bool,
}

impl AddProductPayload {
    pub fn into_new_product(self, images: Vec<ImageUrl>) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            sub_category: self.sub_category,
            sizes: self.sizes,
            bestseller: self.bestseller,
            images,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AddProductFormError {
    #[error("Please fill all required fields")]
    MissingRequiredFields,
    #[error("{0}")]
    Validation(String),
    #[error("sizes must be a JSON array of size labels: {0}")]
    MalformedSizes(String),
    #[error("failed to read uploaded {0}")]
    Upload(ImageSlot),
}

impl From<ValidationErrors> for AddProductFormError {
    fn from(_: ValidationErrors) -> Self {
        Self::MissingRequiredFields
    }
}

fn required<T, F>(value: Option<String>, build: F) -> Result<T, AddProductFormError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value.map(build) {
        Some(Ok(value)) => Ok(value),
        Some(Err(TypeConstraintError::EmptyString(_))) | None => {
            Err(AddProductFormError::MissingRequiredFields)
        }
        Some(Err(e)) => Err(AddProductFormError::Validation(e.to_string())),
    }
}

fn optional<T, F>(value: Option<String>, build: F) -> Result<Option<T>, AddProductFormError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value {
        Some(value) if !value.trim().is_empty() => build(value)
            .map(Some)
            .map_err(|e| AddProductFormError::Validation(e.to_string())),
        _ => Ok(None),
    }
}

impl TryFrom<AddProductForm> for AddProductPayload {
    type Error = AddProductFormError;

    fn try_from(value: AddProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let price = match value.price {
            Some(PriceInput::Number(number)) => ProductPrice::new(number),
            Some(PriceInput::Text(text)) => ProductPrice::parse(&text),
            None => return Err(AddProductFormError::MissingRequiredFields),
        }
        .map_err(|e| match e {
            TypeConstraintError::EmptyString(_) => AddProductFormError::MissingRequiredFields,
            other => AddProductFormError::Validation(other.to_string()),
        })?;

        Ok(Self {
            name: required(value.name, ProductName::new)?,
            description: optional(value.description, ProductDescription::new)?,
            price,
            category: required(value.category, CategoryName::new)?,
            sub_category: optional(value.sub_category, SubCategoryName::new)?,
            sizes: value
                .sizes
                .map(SizesInput::decode)
                .transpose()?
                .unwrap_or_default(),
            bestseller: value.bestseller.is_some_and(|flag| flag.is_set()),
        })
    }
}

fn text(value: Option<Text<String>>) -> Option<String> {
    value.map(Text::into_inner)
}

fn read_image(slot: ImageSlot, mut file: TempFile) -> Result<ImageUpload, AddProductFormError> {
    let mut bytes = Vec::with_capacity(file.size);
    file.file
        .seek(SeekFrom::Start(0))
        .and_then(|_| file.file.read_to_end(&mut bytes))
        .map_err(|_| AddProductFormError::Upload(slot))?;

    Ok(ImageUpload {
        slot,
        file_name: file.file_name,
        content_type: file.content_type.map(|mime| mime.to_string()),
        bytes,
    })
}

impl AddProductMultipartForm {
    /// Split the multipart body into its text fields and the present image
    /// slots, in slot order. Empty file parts count as absent.
    pub fn into_parts(self) -> Result<(AddProductForm, Vec<ImageUpload>), AddProductFormError> {
        let files = [self.image1, self.image2, self.image3, self.image4];

        let mut images = Vec::new();
        for (slot, file) in ImageSlot::ALL.into_iter().zip(files) {
            if let Some(file) = file.filter(|f| f.size > 0) {
                images.push(read_image(slot, file)?);
            }
        }

        let form = AddProductForm {
            name: text(self.name),
            description: text(self.description),
            price: text(self.price).map(PriceInput::Text),
            category: text(self.category),
            sub_category: text(self.sub_category),
            sizes: text(self.sizes).map(SizesInput::Encoded),
            bestseller: text(self.bestseller).map(FlagInput::Text),
        };

        Ok((form, images))
    }
}

/// Product identifier as submitted: a JSON number or text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProductIdInput {
    Number(i64),
    Text(String),
}

impl TryFrom<ProductIdInput> for ProductId {
    type Error = TypeConstraintError;

    fn try_from(value: ProductIdInput) -> Result<Self, Self::Error> {
        match value {
            ProductIdInput::Number(number) => ProductId::try_from(number),
            ProductIdInput::Text(text) => text.parse(),
        }
    }
}

/// JSON body of the remove-product request.
#[derive(Debug, Deserialize)]
pub struct RemoveProductRequest {
    pub id: ProductIdInput,
}

/// JSON body of the single-product request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleProductRequest {
    pub product_id: ProductIdInput,
}
