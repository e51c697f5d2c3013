use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductName, ProductPrice, SizeLabel,
    SubCategoryName, TypeConstraintError,
};
use crate::models::product_image::ProductImage;

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub sub_category: Option<String>,
    /// JSON-encoded array of size labels.
    pub sizes: String,
    pub bestseller: bool,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub sub_category: Option<String>,
    pub sizes: String,
    pub bestseller: bool,
    pub created_at: NaiveDateTime,
}

fn decode_sizes(raw: &str) -> Result<Vec<SizeLabel>, TypeConstraintError> {
    let labels: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("stored sizes: {e}")))?;
    labels.into_iter().map(SizeLabel::new).collect()
}

fn encode_sizes(sizes: &[SizeLabel]) -> String {
    let labels: Vec<&str> = sizes.iter().map(SizeLabel::as_str).collect();
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}

impl TryFrom<(Product, Vec<ProductImage>)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, mut images): (Product, Vec<ProductImage>)) -> Result<Self, Self::Error> {
        images.sort_by_key(|image| image.position);
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            description: product
                .description
                .map(ProductDescription::new)
                .transpose()?,
            price: ProductPrice::new(product.price)?,
            category: CategoryName::new(product.category)?,
            sub_category: product.sub_category.map(SubCategoryName::new).transpose()?,
            sizes: decode_sizes(&product.sizes)?,
            bestseller: product.bestseller,
            images: images
                .into_iter()
                .map(|image| ImageUrl::new(image.url))
                .collect::<Result<_, _>>()?,
            created_at: product.created_at,
        })
    }
}

impl From<&DomainNewProduct> for NewProduct {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            description: product
                .description
                .as_ref()
                .map(|d| d.as_str().to_string()),
            price: product.price.get(),
            category: product.category.as_str().to_string(),
            sub_category: product
                .sub_category
                .as_ref()
                .map(|s| s.as_str().to_string()),
            sizes: encode_sizes(&product.sizes),
            bestseller: product.bestseller,
            created_at: product.created_at,
        }
    }
}
