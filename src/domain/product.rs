use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductId, ProductName, ProductPrice, SizeLabel,
    SubCategoryName,
};

/// A catalog product as persisted by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub sub_category: Option<SubCategoryName>,
    pub sizes: Vec<SizeLabel>,
    pub bestseller: bool,
    /// Image URLs ordered by upload slot (`image1`..`image4`).
    pub images: Vec<ImageUrl>,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
///
/// The identifier is assigned by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub sub_category: Option<SubCategoryName>,
    pub sizes: Vec<SizeLabel>,
    pub bestseller: bool,
    pub images: Vec<ImageUrl>,
    pub created_at: NaiveDateTime,
}
