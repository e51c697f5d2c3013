use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;

/// Product as exposed to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub sub_category: Option<String>,
    pub sizes: Vec<String>,
    pub bestseller: bool,
    pub image: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.map(|d| d.into_inner()),
            price: value.price.get(),
            category: value.category.into_inner(),
            sub_category: value.sub_category.map(|s| s.into_inner()),
            sizes: value.sizes.into_iter().map(String::from).collect(),
            bestseller: value.bestseller,
            image: value.images.into_iter().map(String::from).collect(),
            created_at: value.created_at,
        }
    }
}
