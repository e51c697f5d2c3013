use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::models::product_image::{NewProductImage, ProductImage};
use crate::repository::{DieselRepository, ProductReader, ProductWriter, RepositoryResult};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        let items = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        let images = ProductImage::belonging_to(&items)
            .order(product_images::position.asc())
            .load::<ProductImage>(&mut conn)?
            .grouped_by(&items);

        let items = items
            .into_iter()
            .zip(images)
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        let product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let Some(product) = product else {
            return Ok(None);
        };

        let images = ProductImage::belonging_to(&product)
            .order(product_images::position.asc())
            .load::<ProductImage>(&mut conn)?;

        Ok(Some((product, images).try_into()?))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<ProductId> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.into();

        let id = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let id = diesel::insert_into(products::table)
                .values(&db_product)
                .returning(products::id)
                .get_result::<i32>(conn)?;

            let images = product
                .images
                .iter()
                .enumerate()
                .map(|(position, url)| NewProductImage {
                    product_id: id,
                    position: position as i32,
                    url: url.as_str().to_string(),
                })
                .collect::<Vec<_>>();

            if !images.is_empty() {
                diesel::insert_into(product_images::table)
                    .values(&images)
                    .execute(conn)?;
            }

            Ok(id)
        })?;

        Ok(ProductId::new(id)?)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(product_images::table.filter(product_images::product_id.eq(id.get())))
                .execute(conn)?;

            diesel::delete(products::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }
}
