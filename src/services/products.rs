use futures::StreamExt;
use futures::future::join_all;
use futures::stream;

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::forms::products::{AddProductPayload, ProductIdInput};
use crate::image_store::{ImageStore, ImageUpload, UploadedImage};
use crate::repository::{ProductReader, ProductWriter};

use super::{ServiceError, ServiceResult};

fn parse_product_id(id: ProductIdInput) -> ServiceResult<ProductId> {
    ProductId::try_from(id).map_err(|e| {
        log::warn!("Rejected product id: {e}");
        ServiceError::from(e)
    })
}

/// Best-effort removal of images that will not be referenced by any product.
async fn discard_uploaded<S>(store: &S, images: &[UploadedImage])
where
    S: ImageStore + ?Sized,
{
    let results = join_all(images.iter().map(|image| store.remove(image))).await;
    for (image, result) in images.iter().zip(results) {
        if let Err(e) = result {
            log::warn!("Failed to remove orphaned image {}: {e}", image.public_id);
        }
    }
}

/// Upload every image with at most `store.max_concurrent_uploads()` requests
/// in flight, returning the results in slot order.
///
/// The first failure drops the uploads still in flight and removes the ones
/// that already completed.
async fn upload_images<S>(store: &S, mut images: Vec<ImageUpload>) -> ServiceResult<Vec<UploadedImage>>
where
    S: ImageStore + ?Sized,
{
    images.sort_by_key(|image| image.slot);
    let limit = store.max_concurrent_uploads().max(1);

    let mut completed = Vec::with_capacity(images.len());
    let mut failure = None;
    {
        let mut pending = stream::iter(images.iter().enumerate())
            .map(|(index, image)| async move { (index, store.upload(image).await) })
            .buffer_unordered(limit);

        while let Some((index, result)) = pending.next().await {
            match result {
                Ok(uploaded) => completed.push((index, uploaded)),
                Err(e) => {
                    log::error!("Failed to upload {}: {e}", images[index].slot);
                    failure = Some(e);
                    break;
                }
            }
        }
    }

    completed.sort_by_key(|(index, _)| *index);
    let uploaded = completed
        .into_iter()
        .map(|(_, image)| image)
        .collect::<Vec<_>>();

    if let Some(e) = failure {
        discard_uploaded(store, &uploaded).await;
        return Err(e.into());
    }

    Ok(uploaded)
}

/// Creates a product from a validated payload and its submitted images.
///
/// Images are uploaded before the record is written; their URLs are stored
/// in slot order. If the write fails, the uploaded images are removed again.
pub async fn add_product<R, S>(
    payload: AddProductPayload,
    images: Vec<ImageUpload>,
    repo: &R,
    store: &S,
) -> ServiceResult<ProductId>
where
    R: ProductWriter,
    S: ImageStore + ?Sized,
{
    let uploaded = upload_images(store, images).await?;

    let product =
        payload.into_new_product(uploaded.iter().map(|image| image.url.clone()).collect());

    match repo.create_product(&product) {
        Ok(id) => {
            log::info!(
                "Created product {id} '{}' with {} image(s)",
                product.name,
                product.images.len()
            );
            Ok(id)
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            discard_uploaded(store, &uploaded).await;
            Err(e.into())
        }
    }
}

/// Returns every product in the catalog.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    repo.list_products().map_err(|e| {
        log::error!("Failed to list products: {e}");
        e.into()
    })
}

/// Deletes a product.
///
/// Removing an unknown id is not an error.
pub fn remove_product<R>(id: ProductIdInput, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    let id = parse_product_id(id)?;

    match repo.delete_product(id) {
        Ok(0) => {
            log::info!("Product {id} did not exist, nothing removed");
            Ok(())
        }
        Ok(_) => {
            log::info!("Removed product {id}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to remove product {id}: {e}");
            Err(e.into())
        }
    }
}

/// Fetches a single product.
pub fn get_product<R>(id: ProductIdInput, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let id = parse_product_id(id)?;

    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product {id}: {e}");
            Err(e.into())
        }
    }
}
