use std::sync::Arc;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::products::ProductDto;
use crate::dto::responses::{AckResponse, ProductListResponse, ProductResponse};
use crate::forms::products::{
    AddProductMultipartForm, AddProductPayload, RemoveProductRequest, SingleProductRequest,
};
use crate::image_store::ImageStore;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::products::{
    add_product as add_product_service, get_product as get_product_service,
    list_products as list_products_service, remove_product as remove_product_service,
};

#[post("/api/product/add")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    image_store: web::Data<Arc<dyn ImageStore>>,
    MultipartForm(form): MultipartForm<AddProductMultipartForm>,
) -> impl Responder {
    let (form, images) = match form.into_parts() {
        Ok(parts) => parts,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    let payload: AddProductPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            let err = ServiceError::from(e);
            log::warn!("Rejected product: {err}");
            return error_response(&err);
        }
    };

    match add_product_service(
        payload,
        images,
        repo.get_ref(),
        image_store.get_ref().as_ref(),
    )
    .await
    {
        Ok(_) => HttpResponse::Ok().json(AckResponse::new("Product Added Successfully")),
        Err(err) => error_response(&err),
    }
}

#[get("/api/product/list")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_products_service(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(ProductListResponse {
            success: true,
            products: products.into_iter().map(ProductDto::from).collect(),
        }),
        Err(err) => error_response(&err),
    }
}

#[post("/api/product/remove")]
pub async fn remove_product(
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<RemoveProductRequest>,
) -> impl Responder {
    match remove_product_service(request.id, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(AckResponse::new("Product Removed Successfully")),
        Err(err) => error_response(&err),
    }
}

#[post("/api/product/single")]
pub async fn single_product(
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<SingleProductRequest>,
) -> impl Responder {
    match get_product_service(request.product_id, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(ProductResponse {
            success: true,
            product: product.into(),
        }),
        Err(err) => error_response(&err),
    }
}
