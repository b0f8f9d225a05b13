//! Product data access - product types and the products offered under them.

use crate::{
    entities::{Product, ProductType, product, product_type},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Columns for a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product code
    pub product_cd: String,
    /// Name
    pub name: String,
    /// Product type code
    pub product_type_cd: String,
    /// Date first offered, nullable
    pub date_offered: Option<Date>,
    /// Date retired, nullable
    pub date_retired: Option<Date>,
}

/// Creates a product type with the given code.
#[instrument(skip(db))]
pub async fn create_product_type(
    db: &DatabaseConnection,
    product_type_cd: String,
    name: String,
) -> Result<product_type::Model> {
    let product_type = product_type::ActiveModel {
        product_type_cd: Set(product_type_cd),
        name: Set(name),
    };
    let result = product_type.insert(db).await?;
    info!("Created product type {}", result.product_type_cd);
    Ok(result)
}

/// Creates a product under an existing product type.
#[instrument(skip(db, new_product), fields(product_cd = %new_product.product_cd))]
pub async fn create_product(db: &DatabaseConnection, new_product: NewProduct) -> Result<product::Model> {
    let product = product::ActiveModel {
        product_cd: Set(new_product.product_cd),
        name: Set(new_product.name),
        product_type_cd: Set(new_product.product_type_cd),
        date_offered: Set(new_product.date_offered),
        date_retired: Set(new_product.date_retired),
    };
    let result = product.insert(db).await?;
    info!("Created product {}", result.product_cd);
    Ok(result)
}

/// Finds a product type by its code.
pub async fn get_product_type_by_code(
    db: &DatabaseConnection,
    product_type_cd: &str,
) -> Result<Option<product_type::Model>> {
    ProductType::find_by_id(product_type_cd.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its code.
pub async fn get_product_by_code(
    db: &DatabaseConnection,
    product_cd: &str,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_cd.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all products of a given type, ordered by code.
pub async fn get_products_for_type(
    db: &DatabaseConnection,
    product_type_cd: &str,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::ProductTypeCd.eq(product_type_cd))
        .order_by_asc(product::Column::ProductCd)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a product as retired on the given date.
///
/// # Errors
/// Returns `Error::NotFound` if the product does not exist.
#[instrument(skip(db))]
pub async fn retire_product(
    db: &DatabaseConnection,
    product_cd: &str,
    date_retired: Date,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_cd.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product", product_cd))?
        .into();

    product.date_retired = Set(Some(date_retired));
    product.update(db).await.map_err(Into::into)
}
