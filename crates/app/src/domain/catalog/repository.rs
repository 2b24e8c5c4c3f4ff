//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::catalog::models::{
    Product, ProductDetails, ProductId, Variant, VariantId, VariantWithProduct,
};

const GET_VARIANT_WITH_PRODUCT_SQL: &str = include_str!("sql/get_variant_with_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_PRODUCT_VARIANTS_SQL: &str = include_str!("sql/list_product_variants.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Column prefix used when variant columns are joined into a wider row.
const VARIANT_PREFIX: &str = "variant_";

/// Column prefix used when product columns are joined into a wider row.
const PRODUCT_PREFIX: &str = "product_";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantId,
    ) -> Result<Option<VariantWithProduct>, sqlx::Error> {
        query_as::<Postgres, VariantWithProduct>(GET_VARIANT_WITH_PRODUCT_SQL)
            .bind(variant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<Variant>, sqlx::Error> {
        query_as::<Postgres, Variant>(LIST_PRODUCT_VARIANTS_SQL)
            .bind(product.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details: &ProductDetails,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(details.name.as_str())
            .bind(details.description.as_str())
            .bind(details.base_price)
            .bind(details.category_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        details: &ProductDetails,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(details.name.as_str())
            .bind(details.description.as_str())
            .bind(details.base_price)
            .bind(details.category_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete a product and, by cascade, its variants.
    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        product_from_row(row, "")
    }
}

impl<'r> FromRow<'r, PgRow> for Variant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        variant_from_row(row, "")
    }
}

impl<'r> FromRow<'r, PgRow> for VariantWithProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            variant: variant_from_row(row, VARIANT_PREFIX)?,
            product: product_from_row(row, PRODUCT_PREFIX)?,
        })
    }
}

fn product_from_row(row: &PgRow, prefix: &str) -> sqlx::Result<Product> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(Product {
        id: ProductId::from_i64(row.try_get(column("id").as_str())?),
        name: row.try_get(column("name").as_str())?,
        description: row.try_get(column("description").as_str())?,
        base_price: row.try_get::<Decimal, _>(column("base_price").as_str())?,
        category_id: row.try_get(column("category_id").as_str())?,
        image: row.try_get(column("image").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
    })
}

fn variant_from_row(row: &PgRow, prefix: &str) -> sqlx::Result<Variant> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(Variant {
        id: VariantId::from_i64(row.try_get(column("id").as_str())?),
        product_id: ProductId::from_i64(row.try_get(column("product_id").as_str())?),
        sku: row.try_get(column("sku").as_str())?,
        color: row.try_get(column("color").as_str())?,
        size: row.try_get(column("size").as_str())?,
        extra_price: row.try_get::<Decimal, _>(column("extra_price").as_str())?,
        stock_qty: row.try_get(column("stock_qty").as_str())?,
        image_url: row.try_get(column("image_url").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
    })
}
