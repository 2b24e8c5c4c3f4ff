//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::models::{CartId, CartItem, CartItemId, CartLine},
    catalog::models::{VariantId, VariantWithProduct},
    users::models::UserId,
};

const FIND_ITEM_SQL: &str = include_str!("../sql/find_item.sql");
const FIND_OWNED_ITEM_SQL: &str = include_str!("../sql/find_owned_item.sql");
const UPSERT_ITEM_SQL: &str = include_str!("../sql/upsert_item.sql");
const SET_ITEM_QUANTITY_SQL: &str = include_str!("../sql/set_item_quantity.sql");
const DELETE_ITEM_SQL: &str = include_str!("../sql/delete_item.sql");
const DELETE_ALL_ITEMS_SQL: &str = include_str!("../sql/delete_all_items.sql");
const LIST_CART_LINES_SQL: &str = include_str!("../sql/list_cart_lines.sql");

const ITEM_PREFIX: &str = "item_";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        variant: VariantId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(variant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find an item in `user`'s active cart. Items in other carts are absent.
    pub(crate) async fn find_owned_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        item: CartItemId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_OWNED_ITEM_SQL)
            .bind(item.into_i64())
            .bind(user.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Add `quantity` of `variant` to `cart`, merging with an existing line and
    /// re-snapshotting its unit price.
    ///
    /// The stock check happens in the same statement as the write; `None`
    /// means the resulting quantity would exceed stock and nothing changed.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        variant: VariantId,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(UPSERT_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(variant.into_i64())
            .bind(quantity)
            .bind(unit_price)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Set the quantity of `item` if stock allows. The unit price is kept.
    pub(crate) async fn set_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(SET_ITEM_QUANTITY_SQL)
            .bind(item.into_i64())
            .bind(quantity)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_all_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ALL_ITEMS_SQL)
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        item_from_row(row, "")
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            item: item_from_row(row, ITEM_PREFIX)?,
            variant: VariantWithProduct::from_row(row)?,
        })
    }
}

fn item_from_row(row: &PgRow, prefix: &str) -> sqlx::Result<CartItem> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(CartItem {
        id: CartItemId::from_i64(row.try_get(column("id").as_str())?),
        cart_id: CartId::from_i64(row.try_get(column("cart_id").as_str())?),
        variant_id: VariantId::from_i64(row.try_get(column("variant_id").as_str())?),
        quantity: row.try_get(column("qty").as_str())?,
        unit_price: row.try_get::<Decimal, _>(column("unit_price").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
    })
}
