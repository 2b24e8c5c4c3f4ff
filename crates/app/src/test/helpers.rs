//! Test Helpers
//!
//! Catalog rows have no write path in the services, so tests seed them here.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::query;

use crate::{
    domain::{
        carts::models::CartId,
        catalog::models::{ProductId, VariantId},
        users::{
            UsersService,
            models::{AddressId, NewUser, UserId, UserRole},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_user(ctx: &TestContext, email: &str) -> UserId {
    ctx.users
        .create_user(NewUser {
            email: email.to_string(),
            role: UserRole::Customer,
        })
        .await
        .expect("Failed to create test user")
        .id
}

pub(crate) async fn seed_product(ctx: &TestContext, name: &str, base_price: Decimal) -> ProductId {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO products (name, base_price) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(base_price)
            .fetch_one(ctx.db.pool())
            .await
            .expect("Failed to seed product");

    ProductId::from_i64(id)
}

pub(crate) async fn seed_variant(
    ctx: &TestContext,
    product: ProductId,
    sku: &str,
    extra_price: Decimal,
    stock_qty: i32,
) -> VariantId {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO variants (product_id, sku, extra_price, stock_qty) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(product.into_i64())
    .bind(sku)
    .bind(extra_price)
    .bind(stock_qty)
    .fetch_one(ctx.db.pool())
    .await
    .expect("Failed to seed variant");

    VariantId::from_i64(id)
}

pub(crate) async fn set_base_price(ctx: &TestContext, product: ProductId, base_price: Decimal) {
    query("UPDATE products SET base_price = $2 WHERE id = $1")
        .bind(product.into_i64())
        .bind(base_price)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to update base price");
}

pub(crate) async fn count_active_carts(ctx: &TestContext, user: UserId) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM carts WHERE user_id = $1 AND status = 'active'")
        .bind(user.into_i64())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count carts")
}

/// Make every `UPDATE` on `carts` fail from now on.
pub(crate) async fn reject_cart_updates(ctx: &TestContext) {
    for statement in [
        "CREATE FUNCTION reject_cart_update() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'cart updates rejected'; END \
         $$ LANGUAGE plpgsql",
        "CREATE TRIGGER reject_cart_update BEFORE UPDATE ON carts \
         FOR EACH ROW EXECUTE FUNCTION reject_cart_update()",
    ] {
        query(statement)
            .execute(ctx.db.pool())
            .await
            .expect("Failed to install cart update trigger");
    }
}

/// Insert an active cart directly, bypassing the service and its lock.
pub(crate) async fn insert_active_cart(ctx: &TestContext, user: UserId) -> CartId {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO carts (user_id, status) VALUES ($1, 'active') RETURNING id",
    )
    .bind(user.into_i64())
    .fetch_one(ctx.db.pool())
    .await
    .expect("Failed to insert cart");

    CartId::from_i64(id)
}

pub(crate) async fn cart_updated_at(ctx: &TestContext, cart: CartId) -> Timestamp {
    sqlx::query_scalar::<_, SqlxTimestamp>("SELECT updated_at FROM carts WHERE id = $1")
        .bind(cart.into_i64())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to read cart timestamp")
        .to_jiff()
}

/// Silently drop every row inserted into `carts` from now on.
pub(crate) async fn discard_cart_inserts(ctx: &TestContext) {
    for statement in [
        "CREATE FUNCTION discard_cart_insert() RETURNS trigger AS $$ \
         BEGIN RETURN NULL; END \
         $$ LANGUAGE plpgsql",
        "CREATE TRIGGER discard_cart_insert BEFORE INSERT ON carts \
         FOR EACH ROW EXECUTE FUNCTION discard_cart_insert()",
    ] {
        query(statement)
            .execute(ctx.db.pool())
            .await
            .expect("Failed to install cart insert trigger");
    }
}

pub(crate) async fn seed_address(
    ctx: &TestContext,
    user: UserId,
    name: &str,
    is_default: bool,
) -> AddressId {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO addresses (user_id, name, line1, city, postal_code, country, is_default) \
         VALUES ($1, $2, '1 Optic Way', 'Lisbon', '1000-001', 'PT', $3) RETURNING id",
    )
    .bind(user.into_i64())
    .bind(name)
    .bind(is_default)
    .fetch_one(ctx.db.pool())
    .await
    .expect("Failed to seed address");

    AddressId::from_i64(id)
}
