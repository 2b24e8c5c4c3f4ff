//! Carts service.
//!
//! Every mutation runs in one transaction that first takes a per-user advisory
//! lock, so concurrent requests from the same user are applied one at a time.
//! Stock limits are re-checked by the write statements themselves.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{AddCartItem, Cart, CartId, CartItemId},
            repositories::{PgCartItemsRepository, PgCartsRepository},
            view::CartView,
        },
        catalog::repository::PgCatalogRepository,
        users::models::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    catalog_repository: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
        }
    }

    /// Lock the user's carts for the rest of `tx` and return the active cart,
    /// creating it when absent.
    async fn lock_active_cart(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: UserId,
    ) -> Result<Cart, CartsServiceError> {
        self.carts_repository.lock_user_carts(tx, user).await?;

        if let Some(cart) = self.carts_repository.find_active_cart(tx, user).await? {
            return Ok(cart);
        }

        self.create_active_cart(tx, user).await
    }

    /// Insert the active cart, or read back the one a concurrent writer
    /// committed between our lookup and insert.
    async fn create_active_cart(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: UserId,
    ) -> Result<Cart, CartsServiceError> {
        if let Some(cart) = self.carts_repository.create_cart(tx, user).await? {
            debug!(user_id = %user, cart_id = %cart.id, "created active cart");

            return Ok(cart);
        }

        self.carts_repository
            .find_active_cart(tx, user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)
    }

    /// Bump the cart's `updated_at`. Failures are logged, not returned.
    async fn touch_cart(&self, cart: CartId) {
        let touched: Result<u64, sqlx::Error> = async {
            let mut tx = self.db.begin().await?;
            let rows_affected = self.carts_repository.touch_cart(&mut tx, cart).await?;

            tx.commit().await?;

            Ok(rows_affected)
        }
        .await;

        if let Err(source) = touched {
            warn!(cart_id = %cart, "failed to touch cart timestamp: {source}");
        }
    }

    async fn load_view(&self, cart: CartId) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;
        let lines = self.items_repository.list_cart_lines(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(CartView::assemble(cart, lines))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserId) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_active_cart(&mut tx, user).await?;
        let lines = self.items_repository.list_cart_lines(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(CartView::assemble(cart, lines))
    }

    async fn get_or_create_active_cart(&self, user: UserId) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_active_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserId,
        item: AddCartItem,
    ) -> Result<CartView, CartsServiceError> {
        if item.quantity <= 0 {
            return Err(CartsServiceError::NonPositiveQuantity);
        }

        if !item.variant_id.is_well_formed() {
            return Err(CartsServiceError::InvalidIdentifier);
        }

        let mut tx = self.db.begin().await?;

        let variant = self
            .catalog_repository
            .find_variant(&mut tx, item.variant_id)
            .await?
            .ok_or(CartsServiceError::VariantNotFound)?;

        let cart = self.lock_active_cart(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_item(&mut tx, cart.id, item.variant_id)
            .await?;

        let requested = i64::from(item.quantity)
            + existing.as_ref().map_or(0, |line| i64::from(line.quantity));

        let available = variant.variant.stock_qty;

        if requested > i64::from(available) {
            return Err(CartsServiceError::InsufficientStock {
                requested,
                available,
            });
        }

        let saved = self
            .items_repository
            .upsert_item(
                &mut tx,
                cart.id,
                item.variant_id,
                item.quantity,
                variant.unit_price(),
            )
            .await?
            .ok_or(CartsServiceError::InsufficientStock {
                requested,
                available,
            })?;

        tx.commit().await?;

        debug!(
            user_id = %user,
            cart_id = %cart.id,
            item_id = %saved.id,
            quantity = saved.quantity,
            "added item to cart"
        );

        self.touch_cart(cart.id).await;

        self.load_view(cart.id).await
    }

    async fn update_item_quantity(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: i32,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_user_carts(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_owned_item(&mut tx, user, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        if quantity == 0 {
            self.items_repository.delete_item(&mut tx, existing.id).await?;
        } else {
            if quantity < 0 {
                return Err(CartsServiceError::NegativeQuantity);
            }

            let variant = self
                .catalog_repository
                .find_variant(&mut tx, existing.variant_id)
                .await?
                .ok_or(CartsServiceError::VariantNotFound)?;

            let available = variant.variant.stock_qty;
            let insufficient = CartsServiceError::InsufficientStock {
                requested: i64::from(quantity),
                available,
            };

            if quantity > available {
                return Err(insufficient);
            }

            self.items_repository
                .set_item_quantity(&mut tx, existing.id, quantity)
                .await?
                .ok_or(insufficient)?;
        }

        tx.commit().await?;

        self.touch_cart(existing.cart_id).await;

        self.load_view(existing.cart_id).await
    }

    async fn remove_item(&self, user: UserId, item: CartItemId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_user_carts(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_owned_item(&mut tx, user, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let rows_affected = self.items_repository.delete_item(&mut tx, existing.id).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        tx.commit().await?;

        self.touch_cart(existing.cart_id).await;

        Ok(())
    }

    async fn clear_cart(&self, user: UserId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_user_carts(&mut tx, user).await?;

        let cart = self
            .carts_repository
            .find_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        let removed = self
            .items_repository
            .delete_all_items(&mut tx, cart.id)
            .await?;

        tx.commit().await?;

        debug!(user_id = %user, cart_id = %cart.id, removed, "cleared cart");

        self.touch_cart(cart.id).await;

        Ok(())
    }
}

/// Shopping cart workflow for a single user's active cart.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's active cart with items and totals, creating an
    /// empty cart when the user has none.
    async fn get_cart(&self, user: UserId) -> Result<CartView, CartsServiceError>;

    /// Return the user's active cart, creating it when absent.
    async fn get_or_create_active_cart(&self, user: UserId) -> Result<Cart, CartsServiceError>;

    /// Add a quantity of a variant, merging with an existing line for the same
    /// variant and refreshing its unit price.
    async fn add_item(&self, user: UserId, item: AddCartItem)
    -> Result<CartView, CartsServiceError>;

    /// Set the quantity of an item in the user's cart. Zero removes the item.
    async fn update_item_quantity(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: i32,
    ) -> Result<CartView, CartsServiceError>;

    /// Remove an item from the user's cart.
    async fn remove_item(&self, user: UserId, item: CartItemId) -> Result<(), CartsServiceError>;

    /// Remove every item from the user's active cart, keeping the cart.
    async fn clear_cart(&self, user: UserId) -> Result<(), CartsServiceError>;
}
