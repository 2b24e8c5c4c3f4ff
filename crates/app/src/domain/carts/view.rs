//! Cart view assembly.
//!
//! Projects a cart and its lines into the shape returned to clients, with
//! aggregates computed from the snapshotted unit prices only. Current catalog
//! prices are carried for display and never feed the totals.

use rust_decimal::Decimal;

use crate::domain::{
    catalog::models::VariantWithProduct,
    carts::models::{Cart, CartItem, CartLine},
};

/// A cart with its items and aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub cart: Cart,
    pub items: Vec<CartItemView>,
    pub total_items: i64,
    pub total_price: Decimal,
}

/// A single cart line with its extended price.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemView {
    pub item: CartItem,
    pub variant: VariantWithProduct,
    pub line_total: Decimal,
}

impl CartItemView {
    fn from_line(line: CartLine) -> Self {
        let line_total = line.item.unit_price * Decimal::from(line.item.quantity);

        Self {
            item: line.item,
            variant: line.variant,
            line_total,
        }
    }
}

impl CartView {
    /// Build the view for `cart` from its lines, keeping their order.
    #[must_use]
    pub fn assemble(cart: Cart, lines: Vec<CartLine>) -> Self {
        let items: Vec<CartItemView> = lines.into_iter().map(CartItemView::from_line).collect();

        let total_items = items
            .iter()
            .map(|line| i64::from(line.item.quantity))
            .sum();

        let total_price = items.iter().map(|line| line.line_total).sum();

        Self {
            cart,
            items,
            total_items,
            total_price,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::{
        carts::models::{CartId, CartItemId, CartStatus},
        catalog::models::{Product, ProductId, Variant, VariantId},
        users::models::UserId,
    };

    use super::*;

    fn cart() -> Cart {
        Cart {
            id: CartId::from_i64(1),
            user_id: UserId::from_i64(7),
            status: CartStatus::Active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn line(item: i64, quantity: i32, unit_price: Decimal, base_price: Decimal) -> CartLine {
        let product = Product {
            id: ProductId::from_i64(10),
            name: "Wayfarer".to_string(),
            description: String::new(),
            base_price,
            category_id: None,
            image: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        let variant = Variant {
            id: VariantId::from_i64(100 + item),
            product_id: product.id,
            sku: format!("WF-{item}"),
            color: "black".to_string(),
            size: "M".to_string(),
            extra_price: Decimal::ZERO,
            stock_qty: 50,
            image_url: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        CartLine {
            item: CartItem {
                id: CartItemId::from_i64(item),
                cart_id: CartId::from_i64(1),
                variant_id: variant.id,
                quantity,
                unit_price,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            variant: VariantWithProduct { variant, product },
        }
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let view = CartView::assemble(cart(), Vec::new());

        assert!(view.is_empty());
        assert_eq!(view.total_items, 0);
        assert_eq!(view.total_price, Decimal::ZERO);
    }

    #[test]
    fn totals_sum_quantities_and_extended_prices() {
        let view = CartView::assemble(
            cart(),
            vec![
                line(1, 3, Decimal::new(5500, 2), Decimal::new(5000, 2)),
                line(2, 2, Decimal::new(1999, 2), Decimal::new(1999, 2)),
            ],
        );

        assert_eq!(view.total_items, 5);
        assert_eq!(view.total_price, Decimal::new(20498, 2));
        assert_eq!(view.items.first().map(|i| i.line_total), Some(Decimal::new(16500, 2)));
    }

    #[test]
    fn totals_use_snapshot_price_not_current_catalog_price() {
        let view = CartView::assemble(
            cart(),
            vec![line(1, 2, Decimal::new(5500, 2), Decimal::new(9000, 2))],
        );

        assert_eq!(view.total_price, Decimal::new(11000, 2));
    }

    #[test]
    fn lines_keep_their_order() {
        let view = CartView::assemble(
            cart(),
            vec![
                line(5, 1, Decimal::ONE, Decimal::ONE),
                line(2, 1, Decimal::ONE, Decimal::ONE),
            ],
        );

        let ids: Vec<i64> = view.items.iter().map(|i| i.item.id.into_i64()).collect();

        assert_eq!(ids, vec![5, 2]);
    }
}
