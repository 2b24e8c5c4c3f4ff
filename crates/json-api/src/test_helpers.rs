//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use optical_store_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartId, CartItem, CartItemId, CartLine, CartStatus},
            view::CartView,
        },
        catalog::{
            MockCatalogService,
            models::{Product, ProductId, Variant, VariantId, VariantWithProduct},
        },
        users::{
            MockUsersService,
            models::{Address, AddressId, User, UserId, UserRole},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_ID: UserId = UserId::from_i64(1);

pub(crate) const TEST_CART_ID: CartId = CartId::from_i64(10);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_id(TEST_USER_ID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_get_or_create_active_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_get_variant().never();
    catalog.expect_get_product().never();
    catalog.expect_create_product().never();
    catalog.expect_update_product().never();
    catalog.expect_delete_product().never();

    catalog
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();
    users.expect_get_profile().never();
    users.expect_update_email().never();
    users.expect_delete_user().never();

    users
}

/// State whose services all reject calls unless replaced.
#[derive(Debug)]
pub(crate) struct TestServices {
    pub carts: MockCartsService,
    pub catalog: MockCatalogService,
    pub users: MockUsersService,
    pub auth: MockAuthService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            carts: strict_carts_mock(),
            catalog: strict_catalog_mock(),
            users: strict_users_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext::from_services(
            Arc::new(self.carts),
            Arc::new(self.catalog),
            Arc::new(self.users),
            Arc::new(self.auth),
        ))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    TestServices {
        auth,
        ..TestServices::default()
    }
    .into_state()
}

/// Serve `route` as an authenticated [`TEST_USER_ID`] request.
pub(crate) fn authed_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authed_service(
        TestServices {
            carts,
            ..TestServices::default()
        },
        route,
    )
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    authed_service(
        TestServices {
            catalog,
            ..TestServices::default()
        },
        route,
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    authed_service(
        TestServices {
            users,
            ..TestServices::default()
        },
        route,
    )
}

pub(crate) fn make_user(role: UserRole) -> User {
    User {
        id: TEST_USER_ID,
        email: "shopper@example.com".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_address(id: i64, is_default: bool) -> Address {
    Address {
        id: AddressId::from_i64(id),
        user_id: TEST_USER_ID,
        name: "Home".to_string(),
        line1: "1 High Street".to_string(),
        line2: None,
        city: "Leeds".to_string(),
        state: String::new(),
        postal_code: "LS1 1AA".to_string(),
        country: "GB".to_string(),
        is_default,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(id: i64, base_price: Decimal) -> Product {
    Product {
        id: ProductId::from_i64(id),
        name: "Aviator".to_string(),
        description: String::new(),
        base_price,
        category_id: None,
        image: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart() -> Cart {
    Cart {
        id: TEST_CART_ID,
        user_id: TEST_USER_ID,
        status: CartStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_variant(id: i64, base_price: Decimal, extra_price: Decimal) -> VariantWithProduct {
    VariantWithProduct {
        variant: Variant {
            id: VariantId::from_i64(id),
            product_id: ProductId::from_i64(100),
            sku: format!("SKU-{id}"),
            color: "black".to_string(),
            size: "M".to_string(),
            extra_price,
            stock_qty: 10,
            image_url: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        product: make_product(100, base_price),
    }
}

/// A cart view with one line of `quantity` at `unit_price`.
pub(crate) fn make_view(item: i64, quantity: i32, unit_price: Decimal) -> CartView {
    let variant = make_variant(7, unit_price, Decimal::ZERO);

    CartView::assemble(
        make_cart(),
        vec![CartLine {
            item: CartItem {
                id: CartItemId::from_i64(item),
                cart_id: TEST_CART_ID,
                variant_id: variant.variant.id,
                quantity,
                unit_price,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            variant,
        }],
    )
}

pub(crate) fn empty_view() -> CartView {
    CartView::assemble(make_cart(), Vec::new())
}
