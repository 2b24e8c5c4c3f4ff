//! Product request bodies.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};

use optical_store_app::domain::catalog::models::ProductDetails;

use crate::extensions::*;

/// Product Request
///
/// Used for both create and full update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Decimal string, e.g. `"129.99"`
    pub base_price: String,

    pub category_id: Option<i64>,
}

impl ProductRequest {
    pub(crate) fn into_details(self) -> Result<ProductDetails, StatusError> {
        let base_price = Decimal::from_str(self.base_price.trim())
            .or_400("base_price must be a decimal string")?;

        Ok(ProductDetails {
            name: self.name,
            description: self.description,
            base_price,
            category_id: self.category_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    fn request(base_price: &str) -> ProductRequest {
        ProductRequest {
            name: "Aviator".to_string(),
            description: String::new(),
            base_price: base_price.to_string(),
            category_id: Some(2),
        }
    }

    #[test]
    fn decimal_price_is_parsed_exactly() {
        let details = request(" 129.99 ").into_details();

        assert!(
            matches!(details, Ok(ref details) if details.base_price == Decimal::new(12999, 2)
                && details.category_id == Some(2)),
            "expected 129.99 in category 2"
        );
    }

    #[test]
    fn non_decimal_price_is_a_bad_request() {
        for price in ["", "abc", "12,50"] {
            let result = request(price).into_details();

            assert!(
                matches!(result, Err(ref error) if error.code == StatusCode::BAD_REQUEST),
                "{price:?} should be rejected"
            );
        }
    }
}
