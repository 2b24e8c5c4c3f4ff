//! Cross-origin policy for browser clients.

use salvo::{
    cors::{AllowOrigin, Cors, CorsHandler},
    http::{
        HeaderName, HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue},
    },
};

use crate::{config::cors::CorsConfig, observability::REQUEST_ID_HEADER};

/// Build the CORS hoop. Attach it to the `Service`: router hoops never see
/// preflights for routes without an `OPTIONS` handler.
///
/// # Errors
///
/// Returns an error when a configured origin is not a valid header value.
pub(crate) fn handler(config: &CorsConfig) -> Result<CorsHandler, InvalidHeaderValue> {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .origins()
                .map(HeaderValue::from_str)
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Ok(Cors::new()
        .allow_origin(allow_origin)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE, request_id.clone()])
        .expose_headers(vec![request_id])
        .into_handler())
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::{
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn config(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            cors_allowed_origins: origins.iter().map(ToString::to_string).collect(),
        }
    }

    fn make_service(config: &CorsConfig) -> Result<Service, InvalidHeaderValue> {
        Ok(Service::new(Router::with_path("cart").get(ok)).hoop(handler(config)?))
    }

    fn allowed_origin(res: &Response) -> Option<&str> {
        res.headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn test_preflight_from_listed_origin_is_allowed() -> TestResult {
        let service = make_service(&config(&["https://shop.example"]))?;

        let res = TestClient::options("http://example.com/cart")
            .add_header(ORIGIN, "https://shop.example", true)
            .add_header(ACCESS_CONTROL_REQUEST_METHOD, "GET", true)
            .send(&service)
            .await;

        assert_eq!(
            allowed_origin(&res),
            Some("https://shop.example"),
            "listed origin echoed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_header() -> TestResult {
        let service = make_service(&config(&["https://shop.example"]))?;

        let res = TestClient::get("http://example.com/cart")
            .add_header(ORIGIN, "https://elsewhere.example", true)
            .send(&service)
            .await;

        assert_eq!(allowed_origin(&res), None, "unlisted origin refused");

        Ok(())
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() -> TestResult {
        let service = make_service(&config(&["*"]))?;

        let res = TestClient::get("http://example.com/cart")
            .add_header(ORIGIN, "https://anywhere.example", true)
            .send(&service)
            .await;

        assert_eq!(allowed_origin(&res), Some("*"), "wildcard");

        Ok(())
    }

    #[test]
    fn invalid_origin_is_a_startup_error() {
        assert!(
            handler(&config(&["https://bad\norigin"])).is_err(),
            "newline is not a header value"
        );
    }
}
