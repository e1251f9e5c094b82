//! Order commands.

use oleh_garden_storefront::order::{CustomerInfo, OrderRequest, render_message};
use url::Url;

use super::{CliError, Session};

/// Path of the order endpoint on the storefront.
const ORDER_PATH: &str = "api/telegram";

/// Store name used in previews.
const PREVIEW_STORE_NAME: &str = "Сад Олега";

/// Build the order request for the session's cart.
fn request(session: &Session, customer_info: CustomerInfo) -> OrderRequest {
    let cart = session.cart();
    OrderRequest::from_cart(cart.items(), customer_info)
}

/// Print the Telegram message the order would produce.
///
/// # Errors
///
/// Returns `CliError::Order` if the cart or the customer details are invalid.
#[allow(clippy::print_stdout)]
pub fn preview(session: &Session, customer_info: CustomerInfo) -> Result<(), CliError> {
    let order = request(session, customer_info).validate(session.catalog())?;
    let text = render_message(
        &order,
        PREVIEW_STORE_NAME,
        chrono::Local::now().naive_local(),
    );
    println!("{text}");
    Ok(())
}

/// `{base}/api/telegram`, keeping any path prefix of the base URL.
fn order_url(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(ORDER_PATH)
}

/// Submit the cart to the storefront and empty it on success.
///
/// The order is validated locally first so obvious mistakes do not need a
/// round trip.
///
/// # Errors
///
/// Returns `CliError::Order` for an invalid order, `CliError::Http` when the
/// storefront cannot be reached and `CliError::Rejected` when it refuses the
/// order.
#[allow(clippy::print_stdout)]
pub async fn submit(
    session: &Session,
    customer_info: CustomerInfo,
    storefront_url: &Url,
) -> Result<(), CliError> {
    let mut cart = session.cart();
    let request = OrderRequest::from_cart(cart.items(), customer_info);
    request.clone().validate(session.catalog())?;

    let url = order_url(storefront_url)?;
    tracing::info!(%url, lines = request.items.len(), "Submitting order");

    let response = reqwest::Client::new().post(url).json(&request).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    cart.clear();
    println!("Замовлення надіслано");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use oleh_garden_storefront::order::OrderError;

    use super::*;

    #[test]
    fn test_order_url() {
        let base = Url::parse("http://127.0.0.1:3000").unwrap();
        assert_eq!(
            order_url(&base).unwrap().as_str(),
            "http://127.0.0.1:3000/api/telegram"
        );

        let prefixed = Url::parse("https://sad-oleha.com.ua/shop").unwrap();
        assert_eq!(
            order_url(&prefixed).unwrap().as_str(),
            "https://sad-oleha.com.ua/shop/api/telegram"
        );
    }

    #[test]
    fn test_preview_rejects_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(dir.path().to_path_buf(), None).unwrap();
        let info = CustomerInfo {
            name: "Олег".to_owned(),
            surname: "Коваль".to_owned(),
            phone: "0671234567".to_owned(),
            np_city_ref: Some("city".to_owned()),
            np_warehouse_ref: Some("wh".to_owned()),
            ..CustomerInfo::default()
        };
        let err = preview(&session, info).unwrap_err();
        assert!(matches!(err, CliError::Order(OrderError::EmptyOrder)));
    }
}
