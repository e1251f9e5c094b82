//! Integration test support for the Oleh's Garden storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p oleh-garden-integration-tests
//! ```
//!
//! No external services are needed: the Telegram Bot API and the Nova Poshta
//! API are replaced by [`FakeUpstream`] servers on ephemeral ports, and the
//! storefront router is driven in-process with `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart sessions over a file store and a changing catalog
//! - `storefront_api` - HTTP routes, order submission, address lookups

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, Uri, header},
};
use oleh_garden_storefront::catalog::Catalog;
use oleh_garden_storefront::config::{NovaPoshtaConfig, StorefrontConfig, TelegramConfig};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

/// Bot token accepted by config validation.
pub const BOT_TOKEN: &str = "7012345678:AAHk3vQx9Lm2PzR8tYw4NcJ6bUe1FsD0gKo";
/// Chat id orders are sent to.
pub const CHAT_ID: &str = "-1001234567890";
/// Nova Poshta API key accepted by config validation.
pub const NP_KEY: &str = "9f3c2a71d4e85b60a1c7e2f94d38b5a6";

/// A catalog product as JSON, with every descriptive field filled in.
pub fn product(id: i32, title: &str, price: Option<&str>, stock: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "species": "Гібридна хурма",
        "image": format!("/images/{id}.jpg"),
        "price": price,
        "stock": stock,
        "ripeningTerm": "кінець жовтня",
        "fruits": "120-150 г",
        "taste": "солодкий",
        "selfFertility": "самоплідний",
        "yield": "високий",
        "frostResistance": "до -27°C",
        "rootstock": "Хурма віргінська",
        "cultivation": {
            "planting": "весна",
            "care": "помірний полив",
            "bearingPeriod": "2-3 рік"
        }
    })
}

/// Build a catalog from product JSON.
///
/// # Panics
///
/// Panics if the products are not a valid catalog.
pub fn catalog(products: &[Value]) -> Catalog {
    let products = serde_json::from_value(Value::Array(products.to_vec()))
        .expect("products deserialize");
    Catalog::new(products).expect("catalog is valid")
}

/// Write product JSON as a catalog file in `dir`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_catalog(dir: &Path, products: &[Value]) -> PathBuf {
    let path = dir.join("catalog.json");
    std::fs::write(&path, Value::Array(products.to_vec()).to_string())
        .expect("catalog file written");
    path
}

/// Telegram settings pointing at `api_url`.
pub fn telegram_config(api_url: &Url) -> TelegramConfig {
    TelegramConfig {
        bot_token: SecretString::from(BOT_TOKEN),
        chat_id: CHAT_ID.to_string(),
        api_url: api_url.clone(),
    }
}

/// Nova Poshta settings pointing at `api_url`.
pub fn nova_poshta_config(api_url: &Url) -> NovaPoshtaConfig {
    NovaPoshtaConfig {
        api_key: SecretString::from(NP_KEY),
        api_url: api_url.clone(),
    }
}

/// Storefront configuration with the given integrations.
pub fn config(telegram: Option<&Url>, nova_poshta: Option<&Url>) -> StorefrontConfig {
    StorefrontConfig {
        store_name: "Сад Олега".to_string(),
        telegram: telegram.map(telegram_config),
        nova_poshta: nova_poshta.map(nova_poshta_config),
        ..StorefrontConfig::default()
    }
}

/// Customer details of a valid order, as the order form posts them.
pub fn customer_info() -> Value {
    json!({
        "name": "Олег",
        "surname": "Коваль",
        "phone": "067 123 45 67",
        "email": "oleh@example.com",
        "comments": "Дзвоніть після 18:00",
        "npCityName": "м. Умань, Черкаська обл.",
        "npCityRef": "db5c88e0-391c-11dd-90d9-001a92567626",
        "npWarehouseRef": "1ec09d88-e1c2-11e3-8c4a-0050568002cf",
        "npWarehouseNumber": "3",
        "npWarehouseAddress": "вул. Небесної Сотні, 8"
    })
}

/// `GET` request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request target.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

/// `POST` request with a JSON body.
///
/// # Panics
///
/// Panics if `uri` is not a valid request target.
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

/// Response parts with the body decoded as JSON, or as a JSON string when it
/// is not JSON.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send one request through the router.
///
/// # Panics
///
/// Panics if the router fails or the body cannot be read.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    TestResponse {
        status,
        headers,
        body,
    }
}

type Reply = Arc<dyn Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct UpstreamState {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    reply: Reply,
}

/// An HTTP server standing in for an external JSON API.
///
/// Every request is recorded as `(path, body)` and answered by the reply
/// function given to [`FakeUpstream::spawn`].
pub struct FakeUpstream {
    pub url: Url,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeUpstream {
    /// Start a server on an ephemeral local port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn<F>(reply: F) -> Self
    where
        F: Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            requests: Arc::clone(&requests),
            reply: Arc::new(reply),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/")).expect("valid url"),
            requests,
        }
    }

    /// Requests received so far, as `(path, body)`.
    ///
    /// # Panics
    ///
    /// Panics if a recording thread panicked.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn record(
    State(upstream): State<UpstreamState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let (status, reply) = (upstream.reply)(&path, &body);
    upstream
        .requests
        .lock()
        .expect("requests lock")
        .push((path, body));
    (status, Json(reply))
}
