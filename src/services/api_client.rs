// ============================================================================
// API CLIENT - HTTP only, no UI state
// ============================================================================
// Builds requests against the configured base URL, signs them with the
// session's bearer token and decodes the JSON answers.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{Envelope, ErrorBody, LoginRequest, LoginResponse, Product, ProductFields};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::state::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
}

impl ApiClient {
    /// Client for `base_url` (trailing slash ignored) signing with `session`.
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        log::info!("🔐 [API] Logging in as {}", email);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.send_json(Method::Post, "/login", Some(&body)).await?;

        if response.token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_string()));
        }
        Ok(response.token)
    }

    /// Full product collection, exactly as the server returns it.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let envelope: Envelope<Vec<Product>> =
            self.send_json::<(), _>(Method::Get, "/products", None).await?;
        let products = envelope.into_inner();
        log::info!("📦 [API] {} products received", products.len());
        Ok(products)
    }

    /// `POST /products`
    pub async fn create_product(&self, fields: &ProductFields) -> Result<Product, ApiError> {
        log::info!("➕ [API] Creating product {}", fields.sku);
        let envelope: Envelope<Product> =
            self.send_json(Method::Post, "/products", Some(fields)).await?;
        Ok(envelope.into_inner())
    }

    /// `PUT /products/{id}`
    pub async fn update_product(&self, id: u64, fields: &ProductFields) -> Result<Product, ApiError> {
        log::info!("📝 [API] Updating product {}", id);
        let path = format!("/products/{}", id);
        let envelope: Envelope<Product> = self.send_json(Method::Put, &path, Some(fields)).await?;
        Ok(envelope.into_inner())
    }

    /// Request with JSON headers, plus `Authorization` when a token is stored.
    pub fn build_request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.session.persisted_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        }
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let request = self.build_request(method, path, body);

        log::debug!("🌐 [API] {} {}", method.as_str(), request.url);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ [API] {} {} failed: {}", method.as_str(), path, e);
                return Err(e);
            }
        };

        if !response.ok() {
            let err = error_from_response(&response);
            log::warn!("⚠️ [API] {} {} -> HTTP {}: {}", method.as_str(), path, response.status, err);
            return Err(err);
        }

        serde_json::from_str::<T>(&response.body).map_err(|e| {
            log::error!("❌ [API] Unexpected body from {}: {}", path, e);
            ApiError::Decode(e.to_string())
        })
    }
}

/// Map a non-2xx response to an error, keeping the server's own message.
fn error_from_response(response: &HttpResponse) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(ErrorBody::into_message)
        .or_else(|| {
            let text = response.body.trim();
            (!text.is_empty() && !text.starts_with('{')).then(|| text.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {}: {}", response.status, response.status_text).trim().to_string());

    if response.status == 401 {
        ApiError::Unauthorized(message)
    } else {
        ApiError::Http {
            status: response.status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_transport::MockTransport;
    use crate::utils::storage::MemoryStorage;
    use futures::executor::block_on;

    fn client_with(storage: MemoryStorage, transport: &MockTransport) -> ApiClient {
        let session = SessionStore::load(Rc::new(storage), "token");
        ApiClient::new("http://api.test/api/", Rc::new(transport.clone()), session)
    }

    #[test]
    fn anonymous_requests_carry_no_bearer() {
        let transport = MockTransport::new();
        transport.push_json(200, r#"{"data":[]}"#);
        let client = client_with(MemoryStorage::new(), &transport);

        let products = block_on(client.list_products()).unwrap();
        assert!(products.is_empty());

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "http://api.test/api/products");
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn stored_token_is_attached() {
        let transport = MockTransport::new();
        transport.push_json(200, r#"{"data":[]}"#);
        let client = client_with(MemoryStorage::with_entry("token", "abc"), &transport);

        block_on(client.list_products()).unwrap();
        let request = transport.last_request().unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn login_posts_credentials_and_returns_token() {
        let transport = MockTransport::new();
        transport.push_json(200, r#"{"token":"t-123"}"#);
        let client = client_with(MemoryStorage::new(), &transport);

        let token = block_on(client.login("a@b.c", "pw")).unwrap();
        assert_eq!(token, "t-123");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://api.test/api/login");
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.c", "password": "pw"}));
    }

    #[test]
    fn login_failure_surfaces_server_message() {
        let transport = MockTransport::new();
        transport.push_json(422, r#"{"message":"Invalid credentials"}"#);
        let client = client_with(MemoryStorage::new(), &transport);

        let err = block_on(client.login("a@b.c", "nope")).unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn unauthorized_is_its_own_variant() {
        let transport = MockTransport::new();
        transport.push_json(401, r#"{"error":"Unauthenticated."}"#);
        let client = client_with(MemoryStorage::with_entry("token", "stale"), &transport);

        let err = block_on(client.list_products()).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("Unauthenticated.".to_string()));
    }

    #[test]
    fn plain_text_and_empty_error_bodies() {
        let transport = MockTransport::new();
        transport.push_response(HttpResponse {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "database is down".to_string(),
        });
        transport.push_response(HttpResponse {
            status: 403,
            status_text: "Forbidden".to_string(),
            body: String::new(),
        });
        let client = client_with(MemoryStorage::new(), &transport);

        let err = block_on(client.list_products()).unwrap_err();
        assert_eq!(err.user_message(), "database is down");

        let err = block_on(client.list_products()).unwrap_err();
        assert_eq!(err.user_message(), "HTTP 403: Forbidden");
    }

    #[test]
    fn transport_failure_propagates_without_retry() {
        let transport = MockTransport::new();
        transport.push_error(ApiError::Network("connection refused".to_string()));
        let client = client_with(MemoryStorage::new(), &transport);

        let err = block_on(client.list_products()).unwrap_err();
        assert_eq!(err.user_message(), "Network error: connection refused");
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn create_and_update_send_fields_and_decode_record() {
        let transport = MockTransport::new();
        transport.push_json(201, r#"{"data":{"id":5,"name":"Pen","sku":"P-1","quantity":10,"price":2.5}}"#);
        transport.push_json(200, r#"{"id":5,"name":"Pen","sku":"P-1","quantity":8,"price":"2.75"}"#);
        let client = client_with(MemoryStorage::with_entry("token", "abc"), &transport);

        let mut fields = ProductFields {
            name: "Pen".to_string(),
            sku: "P-1".to_string(),
            quantity: 10,
            price: 2.5,
        };
        let created = block_on(client.create_product(&fields)).unwrap();
        assert_eq!(created.id, 5);

        fields.quantity = 8;
        fields.price = 2.75;
        let updated = block_on(client.update_product(created.id, &fields)).unwrap();
        assert_eq!(updated.quantity, 8);

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "http://api.test/api/products");
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(requests[1].url, "http://api.test/api/products/5");
        let body: serde_json::Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["quantity"], 8);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let transport = MockTransport::new();
        transport.push_json(200, r#"{"rows":[]}"#);
        let client = client_with(MemoryStorage::new(), &transport);

        let err = block_on(client.list_products()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
