//! Integration tests for the Supabase adapter over HTTP.
//!
//! A local axum server stands in for the project's auth API:
//! - `GET /auth/v1/user` answers per bearer token
//! - `POST /auth/v1/logout` counts revocations
//!
//! The reflector is wired to the adapter exactly as the binary does it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::json;

use session_reflector::adapters::{SupabaseAuthProvider, SupabaseConfig};
use session_reflector::application::SessionReflector;
use session_reflector::config::ReflectorConfig;
use session_reflector::domain::foundation::AuthError;
use session_reflector::ports::AuthProvider;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ANON_KEY: &str = "anon-key";
const USER_ID: &str = "0b9d8f5e-7a61-4c1b-9a0e-3c2f1d4e5b6a";

#[derive(Clone, Default)]
struct AuthApi {
    logouts: Arc<AtomicUsize>,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

async fn user_handler(headers: HeaderMap) -> Response {
    if header(&headers, "apikey") != Some(ANON_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "No API key found" })))
            .into_response();
    }

    match header(&headers, "authorization") {
        Some("Bearer good-token") => Json(json!({
            "id": USER_ID,
            "aud": "authenticated",
            "role": "authenticated",
            "email": "alice@example.com",
            "app_metadata": { "provider": "email" },
            "user_metadata": {},
            "created_at": "2024-03-01T12:00:00Z"
        }))
        .into_response(),
        Some("Bearer boom") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("Bearer garbled") => Json(json!({ "unexpected": true })).into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response(),
    }
}

async fn logout_handler(State(api): State<AuthApi>) -> StatusCode {
    api.logouts.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

/// Starts the stand-in auth API and returns its base URL.
async fn spawn_auth_api(api: AuthApi) -> String {
    let app = Router::new()
        .route("/auth/v1/user", get(user_handler))
        .route("/auth/v1/logout", post(logout_handler))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn provider_for(base_url: &str) -> Arc<SupabaseAuthProvider> {
    let config = SupabaseConfig::new(base_url, SecretString::new(ANON_KEY.to_string()))
        .with_request_timeout(Duration::from_secs(5));
    Arc::new(SupabaseAuthProvider::new(config).unwrap())
}

fn token(value: &str) -> SecretString {
    SecretString::new(value.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn sign_in_and_out_are_reflected() {
    let api = AuthApi::default();
    let base_url = spawn_auth_api(api.clone()).await;
    let provider = provider_for(&base_url);
    let reflector = SessionReflector::new(
        Arc::clone(&provider) as Arc<dyn AuthProvider>,
        ReflectorConfig::default(),
    );

    reflector.initialize().await.unwrap();
    assert_eq!(reflector.current_user().get(), None);
    assert!(!reflector.is_loading().get());

    let session = provider.set_session(token("good-token"), None).await.unwrap();
    assert_eq!(session.user().id.as_str(), USER_ID);

    let user = reflector.current_user().get().expect("user after sign-in");
    assert_eq!(user.id.as_str(), USER_ID);
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));

    provider.sign_out().await;
    assert_eq!(reflector.current_user().get(), None);
    assert_eq!(api.logouts.load(Ordering::SeqCst), 1);
    assert!(!provider.has_session().await);
}

#[tokio::test]
async fn initial_fetch_resolves_stored_session() {
    let base_url = spawn_auth_api(AuthApi::default()).await;
    let provider = provider_for(&base_url);
    provider.set_session(token("good-token"), None).await.unwrap();

    let reflector = SessionReflector::new(
        Arc::clone(&provider) as Arc<dyn AuthProvider>,
        ReflectorConfig::default(),
    );
    reflector.initialize().await.unwrap();

    let user = reflector.current_user().get().expect("user from initial fetch");
    assert_eq!(user.id.as_str(), USER_ID);
    assert_eq!(provider.listener_count(), 1);

    reflector.teardown();
    assert_eq!(provider.listener_count(), 0);
}

#[tokio::test]
async fn rejected_token_leaves_state_untouched() {
    let base_url = spawn_auth_api(AuthApi::default()).await;
    let provider = provider_for(&base_url);

    let result = provider.set_session(token("forged"), None).await;

    assert_eq!(result, Err(AuthError::InvalidToken));
    assert!(!provider.has_session().await);
    assert!(provider.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn server_errors_are_transient() {
    let base_url = spawn_auth_api(AuthApi::default()).await;
    let provider = provider_for(&base_url);

    let error = provider.set_session(token("boom"), None).await.unwrap_err();

    assert!(error.is_transient(), "unexpected error: {:?}", error);
}

#[tokio::test]
async fn unexpected_payload_is_malformed_response() {
    let base_url = spawn_auth_api(AuthApi::default()).await;
    let provider = provider_for(&base_url);

    let error = provider.set_session(token("garbled"), None).await.unwrap_err();

    assert!(matches!(error, AuthError::MalformedResponse(_)));
}

#[tokio::test]
async fn wrong_anon_key_is_rejected() {
    let base_url = spawn_auth_api(AuthApi::default()).await;
    let config = SupabaseConfig::new(&base_url, SecretString::new("wrong".to_string()));
    let provider = SupabaseAuthProvider::new(config).unwrap();

    let result = provider.set_session(token("good-token"), None).await;

    assert_eq!(result.map(|_| ()), Err(AuthError::InvalidToken));
}

#[tokio::test]
async fn unreachable_api_is_service_unavailable() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = provider_for(&format!("http://{}", addr));

    let error = provider.set_session(token("good-token"), None).await.unwrap_err();

    assert!(matches!(error, AuthError::ServiceUnavailable(_)));
}
