//! In-process fake of the voice-agent backend.
//!
//! Serves the REST endpoints the admin client uses from in-memory state,
//! checks bearer tokens, and can be told to fail specific requests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};

use voiceagent_admin::{
    ApiClient, ApiConfig, MemorySessionStore, RetryPolicy, SessionContext, Shell,
};

pub const EMAIL: &str = "owner@salon.test";
pub const PASSWORD: &str = "correct-horse";
pub const BUSINESS_ID: &str = "biz-42";

/// Access token the backend issues, shaped like a JWT
pub fn token_for(business_id: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "sub": EMAIL, "business_id": business_id, "exp": 4_102_444_800i64 }).to_string(),
    );
    format!("{header}.{payload}.signature")
}

/// Canned error answer for one request
#[derive(Debug, Clone, Copy)]
pub struct Injected {
    pub status: u16,
    /// Seconds sent as `Retry-After`
    pub retry_after: Option<u64>,
}

#[derive(Default)]
pub struct BackendState {
    pub business: Value,
    pub booking_rules: Option<Value>,
    pub docs: Vec<Value>,
    pub services: Vec<Value>,
    pub call_logs: Vec<Value>,
    pub bookings: Vec<Value>,
    /// Errors to answer with, per `"METHOD /path"`, before serving normally
    pub failures: HashMap<String, VecDeque<Injected>>,
    /// Requests seen, per `"METHOD /path"`
    pub hits: HashMap<String, usize>,
    /// Requests are held this long before being handled
    pub latency: Option<Duration>,
    /// Reject every bearer token
    pub revoke_tokens: bool,
}

/// Record id in the backend's format
fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            business: json!({
                "id": BUSINESS_ID,
                "name": "Sunset Salon",
                "phone": "+15551234567",
                "timezone": "America/Los_Angeles",
                "location": "12 Main St",
                "policies": null,
            }),
            ..Default::default()
        }));

        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().expect("backend state"))
    }

    /// Answer the next requests to `key` with these statuses
    pub fn fail(&self, key: &str, statuses: &[u16]) {
        self.inject(
            key,
            statuses.iter().map(|&status| Injected {
                status,
                retry_after: None,
            }),
        );
    }

    /// Answer the next request to `key` with `status` and a `Retry-After`
    pub fn fail_with_retry_after(&self, key: &str, status: u16, secs: u64) {
        self.inject(
            key,
            [Injected {
                status,
                retry_after: Some(secs),
            }],
        );
    }

    fn inject(&self, key: &str, answers: impl IntoIterator<Item = Injected>) {
        self.with(|s| s.failures.entry(key.to_string()).or_default().extend(answers));
    }

    pub fn hits(&self, key: &str) -> usize {
        self.with(|s| s.hits.get(key).copied().unwrap_or(0))
    }

    /// API client with a fresh in-memory session and fast retries
    pub fn client(&self) -> ApiClient {
        let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
        self.client_with(session)
    }

    pub fn client_with(&self, session: SessionContext) -> ApiClient {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
            ..Default::default()
        };
        ApiClient::new(&config, session)
            .expect("api client")
            .with_retry(RetryPolicy {
                max_retries: 2,
                backoff: Duration::from_millis(10),
            })
    }

    /// Shell whose session is already signed in to [`BUSINESS_ID`]
    pub fn signed_in_shell(&self) -> Shell {
        let client = self.client();
        client
            .session()
            .set(token_for(BUSINESS_ID), BUSINESS_ID)
            .expect("set session");
        Shell::new(client)
    }
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn error(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

fn router(state: Shared) -> Router {
    let business = Router::new()
        .route("/", get(get_business).patch(update_business))
        .route("/booking-rules", get(get_rules).put(put_rules))
        .route("/knowledge-base", get(list_docs).post(add_doc))
        .route("/knowledge-base/:doc_id", axum::routing::delete(delete_doc))
        .route("/services", get(list_services).post(add_service))
        .route(
            "/services/:service_id",
            axum::routing::patch(update_service).delete(delete_service),
        )
        .route("/call-logs", get(list_call_logs))
        .route("/bookings", get(list_bookings));

    Router::new()
        .route("/auth/login", post(login))
        .nest("/businesses/:business_id", business)
        .layer(middleware::from_fn_with_state(state.clone(), gatekeeper))
        .with_state(state)
}

/// Counts requests, injects failures and checks bearer tokens
async fn gatekeeper(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());

    let (injected, latency, revoked) = {
        let mut s = state.lock().expect("backend state");
        *s.hits.entry(key.clone()).or_default() += 1;
        let injected = s.failures.get_mut(&key).and_then(VecDeque::pop_front);
        (injected, s.latency, s.revoke_tokens)
    };

    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }

    if let Some(injected) = injected {
        let status = StatusCode::from_u16(injected.status).expect("status code");
        let mut response = error(status, "injected failure").into_response();
        if let Some(secs) = injected.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        return response;
    }

    if request.uri().path() != "/auth/login" {
        let authorized = bearer(request.headers())
            .map(|token| !revoked && token == token_for(BUSINESS_ID))
            .unwrap_or(false);
        if !authorized {
            return error(StatusCode::UNAUTHORIZED, "Could not validate credentials")
                .into_response();
        }
    }

    next.run(request).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn check_business(business_id: &str) -> Result<(), (StatusCode, Json<Value>)> {
    if business_id == BUSINESS_ID {
        Ok(())
    } else {
        Err(error(StatusCode::NOT_FOUND, "Business not found"))
    }
}

async fn login(Json(body): Json<Value>) -> Reply {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Ok(Json(json!({
            "access_token": token_for(BUSINESS_ID),
            "token_type": "bearer",
        })))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Incorrect email or password"))
    }
}

async fn get_business(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    check_business(&id)?;
    Ok(Json(state.lock().expect("state").business.clone()))
}

async fn update_business(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Reply {
    check_business(&id)?;
    let mut s = state.lock().expect("state");
    if let (Some(business), Some(patch)) = (s.business.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            business.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(s.business.clone()))
}

async fn get_rules(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    check_business(&id)?;
    let rules = state.lock().expect("state").booking_rules.clone();
    Ok(Json(rules.unwrap_or(Value::Null)))
}

async fn put_rules(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(rules): Json<Value>,
) -> Reply {
    check_business(&id)?;
    state.lock().expect("state").booking_rules = Some(rules.clone());
    Ok(Json(rules))
}

async fn list_docs(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    check_business(&id)?;
    Ok(Json(Value::Array(state.lock().expect("state").docs.clone())))
}

async fn add_doc(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    check_business(&id)?;
    let mut s = state.lock().expect("state");
    let doc = json!({
        "id": new_id(),
        "title": body["title"],
        "content": body["content"],
        "created_at": chrono::Utc::now().to_rfc3339(),
    });
    s.docs.push(doc.clone());
    Ok(Json(doc))
}

async fn delete_doc(
    State(state): State<Shared>,
    Path((id, doc_id)): Path<(String, String)>,
) -> Reply {
    check_business(&id)?;
    let mut s = state.lock().expect("state");
    let before = s.docs.len();
    s.docs.retain(|d| d["id"] != doc_id.as_str());
    if s.docs.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Document not found"));
    }
    Ok(Json(json!({ "message": "Document deleted" })))
}

async fn list_services(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    check_business(&id)?;
    Ok(Json(Value::Array(state.lock().expect("state").services.clone())))
}

async fn add_service(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    check_business(&id)?;
    let mut s = state.lock().expect("state");
    let mut service = body;
    service["id"] = json!(new_id());
    s.services.push(service.clone());
    Ok(Json(service))
}

async fn update_service(
    State(state): State<Shared>,
    Path((id, service_id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Reply {
    check_business(&id)?;
    let mut s = state.lock().expect("state");
    let service = s
        .services
        .iter_mut()
        .find(|svc| svc["id"] == service_id.as_str())
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Service not found"))?;
    if let (Some(service), Some(patch)) = (service.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            service.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(service.clone()))
}

async fn delete_service(
    State(state): State<Shared>,
    Path((id, service_id)): Path<(String, String)>,
) -> impl IntoResponse {
    if let Err(e) = check_business(&id) {
        return e.into_response();
    }
    let mut s = state.lock().expect("state");
    s.services.retain(|svc| svc["id"] != service_id.as_str());
    StatusCode::NO_CONTENT.into_response()
}

async fn list_call_logs(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    check_business(&id)?;
    Ok(Json(Value::Array(state.lock().expect("state").call_logs.clone())))
}

async fn list_bookings(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    check_business(&id)?;
    Ok(Json(Value::Array(state.lock().expect("state").bookings.clone())))
}
