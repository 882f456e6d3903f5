//! Mock collaborator servers for integration tests
//!
//! Minimal stand-ins for the hosted identity service, the translation and
//! speech providers, the user record store, and the payment provider.
//! Each returns canned responses and counts what it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Bearer credential the mock identity service accepts
pub const VALID_TOKEN: &str = "tok-valid";
/// User id behind [`VALID_TOKEN`]
pub const USER_ID: &str = "usr_test";
/// Email behind [`VALID_TOKEN`]
pub const USER_EMAIL: &str = "user@example.com";

/// Audio bytes every mock synthesis returns
pub const AUDIO_BYTES: [u8; 4] = [1, 2, 3, 4];

/// All four always-required mock collaborators
pub struct Mocks {
    pub identity: MockIdentity,
    pub translator: MockTranslator,
    pub speech: MockSpeech,
    pub records: MockRecords,
}

impl Mocks {
    /// Start every mock on its own random port
    pub async fn start() -> anyhow::Result<Self> {
        Ok(Self {
            identity: MockIdentity::start().await?,
            translator: MockTranslator::start().await?,
            speech: MockSpeech::start().await?,
            records: MockRecords::start().await?,
        })
    }
}

async fn spawn_router(app: Router) -> anyhow::Result<(SocketAddr, CancellationToken)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_clone.cancelled().await;
            })
            .await
            .ok();
    });

    Ok((addr, shutdown))
}

// -- Identity service --

/// Mock identity service accepting exactly one bearer credential
pub struct MockIdentity {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl MockIdentity {
    pub async fn start() -> anyhow::Result<Self> {
        let app = Router::new().route("/auth/v1/user", routing::get(handle_get_user));
        let (addr, shutdown) = spawn_router(app).await?;
        Ok(Self { addr, shutdown })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockIdentity {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_get_user(headers: axum::http::HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_TOKEN}"));

    if authorized {
        Json(serde_json::json!({ "id": USER_ID, "email": USER_EMAIL })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

// -- Translation provider --

struct TranslatorState {
    completion_count: AtomicU32,
    response_content: String,
}

/// Mock chat-completions backend returning a fixed translation
pub struct MockTranslator {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<TranslatorState>,
}

impl MockTranslator {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_response("Hola mundo").await
    }

    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        let state = Arc::new(TranslatorState {
            completion_count: AtomicU32::new(0),
            response_content: content.to_owned(),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = spawn_router(app).await?;
        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    ///
    /// Includes `/v1` since the client appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockTranslator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    #[allow(dead_code)]
    messages: Vec<serde_json::Value>,
}

async fn handle_chat_completions(
    State(state): State<Arc<TranslatorState>>,
    Json(req): Json<ChatCompletionRequest>,
) -> impl IntoResponse {
    state.completion_count.fetch_add(1, Ordering::Relaxed);

    Json(serde_json::json!({
        "id": "chatcmpl-test-1",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": req.model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": state.response_content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    }))
}

// -- Speech provider --

struct SpeechState {
    synthesis_count: AtomicU32,
    fail: bool,
}

/// Mock speech backend returning fixed audio bytes
pub struct MockSpeech {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<SpeechState>,
}

impl MockSpeech {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false).await
    }

    /// Start a mock that fails every synthesis with 500
    pub async fn start_failing() -> anyhow::Result<Self> {
        Self::start_inner(true).await
    }

    async fn start_inner(fail: bool) -> anyhow::Result<Self> {
        let state = Arc::new(SpeechState {
            synthesis_count: AtomicU32::new(0),
            fail,
        });

        let app = Router::new()
            .route("/v1/audio/speech", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = spawn_router(app).await?;
        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of synthesis requests received
    pub fn synthesis_count(&self) -> u32 {
        self.state.synthesis_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockSpeech {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_speech(State(state): State<Arc<SpeechState>>) -> impl IntoResponse {
    state.synthesis_count.fetch_add(1, Ordering::Relaxed);

    if state.fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "mock synthesis intentional failure",
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "audio/mpeg")],
        AUDIO_BYTES.to_vec(),
    )
        .into_response()
}

// -- User record store --

/// Record held by the mock store
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord {
    pub user_id: String,
    pub email: Option<String>,
    pub plan: String,
    pub characters_used: u64,
}

type RecordsMap = Arc<Mutex<HashMap<String, StoredRecord>>>;

/// Mock user record store with an inspectable in-memory table
pub struct MockRecords {
    addr: SocketAddr,
    shutdown: CancellationToken,
    records: RecordsMap,
}

impl MockRecords {
    pub async fn start() -> anyhow::Result<Self> {
        let records: RecordsMap = Arc::new(Mutex::new(HashMap::new()));

        let app = Router::new()
            .route("/users", routing::post(handle_create_record))
            .route(
                "/users/{user_id}",
                routing::get(handle_get_record).patch(handle_set_plan),
            )
            .route("/users/{user_id}/usage", routing::post(handle_add_usage))
            .with_state(Arc::clone(&records));

        let (addr, shutdown) = spawn_router(app).await?;
        Ok(Self {
            addr,
            shutdown,
            records,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Insert a record directly, bypassing the HTTP surface
    pub fn seed(&self, user_id: &str, plan: &str, characters_used: u64) {
        self.records.lock().unwrap().insert(
            user_id.to_owned(),
            StoredRecord {
                user_id: user_id.to_owned(),
                email: None,
                plan: plan.to_owned(),
                characters_used,
            },
        );
    }

    /// Snapshot of a stored record
    pub fn record(&self, user_id: &str) -> Option<StoredRecord> {
        self.records.lock().unwrap().get(user_id).cloned()
    }
}

impl Drop for MockRecords {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Deserialize)]
struct CreateRecordBody {
    user_id: String,
    #[serde(default)]
    email: Option<String>,
    plan: String,
}

#[derive(Debug, Deserialize)]
struct AddUsageBody {
    delta: u64,
}

#[derive(Debug, Deserialize)]
struct SetPlanBody {
    plan: String,
}

async fn handle_get_record(State(records): State<RecordsMap>, Path(user_id): Path<String>) -> impl IntoResponse {
    match records.lock().unwrap().get(&user_id) {
        Some(record) => Json(record.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_create_record(
    State(records): State<RecordsMap>,
    Json(body): Json<CreateRecordBody>,
) -> impl IntoResponse {
    let record = StoredRecord {
        user_id: body.user_id.clone(),
        email: body.email,
        plan: body.plan,
        characters_used: 0,
    };

    records.lock().unwrap().insert(body.user_id, record.clone());

    (StatusCode::CREATED, Json(record))
}

async fn handle_add_usage(
    State(records): State<RecordsMap>,
    Path(user_id): Path<String>,
    Json(body): Json<AddUsageBody>,
) -> impl IntoResponse {
    match records.lock().unwrap().get_mut(&user_id) {
        Some(record) => {
            record.characters_used += body.delta;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn handle_set_plan(
    State(records): State<RecordsMap>,
    Path(user_id): Path<String>,
    Json(body): Json<SetPlanBody>,
) -> impl IntoResponse {
    match records.lock().unwrap().get_mut(&user_id) {
        Some(record) => {
            record.plan = body.plan;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

// -- Payment provider --

/// Mock payment provider returning a fixed hosted checkout session
pub struct MockPayments {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl MockPayments {
    pub async fn start() -> anyhow::Result<Self> {
        let app = Router::new().route("/v1/checkout/sessions", routing::post(handle_create_session));
        let (addr, shutdown) = spawn_router(app).await?;
        Ok(Self { addr, shutdown })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockPayments {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_create_session() -> impl IntoResponse {
    Json(serde_json::json!({
        "id": "cs_test_1",
        "url": "https://pay.example.com/c/cs_test_1"
    }))
}
