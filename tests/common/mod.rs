#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use repodeck::model::{AppConfig, RepoRef, Session};
use repodeck::remote::RemoteClient;

pub const TOKEN: &str = "test-token";
pub const CLIENT_ID: &str = "test-client";
pub const OWNER: &str = "octo";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceOutcome {
    #[default]
    Approve,
    Deny,
}

struct StoredFile {
    bytes: Vec<u8>,
    sha: String,
}

/// In-memory stand-in for the hosted API and its identity provider.
#[derive(Default)]
pub struct MockState {
    files: BTreeMap<(String, String), StoredFile>,
    repos: Vec<Value>,
    next_sha: u64,
    next_repo_id: u64,
    /// `"PUT owner/repo:path"` / `"DELETE owner/repo:path"`, in arrival order.
    pub writes: Vec<String>,
    pub commit_messages: Vec<String>,
    pub fail_paths: BTreeSet<String>,
    pub create_bodies: Vec<Value>,
    pub repo_queries: Vec<HashMap<String, String>>,
    pub device: DeviceOutcome,
    pub token_polls: usize,
}

impl MockState {
    fn mint_sha(&mut self) -> String {
        self.next_sha += 1;
        format!("{:040x}", self.next_sha)
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub base_url: String,
    state: Shared,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for MockApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}

pub fn spawn_api() -> Result<MockApi> {
    let state: Shared = Arc::new(Mutex::new(MockState::default()));

    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind mock api")?;
    listener
        .set_nonblocking(true)
        .context("set listener nonblocking")?;
    let addr = listener.local_addr().context("mock api addr")?;

    let app = router(state.clone());
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let thread = thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                eprintln!("mock api runtime: {err}");
                return;
            }
        };
        rt.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(l) => l,
                Err(err) => {
                    eprintln!("mock api listener: {err}");
                    return;
                }
            };
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
        });
    });

    Ok(MockApi {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(tx),
        thread: Some(thread),
    })
}

impl MockApi {
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.base_url.clone(),
            auth_base_url: self.base_url.clone(),
            oauth_client_id: Some(CLIENT_ID.to_string()),
            ..AppConfig::default()
        }
    }

    pub fn session(&self) -> Session {
        Session {
            subject_id: "1".to_string(),
            display_name: "The Octocat".to_string(),
            avatar_url: None,
            username: OWNER.to_string(),
            token: TOKEN.to_string(),
        }
    }

    pub fn client(&self) -> Result<RemoteClient> {
        RemoteClient::new(&self.config(), &self.session())
    }

    pub fn seed_file(&self, repo: &RepoRef, path: &str, bytes: &[u8]) -> String {
        let mut st = self.state();
        let sha = st.mint_sha();
        st.files.insert(
            (repo.to_string(), path.to_string()),
            StoredFile {
                bytes: bytes.to_vec(),
                sha: sha.clone(),
            },
        );
        sha
    }

    pub fn file(&self, repo: &RepoRef, path: &str) -> Option<Vec<u8>> {
        self.state()
            .files
            .get(&(repo.to_string(), path.to_string()))
            .map(|f| f.bytes.clone())
    }

    pub fn fail_on(&self, repo: &RepoRef, path: &str) {
        self.state().fail_paths.insert(format!("{}:{}", repo, path));
    }

    pub fn writes(&self) -> Vec<String> {
        self.state().writes.clone()
    }
}

pub fn repo() -> RepoRef {
    RepoRef {
        owner: OWNER.to_string(),
        name: "demo".to_string(),
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/user", get(current_user))
        .route("/user/repos", get(list_repos).post(create_repo))
        .route(
            "/repos/:owner/:repo/contents",
            get(get_root).put(put_root).delete(delete_root),
        )
        .route(
            "/repos/:owner/:repo/contents/*path",
            get(get_contents).put(put_contents).delete(delete_contents),
        )
        .route("/login/device/code", post(device_code))
        .route("/login/oauth/access_token", post(access_token))
        .with_state(state)
}

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "message": msg }))).into_response()
}

fn unauthorized() -> Response {
    message(StatusCode::UNAUTHORIZED, "Bad credentials")
}

async fn current_user(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": 1,
        "login": OWNER,
        "name": "The Octocat",
        "avatar_url": "https://avatars.example.test/u/1",
    }))
    .into_response()
}

async fn list_repos(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut st = lock(&state);
    st.repo_queries.push(query);
    Json(Value::Array(st.repos.clone())).into_response()
}

async fn create_repo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut st = lock(&state);
    st.create_bodies.push(body.clone());

    let name = body["name"].as_str().unwrap_or_default().to_string();
    if st.repos.iter().any(|r| r["name"] == name.as_str()) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "Repository creation failed.",
                "errors": [{
                    "resource": "Repository",
                    "code": "custom",
                    "field": "name",
                    "message": "name already exists on this account",
                }],
            })),
        )
            .into_response();
    }

    st.next_repo_id += 1;
    let repo = json!({
        "id": st.next_repo_id,
        "name": name,
        "full_name": format!("{}/{}", OWNER, name),
        "owner": { "login": OWNER },
        "private": body["private"].as_bool().unwrap_or(false),
        "default_branch": "main",
        "description": body["description"],
        "updated_at": format!("2024-01-0{}T10:00:00Z", st.next_repo_id.min(9)),
    });
    // Most recently updated first.
    st.repos.insert(0, repo.clone());
    (StatusCode::CREATED, Json(repo)).into_response()
}

fn content_view(path: &str, kind: &str, size: usize, sha: &str) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({
        "name": name,
        "path": path,
        "type": kind,
        "size": size,
        "sha": sha,
    })
}

fn read_contents(state: &Shared, full_name: String, path: String) -> Response {
    let st = lock(state);
    if let Some(file) = st.files.get(&(full_name.clone(), path.clone())) {
        let encoded = STANDARD.encode(&file.bytes);
        // Upstream wraps the payload at 60 columns.
        let wrapped: Vec<String> = encoded
            .as_bytes()
            .chunks(60)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect();
        let mut view = content_view(&path, "file", file.bytes.len(), &file.sha);
        view["content"] = Value::String(wrapped.join("\n") + "\n");
        view["encoding"] = Value::String("base64".to_string());
        return Json(view).into_response();
    }

    let prefix = if path.is_empty() {
        String::new()
    } else {
        format!("{}/", path)
    };
    let mut children: BTreeMap<String, Value> = BTreeMap::new();
    for ((repo, file_path), file) in st.files.iter() {
        if *repo != full_name {
            continue;
        }
        let Some(rest) = file_path.strip_prefix(&prefix) else {
            continue;
        };
        match rest.split_once('/') {
            Some((dir, _)) => {
                let dir_path = format!("{}{}", prefix, dir);
                children
                    .entry(dir.to_string())
                    .or_insert_with(|| content_view(&dir_path, "dir", 0, "tree"));
            }
            None => {
                children.insert(
                    rest.to_string(),
                    content_view(file_path, "file", file.bytes.len(), &file.sha),
                );
            }
        }
    }
    if children.is_empty() {
        return message(StatusCode::NOT_FOUND, "Not Found");
    }
    // Upstream order is not guaranteed; reverse it so callers must sort.
    let listing: Vec<Value> = children.into_values().rev().collect();
    Json(Value::Array(listing)).into_response()
}

fn write_contents(state: &Shared, full_name: String, path: String, body: Value) -> Response {
    let mut st = lock(state);
    let key = format!("{}:{}", full_name, path);
    st.writes.push(format!("PUT {}", key));
    if let Some(msg) = body["message"].as_str() {
        st.commit_messages.push(msg.to_string());
    }
    if st.fail_paths.contains(&key) {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Server Error");
    }

    let bytes = match body["content"].as_str().map(|c| STANDARD.decode(c)) {
        Some(Ok(bytes)) => bytes,
        _ => return message(StatusCode::UNPROCESSABLE_ENTITY, "content is not valid Base64"),
    };
    let sent_sha = body["sha"].as_str();
    let file_key = (full_name, path.clone());
    let existed = match st.files.get(&file_key) {
        Some(existing) => match sent_sha {
            None => {
                return message(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Invalid request.\n\n\"sha\" wasn't supplied.",
                );
            }
            Some(sha) if sha != existing.sha => {
                return message(
                    StatusCode::CONFLICT,
                    &format!("{} does not match {}", path, sha),
                );
            }
            Some(_) => true,
        },
        None => false,
    };

    let sha = st.mint_sha();
    let size = bytes.len();
    st.files.insert(
        file_key,
        StoredFile {
            bytes,
            sha: sha.clone(),
        },
    );
    let status = if existed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (
        status,
        Json(json!({
            "content": content_view(&path, "file", size, &sha),
            "commit": { "sha": format!("commit-{}", sha) },
        })),
    )
        .into_response()
}

fn remove_contents(state: &Shared, full_name: String, path: String, body: Value) -> Response {
    let mut st = lock(state);
    st.writes.push(format!("DELETE {}:{}", full_name, path));
    if let Some(msg) = body["message"].as_str() {
        st.commit_messages.push(msg.to_string());
    }
    let file_key = (full_name, path.clone());
    let Some(existing) = st.files.get(&file_key) else {
        return message(StatusCode::NOT_FOUND, "Not Found");
    };
    let sent = body["sha"].as_str().unwrap_or_default();
    if sent != existing.sha {
        return message(
            StatusCode::CONFLICT,
            &format!("{} does not match {}", path, sent),
        );
    }
    st.files.remove(&file_key);
    Json(json!({ "content": null, "commit": { "sha": "commit-delete" } })).into_response()
}

async fn get_root(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    read_contents(&state, format!("{}/{}", owner, repo), String::new())
}

async fn get_contents(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((owner, repo, path)): Path<(String, String, String)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    read_contents(&state, format!("{}/{}", owner, repo), path)
}

async fn put_root(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    message(StatusCode::UNPROCESSABLE_ENTITY, "path is required")
}

async fn put_contents(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((owner, repo, path)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    write_contents(&state, format!("{}/{}", owner, repo), path, body)
}

async fn delete_root(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    message(StatusCode::UNPROCESSABLE_ENTITY, "path is required")
}

async fn delete_contents(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((owner, repo, path)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    remove_contents(&state, format!("{}/{}", owner, repo), path, body)
}

async fn device_code(Form(form): Form<HashMap<String, String>>) -> Response {
    if form.get("client_id").map(String::as_str) != Some(CLIENT_ID) {
        return (
            StatusCode::OK,
            Json(json!({ "error": "incorrect_client_credentials" })),
        )
            .into_response();
    }
    Json(json!({
        "device_code": "device-123",
        "user_code": "WDJB-MJHT",
        "verification_uri": "https://example.test/login/device",
        "expires_in": 30,
        "interval": 0,
    }))
    .into_response()
}

async fn access_token(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut st = lock(&state);
    st.token_polls += 1;
    if form.get("device_code").map(String::as_str) != Some("device-123") {
        return Json(json!({ "error": "bad_verification_code" })).into_response();
    }
    // The first poll always finds the request still pending.
    if st.token_polls == 1 {
        return Json(json!({ "error": "authorization_pending" })).into_response();
    }
    match st.device {
        DeviceOutcome::Approve => Json(json!({
            "access_token": TOKEN,
            "token_type": "bearer",
            "scope": "repo,read:user",
        }))
        .into_response(),
        DeviceOutcome::Deny => Json(json!({ "error": "access_denied" })).into_response(),
    }
}
