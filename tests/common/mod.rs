//! In-process stand-in for the content store, served by actix-web on an
//! ephemeral port.

#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use content_admin::core::config::{ApiConfig, Config};
use content_admin::session::TokenStore;
use content_admin::AdminContext;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "editor@example.com";
pub const PASSWORD: &str = "secret";

#[derive(Debug, Default)]
pub struct StoreState {
    pub catalogs: Vec<Value>,
    pub home: Vec<Value>,
    pub pages: Vec<Value>,
    pub requests: usize,
    pub writes: Vec<String>,
    pub failing_section: Option<String>,
    pub revoked: bool,
    pub upload_bytes: usize,
}

pub struct FakeStore {
    pub base_url: String,
    pub state: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    pub fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store state")
    }

    pub fn requests(&self) -> usize {
        self.state().requests
    }
}

pub async fn start(state: StoreState) -> FakeStore {
    let shared = Arc::new(Mutex::new(state));
    let data = web::Data::from(Arc::clone(&shared));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/api/auth/login", web::post().to(login))
            .route("/api/auth/me", web::get().to(me))
            .route("/api/catalog-sections", web::get().to(list_catalogs))
            .route("/api/catalog-sections/{id}", web::get().to(get_catalog))
            .route("/api/catalog-sections/{id}", web::put().to(put_catalog))
            .route("/api/home", web::get().to(list_home))
            .route("/api/home/{section}", web::post().to(post_home))
            .route("/api/home/{section}", web::delete().to(delete_home))
            .route("/api/static-pages", web::get().to(list_pages))
            .route("/api/static-pages/{slug}", web::post().to(post_page))
            .route("/api/upload", web::post().to(upload))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake store");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    FakeStore {
        base_url: format!("http://{}/api", addr),
        state: shared,
    }
}

/// Context wired to `store`, keeping its session file inside `dir`.
pub fn context(store: &FakeStore, dir: &TempDir) -> Arc<AdminContext> {
    let mut config = Config::default();
    config.api = ApiConfig::with_base_url(store.base_url.clone());
    config.api.upload_chunk_kib = 4;
    Arc::new(AdminContext::with_parts(config, TokenStore::with_path(token_path(dir))).expect("context"))
}

pub fn token_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session.toml")
}

pub fn features_section(id: &str, order: i64) -> Value {
    json!({
        "section": id,
        "type": "features",
        "isActive": true,
        "order": order,
        "data": {"features": [{
            "icon": "Shield",
            "title": {"de": "Sicher", "en": "Safe"},
            "content": {"de": "Geprüft", "en": "Tested"}
        }]}
    })
}

pub fn legacy_catalog() -> Value {
    json!({
        "_id": "c1",
        "name": "Implantat",
        "title": {"de": "Titel", "en": ""},
        "variants": [{"diameter": "3.5", "color": "Blau", "hex": "#0000ff", "lengths": "8, 10,12"}],
        "articles": [{"artNr": 1001, "description": "Schraube"}],
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

fn hit(state: &web::Data<Mutex<StoreState>>) -> MutexGuard<'_, StoreState> {
    let mut guard = state.lock().expect("store state");
    guard.requests += 1;
    guard
}

fn authorized(req: &HttpRequest, state: &StoreState) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    !state.revoked
        && req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str())
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({"success": false, "error": "Invalid token"}))
}

fn ok(data: Value) -> HttpResponse {
    HttpResponse::Ok().json(json!({"success": true, "data": data}))
}

fn upsert(items: &mut Vec<Value>, key: &str, id: &str, doc: Value) {
    match items.iter_mut().find(|item| item[key] == id) {
        Some(existing) => *existing = doc,
        None => items.push(doc),
    }
}

async fn login(state: web::Data<Mutex<StoreState>>, body: web::Json<Value>) -> HttpResponse {
    let _guard = hit(&state);
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        HttpResponse::Ok().json(json!({"success": true, "token": TOKEN}))
    } else {
        HttpResponse::Unauthorized().json(json!({"success": false, "error": "Invalid credentials"}))
    }
}

async fn me(req: HttpRequest, state: web::Data<Mutex<StoreState>>) -> HttpResponse {
    let guard = hit(&state);
    if !authorized(&req, &guard) {
        return unauthorized();
    }
    ok(json!({"email": EMAIL, "name": "Editor", "role": "admin"}))
}

async fn list_catalogs(state: web::Data<Mutex<StoreState>>) -> HttpResponse {
    let guard = hit(&state);
    ok(Value::Array(guard.catalogs.clone()))
}

async fn get_catalog(
    state: web::Data<Mutex<StoreState>>,
    path: web::Path<String>,
) -> HttpResponse {
    let guard = hit(&state);
    let id = path.into_inner();
    match guard.catalogs.iter().find(|c| c["_id"] == id.as_str()) {
        Some(doc) => ok(doc.clone()),
        None => HttpResponse::NotFound()
            .json(json!({"success": false, "error": "Catalog section not found"})),
    }
}

async fn put_catalog(
    req: HttpRequest,
    state: web::Data<Mutex<StoreState>>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let mut guard = hit(&state);
    if !authorized(&req, &guard) {
        return unauthorized();
    }
    let id = path.into_inner();
    let doc = body.into_inner();
    upsert(&mut guard.catalogs, "_id", &id, doc.clone());
    guard.writes.push(format!("catalog-sections/{}", id));
    ok(doc)
}

async fn list_home(state: web::Data<Mutex<StoreState>>) -> HttpResponse {
    let guard = hit(&state);
    ok(Value::Array(guard.home.clone()))
}

async fn post_home(
    req: HttpRequest,
    state: web::Data<Mutex<StoreState>>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let mut guard = hit(&state);
    if !authorized(&req, &guard) {
        return unauthorized();
    }
    let id = path.into_inner();
    if guard.failing_section.as_deref() == Some(id.as_str()) {
        return HttpResponse::InternalServerError()
            .json(json!({"success": false, "error": "write failed"}));
    }
    let doc = body.into_inner();
    upsert(&mut guard.home, "section", &id, doc.clone());
    guard.writes.push(format!("home/{}", id));
    ok(doc)
}

async fn delete_home(
    req: HttpRequest,
    state: web::Data<Mutex<StoreState>>,
    path: web::Path<String>,
) -> HttpResponse {
    let mut guard = hit(&state);
    if !authorized(&req, &guard) {
        return unauthorized();
    }
    let id = path.into_inner();
    guard.home.retain(|s| s["section"] != id.as_str());
    guard.writes.push(format!("delete home/{}", id));
    HttpResponse::Ok().json(json!({"success": true}))
}

async fn list_pages(state: web::Data<Mutex<StoreState>>) -> HttpResponse {
    let guard = hit(&state);
    ok(Value::Array(guard.pages.clone()))
}

async fn post_page(
    req: HttpRequest,
    state: web::Data<Mutex<StoreState>>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let mut guard = hit(&state);
    if !authorized(&req, &guard) {
        return unauthorized();
    }
    let slug = path.into_inner();
    let doc = body.into_inner();
    upsert(&mut guard.pages, "page", &slug, doc.clone());
    guard.writes.push(format!("static-pages/{}", slug));
    ok(doc)
}

async fn upload(
    req: HttpRequest,
    state: web::Data<Mutex<StoreState>>,
    body: web::Bytes,
) -> HttpResponse {
    let mut guard = hit(&state);
    if !authorized(&req, &guard) {
        return unauthorized();
    }
    let marker = b"name=\"image\"";
    if !body.windows(marker.len()).any(|w| w == marker) {
        return HttpResponse::BadRequest()
            .json(json!({"success": false, "error": "No image field"}));
    }
    guard.upload_bytes = body.len();
    HttpResponse::Ok().json(json!({"success": true, "url": "/uploads/hero.png"}))
}
