#![allow(dead_code)]

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A multipart submission as the catalog service received it.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub fields: HashMap<String, String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub image: Option<Vec<u8>>,
}

#[derive(Clone, Default)]
pub struct CatalogState {
    products: Arc<Mutex<Vec<Value>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    garbage_reads: Arc<AtomicBool>,
}

impl CatalogState {
    pub fn new(products: Vec<Value>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            ..Default::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn garbage_reads(&self, garbage: bool) {
        self.garbage_reads.store(garbage, Ordering::SeqCst);
    }

    pub fn products(&self) -> Vec<Value> {
        self.products.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

pub fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "nombre": "Paleta Fresa",
            "precio": 2.5,
            "categoria": "paletas",
            "imagen": "https://storage.googleapis.com/tingoheladosbucket/fresa.png"
        }),
        json!({
            "id": 2,
            "nombre": "Helado Crema",
            "precio": 5.0,
            "categoria": "crema",
            "imagen": "https://storage.googleapis.com/tingoheladosbucket/crema.png"
        }),
        json!({
            "id": 3,
            "nombre": "Caja Paletas x24",
            "precio": 48,
            "categoria": "porMayor",
            "imagen": "https://example.com/caja.png"
        }),
    ]
}

async fn list_products(State(state): State<CatalogState>) -> Result<Json<Value>, StatusCode> {
    if state.fail_reads.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if state.garbage_reads.load(Ordering::SeqCst) {
        return Ok(Json(json!({ "error": "not a list" })));
    }
    Ok(Json(Value::Array(state.products())))
}

async fn create_product(State(state): State<CatalogState>, mut multipart: Multipart) -> StatusCode {
    if state.fail_writes.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    let mut submission = Submission::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "imagen" {
            submission.file_name = field.file_name().map(str::to_string);
            submission.content_type = field.content_type().map(str::to_string);
            match field.bytes().await {
                Ok(bytes) => submission.image = Some(bytes.to_vec()),
                Err(_) => return StatusCode::BAD_REQUEST,
            }
        } else {
            match field.text().await {
                Ok(text) => {
                    submission.fields.insert(name, text);
                }
                Err(_) => return StatusCode::BAD_REQUEST,
            }
        }
    }

    let Some(precio) = submission
        .fields
        .get("precio")
        .and_then(|p| p.parse::<f64>().ok())
    else {
        return StatusCode::BAD_REQUEST;
    };

    let mut products = state.products.lock().unwrap();
    let next_id = products
        .iter()
        .filter_map(|p| p["id"].as_u64())
        .max()
        .unwrap_or(0)
        + 1;
    products.push(json!({
        "id": next_id,
        "nombre": submission.fields.get("nombre").cloned().unwrap_or_default(),
        "precio": precio,
        "categoria": submission.fields.get("categoria").cloned().unwrap_or_default(),
        "imagen": format!(
            "https://storage.googleapis.com/tingoheladosbucket/{}",
            submission.file_name.clone().unwrap_or_default()
        ),
    }));
    drop(products);

    state.submissions.lock().unwrap().push(submission);
    StatusCode::CREATED
}

fn router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/productos", get(list_products).post(create_product))
        .with_state(state)
}

/// Catalog service bound to an ephemeral port inside the test's runtime.
pub struct TestCatalogServer {
    pub base_url: String,
    pub state: CatalogState,
    handle: tokio::task::JoinHandle<()>,
}

impl TestCatalogServer {
    pub async fn spawn(products: Vec<Value>) -> Self {
        let state = CatalogState::new(products);
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }
}

impl Drop for TestCatalogServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Same catalog service on its own thread, for tests that drive the binary.
pub fn spawn_catalog_thread(products: Vec<Value>) -> (String, CatalogState) {
    let state = CatalogState::new(products);
    let app = router(state.clone());
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind ephemeral port");
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    (format!("http://{}", addr), state)
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
