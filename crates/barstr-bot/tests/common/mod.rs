pub mod ws_relay;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves fixed geocoder and venue responses and counts calls to each.
#[derive(Clone)]
pub struct Providers {
    addr: SocketAddr,
    state: Arc<ProviderState>,
}

struct ProviderState {
    places: Value,
    elements: Value,
    geocoder_calls: AtomicUsize,
    venue_calls: AtomicUsize,
}

async fn search(State(state): State<Arc<ProviderState>>) -> Json<Value> {
    state.geocoder_calls.fetch_add(1, Ordering::SeqCst);
    Json(state.places.clone())
}

async fn elements(State(state): State<Arc<ProviderState>>) -> Json<Value> {
    state.venue_calls.fetch_add(1, Ordering::SeqCst);
    Json(state.elements.clone())
}

impl Providers {
    pub async fn start(places: Value, elements_body: Value) -> Self {
        let state = Arc::new(ProviderState {
            places,
            elements: elements_body,
            geocoder_calls: AtomicUsize::new(0),
            venue_calls: AtomicUsize::new(0),
        });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/search", get(search))
            .route("/v2/elements", get(elements))
            .with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Self { addr, state }
    }

    pub fn geocoder_url(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    pub fn venues_url(&self) -> String {
        format!("http://{}/v2/elements", self.addr)
    }

    pub fn geocoder_calls(&self) -> usize {
        self.state.geocoder_calls.load(Ordering::SeqCst)
    }

    pub fn venue_calls(&self) -> usize {
        self.state.venue_calls.load(Ordering::SeqCst)
    }
}

pub fn lisbon_place() -> Value {
    json!([{ "boundingbox": ["38.69", "38.80", "-9.23", "-9.09"] }])
}

pub fn lisbon_bars() -> Value {
    json!([
        { "osm_json": { "tags": {
            "name": "Bitcoin Bar",
            "amenity": "bar",
            "payment:lightning": "yes"
        } } },
        { "osm_json": { "tags": {
            "name": "Chain Pub",
            "amenity": "pub",
            "payment:onchain": "yes"
        } } },
        { "osm_json": { "tags": {
            "name": "Fiat Cafe",
            "amenity": "cafe"
        } } }
    ])
}
