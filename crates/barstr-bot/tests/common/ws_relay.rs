//! In-process NIP-01 relay for end-to-end tests.
//!
//! Stores every published event, replays matches on `REQ` followed by
//! `EOSE`, and pushes new events to live subscriptions. Tests can inject
//! signed events directly with [`WsRelay::inject`].

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayEvent {
    pub id: String,
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u32,
    pub tags: Vec<Vec<String>>,
    pub content: String,
    pub sig: String,
}

impl RelayEvent {
    pub fn has_tag(&self, name: &str, value: &str) -> bool {
        self.tags
            .iter()
            .any(|t| t.len() >= 2 && t[0] == name && t[1] == value)
    }
}

impl From<&nostr::Event> for RelayEvent {
    fn from(event: &nostr::Event) -> Self {
        let value = serde_json::to_value(event).expect("event serializes");
        serde_json::from_value(value).expect("event has NIP-01 shape")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<u32>>,
    #[serde(rename = "#p", skip_serializing_if = "Option::is_none")]
    pub p_tags: Option<Vec<String>>,
    #[serde(rename = "#e", skip_serializing_if = "Option::is_none")]
    pub e_tags: Option<Vec<String>>,
    #[serde(rename = "#t", skip_serializing_if = "Option::is_none")]
    pub t_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<u64>,
}

fn tag_matches(event: &RelayEvent, name: &str, wanted: &Option<Vec<String>>) -> bool {
    match wanted {
        Some(values) => values.iter().any(|v| event.has_tag(name, v)),
        None => true,
    }
}

impl RelayFilter {
    pub fn matches(&self, event: &RelayEvent) -> bool {
        if let Some(ref ids) = self.ids {
            if !ids.contains(&event.id) {
                return false;
            }
        }
        if let Some(ref authors) = self.authors {
            if !authors.contains(&event.pubkey) {
                return false;
            }
        }
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        if !tag_matches(event, "p", &self.p_tags)
            || !tag_matches(event, "e", &self.e_tags)
            || !tag_matches(event, "t", &self.t_tags)
        {
            return false;
        }
        if self.since.is_some_and(|since| event.created_at < since) {
            return false;
        }
        if self.until.is_some_and(|until| event.created_at > until) {
            return false;
        }
        true
    }
}

struct RelayState {
    events: RwLock<Vec<RelayEvent>>,
    broadcast: broadcast::Sender<RelayEvent>,
    requests: AtomicUsize,
}

impl RelayState {
    fn new() -> Self {
        let (broadcast, _) = broadcast::channel(1024);
        Self {
            events: RwLock::new(Vec::new()),
            broadcast,
            requests: AtomicUsize::new(0),
        }
    }

    async fn store(&self, event: RelayEvent) {
        self.events.write().await.push(event.clone());
        let _ = self.broadcast.send(event);
    }
}

pub struct WsRelay {
    state: Arc<RelayState>,
    addr: Option<SocketAddr>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl WsRelay {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RelayState::new()),
            addr: None,
            shutdown_tx: None,
        }
    }

    /// Binds to a random local port and starts serving.
    pub async fn start(&mut self) -> Result<SocketAddr, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.addr = Some(addr);

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        let app = Router::new()
            .route("/", get(ws_handler))
            .with_state(self.state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_rx.recv().await;
                })
                .await
                .ok();
        });

        Ok(addr)
    }

    pub fn url(&self) -> Option<String> {
        self.addr.map(|addr| format!("ws://{}", addr))
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }

    /// Stores a signed event as if a client had published it.
    pub async fn inject(&self, event: &nostr::Event) {
        self.state.store(RelayEvent::from(event)).await;
    }

    pub async fn events(&self) -> Vec<RelayEvent> {
        self.state.events.read().await.clone()
    }

    /// Number of `REQ` messages received so far.
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

impl Default for WsRelay {
    fn default() -> Self {
        Self::new()
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RelayState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<RelayState>) {
    let (mut sender, mut receiver) = socket.split();
    let subscriptions: Arc<RwLock<HashMap<String, Vec<RelayFilter>>>> =
        Arc::new(RwLock::new(HashMap::new()));
    let (tx, mut rx) = mpsc::channel::<String>(1024);

    let mut live = state.broadcast.subscribe();
    let live_subscriptions = subscriptions.clone();
    let live_tx = tx.clone();
    let live_task = tokio::spawn(async move {
        while let Ok(event) = live.recv().await {
            let subs = live_subscriptions.read().await;
            for (sub_id, filters) in subs.iter() {
                if filters.iter().any(|f| f.matches(&event)) {
                    let msg = serde_json::json!(["EVENT", sub_id, event]);
                    let _ = live_tx.send(msg.to_string()).await;
                }
            }
        }
    });

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else {
            continue;
        };
        let Ok(parsed) = serde_json::from_str::<Vec<serde_json::Value>>(&text) else {
            continue;
        };

        match parsed.first().and_then(|v| v.as_str()) {
            Some("EVENT") if parsed.len() >= 2 => {
                if let Ok(event) = serde_json::from_value::<RelayEvent>(parsed[1].clone()) {
                    let event_id = event.id.clone();
                    state.store(event).await;
                    let ok = serde_json::json!(["OK", event_id, true, ""]);
                    let _ = tx.send(ok.to_string()).await;
                }
            }
            Some("REQ") if parsed.len() >= 3 => {
                let sub_id = parsed[1].as_str().unwrap_or("").to_string();
                let filters: Vec<RelayFilter> = parsed[2..]
                    .iter()
                    .filter_map(|f| serde_json::from_value(f.clone()).ok())
                    .collect();

                // Register before replaying so nothing stored in between is lost.
                subscriptions
                    .write()
                    .await
                    .insert(sub_id.clone(), filters.clone());

                for event in state.events.read().await.iter() {
                    if filters.iter().any(|f| f.matches(event)) {
                        let msg = serde_json::json!(["EVENT", &sub_id, event]);
                        let _ = tx.send(msg.to_string()).await;
                    }
                }
                let eose = serde_json::json!(["EOSE", &sub_id]);
                let _ = tx.send(eose.to_string()).await;
                state.requests.fetch_add(1, Ordering::SeqCst);
            }
            Some("CLOSE") if parsed.len() >= 2 => {
                if let Some(sub_id) = parsed[1].as_str() {
                    subscriptions.write().await.remove(sub_id);
                }
            }
            _ => {}
        }
    }

    live_task.abort();
    send_task.abort();
}
