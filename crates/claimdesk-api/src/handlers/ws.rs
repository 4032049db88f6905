//! WebSocket change-feed endpoint.
//!
//! Clients subscribe to per-table change feeds and the presence channel
//! over a single socket. Each subscription runs as its own forwarder task
//! feeding a shared outbound queue; unsubscribing (or closing the socket)
//! aborts the task, which drops the hub-side registration.

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use claimdesk_core::events::{RowFilter, Table};
use claimdesk_realtime::FeedMessage;

use crate::state::AppState;

/// Outbound queue depth per connection. A full queue drops the frame;
/// the lag marker from the hub covers recovery.
const OUTBOUND_BUFFER: usize = 64;

/// Inbound control frames.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ClientFrame {
    /// Subscribe to a table, optionally scoped to one case's rows.
    Subscribe {
        table: String,
        case_id: Option<Uuid>,
    },
    /// Drop the subscription for a table.
    Unsubscribe { table: String },
    /// Subscribe to the presence channel.
    SubscribePresence,
    /// Drop the presence subscription.
    UnsubscribePresence,
}

/// GET /ws WebSocket upgrade.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_connection(state, socket))
}

async fn handle_connection(state: AppState, socket: WebSocket) {
    let conn_id = Uuid::new_v4();
    let max_subscriptions = state.config.realtime.max_subscriptions_per_connection;
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);

    info!(conn_id = %conn_id, "WebSocket connection established");

    // Forward queued frames to the socket until either side closes.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let mut table_tasks: HashMap<Table, JoinHandle<()>> = HashMap::new();
    let mut presence_task: Option<JoinHandle<()>> = None;

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let frame = match serde_json::from_str::<ClientFrame>(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        send_error(&outbound_tx, &format!("Malformed frame: {e}")).await;
                        continue;
                    }
                };
                handle_frame(
                    &state,
                    frame,
                    &outbound_tx,
                    &mut table_tasks,
                    &mut presence_task,
                    max_subscriptions,
                )
                .await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    for (_, task) in table_tasks.drain() {
        task.abort();
    }
    if let Some(task) = presence_task {
        task.abort();
    }
    outbound_task.abort();

    info!(conn_id = %conn_id, "WebSocket connection closed");
}

async fn handle_frame(
    state: &AppState,
    frame: ClientFrame,
    outbound: &mpsc::Sender<String>,
    table_tasks: &mut HashMap<Table, JoinHandle<()>>,
    presence_task: &mut Option<JoinHandle<()>>,
    max_subscriptions: usize,
) {
    match frame {
        ClientFrame::Subscribe { table, case_id } => {
            let Some(table) = Table::parse(&table) else {
                send_error(outbound, &format!("Unknown table: {table}")).await;
                return;
            };
            let active = table_tasks.len() + usize::from(presence_task.is_some());
            if !table_tasks.contains_key(&table) && active >= max_subscriptions {
                send_error(outbound, "Subscription limit reached").await;
                return;
            }

            let filter = match case_id {
                Some(case_id) => RowFilter::CaseId(case_id),
                None => RowFilter::Any,
            };
            let mut subscription = state.hub.subscribe(table, filter);
            let tx = outbound.clone();
            let task = tokio::spawn(async move {
                while let Some(message) = subscription.recv().await {
                    let frame = match message {
                        FeedMessage::Event(event) => serde_json::json!({
                            "type": "change",
                            "table": table.as_str(),
                            "event": event,
                        }),
                        FeedMessage::Lagged(skipped) => serde_json::json!({
                            "type": "lagged",
                            "table": table.as_str(),
                            "skipped": skipped,
                        }),
                    };
                    if tx.send(frame.to_string()).await.is_err() {
                        break;
                    }
                }
            });
            // Resubscribing to the same table replaces the old filter.
            if let Some(old) = table_tasks.insert(table, task) {
                old.abort();
            }
            send_ack(outbound, "subscribed", table).await;
        }
        ClientFrame::Unsubscribe { table } => {
            let Some(table) = Table::parse(&table) else {
                send_error(outbound, &format!("Unknown table: {table}")).await;
                return;
            };
            if let Some(task) = table_tasks.remove(&table) {
                task.abort();
            }
            send_ack(outbound, "unsubscribed", table).await;
        }
        ClientFrame::SubscribePresence => {
            if presence_task.is_some() {
                return;
            }
            let active = table_tasks.len();
            if active >= max_subscriptions {
                send_error(outbound, "Subscription limit reached").await;
                return;
            }
            let mut subscription = state.hub.subscribe_presence();
            let tx = outbound.clone();
            *presence_task = Some(tokio::spawn(async move {
                while let Some(signal) = subscription.recv().await {
                    let frame = serde_json::json!({
                        "type": "presence",
                        "signal": signal,
                    });
                    if tx.send(frame.to_string()).await.is_err() {
                        break;
                    }
                }
            }));
            let _ = outbound
                .send(serde_json::json!({ "type": "presence_subscribed" }).to_string())
                .await;
        }
        ClientFrame::UnsubscribePresence => {
            if let Some(task) = presence_task.take() {
                task.abort();
            }
            let _ = outbound
                .send(serde_json::json!({ "type": "presence_unsubscribed" }).to_string())
                .await;
        }
    }
}

async fn send_ack(outbound: &mpsc::Sender<String>, kind: &str, table: Table) {
    let frame = serde_json::json!({ "type": kind, "table": table.as_str() });
    let _ = outbound.send(frame.to_string()).await;
}

async fn send_error(outbound: &mpsc::Sender<String>, message: &str) {
    let frame = serde_json::json!({ "type": "error", "message": message });
    let _ = outbound.send(frame.to_string()).await;
}
