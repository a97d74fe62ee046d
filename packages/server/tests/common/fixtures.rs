//! Test fixtures for creating routing graphs through the HTTP surface.
//!
//! Each fixture asserts its create succeeded and returns the new row's id.

use axum::http::StatusCode;
use serde_json::json;

use super::{TestClient, TestResponse};

fn created(response: TestResponse) -> String {
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "create failed: {}",
        response.body
    );
    response.id()
}

pub async fn create_event(client: &TestClient, title: &str) -> String {
    created(client.post("/events", json!({ "title": title })).await)
}

pub async fn create_source(client: &TestClient, event_id: &str, label: &str) -> String {
    created(
        client
            .post("/sources", json!({ "label": label, "eventId": event_id }))
            .await,
    )
}

pub async fn create_destination(client: &TestClient, event_id: &str, label: &str) -> String {
    created(
        client
            .post(
                "/destinations",
                json!({ "label": label, "eventId": event_id }),
            )
            .await,
    )
}

pub async fn create_partyline(client: &TestClient, event_id: &str, title: &str) -> String {
    created(
        client
            .post("/partylines", json!({ "title": title, "eventId": event_id }))
            .await,
    )
}

pub async fn create_source_port(
    client: &TestClient,
    source_id: &str,
    port_type: &str,
    channel: i32,
) -> String {
    created(
        client
            .post(
                "/source-ports",
                json!({ "type": port_type, "channel": channel, "sourceId": source_id }),
            )
            .await,
    )
}

pub async fn create_destination_port(
    client: &TestClient,
    destination_id: &str,
    port_type: &str,
    channel: i32,
) -> String {
    created(
        client
            .post(
                "/destination-ports",
                json!({ "type": port_type, "channel": channel, "destinationId": destination_id }),
            )
            .await,
    )
}

pub async fn create_flow_edge(
    client: &TestClient,
    source_port_id: &str,
    destination_port_id: &str,
) -> String {
    created(
        client
            .post(
                "/flow-edges",
                json!({
                    "sourcePortId": source_port_id,
                    "destinationPortId": destination_port_id
                }),
            )
            .await,
    )
}

/// Ids of a single camera wired to a single output, all in one event.
pub struct WiredEvent {
    pub event_id: String,
    pub source_id: String,
    pub source_port_id: String,
    pub destination_id: String,
    pub destination_port_id: String,
    pub flow_edge_id: String,
}

pub async fn wired_event(client: &TestClient, title: &str) -> WiredEvent {
    let event_id = create_event(client, title).await;
    let source_id = create_source(client, &event_id, "Cam1").await;
    let source_port_id = create_source_port(client, &source_id, "video", 1).await;
    let destination_id = create_destination(client, &event_id, "Out1").await;
    let destination_port_id = create_destination_port(client, &destination_id, "video", 1).await;
    let flow_edge_id = create_flow_edge(client, &source_port_id, &destination_port_id).await;

    WiredEvent {
        event_id,
        source_id,
        source_port_id,
        destination_id,
        destination_port_id,
        flow_edge_id,
    }
}
