//! Referential-integrity properties of the routing graph.
//!
//! These drive the graph through mixed sequences of creates and deletes and
//! then audit the store directly for dangling references.

mod common;

use crate::common::*;
use axum::http::StatusCode;
use routing_core::domains::graph::find_dangling_flow_edges;
use test_context::test_context;

async fn assert_no_dangling_edges(ctx: &TestHarness) {
    let mut tx = ctx.deps.begin().await.unwrap();
    let dangling = find_dangling_flow_edges(tx.as_mut()).await.unwrap();
    assert!(dangling.is_empty(), "dangling edges: {:?}", dangling);
}

/// A source with `ports` ports, each wired to `fan_out` destination ports.
async fn meshed_source(
    client: &TestClient,
    event_id: &str,
    destination_id: &str,
    ports: i32,
    fan_out: i32,
) -> String {
    let source_id = create_source(client, event_id, "Cam").await;
    for channel in 1..=ports {
        let source_port = create_source_port(client, &source_id, "audio", channel).await;
        for _ in 0..fan_out {
            let destination_port =
                create_destination_port(client, destination_id, "audio", channel).await;
            create_flow_edge(client, &source_port, &destination_port).await;
        }
    }
    source_id
}

#[test_context(TestHarness)]
#[tokio::test]
async fn mixed_deletes_never_leave_dangling_edges(ctx: &TestHarness) {
    let client = ctx.client();
    let event_id = create_event(&client, "Finals").await;
    let destination_id = create_destination(&client, &event_id, "Mixer").await;
    let first = meshed_source(&client, &event_id, &destination_id, 2, 2).await;
    let second = meshed_source(&client, &event_id, &destination_id, 3, 1).await;
    assert_eq!(client.get("/flow-edges").await.len(), 7);

    // Drop one destination port, then a whole source, then a single edge.
    let destination_ports = client
        .get(&format!("/destination-ports/by-destination/{}", destination_id))
        .await;
    let first_port = destination_ports.body[0]["id"].as_str().unwrap().to_string();
    client
        .delete(&format!("/destination-ports/{}", first_port))
        .await;
    assert_no_dangling_edges(ctx).await;

    client.delete(&format!("/sources/{}", first)).await;
    assert_no_dangling_edges(ctx).await;

    let edges = client.get("/flow-edges").await;
    assert_eq!(edges.len(), 3);
    let edge_id = edges.body[0]["id"].as_str().unwrap().to_string();
    client.delete(&format!("/flow-edges/{}", edge_id)).await;
    assert_no_dangling_edges(ctx).await;

    client.delete(&format!("/destinations/{}", destination_id)).await;
    assert_no_dangling_edges(ctx).await;
    assert_eq!(client.get("/flow-edges").await.len(), 0);
    assert_eq!(
        client
            .get(&format!("/source-ports/by-source/{}", second))
            .await
            .len(),
        3
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn source_delete_is_transitive(ctx: &TestHarness) {
    let client = ctx.client();
    let event_id = create_event(&client, "Finals").await;
    let destination_id = create_destination(&client, &event_id, "Mixer").await;
    let source_id = meshed_source(&client, &event_id, &destination_id, 4, 3).await;
    let port_ids: Vec<String> = client
        .get(&format!("/source-ports/by-source/{}", source_id))
        .await
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|port| port["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(port_ids.len(), 4);
    assert_eq!(client.get("/flow-edges").await.len(), 12);

    client.delete(&format!("/sources/{}", source_id)).await;

    for port_id in &port_ids {
        assert_eq!(
            client
                .get(&format!("/source-ports/{}", port_id))
                .await
                .status,
            StatusCode::NOT_FOUND
        );
    }
    let edges = client.get("/flow-edges").await;
    assert!(edges
        .body
        .as_array()
        .unwrap()
        .iter()
        .all(|edge| !port_ids.iter().any(|id| edge["sourcePortId"] == id.as_str())));
    assert_eq!(edges.len(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn repeated_deletes_keep_reporting_not_found(ctx: &TestHarness) {
    let client = ctx.client();
    let wired = wired_event(&client, "Finals").await;
    let partyline_id = create_partyline(&client, &wired.event_id, "Director").await;

    let paths = [
        format!("/flow-edges/{}", wired.flow_edge_id),
        format!("/source-ports/{}", wired.source_port_id),
        format!("/destination-ports/{}", wired.destination_port_id),
        format!("/sources/{}", wired.source_id),
        format!("/destinations/{}", wired.destination_id),
        format!("/partylines/{}", partyline_id),
        format!("/events/{}", wired.event_id),
    ];
    for path in &paths {
        assert_eq!(client.delete(path).await.status, StatusCode::NO_CONTENT, "{}", path);
        for _ in 0..2 {
            let again = client.delete(path).await;
            assert_eq!(again.status, StatusCode::NOT_FOUND, "{}", path);
            assert!(again.message().ends_with("not found"));
        }
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn event_detail_contains_exactly_its_own_graph(ctx: &TestHarness) {
    let client = ctx.client();
    let first = wired_event(&client, "First").await;
    let second = wired_event(&client, "Second").await;
    let extra_port = create_source_port(&client, &second.source_id, "audio", 2).await;
    create_flow_edge(&client, &extra_port, &second.destination_port_id).await;
    create_partyline(&client, &second.event_id, "Comms").await;

    let detail = client.get(&format!("/events/{}", first.event_id)).await.body;
    let edge_ids: Vec<_> = detail["flowEdges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|edge| edge["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(edge_ids, vec![first.flow_edge_id.clone()]);
    assert_eq!(detail["partylines"].as_array().unwrap().len(), 0);

    let detail = client.get(&format!("/events/{}", second.event_id)).await.body;
    assert_eq!(detail["flowEdges"].as_array().unwrap().len(), 2);
    assert_eq!(detail["sources"][0]["ports"].as_array().unwrap().len(), 2);
    assert_eq!(detail["partylines"].as_array().unwrap().len(), 1);

    // Bulk details agree with the single-event view.
    let all = client.get("/events?detail=true").await;
    assert_eq!(all.len(), 2);
    assert_eq!(all.body[0]["id"], first.event_id.as_str());
    assert_eq!(all.body[0]["flowEdges"].as_array().unwrap().len(), 1);
    assert_eq!(all.body[1]["flowEdges"].as_array().unwrap().len(), 2);
}

/// Edges may join ports of different events. The edge is reported with the
/// event that owns its source port.
#[test_context(TestHarness)]
#[tokio::test]
async fn cross_event_edges_are_accepted(ctx: &TestHarness) {
    let client = ctx.client();
    let home = wired_event(&client, "Home").await;
    let away = wired_event(&client, "Away").await;

    let response = client
        .post(
            "/flow-edges",
            serde_json::json!({
                "sourcePortId": home.source_port_id,
                "destinationPortId": away.destination_port_id
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let cross_edge = response.id();

    let home_edges = client
        .get(&format!("/flow-edges?eventId={}", home.event_id))
        .await;
    assert_eq!(home_edges.len(), 2);
    assert!(home_edges
        .body
        .as_array()
        .unwrap()
        .iter()
        .any(|edge| edge["id"] == cross_edge.as_str()));

    let away_detail = client.get(&format!("/events/{}", away.event_id)).await.body;
    assert_eq!(away_detail["flowEdges"].as_array().unwrap().len(), 1);

    // Deleting the away destination still removes the cross edge.
    client
        .delete(&format!("/destinations/{}", away.destination_id))
        .await;
    let home_edges = client
        .get(&format!("/flow-edges?eventId={}", home.event_id))
        .await;
    assert_eq!(home_edges.len(), 1);
    assert_no_dangling_edges(ctx).await;
}
