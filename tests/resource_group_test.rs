//! Resource group client operations against the mock management API.

mod common;

use azlab::arm::ArmClient;
use azlab::domain::Tags;
use common::{Canned, Route, spawn_mock_api};
use serde_json::json;

const SUB: &str = "00000000-0000-0000-0000-000000000000";

fn group_json(name: &str, state: &str) -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/{SUB}/resourceGroups/{name}"),
        "name": name,
        "location": "westeurope",
        "tags": { "env": "lab" },
        "properties": { "provisioningState": state },
    })
}

#[test]
fn create_resource_group_round_trips() {
    let mock = spawn_mock_api(vec![Route::json(
        "PUT",
        format!("/subscriptions/{SUB}/resourcegroups/lab-rg-1"),
        200,
        group_json("lab-rg-1", "Succeeded"),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let mut tags = Tags::new();
    tags.insert("env".into(), "lab".into());

    let group = client
        .create_resource_group("lab-rg-1", "westeurope", &tags)
        .unwrap();

    assert_eq!(group.name, "lab-rg-1");
    assert_eq!(group.location, "westeurope");
    assert_eq!(group.provisioning_state, "Succeeded");
    assert_eq!(group.tags.get("env").unwrap(), "lab");
}

#[test]
fn get_resource_group_maps_404_to_none() {
    let mock = spawn_mock_api(vec![Route::json(
        "GET",
        format!("/subscriptions/{SUB}/resourcegroups/missing"),
        404,
        json!({ "error": { "code": "ResourceGroupNotFound", "message": "not there" } }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    assert!(client.get_resource_group("missing").unwrap().is_none());
}

#[test]
fn list_resource_groups_unwraps_value() {
    let mock = spawn_mock_api(vec![Route::json(
        "GET",
        format!("/subscriptions/{SUB}/resourcegroups"),
        200,
        json!({ "value": [group_json("lab-rg-1", "Succeeded"), group_json("lab-rg-2", "Deleting")] }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let groups = client.list_resource_groups().unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].name, "lab-rg-2");
    assert_eq!(groups[1].provisioning_state, "Deleting");
}

#[test]
fn api_errors_carry_the_cloud_error_code() {
    let mock = spawn_mock_api(vec![Route::json(
        "PUT",
        format!("/subscriptions/{SUB}/resourcegroups/forbidden"),
        403,
        json!({ "error": { "code": "AuthorizationFailed", "message": "no permission" } }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let err = client
        .create_resource_group("forbidden", "westeurope", &Tags::new())
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("403"), "unexpected error: {text}");
    assert!(text.contains("AuthorizationFailed"), "unexpected error: {text}");
    assert!(text.contains("no permission"), "unexpected error: {text}");
}

#[test]
fn delete_returns_polling_handle_and_finishes() {
    let poll_path = "/operationresults/op1";
    let mock_routes = vec![
        Route::new(
            "DELETE",
            format!("/subscriptions/{SUB}/resourcegroups/lab-rg-1"),
            vec![Canned::json(202, json!({})).with_header("Location", "PLACEHOLDER")],
        ),
        Route::new(
            "GET",
            poll_path,
            vec![
                Canned::json(202, json!({})),
                Canned::json(200, json!({ "status": "Succeeded" })),
            ],
        ),
    ];
    let mock = spawn_mock_api(mock_routes);

    // The Location header has to point back at the mock itself
    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let pending = client.delete_resource_group("lab-rg-1").unwrap();

    // Header value was a placeholder; rebuild the handle with the real URL
    let mut pending = pending.expect("202 should produce a polling handle");
    pending.poll_url = format!("{}{}", mock.base_url, poll_path);

    assert!(!client.deletion_finished(&pending).unwrap());
    assert!(client.deletion_finished(&pending).unwrap());
}

#[test]
fn deletion_poll_treats_404_as_finished() {
    let mock = spawn_mock_api(vec![Route::json(
        "GET",
        "/operationresults/op2",
        404,
        json!({ "error": { "code": "NotFound", "message": "gone" } }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let pending = azlab::arm::PendingDeletion {
        name: "lab-rg-1".to_string(),
        poll_url: format!("{}/operationresults/op2", mock.base_url),
    };
    assert!(client.deletion_finished(&pending).unwrap());
}
