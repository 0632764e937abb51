//! Storage, RBAC write-path, and metrics operations against the mock API.

mod common;

use azlab::arm::ArmClient;
use azlab::domain::{Tags, VirtualMachine};
use common::{Route, spawn_mock_api};
use serde_json::json;

const SUB: &str = "00000000-0000-0000-0000-000000000000";

#[test]
fn storage_name_check_reports_taken_names() {
    let mock = spawn_mock_api(vec![Route::json(
        "POST",
        format!("/subscriptions/{SUB}/providers/Microsoft.Storage/checkNameAvailability"),
        200,
        json!({ "nameAvailable": false, "reason": "AlreadyExists", "message": "taken" }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let (available, message) = client.check_storage_name("lab0sa").unwrap();

    assert!(!available);
    assert_eq!(message.as_deref(), Some("taken"));
}

#[test]
fn storage_create_parses_synchronous_response() {
    let mock = spawn_mock_api(vec![Route::json(
        "PUT",
        format!(
            "/subscriptions/{SUB}/resourceGroups/lab-rg-1/providers/Microsoft.Storage/storageAccounts/lab0sa"
        ),
        200,
        json!({
            "name": "lab0sa",
            "location": "westeurope",
            "kind": "StorageV2",
            "sku": { "name": "Standard_LRS" },
            "tags": {},
            "properties": { "accessTier": "Hot", "provisioningState": "Succeeded" },
        }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let account = client
        .create_storage_account("lab-rg-1", "lab0sa", "westeurope", "Standard_LRS", Some("Hot"), &Tags::new())
        .unwrap()
        .expect("synchronous create returns the account");

    assert_eq!(account.name, "lab0sa");
    assert_eq!(account.sku, "Standard_LRS");
    assert_eq!(account.access_tier.as_deref(), Some("Hot"));
}

#[test]
fn storage_create_returns_none_on_202() {
    let mock = spawn_mock_api(vec![Route::json(
        "PUT",
        format!(
            "/subscriptions/{SUB}/resourceGroups/lab-rg-1/providers/Microsoft.Storage/storageAccounts/lab0sa"
        ),
        202,
        json!({}),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let created = client
        .create_storage_account("lab-rg-1", "lab0sa", "westeurope", "Standard_LRS", None, &Tags::new())
        .unwrap();

    assert!(created.is_none());
}

#[test]
fn put_role_definition_round_trips() {
    let scope = format!("/subscriptions/{SUB}");
    let guid = "11111111-1111-1111-1111-111111111111";

    let mock = spawn_mock_api(vec![Route::json(
        "PUT",
        format!("{scope}/providers/Microsoft.Authorization/roleDefinitions/{guid}"),
        201,
        json!({
            "id": format!("{scope}/providers/Microsoft.Authorization/roleDefinitions/{guid}"),
            "name": guid,
            "properties": {
                "roleName": "Lab Operator",
                "description": "Start and stop lab VMs",
                "type": "CustomRole",
                "permissions": [{
                    "actions": ["Microsoft.Compute/virtualMachines/start/action"],
                    "notActions": [],
                }],
                "assignableScopes": [scope],
            },
        }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let definition = client
        .put_role_definition(
            &scope,
            guid,
            "Lab Operator",
            "Start and stop lab VMs",
            &["Microsoft.Compute/virtualMachines/start/action".to_string()],
            &[],
            &[scope.clone()],
        )
        .unwrap();

    assert_eq!(definition.name, guid);
    assert_eq!(definition.role_name, "Lab Operator");
    assert!(definition.is_custom());
    assert_eq!(definition.actions.len(), 1);
}

#[test]
fn create_role_assignment_round_trips() {
    let scope = format!("/subscriptions/{SUB}");
    let guid = "22222222-2222-2222-2222-222222222222";

    let mock = spawn_mock_api(vec![Route::json(
        "PUT",
        format!("{scope}/providers/Microsoft.Authorization/roleAssignments/{guid}"),
        201,
        json!({
            "id": format!("{scope}/providers/Microsoft.Authorization/roleAssignments/{guid}"),
            "name": guid,
            "properties": {
                "scope": scope,
                "roleDefinitionId": format!("{scope}/providers/Microsoft.Authorization/roleDefinitions/d1"),
                "principalId": "p1",
                "principalType": "User",
            },
        }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let assignment = client
        .create_role_assignment(
            &scope,
            guid,
            &format!("{scope}/providers/Microsoft.Authorization/roleDefinitions/d1"),
            "p1",
        )
        .unwrap();

    assert_eq!(assignment.name, guid);
    assert_eq!(assignment.principal_id, "p1");
    assert_eq!(assignment.role_definition_guid(), "d1");
}

#[test]
fn cpu_metrics_reduce_to_avg_and_max() {
    let vm_id = format!(
        "/subscriptions/{SUB}/resourceGroups/lab-rg-1/providers/Microsoft.Compute/virtualMachines/vm1"
    );

    let mock = spawn_mock_api(vec![Route::json(
        "GET",
        format!("{vm_id}/providers/Microsoft.Insights/metrics"),
        200,
        json!({ "value": [{
            "timeseries": [{
                "data": [
                    { "average": 10.0, "maximum": 20.0 },
                    { "average": 30.0, "maximum": 80.0 },
                    { "average": null, "maximum": null },
                ],
            }],
        }]}),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let vm = VirtualMachine {
        id: vm_id,
        name: "vm1".to_string(),
        size: "Standard_B2s".to_string(),
        location: "westeurope".to_string(),
        provisioning_state: "Succeeded".to_string(),
    };

    let utilization = client.fetch_cpu_utilization(&vm, 7).unwrap();
    assert_eq!(utilization.sample_count, 2);
    assert!((utilization.avg_cpu_percent - 20.0).abs() < f64::EPSILON);
    assert!((utilization.max_cpu_percent - 80.0).abs() < f64::EPSILON);
}

#[test]
fn cpu_metrics_empty_window_has_no_samples() {
    let vm_id = format!(
        "/subscriptions/{SUB}/resourceGroups/lab-rg-1/providers/Microsoft.Compute/virtualMachines/idle"
    );

    let mock = spawn_mock_api(vec![Route::json(
        "GET",
        format!("{vm_id}/providers/Microsoft.Insights/metrics"),
        200,
        json!({ "value": [] }),
    )]);

    let client = ArmClient::new(&mock.base_url, SUB, "test-token");
    let vm = VirtualMachine {
        id: vm_id,
        name: "idle".to_string(),
        size: "Standard_B2s".to_string(),
        location: "westeurope".to_string(),
        provisioning_state: "Succeeded".to_string(),
    };

    let utilization = client.fetch_cpu_utilization(&vm, 7).unwrap();
    assert!(!utilization.has_data());
}
