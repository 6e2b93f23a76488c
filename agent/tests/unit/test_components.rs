//! Component operation tests

use std::sync::atomic::Ordering;

use cli_agent::cli::CliError;
use cli_models::{
    GetComponentDetailsRequest, LifecycleState, ListComponentsRequest, RestartComponentRequest,
    StopComponentRequest,
};

use crate::mocks::{caller, default_components, fixture};

fn named(name: &str) -> Option<String> {
    Some(name.to_string())
}

#[test]
fn test_unauthorized_caller_rejected_before_validation() {
    let f = fixture(default_components());

    // Payload is invalid too, authorization still wins
    let result = f
        .agent
        .get_component_details("TestService", GetComponentDetailsRequest { component_name: None });
    assert!(matches!(result, Err(CliError::Unauthorized(_))));

    let result = f.agent.list_components("", ListComponentsRequest::default());
    assert!(matches!(result, Err(CliError::Unauthorized(_))));

    let result = f
        .agent
        .restart_component("svc", RestartComponentRequest { component_name: named("A") });
    assert!(matches!(result, Err(CliError::Unauthorized(_))));

    let result = f
        .agent
        .stop_component("svc", StopComponentRequest { component_name: named("A") });
    assert!(matches!(result, Err(CliError::Unauthorized(_))));

    assert_eq!(f.registry.lookups(), 0);
}

#[test]
fn test_empty_name_rejected_before_lookup() {
    let f = fixture(default_components());

    for name in [None, named(""), named("  ")] {
        let result = f.agent.get_component_details(
            &caller(),
            GetComponentDetailsRequest { component_name: name.clone() },
        );
        assert!(matches!(result, Err(CliError::InvalidArguments(_))));

        let result = f
            .agent
            .restart_component(&caller(), RestartComponentRequest { component_name: name.clone() });
        assert!(matches!(result, Err(CliError::InvalidArguments(_))));

        let result = f
            .agent
            .stop_component(&caller(), StopComponentRequest { component_name: name });
        assert!(matches!(result, Err(CliError::InvalidArguments(_))));
    }

    assert_eq!(f.registry.lookups(), 0);
}

#[test]
fn test_unknown_component_not_found() {
    let f = fixture(default_components());

    let result = f
        .agent
        .get_component_details(&caller(), GetComponentDetailsRequest { component_name: named("X") });
    assert_eq!(
        result.unwrap_err(),
        CliError::ResourceNotFound("Component X not found".to_string())
    );

    let result = f
        .agent
        .restart_component(&caller(), RestartComponentRequest { component_name: named("X") });
    assert!(matches!(result, Err(CliError::ResourceNotFound(_))));

    let result = f
        .agent
        .stop_component(&caller(), StopComponentRequest { component_name: named("X") });
    assert!(matches!(result, Err(CliError::ResourceNotFound(_))));
}

#[test]
fn test_get_component_details() {
    let f = fixture(default_components());

    let response = f
        .agent
        .get_component_details(&caller(), GetComponentDetailsRequest { component_name: named("A") })
        .unwrap();
    let details = response.component_details;
    assert_eq!(details.component_name, "A");
    assert_eq!(details.version, "1.0.0");
    assert_eq!(details.state, LifecycleState::Running);
    assert_eq!(details.configuration["param1"], "value1");
}

#[test]
fn test_list_components_excludes_main_in_order() {
    let f = fixture(default_components());

    let response = f
        .agent
        .list_components(&caller(), ListComponentsRequest::default())
        .unwrap();
    let names: Vec<_> = response
        .components
        .iter()
        .map(|c| c.component_name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(response.components[1].version, "2.1.0");
}

#[test]
fn test_list_components_only_main() {
    let f = fixture(vec![crate::mocks::MockComponent::new("main", "0.1.0", serde_json::json!({}))]);
    let response = f
        .agent
        .list_components(&caller(), ListComponentsRequest::default())
        .unwrap();
    assert!(response.components.is_empty());
}

#[test]
fn test_restart_and_stop_signal_component() {
    let components = default_components();
    let a = components[0].clone();
    let f = fixture(components);

    f.agent
        .restart_component(&caller(), RestartComponentRequest { component_name: named("A") })
        .unwrap();
    assert_eq!(a.restarts.load(Ordering::SeqCst), 1);
    assert_eq!(a.stops.load(Ordering::SeqCst), 0);

    f.agent
        .stop_component(&caller(), StopComponentRequest { component_name: named("A") })
        .unwrap();
    assert_eq!(a.stops.load(Ordering::SeqCst), 1);
}
