use baton_engine::{mock, op, EngineError, FnOp, OpError, Orchestrator, Step, StepEntry, StepRegistry};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test Operations ---

async fn create_order(_args: Vec<Value>) -> Result<Value, OpError> {
    Ok(json!(7))
}

async fn update_order(args: Vec<Value>) -> Result<Value, OpError> {
    Ok(json!({ "id": args[0].clone(), "title": args[1].clone() }))
}

fn carry_previous(prev: Option<&Value>) -> Vec<Value> {
    vec![prev.cloned().unwrap_or(Value::Null)]
}

// --- Tests ---

#[tokio::test]
async fn test_registry_pipeline_full_run() {
    let registry = StepRegistry::new()
        .with_entry(
            "CREATE_ORDER",
            StepEntry::new(op!(create_order)).with_args(vec![json!("My Essay"), json!(10)]),
        )
        .with_entry(
            "UPDATE_ORDER",
            StepEntry::new(op!(update_order))
                .with_resolver(|prev| vec![prev.cloned().unwrap_or(Value::Null), json!("X")]),
        );

    let mut runner = Orchestrator::with_registry(registry);

    // 1. Create
    let created = runner.run_step("CREATE_ORDER").await.unwrap();
    assert_eq!(created, json!(7));
    assert_eq!(runner.last_result(), Some(&json!(7)));
    assert_eq!(runner.last_operation_name(), Some("create_order"));

    // 2. Update - the resolver feeds the created id forward
    let updated = runner.run_step("UPDATE_ORDER").await.unwrap();
    assert_eq!(updated, json!({ "id": 7, "title": "X" }));
    assert_eq!(runner.last_operation_name(), Some("update_order"));

    // 3. History is keyed by operation name, not by registry key
    let names: Vec<&String> = runner.history().keys().collect();
    assert_eq!(names, ["create_order", "update_order"]);
    assert_eq!(runner.history()["create_order"], vec![json!(7)]);
    assert_eq!(
        runner.history()["update_order"],
        vec![json!({ "id": 7, "title": "X" })]
    );
    assert!(runner.history().get("CREATE_ORDER").is_none());
}

#[tokio::test]
async fn test_key_lookup_without_a_registry_fails() {
    let mut runner = Orchestrator::new();

    let err = runner.run_step("CREATE_ORDER").await.unwrap_err();

    assert!(matches!(err, EngineError::StepNotFound(key) if key == "CREATE_ORDER"));
    assert!(runner.history().is_empty());
    assert_eq!(runner.last_operation_name(), None);
    assert_eq!(runner.last_result(), None);
}

#[tokio::test]
async fn test_resolver_sees_nothing_before_the_first_result() {
    let (probe, log) = mock::recording("probe", json!("ok"));
    let mut runner = Orchestrator::new();

    runner
        .run_step(Step::op(probe).with_resolver(|prev| vec![json!(prev.is_some())]))
        .await
        .unwrap();

    assert_eq!(log.calls(), vec![vec![json!(false)]]);
}

#[tokio::test]
async fn test_resolver_receives_the_previous_result() {
    let (probe, log) = mock::recording("probe", json!("done"));
    let mut runner = Orchestrator::new();

    runner
        .run_step(Step::op(mock::constant("seed", json!(5))))
        .await
        .unwrap();
    runner
        .run_step(Step::op(probe).with_resolver(carry_previous))
        .await
        .unwrap();

    assert_eq!(log.calls(), vec![vec![json!(5)]]);
}

#[tokio::test]
async fn test_fixed_arguments_are_passed_verbatim() {
    let (probe, log) = mock::recording("probe", json!(null));
    let mut runner = Orchestrator::new();

    runner
        .run_step(Step::op(probe).with_args(vec![json!(10), json!("Essay")]))
        .await
        .unwrap();

    assert_eq!(log.calls(), vec![vec![json!(10), json!("Essay")]]);
}

#[tokio::test]
async fn test_step_without_an_argument_source_gets_no_arguments() {
    let (probe, log) = mock::recording("probe", json!(null));
    let mut runner = Orchestrator::new();

    runner.run_step(Step::op(probe)).await.unwrap();

    assert_eq!(log.calls(), vec![Vec::<Value>::new()]);
}

#[tokio::test]
async fn test_step_level_override_replaces_the_registry_default() {
    let (probe, log) = mock::recording("update_order", json!(true));
    let registry = StepRegistry::new().with_entry(
        "UPDATE_ORDER",
        StepEntry::new(probe).with_args(vec![json!(1), json!("registry default")]),
    );

    let mut runner = Orchestrator::with_registry(registry);
    runner
        .run_step(Step::key("UPDATE_ORDER").with_args(vec![json!(9), json!("override")]))
        .await
        .unwrap();

    assert_eq!(log.calls(), vec![vec![json!(9), json!("override")]]);
}

#[tokio::test]
async fn test_history_accumulates_across_repeated_runs() {
    let counter = Arc::new(AtomicU64::new(0));
    let tick = FnOp::sync("tick", move |_args| {
        Ok::<_, OpError>(json!(counter.fetch_add(1, Ordering::SeqCst) + 1))
    });

    let mut runner = Orchestrator::new();
    for _ in 0..3 {
        runner.run_step(Step::op(tick.clone())).await.unwrap();
    }

    assert_eq!(runner.history().len(), 1);
    assert_eq!(runner.history()["tick"], vec![json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn test_sequence_stops_at_the_first_failure() {
    let (tail, tail_log) = mock::recording("step_c", json!("unreachable"));
    let registry = StepRegistry::new()
        .with("STEP_A", mock::constant("step_a", json!("a")))
        .with("STEP_B", mock::failing("step_b", "boom"))
        .with("STEP_C", tail);

    let mut runner = Orchestrator::with_registry(registry);
    let err = runner
        .run_sequence(["STEP_A", "STEP_B", "STEP_C"])
        .await
        .unwrap_err();

    // 1. The error names the failing operation and carries the original cause
    match &err {
        EngineError::OperationFailed { name, source } => {
            assert_eq!(name, "step_b");
            let original = source
                .downcast_ref::<mock::MockFailure>()
                .expect("MockFailure");
            assert_eq!(original.0, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }

    // 2. Steps after the failure never ran
    assert!(tail_log.is_empty());

    // 3. State still reflects the last success
    assert_eq!(runner.last_operation_name(), Some("step_a"));
    assert_eq!(runner.last_result(), Some(&json!("a")));
    assert_eq!(runner.history().len(), 1);
}

#[tokio::test]
async fn test_sync_and_async_operations_run_uniformly() {
    let double = FnOp::new("double", |args: Vec<Value>| async move {
        let n = args[0].as_u64().unwrap_or(0);
        Ok::<_, OpError>(json!(n * 2))
    });
    let halve = FnOp::sync("halve", |args: Vec<Value>| {
        let n = args[0].as_u64().unwrap_or(0);
        Ok::<_, OpError>(json!(n / 2))
    });

    let mut runner = Orchestrator::new();
    runner
        .run_step(Step::op(double).with_args(vec![json!(21)]))
        .await
        .unwrap();
    runner
        .run_step(Step::op(halve).with_resolver(carry_previous))
        .await
        .unwrap();

    assert_eq!(runner.last_result(), Some(&json!(21)));
    assert_eq!(runner.history()["double"], vec![json!(42)]);
    assert_eq!(runner.history()["halve"], vec![json!(21)]);
}

#[tokio::test]
async fn test_sequence_awaits_each_step_before_the_next() {
    let (probe, log) = mock::recording("after_wait", json!("ok"));
    let mut runner = Orchestrator::new();

    runner
        .run_sequence(vec![
            Step::op(mock::delayed("wait", Duration::from_millis(30), json!(150))),
            Step::op(probe).with_resolver(carry_previous),
        ])
        .await
        .unwrap();

    // The delayed result was already in place when the next resolver ran.
    assert_eq!(log.calls(), vec![vec![json!(150)]]);
}
