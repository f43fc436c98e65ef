use cairn::{ArrayError, ArrayHandle, DimKind, Dimension};
use cairn_test_utils::{CountingRuntime, TableSource};

fn heat_table(rows: usize) -> TableSource {
    let mut table = TableSource::new(vec![
        Dimension::new(0u32, "Heat", DimKind::Floating, 4),
        Dimension::new(1u32, "Count", DimKind::Unsigned, 2),
    ]);
    for i in 0..rows {
        let mut row = Vec::new();
        row.extend_from_slice(&(i as f32).to_ne_bytes());
        row.extend_from_slice(&(i as u16).to_ne_bytes());
        table.push_row(&row);
    }
    table
}

#[test]
fn owning_construction_materializes_once() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let handle = ArrayHandle::snapshot(runtime, &heat_table(4)).unwrap();

    assert!(handle.is_owner());
    assert_eq!(handle.schema().unwrap().row_stride(), 6);
    assert_eq!(handle.packed().unwrap().len(), 24);
    assert_eq!(handle.array().aliased_len(), 24);

    let stats = probe.stats();
    assert_eq!(stats.materialized, 1);
    assert_eq!(stats.live, 1);
    assert_eq!(stats.released, 0);
}

#[test]
fn rebuild_releases_old_state_exactly_once() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let mut handle = ArrayHandle::snapshot(runtime, &heat_table(2)).unwrap();

    for round in 1..=3 {
        handle.update(&heat_table(2 + round)).unwrap();
        let stats = probe.stats();
        assert_eq!(stats.materialized, 1 + round);
        assert_eq!(stats.released, round);
        assert_eq!(stats.live, 1);
    }

    drop(handle);
    let stats = probe.stats();
    assert_eq!(stats.released, 4);
    assert_eq!(stats.live, 0);
}

#[test]
fn update_reflects_new_source_contents() {
    let runtime = CountingRuntime::new();
    let mut handle = ArrayHandle::snapshot(runtime, &heat_table(1)).unwrap();
    assert_eq!(handle.packed().unwrap().len(), 6);

    handle.update(&heat_table(5)).unwrap();
    assert_eq!(handle.packed().unwrap().len(), 30);
    let first = f32::from_ne_bytes(handle.packed().unwrap()[0..4].try_into().unwrap());
    assert_eq!(first, 0.0);
}

#[test]
fn borrowed_handles_hold_no_buffer() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let external = probe.external_array();

    let handle = ArrayHandle::borrow(runtime, external).unwrap();
    assert!(!handle.is_owner());
    assert!(handle.packed().is_none());
    assert!(handle.schema().is_none());
    assert_eq!(probe.stats().live, 1);

    drop(handle);
    assert_eq!(probe.stats().live, 0);
}

#[test]
fn borrowing_a_non_array_acquires_nothing() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let candidate = probe.non_array();

    let err = ArrayHandle::borrow(runtime, candidate).unwrap_err();
    assert_eq!(err, ArrayError::NotAnArray);

    let stats = probe.stats();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.materialized, 0);
}

#[test]
fn update_on_borrowed_handle_is_rejected() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let mut handle = ArrayHandle::borrow(runtime, probe.external_array()).unwrap();

    let err = handle.update(&heat_table(2)).unwrap_err();
    assert_eq!(err, ArrayError::UpdateBorrowed);

    let stats = probe.stats();
    assert_eq!(stats.materialized, 0);
    assert_eq!(stats.live, 1);
}

#[test]
fn failed_materialize_leaves_nothing_live() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    probe.fail_next_materialize();

    let err = ArrayHandle::snapshot(runtime, &heat_table(2)).unwrap_err();
    assert!(matches!(err, ArrayError::Materialize { .. }));
    assert_eq!(probe.stats().live, 0);
}

#[test]
fn failed_update_preserves_previous_state() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let mut handle = ArrayHandle::snapshot(runtime, &heat_table(2)).unwrap();
    let before = handle.packed().unwrap().to_vec();

    probe.fail_next_materialize();
    assert!(handle.update(&heat_table(5)).is_err());

    assert_eq!(handle.packed().unwrap(), &before[..]);
    assert_eq!(probe.stats().live, 1);
}

#[test]
fn untyped_dimension_fails_before_any_allocation() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let table = TableSource::new(vec![Dimension::new(0u32, "Raw", DimKind::Untyped, 2)]);

    let err = ArrayHandle::snapshot(runtime, &table).unwrap_err();
    assert!(matches!(err, ArrayError::Schema(_)));

    let stats = probe.stats();
    assert_eq!(stats.materialized, 0);
    assert_eq!(stats.live, 0);
}

#[test]
fn share_mints_an_additional_reference() {
    let runtime = CountingRuntime::new();
    let probe = runtime.clone();
    let handle = ArrayHandle::snapshot(runtime, &heat_table(1)).unwrap();

    let extra = handle.share();
    assert_eq!(probe.stats().live, 2);
    drop(extra);
    assert_eq!(probe.stats().live, 1);

    drop(handle);
    assert_eq!(probe.stats().live, 0);
    assert_eq!(probe.stats().released, 2);
}
