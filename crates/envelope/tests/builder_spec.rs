use result_envelope::*;
use uuid::Uuid;

#[test]
fn given_no_fields_when_building_then_defaults_to_ok_status() {
    let envelope = ResultEnvelope::<()>::builder().build();

    assert_eq!(envelope.code(), 200);
    assert!(envelope.content().is_none());
    assert!(!envelope.id().is_nil());
}

#[test]
fn given_every_field_when_building_then_all_are_set() {
    let id = Uuid::from_u128(99);
    let envelope = ResultEnvelope::builder()
        .id(id)
        .code(http::StatusCode::PARTIAL_CONTENT)
        .content(vec!["a", "b"])
        .message("truncated")
        .stack_trace("handler::list")
        .total(10)
        .add_model_error("page", "Out of range")
        .build();

    assert_eq!(envelope.id(), id);
    assert_eq!(envelope.code(), 206);
    assert_eq!(envelope.content(), Some(&vec!["a", "b"]));
    assert_eq!(envelope.message(), Some("truncated"));
    assert_eq!(envelope.stack_trace(), Some("handler::list"));
    assert_eq!(envelope.total(), Some(10));
    assert_eq!(envelope.model_state_errors().len(), 1);
}

#[test]
fn given_id_source_when_building_then_id_drawn_from_source() {
    let ids = SequentialIds::starting_at(500);
    let envelope = ResultEnvelope::<String>::builder()
        .id_source(move || ids.next_id())
        .content("x".to_string())
        .build();

    assert_eq!(envelope.id(), Uuid::from_u128(500));
}

#[test]
fn given_model_state_when_building_then_only_invalid_fields_are_kept() {
    let mut state = ModelState::new();
    state.add_error("email", "Invalid format").mark_valid("name");

    let envelope = ResultEnvelope::<()>::builder()
        .code(400)
        .model_state(&state)
        .build();

    assert_eq!(
        envelope.model_state_errors(),
        &[ModelError::new("email", Some("Invalid format"))]
    );
    assert_eq!(envelope.outcome(), Outcome::ValidationFailure);
}
