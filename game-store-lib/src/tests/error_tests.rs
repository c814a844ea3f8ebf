use super::*;
use game_store_core::{CategoryParseError, CoreError, EntityKind};

#[test]
fn referential_integrity_message_names_the_kind() {
    let err = ShopError::from(StoreError::ReferentialIntegrity {
        kind: EntityKind::Developer,
    });
    assert!(err.is_recoverable());
    assert_eq!(
        err.user_message(),
        "Cannot delete this developer because it is linked to another table. \
         Remove that link before deleting the developer."
    );
}

#[test]
fn store_not_found_keeps_kind_and_id() {
    let err = ShopError::from(StoreError::not_found(EntityKind::Ticket, 4));
    assert!(matches!(
        err,
        ShopError::NotFound {
            kind: EntityKind::Ticket,
            id: 4
        }
    ));
    assert_eq!(err.user_message(), "There is no ticket with id 4.");
}

#[test]
fn other_store_errors_are_storage_failures() {
    let err = ShopError::from(StoreError::Empty(EntityKind::Ticket));
    assert!(matches!(err, ShopError::Storage(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn exhausted_sequence_is_blocking() {
    let err = ShopError::from(CoreError::ExhaustedSequence);
    assert!(matches!(err, ShopError::ExhaustedSequence));
    assert!(!err.is_recoverable());
}

#[test]
fn core_parse_errors_become_validation() {
    let err = ShopError::from(CoreError::invalid_ticket_code("a1"));
    assert!(matches!(err, ShopError::Validation(_)));

    let err = ShopError::from(CoreError::UnknownCategory(CategoryParseError {
        category: "genre",
        value: "opera".to_string(),
    }));
    assert!(err.user_message().contains("opera"));
}

#[test]
fn cart_and_roster_errors_are_recoverable() {
    let err = ShopError::from(CartError::NoLines);
    assert!(err.is_recoverable());
    assert_eq!(err.user_message(), "Add at least one game before saving the ticket");

    let err = ShopError::from(RosterError::Duplicate {
        name: "Ana".to_string(),
    });
    assert_eq!(err.user_message(), "Ana is already in the list");
}
