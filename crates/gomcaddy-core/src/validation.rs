//! # Validation Module
//!
//! Input validation utilities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form checks (required markers, immediate feedback)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - checked before anything touches the network    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend - authoritative re-validation                        │
//! │                                                                         │
//! │  Bad input is rejected at layer 2; it is never sent.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::DeliveryAddress;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of delivery notes.
pub const MAX_NOTES_LEN: usize = 500;

// =============================================================================
// Address Validation
// =============================================================================

/// Validates a delivery address.
///
/// ## Rules
/// Every field (street, city, state, phone) must be non-blank. No format
/// checks beyond that; address formats vary too much to second-guess.
pub fn validate_address(address: &DeliveryAddress) -> ValidationResult<()> {
    validate_required("street", &address.street)?;
    validate_required("city", &address.city)?;
    validate_required("state", &address.state)?;
    validate_required("phone", &address.phone)?;
    Ok(())
}

fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in kobo. Zero is allowed (promotional items).
pub fn validate_price_kobo(kobo: i64) -> ValidationResult<()> {
    if kobo < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Notes
// =============================================================================

/// Validates optional delivery notes.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<()> {
    if let Some(notes) = notes {
        if notes.trim().len() > MAX_NOTES_LEN {
            return Err(ValidationError::TooLong {
                field: "notes".to_string(),
                max: MAX_NOTES_LEN,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
