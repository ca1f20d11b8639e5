//! # Validation Module
//!
//! Input validation for stay requests and identifiers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (date pickers, +/- counters)                    │
//! │  ├── min dates, counter limits                                         │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Both dates present, check-out after check-in                      │
//! │  └── Occupancy within limits                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: BookingStore::create                                         │
//! │  └── Refuses to record a booking that fails layer 2                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{StayRequest, MAX_OCCUPANCY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Stay Request
// =============================================================================

/// Validates a stay request before it is booked.
///
/// ## Rules
/// - `check_in` and `check_out` are both present
/// - `check_out` is strictly after `check_in`
/// - rooms 1..=10, adults 1..=10, children 0..=10
///
/// The destination is free text and may be empty (booking from a listing
/// page without a prior search).
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use stayhub_core::StayRequest;
/// use stayhub_core::validation::validate_stay_request;
///
/// let stay = StayRequest::new(
///     "Goa",
///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
/// );
/// assert!(validate_stay_request(&stay).is_ok());
/// assert!(validate_stay_request(&StayRequest::default()).is_err());
/// ```
pub fn validate_stay_request(stay: &StayRequest) -> ValidationResult<()> {
    let check_in = stay
        .check_in
        .ok_or_else(|| ValidationError::required("checkIn"))?;
    let check_out = stay
        .check_out
        .ok_or_else(|| ValidationError::required("checkOut"))?;

    if check_out <= check_in {
        return Err(ValidationError::InvalidDateRange {
            check_in,
            check_out,
        });
    }

    validate_occupancy("rooms", stay.rooms, 1)?;
    validate_occupancy("adults", stay.adults, 1)?;
    validate_occupancy("children", stay.children, 0)?;

    Ok(())
}

/// Validates one occupancy counter against `min..=MAX_OCCUPANCY`.
pub fn validate_occupancy(field: &str, value: u32, min: u32) -> ValidationResult<()> {
    if value < min || value > MAX_OCCUPANCY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: min as i64,
            max: MAX_OCCUPANCY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a nightly rate before it is booked. Free stays are not bookable.
pub fn validate_nightly_rate(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an identifier supplied by the caller (property or booking id).
///
/// ## Rules
/// - Must not be empty or whitespace
/// - Must be at most 64 characters
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::required(field));
    }

    if id.len() > 64 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be at most 64 characters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stay() -> StayRequest {
        StayRequest::new(
            "Goa",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        )
    }

    #[test]
    fn test_valid_stay() {
        assert!(validate_stay_request(&stay()).is_ok());
    }

    #[test]
    fn test_missing_dates() {
        let mut s = stay();
        s.check_in = None;
        assert_eq!(
            validate_stay_request(&s),
            Err(ValidationError::required("checkIn"))
        );

        let mut s = stay();
        s.check_out = None;
        assert_eq!(
            validate_stay_request(&s),
            Err(ValidationError::required("checkOut"))
        );
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        let mut s = stay();
        s.check_out = s.check_in;
        assert!(matches!(
            validate_stay_request(&s),
            Err(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_occupancy_limits() {
        let mut s = stay();
        s.rooms = 0;
        assert!(validate_stay_request(&s).is_err());

        let mut s = stay();
        s.rooms = 11;
        assert!(validate_stay_request(&s).is_err());

        let mut s = stay();
        s.adults = 0;
        assert!(validate_stay_request(&s).is_err());

        let mut s = stay();
        s.children = 10;
        assert!(validate_stay_request(&s).is_ok());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_nightly_rate() {
        assert!(validate_nightly_rate(Money::from_units(1)).is_ok());
        assert_eq!(
            validate_nightly_rate(Money::zero()),
            Err(ValidationError::MustBePositive {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("bookingId", "BK-1").is_ok());
        assert!(validate_id("bookingId", "   ").is_err());
        assert!(validate_id("bookingId", &"X".repeat(65)).is_err());
    }
}
