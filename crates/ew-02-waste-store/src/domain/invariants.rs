//! # Domain Invariants

use rust_decimal::Decimal;
use shared_types::{check_text, FieldViolation, Timestamp, SECONDS_PER_DAY};

use super::value_objects::{LogWasteRequest, WasteStoreConfig};

/// Invariant: quantity is a non-negative decimal.
pub fn invariant_non_negative_quantity(quantity: Decimal) -> Result<(), FieldViolation> {
    if quantity < Decimal::ZERO {
        return Err(FieldViolation::new(
            "quantity",
            format!("{quantity} is negative"),
        ));
    }
    Ok(())
}

/// Deadline `days` after `now`. Strictly later than `now` for `days > 0`.
pub fn deadline_from(now: Timestamp, days: u64) -> Result<Timestamp, FieldViolation> {
    days.checked_mul(SECONDS_PER_DAY)
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| FieldViolation::new("deadline_days", "deadline overflows the clock"))
}

/// Validate every field of a `log_waste` request.
pub fn validate_request(
    request: &LogWasteRequest,
    config: &WasteStoreConfig,
) -> Result<(), FieldViolation> {
    let max = config.max_text_len;
    check_text("waste_type", &request.waste_type, max, true)?;
    check_text("origin", &request.origin, max, true)?;
    check_text("description", &request.description, max, false)?;
    check_text("evidence_ref", &request.evidence_ref, max, false)?;
    invariant_non_negative_quantity(request.quantity)?;

    if request.deadline_days == 0 {
        return Err(FieldViolation::new("deadline_days", "must be positive"));
    }
    if request.deadline_days > config.max_deadline_days {
        return Err(FieldViolation::new(
            "deadline_days",
            format!(
                "{} exceeds the maximum of {}",
                request.deadline_days, config.max_deadline_days
            ),
        ));
    }
    Ok(())
}
