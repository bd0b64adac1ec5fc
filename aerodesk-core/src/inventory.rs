use crate::flight::FlightDraft;
use crate::{CoreError, CoreResult};

/// Checks `0 <= available <= total` for a set of seat counts.
pub fn check_seat_counts(available: i32, total: i32) -> CoreResult<()> {
    if total < 0 {
        return Err(CoreError::InvariantViolation(format!(
            "Total seats must not be negative: {total}"
        )));
    }
    if available < 0 {
        return Err(CoreError::InvariantViolation(format!(
            "Available seats must not be negative: {available}"
        )));
    }
    if available > total {
        return Err(CoreError::InvariantViolation(format!(
            "Available seats {available} exceed total seats {total}"
        )));
    }
    Ok(())
}

pub fn check_draft(draft: &FlightDraft) -> CoreResult<()> {
    check_seat_counts(draft.available_seats, draft.total_seats)
}

/// Applies a signed seat delta, rejecting any result outside `[0, total]`.
/// Negative results are never clamped.
pub fn apply_seat_delta(available: i32, total: i32, delta: i32) -> CoreResult<i32> {
    let next = available.checked_add(delta).ok_or_else(|| {
        CoreError::InvariantViolation(format!("Seat adjustment {delta} overflows"))
    })?;

    if next < 0 {
        return Err(CoreError::InvariantViolation(format!(
            "Insufficient seats: requested {}, available {available}",
            delta.unsigned_abs()
        )));
    }
    if next > total {
        return Err(CoreError::InvariantViolation(format!(
            "Releasing {delta} seats would exceed total seats {total}"
        )));
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_counts() {
        assert!(check_seat_counts(0, 0).is_ok());
        assert!(check_seat_counts(120, 120).is_ok());
        assert!(check_seat_counts(121, 120).is_err());
        assert!(check_seat_counts(-1, 120).is_err());
        assert!(check_seat_counts(0, -5).is_err());
    }

    #[test]
    fn test_seat_delta_lifecycle() {
        // Reserve
        let available = apply_seat_delta(100, 100, -10).unwrap();
        assert_eq!(available, 90);

        // Release
        let available = apply_seat_delta(available, 100, 4).unwrap();
        assert_eq!(available, 94);
    }

    #[test]
    fn test_seat_delta_rejects_instead_of_clamping() {
        let err = apply_seat_delta(3, 100, -4).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));

        let err = apply_seat_delta(99, 100, 2).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));

        assert!(apply_seat_delta(i32::MAX, i32::MAX, 1).is_err());
    }

    #[test]
    fn test_seat_delta_at_i32_min() {
        let err = apply_seat_delta(0, 10, i32::MIN).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
        assert!(err.to_string().contains("requested 2147483648"));

        assert!(apply_seat_delta(10, 10, i32::MIN).is_err());
    }
}
