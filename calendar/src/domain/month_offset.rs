//! Month arithmetic for the offset-indexed schedule cache.

use shared::FocusMonth;

/// Signed distance in months from `anchor` to `target`.
///
/// The anchor month is offset 0 and offsets index the schedule cache, so the
/// arithmetic must span year boundaries (December anchor, January target is
/// offset 1, not -11).
pub fn offset_between(anchor: FocusMonth, target: FocusMonth) -> i32 {
    let anchor_ordinal = anchor.year * 12 + anchor.month as i32;
    let target_ordinal = target.year * 12 + target.month as i32;
    target_ordinal - anchor_ordinal
}

/// The month sitting `offset` months after the anchor month.
pub fn month_at_offset(anchor: FocusMonth, offset: i32) -> FocusMonth {
    let total = anchor.year * 12 + (anchor.month as i32 - 1) + offset;
    FocusMonth::new(total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// Get the number of days in a given month and year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_between_same_year() {
        let anchor = FocusMonth::new(2024, 3);

        assert_eq!(offset_between(anchor, FocusMonth::new(2024, 3)), 0);
        assert_eq!(offset_between(anchor, FocusMonth::new(2024, 4)), 1);
        assert_eq!(offset_between(anchor, FocusMonth::new(2024, 8)), 5);
    }

    #[test]
    fn test_offset_between_spans_years() {
        // The original month-number subtraction broke here
        assert_eq!(
            offset_between(FocusMonth::new(2024, 12), FocusMonth::new(2025, 1)),
            1
        );
        assert_eq!(
            offset_between(FocusMonth::new(2024, 11), FocusMonth::new(2025, 2)),
            3
        );
        assert_eq!(
            offset_between(FocusMonth::new(2025, 1), FocusMonth::new(2024, 12)),
            -1
        );
    }

    #[test]
    fn test_month_at_offset() {
        let anchor = FocusMonth::new(2024, 3);

        assert_eq!(month_at_offset(anchor, 0), anchor);
        assert_eq!(month_at_offset(anchor, 1), FocusMonth::new(2024, 4));
        assert_eq!(month_at_offset(anchor, 10), FocusMonth::new(2025, 1));
        assert_eq!(month_at_offset(FocusMonth::new(2024, 12), 1), FocusMonth::new(2025, 1));
    }

    #[test]
    fn test_offset_round_trips_through_month_at_offset() {
        let anchor = FocusMonth::new(2024, 11);
        for offset in 0..24 {
            let month = month_at_offset(anchor, offset);
            assert_eq!(offset_between(anchor, month), offset);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31); // January
        assert_eq!(days_in_month(2025, 4), 30); // April
        assert_eq!(days_in_month(2025, 2), 28); // February (non-leap)
        assert_eq!(days_in_month(2024, 2), 29); // February (leap year)
    }

    #[test]
    fn test_is_leap_year() {
        assert!(!is_leap_year(2025)); // Regular year
        assert!(is_leap_year(2024)); // Divisible by 4
        assert!(!is_leap_year(1900)); // Divisible by 100 but not 400
        assert!(is_leap_year(2000)); // Divisible by 400
    }
}
