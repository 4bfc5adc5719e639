//! Time-grid layout engine for the weekly schedule view.
//!
//! Converts weekly entries into (column, row) cell placements on a
//! fixed-resolution grid: Monday through Saturday columns, 30-minute rows
//! between 07:00 and 22:00. The computation is pure and stateless; callers
//! re-run it in full whenever the entry list changes, and a rendering
//! layer (out of scope here) turns placements into cells.
//!
//! Entries that fall outside the window are clipped: dropped entirely,
//! never truncated to fit. Sunday entries are storable but never shown.

use crate::models::schedule_entry::ScheduleEntry;
use crate::utils::date::time_to_minutes;

/// First hour shown in the grid.
pub const WINDOW_START_HOUR: i64 = 7;
/// Hour the grid ends at.
pub const WINDOW_END_HOUR: i64 = 22;
/// Height of one grid row, in minutes.
pub const SLOT_MINUTES: i64 = 30;
/// Monday through Saturday.
pub const VISIBLE_DAYS: usize = 6;

pub const WINDOW_START_MINUTES: i64 = WINDOW_START_HOUR * 60;
pub const WINDOW_END_MINUTES: i64 = WINDOW_END_HOUR * 60;

/// Number of rows in the grid (30 for the 07:00-22:00 window).
pub const fn total_rows() -> i64 {
    (WINDOW_END_MINUTES - WINDOW_START_MINUTES) / SLOT_MINUTES
}

/// Where one entry lands on the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub entry_id: i64,
    /// 0 = Monday .. 5 = Saturday
    pub column: usize,
    /// First occupied row, 0 = the 07:00 slot
    pub row_start: usize,
    /// Number of rows covered, >= 1
    pub row_span: usize,
}

/// Lay out a week of entries.
///
/// Entries are placed independently; two entries occupying the same cells
/// receive identical placements (no overlap stacking, last-drawn wins at
/// the rendering layer). Entries without a database id cannot be
/// correlated by the renderer and are skipped.
pub fn layout_week(entries: &[ScheduleEntry]) -> Vec<Placement> {
    entries.iter().filter_map(place_entry).collect()
}

/// Place a single entry, or `None` when it is not visible.
pub fn place_entry(entry: &ScheduleEntry) -> Option<Placement> {
    // Sunday (0) and out-of-range days have no visible column.
    if !(1..=6).contains(&entry.day_of_week) {
        return None;
    }
    let column = (entry.day_of_week - 1) as usize;

    // Malformed times fall back to 0 minutes here rather than erroring;
    // strict validation happens at entry creation.
    let start = time_to_minutes(&entry.start_time);
    let end = time_to_minutes(&entry.end_time);

    // Zero-length and inverted ranges are reachable only through the
    // lenient fallback.
    if end <= start {
        return None;
    }
    // Clipping: an entry leaving the window on either side is dropped
    // entirely, never truncated to the visible part.
    if start < WINDOW_START_MINUTES || end > WINDOW_END_MINUTES {
        return None;
    }

    let row_start = (start - WINDOW_START_MINUTES) / SLOT_MINUTES;
    let row_end = (end - WINDOW_START_MINUTES) / SLOT_MINUTES;

    // A sub-slot entry still occupies one visible row.
    let row_span = (row_end - row_start).max(1);

    entry.id.map(|entry_id| Placement {
        entry_id,
        column,
        row_start: row_start as usize,
        row_span: row_span as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn entry(id: i64, day: u8, start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: Some(id),
            user_id: "user-1".to_string(),
            subject_id: None,
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: None,
            instructor: None,
            created_at: None,
        }
    }

    #[test]
    fn test_window_constants() {
        assert_eq!(WINDOW_START_MINUTES, 420);
        assert_eq!(WINDOW_END_MINUTES, 1320);
        assert_eq!(total_rows(), 30);
    }

    #[test_case(1, "08:00:00", "10:00:00", 0, 2, 4 ; "monday morning block")]
    #[test_case(1, "07:00:00", "07:30:00", 0, 0, 1 ; "first slot of the day")]
    #[test_case(3, "12:15:00", "13:45:00", 2, 10, 3 ; "unaligned start floors down")]
    #[test_case(6, "21:00:00", "22:00:00", 5, 28, 2 ; "saturday evening block")]
    fn test_places_visible_entry(
        day: u8,
        start: &str,
        end: &str,
        column: usize,
        row_start: usize,
        row_span: usize,
    ) {
        let placement = place_entry(&entry(1, day, start, end)).expect("entry should be placed");
        assert_eq!(placement.column, column);
        assert_eq!(placement.row_start, row_start);
        assert_eq!(placement.row_span, row_span);
    }

    #[test]
    fn test_sunday_is_filtered() {
        assert!(place_entry(&entry(1, 0, "08:00:00", "09:00:00")).is_none());
        assert!(layout_week(&[entry(1, 0, "08:00:00", "09:00:00")]).is_empty());
    }

    #[test_case(7 ; "day seven")]
    #[test_case(9 ; "day nine")]
    fn test_out_of_range_day_is_filtered(day: u8) {
        assert!(place_entry(&entry(1, day, "08:00:00", "09:00:00")).is_none());
    }

    #[test]
    fn test_entry_starting_before_window_is_clipped() {
        // Clipped entirely, not truncated to the visible part.
        assert!(place_entry(&entry(1, 1, "06:00:00", "08:00:00")).is_none());
    }

    #[test]
    fn test_entry_ending_after_window_is_clipped() {
        assert!(place_entry(&entry(1, 1, "21:30:00", "22:30:00")).is_none());
    }

    #[test]
    fn test_entry_spilling_past_window_end_by_a_sub_slot_is_clipped() {
        assert!(place_entry(&entry(1, 1, "21:10:00", "22:10:00")).is_none());
    }

    #[test]
    fn test_entry_spanning_exact_window() {
        let placement = place_entry(&entry(1, 1, "07:00:00", "22:00:00")).unwrap();
        assert_eq!(placement.row_start, 0);
        assert_eq!(placement.row_start + placement.row_span, total_rows() as usize);
    }

    #[test]
    fn test_entry_ending_exactly_at_window_end() {
        let placement = place_entry(&entry(1, 2, "20:00:00", "22:00:00")).unwrap();
        assert_eq!(placement.row_start, 26);
        assert_eq!(placement.row_span, 4);
    }

    #[test]
    fn test_malformed_times_fall_back_and_clip() {
        // The zero-minute fallback lands the times before the window,
        // so the entry silently disappears instead of erroring.
        assert!(place_entry(&entry(1, 1, "late", "later")).is_none());
        assert!(place_entry(&entry(1, 1, "", "10:00:00")).is_none());
    }

    #[test]
    fn test_inverted_range_is_dropped() {
        // End unparsable -> 0 minutes -> end before start.
        assert!(place_entry(&entry(1, 1, "08:00:00", "oops")).is_none());
    }

    #[test]
    fn test_sub_slot_entry_occupies_one_row() {
        let placement = place_entry(&entry(1, 1, "08:00:00", "08:15:00")).unwrap();
        assert_eq!(placement.row_span, 1);
    }

    #[test]
    fn test_entry_starting_at_window_end_is_not_visible() {
        assert!(place_entry(&entry(1, 1, "22:00:00", "22:20:00")).is_none());
    }

    #[test]
    fn test_unsaved_entry_is_skipped() {
        let mut unsaved = entry(1, 1, "08:00:00", "10:00:00");
        unsaved.id = None;
        assert!(place_entry(&unsaved).is_none());
    }

    /// Known limitation: conflicting entries are not stacked or offset.
    /// Both get the same cells and the renderer draws one over the other.
    #[test]
    fn test_identical_entries_share_placement_known_limitation() {
        let a = entry(1, 2, "09:00:00", "11:00:00");
        let b = entry(2, 2, "09:00:00", "11:00:00");

        let placements = layout_week(&[a, b]);
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].column, placements[1].column);
        assert_eq!(placements[0].row_start, placements[1].row_start);
        assert_eq!(placements[0].row_span, placements[1].row_span);
    }

    #[test]
    fn test_layout_week_preserves_input_order() {
        let placements = layout_week(&[
            entry(10, 1, "08:00:00", "09:00:00"),
            entry(11, 0, "08:00:00", "09:00:00"),
            entry(12, 4, "10:00:00", "12:00:00"),
        ]);

        let ids: Vec<i64> = placements.iter().map(|p| p.entry_id).collect();
        assert_eq!(ids, vec![10, 12]);
    }
}
