// Property-based tests for grid geometry and list reordering
// Exercises the pixel/slot mapping and move semantics with random inputs

use chrono::NaiveDate;
use proptest::prelude::*;
use timezone_grid::models::scheduler::{MinuteBucket, WorkHours};
use timezone_grid::services::app_state::AppState;
use timezone_grid::services::grid::{
    cell_for_position, orientation_for, pixels_for_slot, GridPoint, Orientation,
};
use timezone_grid::services::persistence::{MemoryStore, PersistenceAdapter};

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn point_at(orientation: Orientation, origin: GridPoint, along: f32, across: f32) -> GridPoint {
    match orientation {
        Orientation::Horizontal => GridPoint::new(origin.x + along, origin.y + across),
        Orientation::Vertical => GridPoint::new(origin.x + across, origin.y + along),
    }
}

proptest! {
    /// Property: the leading edge of a slot snaps back to that same slot
    #[test]
    fn prop_slot_pixels_snap_back_to_slot(
        orientation in orientation_strategy(),
        hour in 0..24u32,
        bucket in 0..4usize,
        cell_size in 8.0f32..120.0,
        origin_x in 0.0f32..500.0,
        origin_y in 0.0f32..500.0,
    ) {
        let bucket = MinuteBucket::from_index(bucket);
        let origin = GridPoint::new(origin_x, origin_y);
        let along = pixels_for_slot(orientation, hour, bucket, cell_size);
        let pointer = point_at(orientation, origin, along, 10.0);

        let hit = cell_for_position(orientation, origin, pointer, cell_size);
        prop_assert_eq!(hit.hour_index, hour);
        prop_assert_eq!(hit.minute_bucket, bucket);
    }

    /// Property: any position snaps into the day, whatever the pointer does
    #[test]
    fn prop_snapping_stays_within_day(
        orientation in orientation_strategy(),
        along in -5000.0f32..5000.0,
        cell_size in 1.0f32..200.0,
    ) {
        let origin = GridPoint::new(0.0, 0.0);
        let pointer = point_at(orientation, origin, along, 0.0);
        let hit = cell_for_position(orientation, origin, pointer, cell_size);

        prop_assert!(hit.hour_index < 24);
        if along < 0.0 {
            prop_assert_eq!((hit.hour_index, hit.minute_bucket), (0, MinuteBucket::Zero));
        }
        if along >= 24.0 * cell_size {
            prop_assert_eq!((hit.hour_index, hit.minute_bucket), (23, MinuteBucket::FortyFive));
        }
    }

    /// Property: vertical only for a narrow, portrait viewport
    #[test]
    fn prop_orientation_rule(
        width in 100.0f32..2000.0,
        height in 100.0f32..2000.0,
        breakpoint in 300.0f32..1200.0,
    ) {
        let expected = if width < breakpoint && height > width {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        prop_assert_eq!(orientation_for(width, height, breakpoint), expected);
    }

    /// Property: moving an entry keeps the same set of entries and lands the
    /// moved one at the target index
    #[test]
    fn prop_move_preserves_membership(
        len in 1..8usize,
        from_seed in 0..64usize,
        to_seed in 0..64usize,
    ) {
        let (from, to) = (from_seed % len, to_seed % len);
        let state = AppState::load(
            PersistenceAdapter::new(Box::new(MemoryStore::new()), None),
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            WorkHours::new(9, 17).unwrap(),
        );
        for i in 0..len {
            state.add_timezone(&format!("Zone {}", i), "UTC").unwrap();
        }

        let before = state.snapshot().timezones.clone();
        state.move_timezone(from, to).unwrap();
        let after = state.snapshot().timezones.clone();

        prop_assert_eq!(after.len(), before.len());
        prop_assert_eq!(&after[to], &before[from]);

        let mut before_ids: Vec<_> = before.iter().map(|tz| tz.id.clone()).collect();
        let mut after_ids: Vec<_> = after.iter().map(|tz| tz.id.clone()).collect();
        before_ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        after_ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        prop_assert_eq!(before_ids, after_ids);
    }
}
