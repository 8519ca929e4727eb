//! "What does this slot mean everywhere?" summary for a selected slot.

use chrono::{DateTime, Utc};

use crate::models::error::SchedulerError;
use crate::models::scheduler::{SchedulerState, SelectedSlot};
use crate::services::time::{relative_offset_label, TimeService};
use crate::utils::date::format_day_marker;
use crate::utils::text::escape_html;

use super::cells::GridModel;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTime {
    pub local_time_label: String,
    pub day_label: String,
    pub abbreviation: String,
    pub relative_offset_label: String,
    pub is_work_hour: bool,
    pub differs_from_reference_day: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub timezone_index: usize,
    pub display_name: String,
    pub timezone_id: String,
    pub time: Result<SummaryTime, SchedulerError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSummary {
    pub slot: SelectedSlot,
    pub instant: DateTime<Utc>,
    pub entries: Vec<SummaryEntry>,
}

pub fn build_summary(
    state: &SchedulerState,
    grid: &GridModel,
    time: &dyn TimeService,
    slot: SelectedSlot,
) -> Option<TimeSummary> {
    if slot.timezone_index >= state.timezones.len() {
        return None;
    }

    let instant = grid.instant_for(slot.hour, slot.minute_bucket);
    let reference = state
        .reference()
        .and_then(|tz| time.zone_time(&tz.timezone_id, instant).ok());

    let entries = state
        .timezones
        .iter()
        .enumerate()
        .map(|(index, tz)| {
            let detail = time.zone_time(&tz.timezone_id, instant).map(|zone| {
                let (relative, reference_day) = match &reference {
                    Some(reference) if index > 0 => {
                        (zone.offset_minutes - reference.offset_minutes, Some(reference.date()))
                    }
                    Some(reference) => (0, Some(reference.date())),
                    None => (zone.offset_minutes, None),
                };

                SummaryTime {
                    local_time_label: zone.time_label(),
                    day_label: format_day_marker(zone.date()),
                    abbreviation: zone.abbreviation.clone(),
                    relative_offset_label: relative_offset_label(relative),
                    is_work_hour: grid.work_hours.contains(zone.hour()),
                    differs_from_reference_day: reference_day.is_some_and(|day| day != zone.date()),
                }
            });

            SummaryEntry {
                timezone_index: index,
                display_name: tz.display_name.clone(),
                timezone_id: tz.timezone_id.clone(),
                time: detail,
            }
        })
        .collect();

    Some(TimeSummary {
        slot,
        instant,
        entries,
    })
}

impl TimeSummary {
    /// e.g. `09:15 in Tokyo`
    pub fn headline(&self) -> String {
        let Some(entry) = self.entries.get(self.slot.timezone_index) else {
            return self.instant.format("%H:%M UTC").to_string();
        };
        match &entry.time {
            Ok(time) => format!("{} in {}", time.local_time_label, entry.display_name),
            Err(_) => format!("{} (unavailable)", entry.display_name),
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![self.headline()];
        for entry in &self.entries {
            let line = match &entry.time {
                Ok(time) => format!(
                    "{}: {} {} ({}) {}",
                    entry.display_name,
                    time.local_time_label,
                    time.abbreviation,
                    time.relative_offset_label,
                    time.day_label
                ),
                Err(err) => format!("{}: {}", entry.display_name, err),
            };
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Markup for pasting into rich-text targets. Every user-supplied string
    /// is escaped.
    pub fn to_html(&self) -> String {
        let mut html = format!("<p>{}</p>\n<ul>\n", escape_html(&self.headline()));
        for entry in &self.entries {
            let body = match &entry.time {
                Ok(time) => format!(
                    "{} {} ({}) {}",
                    escape_html(&time.local_time_label),
                    escape_html(&time.abbreviation),
                    escape_html(&time.relative_offset_label),
                    escape_html(&time.day_label)
                ),
                Err(err) => escape_html(&err.to_string()),
            };
            html.push_str(&format!(
                "  <li><strong>{}</strong> {}</li>\n",
                escape_html(&entry.display_name),
                body
            ));
        }
        html.push_str("</ul>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scheduler::MinuteBucket;
    use crate::models::timezone::{TrackedTimezone, TrackedTimezoneId};
    use crate::services::grid::cells::derive_grid;
    use crate::services::time::ChronoTzTimeService;
    use chrono::NaiveDate;

    fn state(zones: &[(&str, &str)]) -> SchedulerState {
        SchedulerState::new(
            zones
                .iter()
                .enumerate()
                .map(|(i, (name, id))| TrackedTimezone::new(TrackedTimezoneId::new(i.to_string()), *name, *id))
                .collect(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_summary_lists_every_zone() {
        let time = ChronoTzTimeService::new();
        let state = state(&[("New York", "America/New_York"), ("Tokyo", "Asia/Tokyo")]);
        let grid = derive_grid(&state, &time);
        let summary =
            build_summary(&state, &grid, &time, SelectedSlot::new(0, 9, MinuteBucket::Fifteen)).unwrap();

        assert_eq!(summary.headline(), "09:15 in New York");
        let tokyo = summary.entries[1].time.as_ref().unwrap();
        assert_eq!(tokyo.local_time_label, "23:15");
        assert_eq!(tokyo.relative_offset_label, "+14");
        assert!(!tokyo.differs_from_reference_day);

        let text = summary.to_text();
        assert!(text.contains("New York: 09:15 EST (±0) Thu 15 Jan"));
        assert!(text.contains("Tokyo: 23:15 JST (+14) Thu 15 Jan"));
    }

    #[test]
    fn test_headline_uses_selected_row() {
        let time = ChronoTzTimeService::new();
        let state = state(&[("New York", "America/New_York"), ("Tokyo", "Asia/Tokyo")]);
        let grid = derive_grid(&state, &time);
        let summary =
            build_summary(&state, &grid, &time, SelectedSlot::new(1, 12, MinuteBucket::FortyFive)).unwrap();

        assert_eq!(summary.headline(), "02:45 in Tokyo");
        assert!(summary.entries[1].time.as_ref().unwrap().differs_from_reference_day);
    }

    #[test]
    fn test_html_escapes_names() {
        let time = ChronoTzTimeService::new();
        let state = state(&[("<script>alert(1)</script>", "UTC")]);
        let grid = derive_grid(&state, &time);
        let summary =
            build_summary(&state, &grid, &time, SelectedSlot::new(0, 0, MinuteBucket::Zero)).unwrap();

        let html = summary.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_unknown_zone_entry_reports_error() {
        let time = ChronoTzTimeService::new();
        let state = state(&[("London", "Europe/London"), ("Nowhere", "Mars/Base")]);
        let grid = derive_grid(&state, &time);
        let summary =
            build_summary(&state, &grid, &time, SelectedSlot::new(0, 10, MinuteBucket::Zero)).unwrap();

        assert!(summary.entries[1].time.is_err());
        assert!(summary.to_text().contains("Nowhere: unknown timezone identifier 'Mars/Base'"));
    }

    #[test]
    fn test_out_of_range_slot_has_no_summary() {
        let time = ChronoTzTimeService::new();
        let state = state(&[("London", "Europe/London")]);
        let grid = derive_grid(&state, &time);
        assert_eq!(build_summary(&state, &grid, &time, SelectedSlot::new(3, 10, MinuteBucket::Zero)), None);
    }
}
