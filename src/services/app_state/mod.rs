//! Single owner of [`SchedulerState`].
//!
//! Every mutation replaces the snapshot, writes through to persistence and
//! runs exactly one notify cycle before returning. Methods take `&self` so
//! that a listener holding a handle to the store can mutate it from inside
//! its own notification.

mod listeners;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use chrono::{Duration, NaiveDate, Utc};

use crate::models::error::SchedulerError;
use crate::models::scheduler::{SchedulerState, SelectedSlot, WorkHours};
use crate::models::timezone::{TrackedTimezone, TrackedTimezoneId};
use crate::services::persistence::{InitialLoad, PersistenceAdapter};

pub use listeners::{Listener, ListenerId, ListenerRegistry};

/// Where the startup timezone list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Url,
    Storage,
    Empty,
}

/// What kind of change a commit makes, which decides what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Timezones,
    Date,
    Transient,
}

struct IdGenerator {
    seed: String,
    counter: Cell<u64>,
}

impl IdGenerator {
    fn new() -> Self {
        Self {
            seed: format!("{:x}", Utc::now().timestamp_millis()),
            counter: Cell::new(0),
        }
    }

    fn next(&self, existing: &[TrackedTimezone]) -> TrackedTimezoneId {
        loop {
            let n = self.counter.get() + 1;
            self.counter.set(n);
            let candidate = format!("{}-{}", self.seed, n);
            if !existing.iter().any(|tz| tz.id.as_str() == candidate) {
                return TrackedTimezoneId::new(candidate);
            }
        }
    }
}

pub struct AppState {
    state: RefCell<Rc<SchedulerState>>,
    persistence: RefCell<PersistenceAdapter>,
    listeners: ListenerRegistry,
    ids: IdGenerator,
    load_source: LoadSource,
}

impl AppState {
    /// Builds the initial state. A `tz` list in the launch link replaces the
    /// stored list outright; a `date` in the link overrides `today` whether
    /// or not a list came with it.
    pub fn load(mut persistence: PersistenceAdapter, today: NaiveDate, work_hours: WorkHours) -> Self {
        let ids = IdGenerator::new();
        let InitialLoad { persisted, url } = persistence.load();

        let (timezones, load_source) = match url.timezones {
            Some(entries) => {
                let mut timezones: Vec<TrackedTimezone> = Vec::with_capacity(entries.len());
                for entry in entries {
                    let id = ids.next(&timezones);
                    timezones.push(TrackedTimezone::new(id, entry.display_name, entry.timezone_id));
                }
                (timezones, LoadSource::Url)
            }
            None if !persisted.is_empty() => {
                let mut timezones = persisted;
                if repair_duplicate_ids(&mut timezones, &ids) > 0 {
                    persistence.save_timezones(&timezones);
                }
                (timezones, LoadSource::Storage)
            }
            None => (Vec::new(), LoadSource::Empty),
        };

        let selected_date = url.date.unwrap_or(today);
        persistence.sync_link_timezones(&timezones);

        log::info!(
            "Loaded {} timezone(s) from {:?}, date {}",
            timezones.len(),
            load_source,
            selected_date
        );

        let mut state = SchedulerState::new(timezones, selected_date);
        state.work_hours = work_hours;

        Self {
            state: RefCell::new(Rc::new(state)),
            persistence: RefCell::new(persistence),
            listeners: ListenerRegistry::default(),
            ids,
            load_source,
        }
    }

    pub fn snapshot(&self) -> Rc<SchedulerState> {
        Rc::clone(&self.state.borrow())
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn subscribe(&self, listener: impl Fn(&Rc<SchedulerState>) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Appends a new entry. Does not deduplicate.
    pub fn add_timezone(
        &self,
        display_name: &str,
        timezone_id: &str,
    ) -> Result<TrackedTimezoneId, SchedulerError> {
        let (display_name, timezone_id) = (display_name.trim(), timezone_id.trim());
        if display_name.is_empty() || timezone_id.is_empty() {
            return Err(SchedulerError::EmptyIdentifier);
        }

        let id = self.ids.next(&self.snapshot().timezones);
        let tz = TrackedTimezone::new(id.clone(), display_name, timezone_id);
        log::debug!("Adding timezone {} ({})", tz.display_name, tz.timezone_id);

        self.commit(Change::Timezones, |state| state.timezones.push(tz));
        Ok(id)
    }

    /// Unknown ids are ignored. Removing index 0 promotes the next entry to
    /// reference without any extra event.
    pub fn remove_timezone(&self, id: &TrackedTimezoneId) {
        let snapshot = self.snapshot();
        let Some(index) = snapshot.timezones.iter().position(|tz| &tz.id == id) else {
            log::debug!("remove_timezone: no entry with id {}", id);
            return;
        };

        self.commit(Change::Timezones, |state| {
            state.timezones.remove(index);
        });
    }

    /// Remove-then-insert: the element ends up at `to_index` of the resulting
    /// sequence.
    pub fn move_timezone(&self, from_index: usize, to_index: usize) -> Result<(), SchedulerError> {
        let len = self.snapshot().timezones.len();
        if from_index >= len || to_index >= len {
            log::debug!("Rejecting move {} -> {} in list of {}", from_index, to_index, len);
            return Err(SchedulerError::OutOfRange {
                from: from_index,
                to: to_index,
                len,
            });
        }

        self.commit(Change::Timezones, |state| {
            let moved = state.timezones.remove(from_index);
            state.timezones.insert(to_index, moved);
        });
        Ok(())
    }

    pub fn set_selected_date(&self, date: NaiveDate) {
        self.commit(Change::Date, |state| state.selected_date = date);
    }

    pub fn shift_selected_date(&self, days: i64) {
        let current = self.snapshot().selected_date;
        if let Some(date) = current.checked_add_signed(Duration::days(days)) {
            self.set_selected_date(date);
        }
    }

    /// Jumps back to `today`. Link-only, like any other date change.
    pub fn reset_to_today(&self, today: NaiveDate) {
        if self.snapshot().selected_date != today {
            self.set_selected_date(today);
        }
    }

    /// `None` closes any open summary.
    pub fn set_selected_slot(&self, slot: Option<SelectedSlot>) {
        self.commit(Change::Transient, |state| state.selected_slot = slot);
    }

    pub fn set_work_hours(&self, start: u32, end: u32) -> Result<(), SchedulerError> {
        let hours = WorkHours::new(start, end)?;
        self.commit(Change::Transient, |state| state.work_hours = hours);
        Ok(())
    }

    pub fn share_query(&self) -> String {
        self.persistence.borrow().share_query()
    }

    fn commit(&self, change: Change, mutate: impl FnOnce(&mut SchedulerState)) {
        let snapshot = {
            let mut current = self.state.borrow_mut();
            let mut next = SchedulerState::clone(&current);
            let selected_id = next
                .selected_slot
                .and_then(|slot| next.timezones.get(slot.timezone_index))
                .map(|tz| tz.id.clone());

            mutate(&mut next);

            if change == Change::Timezones {
                next.selected_slot = remap_slot(&next, next.selected_slot, selected_id.as_ref());
            }

            let snapshot = Rc::new(next);
            *current = Rc::clone(&snapshot);
            snapshot
        };

        {
            let mut persistence = self.persistence.borrow_mut();
            match change {
                Change::Timezones => persistence.save_timezones(&snapshot.timezones),
                Change::Date => persistence.save_date(snapshot.selected_date),
                Change::Transient => {}
            }
        }

        self.listeners.notify(&snapshot);
    }
}

/// Gives a fresh id to every entry whose id an earlier entry already uses.
/// Returns how many entries were renamed.
fn repair_duplicate_ids(timezones: &mut [TrackedTimezone], ids: &IdGenerator) -> usize {
    let mut seen = HashSet::new();
    let mut repaired = 0;
    for index in 0..timezones.len() {
        if seen.insert(timezones[index].id.clone()) {
            continue;
        }
        let fresh = ids.next(timezones);
        log::warn!(
            "Stored timezone {} reuses id {}; renamed to {}",
            timezones[index].display_name,
            timezones[index].id,
            fresh
        );
        seen.insert(fresh.clone());
        timezones[index].id = fresh;
        repaired += 1;
    }
    repaired
}

/// Keeps a selection pointing at the same timezone after the list changes,
/// or drops it if that timezone is gone.
fn remap_slot(
    state: &SchedulerState,
    slot: Option<SelectedSlot>,
    selected_id: Option<&TrackedTimezoneId>,
) -> Option<SelectedSlot> {
    let slot = slot?;
    let id = selected_id?;
    let index = state.timezones.iter().position(|tz| &tz.id == id)?;
    Some(SelectedSlot {
        timezone_index: index,
        ..slot
    })
}
