use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::scheduler::SchedulerState;

pub type Listener = Rc<dyn Fn(&Rc<SchedulerState>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Subscriber list. Each notify cycle walks a copy of the list taken when
/// the cycle starts, so listeners may subscribe, unsubscribe or trigger
/// further mutations while being called.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
}

impl ListenerRegistry {
    pub fn subscribe(&self, listener: impl Fn(&Rc<SchedulerState>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn notify(&self, snapshot: &Rc<SchedulerState>) {
        let cycle: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in cycle {
            listener(snapshot);
        }
    }
}
