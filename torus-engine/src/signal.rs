// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Trace hooks.
//!
//! A [`Signal`] is raised by a model object (for example a device
//! transmitting a packet) and calls every connected slot in the order they
//! were connected. Slots are removed again with the [`SlotId`] returned when
//! they were connected.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SlotId(u64);

type Slot<A> = Rc<dyn Fn(&A)>;

pub struct Signal<A> {
    slots: RefCell<Vec<(SlotId, Slot<A>)>>,
    next_id: Cell<u64>,
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }
}

impl<A> Signal<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect<F>(&self, slot: F) -> SlotId
    where
        F: Fn(&A) + 'static,
    {
        let id = SlotId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.slots.borrow_mut().push((id, Rc::new(slot)));
        id
    }

    /// Returns `false` if no slot with that id is connected.
    pub fn disconnect(&self, id: SlotId) -> bool {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|(slot_id, _)| *slot_id != id);
        slots.len() != before
    }

    pub fn emit(&self, args: &A) {
        // Take a copy so that slots can connect/disconnect while being called.
        let slots: Vec<Slot<A>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, slot)| slot.clone())
            .collect();
        for slot in slots {
            slot(args);
        }
    }

    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.slots.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Signal;

    #[test]
    fn slots_called_in_order() {
        let signal = Signal::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = seen.clone();
            signal.connect(move |v| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        signal.emit(&3);
        assert_eq!(*seen.borrow(), vec!["a3".to_string(), "b3".to_string()]);
    }

    #[test]
    fn disconnect() {
        let signal = Signal::<u32>::new();
        let count = Rc::new(RefCell::new(0));
        let id = {
            let count = count.clone();
            signal.connect(move |v| *count.borrow_mut() += v)
        };
        signal.emit(&2);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(&2);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(signal.num_slots(), 0);
    }
}
