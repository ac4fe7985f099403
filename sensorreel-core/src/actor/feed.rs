use std::{cell::Cell, rc::Rc};

use crate::foundation::geometry::Point;

/// Single-slot, single-threaded position channel between actors.
///
/// A producer (a vehicle, a trajectory) publishes its latest position every tick; consumers (a
/// trajectory sampling a vehicle, a controller reading a measurement) read it. Clones share the
/// slot.
#[derive(Clone, Debug, Default)]
pub struct Feed(Rc<Cell<Option<Point>>>);

impl Feed {
    /// Empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot.
    pub fn publish(&self, p: Point) {
        self.0.set(Some(p));
    }

    /// Latest published value.
    pub fn latest(&self) -> Option<Point> {
        self.0.get()
    }

    /// `true` when both handles share one slot.
    pub fn same_as(&self, other: &Feed) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
