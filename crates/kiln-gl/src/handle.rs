use std::fmt;
use std::rc::Rc;

use crate::driver::Driver;

/// Move-only owner of a single driver handle.
///
/// The handle is released through `delete` exactly once, when the holder is
/// dropped. Holding an `Rc<D>` keeps every owner on the context's thread.
pub struct Owned<D: Driver, T: Copy> {
    driver: Rc<D>,
    raw: T,
    delete: fn(&D, T),
}

impl<D: Driver, T: Copy> Owned<D, T> {
    pub(crate) fn new(driver: Rc<D>, raw: T, delete: fn(&D, T)) -> Self {
        Self { driver, raw, delete }
    }

    /// Returns the raw handle. Valid while `self` is alive.
    #[inline]
    pub fn raw(&self) -> T {
        self.raw
    }

    #[inline]
    pub fn driver(&self) -> &Rc<D> {
        &self.driver
    }
}

impl<D: Driver, T: Copy> Drop for Owned<D, T> {
    fn drop(&mut self) {
        (self.delete)(&self.driver, self.raw);
    }
}

impl<D: Driver, T: Copy + fmt::Debug> fmt::Debug for Owned<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owned").field(&self.raw).finish()
    }
}
