//! The filter contract: how a raw observation becomes the exposed value.
//!
//! A filter governs one entity of an updater and comes in one of two timing
//! variants. An *on-updated* filter is driven by the updater: it runs every
//! time a newly selected observation arrives, and its output is what the
//! snapshot exposes. A *manual* filter is driven by its owner: the updater
//! never calls it, and the filter reads the current selection and writes the
//! exposed value on its own schedule through the capabilities handed to it at
//! registration.
//!
//! Installing a filter replaces whatever filter governed the entity before;
//! handles to the replaced filter expire. Capabilities follow the same
//! single-threaded confinement as the updater that issued them.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::error::FilterError;

/// A filter invoked on every newly selected observation.
pub trait OnUpdated<T> {
    /// Folds the selected raw observation into the exposed value.
    ///
    /// `stamp` is the capture time of the frame that produced the
    /// observation. On `Err` the updater keeps the entity's previous exposed
    /// value and surfaces the failure from its own `update`.
    fn update(&mut self, raw: &T, stamp: Duration) -> Result<T, FilterError>;
}

impl<T, F: OnUpdated<T> + ?Sized> OnUpdated<T> for Box<F> {
    fn update(&mut self, raw: &T, stamp: Duration) -> Result<T, FilterError> {
        (**self).update(raw, stamp)
    }
}

/// A non-owning handle to a filter registered on an updater.
///
/// The handle expires as soon as the updater replaces or clears the filter.
pub struct FilterHandle<F: ?Sized>(Weak<RefCell<F>>);

impl<F: ?Sized> FilterHandle<F> {
    fn new(weak: Weak<RefCell<F>>) -> Self {
        Self(weak)
    }

    /// Whether the filter has been replaced or cleared.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0.strong_count() == 0
    }

    /// The filter itself, or `None` once it expired.
    #[must_use]
    pub fn upgrade(&self) -> Option<Rc<RefCell<F>>> {
        self.0.upgrade()
    }
}

impl<F: ?Sized> Clone for FilterHandle<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Capabilities handed to a manual filter at registration.
pub struct ManualControl<T> {
    pub(crate) last: Box<dyn Fn() -> Option<T>>,
    pub(crate) store: Box<dyn Fn(Option<T>)>,
}

impl<T> ManualControl<T> {
    /// The currently selected raw observation, or `None` while no camera
    /// holds a candidate for the governed entity.
    #[must_use]
    pub fn last_value(&self) -> Option<T> {
        (self.last)()
    }

    /// Sets, or with `None` clears, the exposed value of the governed entity.
    ///
    /// Writing through the control of a replaced or cleared filter has no
    /// effect.
    pub fn write(&self, value: Option<T>) {
        (self.store)(value);
    }
}

/// A registered filter, in either timing variant, for one entity.
pub(crate) enum Slot<T> {
    /// Updater-driven: fed whenever a newly selected observation arrives.
    OnUpdated {
        filter: Rc<RefCell<dyn OnUpdated<T>>>,
        /// The filter's last output; `None` until the filter has run.
        cooked: Option<T>,
    },
    /// Caller-driven: the updater only keeps the filter alive.
    Manual {
        /// Owned so the registration handle observes expiry on replacement.
        _filter: Rc<dyn Any>,
        /// What the filter last wrote; shared with its write capability.
        written: Rc<RefCell<Option<T>>>,
    },
}

impl<T: Clone> Slot<T> {
    /// The value this slot currently exposes, if any.
    pub(crate) fn exposed(&self) -> Option<T> {
        match self {
            Slot::OnUpdated { cooked, .. } => cooked.clone(),
            Slot::Manual { written, .. } => written.borrow().clone(),
        }
    }
}

/// Builds an on-updated slot and the handle belonging to it.
pub(crate) fn install_on_updated<T, F>(filter: F) -> (Slot<T>, FilterHandle<F>)
where
    T: 'static,
    F: OnUpdated<T> + 'static,
{
    let filter = Rc::new(RefCell::new(filter));
    let handle = FilterHandle::new(Rc::downgrade(&filter));

    (
        Slot::OnUpdated {
            filter,
            cooked: None,
        },
        handle,
    )
}

/// Builds an on-updated slot without a handle, for factory-made filters.
pub(crate) fn install_anonymous<T: 'static>(filter: Box<dyn OnUpdated<T>>) -> Slot<T> {
    Slot::OnUpdated {
        filter: Rc::new(RefCell::new(filter)),
        cooked: None,
    }
}

/// Builds a manual slot around the filter `build` constructs from its
/// capabilities. `last` reads the live selection from the owning updater.
pub(crate) fn install_manual<T, F, B>(
    last: Box<dyn Fn() -> Option<T>>,
    build: B,
) -> (Slot<T>, FilterHandle<F>)
where
    T: 'static,
    F: 'static,
    B: FnOnce(ManualControl<T>) -> F,
{
    let written = Rc::new(RefCell::new(None));
    let store = {
        let written = Rc::downgrade(&written);
        Box::new(move |value| {
            // A write through a replaced or cleared slot is dropped.
            if let Some(cell) = written.upgrade() {
                *cell.borrow_mut() = value;
            }
        }) as Box<dyn Fn(Option<T>)>
    };

    let filter = Rc::new(RefCell::new(build(ManualControl { last, store })));
    let handle = FilterHandle::new(Rc::downgrade(&filter));

    (
        Slot::Manual {
            _filter: filter,
            written,
        },
        handle,
    )
}
