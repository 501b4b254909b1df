//! Tracks one team's robots across cameras.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;
use std::rc::Rc;

use ssl_vision::DetectionFrame;

use crate::Result;
use crate::error::Error;
use crate::filter::{self, FilterHandle, ManualControl, OnUpdated, Slot};
use crate::model::Robot;
use crate::team::TeamColor;
use crate::transform::FieldTransform;

use super::stamp;

/// Maintains per-camera, per-id robot candidates for one team colour and
/// exposes the selected observation of every tracked id, optionally through
/// a per-id filter.
///
/// State lives behind an `Rc` so a manual filter's capabilities can read it
/// live; access stays single-threaded.
pub struct RobotUpdater<C: TeamColor> {
    state: Rc<RefCell<State>>,
    _color: PhantomData<C>,
}

/// One camera's latest observation of one robot, in field coordinates.
#[derive(Clone, Copy)]
struct Candidate {
    confidence: f64,
    robot: Robot,
}

#[derive(Default)]
struct State {
    transform: FieldTransform,
    /// camera id → robot id → candidate.
    candidates: BTreeMap<u32, BTreeMap<u32, Candidate>>,
    /// Installed filters by robot id.
    slots: BTreeMap<u32, Slot<Robot>>,
    /// Builds a filter for ids that have none the first time they show up.
    default_factory: Option<Box<dyn FnMut() -> Box<dyn OnUpdated<Robot>>>>,
}

impl State {
    /// The highest-confidence candidate for `id` across cameras; ties go to
    /// the lowest camera id.
    fn selected(&self, id: u32) -> Option<(u32, Candidate)> {
        let mut best: Option<(u32, Candidate)> = None;
        for (&camera_id, robots) in &self.candidates {
            if let Some(candidate) = robots.get(&id) {
                if best.is_none_or(|(_, b)| candidate.confidence > b.confidence) {
                    best = Some((camera_id, *candidate));
                }
            }
        }

        best
    }
}

impl<C: TeamColor> RobotUpdater<C> {
    /// An updater with no candidates, no filters, and the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one camera's detection frame.
    ///
    /// Only observations of this updater's colour are considered; duplicates
    /// of an id within the frame keep the last observation seen, and
    /// observations without an id are dropped. The frame is authoritative for
    /// its camera: ids it omits lose that camera's candidate.
    ///
    /// The whole frame is processed even when a filter fails; the first
    /// failure is returned and the failed id keeps its previous exposure.
    pub fn update(&mut self, frame: &DetectionFrame) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;

        let camera_id = frame.camera_id;
        let t = stamp(frame.t_capture);
        tracing::trace!(camera_id, color = %C::COLOR, "ingesting detection frame");

        let mut incoming = BTreeMap::new();
        for observation in C::robots(frame) {
            let Some(id) = observation.robot_id else {
                continue;
            };
            let (x, y) = state
                .transform
                .apply_point(observation.x.into(), observation.y.into());
            let theta = state
                .transform
                .apply_angle(observation.orientation.unwrap_or_default().into());
            incoming.insert(
                id,
                Candidate {
                    confidence: observation.confidence.into(),
                    robot: Robot::new(id, x, y, theta),
                },
            );
        }

        // Ids this frame touches: everything it carries plus everything the
        // camera reported last time (those lose their candidate).
        let fresh: BTreeSet<u32> = incoming.keys().copied().collect();
        let mut affected = fresh.clone();
        if let Some(previous) = state.candidates.get(&camera_id) {
            affected.extend(previous.keys().copied());
        }

        if incoming.is_empty() {
            state.candidates.remove(&camera_id);
        } else {
            state.candidates.insert(camera_id, incoming);
        }

        let mut first_error = None;
        for &id in &affected {
            if fresh.contains(&id) && !state.slots.contains_key(&id) {
                if let Some(factory) = &mut state.default_factory {
                    state.slots.insert(id, filter::install_anonymous(factory()));
                }
            }

            let newly_selected = state.selected(id);
            if let Some(Slot::OnUpdated { filter, cooked }) = state.slots.get_mut(&id) {
                match newly_selected {
                    // Feed the filter only when this camera's observation won
                    // the selection; a dominated arrival leaves the exposure
                    // untouched.
                    Some((camera, candidate)) if camera == camera_id => {
                        match Rc::clone(filter).borrow_mut().update(&candidate.robot, t) {
                            Ok(value) => *cooked = Some(value),
                            Err(source) => {
                                if first_error.is_none() {
                                    first_error = Some(Error::RobotFilter { id, source });
                                }
                            }
                        }
                    }
                    None => *cooked = None,
                    Some(_) => {}
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// The exposed robots, keyed by pattern id.
    ///
    /// Raw-governed ids expose the current selection, filter-governed ids
    /// expose what their filter produced or wrote; ids without any of those
    /// are absent.
    #[must_use]
    pub fn value(&self) -> BTreeMap<u32, Robot> {
        let state = self.state.borrow();

        let mut ids: BTreeSet<u32> = state
            .candidates
            .values()
            .flat_map(|robots| robots.keys().copied())
            .collect();
        ids.extend(state.slots.keys().copied());

        let mut robots = BTreeMap::new();
        for id in ids {
            match state.slots.get(&id) {
                Some(slot) => {
                    if let Some(robot) = slot.exposed() {
                        robots.insert(id, robot);
                    }
                }
                None => {
                    if let Some((_, candidate)) = state.selected(id) {
                        robots.insert(id, candidate.robot);
                    }
                }
            }
        }

        robots
    }

    /// Installs an on-updated filter for `id`, replacing whatever filter
    /// governed the id before.
    ///
    /// Handles to the replaced filter expire immediately.
    pub fn set_filter<F>(&mut self, id: u32, filter: F) -> FilterHandle<F>
    where
        F: OnUpdated<Robot> + 'static,
    {
        let (slot, handle) = filter::install_on_updated(filter);
        self.state.borrow_mut().slots.insert(id, slot);
        handle
    }

    /// Installs a manual filter for `id`, built by `build` from the
    /// capabilities that read the live selection and write the exposed value.
    pub fn set_manual_filter<F, B>(&mut self, id: u32, build: B) -> FilterHandle<F>
    where
        F: 'static,
        B: FnOnce(ManualControl<Robot>) -> F,
    {
        let last = {
            let state = Rc::clone(&self.state);
            Box::new(move || {
                state
                    .borrow()
                    .selected(id)
                    .map(|(_, candidate)| candidate.robot)
            }) as Box<dyn Fn() -> Option<Robot>>
        };

        let (slot, handle) = filter::install_manual(last, build);
        self.state.borrow_mut().slots.insert(id, slot);
        handle
    }

    /// Removes the filter for `id`; the id falls back to raw observations.
    pub fn clear_filter(&mut self, id: u32) {
        self.state.borrow_mut().slots.remove(&id);
    }

    /// Installs a factory that builds an on-updated filter for any id that
    /// shows up in a frame without a filter of its own.
    ///
    /// Clearing the factory later leaves already instantiated filters alive.
    pub fn set_default_filter(
        &mut self,
        factory: impl FnMut() -> Box<dyn OnUpdated<Robot>> + 'static,
    ) {
        self.state.borrow_mut().default_factory = Some(Box::new(factory));
    }

    /// Removes the default-filter factory.
    pub fn clear_default_filter(&mut self) {
        self.state.borrow_mut().default_factory = None;
    }

    /// Drops every per-id filter and the default factory; every id falls
    /// back to raw observations.
    pub fn clear_all_filters(&mut self) {
        let mut state = self.state.borrow_mut();
        state.slots.clear();
        state.default_factory = None;
    }

    /// Replaces the vision-to-field transform for subsequent frames.
    /// Stored candidates are not revisited.
    pub fn set_transform(&mut self, transform: FieldTransform) {
        self.state.borrow_mut().transform = transform;
    }
}

impl<C: TeamColor> Default for RobotUpdater<C> {
    fn default() -> Self {
        Self {
            state: Rc::default(),
            _color: PhantomData,
        }
    }
}
