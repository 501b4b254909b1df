//! Tracks the ball across cameras.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ssl_vision::DetectionFrame;

use crate::Result;
use crate::error::Error;
use crate::filter::{self, FilterHandle, ManualControl, OnUpdated, Slot};
use crate::model::Ball;
use crate::transform::FieldTransform;

use super::stamp;

/// Maintains the per-camera ball candidates and exposes the selected ball.
///
/// State lives behind an `Rc` so a manual filter's capabilities can read it
/// live; access stays single-threaded.
#[derive(Default)]
pub struct BallUpdater {
    state: Rc<RefCell<State>>,
}

#[derive(Default)]
struct State {
    transform: FieldTransform,
    /// Most recent candidate per camera; absent when the camera's last frame
    /// carried no ball.
    candidates: BTreeMap<u32, Ball>,
    slot: Option<Slot<Ball>>,
}

impl State {
    /// The highest-confidence candidate across cameras; ties go to the
    /// lowest camera id.
    fn selected(&self) -> Option<(u32, Ball)> {
        let mut best: Option<(u32, Ball)> = None;
        for (&camera_id, ball) in &self.candidates {
            if best.is_none_or(|(_, b)| ball.confidence > b.confidence) {
                best = Some((camera_id, *ball));
            }
        }

        best
    }
}

impl BallUpdater {
    /// An updater with no candidates, no filter, and the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one camera's detection frame.
    ///
    /// The frame's highest-confidence ball (ties keep the first encountered)
    /// becomes this camera's candidate; a frame without a ball removes the
    /// candidate. A filter failure leaves the previously exposed ball in
    /// place.
    pub fn update(&mut self, frame: &DetectionFrame) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;

        let camera_id = frame.camera_id;
        let mut incoming = None;
        for ball in &frame.balls {
            if incoming.is_none_or(|best: ssl_vision::DetectionBall| {
                ball.confidence > best.confidence
            }) {
                incoming = Some(*ball);
            }
        }

        match incoming {
            Some(ball) => {
                let (x, y) = state.transform.apply_point(ball.x.into(), ball.y.into());
                state.candidates.insert(
                    camera_id,
                    Ball {
                        confidence: ball.confidence.into(),
                        ..Ball::at(x, y)
                    },
                );
            }
            None => {
                state.candidates.remove(&camera_id);
            }
        }

        match state.selected() {
            // Feed the filter only when this camera's observation won the
            // selection; a dominated arrival leaves the exposure untouched.
            Some((camera, ball)) if camera == camera_id => {
                if let Some(Slot::OnUpdated { filter, cooked }) = &mut state.slot {
                    match Rc::clone(filter)
                        .borrow_mut()
                        .update(&ball, stamp(frame.t_capture))
                    {
                        Ok(value) => *cooked = Some(value),
                        Err(source) => return Err(Error::BallFilter(source)),
                    }
                }
            }
            None => {
                if let Some(Slot::OnUpdated { cooked, .. }) = &mut state.slot {
                    *cooked = None;
                }
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// The exposed ball: the filter's output when one governs, the selected
    /// candidate otherwise, and the default ball when there is neither.
    #[must_use]
    pub fn value(&self) -> Ball {
        let state = self.state.borrow();
        match &state.slot {
            Some(slot) => slot.exposed().unwrap_or_default(),
            None => state.selected().map(|(_, ball)| ball).unwrap_or_default(),
        }
    }

    /// Installs an on-updated filter, replacing whatever filter was active.
    ///
    /// Handles to the replaced filter expire immediately.
    pub fn set_filter<F>(&mut self, filter: F) -> FilterHandle<F>
    where
        F: OnUpdated<Ball> + 'static,
    {
        let (slot, handle) = filter::install_on_updated(filter);
        self.state.borrow_mut().slot = Some(slot);
        handle
    }

    /// Installs a manual filter built by `build` from the capabilities that
    /// read the live selection and write the exposed ball.
    pub fn set_manual_filter<F, B>(&mut self, build: B) -> FilterHandle<F>
    where
        F: 'static,
        B: FnOnce(ManualControl<Ball>) -> F,
    {
        let last = {
            let state = Rc::clone(&self.state);
            Box::new(move || state.borrow().selected().map(|(_, ball)| ball))
                as Box<dyn Fn() -> Option<Ball>>
        };

        let (slot, handle) = filter::install_manual(last, build);
        self.state.borrow_mut().slot = Some(slot);
        handle
    }

    /// Removes the active filter; the ball falls back to raw observations.
    pub fn clear_filter(&mut self) {
        self.state.borrow_mut().slot = None;
    }

    /// Replaces the vision-to-field transform for subsequent frames.
    /// Stored candidates are not revisited.
    pub fn set_transform(&mut self, transform: FieldTransform) {
        self.state.borrow_mut().transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;
    use std::time::Duration;

    use approx::assert_relative_eq;
    use ssl_vision::{DetectionBall, DetectionFrame};

    use crate::error::FilterError;
    use crate::filter::{ManualControl, OnUpdated};
    use crate::model::Ball;
    use crate::transform::FieldTransform;

    use super::BallUpdater;

    fn frame(camera_id: u32, t_capture: f64, balls: Vec<DetectionBall>) -> DetectionFrame {
        DetectionFrame {
            camera_id,
            t_capture,
            balls,
            ..DetectionFrame::default()
        }
    }

    fn ball(x: f32, y: f32, confidence: f32) -> DetectionBall {
        DetectionBall {
            confidence,
            x,
            y,
            z: None,
        }
    }

    #[test]
    fn picks_the_best_ball_of_a_frame() {
        let mut updater = BallUpdater::new();

        updater
            .update(&frame(
                0,
                0.0,
                vec![ball(1.0, 2.0, 90.0), ball(3.0, 4.0, 95.0), ball(5.0, 6.0, 93.0)],
            ))
            .unwrap();

        let value = updater.value();
        assert_relative_eq!(value.x, 3.0);
        assert_relative_eq!(value.y, 4.0);
        assert_relative_eq!(value.confidence, 95.0);
    }

    #[test]
    fn equal_confidence_keeps_the_first_ball_seen() {
        let mut updater = BallUpdater::new();

        updater
            .update(&frame(
                0,
                0.0,
                vec![ball(1.0, 2.0, 90.0), ball(3.0, 4.0, 90.0)],
            ))
            .unwrap();

        assert_relative_eq!(updater.value().x, 1.0);
    }

    #[test]
    fn selects_the_most_confident_camera() {
        let mut updater = BallUpdater::new();

        updater.update(&frame(0, 0.0, vec![ball(1.0, 2.0, 93.0)])).unwrap();
        updater.update(&frame(1, 0.0, vec![ball(3.0, 4.0, 94.0)])).unwrap();
        assert_relative_eq!(updater.value().x, 3.0);

        // camera 1 loses sight; camera 0's candidate takes over
        updater.update(&frame(1, 0.0, vec![])).unwrap();
        assert_relative_eq!(updater.value().x, 1.0);

        // and once every camera is empty, the default ball comes back
        updater.update(&frame(0, 0.0, vec![])).unwrap();
        assert_eq!(updater.value(), Ball::default());
    }

    #[test]
    fn applies_the_transform_before_storing() {
        let mut updater = BallUpdater::new();
        updater.set_transform(FieldTransform::new(10.0, 20.0, FRAC_PI_2));

        updater.update(&frame(0, 0.0, vec![ball(1.0, 2.0, 93.0)])).unwrap();

        let value = updater.value();
        assert_relative_eq!(value.x, 8.0, epsilon = 1e-6);
        assert_relative_eq!(value.y, 21.0, epsilon = 1e-6);
    }

    struct Doubler {
        stamps: Vec<Duration>,
    }

    impl OnUpdated<Ball> for Doubler {
        fn update(&mut self, raw: &Ball, stamp: Duration) -> Result<Ball, FilterError> {
            self.stamps.push(stamp);
            Ok(Ball {
                vx: Some(raw.x * 2.0),
                ..*raw
            })
        }
    }

    #[test]
    fn on_updated_filter_runs_on_winning_frames_only() {
        let mut updater = BallUpdater::new();
        let handle = updater.set_filter(Doubler { stamps: Vec::new() });

        updater.update(&frame(0, 2.0, vec![ball(10.0, 0.0, 94.0)])).unwrap();
        assert_eq!(updater.value().vx, Some(20.0));

        // a dominated observation from another camera leaves the exposure
        updater.update(&frame(1, 4.0, vec![ball(50.0, 0.0, 90.0)])).unwrap();
        assert_eq!(updater.value().vx, Some(20.0));

        let filter = handle.upgrade().unwrap();
        assert_eq!(
            filter.borrow().stamps,
            vec![Duration::from_secs(2)]
        );
    }

    struct Failing;

    impl OnUpdated<Ball> for Failing {
        fn update(&mut self, _raw: &Ball, _stamp: Duration) -> Result<Ball, FilterError> {
            Err("observation rejected".into())
        }
    }

    #[test]
    fn filter_failure_keeps_the_last_good_ball() {
        let mut updater = BallUpdater::new();

        updater.set_filter(Doubler { stamps: Vec::new() });
        updater.update(&frame(0, 0.0, vec![ball(10.0, 0.0, 94.0)])).unwrap();

        updater.set_filter(Failing);
        assert!(updater.update(&frame(0, 1.0, vec![ball(30.0, 0.0, 95.0)])).is_err());

        // replacing dropped the doubler's output; the failing filter never
        // produced one, so the exposure is the default
        assert_eq!(updater.value(), Ball::default());

        // but candidates kept flowing: clearing the filter exposes the raw
        updater.clear_filter();
        assert_relative_eq!(updater.value().x, 30.0);
    }

    struct ManualMock {
        control: ManualControl<Ball>,
    }

    #[test]
    fn manual_filter_governs_the_exposure() {
        let mut updater = BallUpdater::new();
        let handle = updater.set_manual_filter(|control| ManualMock { control });
        let filter = handle.upgrade().unwrap();

        updater.update(&frame(0, 0.0, vec![ball(10.0, 20.0, 93.0)])).unwrap();

        // frames alone do not touch the exposure
        assert_eq!(updater.value(), Ball::default());
        let last = filter.borrow().control.last_value().unwrap();
        assert_relative_eq!(last.x, 10.0);
        assert_relative_eq!(last.y, 20.0);

        filter.borrow().control.write(Some(Ball::at(40.0, 50.0)));
        assert_relative_eq!(updater.value().x, 40.0);

        filter.borrow().control.write(None);
        assert_eq!(updater.value(), Ball::default());

        updater.update(&frame(0, 0.0, vec![])).unwrap();
        assert!(filter.borrow().control.last_value().is_none());
    }

    #[test]
    fn replacing_a_filter_expires_its_handle() {
        let mut updater = BallUpdater::new();

        let first = updater.set_filter(Doubler { stamps: Vec::new() });
        assert!(!first.is_expired());

        let second = updater.set_manual_filter(|control| ManualMock { control });
        assert!(first.is_expired());
        assert!(!second.is_expired());

        updater.clear_filter();
        assert!(second.is_expired());
    }

    #[test]
    fn write_through_a_replaced_filter_is_dropped() {
        let mut updater = BallUpdater::new();

        let first = updater.set_manual_filter(|control| ManualMock { control });
        let kept_alive = first.upgrade().unwrap();

        let _second = updater.set_manual_filter(|control| ManualMock { control });

        kept_alive.borrow().control.write(Some(Ball::at(1.0, 2.0)));
        assert_eq!(updater.value(), Ball::default());
    }
}
