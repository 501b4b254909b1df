//! Feeds a synthetic detection stream through a world updater with a ball
//! observer and a default robot velocity tracker installed, logging the
//! filtered snapshots.

use observer::{BallObserver, VelocityTracker};
use ssl_vision::{DetectionBall, DetectionFrame, DetectionRobot, WrapperPacket};
use world_model::updater::WorldUpdater;

fn main() -> world_model::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut world = WorldUpdater::new();
    world.ball_updater().set_filter(BallObserver::new());
    world
        .robots_blue_updater()
        .set_default_filter(|| Box::new(VelocityTracker::default()));

    // a ball rolling at 1 m/s with a blue robot chasing it
    for step in 0..120u32 {
        let t = f64::from(step) * 0.016;
        let x = 16.0 * step as f32;

        let packet = WrapperPacket {
            detection: Some(DetectionFrame {
                frame_number: step,
                t_capture: t,
                t_sent: t,
                camera_id: 0,
                balls: vec![DetectionBall {
                    confidence: 95.0,
                    x,
                    y: 0.0,
                    z: None,
                }],
                robots_blue: vec![DetectionRobot {
                    confidence: 90.0,
                    robot_id: Some(4),
                    x: x - 200.0,
                    y: 50.0,
                    orientation: Some(0.0),
                }],
                robots_yellow: vec![],
            }),
            geometry: None,
        };
        world.update(&packet)?;

        if step % 30 == 29 {
            let snapshot = world.value();
            let chaser = snapshot.robots_blue[&4];
            tracing::info!(
                ball_x = snapshot.ball.x,
                ball_vx = snapshot.ball.vx.unwrap_or_default(),
                robot_vx = chaser.vx.unwrap_or_default(),
                "tracked"
            );
        }
    }

    Ok(())
}
