//! Unit tests for physics calculations.
//! Covers the acceleration and friction helpers for edge cases and typical
//! inputs.
use approx::assert_relative_eq;
use golfram::physics::{friction_acceleration, integrate};
use golfram::{applied_acceleration, Vector2, BALL_MASS};
use rstest::rstest;

#[rstest]
#[case::unit_mass((7.0, -14.0), 1.0, Some((7.0, -14.0)))]
#[case::explicit_mass((7.0, -14.0), 7.0, Some((1.0, -2.0)))]
#[case::golf_ball((BALL_MASS, 0.0), BALL_MASS, Some((1.0, 0.0)))]
#[case::zero_mass((1.0, 1.0), 0.0, None)]
#[case::negative_mass((1.0, 1.0), -5.0, None)]
fn acceleration_cases(
    #[case] force: (f64, f64),
    #[case] mass: f64,
    #[case] expected: Option<(f64, f64)>,
) {
    let acc = applied_acceleration(Vector2::new(force.0, force.1), mass);
    match (acc, expected) {
        (Some(a), Some(e)) => {
            assert_relative_eq!(a.x, e.0);
            assert_relative_eq!(a.y, e.1);
        }
        (None, None) => {}
        (a, e) => panic!("mismatch: {a:?} vs {e:?}"),
    }
}

#[rstest]
#[case::along_x((2.0, 0.0), 0.4, (-0.4, 0.0))]
#[case::diagonal((3.0, -4.0), 1.0, (-0.6, 0.8))]
#[case::at_rest((0.0, 0.0), 5.0, (0.0, 0.0))]
fn friction_opposes_motion(
    #[case] velocity: (f64, f64),
    #[case] friction: f64,
    #[case] expected: (f64, f64),
) {
    let accel = friction_acceleration(friction, Vector2::new(velocity.0, velocity.1));
    assert_relative_eq!(accel.x, expected.0);
    assert_relative_eq!(accel.y, expected.1);
}

#[test]
fn integration_uses_updated_velocity() {
    let dt = 1.0 / 60.0;
    let (position, velocity) =
        integrate(Vector2::ZERO, Vector2::new(2.0, 0.0), Vector2::new(-0.4, 0.0), dt);
    let expected_velocity = 2.0 - 0.4 * dt;
    assert_relative_eq!(velocity.x, expected_velocity);
    assert_relative_eq!(position.x, expected_velocity * dt - 0.2 * dt * dt);
    assert_relative_eq!(position.y, 0.0);
}
