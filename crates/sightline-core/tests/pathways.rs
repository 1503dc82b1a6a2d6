//! End-to-end sample flow: simulator -> controller -> observers

use std::f64::consts::{PI, TAU};
use std::sync::{Arc, Mutex};

use sightline_core::sensor::STANDARD_GRAVITY;
use sightline_core::{
    spawn_controller, OrientationResult, Point3, SampleSimulator, SensorSample, SensorSet,
    SensorsController, SightlineConfig, SimulationMode, SourceTag, VirtualHub,
};

fn wrap(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

fn controller_facing_east() -> SensorsController {
    let mut config = SightlineConfig::default();
    config.locations.device = Point3::ORIGIN;
    config.locations.target = Point3::new(10.0, 0.0, 0.0);
    SensorsController::new(&config, Box::new(VirtualHub::new(SensorSet::all())))
}

fn collect(controller: &mut SensorsController) -> Arc<Mutex<Vec<OrientationResult>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    controller.subscribe(Arc::new(move |r: &OrientationResult| sink.lock().unwrap().push(*r)));
    seen
}

#[test]
fn turning_device_sweeps_azimuth_on_both_pathways() {
    for mode in [SimulationMode::RotationVector, SimulationMode::Raw] {
        let mut controller = controller_facing_east();
        let seen = collect(&mut controller);
        controller.start().unwrap();

        let step = 15f64.to_radians();
        let mut sim = SampleSimulator::new().with_yaw_step(step);
        for _ in 0..24 {
            for sample in sim.next_samples(mode) {
                controller.on_sample(&sample);
            }
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 24, "{:?}", mode);
        for (k, result) in seen.iter().enumerate() {
            let yaw = k as f64 * step;
            // Target fixed east; device turns left, so the bearing turns right
            assert!(
                wrap(result.azimuth + yaw).abs() < 1e-6,
                "{:?} k={} az={}",
                mode,
                k,
                result.azimuth
            );
            // Yaw from the row-major extraction grows clockwise
            assert!(wrap(result.yaw + yaw).abs() < 1e-6);
            assert!(result.inclination.abs() < 1e-6);
            assert!(result.self_check.abs() < 1e-9);
        }
    }
}

#[test]
fn pathways_agree_for_the_same_attitude() {
    let sim = SampleSimulator::new().with_attitude(1.1, 0.35, -0.2);

    let mut controller = controller_facing_east();
    controller.start().unwrap();

    let fused = controller.on_sample(&sim.rotation_vector_sample()).unwrap();
    let [accel, mag] = sim.raw_samples();
    assert!(controller.on_sample(&accel).is_none());
    let raw = controller.on_sample(&mag).unwrap();

    assert_eq!(fused.source, SourceTag::RotationVector);
    assert_eq!(raw.source, SourceTag::Raw);
    for (a, b) in [
        (fused.yaw, raw.yaw),
        (fused.pitch, raw.pitch),
        (fused.roll, raw.roll),
        (fused.azimuth, raw.azimuth),
        (fused.inclination, raw.inclination),
    ] {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }
}

#[test]
fn raw_pairs_require_both_fresh_readings() {
    let mut controller = controller_facing_east();
    let seen = collect(&mut controller);
    controller.start().unwrap();

    let accel = SensorSample::accelerometer([0.0, 0.0, STANDARD_GRAVITY]);
    let mag = SensorSample::magnetic_field([0.0, 22.0, -40.0]);

    // Repeats of one stream never pair with themselves
    controller.on_sample(&accel);
    controller.on_sample(&accel);
    assert!(seen.lock().unwrap().is_empty());

    controller.on_sample(&mag);
    assert_eq!(seen.lock().unwrap().len(), 1);

    // Pair consumed; a second magnetometer reading waits for a new accelerometer one
    controller.on_sample(&mag);
    assert_eq!(seen.lock().unwrap().len(), 1);
    controller.on_sample(&accel);
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert!(seen.lock().unwrap().iter().all(|r| r.source == SourceTag::Raw));
}

#[test]
fn location_changes_apply_to_the_next_sample() {
    let mut controller = controller_facing_east();
    controller.start().unwrap();
    let sample = SensorSample::rotation_vector([0.0, 0.0, 0.0]);

    let before = controller.on_sample(&sample).unwrap();
    assert!(before.azimuth.abs() < 1e-12);

    controller.set_target_location(Point3::new(0.0, -4.0, 0.0));
    let after = controller.on_sample(&sample).unwrap();
    assert!((after.azimuth + PI / 2.0).abs() < 1e-12);

    controller.set_device_location(Point3::new(0.0, -4.0, 0.0));
    assert!(controller.on_sample(&sample).is_none());
    assert_eq!(controller.stats().skipped, 1);
}

#[test]
fn failed_samples_do_not_reach_observers() {
    let mut controller = controller_facing_east();
    let seen = collect(&mut controller);
    controller.start().unwrap();

    controller.on_sample(&SensorSample::rotation_vector([f64::NAN, 0.0, 0.0]));
    // Free fall: no gravity, no attitude
    controller.on_sample(&SensorSample::accelerometer([0.0, 0.0, 0.0]));
    controller.on_sample(&SensorSample::magnetic_field([0.0, 22.0, -40.0]));

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(controller.stats().skipped, 2);

    // Recovery
    controller.on_sample(&SensorSample::rotation_vector([0.0, 0.0, 0.0]));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn simulator_through_controller_task() {
    let mut controller = controller_facing_east();
    let seen = collect(&mut controller);
    let (handle, task) = spawn_controller(controller);
    handle.start().await.unwrap();

    let mut sim = SampleSimulator::new();
    for _ in 0..10 {
        for sample in sim.next_samples(SimulationMode::Raw) {
            handle.send_sample(sample).unwrap();
        }
    }

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.samples, 20);
    assert_eq!(stats.broadcasts, 10);
    assert_eq!(seen.lock().unwrap().len(), 10);

    handle.shutdown().unwrap();
    let controller = task.await.unwrap();
    assert!(!controller.is_active());
}
