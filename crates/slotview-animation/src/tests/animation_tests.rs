use super::*;
use crate::easing::Easing;
use web_time::Duration;

const MS: u64 = 1_000_000;

#[test]
fn first_tick_anchors_start_time() {
    let mut animation = ScrollAnimation::new(1.0, 0.0, AnimationSpec::default());
    let frame = animation.tick(5_000 * MS);
    assert_eq!(frame.value, 1.0);
    assert!(!frame.finished);
    assert_eq!(animation.progress(), 0.0);
}

#[test]
fn linear_tween_interpolates_over_time() {
    let spec = AnimationSpec::linear(Duration::from_millis(100));
    let mut animation = ScrollAnimation::new(0.0, 1.0, spec);
    animation.tick(0);

    let samples: Vec<f32> = [25, 50, 75]
        .iter()
        .map(|ms| animation.tick(ms * MS).value)
        .collect();
    for (sample, expected) in samples.iter().zip([0.25, 0.5, 0.75]) {
        assert!((sample - expected).abs() < 1e-5, "{sample} != {expected}");
    }

    let done = animation.tick(100 * MS);
    assert!(done.finished);
    assert_eq!(done.value, 1.0);
    assert!(animation.is_finished());
}

#[test]
fn eased_tween_lands_exactly_on_target() {
    let spec = AnimationSpec::tween(Duration::from_millis(300), Easing::FastOutSlowIn);
    let mut animation = ScrollAnimation::new(1.0, 0.2, spec);
    let mut time = 0;
    let mut last = animation.tick(time);
    while !last.finished {
        time += 16 * MS;
        let next = animation.tick(time);
        assert!(next.value <= last.value + 1e-6, "moving away from target");
        last = next;
    }
    assert_eq!(last.value, 0.2);
    assert!(time >= 300 * MS);
}

#[test]
fn zero_duration_finishes_on_first_tick() {
    let spec = AnimationSpec::linear(Duration::ZERO);
    let mut animation = ScrollAnimation::new(0.0, 0.6, spec);
    let frame = animation.tick(42);
    assert!(frame.finished);
    assert_eq!(frame.value, 0.6);
}

#[test]
fn delay_holds_the_start_value() {
    let spec = AnimationSpec::linear(Duration::from_millis(100)).with_delay(Duration::from_millis(50));
    let mut animation = ScrollAnimation::new(0.0, 1.0, spec);
    animation.tick(0);
    assert_eq!(animation.tick(40 * MS).value, 0.0);
    let value = animation.tick(100 * MS).value;
    assert!((value - 0.5).abs() < 1e-5);
}
