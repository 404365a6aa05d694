use std::time::{Duration, Instant};

use glam::Vec2;

use oben_engine::camera::{CameraConfig, DEFAULT_RADIUS};
use oben_engine::input::{
    InputAccumulator, InputEvent, InputSnapshot, InputSource, Modifiers, MouseButton,
    MouseButtonState, MouseWheelDelta, PointerButtonEvent, PointerMoveEvent,
};
use oben_engine::render::{FrameDriver, RenderError, RendererPhase};

/// Replays one snapshot per poll, then idles.
struct ScriptedInput {
    frames: std::vec::IntoIter<InputSnapshot>,
    polls: usize,
}

impl ScriptedInput {
    fn new(frames: Vec<InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter(),
            polls: 0,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.polls += 1;
        self.frames.next().unwrap_or_default()
    }
}

#[derive(Debug, PartialEq)]
struct Shader(&'static str);

fn running_driver(t0: Instant) -> FrameDriver<Shader> {
    let mut driver = FrameDriver::new(CameraConfig::default());
    driver.device_ready().unwrap();
    driver
        .register(vec![Shader("sphere"), Shader("torus"), Shader("mandelbulb")])
        .unwrap();
    driver.start_at(t0).unwrap();
    driver
}

#[test]
fn switching_pipelines_resets_the_camera() {
    let t0 = Instant::now();
    let mut driver = running_driver(t0);
    let mut input = ScriptedInput::new(vec![
        InputSnapshot {
            pointer: Vec2::new(120.0, 40.0),
            primary_held: true,
            ..InputSnapshot::default()
        },
        InputSnapshot {
            pan: Vec2::new(-30.0, 10.0),
            zoom: 4,
            ..InputSnapshot::default()
        },
    ]);

    for i in 1..=2 {
        let frame = driver
            .prepare(&mut input, t0 + Duration::from_millis(16 * i), (640, 480))
            .unwrap();
        assert_eq!(frame.pipeline, &Shader("sphere"));
    }

    let moved = *driver.camera().state();
    assert_ne!(moved.yaw, 0.0);
    assert_eq!(moved.radius, DEFAULT_RADIUS + 4.0);
    assert_ne!(moved.pan, Vec2::ZERO);

    driver.switch(2).unwrap();

    let frame = driver
        .prepare(&mut input, t0 + Duration::from_millis(48), (640, 480))
        .unwrap();
    assert_eq!(frame.index, 2);
    assert_eq!(frame.pipeline, &Shader("mandelbulb"));
    assert_eq!(frame.camera.ray_origin, [0.0, 0.0, DEFAULT_RADIUS, 0.0]);
    assert_eq!(frame.camera.pan_offset, [0.0; 4]);
    assert_eq!(frame.camera.rotation_offset, [0.0; 4]);
    assert_eq!(input.polls, 3);
}

#[test]
fn failed_switch_keeps_the_current_pipeline() {
    let t0 = Instant::now();
    let mut driver = running_driver(t0);
    driver.switch(1).unwrap();

    assert_eq!(
        driver.switch(3),
        Err(RenderError::PipelineIndex { index: 3, count: 3 })
    );
    assert_eq!(driver.active_pipeline(), Some(&Shader("torus")));
    assert_eq!(driver.phase(), RendererPhase::Running);
}

#[test]
fn accumulator_feeds_the_driver_once_per_frame() {
    let t0 = Instant::now();
    let mut driver = running_driver(t0);
    let mut acc = InputAccumulator::new();
    let modifiers = Modifiers::default();

    acc.handle(&InputEvent::PointerButton(PointerButtonEvent {
        button: MouseButton::Left,
        state: MouseButtonState::Pressed,
        pos: Some((100.0, 100.0)),
        modifiers,
    }));
    acc.handle(&InputEvent::PointerMoved(PointerMoveEvent { x: 110.0, y: 95.0 }));
    acc.handle(&InputEvent::PointerMoved(PointerMoveEvent { x: 130.0, y: 90.0 }));
    acc.handle(&InputEvent::MouseWheel {
        delta: MouseWheelDelta::Line { x: 0.0, y: -3.0 },
        modifiers,
    });

    driver
        .prepare(&mut acc, t0 + Duration::from_millis(16), (640, 480))
        .unwrap();
    let after_first = *driver.camera().state();
    assert_eq!(after_first.radius, DEFAULT_RADIUS - 1.0);
    assert!(after_first.yaw > 0.0);

    // Nothing new arrived: the second frame must not re-apply the same deltas.
    driver
        .prepare(&mut acc, t0 + Duration::from_millis(32), (640, 480))
        .unwrap();
    assert_eq!(*driver.camera().state(), after_first);
    assert!(acc.primary_held());
}

#[test]
fn nothing_is_drained_before_start() {
    let mut driver: FrameDriver<Shader> = FrameDriver::new(CameraConfig::default());
    let mut input = ScriptedInput::new(vec![InputSnapshot {
        zoom: 1,
        ..InputSnapshot::default()
    }]);

    assert!(driver.prepare(&mut input, Instant::now(), (1, 1)).is_none());
    driver.device_ready().unwrap();
    driver.register(vec![Shader("only")]).unwrap();
    assert!(driver.prepare(&mut input, Instant::now(), (1, 1)).is_none());
    assert_eq!(input.polls, 0);

    driver.start().unwrap();
    assert!(driver.prepare(&mut input, Instant::now(), (1, 1)).is_some());
    assert_eq!(input.polls, 1);
}
