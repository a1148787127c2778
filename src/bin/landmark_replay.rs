// src/bin/landmark_replay.rs - Feed a recorded landmark stream through the interpreter
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gesture_controller::replay::load_recording;
use gesture_controller::{GestureAction, GestureConfig, GestureInterpreter, RecordingActuator};

const SCREEN_WIDTH: u32 = 1920;
const SCREEN_HEIGHT: u32 = 1080;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

fn action_kind(action: &GestureAction) -> &'static str {
    match action {
        GestureAction::Screenshot(_) => "screenshot",
        GestureAction::RightClick => "right_click",
        GestureAction::LeftClick => "left_click",
        GestureAction::ScrollUp => "scroll_up",
        GestureAction::ScrollDown => "scroll_down",
        GestureAction::DragStart => "drag_start",
        GestureAction::DragEnd => "drag_end",
        GestureAction::MoveCursor { .. } => "move_cursor",
        GestureAction::SwipeRight => "swipe_right",
        GestureAction::SwipeLeft => "swipe_left",
        GestureAction::ZoomIn => "zoom_in",
        GestureAction::ZoomOut => "zoom_out",
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        bail!("usage: {} <recording.jsonl>", args.first().map(String::as_str).unwrap_or("landmark_replay"));
    };

    let frames = load_recording(path).with_context(|| format!("Failed to load {}", path))?;
    info!(frames = frames.len(), path = %path, "recording loaded");

    let actuator = RecordingActuator::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut interpreter = GestureInterpreter::new(GestureConfig::default(), actuator);

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut now = Instant::now();
    for frame in &frames {
        let outcome = interpreter.process_frame(frame, now);
        for action in &outcome.actions {
            *counts.entry(action_kind(action)).or_default() += 1;
        }
        now += FRAME_INTERVAL;
    }
    for action in &interpreter.finish().actions {
        *counts.entry(action_kind(action)).or_default() += 1;
    }

    println!("Replayed {} frame(s) from {}", frames.len(), path);
    if counts.is_empty() {
        println!("  no actions");
    }
    for (kind, count) in &counts {
        println!("  {:<12} {}", kind, count);
    }
    println!("  {} actuator command(s)", interpreter.actuator().commands().len());

    Ok(())
}
