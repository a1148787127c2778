// src/interpreter.rs - Per-frame gesture state machine
//
// One call to `process_frame` per captured image. Two hands drive zoom only;
// one hand runs the ordered single-hand rules against an immutable snapshot.
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use nalgebra::Point2;
use tracing::{debug, info, warn};

use crate::actuator::{ActuatorCommand, InputActuator, Key, MouseButton};
use crate::config::GestureConfig;
use crate::fingers::FingerState;
use crate::landmarks::{Frame, HandObservation, INDEX_TIP, WRIST};
use crate::smoothing::CursorSmoother;
use crate::zoom::{ZoomDirection, ZoomTracker};

#[derive(Debug, Clone, PartialEq)]
pub enum GestureAction {
    Screenshot(PathBuf),
    RightClick,
    LeftClick,
    ScrollUp,
    ScrollDown,
    DragStart,
    DragEnd,
    MoveCursor { x: i32, y: i32 },
    SwipeRight,
    SwipeLeft,
    ZoomIn,
    ZoomOut,
}

impl GestureAction {
    /// Overlay text shown while the action fires.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Screenshot(_) => Some("Screenshot Saved!"),
            Self::RightClick => Some("Right Click"),
            Self::LeftClick => Some("Left Click"),
            Self::ScrollUp => Some("Scroll Up"),
            Self::ScrollDown => Some("Scroll Down"),
            Self::SwipeRight => Some("Swipe Right"),
            Self::SwipeLeft => Some("Swipe Left"),
            Self::ZoomIn => Some("Zoom In"),
            Self::ZoomOut => Some("Zoom Out"),
            Self::DragStart | Self::DragEnd | Self::MoveCursor { .. } => None,
        }
    }

    pub fn command(&self, config: &GestureConfig) -> ActuatorCommand {
        match self {
            Self::Screenshot(path) => ActuatorCommand::SaveScreenshot(path.clone()),
            Self::RightClick => ActuatorCommand::Click(MouseButton::Right),
            Self::LeftClick => ActuatorCommand::Click(MouseButton::Left),
            Self::ScrollUp => ActuatorCommand::Scroll(config.scroll_amount),
            Self::ScrollDown => ActuatorCommand::Scroll(-config.scroll_amount),
            Self::DragStart => ActuatorCommand::ButtonDown(MouseButton::Left),
            Self::DragEnd => ActuatorCommand::ButtonUp(MouseButton::Left),
            Self::MoveCursor { x, y } => ActuatorCommand::MoveCursor { x: *x, y: *y },
            Self::SwipeRight => ActuatorCommand::Hotkey(vec![Key::Alt, Key::Tab]),
            Self::SwipeLeft => ActuatorCommand::Hotkey(vec![Key::Alt, Key::Shift, Key::Tab]),
            Self::ZoomIn => ActuatorCommand::ModifierScroll {
                modifier: Key::Control,
                amount: config.zoom_scroll,
            },
            Self::ZoomOut => ActuatorCommand::ModifierScroll {
                modifier: Key::Control,
                amount: -config.zoom_scroll,
            },
        }
    }
}

/// What one frame produced, in firing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub actions: Vec<GestureAction>,
    pub label: Option<&'static str>,
}

/// Frame-count cooldown. Arming skips the decrement of the same frame.
#[derive(Debug, Clone, Copy, Default)]
struct Cooldown {
    remaining: u32,
    armed_this_frame: bool,
}

impl Cooldown {
    fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    fn arm(&mut self, frames: u32) {
        self.remaining = frames;
        self.armed_this_frame = true;
    }

    fn tick(&mut self) {
        if self.armed_this_frame {
            self.armed_this_frame = false;
        } else {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }
}

/// Ignores click patterns until a monotonic deadline passes.
#[derive(Debug, Clone, Copy, Default)]
struct SettleGuard {
    until: Option<Instant>,
}

impl SettleGuard {
    fn is_open(&self, now: Instant) -> bool {
        self.until.map_or(true, |until| now >= until)
    }

    fn arm(&mut self, now: Instant, settle: Duration) {
        self.until = Some(now + settle);
    }
}

#[derive(Debug)]
pub struct InterpreterState {
    dragging: bool,
    smoother: CursorSmoother,
    zoom: ZoomTracker,
    swipe_cooldown: Cooldown,
    swipe_baseline: Option<i32>,
    screenshot_cooldown: Cooldown,
    click_guard: SettleGuard,
}

impl InterpreterState {
    fn new(config: &GestureConfig, screen_width: u32, screen_height: u32) -> Self {
        Self {
            dragging: false,
            smoother: CursorSmoother::new(config.smoothing, screen_width, screen_height),
            zoom: ZoomTracker::new(config.zoom_threshold),
            swipe_cooldown: Cooldown::default(),
            swipe_baseline: None,
            screenshot_cooldown: Cooldown::default(),
            click_guard: SettleGuard::default(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn cursor(&self) -> Point2<f64> {
        self.smoother.position()
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom.is_active()
    }

    pub fn zoom_baseline(&self) -> Option<f64> {
        self.zoom.baseline()
    }

    pub fn swipe_cooldown(&self) -> u32 {
        self.swipe_cooldown.remaining
    }

    pub fn swipe_baseline(&self) -> Option<i32> {
        self.swipe_baseline
    }

    pub fn screenshot_cooldown(&self) -> u32 {
        self.screenshot_cooldown.remaining
    }
}

/// Read-only view of one single-hand frame shared by every rule.
struct Snapshot {
    fingers: FingerState,
    pinch: f64,
    index_tip: Point2<f64>,
    wrist_x: i32,
    now: Instant,
}

impl Snapshot {
    fn new(hand: &HandObservation, frame: &Frame, config: &GestureConfig, now: Instant) -> Self {
        Self {
            fingers: FingerState::classify_with(hand, config.thumb_extended_deg),
            pinch: hand.pinch_distance(),
            index_tip: *hand.landmark(INDEX_TIP),
            wrist_x: frame.to_pixel(hand.landmark(WRIST)).0,
            now,
        }
    }
}

/// Sends fired actions to the actuator and collects them for the caller.
struct Emitter<'a> {
    config: &'a GestureConfig,
    actuator: &'a mut dyn InputActuator,
    outcome: &'a mut FrameOutcome,
}

impl Emitter<'_> {
    fn fire(&mut self, action: GestureAction) {
        match action {
            GestureAction::MoveCursor { x, y } => debug!(x, y, "cursor"),
            _ => info!(?action, "gesture"),
        }

        let command = action.command(self.config);
        if let Err(e) = self.actuator.execute(&command) {
            warn!(?command, "actuator failed: {}", e);
        }

        if let Some(label) = action.label() {
            self.outcome.label = Some(label);
        }
        self.outcome.actions.push(action);
    }

    fn annotate(&mut self, label: &'static str) {
        self.outcome.label = Some(label);
    }
}

type Rule = fn(&mut InterpreterState, &Snapshot, &mut Emitter<'_>);

// Evaluated in order; several may fire in the same frame.
const SINGLE_HAND_RULES: [(&str, Rule); 4] = [
    ("pattern", pattern_rule),
    ("drag", drag_rule),
    ("point", point_rule),
    ("swipe", swipe_rule),
];

pub struct GestureInterpreter<A: InputActuator> {
    config: GestureConfig,
    state: InterpreterState,
    actuator: A,
}

impl<A: InputActuator> GestureInterpreter<A> {
    pub fn new(config: GestureConfig, actuator: A) -> Self {
        let (width, height) = actuator.screen_size();
        info!(width, height, "screen geometry");
        Self {
            state: InterpreterState::new(&config, width, height),
            config,
            actuator,
        }
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn process_frame(&mut self, frame: &Frame, now: Instant) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        let config = &self.config;
        let state = &mut self.state;
        let mut out = Emitter {
            config,
            actuator: &mut self.actuator,
            outcome: &mut outcome,
        };

        match frame.hands() {
            [] => {
                // Idle frame; only the zoom baseline goes stale.
                state.zoom.reset();
            }
            [hand] => {
                state.zoom.reset();
                let snapshot = Snapshot::new(hand, frame, config, now);
                debug!(fingers = ?snapshot.fingers.0, pinch = snapshot.pinch, "single hand");

                for (name, rule) in SINGLE_HAND_RULES.iter() {
                    let fired = out.outcome.actions.len();
                    rule(state, &snapshot, &mut out);
                    if out.outcome.actions.len() > fired {
                        debug!(rule = *name, "fired");
                    }
                }

                state.screenshot_cooldown.tick();
                state.swipe_cooldown.tick();
            }
            [first, second, ..] => match state.zoom.update(first, second) {
                Some(ZoomDirection::In) => out.fire(GestureAction::ZoomIn),
                Some(ZoomDirection::Out) => out.fire(GestureAction::ZoomOut),
                None => {}
            },
        }

        outcome
    }

    /// Release a held drag button when frames stop arriving.
    pub fn finish(&mut self) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if self.state.dragging {
            let mut out = Emitter {
                config: &self.config,
                actuator: &mut self.actuator,
                outcome: &mut outcome,
            };
            out.fire(GestureAction::DragEnd);
            self.state.dragging = false;
        }
        outcome
    }
}

fn screenshot_path(config: &GestureConfig) -> PathBuf {
    config
        .screenshot_dir
        .join(format!("screenshot_{}.png", Utc::now().timestamp()))
}

fn pattern_rule(state: &mut InterpreterState, snap: &Snapshot, out: &mut Emitter<'_>) {
    match snap.fingers.0 {
        [false, false, false, false, false] => {
            if state.screenshot_cooldown.is_ready() {
                let path = screenshot_path(out.config);
                out.fire(GestureAction::Screenshot(path));
                state
                    .screenshot_cooldown
                    .arm(out.config.screenshot_cooldown_frames);
            }
        }
        [true, true, false, false, false] => {
            if !state.dragging && state.click_guard.is_open(snap.now) {
                out.fire(GestureAction::RightClick);
                state.click_guard.arm(snap.now, out.config.click_settle);
            }
        }
        [true, false, true, false, false] => {
            if state.click_guard.is_open(snap.now) {
                out.fire(GestureAction::LeftClick);
                state.click_guard.arm(snap.now, out.config.click_settle);
            }
        }
        [true, false, false, false, true] => out.fire(GestureAction::ScrollUp),
        [false, true, false, false, true] => out.fire(GestureAction::ScrollDown),
        _ => {}
    }
}

fn drag_rule(state: &mut InterpreterState, snap: &Snapshot, out: &mut Emitter<'_>) {
    if snap.pinch < out.config.pinch_threshold {
        if !state.dragging {
            out.fire(GestureAction::DragStart);
            state.dragging = true;
        }
        if let Some((x, y)) = state.smoother.update(snap.index_tip) {
            out.fire(GestureAction::MoveCursor { x, y });
        }
        out.annotate("Dragging");
    } else if state.dragging {
        out.fire(GestureAction::DragEnd);
        state.dragging = false;
    }
}

fn point_rule(state: &mut InterpreterState, snap: &Snapshot, out: &mut Emitter<'_>) {
    let f = &snap.fingers;
    if f.index() && !f.thumb() && !f.pinky() && !state.dragging {
        if let Some((x, y)) = state.smoother.update(snap.index_tip) {
            out.fire(GestureAction::MoveCursor { x, y });
        }
    }
}

fn swipe_rule(state: &mut InterpreterState, snap: &Snapshot, out: &mut Emitter<'_>) {
    if !snap.fingers.all_up() {
        state.swipe_baseline = None;
        return;
    }
    if !state.swipe_cooldown.is_ready() {
        return;
    }

    if let Some(previous) = state.swipe_baseline {
        let dx = snap.wrist_x - previous;
        if dx > out.config.swipe_threshold_px {
            out.fire(GestureAction::SwipeRight);
            state.swipe_cooldown.arm(out.config.swipe_cooldown_frames);
        } else if dx < -out.config.swipe_threshold_px {
            out.fire(GestureAction::SwipeLeft);
            state.swipe_cooldown.arm(out.config.swipe_cooldown_frames);
        }
    }
    state.swipe_baseline = Some(snap.wrist_x);
}
