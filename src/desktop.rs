// src/desktop.rs - OS cursor and keyboard injection plus screen capture
use std::path::Path;

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use tracing::{debug, info};
use xcap::Monitor;

use gesture_controller::{ActuatorCommand, ActuatorError, InputActuator, Key, MouseButton};

pub struct EnigoActuator {
    enigo: Enigo,
    screen: (u32, u32),
}

impl EnigoActuator {
    pub fn new() -> Result<Self, ActuatorError> {
        let enigo = Enigo::new(&Settings::default()).map_err(backend)?;
        let (width, height) = enigo.main_display().map_err(backend)?;
        info!(width, height, "main display");

        Ok(Self {
            enigo,
            screen: (width.max(0) as u32, height.max(0) as u32),
        })
    }

    fn press_keys(&mut self, keys: &[Key]) -> Result<(), ActuatorError> {
        for key in keys {
            self.enigo.key(map_key(*key), Direction::Press).map_err(backend)?;
        }
        for key in keys.iter().rev() {
            self.enigo.key(map_key(*key), Direction::Release).map_err(backend)?;
        }
        Ok(())
    }

    fn modifier_scroll(&mut self, modifier: Key, amount: i32) -> Result<(), ActuatorError> {
        self.enigo.key(map_key(modifier), Direction::Press).map_err(backend)?;
        let scrolled = self.enigo.scroll(-amount, Axis::Vertical).map_err(backend);
        // Release even when the scroll failed so the modifier is not left held.
        self.enigo.key(map_key(modifier), Direction::Release).map_err(backend)?;
        scrolled
    }
}

impl InputActuator for EnigoActuator {
    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn execute(&mut self, command: &ActuatorCommand) -> Result<(), ActuatorError> {
        match command {
            ActuatorCommand::MoveCursor { x, y } => {
                self.enigo.move_mouse(*x, *y, Coordinate::Abs).map_err(backend)
            }
            ActuatorCommand::ButtonDown(button) => {
                self.enigo.button(map_button(*button), Direction::Press).map_err(backend)
            }
            ActuatorCommand::ButtonUp(button) => {
                self.enigo.button(map_button(*button), Direction::Release).map_err(backend)
            }
            ActuatorCommand::Click(button) => {
                self.enigo.button(map_button(*button), Direction::Click).map_err(backend)
            }
            // enigo scrolls down for positive lengths
            ActuatorCommand::Scroll(amount) => {
                self.enigo.scroll(-amount, Axis::Vertical).map_err(backend)
            }
            ActuatorCommand::ModifierScroll { modifier, amount } => {
                self.modifier_scroll(*modifier, *amount)
            }
            ActuatorCommand::Hotkey(keys) => self.press_keys(keys),
            ActuatorCommand::SaveScreenshot(path) => save_screenshot(path),
        }
    }
}

fn save_screenshot(path: &Path) -> Result<(), ActuatorError> {
    let monitors = Monitor::all().map_err(|e| ActuatorError::Capture(e.to_string()))?;
    let monitor = monitors
        .into_iter()
        .find(|m| m.is_primary())
        .ok_or_else(|| ActuatorError::Capture("no primary monitor".to_string()))?;

    let image = monitor
        .capture_image()
        .map_err(|e| ActuatorError::Capture(e.to_string()))?;

    image.save(path).map_err(|e| ActuatorError::Save {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), "screenshot written");
    Ok(())
}

fn map_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
    }
}

fn map_key(key: Key) -> enigo::Key {
    match key {
        Key::Alt => enigo::Key::Alt,
        Key::Shift => enigo::Key::Shift,
        Key::Tab => enigo::Key::Tab,
        Key::Control => enigo::Key::Control,
    }
}

fn backend(e: impl std::fmt::Display) -> ActuatorError {
    ActuatorError::Backend(e.to_string())
}
