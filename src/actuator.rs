// src/actuator.rs - Output boundary toward the OS input layer
use std::path::PathBuf;

use tracing::debug;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Alt,
    Shift,
    Tab,
    Control,
}

/// One discrete command for the input collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCommand {
    /// Absolute screen pixel position.
    MoveCursor { x: i32, y: i32 },
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Click(MouseButton),
    /// Positive scrolls up.
    Scroll(i32),
    ModifierScroll { modifier: Key, amount: i32 },
    /// Pressed in order, released in reverse.
    Hotkey(Vec<Key>),
    SaveScreenshot(PathBuf),
}

pub trait InputActuator {
    /// Screen size in pixels, queried once at interpreter construction.
    fn screen_size(&self) -> (u32, u32);

    fn execute(&mut self, command: &ActuatorCommand) -> Result<(), ActuatorError>;
}

/// Keeps every command in memory instead of touching the OS.
#[derive(Debug, Clone)]
pub struct RecordingActuator {
    screen: (u32, u32),
    commands: Vec<ActuatorCommand>,
}

impl RecordingActuator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: (width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[ActuatorCommand] {
        &self.commands
    }
}

impl InputActuator for RecordingActuator {
    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn execute(&mut self, command: &ActuatorCommand) -> Result<(), ActuatorError> {
        debug!(?command, "recorded");
        self.commands.push(command.clone());
        Ok(())
    }
}

impl<A: InputActuator + ?Sized> InputActuator for Box<A> {
    fn screen_size(&self) -> (u32, u32) {
        (**self).screen_size()
    }

    fn execute(&mut self, command: &ActuatorCommand) -> Result<(), ActuatorError> {
        (**self).execute(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order() {
        let mut actuator = RecordingActuator::new(800, 600);
        actuator.execute(&ActuatorCommand::ButtonDown(MouseButton::Left)).unwrap();
        actuator.execute(&ActuatorCommand::MoveCursor { x: 10, y: 20 }).unwrap();
        actuator.execute(&ActuatorCommand::ButtonUp(MouseButton::Left)).unwrap();

        assert_eq!(actuator.screen_size(), (800, 600));
        assert_eq!(actuator.commands().len(), 3);
        assert!(matches!(
            actuator.commands()[1],
            ActuatorCommand::MoveCursor { x: 10, y: 20 }
        ));
    }

    #[test]
    fn test_boxed_trait_object() {
        let mut actuator: Box<dyn InputActuator> = Box::new(RecordingActuator::new(1920, 1080));
        assert_eq!(actuator.screen_size(), (1920, 1080));
        assert!(actuator
            .execute(&ActuatorCommand::Hotkey(vec![Key::Alt, Key::Tab]))
            .is_ok());
    }
}
