// src/lib.rs - Gesture interpretation core, independent of capture and display
pub mod actuator;
pub mod config;
pub mod error;
pub mod fingers;
pub mod interpreter;
pub mod landmarks;
pub mod replay;
pub mod smoothing;
pub mod zoom;

pub use actuator::{ActuatorCommand, InputActuator, Key, MouseButton, RecordingActuator};
pub use config::GestureConfig;
pub use error::{ActuatorError, LandmarkError, ReplayError};
pub use fingers::FingerState;
pub use interpreter::{FrameOutcome, GestureAction, GestureInterpreter};
pub use landmarks::{Frame, HandObservation, Landmark};
