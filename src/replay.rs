// src/replay.rs - Recorded landmark streams, one JSON frame per line
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::error::ReplayError;
use crate::landmarks::{Frame, HandObservation};

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub hands: Vec<Vec<[f64; 2]>>,
}

impl RecordedFrame {
    pub fn into_frame(self) -> Result<Frame, crate::error::LandmarkError> {
        let hands = self
            .hands
            .iter()
            .map(|points| HandObservation::from_xy(points))
            .collect::<Result<Vec<_>, _>>()?;
        Frame::new(hands, self.width, self.height)
    }
}

pub fn parse_recording(reader: impl BufRead) -> Result<Vec<Frame>, ReplayError> {
    let mut frames = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let number = i + 1;
        let recorded: RecordedFrame = serde_json::from_str(&line)
            .map_err(|source| ReplayError::Parse { line: number, source })?;
        let frame = recorded
            .into_frame()
            .map_err(|source| ReplayError::InvalidFrame { line: number, source })?;
        frames.push(frame);
    }
    Ok(frames)
}

pub fn load_recording(path: impl AsRef<Path>) -> Result<Vec<Frame>, ReplayError> {
    let file = File::open(path.as_ref())?;
    parse_recording(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LandmarkError;

    fn hand_json(x: f64) -> String {
        let points: Vec<String> = (0..21).map(|_| format!("[{x},0.5]")).collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn test_parse_frames_and_skip_blank_lines() {
        let input = format!(
            "{{\"width\":640,\"height\":480,\"hands\":[]}}\n\n{{\"width\":640,\"height\":480,\"hands\":[{},{}]}}\n",
            hand_json(0.2),
            hand_json(0.8)
        );
        let frames = parse_recording(input.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].hands().is_empty());
        assert_eq!(frames[1].hands().len(), 2);
        assert_eq!(frames[1].hands()[1].landmark(0).x, 0.8);
        assert_eq!(frames[1].width(), 640);
    }

    #[test]
    fn test_missing_hands_field_is_empty() {
        let frames = parse_recording("{\"width\":320,\"height\":240}".as_bytes()).unwrap();
        assert!(frames[0].hands().is_empty());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let input = "{\"width\":640,\"height\":480}\nnot json\n";
        match parse_recording(input.as_bytes()) {
            Err(ReplayError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_hand_rejected() {
        let input = "{\"width\":640,\"height\":480,\"hands\":[[[0.1,0.1]]]}";
        match parse_recording(input.as_bytes()) {
            Err(ReplayError::InvalidFrame { line, source }) => {
                assert_eq!(line, 1);
                assert_eq!(source, LandmarkError::WrongLandmarkCount(1));
            }
            other => panic!("expected invalid frame, got {:?}", other),
        }
    }
}
