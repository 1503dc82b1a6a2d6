//! JSON-lines replay files
//!
//! One record per line, tagged by `kind`:
//!
//! ```text
//! {"kind":"device_location","values":[0.0,0.0,500.0]}
//! {"kind":"accelerometer","values":[0.1,0.2,9.8]}
//! {"kind":"magnetic_field","values":[0.0,22.0,-40.0]}
//! {"kind":"rotation_vector","values":[0.0,0.0,0.38]}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sightline_core::{ControllerHandle, Point3, SensorSample};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ReplayRecord {
    Accelerometer([f64; 3]),
    MagneticField([f64; 3]),
    RotationVector([f64; 3]),
    DeviceLocation(Point3),
    TargetLocation(Point3),
}

impl ReplayRecord {
    /// Parse one line; `None` for blanks and comments
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(trimmed)?))
    }

    pub fn as_sample(&self) -> Option<SensorSample> {
        match *self {
            ReplayRecord::Accelerometer(v) => Some(SensorSample::accelerometer(v)),
            ReplayRecord::MagneticField(v) => Some(SensorSample::magnetic_field(v)),
            ReplayRecord::RotationVector(v) => Some(SensorSample::rotation_vector(v)),
            ReplayRecord::DeviceLocation(_) | ReplayRecord::TargetLocation(_) => None,
        }
    }

    /// Forward to the controller task
    pub fn apply(&self, handle: &ControllerHandle) -> sightline_core::error::Result<()> {
        match *self {
            ReplayRecord::DeviceLocation(p) => handle.set_device_location(p),
            ReplayRecord::TargetLocation(p) => handle.set_target_location(p),
            _ => match self.as_sample() {
                Some(sample) => handle.send_sample(sample),
                None => Ok(()),
            },
        }
    }
}

pub fn parse_records(content: &str) -> Result<Vec<ReplayRecord>> {
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let record = ReplayRecord::parse_line(line)
            .with_context(|| format!("Invalid replay record on line {}", index + 1))?;
        records.extend(record);
    }
    Ok(records)
}

pub fn load(path: &Path) -> Result<Vec<ReplayRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay file {}", path.display()))?;
    parse_records(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::SensorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_every_kind() {
        let content = r#"
# device first
{"kind":"device_location","values":[0.0,0.0,500.0]}
{"kind":"target_location","values":[150.0,600.0,220.0]}
{"kind":"accelerometer","values":[0.0,0.0,9.8]}

{"kind":"magnetic_field","values":[0.0,22.0,-40.0]}
{"kind":"rotation_vector","values":[0.0,0.0,0.5]}
"#;
        let records = parse_records(content).unwrap();
        assert_eq!(
            records,
            vec![
                ReplayRecord::DeviceLocation(Point3::new(0.0, 0.0, 500.0)),
                ReplayRecord::TargetLocation(Point3::new(150.0, 600.0, 220.0)),
                ReplayRecord::Accelerometer([0.0, 0.0, 9.8]),
                ReplayRecord::MagneticField([0.0, 22.0, -40.0]),
                ReplayRecord::RotationVector([0.0, 0.0, 0.5]),
            ]
        );
    }

    #[test]
    fn test_samples_and_locations_split() {
        let sample = ReplayRecord::MagneticField([1.0, 2.0, 3.0]).as_sample().unwrap();
        assert_eq!(sample.kind, SensorKind::MagneticField);
        assert!(ReplayRecord::TargetLocation(Point3::ORIGIN).as_sample().is_none());
    }

    #[test]
    fn test_error_names_the_line() {
        let content = concat!(
            r#"{"kind":"accelerometer","values":[0,0,9.8]}"#,
            "\n",
            r#"{"kind":"gyroscope","values":[0,0,0]}"#,
            "\n",
        );
        let err = parse_records(content).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let line = r#"{"kind":"accelerometer","values":[1.0,2.0]}"#;
        assert!(ReplayRecord::parse_line(line).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"kind":"rotation_vector","values":[0.0,0.0,0.0]}}"#).unwrap();
        writeln!(file, r#"{{"kind":"device_location","values":[1.0,2.0,3.0]}}"#).unwrap();

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], ReplayRecord::DeviceLocation(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/sightline-replay.jsonl")).unwrap_err();
        assert!(err.to_string().contains("Failed to read replay file"));
    }
}
