//! Result rendering

use std::sync::Arc;

use anyhow::Result;
use sightline_core::{OrientationObserver, OrientationResult};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn degrees(radians: f64) -> String {
    format!("{:.1} deg", radians.to_degrees())
}

/// One-line human readable summary of a result
pub fn format_text(result: &OrientationResult) -> String {
    format!(
        "[{}] yaw {}  pitch {}  roll {}  azimuth {}  inclination {}  self-check {:.6}",
        result.source,
        degrees(result.yaw),
        degrees(result.pitch),
        degrees(result.roll),
        degrees(result.azimuth),
        degrees(result.inclination),
        result.self_check,
    )
}

pub fn render(result: &OrientationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

/// Observer that writes every result to stdout
pub fn stdout_printer(format: OutputFormat) -> Arc<dyn OrientationObserver> {
    Arc::new(move |result: &OrientationResult| match render(result, format) {
        Ok(line) => println!("{}", line),
        Err(e) => error!("Failed to render result: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::{Point3, SourceTag, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn sample_result() -> OrientationResult {
        OrientationResult {
            source: SourceTag::Raw,
            yaw: 0.0,
            pitch: -0.5f64.to_radians(),
            roll: 0.0,
            azimuth: FRAC_PI_2,
            inclination: 12.34f64.to_radians(),
            self_check: 1.5e-7,
            projection: Point3::new(0.0, 3.0, 0.0),
            target_vector: Vector3::new(0.0, 3.0, 1.0),
        }
    }

    #[test]
    fn test_text_uses_degrees_with_one_decimal() {
        let line = format_text(&sample_result());
        assert_eq!(
            line,
            "[raw] yaw 0.0 deg  pitch -0.5 deg  roll 0.0 deg  azimuth 90.0 deg  inclination 12.3 deg  self-check 0.000000"
        );
    }

    #[test]
    fn test_json_is_a_single_line() {
        let result = sample_result();
        let line = render(&result, OutputFormat::Json).unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["source"], "raw");
        assert_eq!(value["projection"], serde_json::json!([0.0, 3.0, 0.0]));

        let back: OrientationResult = serde_json::from_str(&line).unwrap();
        assert_eq!(back.source, result.source);
        assert!((back.azimuth - result.azimuth).abs() < 1e-12);
    }

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Text);
    }
}
