use crate::foundation::core::Point;
use crate::foundation::error::{InkError, InkResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One recorded pen sample.
///
/// Wire names follow the recorder format: pressure is `p`, timestamp is `t`. Extra recorder fields
/// (tilt, azimuth, velocity, ...) are accepted and dropped.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokePoint {
    /// Horizontal position in recorder units.
    pub x: f64,
    /// Vertical position in recorder units (y grows downwards).
    pub y: f64,
    /// Pen pressure. Absent, `null`, `0` and booleans all load as `1.0`.
    #[serde(
        rename = "p",
        default = "default_pressure",
        deserialize_with = "deserialize_pressure"
    )]
    pub pressure: f64,
    /// Capture time in seconds, if recorded.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Whether the pen touched the surface. Defaults to `true`.
    #[serde(default = "default_pen_down", deserialize_with = "deserialize_pen_down")]
    pub pen_down: bool,
}

impl StrokePoint {
    /// A pen-down point with default pressure and no timestamp.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: default_pressure(),
            timestamp: None,
            pen_down: true,
        }
    }

    /// Return a copy with the given pressure.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Return a copy with the given timestamp.
    pub fn with_timestamp(mut self, t: f64) -> Self {
        self.timestamp = Some(t);
        self
    }

    /// Position as a geometric point.
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One pen-down-to-pen-up motion. Point order is temporal.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Recorder-assigned identifier, kept verbatim (usually an integer).
    #[serde(rename = "stroke_id", default)]
    pub id: serde_json::Value,
    /// Points in capture order.
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    /// Build a stroke from an id and its points.
    pub fn new(id: impl Into<serde_json::Value>, points: Vec<StrokePoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    /// `true` when the stroke has enough points to draw a curve.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A complete handwriting sample as produced by the recorder.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Ground-truth text for the sample.
    pub label: String,
    /// ISO-8601-like capture time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Recording device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Strokes in drawing order.
    pub strokes: Vec<Stroke>,
}

impl Sample {
    /// Build a sample with no timestamp or device.
    pub fn new(label: impl Into<String>, strokes: Vec<Stroke>) -> Self {
        Self {
            label: label.into(),
            timestamp: None,
            device: None,
            strokes,
        }
    }

    /// Parse a sample from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> InkResult<Self> {
        serde_json::from_reader(r).map_err(|e| InkError::malformed(e.to_string()))
    }

    /// Parse a sample from an in-memory JSON buffer.
    pub fn from_slice(bytes: &[u8]) -> InkResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| InkError::malformed(e.to_string()))
    }

    /// Parse a sample from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> InkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| InkError::input_io(path, e))?;
        Self::from_reader(BufReader::new(f)).map_err(|e| match e {
            InkError::MalformedDocument(msg) => {
                InkError::malformed(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Strokes that contribute ink, in drawing order.
    pub fn renderable_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().filter(|s| s.is_renderable())
    }
}

fn default_pressure() -> f64 {
    1.0
}

fn default_pen_down() -> bool {
    true
}

fn deserialize_pressure<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    use serde::de::Error as _;

    match Option::<serde_json::Value>::deserialize(de)? {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(_)) => {
            Ok(default_pressure())
        }
        Some(serde_json::Value::Number(n)) => {
            let v = n
                .as_f64()
                .ok_or_else(|| D::Error::custom("pressure is not representable as f64"))?;
            Ok(if v == 0.0 { default_pressure() } else { v })
        }
        Some(other) => Err(D::Error::custom(format!(
            "pressure must be a number, boolean or null, got {other}"
        ))),
    }
}

fn deserialize_pen_down<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    Ok(Option::<bool>::deserialize(de)?.unwrap_or_else(default_pen_down))
}

#[cfg(test)]
#[path = "../../tests/unit/sample/model.rs"]
mod tests;
