//! Record header and wire link types.

use serde::{Deserialize, Serialize};

use crate::components::Component;
use crate::error::{EwireError, Result};
use crate::network::{Quat, Transform, Vec3};
use crate::wire::Wire;

/// First line of every record: what to build and where to put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeader {
    pub object_name: String,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub rotation_w: f32,
}

impl RecordHeader {
    pub fn new(object_name: impl Into<String>, transform: &Transform) -> Self {
        let Transform { position, rotation } = *transform;
        Self {
            object_name: object_name.into(),
            position_x: position.x,
            position_y: position.y,
            position_z: position.z,
            rotation_x: rotation.x,
            rotation_y: rotation.y,
            rotation_z: rotation.z,
            rotation_w: rotation.w,
        }
    }

    /// Parse a header line. `line` is the 1-indexed line number for errors.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| EwireError::MalformedHeader { line, source })
    }

    /// Encode as a single line of JSON.
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn transform(&self) -> Transform {
        Transform::new(
            Vec3::new(self.position_x, self.position_y, self.position_z),
            Quat::new(self.rotation_x, self.rotation_y, self.rotation_z, self.rotation_w),
        )
    }
}

impl Component {
    /// Header describing this component.
    pub fn header(&self) -> RecordHeader {
        RecordHeader::new(&self.object_name, &self.transform)
    }

    /// Header line written to save files.
    pub fn header_line(&self) -> Result<String> {
        self.header().to_line()
    }
}

impl Wire {
    /// Header describing this wire.
    pub fn header(&self) -> RecordHeader {
        RecordHeader::new(&self.object_name, &self.transform)
    }

    /// Header line written to save files.
    pub fn header_line(&self) -> Result<String> {
        self.header().to_line()
    }
}

/// Payload of a wire record.
///
/// Each end is `[ordinal, slot]`, where `ordinal` is the position of the
/// component record in the file, or `null` when the end is unattached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireLinks {
    pub source: Option<(usize, usize)>,
    pub sink: Option<(usize, usize)>,
}

impl WireLinks {
    /// Parse a wire payload. An empty payload is a wire with no ends attached.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
    }

    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_header_field_names() {
        let header = RecordHeader::new("GateAND", &Transform::at(1.0, 2.5, -3.0));
        let line = header.to_line().unwrap();
        assert_eq!(
            line,
            r#"{"objectName":"GateAND","positionX":1.0,"positionY":2.5,"positionZ":-3.0,"rotationX":0.0,"rotationY":0.0,"rotationZ":0.0,"rotationW":1.0}"#
        );
    }

    #[test]
    fn test_header_parse() {
        let line = r#"{"objectName":"Lamp","positionX":0.25,"positionY":1,"positionZ":0,"rotationX":0,"rotationY":0.7071068,"rotationZ":0,"rotationW":0.7071068}"#;
        let header = RecordHeader::parse(line, 3).unwrap();
        assert_eq!(header.object_name, "Lamp");
        let t = header.transform();
        assert_relative_eq!(t.position.x, 0.25);
        assert_relative_eq!(t.position.y, 1.0);
        assert_relative_eq!(t.rotation.y, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_header_schema_mismatch() {
        let err = RecordHeader::parse(r#"{"objectName":"Lamp","positionX":0}"#, 7).unwrap_err();
        assert!(matches!(err, EwireError::MalformedHeader { line: 7, .. }));
        assert!(RecordHeader::parse("Lamp 0 0 0", 1).is_err());
    }

    #[test]
    fn test_wire_links() {
        let links = WireLinks {
            source: Some((0, 1)),
            sink: None,
        };
        assert_eq!(links.to_line().unwrap(), r#"{"source":[0,1],"sink":null}"#);
        assert_eq!(WireLinks::parse(r#"{"source":[0,1],"sink":null}"#).unwrap(), links);
        assert_eq!(WireLinks::parse("").unwrap(), WireLinks::default());
        assert!(WireLinks::parse(r#"{"source":"zero"}"#).is_err());
    }
}
