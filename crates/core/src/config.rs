use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Rendering parameters that feed into pixel-space geometry math. None of
/// these affect tile math (distance, directions, stepping); they only control
/// how tiles map onto pixels.
///
/// Settings are validated whenever they're handed to a
/// [GeometryEngine](crate::GeometryEngine).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_hex_width"))]
#[serde(default)]
pub struct GeometrySettings {
    /// Width of a single tile sprite, in pixels. Tile positions are built
    /// from half-widths, so this must be even.
    #[validate(range(min = 2))]
    pub map_hex_width: i32,

    /// Vertical distance between two rows of tiles, in pixels. This is
    /// usually smaller than the sprite height since rows overlap.
    #[validate(range(min = 1))]
    pub map_hex_line_height: i32,

    /// Camera tilt, in degrees. 90 is looking straight down, smaller values
    /// tilt the camera towards the horizon. 0 is technically allowed but
    /// makes the vertical projection factor infinite.
    #[validate(range(min = 0.0, max = 90.0))]
    pub map_camera_angle: f32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            map_hex_width: 32,
            map_hex_line_height: 12,
            map_camera_angle: 25.7,
        }
    }
}

fn validate_hex_width(
    settings: &GeometrySettings,
) -> Result<(), ValidationError> {
    if settings.map_hex_width % 2 != 0 {
        return Err(ValidationError::new("map_hex_width_odd"));
    }
    Ok(())
}
