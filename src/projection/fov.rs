use crate::foundation::core::Mat4;

/// Default near clip distance for [`fov_port_to_projection`].
pub const DEFAULT_Z_NEAR: f32 = 0.01;
/// Default far clip distance for [`fov_port_to_projection`].
pub const DEFAULT_Z_FAR: f32 = 10_000.0;

/// Asymmetric per-eye field of view, as four edge angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldOfView {
    /// Angle between the optical axis and the top frustum edge.
    pub up_degrees: f32,
    /// Angle between the optical axis and the bottom frustum edge.
    pub down_degrees: f32,
    /// Angle between the optical axis and the left frustum edge.
    pub left_degrees: f32,
    /// Angle between the optical axis and the right frustum edge.
    pub right_degrees: f32,
}

impl FieldOfView {
    /// Field of view with the same angle on all four edges.
    pub fn symmetric(degrees: f32) -> Self {
        Self {
            up_degrees: degrees,
            down_degrees: degrees,
            left_degrees: degrees,
            right_degrees: degrees,
        }
    }

    /// Tangent form of this field of view.
    pub fn to_port(self) -> FovPort {
        FovPort {
            up_tan: self.up_degrees.to_radians().tan(),
            down_tan: self.down_degrees.to_radians().tan(),
            left_tan: self.left_degrees.to_radians().tan(),
            right_tan: self.right_degrees.to_radians().tan(),
        }
    }
}

/// Field of view in tangent form: each edge is `tan(angle)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FovPort {
    pub up_tan: f32,
    pub down_tan: f32,
    pub left_tan: f32,
    pub right_tan: f32,
}

impl FovPort {
    /// Right-handed projection with the default clip range.
    pub fn default_projection(self) -> Mat4 {
        fov_port_to_projection(self, Handedness::Right, DEFAULT_Z_NEAR, DEFAULT_Z_FAR)
    }
}

/// Coordinate-system convention for the clip-space forward axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

impl Handedness {
    pub fn from_right_handed(right_handed: bool) -> Self {
        if right_handed {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Sign applied to the offset and depth terms.
    pub fn scale(self) -> f32 {
        match self {
            Self::Right => -1.0,
            Self::Left => 1.0,
        }
    }
}

/// Linear map from frustum edges to normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NdcScaleOffset {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

/// Scale and offset mapping the asymmetric frustum edges onto `[-1, +1]`.
///
/// `left_tan + right_tan` and `up_tan + down_tan` must be non-zero.
pub fn fov_to_ndc_scale_offset(port: FovPort) -> NdcScaleOffset {
    let sx = 2.0 / (port.left_tan + port.right_tan);
    let ox = (port.left_tan - port.right_tan) * sx * 0.5;
    let sy = 2.0 / (port.up_tan + port.down_tan);
    let oy = (port.up_tan - port.down_tan) * sy * 0.5;
    NdcScaleOffset {
        scale: [sx, sy],
        offset: [ox, oy],
    }
}

/// Off-axis perspective projection for a tangent-form field of view.
pub fn fov_port_to_projection(
    port: FovPort,
    handedness: Handedness,
    z_near: f32,
    z_far: f32,
) -> Mat4 {
    let h = handedness.scale();
    let NdcScaleOffset { scale, offset } = fov_to_ndc_scale_offset(port);

    // Row-major scratch; `Mat4` stores columns, so the transpose below puts row `r`
    // of this array into row `r` of the matrix.
    #[rustfmt::skip]
    let m = [
        // X: map clip edges to [-w, +w]
        scale[0], 0.0, offset[0] * h, 0.0,
        // Y: offset negated, NDC Y points down while world Y points up
        0.0, scale[1], -offset[1] * h, 0.0,
        // Z
        0.0, 0.0, z_far / (z_near - z_far) * -h, (z_far * z_near) / (z_near - z_far),
        // W = Z in
        0.0, 0.0, h, 0.0,
    ];

    Mat4::from_cols_array(&m).transpose()
}

/// Off-axis projection for a field of view given in degrees.
pub fn fov_to_projection(
    fov: FieldOfView,
    handedness: Handedness,
    z_near: f32,
    z_far: f32,
) -> Mat4 {
    fov_port_to_projection(fov.to_port(), handedness, z_near, z_far)
}

#[cfg(test)]
#[path = "../../tests/unit/projection/fov.rs"]
mod tests;
