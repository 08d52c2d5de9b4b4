use crate::error::ValidationError;

/// Unit of the pixels-per-unit values in a `pHYs` chunk.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Unit {
    /// Only the aspect ratio is defined.
    Unknown = 0,
    /// Pixels per meter.
    Meter = 1,
}

impl TryFrom<u8> for Unit {
    type Error = ValidationError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Meter),
            value => Err(ValidationError::UnknownUnit(value)),
        }
    }
}

/// Physical pixel dimensions, the data of a `pHYs` chunk.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PhysicalDimensions {
    /// Pixels per unit along the X axis.
    pub x: u32,
    /// Pixels per unit along the Y axis.
    pub y: u32,
    /// Unit of `x` and `y`.
    pub unit: Unit,
}

impl PhysicalDimensions {
    /// Size of the `pHYs` data in bytes.
    pub const SIZE: usize = 9;

    /// Square pixels at `ppm` pixels per meter.
    ///
    /// `ppm` is rounded to the nearest integer (halves away from zero) and
    /// saturated into the `u32` range.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::{PhysicalDimensions, Unit};
    ///
    /// // 72 DPI
    /// let phys = PhysicalDimensions::from_pixels_per_meter(72.0 / 0.0254);
    /// assert_eq!((phys.x, phys.y, phys.unit), (2835, 2835, Unit::Meter));
    /// assert_eq!(phys.to_bytes(), [0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1]);
    /// ```
    #[inline]
    pub fn from_pixels_per_meter(ppm: f64) -> Self {
        let ppm = ppm.round() as u32;
        Self {
            x: ppm,
            y: ppm,
            unit: Unit::Meter,
        }
    }

    /// Encodes as `pHYs` data: X and Y as big-endian `u32`, then the unit byte.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 9] {
        let mut data = [0; Self::SIZE];
        data[0..4].copy_from_slice(&self.x.to_be_bytes());
        data[4..8].copy_from_slice(&self.y.to_be_bytes());
        data[8] = self.unit as u8;
        data
    }

    /// Decodes the first 9 bytes of `pHYs` data.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PhysTooShort`] for short data and
    /// [`ValidationError::UnknownUnit`] for a unit byte other than 0 or 1.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        let Some(([x0, x1, x2, x3, y0, y1, y2, y3, unit], _)) =
            bytes.split_first_chunk::<{ Self::SIZE }>()
        else {
            return Err(ValidationError::PhysTooShort(bytes.len()));
        };
        Ok(Self {
            x: u32::from_be_bytes([*x0, *x1, *x2, *x3]),
            y: u32::from_be_bytes([*y0, *y1, *y2, *y3]),
            unit: Unit::try_from(*unit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(PhysicalDimensions::from_pixels_per_meter(3779.4).x, 3779);
        assert_eq!(PhysicalDimensions::from_pixels_per_meter(3779.5).x, 3780);
    }

    #[test]
    fn saturates() {
        assert_eq!(PhysicalDimensions::from_pixels_per_meter(-5.0).x, 0);
        assert_eq!(
            PhysicalDimensions::from_pixels_per_meter(1e12).x,
            u32::MAX
        );
    }

    #[test]
    fn bytes_layout() {
        let phys = PhysicalDimensions::from_pixels_per_meter(1.0);
        assert_eq!(phys.to_bytes(), [0, 0, 0, 1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn decode() {
        let phys =
            PhysicalDimensions::try_from_bytes(&[0, 0, 0x0B, 0x13, 0, 0, 0x0E, 0xC4, 0]).unwrap();
        assert_eq!(phys.x, 2835);
        assert_eq!(phys.y, 3780);
        assert_eq!(phys.unit, Unit::Unknown);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            PhysicalDimensions::try_from_bytes(&[0; 8]),
            Err(ValidationError::PhysTooShort(8))
        );
        assert_eq!(
            PhysicalDimensions::try_from_bytes(&[0, 0, 0, 1, 0, 0, 0, 1, 7]),
            Err(ValidationError::UnknownUnit(7))
        );
    }
}
