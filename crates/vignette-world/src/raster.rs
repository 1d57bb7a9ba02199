//! Multi-channel source raster for the collision field

use std::path::Path;

use crate::error::WorldError;

/// A square, interleaved multi-channel raster.
///
/// Each channel is one terrain layer (trees, foliage, rocks, ...). Values are
/// raw 8-bit intensities, row-major, `channels` bytes per cell.
#[derive(Debug, Clone)]
pub struct Raster {
    side: u32,
    channels: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap interleaved pixel data.
    pub fn new(side: u32, channels: usize, data: Vec<u8>) -> Result<Self, WorldError> {
        let expected = side as usize * side as usize * channels;
        if data.len() != expected {
            return Err(WorldError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            side,
            channels,
            data,
        })
    }

    /// Wrap RGBA8 pixel data, rejecting non-square images.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, WorldError> {
        if width != height {
            return Err(WorldError::NotSquare { width, height });
        }
        Self::new(width, 4, data)
    }

    /// Load an image file and return it as an RGBA raster.
    pub fn open(path: &Path) -> Result<Self, WorldError> {
        let img = image::open(path)
            .map_err(|e| WorldError::ImageLoadFailed(path.to_path_buf(), e.to_string()))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Side length in cells
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of channels per cell
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of cells (`side * side`)
    pub fn cell_count(&self) -> usize {
        self.side as usize * self.side as usize
    }

    /// Raw value of `channel` at cell `index`
    pub fn value(&self, index: usize, channel: usize) -> u8 {
        self.data[index * self.channels + channel]
    }

    /// Mutable access to one cell's channel, for authoring rasters in code.
    pub fn set(&mut self, col: u32, row: u32, channel: usize, value: u8) {
        let index = row as usize * self.side as usize + col as usize;
        self.data[index * self.channels + channel] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_square() {
        let err = Raster::from_rgba8(4, 2, vec![0; 32]).unwrap_err();
        assert!(matches!(err, WorldError::NotSquare { width: 4, height: 2 }));
    }

    #[test]
    fn test_rejects_short_data() {
        let err = Raster::new(2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(err, WorldError::DataLength { expected: 12, actual: 11 }));
    }

    #[test]
    fn test_set_and_read_back() {
        let mut raster = Raster::new(3, 4, vec![0; 36]).unwrap();
        raster.set(2, 1, 3, 200);
        assert_eq!(raster.value(5, 3), 200);
        assert_eq!(raster.value(5, 0), 0);
        assert_eq!(raster.cell_count(), 9);
    }

    #[test]
    fn test_missing_file() {
        let err = Raster::open(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, WorldError::ImageLoadFailed(..)));
    }
}
