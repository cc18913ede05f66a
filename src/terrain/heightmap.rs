use thiserror::Error;

use crate::coords::Coords;
use crate::terrain::Block;
use crate::terrain::grid::VoxelGrid;

/// Luma levels per block of height.
pub const HEIGHTMAP_STEP: u8 = 16;

#[derive(Debug, Error)]
pub enum HeightmapError {
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
    #[error("Image error when loading '{p}': {e}")]
    ImageError {
        p: std::path::PathBuf,
        e: image::ImageError,
    },
}

impl From<&image::GrayImage> for VoxelGrid {
    /// Stacks `luma / HEIGHTMAP_STEP` surface blocks on every pixel, with
    /// image rows along `z`.
    fn from(img: &image::GrayImage) -> Self {
        let height = |px: &image::Luma<u8>| (px.0[0] / HEIGHTMAP_STEP) as i32;
        let top = img.pixels().map(height).max().unwrap_or(0);

        let mut grid = VoxelGrid::new(
            Coords::new(0, 0, 0),
            Coords::new(img.width() as i32, top.max(1), img.height() as i32),
        );
        for (x, z, px) in img.enumerate_pixels() {
            for y in 0..height(px) {
                grid.set(Coords::new(x as i32, y, z as i32), Block::Surface);
            }
        }
        grid
    }
}

impl std::convert::TryFrom<&std::path::Path> for VoxelGrid {
    type Error = HeightmapError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        use image::ImageReader;

        let img = ImageReader::open(p)
            .map_err(|e| HeightmapError::IOError {
                p: p.to_path_buf(),
                e,
            })?
            .decode()
            .map_err(|e| HeightmapError::ImageError {
                p: p.to_path_buf(),
                e,
            })?
            .into_luma8();

        Ok(VoxelGrid::from(&img))
    }
}

#[cfg(test)]
mod tests {
    use image::GrayImage;
    use image::Luma;

    use super::*;

    fn ramp() -> GrayImage {
        GrayImage::from_fn(4, 2, |x, _| Luma([(x as u8) * HEIGHTMAP_STEP]))
    }

    #[test]
    fn stacks_surfaces() {
        let grid = VoxelGrid::from(&ramp());
        assert_eq!(grid.max(), Coords::new(4, 3, 2));
        assert_eq!(grid.count(Block::Surface), 2 * (1 + 2 + 3));
        assert_eq!(grid.get(Coords::new(0, 0, 0)), Block::Air);
        assert_eq!(grid.get(Coords::new(3, 2, 1)), Block::Surface);
        assert_eq!(grid.get(Coords::new(2, 2, 1)), Block::Air);
    }

    #[test]
    fn loads_png() {
        let p = std::env::temp_dir().join(format!("voxel-search-ramp-{}.png", std::process::id()));
        ramp().save(&p).unwrap();
        let grid = VoxelGrid::try_from(p.as_path()).unwrap();
        std::fs::remove_file(&p).unwrap();
        assert_eq!(grid, VoxelGrid::from(&ramp()));
    }

    #[test]
    fn missing_file() {
        let p = std::path::Path::new("/nonexistent/heightmap.png");
        assert!(matches!(
            VoxelGrid::try_from(p),
            Err(HeightmapError::IOError { .. })
        ));
    }
}
