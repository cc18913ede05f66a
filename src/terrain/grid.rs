use thiserror::Error;

use crate::coords::Coords;
use crate::terrain::Block;
use crate::terrain::Terrain;

/// A dense box of blocks, everything outside of it is air.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// The lowest corner, included.
    min: Coords,
    /// The highest corner, excluded.
    max: Coords,
    /// Blocks in x-major, then z, then y order.
    blocks: Vec<Block>,
}

impl VoxelGrid {
    /// An empty box covering `min` (included) to `max` (excluded).
    pub fn new(min: Coords, max: Coords) -> Self {
        let side = |lo: i32, hi: i32| (hi - lo).max(0) as usize;
        let len = side(min.x, max.x) * side(min.y, max.y) * side(min.z, max.z);
        Self {
            min,
            max,
            blocks: vec![Block::Air; len],
        }
    }

    pub fn min(&self) -> Coords {
        self.min
    }
    pub fn max(&self) -> Coords {
        self.max
    }

    #[inline(always)]
    pub fn in_bounds(&self, at: Coords) -> bool {
        (self.min.x..self.max.x).contains(&at.x)
            && (self.min.y..self.max.y).contains(&at.y)
            && (self.min.z..self.max.z).contains(&at.z)
    }

    #[inline(always)]
    fn index(&self, at: Coords) -> Option<usize> {
        if !self.in_bounds(at) {
            return None;
        }
        let width_y = (self.max.y - self.min.y) as usize;
        let width_z = (self.max.z - self.min.z) as usize;
        let x = (at.x - self.min.x) as usize;
        let y = (at.y - self.min.y) as usize;
        let z = (at.z - self.min.z) as usize;
        Some((x * width_z + z) * width_y + y)
    }

    #[inline(always)]
    pub fn get(&self, at: Coords) -> Block {
        self.index(at).map_or(Block::Air, |i| self.blocks[i])
    }

    /// Sets a block, returning the previous one.
    ///
    /// # Panics
    ///
    /// When `at` is out of the bounds of the grid.
    pub fn set(&mut self, at: Coords, block: Block) -> Block {
        match self.index(at) {
            Some(i) => std::mem::replace(&mut self.blocks[i], block),
            None => panic!("{at} is out of the grid {}..{}", self.min, self.max),
        }
    }

    /// A `width` by `depth` floor of surface blocks with random pits, steps
    /// and pillars.
    pub fn random<R: rand::Rng>(rng: &mut R, width: i32, depth: i32) -> Self {
        let mut grid = VoxelGrid::new(Coords::new(0, 0, 0), Coords::new(width, 6, depth));
        for x in 0..width {
            for z in 0..depth {
                let height = match rng.random_range(0..10u32) {
                    0 => 0,     // pit
                    1..=6 => 1, // floor
                    7 | 8 => 2, // step
                    _ => 4,     // pillar
                };
                for y in 0..height {
                    grid.set(Coords::new(x, y, z), Block::Surface);
                }
            }
        }
        grid
    }

    /// Where an agent dropped from above `(x, z)` would land, if anywhere.
    pub fn landing(&self, x: i32, z: i32) -> Option<Coords> {
        (self.min.y..=self.max.y)
            .rev()
            .map(|y| Coords::new(x, y, z))
            .find(|c| self.get(c.below()).is_solid())
    }

    /// Blocks of the given kind.
    pub fn count(&self, block: Block) -> usize {
        self.blocks.iter().filter(|b| **b == block).count()
    }
}

impl Terrain for VoxelGrid {
    #[inline(always)]
    fn block(&self, at: Coords) -> Block {
        self.get(at)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid character '{ch}' found at {at}")]
    InvalidCharacter { ch: char, at: Coords },
    #[error("Start declared twice, at {first} and {second}")]
    DuplicateStart { first: Coords, second: Coords },
    #[error("Goal declared twice, at {first} and {second}")]
    DuplicateGoal { first: Coords, second: Coords },
}

/// A grid with optional start and goal markers.
///
/// Scenes are written as horizontal layers, bottom first, separated by `---`
/// lines. Each row of a layer is a `z` coordinate and each character an `x`
/// coordinate:
///
/// - `.` or ` `: air
/// - `,`: transparent
/// - `#`: surface
/// - `X`: solid
/// - `S`: air, where the search starts
/// - `G`: air, the goal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelScene {
    pub grid: VoxelGrid,
    pub start: Option<Coords>,
    pub goal: Option<Coords>,
}

const LAYER_SEPARATOR: &str = "---";

impl std::convert::TryFrom<&str> for VoxelScene {
    type Error = SceneParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut layers: Vec<Vec<&str>> = vec![vec![]];
        for line in s.lines() {
            if line.trim() == LAYER_SEPARATOR {
                layers.push(vec![]);
            } else if let Some(layer) = layers.last_mut() {
                layer.push(line);
            }
        }
        layers.retain(|l| !l.is_empty());
        if layers.is_empty() {
            return Err(SceneParseError::EmptyInput);
        }

        let max_x = layers
            .iter()
            .flat_map(|l| l.iter().map(|row| row.chars().count()))
            .max()
            .unwrap_or(0);
        let max_z = layers.iter().map(|l| l.len()).max().unwrap_or(0);
        if max_x == 0 {
            return Err(SceneParseError::EmptyInput);
        }

        let mut scene = VoxelScene {
            grid: VoxelGrid::new(
                Coords::new(0, 0, 0),
                Coords::new(max_x as i32, layers.len() as i32, max_z as i32),
            ),
            start: None,
            goal: None,
        };

        for (y, layer) in layers.iter().enumerate() {
            for (z, row) in layer.iter().enumerate() {
                for (x, ch) in row.chars().enumerate() {
                    let at = Coords::new(x as i32, y as i32, z as i32);
                    let block = match ch {
                        '.' | ' ' => Block::Air,
                        ',' => Block::Transparent,
                        '#' => Block::Surface,
                        'X' => Block::Solid,
                        'S' => {
                            if let Some(first) = scene.start.replace(at) {
                                return Err(SceneParseError::DuplicateStart { first, second: at });
                            }
                            Block::Air
                        }
                        'G' => {
                            if let Some(first) = scene.goal.replace(at) {
                                return Err(SceneParseError::DuplicateGoal { first, second: at });
                            }
                            Block::Air
                        }
                        ch => return Err(SceneParseError::InvalidCharacter { ch, at }),
                    };
                    scene.grid.set(at, block);
                }
            }
        }

        Ok(scene)
    }
}

impl std::fmt::Display for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for y in self.min.y..self.max.y {
            if y != self.min.y {
                writeln!(f, "{LAYER_SEPARATOR}")?;
            }
            for z in self.min.z..self.max.z {
                for x in self.min.x..self.max.x {
                    write!(f, "{}", self.get(Coords::new(x, y, z)))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
