use derive_more::Display;

/// A block position in the voxel world.
///
/// Ordered lexicographically by `(x, y, z)`, which the open set relies on to
/// break score ties deterministically.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("({x},{y},{z})")]
pub struct Coords {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coords {
    #[inline(always)]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Wraps around at the `i32` bounds, so probing past the edge of the
    /// world lands out of any practical range instead of panicking.
    #[inline(always)]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn shifted(&self, o: Offset) -> Self {
        self.offset(o.dx, o.dy, o.dz)
    }

    #[inline(always)]
    #[must_use]
    pub const fn above(&self) -> Self {
        self.offset(0, 1, 0)
    }

    #[inline(always)]
    #[must_use]
    pub const fn below(&self) -> Self {
        self.offset(0, -1, 0)
    }

    /// Squared euclidean distance, computed in `i64`.
    #[inline(always)]
    #[must_use]
    pub fn distance_squared(&self, other: &Coords) -> i64 {
        let dx = (self.x as i64) - (other.x as i64);
        let dy = (self.y as i64) - (other.y as i64);
        let dz = (self.z as i64) - (other.z as i64);
        dx * dx + dy * dy + dz * dz
    }

    #[inline(always)]
    #[must_use]
    pub fn distance(&self, other: &Coords) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// The relative position of `other` as seen from `self`.
    #[inline(always)]
    #[must_use]
    pub const fn offset_to(&self, other: &Coords) -> Offset {
        Offset {
            dx: other.x.wrapping_sub(self.x),
            dy: other.y.wrapping_sub(self.y),
            dz: other.z.wrapping_sub(self.z),
        }
    }
}

impl From<(i32, i32, i32)> for Coords {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordsParseError {
    #[error("Expected 3 comma separated values, found {0}")]
    WrongArity(usize),
    #[error("Invalid coordinate '{0}'")]
    InvalidValue(String),
}

impl std::str::FromStr for Coords {
    type Err = CoordsParseError;

    /// Parses `x,y,z`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(s);
        let values: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, z] = *values.as_slice() else {
            return Err(CoordsParseError::WrongArity(values.len()));
        };
        let parse = |v: &str| {
            v.parse::<i32>()
                .map_err(|_| CoordsParseError::InvalidValue(v.to_string()))
        };
        Ok(Self::new(parse(x)?, parse(y)?, parse(z)?))
    }
}

/// A relative position inside the block of neighbours being examined.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("[{dx},{dy},{dz}]")]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

impl Offset {
    #[inline(always)]
    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }

    /// Whether this offset moves along both horizontal axes.
    #[inline(always)]
    pub const fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dz != 0
    }

    /// Whether this stays in the central `(0, 0)` column.
    #[inline(always)]
    pub const fn is_vertical(&self) -> bool {
        self.dx == 0 && self.dz == 0
    }

    /// Number of axes this offset moves along.
    #[inline(always)]
    pub const fn axes(&self) -> u32 {
        (self.dx != 0) as u32 + (self.dy != 0) as u32 + (self.dz != 0) as u32
    }
}

/// One of the 9 vertical scan directions around an expanded node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub dx: i32,
    pub dz: i32,
}

impl Column {
    pub const CENTER: Column = Column { dx: 0, dz: 0 };

    /// All columns, in scan order.
    pub const ALL: [Column; 9] = [
        Column { dx: -1, dz: -1 },
        Column { dx: -1, dz: 0 },
        Column { dx: -1, dz: 1 },
        Column { dx: 0, dz: -1 },
        Column { dx: 0, dz: 0 },
        Column { dx: 0, dz: 1 },
        Column { dx: 1, dz: -1 },
        Column { dx: 1, dz: 0 },
        Column { dx: 1, dz: 1 },
    ];

    #[inline(always)]
    fn index(&self) -> usize {
        debug_assert!((-1..=1).contains(&self.dx));
        debug_assert!((-1..=1).contains(&self.dz));
        ((self.dx + 1) * 3 + (self.dz + 1)) as usize
    }

    #[inline(always)]
    pub const fn at(&self, dy: i32) -> Offset {
        Offset::new(self.dx, dy, self.dz)
    }
}

/// The 3×3 "column still viable" grid used while scanning neighbours.
///
/// The central column starts non-viable, nodes never move straight up or down
/// on their own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnGrid {
    viable: [bool; 9],
}

impl ColumnGrid {
    pub fn new() -> Self {
        let mut viable = [true; 9];
        viable[Column::CENTER.index()] = false;
        Self { viable }
    }

    #[inline(always)]
    pub fn is_viable(&self, c: Column) -> bool {
        self.viable[c.index()]
    }

    #[inline(always)]
    pub fn close(&mut self, c: Column) {
        self.viable[c.index()] = false;
    }
}

impl Default for ColumnGrid {
    fn default() -> Self {
        Self::new()
    }
}
