use thiserror::Error;

/// Largest supported search radius.
pub const MAX_RANGE: u32 = 30_000_000;
/// Largest supported fall, in blocks.
pub const MAX_DROP_HEIGHT: u32 = 64;

/// The limits of a search.
///
/// Immutable for the life of a search, but any number of searches may share
/// one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Search radius around the start, in blocks.
    range: u32,
    /// Expansions allowed before giving up. 0 disables the cap.
    max_iterations: usize,
    /// How far down a voxel candidate may be and still be adjacent.
    max_drop_height: u32,
    /// Whether voxel coordinates name the surface block an agent stands on
    /// (`true`) or the block its feet occupy (`false`).
    surface_search: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Range {0} is larger than the supported {MAX_RANGE}")]
    RangeTooLarge(u32),
    #[error("Drop height {0} is larger than the supported {MAX_DROP_HEIGHT}")]
    DropTooHigh(u32),
}

impl Settings {
    pub fn new(
        range: u32,
        max_iterations: usize,
        max_drop_height: u32,
        surface_search: bool,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            range,
            max_iterations,
            max_drop_height,
            surface_search,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.range > MAX_RANGE {
            return Err(SettingsError::RangeTooLarge(self.range));
        }
        if self.max_drop_height > MAX_DROP_HEIGHT {
            return Err(SettingsError::DropTooHigh(self.max_drop_height));
        }
        Ok(())
    }

    /// Ranges beyond [`MAX_RANGE`] are clamped to it.
    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range.min(MAX_RANGE);
        self
    }
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
    /// Drops beyond [`MAX_DROP_HEIGHT`] are clamped to it.
    #[must_use]
    pub fn with_max_drop_height(mut self, max_drop_height: u32) -> Self {
        self.max_drop_height = max_drop_height.min(MAX_DROP_HEIGHT);
        self
    }
    #[must_use]
    pub fn with_surface_search(mut self, surface_search: bool) -> Self {
        self.surface_search = surface_search;
        self
    }

    #[inline(always)]
    pub fn range(&self) -> u32 {
        self.range
    }
    #[inline(always)]
    pub fn range_squared(&self) -> i64 {
        (self.range as i64) * (self.range as i64)
    }
    #[inline(always)]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
    #[inline(always)]
    pub fn max_drop_height(&self) -> u32 {
        self.max_drop_height
    }
    #[inline(always)]
    pub fn surface_search(&self) -> bool {
        self.surface_search
    }

    /// How many blocks below its parent a candidate may be, at least 1.
    #[inline(always)]
    pub fn drop_reach(&self) -> i32 {
        drop_reach(self.max_drop_height)
    }

    /// Whether `iterations` expansions use up the budget.
    #[inline(always)]
    pub fn iterations_exhausted(&self, iterations: usize) -> bool {
        self.max_iterations > 0 && iterations >= self.max_iterations
    }
}

pub(crate) fn drop_reach(max_drop_height: u32) -> i32 {
    i32::try_from(max_drop_height.clamp(1, MAX_DROP_HEIGHT)).unwrap_or(1)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            range: 64,
            max_iterations: 10_000,
            max_drop_height: 3,
            surface_search: false,
        }
    }
}
