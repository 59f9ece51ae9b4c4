//! Voxel grid types

/// One cell of the output map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Voxel {
    Water = 0,
    Land = 1,
}

impl Voxel {
    /// Numeric value written to the map, `0` or `1`.
    pub fn digit(self) -> u8 {
        self as u8
    }

    pub fn as_char(self) -> char {
        match self {
            Voxel::Water => '0',
            Voxel::Land => '1',
        }
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Voxel::Water),
            1 => Some(Voxel::Land),
            _ => None,
        }
    }
}

/// Row-major binary grid, top row first, left column first.
///
/// Never empty: both dimensions are at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    width: u32,
    height: u32,
    cells: Vec<Voxel>,
}

impl VoxelGrid {
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<Voxel>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self { width, height, cells }
    }

    /// Builds a grid from explicit rows. Returns `None` for an empty grid, an
    /// empty row, or rows of differing length.
    pub fn from_rows(rows: Vec<Vec<Voxel>>) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Some(Self::from_cells(width as u32, height as u32, cells))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Voxel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Voxel]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Number of land cells.
    pub fn land_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == Voxel::Land).count()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
