//! Pixel neighborhoods
//!
//! Defines 4-way and 8-way connectivity and the neighbor walk shared by
//! the region-growing code.

/// Connectivity type for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

const FOUR_WAY_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const EIGHT_WAY_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)`: orthogonal first, then diagonals.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY_OFFSETS,
            ConnectivityType::EightWay => &EIGHT_WAY_OFFSETS,
        }
    }

    /// Number of neighbors of an interior pixel (4 or 8).
    pub fn neighbor_count(self) -> usize {
        self.offsets().len()
    }

    /// In-bounds neighbors of `(x, y)` in a `width` x `height` grid.
    pub fn neighbors(
        self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> impl Iterator<Item = (u32, u32)> {
        self.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < width && ny < height).then_some((nx, ny))
        })
    }

    /// True when `(x1, y1)` and `(x2, y2)` are neighbors under this connectivity.
    pub fn are_adjacent(self, x1: u32, y1: u32, x2: u32, y2: u32) -> bool {
        let dx = x1.abs_diff(x2);
        let dy = y1.abs_diff(y2);
        match self {
            ConnectivityType::FourWay => dx + dy == 1,
            ConnectivityType::EightWay => dx.max(dy) == 1,
        }
    }
}
