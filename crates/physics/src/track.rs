//! Track terrain lookup.
//!
//! The track is a dense grid of square tiles, each carrying a terrain
//! classification. Lookups are total: positions outside the grid report
//! [`TerrainKind::Sand`], the most punishing terrain, so a vehicle that
//! escapes the map crawls instead of breaking the simulation.

use thiserror::Error;

use crate::types::Vec2;

/// Tile edge length in world units (px).
pub const TILE_SIZE: f32 = 128.0;

/// Terrain classification for one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Road,
    Wet,
    Dirt,
    Grass,
    Sand,
}

impl TerrainKind {
    pub const ALL: [Self; 5] = [Self::Road, Self::Wet, Self::Dirt, Self::Grass, Self::Sand];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Wet => "wet",
            Self::Dirt => "dirt",
            Self::Grass => "grass",
            Self::Sand => "sand",
        }
    }

    const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'r' => Some(Self::Road),
            'w' => Some(Self::Wet),
            'd' => Some(Self::Dirt),
            'g' => Some(Self::Grass),
            's' => Some(Self::Sand),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("track must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown terrain glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// Dense tile grid. Row 0 is the top of the map; world y grows downward,
/// matching screen coordinates.
#[derive(Debug, Clone)]
pub struct TrackMap {
    width: usize,
    height: usize,
    tiles: Vec<TerrainKind>,
}

impl TrackMap {
    /// A `width` x `height` map filled with a single terrain.
    #[must_use]
    pub fn filled(width: usize, height: usize, kind: TerrainKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![kind; width * height],
        }
    }

    /// Builds a map from one string per row, one glyph per tile:
    /// `r`oad, `w`et, `d`irt, `g`rass, `s`and.
    pub fn from_rows(rows: &[&str]) -> Result<Self, TrackError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err(TrackError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(TrackError::RaggedRows {
                    row: row_idx,
                    expected: width,
                    found,
                });
            }
            for (col_idx, glyph) in row.chars().enumerate() {
                let kind = TerrainKind::from_glyph(glyph).ok_or(TrackError::UnknownGlyph {
                    glyph,
                    row: row_idx,
                    col: col_idx,
                })?;
                tiles.push(kind);
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Overwrites one tile. Ignores out-of-range cells.
    pub fn set_tile(&mut self, col: usize, row: usize, kind: TerrainKind) {
        if col < self.width && row < self.height {
            self.tiles[row * self.width + col] = kind;
        }
    }

    /// Overwrites every tile in the inclusive cell rectangle `from..=to`,
    /// given as `(col, row)` pairs. Cells outside the grid are ignored.
    pub fn fill_rect(&mut self, from: (usize, usize), to: (usize, usize), kind: TerrainKind) {
        for row in from.1..=to.1 {
            for col in from.0..=to.0 {
                self.set_tile(col, row, kind);
            }
        }
    }

    /// Terrain under a world position. Total: anything outside the grid is
    /// [`TerrainKind::Sand`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn terrain_at(&self, position: Vec2) -> TerrainKind {
        let col = (position.x / TILE_SIZE).floor();
        let row = (position.y / TILE_SIZE).floor();
        if col < 0.0 || row < 0.0 {
            return TerrainKind::Sand;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return TerrainKind::Sand;
        }
        self.tiles[row * self.width + col]
    }

    /// World position of a grid cell's center, where vehicles spawn.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn spawn_position(cell: (i32, i32)) -> Vec2 {
        Vec2::new(
            cell.0 as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            cell.1 as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }
}

/// Converts a spawn heading in degrees (90 = facing world +x) into the
/// orientation used by the kinematics.
#[must_use]
pub fn spawn_orientation(degrees: f32) -> f32 {
    degrees.to_radians() - std::f32::consts::FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hits_the_right_tile() {
        let map = TrackMap::from_rows(&["rg", "ds"]).unwrap();
        assert_eq!(map.terrain_at(Vec2::new(64.0, 64.0)), TerrainKind::Road);
        assert_eq!(map.terrain_at(Vec2::new(192.0, 64.0)), TerrainKind::Grass);
        assert_eq!(map.terrain_at(Vec2::new(64.0, 192.0)), TerrainKind::Dirt);
        assert_eq!(map.terrain_at(Vec2::new(192.0, 192.0)), TerrainKind::Sand);
    }

    #[test]
    fn out_of_bounds_is_sand() {
        let map = TrackMap::filled(2, 2, TerrainKind::Road);
        for position in [
            Vec2::new(-1.0, 64.0),
            Vec2::new(64.0, -1.0),
            Vec2::new(400.0, 64.0),
            Vec2::new(64.0, 400.0),
        ] {
            assert_eq!(map.terrain_at(position), TerrainKind::Sand);
        }
    }

    #[test]
    fn fill_rect_paints_the_inclusive_rectangle() {
        let mut map = TrackMap::filled(4, 4, TerrainKind::Road);
        map.fill_rect((1, 1), (2, 5), TerrainKind::Dirt);
        assert_eq!(map.terrain_at(Vec2::new(192.0, 192.0)), TerrainKind::Dirt);
        assert_eq!(map.terrain_at(Vec2::new(320.0, 448.0)), TerrainKind::Dirt);
        assert_eq!(map.terrain_at(Vec2::new(64.0, 64.0)), TerrainKind::Road);
        assert_eq!(map.terrain_at(Vec2::new(448.0, 192.0)), TerrainKind::Road);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            TrackMap::from_rows(&["rrr", "rr"]),
            Err(TrackError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn unknown_glyph_is_rejected() {
        assert!(matches!(
            TrackMap::from_rows(&["rx"]),
            Err(TrackError::UnknownGlyph {
                glyph: 'x',
                row: 0,
                col: 1
            })
        ));
    }

    #[test]
    fn spawns_center_in_the_cell() {
        assert_eq!(TrackMap::spawn_position((0, 0)), Vec2::new(64.0, 64.0));
        assert_eq!(TrackMap::spawn_position((3, 1)), Vec2::new(448.0, 192.0));
    }

    #[test]
    fn spawn_orientation_offsets_ninety_degrees() {
        assert!(spawn_orientation(90.0).abs() < 1e-6);
    }
}
