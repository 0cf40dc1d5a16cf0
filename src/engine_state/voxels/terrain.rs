//! # Terrain Module
//!
//! Procedural terrain for the voxel grid.
//!
//! Terrain is described by a [`HeightField`], a pure function from a column `(x, z)` to the
//! height of its surface block. The [`TerrainGenerator`] turns heights into layered columns:
//!
//! * Rock deep down, from the floor up to the dirt layer
//! * A few blocks of dirt below the surface
//! * A surface block, grass on dry land and sand at or below the water level
//! * Water filling the column above the surface up to the water level
//!
//! Every height field here is deterministic: the same `(x, z)` always yields the same height,
//! and generating the same region twice produces identical grid contents.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::block::block_type::BlockType;
use super::world::VoxelGrid;
use crate::config::TerrainConfig;

/// A deterministic mapping from a column to the height of its surface block.
pub trait HeightField {
    /// Height (y coordinate) of the surface block of column `(x, z)`.
    fn height_at(&self, x: i32, z: i32) -> i32;
}

impl<F> HeightField for F
where
    F: Fn(i32, i32) -> i32,
{
    fn height_at(&self, x: i32, z: i32) -> i32 {
        self(x, z)
    }
}

/// Every column has the same height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatHeightField(pub i32);

impl HeightField for FlatHeightField {
    fn height_at(&self, _x: i32, _z: i32) -> i32 {
        self.0
    }
}

/// Rolling hills built from one sine term along X and one cosine term along Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveHeightField {
    /// Height around which the waves oscillate.
    pub base: f64,
    /// Amplitude of the X term.
    pub amplitude_x: f64,
    /// Angular frequency of the X term, in radians per block.
    pub frequency_x: f64,
    /// Amplitude of the Z term.
    pub amplitude_z: f64,
    /// Angular frequency of the Z term, in radians per block.
    pub frequency_z: f64,
}

impl Default for WaveHeightField {
    fn default() -> Self {
        Self {
            base: 1.0,
            amplitude_x: 3.0,
            frequency_x: 0.2,
            amplitude_z: 2.0,
            frequency_z: 0.15,
        }
    }
}

impl HeightField for WaveHeightField {
    fn height_at(&self, x: i32, z: i32) -> i32 {
        let h = self.base
            + self.amplitude_x * (x as f64 * self.frequency_x).sin()
            + self.amplitude_z * (z as f64 * self.frequency_z).cos();
        h.round() as i32
    }
}

/// Heights sampled from seeded 2D Perlin noise.
///
/// The permutation table is built once from the seed, so two fields with the same
/// parameters return the same heights.
#[derive(Clone)]
pub struct PerlinHeightField {
    perlin: Perlin,
    base: f64,
    amplitude: f64,
    scale: f64,
}

impl PerlinHeightField {
    /// Creates a noise height field.
    ///
    /// # Arguments
    /// * `seed` - Seed for the noise permutation table
    /// * `base` - Height returned where the noise is zero
    /// * `amplitude` - Height difference between noise values 0 and 1
    /// * `scale` - Scaling factor applied to world coordinates when sampling
    pub fn new(seed: u32, base: f64, amplitude: f64, scale: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base,
            amplitude,
            scale,
        }
    }
}

impl HeightField for PerlinHeightField {
    fn height_at(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .perlin
            .get([x as f64 * self.scale, z as f64 * self.scale]);
        (self.base + self.amplitude * sample).round() as i32
    }
}

/// Serializable choice of height field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeightFieldConfig {
    /// See [`FlatHeightField`].
    Flat {
        /// Surface height of every column.
        height: i32,
    },
    /// See [`WaveHeightField`].
    Wave(WaveHeightField),
    /// See [`PerlinHeightField`].
    Perlin {
        /// Noise seed.
        seed: u32,
        /// Height where the noise is zero.
        base: f64,
        /// Height swing of the noise.
        amplitude: f64,
        /// Coordinate scale factor.
        scale: f64,
    },
}

impl Default for HeightFieldConfig {
    fn default() -> Self {
        HeightFieldConfig::Wave(WaveHeightField::default())
    }
}

impl HeightFieldConfig {
    /// Builds the configured height field.
    pub fn build(&self) -> Box<dyn HeightField> {
        match *self {
            HeightFieldConfig::Flat { height } => Box::new(FlatHeightField(height)),
            HeightFieldConfig::Wave(wave) => Box::new(wave),
            HeightFieldConfig::Perlin {
                seed,
                base,
                amplitude,
                scale,
            } => Box::new(PerlinHeightField::new(seed, base, amplitude, scale)),
        }
    }
}

/// An inclusive rectangle of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainRegion {
    /// Smallest X, inclusive.
    pub min_x: i32,
    /// Largest X, inclusive.
    pub max_x: i32,
    /// Smallest Z, inclusive.
    pub min_z: i32,
    /// Largest Z, inclusive.
    pub max_z: i32,
}

impl TerrainRegion {
    /// Creates a region spanning `min_x..=max_x` by `min_z..=max_z`.
    pub fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// A square of side `2 * radius + 1` centred on the origin column.
    pub fn square(radius: i32) -> Self {
        let radius = radius.abs();
        Self::new(-radius, radius, -radius, radius)
    }

    /// Iterates the `(x, z)` pairs of every column in the region.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> {
        let (min_z, max_z) = (self.min_z, self.max_z);
        (self.min_x..=self.max_x).flat_map(move |x| (min_z..=max_z).map(move |z| (x, z)))
    }

    /// Whether column `(x, z)` lies inside the region.
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }

    /// Number of columns in the region.
    pub fn column_count(&self) -> usize {
        let width = (self.max_x - self.min_x + 1).max(0) as usize;
        let depth = (self.max_z - self.min_z + 1).max(0) as usize;
        width * depth
    }
}

/// Fills a region of the grid with layered columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainGenerator {
    floor_y: i32,
    water_level: i32,
    dirt_depth: i32,
}

impl TerrainGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `floor_y` - Lowest y that receives a block
    /// * `water_level` - Highest y that is filled with water
    /// * `dirt_depth` - Blocks of dirt between the surface and the rock layer
    pub fn new(floor_y: i32, water_level: i32, dirt_depth: i32) -> Self {
        Self {
            floor_y,
            water_level,
            dirt_depth: dirt_depth.max(0),
        }
    }

    /// Creates a generator from the terrain section of the configuration.
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(config.floor_y, config.water_level, config.dirt_depth)
    }

    /// The configured water level.
    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    /// The configured floor.
    pub fn floor_y(&self) -> i32 {
        self.floor_y
    }

    /// The block type of solid layer `y` in a column whose surface is at `h`.
    fn solid_block_for(&self, y: i32, h: i32) -> BlockType {
        if y == h {
            if h <= self.water_level {
                BlockType::SAND
            } else {
                BlockType::GRASS
            }
        } else if y < h.saturating_sub(self.dirt_depth) {
            BlockType::ROCK
        } else {
            BlockType::DIRT
        }
    }

    /// The blocks of a single column whose surface is at `h`, bottom to top.
    ///
    /// Solid layers run from the floor up to `h`; water runs from just above the surface
    /// (never below the floor) up to the water level.
    pub fn column_blocks(&self, h: i32) -> impl Iterator<Item = (i32, BlockType)> {
        let generator = *self;
        let solid = (generator.floor_y..=h).map(move |y| (y, generator.solid_block_for(y, h)));
        let water_start = h.saturating_add(1).max(generator.floor_y);
        let water = (water_start..=generator.water_level).map(|y| (y, BlockType::WATER));
        solid.chain(water)
    }

    /// Populates `world` over `region` using `heights`.
    ///
    /// Every block already in the region's columns is cleared first, so running the
    /// generator again over the same region yields the same contents no matter what was
    /// there before.
    ///
    /// # Returns
    /// The number of blocks written.
    pub fn generate<H>(&self, world: &mut VoxelGrid, region: &TerrainRegion, heights: &H) -> usize
    where
        H: HeightField + ?Sized,
    {
        let before = world.len();
        world.retain(|coord, _| !region.contains_column(coord.x, coord.z));
        log::debug!("cleared {} blocks before generating", before - world.len());

        let mut written = 0;
        for (x, z) in region.columns() {
            let h = heights.height_at(x, z);
            for (y, block_type) in self.column_blocks(h) {
                world.set(Point3::new(x, y, z), block_type);
                written += 1;
            }
        }

        log::info!(
            "generated terrain over x {}..={}, z {}..={}: {} blocks",
            region.min_x,
            region.max_x,
            region.min_z,
            region.max_z,
            written
        );
        written
    }
}
