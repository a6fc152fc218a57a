//! Maze records
//!
//! A record stores the grid dimensions, the room rectangles and the ordered
//! wall-deletion log. Loading replays the log onto a fresh grid, so no
//! carving strategy runs; the distance field and start cell are recomputed.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::MazeError;
use crate::generation::Builder;
use crate::maze::{Cells, MazeConfig, Room, Wall};

/// Current record format version
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid maze record header")]
    InvalidHeader,

    #[error("Incompatible record version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Room {width}x{height} at ({x}, {y}) does not fit the grid")]
    RoomOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Recorded maze is invalid: {0}")]
    Maze(#[from] MazeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    pub magic: String,
    pub version: u32,
}

impl RecordHeader {
    const MAGIC: &'static str = "MZRS";

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.magic != Self::MAGIC {
            return Err(RecordError::InvalidHeader);
        }
        if self.version != RECORD_VERSION {
            return Err(RecordError::IncompatibleVersion {
                expected: RECORD_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

impl Default for RecordHeader {
    fn default() -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: RECORD_VERSION,
        }
    }
}

/// Persistent form of a maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRecord {
    pub header: RecordHeader,
    pub width: usize,
    pub height: usize,
    /// Builder and seed that produced the maze, informational only
    pub builder: Option<Builder>,
    pub seed: Option<u64>,
    pub rooms: Vec<Room>,
    pub deletions: Vec<Wall>,
}

impl MazeRecord {
    pub fn from_maze(maze: &MazeConfig) -> Self {
        let cells = maze.cells();
        Self {
            header: RecordHeader::default(),
            width: cells.width(),
            height: cells.height(),
            builder: None,
            seed: None,
            rooms: cells.rooms().to_vec(),
            deletions: cells.deletions().to_vec(),
        }
    }

    pub fn with_origin(mut self, builder: Builder, seed: Option<u64>) -> Self {
        self.builder = Some(builder);
        self.seed = seed;
        self
    }

    /// Rebuild the maze by replaying the deletion log
    pub fn into_maze(self) -> Result<MazeConfig, RecordError> {
        self.header.validate()?;
        let mut cells = Cells::new(self.width, self.height)?;

        for room in self.rooms {
            if !room.fits_within(self.width, self.height) {
                return Err(RecordError::RoomOutOfBounds {
                    x: room.x,
                    y: room.y,
                    width: room.width,
                    height: room.height,
                });
            }
            cells.mark_room(room);
        }
        for wall in self.deletions {
            if wall.x >= self.width || wall.y >= self.height {
                return Err(MazeError::OutOfBounds {
                    x: wall.x as i64,
                    y: wall.y as i64,
                    width: self.width,
                    height: self.height,
                }
                .into());
            }
            if cells.neighbor(wall.x, wall.y, wall.dir).is_some() {
                cells.delete_wall(wall);
            } else {
                cells.open_exit(wall.x, wall.y, wall.dir)?;
            }
        }
        debug!(
            width = self.width,
            height = self.height,
            deletions = cells.deletions().len(),
            "maze record replayed"
        );

        Ok(MazeConfig::from_cells(cells)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        info!(path = %path.as_ref().display(), "maze record saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let record: Self = serde_json::from_reader(reader)?;
        record.header.validate()?;
        Ok(record)
    }
}

/// Write a maze to a JSON record file
pub fn save_maze(maze: &MazeConfig, path: impl AsRef<Path>) -> Result<(), RecordError> {
    MazeRecord::from_maze(maze).save(path)
}

/// Read a record file and rebuild its maze
pub fn load_maze(path: impl AsRef<Path>) -> Result<MazeConfig, RecordError> {
    MazeRecord::load(path)?.into_maze()
}
