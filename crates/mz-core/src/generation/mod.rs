//! Maze generation
//!
//! A generation run starts from a fully walled grid, optionally carves rooms,
//! lets one of the [`Builder`] strategies remove walls until every cell is
//! connected, opens a single exit on the border, and finally derives the
//! distance field and starting cell.
//!
//! Strategies differ only in which walls they remove. All of them:
//! - never remove a border wall (only the exit pass does that)
//! - enter a room as a whole, so that outside room footprints the open-wall
//!   graph stays a spanning tree
//! - report progress and honour cancellation through [`Progress`]

mod dfs;
mod eller;
mod factory;
mod prim;
mod rooms;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, info};

use crate::consts::{SKILL_LEVELS, SKILL_PARTCT, SKILL_ROOMS, SKILL_X, SKILL_Y};
use crate::errors::{ConfigError, GenerationError, MazeError};
use crate::maze::{self, CardinalDirection, Cells, MazeConfig};
use crate::rng::MazeRng;

pub use factory::{CancelToken, GenerationHandle, MazeFactory, ProgressGate};

/// Share of the progress range spent carving; the rest covers exit and distances
const CARVE_SHARE: usize = 90;

/// Wall-carving strategy
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Builder {
    /// Randomized depth-first search with backtracking
    #[default]
    #[serde(alias = "DFS", alias = "dfs")]
    #[strum(to_string = "Dfs", serialize = "depth-first")]
    Dfs,
    /// Randomized Prim over a frontier of walls
    #[serde(alias = "prim")]
    Prim,
    /// Eller's row-by-row set merging
    #[serde(alias = "eller")]
    Eller,
}

impl Builder {
    /// Parse a builder name, case-insensitively
    pub fn parse_name(name: &str) -> Result<Self, ConfigError> {
        name.parse()
            .map_err(|_| ConfigError::UnknownBuilder(name.to_string()))
    }

    /// Carve a grid with this strategy
    pub fn generate(
        self,
        width: usize,
        height: usize,
        rng: &mut MazeRng,
        perfect: bool,
        room_target: usize,
    ) -> Result<Cells, GenerationError> {
        let request = GenerationRequest::new(self, width, height).with_rooms(if perfect {
            0
        } else {
            room_target
        });
        generate_cells(&request, rng, &mut Silent)
    }
}

/// Receives progress from a running strategy and answers cancellation polls
pub trait Progress {
    /// Offer a completion percentage in `0..=100`
    fn update(&mut self, percentage: u8);

    /// Whether the run should stop as soon as possible
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Progress sink that ignores every report
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn update(&mut self, _percentage: u8) {}
}

/// Report carving progress and bail out if the run was cancelled
pub(crate) fn checkpoint(
    progress: &mut dyn Progress,
    done: usize,
    total: usize,
) -> Result<(), GenerationError> {
    if progress.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }
    let pct = if total == 0 {
        CARVE_SHARE
    } else {
        done.min(total) * CARVE_SHARE / total
    };
    progress.update(pct as u8);
    Ok(())
}

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub builder: Builder,
    pub width: usize,
    pub height: usize,
    /// No rooms when set; the maze is then a spanning tree
    pub perfect: bool,
    /// Rooms to aim for in an imperfect maze
    pub room_target: usize,
    /// Placement attempts the room pass may spend
    pub room_attempts: usize,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// A perfect maze of the given size
    pub fn new(builder: Builder, width: usize, height: usize) -> Self {
        Self {
            builder,
            width,
            height,
            perfect: true,
            room_target: 0,
            room_attempts: 0,
            seed: None,
        }
    }

    /// Dimensions and room budget from a skill level
    pub fn from_skill(builder: Builder, skill: usize, perfect: bool) -> Result<Self, ConfigError> {
        if skill >= SKILL_LEVELS {
            return Err(ConfigError::InvalidSkill(skill));
        }
        Ok(Self {
            builder,
            width: SKILL_X[skill],
            height: SKILL_Y[skill],
            perfect,
            room_target: if perfect { 0 } else { SKILL_ROOMS[skill] },
            room_attempts: if perfect { 0 } else { SKILL_PARTCT[skill] },
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Ask for rooms; zero keeps the maze perfect
    pub fn with_rooms(mut self, room_target: usize) -> Self {
        self.perfect = room_target == 0;
        self.room_target = room_target;
        self.room_attempts = room_target * 100;
        self
    }
}

/// Carve a grid and open its exit
pub fn generate_cells(
    request: &GenerationRequest,
    rng: &mut MazeRng,
    progress: &mut dyn Progress,
) -> Result<Cells, GenerationError> {
    let mut cells = Cells::new(request.width, request.height)?;

    if !request.perfect {
        let placed = rooms::place_rooms(
            &mut cells,
            request.room_target,
            request.room_attempts,
            rng,
        );
        debug!(placed, target = request.room_target, "rooms placed");
    }

    checkpoint(progress, 0, 1)?;
    match request.builder {
        Builder::Dfs => dfs::carve(&mut cells, rng, progress)?,
        Builder::Prim => prim::carve(&mut cells, rng, progress)?,
        Builder::Eller => eller::carve(&mut cells, rng, progress)?,
    }
    debug!(
        builder = %request.builder,
        open_walls = cells.open_internal_walls(),
        "pathways carved"
    );

    place_exit(&mut cells, rng)?;
    Ok(cells)
}

/// Run a full generation: carve, open the exit, compute distances
pub fn generate(
    request: &GenerationRequest,
    progress: &mut dyn Progress,
) -> Result<MazeConfig, GenerationError> {
    let mut rng = request
        .seed
        .map(MazeRng::new)
        .unwrap_or_else(MazeRng::from_entropy);
    info!(
        builder = %request.builder,
        width = request.width,
        height = request.height,
        perfect = request.perfect,
        seed = rng.seed(),
        "generating maze"
    );

    let cells = generate_cells(request, &mut rng, progress)?;
    if progress.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }

    let maze = MazeConfig::from_cells(cells)?;
    progress.update(100);
    Ok(maze)
}

/// Open the border wall of the border cell farthest from a random cell
fn place_exit(cells: &mut Cells, rng: &mut MazeRng) -> Result<(), MazeError> {
    let origin = (rng.rn2(cells.width()), rng.rn2(cells.height()));
    let dists = maze::bfs(cells, origin);

    let mut best: Option<((usize, usize), u32)> = None;
    for (idx, d) in dists.iter().enumerate() {
        let (x, y) = cells.coords(idx);
        let Some(d) = *d else {
            tracing::error!(x, y, "cell is unreachable after carving");
            return Err(MazeError::Unreachable { x, y });
        };
        let on_border = CardinalDirection::ALL
            .into_iter()
            .any(|dir| cells.has_border(x, y, dir));
        if on_border && best.is_none_or(|(_, bd)| d > bd) {
            best = Some(((x, y), d));
        }
    }

    let ((x, y), _) = best.ok_or(MazeError::NoExit)?;
    let sides: Vec<CardinalDirection> = CardinalDirection::ALL
        .into_iter()
        .filter(|&dir| cells.has_border(x, y, dir))
        .collect();
    let dir = *rng.choose(&sides).ok_or(MazeError::NoExit)?;
    cells.open_exit(x, y, dir)
}
