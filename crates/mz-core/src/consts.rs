//! Skill tables and energy costs
//!
//! A skill level in `0..SKILL_LEVELS` selects maze dimensions, the number of
//! rooms an imperfect maze should receive, and how many placement attempts
//! the room pass may spend.

/// Number of skill levels
pub const SKILL_LEVELS: usize = 16;

/// Maze width per skill level
pub const SKILL_X: [usize; SKILL_LEVELS] = [
    4, 12, 15, 20, 25, 25, 35, 35, 40, 60, 70, 80, 90, 110, 150, 300,
];

/// Maze height per skill level
pub const SKILL_Y: [usize; SKILL_LEVELS] = [
    4, 12, 15, 15, 20, 25, 25, 35, 40, 60, 70, 75, 75, 90, 120, 250,
];

/// Target room count per skill level
pub const SKILL_ROOMS: [usize; SKILL_LEVELS] = [
    0, 2, 2, 3, 4, 5, 10, 10, 20, 25, 25, 50, 60, 70, 80, 100,
];

/// Room placement attempts per skill level
pub const SKILL_PARTCT: [usize; SKILL_LEVELS] = [
    60, 600, 900, 1200, 2100, 2700, 3300, 5000, 6000, 13500, 19800, 25000, 29000, 45000, 85000,
    85000 * 4,
];

/// Largest room side the placement pass will draw
pub const MAX_ROOM_SIDE: usize = 6;

/// Battery level of a freshly built robot
pub const INITIAL_BATTERY: f32 = 2500.0;

/// Energy for one sensor reading
pub const SENSE_ENERGY: f32 = 1.0;

/// Energy for a quarter turn
pub const ROTATE_ENERGY: f32 = 3.0;

/// Energy for a single step
pub const STEP_ENERGY: f32 = 5.0;
