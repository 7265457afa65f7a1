//! Board setup loaded from a TOML file.
//!
//! The file holds a single `[board]` table. Pawn coordinates in the file are
//! 1-based, as shown by the board labels. Values that are missing or out of
//! range fall back to the defaults, and pawns that would collide reset every
//! pawn to its default.
//!
//! ```toml
//! [board]
//! rows = 11
//! columns = 14
//! walls = 9
//! p1_pawn1_row = 4
//! p1_pawn1_column = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::SetupError;
use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_rules::*;
use crate::game_state::quoridor_types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub walls: usize,
    pub player_1_pawns: [Coord; TOKENS_PER_SIDE],
    pub player_2_pawns: [Coord; TOKENS_PER_SIDE],
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    board: BoardTable,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BoardTable {
    rows: Option<i64>,
    columns: Option<i64>,
    walls: Option<i64>,
    p1_pawn1_row: Option<i64>,
    p1_pawn1_column: Option<i64>,
    p1_pawn2_row: Option<i64>,
    p1_pawn2_column: Option<i64>,
    p2_pawn1_row: Option<i64>,
    p2_pawn1_column: Option<i64>,
    p2_pawn2_row: Option<i64>,
    p2_pawn2_column: Option<i64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let (player_1_pawns, player_2_pawns) = default_pawns(DEFAULT_ROWS, DEFAULT_COLUMNS);
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            walls: DEFAULT_WALLS,
            player_1_pawns,
            player_2_pawns,
        }
    }
}

impl GameConfig {
    /// Reads `path`. A missing file is created with the defaults; if that
    /// fails the defaults are still returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        if !path.is_file() {
            let config = Self::default();
            match config.write_to(path) {
                Ok(()) => info!(path = %path.display(), "config file not found, wrote defaults"),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "config file not found and could not be created, using defaults"
                ),
            }
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SetupError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            rows = config.rows,
            columns = config.columns,
            walls = config.walls,
            "config loaded"
        );
        Ok(config)
    }

    /// Parses the `[board]` table, replacing unusable values by defaults.
    /// Only malformed TOML is an error.
    pub fn from_toml_str(content: &str) -> Result<Self, SetupError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| SetupError::InvalidConfig(format!("failed to parse config: {e}")))?;
        Ok(Self::resolve(&file.board))
    }

    fn resolve(table: &BoardTable) -> Self {
        let rows = pick(table.rows, "rows", DEFAULT_ROWS, |v| {
            (MIN_ROWS..=MAX_ROWS).contains(&v) && v % 2 == 1
        });
        let columns = pick(table.columns, "columns", DEFAULT_COLUMNS, |v| {
            (MIN_COLUMNS..=MAX_COLUMNS).contains(&v) && v % 2 == 0
        });
        let walls = pick(table.walls, "walls", DEFAULT_WALLS, |v| v <= MAX_WALLS);

        let (default_x, default_o) = default_pawns(rows, columns);
        let pawn = |row: Option<i64>, col: Option<i64>, fallback: Coord| {
            let coord = row
                .zip(col)
                .and_then(|(r, c)| Some(Coord::new(one_based(r)?, one_based(c)?)));
            match coord {
                Some(c) if c.row < rows && c.col < columns => c,
                _ => fallback,
            }
        };

        let mut config = Self {
            rows,
            columns,
            walls,
            player_1_pawns: [
                pawn(table.p1_pawn1_row, table.p1_pawn1_column, default_x[0]),
                pawn(table.p1_pawn2_row, table.p1_pawn2_column, default_x[1]),
            ],
            player_2_pawns: [
                pawn(table.p2_pawn1_row, table.p2_pawn1_column, default_o[0]),
                pawn(table.p2_pawn2_row, table.p2_pawn2_column, default_o[1]),
            ],
        };

        if config.overlapping_pawn().is_some() {
            warn!("pawns collide, resetting every pawn to its default");
            config.player_1_pawns = default_x;
            config.player_2_pawns = default_o;
        }
        config
    }

    /// Writes the config back in file form with 1-based coordinates.
    pub fn to_toml_string(&self) -> Result<String, SetupError> {
        let [p1a, p1b] = self.player_1_pawns;
        let [p2a, p2b] = self.player_2_pawns;
        let label = |v: usize| Some(v as i64 + 1);
        let file = ConfigFile {
            board: BoardTable {
                rows: Some(self.rows as i64),
                columns: Some(self.columns as i64),
                walls: Some(self.walls as i64),
                p1_pawn1_row: label(p1a.row),
                p1_pawn1_column: label(p1a.col),
                p1_pawn2_row: label(p1b.row),
                p1_pawn2_column: label(p1b.col),
                p2_pawn1_row: label(p2a.row),
                p2_pawn1_column: label(p2a.col),
                p2_pawn2_row: label(p2b.row),
                p2_pawn2_column: label(p2b.col),
            },
        };
        toml::to_string(&file)
            .map_err(|e| SetupError::InvalidConfig(format!("failed to write config: {e}")))
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SetupError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|e| {
            SetupError::InvalidConfig(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Strict check of every bound, parity, and pawn placement.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            return Err(SetupError::RowsOutOfRange {
                value: self.rows,
                min: MIN_ROWS,
                max: MAX_ROWS,
            });
        }
        if self.rows % 2 == 0 {
            return Err(SetupError::RowsMustBeOdd(self.rows));
        }
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns) {
            return Err(SetupError::ColumnsOutOfRange {
                value: self.columns,
                min: MIN_COLUMNS,
                max: MAX_COLUMNS,
            });
        }
        if self.columns % 2 == 1 {
            return Err(SetupError::ColumnsMustBeEven(self.columns));
        }
        if self.walls > MAX_WALLS {
            return Err(SetupError::WallsOutOfRange {
                value: self.walls,
                max: MAX_WALLS,
            });
        }
        for pawn in self.pawns() {
            if pawn.row >= self.rows || pawn.col >= self.columns {
                return Err(SetupError::TokenOutOfBounds(pawn));
            }
        }
        match self.overlapping_pawn() {
            Some(coord) => Err(SetupError::TokensOverlap(coord)),
            None => Ok(()),
        }
    }

    pub fn new_game(&self) -> Result<GameState, SetupError> {
        self.validate()?;
        GameState::new(
            self.rows,
            self.columns,
            self.player_1_pawns,
            self.player_2_pawns,
            self.walls,
        )
    }

    fn pawns(&self) -> [Coord; 2 * TOKENS_PER_SIDE] {
        let [a, b] = self.player_1_pawns;
        let [c, d] = self.player_2_pawns;
        [a, b, c, d]
    }

    fn overlapping_pawn(&self) -> Option<Coord> {
        let pawns = self.pawns();
        pawns
            .iter()
            .enumerate()
            .find(|&(i, pawn)| pawns[..i].contains(pawn))
            .map(|(_, &pawn)| pawn)
    }
}

fn pick(value: Option<i64>, key: &str, default: usize, accept: impl Fn(usize) -> bool) -> usize {
    match value.and_then(|v| usize::try_from(v).ok()) {
        Some(v) if accept(v) => v,
        Some(_) => {
            warn!(key, ?value, default, "config value out of range, using default");
            default
        }
        None => default,
    }
}

fn one_based(value: i64) -> Option<usize> {
    usize::try_from(value).ok()?.checked_sub(1)
}
