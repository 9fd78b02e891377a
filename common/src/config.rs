use std::{env, fmt::Display, str::FromStr};

use crate::{error::MazeError, wall};

pub const DEFAULT_SIDE: usize = 41;
pub const DEFAULT_EXIT_CORRIDOR: usize = 6;
pub const DEFAULT_WALL_THICKNESS: f32 = 0.25;
pub const DEFAULT_DETAIL_LEVEL: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub side: usize,          // Cells per side. Odd, so the exit has a centre column.
    pub exit_corridor: usize, // Rows of straight corridor leading in from the gate.
    pub wall_thickness: f32,  // Fraction of a cell, in (0, 0.5).
    pub detail_level: usize,  // Segments per unit along the long axis of each wall.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            exit_corridor: DEFAULT_EXIT_CORRIDOR,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            detail_level: DEFAULT_DETAIL_LEVEL,
            seed: None,
        }
    }
}

impl Config {
    /// Reads `MAZE_SIDE`, `MAZE_EXIT_CORRIDOR`, `WALL_THICKNESS`,
    /// `WALL_DETAIL` and `MAZE_SEED`, after loading a `.env` file if there is
    /// one. Missing keys keep their defaults.
    pub fn from_env() -> Result<Self, MazeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MazeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            side: parse_or(&lookup, "MAZE_SIDE", defaults.side)?,
            exit_corridor: parse_or(&lookup, "MAZE_EXIT_CORRIDOR", defaults.exit_corridor)?,
            wall_thickness: parse_or(&lookup, "WALL_THICKNESS", defaults.wall_thickness)?,
            detail_level: parse_or(&lookup, "WALL_DETAIL", defaults.detail_level)?,
            seed: match lookup("MAZE_SEED") {
                Some(value) if !value.trim().is_empty() => Some(parse_value("MAZE_SEED", &value)?),
                _ => None,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        validate_maze(self.side, self.exit_corridor)?;
        validate_wall(self.wall_thickness, self.detail_level)
    }
}

pub fn validate_maze(side: usize, exit_corridor: usize) -> Result<(), MazeError> {
    if side < 3 {
        return Err(MazeError::invalid(format!(
            "maze side must be at least 3, got {side}"
        )));
    }
    if side % 2 == 0 {
        return Err(MazeError::invalid(format!(
            "maze side must be odd so that there is a centre column, got {side}"
        )));
    }
    if exit_corridor >= side {
        return Err(MazeError::invalid(format!(
            "exit corridor ({exit_corridor}) must be shorter than the maze side ({side})"
        )));
    }
    Ok(())
}

pub fn validate_wall(wall_thickness: f32, detail_level: usize) -> Result<(), MazeError> {
    // Also rejects NaN.
    if !(wall_thickness > 0.0 && wall_thickness < 0.5) {
        return Err(MazeError::invalid(format!(
            "wall thickness must lie strictly between 0 and 0.5, got {wall_thickness}"
        )));
    }
    if detail_level == 0 {
        return Err(MazeError::invalid("detail level must be at least 1"));
    }
    match wall::vertex_count_for(wall_thickness, detail_level) {
        Some(count) if count <= wall::MAX_VERTICES => Ok(()),
        _ => Err(MazeError::invalid(format!(
            "detail level {detail_level} needs more than {} wall vertices",
            wall::MAX_VERTICES
        ))),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, MazeError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => parse_value(key, &value),
        _ => Ok(default),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, MazeError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = value.trim().trim_matches('"').trim_matches('\'');
    value
        .parse()
        .map_err(|e| MazeError::invalid(format!("{key}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).expect("defaults should be valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.side, 41);
        assert_eq!(config.exit_corridor, 6);
        assert_eq!(config.detail_level, 1);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_values_are_read_and_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAZE_SIDE", " 21 "),
            ("MAZE_EXIT_CORRIDOR", "3"),
            ("WALL_THICKNESS", "\"0.1\""),
            ("WALL_DETAIL", "4"),
            ("MAZE_SEED", "1234"),
        ]))
        .expect("config should parse");

        assert_eq!(config.side, 21);
        assert_eq!(config.exit_corridor, 3);
        assert_eq!(config.wall_thickness, 0.1);
        assert_eq!(config.detail_level, 4);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_unparsable_value_is_invalid_configuration() {
        let result = Config::from_lookup(lookup_from(&[("MAZE_SIDE", "lots")]));
        assert!(
            matches!(result, Err(MazeError::InvalidConfiguration(_))),
            "expected invalid configuration, got {result:?}"
        );
    }

    #[test]
    fn test_even_side_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("MAZE_SIDE", "40")]));
        assert!(matches!(result, Err(MazeError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_validate_maze_bounds() {
        assert!(validate_maze(3, 0).is_ok());
        assert!(validate_maze(3, 2).is_ok());
        assert!(validate_maze(3, 3).is_err(), "corridor as tall as the maze");
        assert!(validate_maze(1, 0).is_err(), "single cell is rejected");
        assert!(validate_maze(0, 0).is_err());
        assert!(validate_maze(8, 1).is_err());
    }

    #[test]
    fn test_validate_wall_bounds() {
        assert!(validate_wall(0.25, 1).is_ok());
        assert!(validate_wall(0.49, 3).is_ok());
        assert!(validate_wall(0.5, 1).is_err());
        assert!(validate_wall(0.0, 1).is_err());
        assert!(validate_wall(-0.1, 1).is_err());
        assert!(validate_wall(f32::NAN, 1).is_err());
        assert!(validate_wall(0.25, 0).is_err());
        assert!(validate_wall(0.25, 6000).is_ok());
        assert!(validate_wall(0.25, 7000).is_err());
    }

    #[test]
    fn test_oversized_detail_from_env_is_rejected() {
        for detail in ["1000000000", "18446744073709551615"] {
            let result = Config::from_lookup(lookup_from(&[("WALL_DETAIL", detail)]));
            assert!(
                matches!(result, Err(MazeError::InvalidConfiguration(_))),
                "WALL_DETAIL={detail} gave {result:?}"
            );
        }
    }
}
