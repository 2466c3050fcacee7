//! Loading of the optional TOML file that tunes a session.

use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::Deserialize;
use waypoint_defence_core::{CellCoord, GameConfig, TowerKind};

/// Tower the runner builds before the first wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct TowerPlacement {
    pub(crate) column: u32,
    pub(crate) row: u32,
    pub(crate) kind: TowerKind,
}

impl TowerPlacement {
    pub(crate) const fn cell(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }
}

impl FromStr for TowerPlacement {
    type Err = String;

    /// Parses `<column>,<row>,<kind>`, e.g. `1,2,sniper`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split(',').map(str::trim);
        let (Some(column), Some(row), Some(kind), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected <column>,<row>,<kind> but got `{value}`"));
        };

        let column = column
            .parse()
            .map_err(|_| format!("invalid column `{column}`"))?;
        let row = row.parse().map_err(|_| format!("invalid row `{row}`"))?;
        let kind = TowerKind::from_name(kind).ok_or_else(|| {
            let known: Vec<&str> = TowerKind::ALL.iter().map(|kind| kind.name()).collect();
            format!("unknown tower `{kind}` (expected one of {})", known.join(", "))
        })?;

        Ok(Self { column, row, kind })
    }
}

/// Contents of a session file: game tuning plus an opening tower layout.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SessionFile {
    #[serde(default)]
    pub(crate) game: GameConfig,
    #[serde(default)]
    pub(crate) towers: Vec<TowerPlacement>,
}

/// Reads and parses the session file at `path`.
pub(crate) fn load(path: &Path) -> Result<SessionFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid session file {}", path.display()))
}

fn parse(contents: &str) -> Result<SessionFile> {
    let file: SessionFile =
        toml::from_str(contents).context("failed to parse session file toml contents")?;
    file.game
        .validate()
        .context("session file describes an unplayable game")?;
    Ok(file)
}
