#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system that turns tower selection and pointer confirmation
//! into placement commands.

use waypoint_defence_core::{CellCoord, Command, Event, TowerKind, WavePhase};

/// Declarative placement preview describing a potential tower construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Kind of tower proposed for placement.
    pub kind: TowerKind,
    /// Cell the tower would occupy.
    pub cell: CellCoord,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(kind: TowerKind, cell: CellCoord, placeable: bool) -> Self {
        Self {
            kind,
            cell,
            placeable,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// Tower button pressed on this frame, if any.
    pub select_action: Option<TowerKind>,
    /// Indicates whether the player confirmed a placement on this frame.
    pub confirm_action: bool,
    /// Cell currently hovered by the cursor.
    pub cursor_cell: Option<CellCoord>,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(
        select_action: Option<TowerKind>,
        confirm_action: bool,
        cursor_cell: Option<CellCoord>,
    ) -> Self {
        Self {
            select_action,
            confirm_action,
            cursor_cell,
        }
    }
}

/// Builder system that tracks the selected tower and the wave phase.
#[derive(Debug, Clone)]
pub struct Builder {
    phase: WavePhase,
    selected: Option<TowerKind>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a new builder system instance with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: WavePhase::Idle,
            selected: None,
        }
    }

    /// Tower kind the next confirmation would build.
    #[must_use]
    pub const fn selected(&self) -> Option<TowerKind> {
        self.selected
    }

    /// Phase last observed through world events.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Selects a tower kind; selecting the current kind again clears the selection.
    pub fn toggle(&mut self, kind: TowerKind) {
        self.selected = if self.selected == Some(kind) {
            None
        } else {
            Some(kind)
        };
    }

    /// Builds the preview for the hovered cell using the selected tower.
    ///
    /// The `can_place` closure should mirror the world's `query::can_place`.
    pub fn preview<F>(
        &self,
        cursor_cell: Option<CellCoord>,
        can_place: F,
    ) -> Option<PlacementPreview>
    where
        F: FnOnce(CellCoord, TowerKind) -> bool,
    {
        let cell = cursor_cell?;
        let kind = self.selected?;
        Some(PlacementPreview::new(kind, cell, can_place(cell, kind)))
    }

    /// Consumes world events and adapter-derived input to emit placement commands.
    ///
    /// Selection input is applied first, so a frame may select a tower and
    /// confirm its placement at once. The `can_place` closure should mirror
    /// the world's `query::can_place`.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: BuilderInput,
        can_place: F,
        out: &mut Vec<Command>,
    ) where
        F: FnOnce(CellCoord, TowerKind) -> bool,
    {
        for event in events {
            match event {
                Event::WaveStarted { .. } => self.phase = WavePhase::Spawning,
                Event::WaveCleared { .. } => self.phase = WavePhase::Idle,
                Event::GameOver { .. } => self.phase = WavePhase::GameOver,
                _ => {}
            }
        }

        if let Some(kind) = input.select_action {
            self.toggle(kind);
        }

        if self.phase != WavePhase::Idle || !input.confirm_action {
            return;
        }

        if let Some(preview) = self.preview(input.cursor_cell, can_place) {
            if preview.placeable {
                out.push(Command::PlaceTower {
                    kind: preview.kind,
                    cell: preview.cell,
                });
            }
        }
    }
}
