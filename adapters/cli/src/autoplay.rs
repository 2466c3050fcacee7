//! Frame driver that plays a session from scripted builder input.

use std::time::Duration;

use tracing::{info, warn};
use waypoint_defence_core::{CellCoord, Command, Event, TowerKind, WavePhase};
use waypoint_defence_rendering::{
    FrameControl, FrameInput, HudPresentation, MessageBanner, Scene, TileGridPresentation,
    TowerPreview,
};
use waypoint_defence_session::Session;
use waypoint_defence_system_builder::{Builder, BuilderInput};
use waypoint_defence_world::query;

use crate::config_file::TowerPlacement;

/// Converts the opening layout into one select-and-confirm input per tower.
///
/// The select button is only pressed when the kind changes, since pressing it
/// for the selected kind would clear the selection.
pub(crate) fn opening_script(
    grid: &TileGridPresentation,
    placements: &[TowerPlacement],
) -> Vec<FrameInput> {
    let mut selected = None;
    placements
        .iter()
        .map(|placement| {
            let select_tower = (selected != Some(placement.kind)).then_some(placement.kind);
            selected = Some(placement.kind);
            FrameInput {
                select_tower,
                start_wave: false,
                cursor_world_space: Some(grid.cell_center(placement.cell())),
                confirm_action: true,
            }
        })
        .collect()
}

/// Owns the session and the presentation-side state for the headless runner.
#[derive(Debug)]
pub(crate) struct Autoplay {
    session: Session,
    builder: Builder,
    banner: MessageBanner,
    target_waves: u32,
    last_events: Vec<Event>,
}

impl Autoplay {
    pub(crate) fn new(session: Session, target_waves: u32) -> Self {
        Self {
            session,
            builder: Builder::new(),
            banner: MessageBanner::new(),
            target_waves,
            last_events: Vec::new(),
        }
    }

    /// Applies one frame of input, advances the session and refreshes the scene.
    pub(crate) fn frame(
        &mut self,
        dt: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> FrameControl {
        self.banner.advance(dt);
        let cursor = input
            .cursor_world_space
            .and_then(|position| scene.tile_grid.cell_at(position));

        let mut commands = Vec::new();
        let session = &self.session;
        self.builder.handle(
            &self.last_events,
            BuilderInput::new(input.select_tower, input.confirm_action, cursor),
            |cell, kind| session.can_place(cell, kind),
            &mut commands,
        );
        if input.confirm_action && commands.is_empty() {
            self.explain_skipped_placement(cursor, self.builder.selected());
        }
        for command in commands {
            if let Command::PlaceTower { kind, cell } = command {
                self.place(cell, kind);
            }
        }

        if input.start_wave
            && self.session.phase() == WavePhase::Idle
            && self.session.wave() <= self.target_waves
        {
            let _ = self.session.start_wave();
        }

        let events = self.session.update(dt).to_vec();
        self.banner.observe(&events);
        self.last_events = events;

        self.refresh(cursor, scene);
        self.control()
    }

    fn place(&mut self, cell: CellCoord, kind: TowerKind) {
        match self.session.try_place_tower(cell, kind) {
            Ok(tower) => info!(
                tower = tower.get(),
                kind = kind.name(),
                column = cell.column(),
                row = cell.row(),
                gold = self.session.gold(),
                "tower built"
            ),
            Err(reason) => warn!(kind = kind.name(), %reason, "tower not built"),
        }
    }

    fn explain_skipped_placement(&self, cursor: Option<CellCoord>, selected: Option<TowerKind>) {
        let (Some(cell), Some(kind)) = (cursor, selected) else {
            warn!("placement skipped: cursor outside the grid or no tower selected");
            return;
        };
        if let Err(reason) = query::placement_verdict(self.session.world(), cell, kind) {
            warn!(
                kind = kind.name(),
                column = cell.column(),
                row = cell.row(),
                %reason,
                "tower not built"
            );
        }
    }

    fn refresh(&self, cursor: Option<CellCoord>, scene: &mut Scene) {
        let hud = HudPresentation {
            gold: self.session.gold(),
            lives: self.session.lives(),
            wave: self.session.wave(),
            phase: self.session.phase(),
            selected_tower: self.builder.selected(),
        };
        scene.refresh(
            hud,
            &self.session.tower_view(),
            &self.session.enemy_view(),
            &self.session.projectile_view(),
        );
        scene.banner = self.banner.text().map(str::to_owned);
        scene.tower_preview = self
            .builder
            .preview(cursor, |cell, kind| self.session.can_place(cell, kind))
            .map(|preview| TowerPreview {
                kind: preview.kind,
                cell: preview.cell,
                placeable: preview.placeable,
            });
    }

    fn control(&self) -> FrameControl {
        match self.session.phase() {
            WavePhase::GameOver => {
                info!(wave = self.session.wave(), "session over");
                FrameControl::Exit
            }
            WavePhase::Idle if self.session.wave() > self.target_waves => {
                info!(
                    waves = self.target_waves,
                    gold = self.session.gold(),
                    lives = self.session.lives(),
                    "requested waves cleared"
                );
                FrameControl::Exit
            }
            _ => FrameControl::Continue,
        }
    }
}
