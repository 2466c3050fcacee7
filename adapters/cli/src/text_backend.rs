//! Headless rendering backend that writes frames as text.

use std::{collections::VecDeque, io::Write, time::Duration};

use anyhow::{Context, Result};
use waypoint_defence_core::{CellCoord, TowerKind};
use waypoint_defence_rendering::{
    FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};

/// Backend that steps frames at a fixed delta and prints HUD changes,
/// banner messages and a final map of the grid.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
    frame: Duration,
    max_frames: u64,
    script: VecDeque<FrameInput>,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W, frame: Duration, max_frames: u64) -> Self {
        Self {
            out,
            frame,
            max_frames,
            script: VecDeque::new(),
        }
    }

    /// Queues inputs replayed one per frame. Once exhausted, every frame
    /// requests the next wave.
    pub(crate) fn with_script(mut self, script: impl IntoIterator<Item = FrameInput>) -> Self {
        self.script.extend(script);
        self
    }

    fn next_input(&mut self) -> FrameInput {
        self.script.pop_front().unwrap_or(FrameInput {
            start_wave: true,
            ..FrameInput::default()
        })
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
        } = presentation;
        writeln!(self.out, "== {window_title} ==").context("failed to write title")?;

        let mut last_hud = None;
        let mut last_banner = None;
        let mut frame_index = 0;

        while frame_index < self.max_frames {
            let input = self.next_input();
            let control = update_scene(self.frame, input, &mut scene);
            frame_index += 1;

            if last_banner != scene.banner {
                if let Some(text) = &scene.banner {
                    writeln!(self.out, "[{frame_index:>6}] {text}")
                        .context("failed to write banner")?;
                }
                last_banner.clone_from(&scene.banner);
            }
            if last_hud != Some(scene.hud) {
                writeln!(self.out, "[{frame_index:>6}] {}", scene.hud)
                    .context("failed to write hud")?;
                last_hud = Some(scene.hud);
            }

            if control == FrameControl::Exit {
                break;
            }
        }

        for line in render_map(&scene) {
            writeln!(self.out, "{line}").context("failed to write map")?;
        }
        writeln!(self.out, "{} after {frame_index} frames", scene.hud)
            .context("failed to write summary")?;
        self.out.flush().context("failed to flush output")
    }
}

/// Draws the grid as one line per row.
///
/// `#` path, `@` base, `b`/`x`/`s` towers, `e` enemies, `.` free cells.
pub(crate) fn render_map(scene: &Scene) -> Vec<String> {
    let grid = &scene.tile_grid;
    let mut rows = vec![vec!['.'; grid.columns as usize]; grid.rows as usize];
    let mut paint = |cell: CellCoord, glyph: char| {
        if let Some(slot) = rows
            .get_mut(cell.row() as usize)
            .and_then(|row| row.get_mut(cell.column() as usize))
        {
            *slot = glyph;
        }
    };

    for cell in &scene.path.cells {
        paint(*cell, '#');
    }
    if let Some(base) = scene.path.cells.last() {
        paint(*base, '@');
    }
    for tower in &scene.towers {
        if let Some(cell) = grid.cell_at(tower.center) {
            paint(cell, tower_glyph(tower.kind));
        }
    }
    for enemy in &scene.enemies {
        if let Some(cell) = grid.cell_at(enemy.center) {
            paint(cell, 'e');
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

fn tower_glyph(kind: TowerKind) -> char {
    match kind {
        TowerKind::Basic => 'b',
        TowerKind::Burst => 'x',
        TowerKind::Sniper => 's',
    }
}
