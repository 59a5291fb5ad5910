//! ASCII rendering of a generated level for quick inspection.

use levelforge_core::constants::{TILE_ONE_WAY, TILE_SOLID};
use levelforge_core::level::{EntityKind, GeneratedLevel};

fn tile_glyph(tile: u8) -> char {
    match tile {
        TILE_SOLID => '#',
        TILE_ONE_WAY => '=',
        _ => ' ',
    }
}

fn entity_glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::Spawn => 'S',
        EntityKind::Goal => 'G',
        EntityKind::Coin => 'o',
        EntityKind::Star => '*',
        EntityKind::QuestionBlock => '?',
        EntityKind::Walker => 'w',
        EntityKind::Shell => 's',
        EntityKind::Flying => 'f',
        EntityKind::Spitter => 'p',
        EntityKind::Spike => '^',
        EntityKind::Thwomp => 'T',
        EntityKind::Checkpoint => 'C',
        EntityKind::Spring => 'j',
    }
}

/// Render columns `from..from + cols` of `level`, one text line per tile row.
///
/// Entities overwrite tiles; spawn and goal are drawn last so they stay
/// visible. Moving platforms show as `~` at their start position.
pub fn render_ascii(level: &GeneratedLevel, from: usize, cols: Option<usize>) -> String {
    let width = level.width as usize;
    let from = from.min(width);
    let to = cols.map_or(width, |c| (from + c).min(width));
    let tile_size = level.tile_size.max(1);

    let mut rows: Vec<Vec<char>> = level
        .tile_grid
        .iter()
        .map(|row| {
            (from..to)
                .map(|x| row.get(x).copied().map_or(' ', tile_glyph))
                .collect()
        })
        .collect();

    let mut plot = |x: i32, y: i32, glyph: char| {
        let (tx, ty) = (x.div_euclid(tile_size), y.div_euclid(tile_size));
        if tx < from as i32 || tx >= to as i32 || ty < 0 {
            return;
        }
        if let Some(row) = rows.get_mut(ty as usize) {
            row[tx as usize - from] = glyph;
        }
    };

    for p in &level.moving_platforms {
        plot(p.x, p.y, '~');
    }
    let (markers, others): (Vec<_>, Vec<_>) = level
        .entities
        .iter()
        .partition(|e| matches!(e.kind, EntityKind::Spawn | EntityKind::Goal));
    for e in others.into_iter().chain(markers) {
        plot(e.x, e.y, entity_glyph(e.kind));
    }

    let mut out = format!(
        "{}-{} {} seed {} ({}x{} tiles, columns {}..{})\n",
        level.metadata.world,
        level.metadata.level_index,
        level.metadata.theme.as_str(),
        level.metadata.seed,
        level.width,
        level.height,
        from,
        to
    );
    for row in rows {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
