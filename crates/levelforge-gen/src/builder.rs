//! Mutable level under construction, shared by both layout paths.

use levelforge_core::constants::{LEVEL_HEIGHT, TILE_EMPTY, TILE_ONE_WAY, TILE_SIZE, TILE_SOLID};
use levelforge_core::level::{
    Checkpoint, EntityData, EntityKind, EntityValue, GeneratedLevel, LevelEntity, LevelMetadata,
    MovingPlatform, OneWayPlatform,
};
use levelforge_core::types::{empty_grid, PixelPoint, TileGrid};

pub(crate) struct LevelBuilder {
    width: i32,
    grid: TileGrid,
    entities: Vec<LevelEntity>,
    one_way_platforms: Vec<OneWayPlatform>,
    moving_platforms: Vec<MovingPlatform>,
    checkpoints: Vec<Checkpoint>,
}

impl LevelBuilder {
    /// An all-empty level `width` tiles wide and `LEVEL_HEIGHT` tall.
    pub fn new(width: i32) -> Self {
        let width = width.max(0);
        Self {
            width,
            grid: empty_grid(width as usize, LEVEL_HEIGHT as usize),
            entities: Vec::new(),
            one_way_platforms: Vec::new(),
            moving_platforms: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    fn set_tile(&mut self, x: i32, y: i32, tile: u8) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(cell) = self
            .grid
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = tile;
        }
    }

    /// Solid ground from row `top` down to the bottom of column `x`.
    pub fn fill_column(&mut self, x: i32, top: i32) {
        for y in top.max(0)..LEVEL_HEIGHT {
            self.set_tile(x, y, TILE_SOLID);
        }
    }

    /// Fill every column of `[x0, x1]` down from `top`.
    pub fn fill_columns(&mut self, x0: i32, x1: i32, top: i32) {
        for x in x0..=x1 {
            self.fill_column(x, top);
        }
    }

    /// Empty every tile of columns `[x0, x1]` from row `top` down.
    pub fn clear_range(&mut self, x0: i32, x1: i32, top: i32) {
        for x in x0..=x1 {
            for y in top.max(0)..LEVEL_HEIGHT {
                self.set_tile(x, y, TILE_EMPTY);
            }
        }
    }

    /// Place an entity at the centre of tile `(tx, ty)`; ids count up per level.
    pub fn add_entity(&mut self, kind: EntityKind, tx: i32, ty: i32, data: Option<EntityData>) {
        let pos = PixelPoint::tile_center(tx, ty);
        self.entities.push(LevelEntity {
            id: format!("{}_{}", kind.as_str(), self.entities.len() + 1),
            kind,
            x: pos.x,
            y: pos.y,
            data,
        });
    }

    /// Record a one-way platform rectangle without painting tiles.
    pub fn add_one_way(&mut self, x: i32, y: i32, w: i32) {
        self.one_way_platforms.push(OneWayPlatform { x, y, w });
    }

    /// Record a one-way platform and paint it `rows` tiles thick.
    pub fn paint_one_way(&mut self, x: i32, y: i32, w: i32, rows: i32) {
        for tx in x..x + w {
            for ty in y..y + rows {
                self.set_tile(tx, ty, TILE_ONE_WAY);
            }
        }
        self.add_one_way(x, y, w);
    }

    pub fn add_moving_platform(&mut self, platform: MovingPlatform) {
        self.moving_platforms.push(platform);
    }

    /// Checkpoint entity plus its respawn record, both at tile `(tx, ty)`.
    pub fn add_checkpoint(&mut self, id: String, tx: i32, ty: i32) {
        let mut data = EntityData::new();
        data.insert("checkpointId".into(), id.as_str().into());
        self.add_entity(EntityKind::Checkpoint, tx, ty, Some(data));
        self.checkpoints.push(Checkpoint {
            id,
            x: tx * TILE_SIZE,
            y: ty * TILE_SIZE,
        });
    }

    pub fn has_entity(&self, kind: EntityKind) -> bool {
        self.entities.iter().any(|e| e.kind == kind)
    }

    pub fn finish(self, metadata: LevelMetadata) -> GeneratedLevel {
        let goal = self
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Goal)
            .map(|e| PixelPoint { x: e.x, y: e.y })
            .unwrap_or_default();
        GeneratedLevel {
            tile_size: TILE_SIZE,
            width: self.width as u32,
            height: LEVEL_HEIGHT as u32,
            tile_grid: self.grid,
            one_way_platforms: self.one_way_platforms,
            moving_platforms: self.moving_platforms,
            entities: self.entities,
            checkpoints: self.checkpoints,
            goal,
            metadata,
        }
    }
}

/// Build an entity data map from `(key, value)` pairs.
pub(crate) fn data<const N: usize>(
    pairs: [(&str, EntityValue); N],
) -> Option<EntityData> {
    Some(pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelforge_core::world::Theme;

    fn metadata() -> LevelMetadata {
        LevelMetadata {
            world: 1,
            level_index: 1,
            theme: Theme::City,
            difficulty_tier: 1,
            chunks_used: Vec::new(),
            seed: 0,
            pacing: None,
        }
    }

    #[test]
    fn test_fill_and_clear() {
        let mut b = LevelBuilder::new(4);
        b.fill_columns(0, 3, 30);
        b.clear_range(1, 2, 30);
        let level = b.finish(metadata());
        assert_eq!(level.tile(0, 33), Some(TILE_SOLID));
        assert_eq!(level.tile(1, 31), Some(TILE_EMPTY));
        assert_eq!(level.tile(3, 29), Some(TILE_EMPTY));
        assert_eq!(level.tile(3, 30), Some(TILE_SOLID));
    }

    #[test]
    fn test_writes_outside_grid_are_dropped() {
        let mut b = LevelBuilder::new(2);
        b.fill_column(5, 0);
        b.paint_one_way(-1, -1, 4, 2);
        let level = b.finish(metadata());
        assert_eq!(level.tile_grid.len(), LEVEL_HEIGHT as usize);
        assert!(level.tile_grid.iter().all(|row| row.len() == 2));
        assert_eq!(level.tile(0, 0), Some(TILE_ONE_WAY));
    }

    #[test]
    fn test_entity_ids_and_goal() {
        let mut b = LevelBuilder::new(10);
        b.add_entity(EntityKind::Spawn, 2, 24, None);
        b.add_entity(EntityKind::Coin, 3, 20, None);
        b.add_entity(EntityKind::Goal, 7, 23, None);
        assert!(b.has_entity(EntityKind::Goal));
        let level = b.finish(metadata());
        let ids: Vec<_> = level.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["spawn_1", "coin_2", "goal_3"]);
        assert_eq!(level.goal, PixelPoint::tile_center(7, 23));
    }

    #[test]
    fn test_checkpoint_records_entity_and_respawn() {
        let mut b = LevelBuilder::new(10);
        b.add_checkpoint("cp_1_1_3".into(), 5, 24);
        let level = b.finish(metadata());
        assert_eq!(level.checkpoints[0].x, 80);
        let entity = &level.entities[0];
        assert_eq!(entity.kind, EntityKind::Checkpoint);
        assert!(entity.data.as_ref().is_some_and(|d| d.contains_key("checkpointId")));
    }
}
