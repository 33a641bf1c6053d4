//! Map transport points and area unlocks.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::content::ContentStore;
use crate::core::{
    EventTrigger, Packet, Player, QueuedEvent, RulesConfig, SceneFacade, SceneId, ScriptEventKind,
};

/// Per-player unlocked map points and areas, keyed by scene.
#[derive(Clone, Debug, Default)]
pub struct MapUnlocks {
    points: FxHashMap<u32, FxHashSet<u32>>,
    areas: FxHashMap<u32, FxHashSet<u32>>,
}

impl MapUnlocks {
    /// Is a transport point unlocked?
    #[must_use]
    pub fn has_point(&self, scene: u32, point: u32) -> bool {
        self.points.get(&scene).is_some_and(|set| set.contains(&point))
    }

    /// Is an area unlocked?
    #[must_use]
    pub fn has_area(&self, scene: u32, area: u32) -> bool {
        self.areas.get(&scene).is_some_and(|set| set.contains(&area))
    }

    pub(crate) fn insert_point(&mut self, scene: u32, point: u32) -> bool {
        self.points.entry(scene).or_default().insert(point)
    }

    pub(crate) fn remove_point(&mut self, scene: u32, point: u32) -> bool {
        self.points.get_mut(&scene).is_some_and(|set| set.remove(&point))
    }

    pub(crate) fn insert_area(&mut self, scene: u32, area: u32) -> bool {
        self.areas.entry(scene).or_default().insert(area)
    }
}

/// Unlock a transport point: record it, grant the unlock reward, fire
/// the quest and script events, notify the client.
///
/// False when the point does not exist in content or is already
/// unlocked; nothing is granted or fired in either case.
pub(crate) fn unlock_trans_point(
    player: &Player,
    content: &ContentStore,
    config: &RulesConfig,
    scene: &dyn SceneFacade,
    scene_id: SceneId,
    point: u32,
    is_statue: bool,
) -> bool {
    if !content.has_scene_point(scene_id.raw(), point) {
        debug!(%scene_id, point, "unknown transport point");
        return false;
    }
    if !player.map_unlocks.lock().insert_point(scene_id.raw(), point) {
        return false;
    }

    {
        let mut ledger = player.ledger.lock();
        ledger.add(config.point_reward_item, u64::from(config.point_reward_count));
        let exp = if is_statue {
            config.statue_exp_count
        } else {
            config.point_exp_count
        };
        ledger.add(config.point_exp_item, u64::from(exp));
    }

    player.queue_event(QueuedEvent::new(
        EventTrigger::UnlockTransPoint,
        [i64::from(scene_id.raw()), i64::from(point)],
    ));
    scene.call_script_event(
        ScriptEventKind::UnlockTransPoint,
        &[i64::from(scene_id.raw()), i64::from(point)],
    );
    player.send_packet(Packet::ScenePointUnlock {
        scene: scene_id.raw(),
        point,
        locked: false,
    });
    true
}

/// Re-lock a transport point (administrative path).
pub(crate) fn lock_trans_point(
    player: &Player,
    content: &ContentStore,
    scene_id: SceneId,
    point: u32,
) -> bool {
    if !content.has_scene_point(scene_id.raw(), point) {
        return false;
    }
    if !player.map_unlocks.lock().remove_point(scene_id.raw(), point) {
        return false;
    }

    player.send_packet(Packet::ScenePointUnlock {
        scene: scene_id.raw(),
        point,
        locked: true,
    });
    true
}

/// Unlock a map area and fire the corresponding quest event.
pub(crate) fn unlock_scene_area(player: &Player, scene_id: SceneId, area: u32) {
    player.map_unlocks.lock().insert_area(scene_id.raw(), area);

    player.send_packet(Packet::SceneAreaUnlock {
        scene: scene_id.raw(),
        area,
    });
    player.queue_event(QueuedEvent::new(
        EventTrigger::UnlockArea,
        [i64::from(scene_id.raw()), i64::from(area)],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_unlocks_sets() {
        let mut unlocks = MapUnlocks::default();

        assert!(unlocks.insert_point(3, 7));
        assert!(!unlocks.insert_point(3, 7));
        assert!(unlocks.has_point(3, 7));
        assert!(!unlocks.has_point(4, 7));

        assert!(unlocks.remove_point(3, 7));
        assert!(!unlocks.remove_point(3, 7));

        assert!(unlocks.insert_area(3, 1));
        assert!(unlocks.has_area(3, 1));
    }
}
