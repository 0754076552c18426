//! Movement system: steps enemies along the path and projectiles toward
//! their aim points.

use hecs::World;
use tracing::info;

use rampart_core::components::{Enemy, EnemyId, Projectile};
use rampart_core::events::GameEvent;

use crate::economy::{Economy, ScoreState};
use crate::kinematics::{advance_enemy, advance_projectile, EnemyStep};
use crate::path::Path;

/// Move every live enemy. Enemies that walk off the end of the path damage
/// the base once each.
pub fn run_enemies(
    world: &mut World,
    path: &Path,
    dt: f64,
    leak_damage: u32,
    economy: &mut Economy,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    let mut leaked: Vec<EnemyId> = Vec::new();
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        let (next, step) = advance_enemy(enemy, path, dt);
        *enemy = next;
        if step == EnemyStep::ReachedEnd {
            leaked.push(enemy.id);
        }
    }

    leaked.sort();
    for enemy in leaked {
        let health_left = economy.damage_base(leak_damage);
        score.enemies_leaked += 1;
        info!(enemy = enemy.0, health_left, "enemy reached the base");
        events.push(GameEvent::EnemyReachedEnd { enemy, health_left });
    }
}

/// Move every projectile in flight.
pub fn run_projectiles(world: &mut World, dt: f64) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        let (next, _step) = advance_projectile(projectile, dt);
        *projectile = next;
    }
}
