//! Collision system: applies projectile hits to enemies.

use hecs::{Entity, World};
use tracing::debug;

use rampart_core::components::{Enemy, Projectile};
use rampart_core::events::GameEvent;

use crate::collision::swept_hit;
use crate::economy::{Economy, ScoreState};

/// Test every unspent projectile against live enemies in id order. The first
/// enemy within `hit_radius` takes the damage and the projectile is spent.
pub fn run(
    world: &mut World,
    hit_radius: f64,
    economy: &mut Economy,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    let mut enemies: Vec<(Entity, Enemy)> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.alive)
        .map(|(entity, enemy)| (entity, enemy.clone()))
        .collect();
    if enemies.is_empty() {
        return;
    }
    enemies.sort_by_key(|(_, enemy)| enemy.id);

    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.spent {
            continue;
        }
        let Some((_, enemy)) = enemies
            .iter_mut()
            .find(|(_, enemy)| enemy.alive && swept_hit(projectile, enemy, hit_radius))
        else {
            continue;
        };

        projectile.spent = true;
        projectile.alive = false;
        enemy.hp -= projectile.damage;
        if enemy.hp <= 0 {
            enemy.alive = false;
            economy.earn(enemy.reward);
            score.enemies_killed += 1;
            debug!(enemy = enemy.id.0, reward = enemy.reward, "enemy killed");
            events.push(GameEvent::EnemyKilled {
                enemy: enemy.id,
                reward: enemy.reward,
            });
        }
    }

    for (entity, enemy) in enemies {
        if let Ok(mut stored) = world.get::<&mut Enemy>(entity) {
            *stored = enemy;
        }
    }
}
