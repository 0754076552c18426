//! Fire control system: every tower picks a target and may launch.

use hecs::World;

use rampart_core::components::{Enemy, Tower};
use rampart_core::events::GameEvent;
use rampart_core::types::SimTime;

use crate::economy::ScoreState;
use crate::path::Path;
use crate::targeting::{tower_tick, FireDecision, ProjectileSpec};
use crate::world_setup;

/// Run every tower for one tick and spawn the projectiles they fire.
pub fn run(
    world: &mut World,
    path: &Path,
    projectile_speed: f64,
    time: &SimTime,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    // Scan order decides ties, so enemies are sorted by id.
    let mut live_enemies: Vec<Enemy> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.alive)
        .map(|(_, enemy)| enemy.clone())
        .collect();
    live_enemies.sort_by_key(|enemy| enemy.id);

    let mut fired: Vec<ProjectileSpec> = Vec::new();
    for (_entity, tower) in world.query_mut::<&mut Tower>() {
        let (next, decision) = tower_tick(
            tower,
            &live_enemies,
            path,
            time.elapsed_secs,
            projectile_speed,
        );
        *tower = next;
        if let FireDecision::Fired(spec) = decision {
            fired.push(spec);
        }
    }

    fired.sort_by_key(|spec| spec.tower);
    for spec in fired {
        world_setup::spawn_projectile(world, &spec);
        score.shots_fired += 1;
        events.push(GameEvent::ProjectileFired {
            tower: spec.tower,
            target: spec.target,
            aim: spec.aim,
        });
    }
}
