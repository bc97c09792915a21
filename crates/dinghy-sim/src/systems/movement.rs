//! Movement system: integrates every hull one tick.

use std::sync::Arc;

use hecs::{Entity, World};

use dinghy_core::boat::BoatMetrics;
use dinghy_core::flow::{WaterField, WindField};

use crate::components::{Helm, Hull, Progress};
use crate::kinematics;

/// Turn, accelerate and move every racing boat. Returns the boats that
/// completed a mark rounding this tick.
pub fn run(world: &mut World, wind: &dyn WindField, water: &dyn WaterField, dt: f64) -> Vec<Entity> {
    let mut rounded = Vec::new();
    for (entity, (hull, helm, metrics, progress)) in
        world.query_mut::<(&mut Hull, &mut Helm, &Arc<BoatMetrics>, &Progress)>()
    {
        if progress.is_retired() {
            continue;
        }
        let wind_here = wind.flow_at(&hull.location);
        let water_here = water.flow_at(&hull.location);
        if kinematics::step(hull, &mut helm.decision, metrics, wind_here, water_here, dt) {
            rounded.push(entity);
        }
    }
    rounded
}
