//! Snapshot system: reads the world and builds a `RaceSnapshot`.
//!
//! Read-only; never modifies the world.

use hecs::World;

use dinghy_core::flow::Flow;
use dinghy_core::state::{BoatStatus, LegPhase, RaceSnapshot};
use dinghy_core::types::SimTime;

use crate::components::{Boat, Helm, Hull, Progress};

pub fn build_snapshot(world: &World, time: &SimTime, wind: Flow) -> RaceSnapshot {
    let mut boats: Vec<BoatStatus> = world
        .query::<(&Boat, &Hull, &Helm, &Progress)>()
        .iter()
        .map(|(_, (boat, hull, helm, progress))| BoatStatus {
            id: boat.id,
            name: boat.name.clone(),
            location: hull.location,
            heading: hull.heading,
            speed: hull.speed,
            leg: progress.leg,
            leg_type: helm.strategy.leg_type(),
            phase: leg_phase(helm, progress),
            action: helm.decision.action,
            finish_tick: progress.finish_tick,
        })
        .collect();
    boats.sort_by_key(|b| b.id);

    let finished = boats.iter().filter(|b| b.finish_tick.is_some()).count();
    RaceSnapshot {
        time: *time,
        wind,
        boats,
        finished,
    }
}

fn leg_phase(helm: &Helm, progress: &Progress) -> LegPhase {
    if progress.is_retired() {
        return LegPhase::Retired;
    }
    match helm.strategy.phase() {
        Some(phase) if phase.is_rounding() => LegPhase::Rounding,
        Some(_) => LegPhase::Sailing,
        None => LegPhase::Finished,
    }
}
