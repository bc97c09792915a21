//! Steering system: asks every racing boat's strategy for this tick's decision.
//!
//! Calls the strategy from dinghy-tactics with the boat's current view of
//! itself and the local wind, stores the decision on the helm, and writes
//! it to the decision log.

use std::sync::Arc;

use hecs::World;
use tracing::trace;

use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::flow::WindField;
use dinghy_tactics::BoatView;

use crate::components::{Boat, Helm, Hull, Progress};
use crate::log::{DecisionLog, DecisionRecord};

/// Run the steering system. Returns the number of records the log refused.
pub fn run(world: &mut World, wind: &dyn WindField, log: &mut dyn DecisionLog, tick: u64) -> usize {
    let mut refused = 0;
    for (_entity, (boat, hull, helm, metrics, prefs, progress)) in world.query_mut::<(
        &Boat,
        &Hull,
        &mut Helm,
        &Arc<BoatMetrics>,
        &BoatPreferences,
        &Progress,
    )>() {
        if progress.is_retired() {
            continue;
        }
        let view = BoatView {
            position: hull.location,
            heading: hull.heading,
            wind: wind.flow_at(&hull.location),
            metrics,
            prefs,
        };
        let verdict = helm.strategy.decide(&view);
        helm.decision = verdict.decision;
        helm.reason = verdict.reason;

        let record = DecisionRecord {
            tick,
            boat: boat.id,
            decision: verdict.decision,
            reason: verdict.reason,
        };
        if let Err(e) = log.record(record) {
            trace!(boat = boat.id, error = %e, "decision not logged");
            refused += 1;
        }
    }
    refused
}
