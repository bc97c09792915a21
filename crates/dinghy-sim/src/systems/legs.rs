//! Leg system: moves boats that completed a rounding on to their next leg.

use std::sync::Arc;

use hecs::{Entity, World};
use tracing::{debug, error, info};

use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::course::Course;
use dinghy_core::decision::Decision;
use dinghy_core::flow::WindField;
use dinghy_tactics::Strategy;

use crate::components::{Boat, Helm, Progress};

/// Advance each boat in `rounded` by one leg and give it a fresh strategy.
/// A boat whose next strategy cannot be built is retired; the rest of the
/// fleet races on.
pub fn run(world: &mut World, rounded: &[Entity], course: &Course, wind: &dyn WindField, tick: u64) {
    for &entity in rounded {
        let Ok((boat, helm, metrics, prefs, progress)) = world.query_one_mut::<(
            &Boat,
            &mut Helm,
            &Arc<BoatMetrics>,
            &BoatPreferences,
            &mut Progress,
        )>(entity) else {
            continue;
        };

        let next_leg = progress.leg + 1;
        match Strategy::for_leg(course, next_leg, metrics, prefs, wind) {
            Ok(strategy) => {
                progress.leg = next_leg;
                if next_leg == course.len() {
                    progress.finish_tick = Some(tick);
                    info!(boat = boat.id, name = %boat.name, tick, "finished");
                } else {
                    debug!(
                        boat = boat.id,
                        leg = next_leg,
                        leg_type = %strategy.leg_type(),
                        "rounded mark"
                    );
                }
                helm.strategy = strategy;
            }
            Err(e) => {
                error!(boat = boat.id, leg = next_leg, error = %e, "retiring boat");
                progress.retired = Some(e.to_string());
                helm.decision = Decision::stop();
            }
        }
    }
}
