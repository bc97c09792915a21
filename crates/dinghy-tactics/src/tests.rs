use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences, Channel};
use dinghy_core::course::{Course, Leg};
use dinghy_core::enums::{Action, LegType, RoundingSense, Tack, TurnSense};
use dinghy_core::errors::ConfigError;
use dinghy_core::flow::{Flow, UniformFlow};
use dinghy_core::types::{DistanceVector, Location};

use crate::classify::{classify, LegThresholds};
use crate::context::{laying_tack, BoatView, SteeringContext};
use crate::rounding::{FinalCourse, RoundingRule, RoundingStage};
use crate::sailing::{clamp_to_close_hauled, PointOfSail, SailingRule};
use crate::strategy::{validate_course, within_rounding_range, AfterFinish, Phase, Strategy};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn leg(start: Location, end: Location, rounding: RoundingSense) -> Leg {
    Leg {
        index: 0,
        start,
        end,
        rounding,
    }
}

#[allow(clippy::too_many_arguments)]
fn context<'a>(
    position: Location,
    heading: f64,
    wind: f64,
    mean_wind: f64,
    leg: &'a Leg,
    leg_type: LegType,
    metrics: &'a BoatMetrics,
    prefs: &'a BoatPreferences,
) -> SteeringContext<'a> {
    SteeringContext {
        position,
        heading: Angle::new(heading),
        wind: Flow::new(5.0, Angle::new(wind)),
        mean_wind: Angle::new(mean_wind),
        leg,
        leg_type,
        metrics,
        prefs,
    }
}

// ---- Classification ----

#[test]
fn test_classification_boundaries_are_inclusive() {
    let metrics = BoatMetrics::dinghy();
    let thresholds = LegThresholds::for_boat(&metrics, &BoatPreferences::racer());
    let wind = Angle::new(0.0);

    let cases = [
        (0.0, LegType::Windward),
        (45.0, LegType::Windward),
        (315.0, LegType::Windward),
        (45.5, LegType::Offwind),
        (90.0, LegType::Offwind),
        (139.5, LegType::Offwind),
        (140.0, LegType::GybingDownwind),
        (220.0, LegType::GybingDownwind),
        (180.0, LegType::GybingDownwind),
    ];
    for (bearing, expected) in cases {
        let first = classify(&thresholds, Some(Angle::new(bearing)), wind);
        let second = classify(&thresholds, Some(Angle::new(bearing)), wind);
        assert_eq!(first, expected, "bearing {bearing}");
        assert_eq!(first, second, "classification must be deterministic");
    }
}

#[test]
fn test_classification_without_gybing() {
    let metrics = BoatMetrics::dinghy();
    let thresholds = LegThresholds::for_boat(&metrics, &BoatPreferences::default());
    assert_eq!(
        classify(&thresholds, Some(Angle::new(180.0)), Angle::new(0.0)),
        LegType::Offwind
    );
    assert_eq!(classify(&thresholds, None, Angle::new(0.0)), LegType::None);
}

#[test]
fn test_laying_tack_per_rounding() {
    assert_eq!(laying_tack(LegType::Windward, RoundingSense::Port), Tack::Starboard);
    assert_eq!(laying_tack(LegType::Windward, RoundingSense::Starboard), Tack::Port);
    assert_eq!(laying_tack(LegType::GybingDownwind, RoundingSense::Port), Tack::Port);
    assert_eq!(
        laying_tack(LegType::GybingDownwind, RoundingSense::Starboard),
        Tack::Starboard
    );
}

// ---- Sailing rules ----

/// A long beat towards a mark 1000 m up the 45 degree wind.
fn beat() -> Leg {
    let start = Location::default();
    let end = start.offset(&DistanceVector::new(1000.0, Angle::new(45.0)));
    leg(start, end, RoundingSense::Port)
}

#[test]
fn test_close_hauled_holds_course() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences {
        tack_if_headed: true,
        ..BoatPreferences::default()
    };
    let leg = beat();
    let ctx = context(Location::default(), 0.0, 45.0, 45.0, &leg, LegType::Windward, &metrics, &prefs);
    assert_eq!(ctx.tack(), Tack::Starboard);

    let verdict = SailingRule::Windward(ctx.tack()).evaluate(&ctx);
    assert_eq!(verdict.decision.action, Action::SailOn);
}

#[test]
fn test_headed_boat_tacks() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences {
        tack_if_headed: true,
        ..BoatPreferences::default()
    };
    let leg = beat();
    // Wind 45 heading 0 is close-hauled on starboard; a wind of 0 would put
    // the boat head to wind, where it counts as port. The headed case is
    // therefore the wind backing from 45 to 35. Tacking from starboard then
    // swings the bow clockwise onto port at 80, not counter-clockwise.
    let ctx = context(Location::default(), 0.0, 35.0, 45.0, &leg, LegType::Windward, &metrics, &prefs);
    assert_eq!(ctx.tack(), Tack::Starboard);

    let verdict = SailingRule::Windward(Tack::Starboard).evaluate(&ctx);
    assert_eq!(verdict.decision.action, Action::Turn);
    assert!(close(verdict.decision.target.degrees(), 80.0));
    assert_eq!(verdict.decision.sense, TurnSense::Starboard);
}

#[test]
fn test_headed_boat_bears_away() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences {
        bear_away_if_headed: true,
        ..BoatPreferences::default()
    };
    let leg = beat();
    let ctx = context(Location::default(), 0.0, 35.0, 45.0, &leg, LegType::Windward, &metrics, &prefs);

    let verdict = SailingRule::Windward(Tack::Starboard).evaluate(&ctx);
    assert_eq!(verdict.decision.action, Action::Turn);
    assert!(close(verdict.decision.target.degrees(), 350.0));
    assert_eq!(verdict.decision.sense, TurnSense::Port);
}

#[test]
fn test_lifted_boat_luffs_up() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences {
        luff_up_if_lifted: true,
        ..BoatPreferences::default()
    };
    let leg = beat();
    let ctx = context(Location::default(), 0.0, 55.0, 45.0, &leg, LegType::Windward, &metrics, &prefs);

    let verdict = SailingRule::Windward(Tack::Starboard).evaluate(&ctx);
    assert_eq!(verdict.decision.action, Action::Turn);
    assert!(close(verdict.decision.target.degrees(), 10.0));
    assert_eq!(verdict.decision.sense, TurnSense::Starboard);
}

#[test]
fn test_best_tack_wins_over_headed() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences {
        sail_on_best_tack: true,
        bear_away_if_headed: true,
        ..BoatPreferences::default()
    };
    let leg = beat();
    let ctx = context(Location::default(), 0.0, 35.0, 45.0, &leg, LegType::Windward, &metrics, &prefs);

    let verdict = SailingRule::Windward(Tack::Starboard).evaluate(&ctx);
    assert_eq!(verdict.reason, "tacking onto the favoured tack");
    assert!(close(verdict.decision.target.degrees(), 80.0));
}

#[test]
fn test_favoured_tack_follows_shift() {
    let mean = Angle::new(0.0);
    let veered = Angle::new(10.0);
    let backed = Angle::new(350.0);

    assert_eq!(PointOfSail::Upwind.favoured_tack(veered, mean), Some(Tack::Starboard));
    assert_eq!(PointOfSail::Upwind.favoured_tack(backed, mean), Some(Tack::Port));
    assert_eq!(PointOfSail::Downwind.favoured_tack(veered, mean), Some(Tack::Port));
    assert_eq!(PointOfSail::Downwind.favoured_tack(backed, mean), Some(Tack::Starboard));
    assert_eq!(PointOfSail::Upwind.favoured_tack(mean, mean), None);
}

#[test]
fn test_layline_tack_when_overstanding() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::default();
    let mark = Location::new(0.0, 500.0);
    let leg = leg(Location::default(), mark, RoundingSense::Port);
    // Far out to the right on port tack: the aim point is now behind the beam.
    let ctx = context(Location::new(600.0, 400.0), 45.0, 0.0, 0.0, &leg, LegType::Windward, &metrics, &prefs);

    let verdict = SailingRule::Windward(Tack::Port).evaluate(&ctx);
    assert_eq!(verdict.reason, "on the layline: tacking");
    assert!(close(verdict.decision.target.degrees(), 315.0));
    assert_eq!(verdict.decision.sense, TurnSense::Port);
}

#[test]
fn test_layline_has_priority_at_quadrant_edge() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::default();
    let run = leg(Location::new(0.0, 500.0), mark, RoundingSense::Port);

    // Wind from 40: starboard gybe sails 260, port gybe sails 180.
    let mut ctx = context(Location::default(), 260.0, 40.0, 40.0, &run, LegType::GybingDownwind, &metrics, &prefs);
    let aim = ctx.aim_point();
    // Directly up-course of the aim point: bearing exactly 180, the
    // quadrant's edge on the port-gybe course.
    ctx.position = Location::new(aim.x, aim.y + 100.0);
    assert_eq!(ctx.position.bearing_to(&aim).degrees(), 180.0);
    assert_eq!(ctx.tack(), Tack::Starboard);

    let verdict = SailingRule::GybingDownwind(Tack::Starboard).evaluate(&ctx);
    assert_eq!(verdict.decision.action, Action::Turn);
    assert_eq!(verdict.reason, "on the layline: gybing");
    assert_eq!(verdict.decision.target.degrees(), 180.0);
    assert_eq!(verdict.decision.sense, TurnSense::Port);
}

#[test]
fn test_fetchable_aim_is_steered_for() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::new(0.0, 500.0);
    let leg = leg(Location::default(), mark, RoundingSense::Port);
    // Well left of the mark on port tack: the aim point is free to lay.
    let ctx = context(Location::new(-400.0, 300.0), 45.0, 0.0, 0.0, &leg, LegType::Windward, &metrics, &prefs);

    let verdict = SailingRule::Windward(Tack::Port).evaluate(&ctx);
    assert_eq!(verdict.reason, "fetching the aim point");
    let aim_bearing = ctx.position.bearing_to(&ctx.aim_point());
    assert_eq!(verdict.decision.target, aim_bearing);
    assert!(aim_bearing.degrees() > 45.0 && aim_bearing.degrees() < 90.0);
}

#[test]
fn test_channel_sends_boat_back() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences {
        channel: Some(Channel { half_width: 50.0 }),
        ..BoatPreferences::default()
    };
    let leg = leg(Location::default(), Location::new(0.0, 1000.0), RoundingSense::Port);

    let leaving = context(Location::new(60.0, 300.0), 45.0, 0.0, 0.0, &leg, LegType::Windward, &metrics, &prefs);
    let verdict = SailingRule::Windward(Tack::Port).evaluate(&leaving);
    assert_eq!(verdict.reason, "leaving the channel");
    assert!(close(verdict.decision.target.degrees(), 315.0));

    let returning = context(Location::new(60.0, 300.0), 315.0, 0.0, 0.0, &leg, LegType::Windward, &metrics, &prefs);
    let verdict = SailingRule::Windward(Tack::Starboard).evaluate(&returning);
    assert_eq!(verdict.decision.action, Action::SailOn);
}

#[test]
fn test_offwind_steers_for_aim() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let reach = leg(Location::default(), Location::new(500.0, 0.0), RoundingSense::Port);
    let ctx = context(Location::default(), 80.0, 0.0, 0.0, &reach, LegType::Offwind, &metrics, &prefs);

    let verdict = SailingRule::Offwind.evaluate(&ctx);
    assert_eq!(verdict.decision.action, Action::Turn);
    assert_eq!(verdict.decision.sense, TurnSense::Starboard);
    assert!(verdict.decision.target.degrees() > 85.0);
}

#[test]
fn test_clamp_to_close_hauled() {
    let wind = Angle::new(0.0);
    assert!(close(clamp_to_close_hauled(Angle::new(10.0), wind, 45.0).degrees(), 45.0));
    assert!(close(clamp_to_close_hauled(Angle::new(350.0), wind, 45.0).degrees(), 315.0));
    assert!(close(clamp_to_close_hauled(Angle::new(90.0), wind, 45.0).degrees(), 90.0));
}

// ---- Rounding ----

#[test]
fn test_unsupported_transition_is_config_error() {
    let metrics = BoatMetrics::dinghy();
    let err = RoundingRule::new(LegType::None, LegType::Windward, RoundingSense::Port, None, &metrics)
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnsupportedTransition {
            this_leg: LegType::None,
            next_leg: LegType::Windward,
            rounding: RoundingSense::Port,
        }
    );
}

#[test]
fn test_final_course_picks_first_heading_reached() {
    let gybing = FinalCourse::FixedOffsetFromWind { off_wind: 140.0 };
    let heading = Angle::new(0.0);
    let wind = Angle::new(0.0);
    assert!(close(gybing.resolve(heading, wind, TurnSense::Starboard).degrees(), 140.0));
    assert!(close(gybing.resolve(heading, wind, TurnSense::Port).degrees(), 220.0));
    assert_eq!(
        FinalCourse::HoldHeading.resolve(Angle::new(123.0), wind, TurnSense::Port),
        Angle::new(123.0)
    );
}

#[test]
fn test_trigger_stays_true_once_mark_passes_abeam() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let reach = leg(Location::new(0.0, -200.0), Location::new(-10.0, 0.0), RoundingSense::Port);
    let rule = RoundingRule::new(LegType::Offwind, LegType::None, RoundingSense::Port, None, &metrics)
        .unwrap();

    let mut fired = false;
    for step in -50..=50 {
        let position = Location::new(0.0, step as f64);
        let ctx = context(position, 0.0, 90.0, 90.0, &reach, LegType::Offwind, &metrics, &prefs);
        let triggered = rule.triggered(&ctx);
        if fired {
            assert!(triggered, "trigger dropped at y = {step}");
        }
        if step < 0 {
            assert!(!triggered, "mark still ahead at y = {step}");
        }
        fired |= triggered;
    }
    assert!(fired);
}

#[test]
fn test_starboard_rounding_trigger_quadrant() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let reach = leg(Location::new(0.0, -200.0), Location::new(10.0, 0.0), RoundingSense::Starboard);
    let rule = RoundingRule::new(LegType::Offwind, LegType::None, RoundingSense::Starboard, None, &metrics)
        .unwrap();

    let ahead = context(Location::new(0.0, -5.0), 0.0, 270.0, 270.0, &reach, LegType::Offwind, &metrics, &prefs);
    assert!(!rule.triggered(&ahead));
    let behind = context(Location::new(0.0, 5.0), 0.0, 270.0, 270.0, &reach, LegType::Offwind, &metrics, &prefs);
    assert!(rule.triggered(&behind));
}

#[test]
fn test_large_rounding_turn_is_split() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::new(0.0, 500.0);
    let beat = leg(Location::default(), mark, RoundingSense::Port);
    let rule = RoundingRule::new(
        LegType::Windward,
        LegType::GybingDownwind,
        RoundingSense::Port,
        Some(Angle::new(180.0)),
        &metrics,
    )
    .unwrap();

    let mut heading = Angle::new(315.0);
    let mut stage = RoundingStage::Turning;
    let mut actions = Vec::new();
    for _ in 0..20 {
        let ctx = context(Location::new(5.0, 505.0), heading.degrees(), 0.0, 0.0, &beat, LegType::Windward, &metrics, &prefs);
        let verdict = rule.evaluate(&ctx, &mut stage);
        let decision = verdict.decision;
        assert_eq!(decision.sense, TurnSense::Port);
        actions.push(decision.action);

        let remaining = decision.sense.rotation(heading, decision.target);
        heading = decision.sense.rotate(heading, remaining.min(15.0));
        if decision.action == Action::MarkRounding && heading == decision.target {
            break;
        }
    }

    assert_eq!(actions.first(), Some(&Action::Turn));
    assert_eq!(actions.last(), Some(&Action::MarkRounding));
    assert!(close(heading.degrees(), 220.0));
}

#[test]
fn test_first_rounding_step_is_ninety_degrees() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let beat = leg(Location::default(), Location::new(0.0, 500.0), RoundingSense::Port);
    let rule = RoundingRule::new(
        LegType::Windward,
        LegType::GybingDownwind,
        RoundingSense::Port,
        Some(Angle::new(180.0)),
        &metrics,
    )
    .unwrap();
    let mut stage = RoundingStage::Turning;
    let ctx = context(Location::new(5.0, 505.0), 315.0, 0.0, 0.0, &beat, LegType::Windward, &metrics, &prefs);

    let verdict = rule.evaluate(&ctx, &mut stage);
    assert_eq!(verdict.decision.action, Action::Turn);
    assert!(close(verdict.decision.target.degrees(), 225.0));
}

#[test]
fn test_turn_stage_latches() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let reach = leg(Location::new(0.0, -200.0), Location::new(-10.0, 0.0), RoundingSense::Port);
    let rule = RoundingRule::new(LegType::Offwind, LegType::None, RoundingSense::Port, None, &metrics)
        .unwrap();
    let mut stage = RoundingStage::Approach;

    let before = context(Location::new(0.0, -30.0), 0.0, 90.0, 90.0, &reach, LegType::Offwind, &metrics, &prefs);
    rule.evaluate(&before, &mut stage);
    assert_eq!(stage, RoundingStage::Approach);

    let after = context(Location::new(0.0, 5.0), 0.0, 90.0, 90.0, &reach, LegType::Offwind, &metrics, &prefs);
    let verdict = rule.evaluate(&after, &mut stage);
    assert_eq!(stage, RoundingStage::Turning);
    assert_eq!(verdict.decision.action, Action::MarkRounding);

    // Turning away moves the mark out of the quadrant; the stage stays.
    let turned = context(Location::new(0.0, 5.0), 270.0, 90.0, 90.0, &reach, LegType::Offwind, &metrics, &prefs);
    assert!(!rule.triggered(&turned));
    rule.evaluate(&turned, &mut stage);
    assert_eq!(stage, RoundingStage::Turning);
}

#[test]
fn test_trigger_tolerates_mark_just_past_astern() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::new(0.0, 400.0);
    let beat = leg(Location::default(), mark, RoundingSense::Port);
    let rule = RoundingRule::new(
        LegType::Windward,
        LegType::GybingDownwind,
        RoundingSense::Port,
        Some(Angle::new(180.0)),
        &metrics,
    )
    .unwrap();

    // Fetched the aim point on port and sailed over the mark: it now bears
    // 225 with the heading at 45.6, a touch to starboard of dead astern.
    let over = mark.offset(&DistanceVector::new(10.0, Angle::new(45.0)));
    let ctx = context(over, 45.6, 0.0, 0.0, &beat, LegType::Windward, &metrics, &prefs);
    assert!(close(ctx.position.bearing_to(&mark).degrees(), 225.0));
    assert!(rule.triggered(&ctx));

    // Well off to starboard of astern is still the wrong side.
    let wide = mark.offset(&DistanceVector::new(10.0, Angle::new(30.0)));
    let ctx = context(wide, 45.0, 0.0, 0.0, &beat, LegType::Windward, &metrics, &prefs);
    assert!(!rule.triggered(&ctx));
}

#[test]
fn test_starboard_trigger_tolerates_mark_just_past_astern() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::default();
    let reach = leg(Location::new(0.0, -200.0), mark, RoundingSense::Starboard);
    let rule = RoundingRule::new(LegType::Offwind, LegType::None, RoundingSense::Starboard, None, &metrics)
        .unwrap();

    let just_past = mark.offset(&DistanceVector::new(10.0, Angle::new(5.0)));
    let ctx = context(just_past, 0.0, 270.0, 270.0, &reach, LegType::Offwind, &metrics, &prefs);
    assert!(rule.triggered(&ctx));

    let wide = mark.offset(&DistanceVector::new(10.0, Angle::new(20.0)));
    let ctx = context(wide, 0.0, 270.0, 270.0, &reach, LegType::Offwind, &metrics, &prefs);
    assert!(!rule.triggered(&ctx));
}

#[test]
fn test_approach_turns_back_when_aim_falls_behind() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::default();
    let run = leg(Location::new(0.0, 400.0), mark, RoundingSense::Port);
    let rule = RoundingRule::new(
        LegType::GybingDownwind,
        LegType::Windward,
        RoundingSense::Port,
        Some(Angle::new(0.0)),
        &metrics,
    )
    .unwrap();

    // Swept past the leeward mark on its starboard side on starboard gybe.
    // The mark is behind but outside the trigger, the aim point is neither
    // fetchable nor beyond the layline.
    let position = mark.offset(&DistanceVector::new(40.0, Angle::new(210.0)));
    let ctx = context(position, 255.0, 0.0, 0.0, &run, LegType::GybingDownwind, &metrics, &prefs);
    assert_eq!(ctx.tack(), Tack::Starboard);
    assert!(!rule.triggered(&ctx));
    assert!(ctx.position.distance_to(&ctx.aim_point()) > 2.0 * ctx.mark_offset());

    let mut stage = RoundingStage::Approach;
    let verdict = rule.evaluate(&ctx, &mut stage);
    assert_eq!(stage, RoundingStage::Approach);
    assert_eq!(verdict.reason, "turning back for the aim point");
    assert_eq!(verdict.decision.action, Action::Turn);
    // Aim bears about 26 degrees: clamped to the port close-hauled course.
    assert!(close(verdict.decision.target.degrees(), 45.0));
    assert_eq!(verdict.decision.sense, TurnSense::Starboard);
}

#[test]
fn test_approach_holds_course_while_aim_is_forward() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mark = Location::new(0.0, 400.0);
    let beat = leg(Location::default(), mark, RoundingSense::Port);
    let rule = RoundingRule::new(
        LegType::Windward,
        LegType::GybingDownwind,
        RoundingSense::Port,
        Some(Angle::new(180.0)),
        &metrics,
    )
    .unwrap();

    // Below and left of the mark on starboard: keep beating to the layline.
    let ctx = context(Location::new(-5.0, 385.0), 315.0, 0.0, 0.0, &beat, LegType::Windward, &metrics, &prefs);
    let mut stage = RoundingStage::Approach;
    let verdict = rule.evaluate(&ctx, &mut stage);
    assert_eq!(verdict.reason, "approaching the mark");
    assert_eq!(verdict.decision.action, Action::SailOn);
}

// ---- Strategy ----

#[test]
fn test_phase_switches_once() {
    let mut phase = Phase::default();
    assert!(!phase.is_rounding());
    assert!(phase.enter_rounding());
    assert!(!phase.enter_rounding());
    assert_eq!(phase, Phase::Rounding(RoundingStage::Approach));
}

#[test]
fn test_rounding_range_windward() {
    let metrics = BoatMetrics::dinghy();
    let mark = Location::new(0.0, 100.0);
    let wind = Angle::new(0.0);
    assert!(within_rounding_range(LegType::Windward, &Location::new(0.0, 90.0), &mark, wind, &metrics));
    assert!(!within_rounding_range(LegType::Windward, &Location::new(0.0, 50.0), &mark, wind, &metrics));
    // Past the mark along the axis counts as in range.
    assert!(within_rounding_range(LegType::Windward, &Location::new(0.0, 150.0), &mark, wind, &metrics));
    assert!(within_rounding_range(LegType::Windward, &mark, &mark, wind, &metrics));
}

#[test]
fn test_rounding_range_downwind() {
    let metrics = BoatMetrics::dinghy();
    let mark = Location::default();
    let wind = Angle::new(0.0);
    assert!(within_rounding_range(LegType::GybingDownwind, &Location::new(0.0, 30.0), &mark, wind, &metrics));
    assert!(!within_rounding_range(LegType::GybingDownwind, &Location::new(0.0, 40.0), &mark, wind, &metrics));
    assert!(!within_rounding_range(LegType::Offwind, &Location::new(5.0, 100.0), &mark, wind, &metrics));
}

#[test]
fn test_leg_strategy_enters_rounding_near_mark() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let wind = UniformFlow::new(5.0, Angle::new(0.0));
    let course = Course::windward_leeward(Location::default(), Angle::new(0.0), 500.0, 1).unwrap();
    let mut strategy = Strategy::for_leg(&course, 0, &metrics, &prefs, &wind).unwrap();
    assert_eq!(strategy.leg_type(), LegType::Windward);

    let far = BoatView {
        position: Location::new(-20.0, 100.0),
        heading: Angle::new(315.0),
        wind: wind.flow,
        metrics: &metrics,
        prefs: &prefs,
    };
    strategy.decide(&far);
    assert_eq!(strategy.phase(), Some(Phase::Sailing));

    let near = BoatView {
        position: Location::new(-5.0, 490.0),
        ..far
    };
    strategy.decide(&near);
    assert!(strategy.phase().unwrap().is_rounding());

    // Sailing away again does not undo the switch.
    strategy.decide(&far);
    assert!(strategy.phase().unwrap().is_rounding());
}

#[test]
fn test_after_finish_stops_once_clear() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let mut after = AfterFinish::new(Location::default());
    let boat = |x: f64| BoatView {
        position: Location::new(x, 0.0),
        heading: Angle::new(90.0),
        wind: Flow::new(5.0, Angle::new(0.0)),
        metrics: &metrics,
        prefs: &prefs,
    };

    assert_eq!(after.decide(&boat(10.0)).decision.action, Action::SailOn);
    assert!(!after.is_stopped());
    assert_eq!(after.decide(&boat(30.0)).decision.action, Action::Stop);
    assert!(after.is_stopped());
    // Stays stopped even back inside the limit.
    assert_eq!(after.decide(&boat(10.0)).decision.action, Action::Stop);
    assert_eq!(after.decide(&boat(30.0)).decision.action, Action::Stop);
}

#[test]
fn test_strategy_past_last_leg_is_after_finish() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let wind = UniformFlow::new(5.0, Angle::new(0.0));
    let course = Course::windward_leeward(Location::default(), Angle::new(0.0), 500.0, 1).unwrap();
    let strategy = Strategy::for_leg(&course, 1, &metrics, &prefs, &wind).unwrap();
    assert!(matches!(strategy, Strategy::AfterFinish(_)));
    assert_eq!(strategy.phase(), None);
}

#[test]
fn test_degenerate_leg_fails_validation() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let wind = UniformFlow::new(5.0, Angle::new(0.0));
    let start = Location::default();
    let course = Course::from_marks(
        start,
        &[(start, RoundingSense::Port), (Location::new(0.0, 200.0), RoundingSense::Port)],
    )
    .unwrap();

    let err = validate_course(&course, &metrics, &prefs, &wind).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnsupportedTransition {
            this_leg: LegType::None,
            ..
        }
    ));
}

#[test]
fn test_windward_leeward_course_validates() {
    let metrics = BoatMetrics::dinghy();
    let prefs = BoatPreferences::racer();
    let wind = UniformFlow::new(5.0, Angle::new(0.0));
    let course = Course::windward_leeward(Location::default(), Angle::new(0.0), 400.0, 2).unwrap();
    assert!(validate_course(&course, &metrics, &prefs, &wind).is_ok());
}
