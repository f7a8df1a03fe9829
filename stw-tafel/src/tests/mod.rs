use chrono::prelude::*;
use chrono::Duration;

use crate::derive::*;
use crate::reference::*;
use crate::time::*;
use crate::types::*;

fn dt(h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd(2024, 3, 10).and_hms(h, min, 0)
}

fn t(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms(h, min, 0)
}

fn stop() -> ScheduledStop {
    ScheduledStop {
        train_number: "4404".into(),
        train_type: "EIJ".into(),
        line: "1".into(),
        point_id: "124".into(),
        to_post_id: "2375".into(),
        to_post: "Zawiercie".into(),
        scheduled_arrival: t(12, 30),
        scheduled_departure: t(12, 32),
        station_index: 5,
        platform: Some("II".into()),
        secondary_posts: vec![],
        schedule_version: 1,
    }
}

fn telemetry(index: u32, distances: Vec<f64>) -> LiveTelemetry {
    LiveTelemetry {
        timetable_index: index,
        distances,
        train_class: Some("EIJ".into()),
        seq: 1,
    }
}

fn reference() -> ReferenceData {
    let mut refdata = ReferenceData::default();
    refdata.directions.insert(124, DirectionSets {
        left: vec![2375],
        right: vec![338],
        up: vec![],
        down: vec![],
    });
    refdata.badge_colours.insert("EIJ".into(), "blue".into());
    refdata
}

#[test]
fn resolves_early_morning_times_to_next_day() {
    for now_hour in 20..24 {
        for sched_hour in 0..12 {
            let now = dt(now_hour, 30);
            let resolved = resolve_scheduled_instant(now, t(sched_hour, 15));
            assert_eq!(resolved.date(), now.date() + Duration::days(1));
            assert_eq!(resolved.time(), t(sched_hour, 15));
        }
    }
}

#[test]
fn resolves_late_evening_times_to_previous_day() {
    for now_hour in 0..12 {
        for sched_hour in 20..24 {
            let now = dt(now_hour, 30);
            let resolved = resolve_scheduled_instant(now, t(sched_hour, 15));
            assert_eq!(resolved.date(), now.date() - Duration::days(1));
        }
    }
}

#[test]
fn resolves_everything_else_to_today() {
    // Neither rule fires: afternoon now, any hour; or both sides mid-day.
    for sched_hour in 0..24 {
        let resolved = resolve_scheduled_instant(dt(15, 0), t(sched_hour, 0));
        assert_eq!(resolved.date(), dt(15, 0).date());
    }
    assert_eq!(resolve_scheduled_instant(dt(23, 0), t(13, 0)).date(), dt(23, 0).date());
    assert_eq!(resolve_scheduled_instant(dt(5, 0), t(13, 0)).date(), dt(5, 0).date());
}

#[test]
fn resolver_is_pure() {
    let a = resolve_scheduled_instant(dt(23, 50), t(0, 10));
    let b = resolve_scheduled_instant(dt(23, 50), t(0, 10));
    assert_eq!(a, b);
}

#[test]
fn departure_just_past_midnight_is_not_yet_due() {
    let now = dt(23, 50);
    let expected = resolve_scheduled_instant(now, t(0, 10));
    assert_eq!(expected.date(), now.date() + Duration::days(1));
    assert_eq!(delay_mins(now, expected), -20);
}

#[test]
fn delay_is_signed_and_unclamped() {
    assert_eq!(delay_mins(dt(12, 45), dt(12, 30)), 15);
    assert_eq!(delay_mins(dt(12, 0), dt(12, 30)), -30);
}

#[test]
fn timetable_offset_ignores_the_calendar_day() {
    // 00:10 next day vs 23:50: a 20-minute gap on the full instant, but
    // the time-of-day comparison sees most of a day.
    let now = dt(23, 50);
    let expected = resolve_scheduled_instant(now, t(0, 10));
    assert_eq!(timetable_offset_mins(now, expected), 10 - (23 * 60 + 50));
}

#[test]
fn no_telemetry_means_not_passed() {
    assert!(!has_passed_station(&stop(), None));
}

#[test]
fn passage_needs_a_strictly_greater_index() {
    assert!(!has_passed_station(&stop(), Some(&telemetry(5, vec![0.3]))));
    assert!(has_passed_station(&stop(), Some(&telemetry(6, vec![0.3]))));
    assert!(!has_passed_station(&stop(), Some(&telemetry(4, vec![0.3]))));
}

#[test]
fn latest_distance_sample_is_rounded_to_2dp() {
    let tele = telemetry(5, vec![9.0, 4.5, 1.4249]);
    assert_eq!(tele.distance_from_station(), Some(1.42));
    assert_eq!(telemetry(5, vec![]).distance_from_station(), None);
}

#[test]
fn must_depart_when_close_and_departure_due() {
    let now = dt(12, 31);
    let expected_dep = dt(12, 32);
    // now == expected − 1min counts as due.
    assert!(must_depart_now(false, Some(1.42), DEFAULT_PROXIMITY_THRESHOLD, now, expected_dep));
    // Too far out.
    assert!(!must_depart_now(false, Some(1.5), DEFAULT_PROXIMITY_THRESHOLD, now, expected_dep));
    // Too early.
    assert!(!must_depart_now(false, Some(0.2), DEFAULT_PROXIMITY_THRESHOLD, dt(12, 30), expected_dep));
    // No telemetry, no notification.
    assert!(!must_depart_now(false, None, DEFAULT_PROXIMITY_THRESHOLD, now, expected_dep));
}

#[test]
fn must_depart_is_false_once_passed() {
    // Regardless of how close or how late.
    assert!(!must_depart_now(true, Some(0.0), DEFAULT_PROXIMITY_THRESHOLD, dt(13, 0), dt(12, 32)));
}

#[test]
fn must_depart_honours_per_station_threshold_override() {
    let mut refdata = reference();
    refdata.proximity_overrides.insert(124, 3.0);
    let tele = telemetry(5, vec![2.5]);
    let status = derive_row_status(&stop(), Some(&tele), &refdata, dt(12, 31), &FilterCriteria::default());
    assert!(status.must_depart_now);
    // Same distance under the default threshold: no notification.
    let status = derive_row_status(&stop(), Some(&tele), &reference(), dt(12, 31), &FilterCriteria::default());
    assert!(!status.must_depart_now);
}

#[test]
fn only_approaching_hides_passed_and_offline_rows() {
    let filter = FilterCriteria {
        only_approaching: true,
        max_range: Some(1000.0),
        max_time_mins: Some(1000),
        revision: 0,
    };
    assert!(!row_visible(&filter, true, false, Some(0.5), 0));
    assert!(!row_visible(&filter, false, true, None, 0));
    assert!(row_visible(&filter, false, false, Some(0.5), 0));
}

#[test]
fn max_range_hides_distant_rows() {
    let filter = FilterCriteria {
        only_approaching: false,
        max_range: Some(5.0),
        max_time_mins: None,
        revision: 0,
    };
    assert!(!row_visible(&filter, false, false, Some(7.3), 0));
    assert!(row_visible(&filter, false, false, Some(4.9), 0));
    // Offline rows carry no distance and slip through the range filter.
    assert!(row_visible(&filter, false, true, None, 0));
}

#[test]
fn max_time_hides_rows_outside_the_window() {
    let filter = FilterCriteria {
        only_approaching: false,
        max_range: None,
        max_time_mins: Some(30),
        revision: 0,
    };
    assert!(row_visible(&filter, false, false, None, -25));
    assert!(!row_visible(&filter, false, false, None, 31));
    assert!(!row_visible(&filter, false, false, None, -31));
}

#[test]
fn max_time_near_midnight_sees_a_spurious_gap() {
    // Time-of-day comparison: a train due 20 minutes from now, across
    // midnight, looks ~23.5 hours away and gets filtered.
    let filter = FilterCriteria {
        only_approaching: false,
        max_range: None,
        max_time_mins: Some(60),
        revision: 0,
    };
    let mut stop = stop();
    stop.scheduled_arrival = t(0, 10);
    stop.scheduled_departure = t(0, 12);
    let status = derive_row_status(&stop, Some(&telemetry(5, vec![3.0])), &reference(), dt(23, 50), &filter);
    assert!(!status.visible);
}

#[test]
fn filters_compose_with_and_semantics() {
    let filter = FilterCriteria {
        only_approaching: true,
        max_range: Some(5.0),
        max_time_mins: Some(30),
        revision: 0,
    };
    // Survives range and time, but is passed: hidden.
    assert!(!row_visible(&filter, true, false, Some(1.0), 5));
    // Approaching and near, but outside the time window: hidden.
    assert!(!row_visible(&filter, false, false, Some(1.0), 45));
    assert!(row_visible(&filter, false, false, Some(1.0), 5));
}

#[test]
fn heading_lookup_and_degradation() {
    let refdata = reference();
    assert_eq!(refdata.heading("124", "2375"), Some(Heading::Left));
    assert_eq!(refdata.heading("124", "338"), Some(Heading::Right));
    // Unknown destination, unknown post, unparseable ids: no arrow.
    assert_eq!(refdata.heading("124", "9999"), None);
    assert_eq!(refdata.heading("125", "2375"), None);
    assert_eq!(refdata.heading("not-a-post", "2375"), None);
    assert_eq!(refdata.heading("124", ""), None);
}

#[test]
fn unknown_train_types_get_the_default_badge() {
    let refdata = reference();
    assert_eq!(refdata.badge_colour("EIJ"), "blue");
    assert_eq!(refdata.badge_colour("TWR"), DEFAULT_BADGE_COLOUR);
}

#[test]
fn reference_data_loads_from_json() {
    let refdata = ReferenceData::from_json_slice(br#"{
        "directions": {"124": {"left": [2375]}},
        "badge_colours": {"EIJ": "blue"},
        "proximity_overrides": {"124": 3.0}
    }"#).unwrap();
    assert_eq!(refdata.heading("124", "2375"), Some(Heading::Left));
    assert_eq!(refdata.proximity_threshold("124"), 3.0);
    assert_eq!(refdata.proximity_threshold("999"), DEFAULT_PROXIMITY_THRESHOLD);
}

#[test]
fn offline_rows_derive_with_unknown_passage() {
    let status = derive_row_status(&stop(), None, &reference(), dt(12, 45), &FilterCriteria::default());
    assert!(status.offline);
    assert!(!status.has_passed_station);
    assert!(!status.must_depart_now);
    assert_eq!(status.distance_from_station, None);
    assert!(status.visible);
    assert_eq!(status.arrival_delay_mins, 15);
}

#[test]
fn derivation_is_idempotent() {
    let tele = telemetry(5, vec![1.42]);
    let filter = FilterCriteria::default();
    let a = derive_row_status(&stop(), Some(&tele), &reference(), dt(12, 31), &filter);
    let b = derive_row_status(&stop(), Some(&tele), &reference(), dt(12, 31), &filter);
    assert_eq!(a, b);
    assert!(a.must_depart_now);
    assert_eq!(a.heading, Some(Heading::Left));
    assert_eq!(a.badge_colour, "blue");
}

#[test]
fn fingerprint_moves_with_the_version_counters() {
    let tele = telemetry(5, vec![1.42]);
    let filter = FilterCriteria::default();
    let fp = RowFingerprint::new(&stop(), Some(&tele), &filter);
    assert_eq!(fp, RowFingerprint::new(&stop(), Some(&tele), &filter));

    let mut bumped = stop();
    bumped.schedule_version += 1;
    assert_ne!(fp, RowFingerprint::new(&bumped, Some(&tele), &filter));

    let mut fresh = tele.clone();
    fresh.seq += 1;
    assert_ne!(fp, RowFingerprint::new(&stop(), Some(&fresh), &filter));
    assert_ne!(fp, RowFingerprint::new(&stop(), None, &filter));

    let mut refiltered = filter.clone();
    refiltered.revision += 1;
    assert_ne!(fp, RowFingerprint::new(&stop(), Some(&tele), &refiltered));
}
