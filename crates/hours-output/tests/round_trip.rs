//! Rendered rows read back through the normalizer yield the same facts.

use std::collections::BTreeMap;

use hours_model::{CalendarDate, DayOfWeek, Interval, RawFacts, ScheduleFact, WeekOfMonth};
use hours_normalize::normalize;
use hours_output::{TimeFormat, expand, row_to_raw_entry};
use proptest::prelude::*;

fn day() -> impl Strategy<Value = DayOfWeek> {
    prop::sample::select(DayOfWeek::ALL.to_vec())
}

fn week() -> impl Strategy<Value = WeekOfMonth> {
    prop::sample::select(vec![
        WeekOfMonth::First,
        WeekOfMonth::Second,
        WeekOfMonth::Third,
        WeekOfMonth::Fourth,
        WeekOfMonth::Fifth,
        WeekOfMonth::Last,
    ])
}

fn intervals() -> impl Strategy<Value = Vec<Interval>> {
    (1usize..=3)
        .prop_flat_map(|pairs| prop::collection::btree_set(1u16..1440, pairs * 2))
        .prop_map(|bounds| {
            let bounds: Vec<u16> = bounds.into_iter().collect();
            bounds
                .chunks(2)
                .map(|pair| Interval::new(pair[0], pair[1]))
                .collect()
        })
}

fn note() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z]{1,10}( [a-z]{1,10})?")
}

fn date() -> impl Strategy<Value = CalendarDate> {
    (prop::option::of(2000i32..2100), 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| CalendarDate::new(year, month, day).expect("valid date"))
}

fn fact() -> impl Strategy<Value = ScheduleFact> {
    prop_oneof![
        (day(), intervals(), note()).prop_map(|(day_of_week, intervals, note)| {
            ScheduleFact::Weekly {
                day_of_week,
                intervals,
                note,
            }
        }),
        (week(), day(), intervals(), note()).prop_map(
            |(week_of_month, day_of_week, intervals, note)| ScheduleFact::NthWeekdayOfMonth {
                week_of_month,
                day_of_week,
                intervals,
                note,
            }
        ),
        (1u8..=31, intervals(), note()).prop_map(|(day_of_month, intervals, note)| {
            ScheduleFact::DayOfMonth {
                day_of_month,
                intervals,
                note,
            }
        }),
        (date(), intervals(), note()).prop_map(|(date, intervals, note)| {
            ScheduleFact::SpecificDate {
                date,
                intervals,
                note,
            }
        }),
        (date(), note()).prop_map(|(date, reason)| ScheduleFact::SpecificDateClosure {
            date,
            reason
        }),
    ]
}

fn time_format() -> impl Strategy<Value = TimeFormat> {
    prop_oneof![Just(TimeFormat::TwelveHour), Just(TimeFormat::TwentyFourHour)]
}

proptest! {
    #[test]
    fn rendered_row_normalizes_to_the_same_fact(fact in fact(), format in time_format()) {
        let rows = expand("P1", std::slice::from_ref(&fact), &BTreeMap::new());
        prop_assert_eq!(rows.len(), 1);
        let entry = row_to_raw_entry(&rows[0], format);
        let normalized = normalize(&RawFacts::new(vec![entry]));
        prop_assert!(normalized.errors.is_empty(), "{:?}", normalized.errors);
        prop_assert_eq!(normalized.facts, vec![fact]);
    }
}

#[test]
fn overnight_interval_survives_the_round_trip() {
    let fact = ScheduleFact::Weekly {
        day_of_week: DayOfWeek::Friday,
        intervals: vec![Interval::overnight(1320, 120)],
        note: None,
    };
    for format in [TimeFormat::TwelveHour, TimeFormat::TwentyFourHour] {
        let rows = expand("P1", std::slice::from_ref(&fact), &BTreeMap::new());
        let entry = row_to_raw_entry(&rows[0], format);
        let normalized = normalize(&RawFacts::new(vec![entry]));
        assert_eq!(normalized.facts, vec![fact.clone()]);
    }
}

#[test]
fn end_of_day_close_survives_the_round_trip() {
    let fact = ScheduleFact::Weekly {
        day_of_week: DayOfWeek::Saturday,
        intervals: vec![Interval::new(1080, 1440)],
        note: None,
    };
    for format in [TimeFormat::TwelveHour, TimeFormat::TwentyFourHour] {
        let rows = expand("P1", std::slice::from_ref(&fact), &BTreeMap::new());
        let entry = row_to_raw_entry(&rows[0], format);
        assert_eq!(normalize(&RawFacts::new(vec![entry])).facts, vec![fact.clone()]);
    }
}
