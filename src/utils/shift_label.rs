use chrono::{NaiveDateTime, NaiveTime};

use crate::model::shift::{Shift, ShiftTime};

/// Weekly hours below this mark a part-time shift.
pub const PART_TIME_WEEKLY_HOURS: f64 = 9.0;

const UNKNOWN_TIME: &str = "--:--";

const TIME_FORMATS: [&str; 5] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

pub fn parse_shift_time(value: &ShiftTime) -> Option<NaiveTime> {
    match value {
        ShiftTime::Parsed { hour, minute } => NaiveTime::from_hms_opt(*hour, *minute, 0),
        ShiftTime::Text(text) => {
            let text = text.trim();
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
                .or_else(|| {
                    DATETIME_FORMATS
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                        .map(|dt| dt.time())
                })
        }
    }
}

fn clock(value: &ShiftTime) -> String {
    parse_shift_time(value)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

fn span(start: &ShiftTime, end: &ShiftTime) -> String {
    format!("{}–{}", clock(start), clock(end))
}

/// `HH:MM–HH:MM`, or `HH:MM–HH:MM | HH:MM–HH:MM` for split shifts, with a
/// ` (Part Time)` suffix under the weekly-hours mark.
pub fn shift_label(shift: &Shift) -> String {
    let mut label = span(&shift.start, &shift.end);

    if let (Some(split_start), Some(split_end)) = (&shift.split_start, &shift.split_end) {
        label.push_str(" | ");
        label.push_str(&span(split_start, split_end));
    }

    if shift
        .weekly_hours
        .is_some_and(|hours| hours < PART_TIME_WEEKLY_HOURS)
    {
        label.push_str(" (Part Time)");
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start: ShiftTime, end: ShiftTime) -> Shift {
        Shift {
            start,
            end,
            split_start: None,
            split_end: None,
            weekly_hours: Some(40.0),
        }
    }

    #[test]
    fn single_shift() {
        assert_eq!(shift_label(&shift("09:00".into(), "18:00".into())), "09:00–18:00");
    }

    #[test]
    fn split_shift_mixes_input_forms() {
        let mut s = shift("9:00".into(), "13:00:00".into());
        s.split_start = Some(ShiftTime::Parsed { hour: 16, minute: 5 });
        s.split_end = Some("8:30 PM".into());

        assert_eq!(shift_label(&s), "09:00–13:00 | 16:05–20:30");
    }

    #[test]
    fn half_split_is_ignored() {
        let mut s = shift("09:00".into(), "13:00".into());
        s.split_start = Some("16:00".into());

        assert_eq!(shift_label(&s), "09:00–13:00");
    }

    #[test]
    fn part_time_qualifier_below_nine_weekly_hours() {
        let mut s = shift("10:00".into(), "14:00".into());
        s.weekly_hours = Some(8.5);
        assert_eq!(shift_label(&s), "10:00–14:00 (Part Time)");

        s.weekly_hours = Some(9.0);
        assert_eq!(shift_label(&s), "10:00–14:00");

        s.weekly_hours = None;
        assert_eq!(shift_label(&s), "10:00–14:00");
    }

    #[test]
    fn timestamps_use_their_time_part() {
        let s = shift("2024-01-01T07:45:00".into(), "2024-01-01T16:15".into());
        assert_eq!(shift_label(&s), "07:45–16:15");
    }

    #[test]
    fn garbage_renders_placeholder() {
        let s = shift("soon".into(), ShiftTime::Parsed { hour: 25, minute: 0 });
        assert_eq!(shift_label(&s), "--:--–--:--");
    }

    #[test]
    fn deserializes_string_and_parsed_times() {
        let s: Shift = serde_json::from_value(serde_json::json!({
            "start": { "hour": 8, "minute": 0 },
            "end": "17:00",
            "weeklyHours": 6
        }))
        .unwrap();

        assert_eq!(shift_label(&s), "08:00–17:00 (Part Time)");
    }
}
