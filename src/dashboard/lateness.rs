use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{attendance::AttendanceLog, employee::Employee};

/// 10:00, in minutes from midnight.
pub const DEFAULT_START_MINUTES: i64 = 600;
pub const LATE_LOW: i64 = 10;
pub const LATE_HIGH: i64 = 30;

/// Reference start time and the two lateness thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatenessPolicy {
    pub start_minutes: i64,
    pub late_low: i64,
    pub late_high: i64,
}

impl Default for LatenessPolicy {
    fn default() -> Self {
        Self {
            start_minutes: DEFAULT_START_MINUTES,
            late_low: LATE_LOW,
            late_high: LATE_HIGH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateBucket {
    Late10,
    Late30,
}

impl LatenessPolicy {
    /// Minutes past the reference start; zero or negative means on time.
    pub fn lateness(&self, entry: &NaiveDateTime) -> i64 {
        let entry_minutes = entry.hour() as i64 * 60 + entry.minute() as i64;
        entry_minutes - self.start_minutes
    }

    pub fn bucket(&self, lateness: i64) -> Option<LateBucket> {
        if lateness <= 0 {
            None
        } else if lateness >= self.late_high {
            Some(LateBucket::Late30)
        } else if lateness >= self.late_low {
            Some(LateBucket::Late10)
        } else {
            None
        }
    }
}

/// How one employee arrived on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Arrival {
    /// No punch at all.
    Absent,
    /// Punched, but never in the entry direction.
    NoEntry,
    /// Entry punches exist but none carries a usable timestamp.
    Unknown,
    Entered {
        first_in: NaiveDateTime,
        minutes_late: i64,
    },
}

impl Arrival {
    pub fn is_present(&self) -> bool {
        !matches!(self, Arrival::Absent)
    }
}

pub fn classify_employee(
    employee: &Employee,
    logs: &[AttendanceLog],
    policy: &LatenessPolicy,
) -> Arrival {
    let own: Vec<&AttendanceLog> = logs
        .iter()
        .filter(|log| log.user_id == employee.employee_no)
        .collect();

    if own.is_empty() {
        return Arrival::Absent;
    }

    let entries: Vec<&AttendanceLog> = own.into_iter().filter(|log| log.direction.is_entry()).collect();
    if entries.is_empty() {
        return Arrival::NoEntry;
    }

    let mut stamps: Vec<NaiveDateTime> = entries.iter().filter_map(|log| log.log_date).collect();
    stamps.sort();

    match stamps.first() {
        Some(first_in) => Arrival::Entered {
            first_in: *first_in,
            minutes_late: policy.lateness(first_in),
        },
        None => Arrival::Unknown,
    }
}

/// Positive minutes late, or `None` when on time or there is nothing to measure.
pub fn minutes_late(employee: &Employee, logs: &[AttendanceLog], policy: &LatenessPolicy) -> Option<u32> {
    match classify_employee(employee, logs, policy) {
        Arrival::Entered { minutes_late, .. } if minutes_late > 0 => u32::try_from(minutes_late).ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub late10: Vec<Employee>,
    pub late30: Vec<Employee>,
    /// Present, but with no usable entry timestamp.
    pub unknown: Vec<Employee>,
    pub present_count: usize,
    pub absent_count: usize,
}

pub fn summarize_day(
    date: NaiveDate,
    employees: &[Employee],
    logs: &[AttendanceLog],
    policy: &LatenessPolicy,
) -> DaySummary {
    let mut summary = DaySummary {
        date,
        late10: Vec::new(),
        late30: Vec::new(),
        unknown: Vec::new(),
        present_count: 0,
        absent_count: 0,
    };

    for employee in employees {
        let arrival = classify_employee(employee, logs, policy);
        if !arrival.is_present() {
            continue;
        }
        summary.present_count += 1;

        match arrival {
            Arrival::Entered { minutes_late, .. } => match policy.bucket(minutes_late) {
                Some(LateBucket::Late10) => summary.late10.push(employee.clone()),
                Some(LateBucket::Late30) => summary.late30.push(employee.clone()),
                None => {}
            },
            Arrival::Unknown => summary.unknown.push(employee.clone()),
            Arrival::Absent | Arrival::NoEntry => {}
        }
    }

    summary.absent_count = employees.len() - summary.present_count;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::Direction;

    fn at(stamp: &str) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S").unwrap())
    }

    fn log(user: &str, direction: &str, stamp: Option<NaiveDateTime>) -> AttendanceLog {
        AttendanceLog {
            user_id: user.to_string(),
            direction: Direction::parse(direction),
            log_date: stamp,
        }
    }

    fn roster() -> Vec<Employee> {
        vec![Employee::new("E1", "Asha"), Employee::new("E2", "Bilal")]
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn summarize(logs: &[AttendanceLog]) -> DaySummary {
        summarize_day(day(), &roster(), logs, &LatenessPolicy::default())
    }

    #[test]
    fn single_late_arrival_lands_in_late10() {
        let summary = summarize(&[log("E1", "IN", at("2024-01-01T10:15:00"))]);

        assert_eq!(summary.present_count, 1);
        assert_eq!(summary.absent_count, 1);
        assert_eq!(summary.late10, vec![Employee::new("E1", "Asha")]);
        assert!(summary.late30.is_empty());
    }

    #[test]
    fn earliest_entry_wins_regardless_of_order() {
        let summary = summarize(&[
            log("E1", "IN", at("2024-01-01T10:45:00")),
            log("E1", "IN", at("2024-01-01T09:00:00")),
        ]);

        assert!(summary.late10.is_empty());
        assert!(summary.late30.is_empty());
        assert_eq!(summary.present_count, 1);
    }

    #[test]
    fn threshold_boundaries() {
        let cases = [
            ("10:00:00", None),
            ("10:09:59", None),
            ("10:10:00", Some(LateBucket::Late10)),
            ("10:29:00", Some(LateBucket::Late10)),
            ("10:30:00", Some(LateBucket::Late30)),
            ("13:00:00", Some(LateBucket::Late30)),
        ];

        for (time, expected) in cases {
            let summary = summarize(&[log("E1", "IN", at(&format!("2024-01-01T{time}")))]);
            let got = match (summary.late10.len(), summary.late30.len()) {
                (0, 0) => None,
                (1, 0) => Some(LateBucket::Late10),
                (0, 1) => Some(LateBucket::Late30),
                other => panic!("employee in both buckets at {time}: {other:?}"),
            };
            assert_eq!(got, expected, "entry at {time}");
        }
    }

    #[test]
    fn only_exit_punches_is_present_but_not_late() {
        let logs = [log("E1", "OUT", at("2024-01-01T18:00:00"))];
        let summary = summarize(&logs);

        assert_eq!(summary.present_count, 1);
        assert!(summary.late10.is_empty() && summary.late30.is_empty());
        assert_eq!(
            classify_employee(&roster()[0], &logs, &LatenessPolicy::default()),
            Arrival::NoEntry
        );
    }

    #[test]
    fn terminal_code_one_counts_as_entry() {
        let summary = summarize(&[log("E2", "1", at("2024-01-01T10:40:00"))]);
        assert_eq!(summary.late30, vec![Employee::new("E2", "Bilal")]);
    }

    #[test]
    fn no_logs_means_everyone_absent() {
        let summary = summarize(&[]);

        assert_eq!(summary.present_count, 0);
        assert_eq!(summary.absent_count, 2);
    }

    #[test]
    fn empty_roster_counts_nothing() {
        let logs = [log("E1", "IN", at("2024-01-01T10:45:00"))];
        let summary = summarize_day(day(), &[], &logs, &LatenessPolicy::default());

        assert_eq!(summary.present_count + summary.absent_count, 0);
    }

    #[test]
    fn logs_of_other_branches_are_ignored() {
        let summary = summarize(&[log("X9", "IN", at("2024-01-01T11:00:00"))]);

        assert_eq!(summary.present_count, 0);
        assert!(summary.late30.is_empty());
    }

    #[test]
    fn unparseable_entry_is_unknown_not_on_time() {
        let summary = summarize(&[log("E1", "IN", None), log("E2", "IN", at("2024-01-01T09:55:00"))]);

        assert_eq!(summary.present_count, 2);
        assert_eq!(summary.unknown, vec![Employee::new("E1", "Asha")]);
        assert!(summary.late10.is_empty() && summary.late30.is_empty());
    }

    #[test]
    fn unparseable_entry_does_not_hide_a_good_one() {
        let logs = [log("E1", "IN", None), log("E1", "IN", at("2024-01-01T10:12:00"))];
        let summary = summarize(&logs);

        assert!(summary.unknown.is_empty());
        assert_eq!(summary.late10.len(), 1);
    }

    #[test]
    fn counts_always_cover_the_roster() {
        let logs = [
            log("E1", "OUT", at("2024-01-01T18:00:00")),
            log("E2", "IN", at("2024-01-01T10:31:00")),
            log("E2", "OUT", at("2024-01-01T19:00:00")),
        ];
        let summary = summarize(&logs);

        assert_eq!(summary.present_count + summary.absent_count, roster().len());
    }

    #[test]
    fn minutes_late_is_positive_or_none() {
        let policy = LatenessPolicy::default();
        let e1 = Employee::new("E1", "Asha");

        assert_eq!(minutes_late(&e1, &[log("E1", "IN", at("2024-01-01T10:07:00"))], &policy), Some(7));
        assert_eq!(minutes_late(&e1, &[log("E1", "IN", at("2024-01-01T10:00:00"))], &policy), None);
        assert_eq!(minutes_late(&e1, &[log("E1", "OUT", at("2024-01-01T11:00:00"))], &policy), None);
        assert_eq!(minutes_late(&e1, &[], &policy), None);
    }

    #[test]
    fn custom_policy_moves_the_reference() {
        let policy = LatenessPolicy {
            start_minutes: 9 * 60,
            ..LatenessPolicy::default()
        };
        let summary = summarize_day(
            day(),
            &roster(),
            &[log("E1", "IN", at("2024-01-01T09:45:00"))],
            &policy,
        );

        assert_eq!(summary.late30.len(), 1);
    }
}
