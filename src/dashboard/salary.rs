use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{employee::Employee, salary::SalaryRecord};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRow {
    pub employee_no: String,
    pub name: String,
    pub basic: f64,
    pub net: f64,
    pub ctc: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    #[schema(example = "2026-01")]
    pub month: String,
    pub headcount: usize,
    /// Roster members without a salary line this month.
    pub missing: usize,
    pub total_basic: f64,
    pub total_bonus: f64,
    pub total_deductions: f64,
    pub total_net: f64,
    pub total_ctc: f64,
    pub rows: Vec<SalaryRow>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Branch salary totals and chart rows, in roster order.
pub fn summarize_salaries(month: &str, employees: &[Employee], records: &[SalaryRecord]) -> SalarySummary {
    // a repeated line for the same employee overrides the earlier one
    let by_employee: HashMap<&str, &SalaryRecord> = records
        .iter()
        .map(|record| (record.employee_no.as_str(), record))
        .collect();

    let mut summary = SalarySummary {
        month: month.to_string(),
        headcount: 0,
        missing: 0,
        total_basic: 0.0,
        total_bonus: 0.0,
        total_deductions: 0.0,
        total_net: 0.0,
        total_ctc: 0.0,
        rows: Vec::with_capacity(employees.len()),
    };

    for employee in employees {
        let Some(record) = by_employee.get(employee.employee_no.as_str()) else {
            summary.missing += 1;
            continue;
        };

        summary.headcount += 1;
        summary.total_basic += record.basic;
        summary.total_bonus += record.bonus;
        summary.total_deductions += record.deductions;
        summary.total_net += record.net;
        summary.total_ctc += record.ctc.unwrap_or(0.0);

        summary.rows.push(SalaryRow {
            employee_no: employee.employee_no.clone(),
            name: employee.name.clone(),
            basic: round2(record.basic),
            net: round2(record.net),
            ctc: record.ctc.map(round2),
        });
    }

    summary.total_basic = round2(summary.total_basic);
    summary.total_bonus = round2(summary.total_bonus);
    summary.total_deductions = round2(summary.total_deductions);
    summary.total_net = round2(summary.total_net);
    summary.total_ctc = round2(summary.total_ctc);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(employee_no: &str, basic: f64, bonus: f64, deductions: f64, ctc: Option<f64>) -> SalaryRecord {
        SalaryRecord {
            employee_no: employee_no.to_string(),
            basic,
            bonus,
            deductions,
            net: SalaryRecord::net_of(basic, bonus, deductions),
            ctc,
        }
    }

    #[test]
    fn totals_cover_roster_members_only() {
        let roster = vec![Employee::new("E1", "Asha"), Employee::new("E2", "Bilal")];
        let records = vec![
            record("E1", 50000.0, 5000.0, 2000.0, Some(720000.0)),
            record("E2", 30000.0, 0.0, 1500.5, None),
            record("X9", 99999.0, 0.0, 0.0, None),
        ];

        let summary = summarize_salaries("2026-01", &roster, &records);

        assert_eq!(summary.headcount, 2);
        assert_eq!(summary.missing, 0);
        assert_eq!(summary.total_basic, 80000.0);
        assert_eq!(summary.total_net, 53000.0 + 28499.5);
        assert_eq!(summary.total_ctc, 720000.0);
        assert_eq!(summary.rows[0].employee_no, "E1");
        assert_eq!(summary.rows[1].ctc, None);
    }

    #[test]
    fn employees_without_a_line_are_counted_missing() {
        let roster = vec![Employee::new("E1", "Asha"), Employee::new("E2", "Bilal")];
        let records = vec![record("E2", 100.0, 0.0, 0.0, None)];

        let summary = summarize_salaries("2026-02", &roster, &records);

        assert_eq!(summary.headcount, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].name, "Bilal");
    }

    #[test]
    fn totals_are_rounded_to_cents() {
        let roster = vec![Employee::new("E1", "Asha"), Employee::new("E2", "Bilal")];
        let records = vec![
            record("E1", 0.1, 0.0, 0.0, None),
            record("E2", 0.2, 0.0, 0.0, None),
        ];

        let summary = summarize_salaries("2026-03", &roster, &records);

        assert_eq!(summary.total_basic, 0.3);
    }
}
