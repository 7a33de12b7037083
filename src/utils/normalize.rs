//! The one place that knows how the upstream HR API spells its fields.
//!
//! Responses mix PascalCase, camelCase and snake_case, put lists either at the
//! top level or inside an envelope, and send ids as strings or numbers. Every
//! payload goes through here and comes out as the crate's typed records.

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{
    attendance::{AttendanceLog, Direction},
    employee::Employee,
    salary::SalaryRecord,
};

const ENVELOPE_KEYS: [&str; 5] = ["data", "Data", "items", "Items", "result"];

const EMPLOYEE_NO: [&str; 8] = [
    "employeeNo",
    "EmployeeNo",
    "employee_no",
    "employeeCode",
    "EmployeeCode",
    "employee_code",
    "empCode",
    "EmpCode",
];
const NAME: [&str; 6] = ["name", "Name", "employeeName", "EmployeeName", "fullName", "FullName"];
const FIRST_NAME: [&str; 3] = ["firstName", "FirstName", "first_name"];
const LAST_NAME: [&str; 3] = ["lastName", "LastName", "last_name"];

const USER_ID: [&str; 6] = ["userId", "UserId", "UserID", "user_id", "employeeNo", "EmployeeNo"];
const DIRECTION: [&str; 4] = ["Direction", "direction", "punchState", "PunchState"];
const LOG_DATE: [&str; 5] = ["LogDate", "logDate", "log_date", "punchTime", "PunchTime"];

const BASIC: [&str; 5] = ["basicSalary", "BasicSalary", "basic_salary", "basic", "Basic"];
const BONUS: [&str; 3] = ["bonus", "Bonus", "totalBonus"];
const DEDUCTIONS: [&str; 4] = ["deductions", "Deductions", "totalDeductions", "TotalDeductions"];
const NET: [&str; 5] = ["netSalary", "NetSalary", "net_salary", "netPay", "NetPay"];
const CTC: [&str; 3] = ["ctc", "CTC", "Ctc"];

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The list inside a payload: either the payload itself or its envelope field.
fn records(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn field<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
}

/// Strings are trimmed; numbers are written in decimal so `1001` and `"1001"` compare equal.
fn text(value: &Value) -> Option<String> {
    let out = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => u.to_string(),
            (_, Some(i), _) => i.to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 => format!("{f:.0}"),
            (_, _, Some(f)) => f.to_string(),
            _ => return None,
        },
        _ => return None,
    };
    (!out.is_empty()).then_some(out)
}

fn money(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

fn text_field(obj: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    field(obj, aliases).and_then(text)
}

fn money_field(obj: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    field(obj, aliases).and_then(money)
}

/// Wall-clock time as written; an explicit offset is dropped, not applied.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn normalize_employee(value: &Value) -> Option<Employee> {
    let obj = value.as_object()?;
    let employee_no = text_field(obj, &EMPLOYEE_NO)?;

    let name = text_field(obj, &NAME)
        .or_else(|| {
            let parts: Vec<String> = [text_field(obj, &FIRST_NAME), text_field(obj, &LAST_NAME)]
                .into_iter()
                .flatten()
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        })
        .unwrap_or_else(|| employee_no.clone());

    Some(Employee { employee_no, name })
}

pub fn normalize_log(value: &Value) -> Option<AttendanceLog> {
    let obj = value.as_object()?;
    let user_id = text_field(obj, &USER_ID)?;

    let direction = text_field(obj, &DIRECTION)
        .map(|raw| Direction::parse(&raw))
        .unwrap_or_else(|| Direction::Other(String::new()));

    let log_date = field(obj, &LOG_DATE)
        .and_then(Value::as_str)
        .and_then(parse_timestamp);

    Some(AttendanceLog {
        user_id,
        direction,
        log_date,
    })
}

pub fn normalize_salary(value: &Value) -> Option<SalaryRecord> {
    let obj = value.as_object()?;
    let employee_no = text_field(obj, &EMPLOYEE_NO)?;
    let basic = money_field(obj, &BASIC)?;
    let bonus = money_field(obj, &BONUS).unwrap_or(0.0);
    let deductions = money_field(obj, &DEDUCTIONS).unwrap_or(0.0);

    Some(SalaryRecord {
        employee_no,
        basic,
        bonus,
        deductions,
        net: money_field(obj, &NET).unwrap_or_else(|| SalaryRecord::net_of(basic, bonus, deductions)),
        ctc: money_field(obj, &CTC),
    })
}

fn normalize_all<T>(payload: &Value, kind: &str, one: fn(&Value) -> Option<T>) -> Vec<T> {
    let items = records(payload);
    let out: Vec<T> = items.iter().filter_map(one).collect();
    if out.len() != items.len() {
        debug!(kind, skipped = items.len() - out.len(), "Skipped records that could not be normalized");
    }
    out
}

pub fn normalize_employees(payload: &Value) -> Vec<Employee> {
    normalize_all(payload, "employee", normalize_employee)
}

pub fn normalize_logs(payload: &Value) -> Vec<AttendanceLog> {
    normalize_all(payload, "attendance_log", normalize_log)
}

pub fn normalize_salaries(payload: &Value) -> Vec<SalaryRecord> {
    normalize_all(payload, "salary", normalize_salary)
}
