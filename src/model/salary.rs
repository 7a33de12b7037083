use serde::{Deserialize, Serialize};

/// One employee's salary line for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub employee_no: String,
    pub basic: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub net: f64,
    /// Cost to Company, when the salary engine reports it.
    pub ctc: Option<f64>,
}

impl SalaryRecord {
    pub fn net_of(basic: f64, bonus: f64, deductions: f64) -> f64 {
        basic + bonus - deductions
    }
}
