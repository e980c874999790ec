use serde::{Deserialize, Serialize};

use crate::csv::Record;

/// 作为登录标识的列，按顺序匹配
pub const IDENTIFIER_COLUMNS: [&str; 3] = ["ID", "Email", "Student ID"];

const DEFAULT_NAME: &str = "Student";
const DEFAULT_PAYMENT_STATUS: &str = "Pending";
const DEFAULT_PAYMENT_PLAN: &str = "Full Payment";

/// 登录学生的会话数据，从花名册记录复制而来
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub program: String,
    pub grade_level: String,
    pub strand_course: String,
    pub amount: f64,
    pub payment_status: String,
    pub payment_plan: String,
    pub amount_paid: f64,
}

impl Session {
    pub fn from_record(record: &Record, identifier: &str) -> Self {
        let text = |columns: &[&str], default: &str| {
            record
                .first_non_empty(columns)
                .unwrap_or(default)
                .to_string()
        };

        Session {
            id: text(&["ID"], identifier),
            name: text(&["Name"], DEFAULT_NAME),
            email: text(&["Email"], ""),
            program: text(&["Education Level", "Level"], ""),
            grade_level: text(&["Grade Level"], ""),
            strand_course: text(&["Strand/Course"], ""),
            amount: parse_amount(record.get("Amount")),
            payment_status: text(&["Payment Status"], DEFAULT_PAYMENT_STATUS),
            payment_plan: text(&["Payment Plan"], DEFAULT_PAYMENT_PLAN),
            amount_paid: parse_amount(record.get("Amount Paid")),
        }
    }

    /// 是否由该标识匹配
    pub fn matches(record: &Record, identifier: &str) -> bool {
        IDENTIFIER_COLUMNS
            .iter()
            .any(|column| record.get(column) == Some(identifier))
    }

    /// 剩余应付金额
    pub fn balance(&self) -> f64 {
        (self.amount - self.amount_paid).max(0.0)
    }
}

/// 金额转换：取开头的数字部分，无法解析、负数或非有限值都记为 0
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(leading_number)
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(0.0)
}

fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_digits = digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits(exp_end.min(bytes.len()));
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}
