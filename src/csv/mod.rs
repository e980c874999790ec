//! 花名册 CSV 解析
//!
//! 只支持简单的逗号分隔格式：不处理引号，也不转义字段中的逗号。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const DELIMITER: char = ',';

/// 花名册中的一行，列名到值的映射
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// 取第一个非空列的值
    pub fn first_non_empty(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|column| self.get(column))
            .find(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 解析 CSV 文本，首行为表头，空行跳过
pub fn parse(text: &str) -> Vec<Record> {
    let mut lines = text.split('\n');
    let headers: Vec<&str> = match lines.next() {
        Some(header_line) if !header_line.trim().is_empty() => {
            header_line.split(DELIMITER).map(str::trim).collect()
        }
        _ => return Vec::new(),
    };

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values: Vec<&str> = line.split(DELIMITER).collect();
            headers
                .iter()
                .enumerate()
                .map(|(index, header)| {
                    let value = values.get(index).map(|v| v.trim()).unwrap_or("");
                    (*header, value)
                })
                .collect::<Record>()
        })
        .collect()
}

/// 按给定表头顺序把记录写回 CSV 文本
pub fn to_text<S: AsRef<str>>(headers: &[S], records: &[Record]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| header.as_ref())
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        let row: Vec<&str> = headers
            .iter()
            .map(|header| record.get(header.as_ref()).unwrap_or(""))
            .collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}
