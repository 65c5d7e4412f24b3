// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule compiler
//!
//! Translates a 5-field cron expression (minute, hour, day of month, month,
//! weekday) into the per-unit value lists the appliance's schedule resource
//! expects. A wildcard field compiles to an empty list, meaning every value.
//!
//! The grammar per field is `*` or a comma-separated list of integers and
//! inclusive `a-b` ranges. Each item is read from its numeric prefix, so
//! trailing text is ignored and items with no leading number are skipped.
//! Out-of-range values are clamped. Step syntax (`*/5`) is rejected.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors from compiling a schedule expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("wrong cron format {token} detected: step values are not supported")]
    StepNotSupported { token: String },
}

/// One positional field of the expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Minute,
    Hour,
    Day,
    Month,
    Weekday,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::Day,
        Field::Month,
        Field::Weekday,
    ];

    /// Inclusive bounds
    pub fn bounds(self) -> (u32, u32) {
        match self {
            Field::Minute => (0, 59),
            Field::Hour => (0, 23),
            Field::Day => (1, 31),
            Field::Month => (1, 12),
            Field::Weekday => (0, 6),
        }
    }

    fn clamp(self, value: i64) -> u32 {
        let (min, max) = self.bounds();
        value.clamp(i64::from(min), i64::from(max)) as u32
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Minute => write!(f, "minute"),
            Field::Hour => write!(f, "hour"),
            Field::Day => write!(f, "day"),
            Field::Month => write!(f, "month"),
            Field::Weekday => write!(f, "weekday"),
        }
    }
}

/// A compiled schedule
///
/// Each list is sorted and free of duplicates. An empty list means the
/// field was a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSpec {
    pub name: String,
    pub minutes: Vec<u32>,
    pub hours: Vec<u32>,
    pub days: Vec<u32>,
    pub months: Vec<u32>,
    pub weekdays: Vec<u32>,
}

impl ScheduleSpec {
    pub fn field(&self, field: Field) -> &[u32] {
        match field {
            Field::Minute => &self.minutes,
            Field::Hour => &self.hours,
            Field::Day => &self.days,
            Field::Month => &self.months,
            Field::Weekday => &self.weekdays,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut Vec<u32> {
        match field {
            Field::Minute => &mut self.minutes,
            Field::Hour => &mut self.hours,
            Field::Day => &mut self.days,
            Field::Month => &mut self.months,
            Field::Weekday => &mut self.weekdays,
        }
    }

    /// Whether the schedule fires at this instant
    pub fn matches(&self, minute: u32, hour: u32, day: u32, month: u32, weekday: u32) -> bool {
        let instant = [minute, hour, day, month, weekday];
        Field::ALL.iter().zip(instant).all(|(field, value)| {
            let values = self.field(*field);
            values.is_empty() || values.binary_search(&value).is_ok()
        })
    }

    /// Request body for the schedule resource
    pub fn request_body(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "cron": {
                "minutes": self.minutes,
                "hours": self.hours,
                "days": self.days,
                "months": self.months,
                "weekdays": self.weekdays,
            }
        })
    }
}

/// Re-describes the lists as an expression that compiles back to them
impl fmt::Display for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = Field::ALL
            .iter()
            .map(|field| describe(self.field(*field)))
            .collect();
        write!(f, "{}", fields.join(" "))
    }
}

fn describe(values: &[u32]) -> String {
    if values.is_empty() {
        return "*".to_string();
    }
    let mut parts = Vec::new();
    let mut start = values[0];
    let mut end = values[0];
    for &value in &values[1..] {
        if value == end + 1 {
            end = value;
            continue;
        }
        parts.push(run(start, end));
        start = value;
        end = value;
    }
    parts.push(run(start, end));
    parts.join(",")
}

fn run(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

/// Compile an expression into a named schedule
///
/// Missing trailing fields default to `*`; fields beyond the fifth are
/// ignored.
pub fn compile(name: &str, expr: &str) -> Result<ScheduleSpec, ScheduleError> {
    let tokens: Vec<&str> = expr.split_whitespace().collect();
    if let Some(token) = tokens.iter().take(Field::ALL.len()).find(|t| t.contains('/')) {
        return Err(ScheduleError::StepNotSupported {
            token: token.to_string(),
        });
    }
    if tokens.len() > Field::ALL.len() {
        tracing::warn!(
            expr,
            ignored = %tokens[Field::ALL.len()..].join(" "),
            "ignoring extra fields in cron expression"
        );
    }

    let mut spec = ScheduleSpec {
        name: name.to_string(),
        ..Default::default()
    };
    for (index, field) in Field::ALL.into_iter().enumerate() {
        let token = tokens.get(index).copied().unwrap_or("*");
        let values = spec.field_mut(field);
        expand(field, token, values);
        values.sort_unstable();
        values.dedup();
    }
    Ok(spec)
}

fn expand(field: Field, token: &str, out: &mut Vec<u32>) {
    if token == "*" {
        return;
    }
    for item in token.split(',') {
        match parse_item(item) {
            Some(Item::Single(value)) => out.push(field.clamp(value)),
            Some(Item::Range(from, to)) => {
                let (from, to) = (field.clamp(from), field.clamp(to));
                out.extend(from..=to);
            }
            None => {
                tracing::warn!(%field, item, "skipping malformed cron item");
            }
        }
    }
}

enum Item {
    Single(i64),
    Range(i64, i64),
}

/// Read `a` or `a-b` from the front of `item`, ignoring trailing text
///
/// `5abc` is the single value 5 and `1-3x` the range 1-3. A dangling `-`
/// leaves a single value.
fn parse_item(item: &str) -> Option<Item> {
    let (from, rest) = leading_int(item.trim())?;
    match rest.strip_prefix('-').and_then(leading_int) {
        Some((to, _)) => Some(Item::Range(from, to)),
        None => Some(Item::Single(from)),
    }
}

/// A signed decimal prefix and the text after it
fn leading_int(text: &str) -> Option<(i64, &str)> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = text.len() - unsigned.len() + digits;
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
