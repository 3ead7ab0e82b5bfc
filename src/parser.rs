use csv::Reader;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::ParseError;

/// Shift or employee reference, kept in the JSON type it arrived with.
///
/// `7` and `"7"` are different references and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefId {
    Num(Number),
    Text(String),
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefId::Num(n) => write!(f, "{n}"),
            RefId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RefId {
    fn from(value: &str) -> Self {
        RefId::Text(value.to_string())
    }
}

impl From<i64> for RefId {
    fn from(value: i64) -> Self {
        RefId::Num(Number::from(value))
    }
}

/// A single shift assignment as held by the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub shift_id: Option<RefId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub employee_id: Option<RefId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_manual: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub created_at: Option<String>,
}

impl AssignmentRecord {
    pub fn is_manual(&self) -> bool {
        self.is_manual == Some(true)
    }

    /// Start of the assignment in minutes since midnight, 0 when unknown
    pub fn start_minutes(&self) -> u32 {
        time_to_minutes(self.start_time.as_deref().unwrap_or(""))
    }

    /// End of the assignment in minutes since midnight, 0 when unknown
    pub fn end_minutes(&self) -> u32 {
        time_to_minutes(self.end_time.as_deref().unwrap_or(""))
    }
}

// Shift and employee ids arrive as numbers from some writers and strings from others.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RefId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(RefId::Text(s)),
        Some(Value::Number(n)) => Some(RefId::Num(n)),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    })
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; other Unicode digit forms are treated as malformed
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2}):([0-9]{2})\s*(am|pm)$").expect("clock pattern is valid")
    })
}

/// Parses a clock time such as "9:00 am" or "12:30PM" into minutes since midnight.
///
/// Returns `None` when the text does not match `H:MM am/pm`. The hour is not
/// range checked, so "13:00 pm" parses to 1500.
pub fn parse_clock(time_str: &str) -> Option<u32> {
    let clean = time_str.trim().to_lowercase();
    let caps = clock_pattern().captures(&clean)?;

    let mut hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;

    match &caps[3] {
        "pm" if hours != 12 => hours += 12,
        "am" if hours == 12 => hours = 0,
        _ => {}
    }

    Some(hours * 60 + minutes)
}

/// Converts a clock time to minutes since midnight, returning 0 for empty or malformed input
pub fn time_to_minutes(time_str: &str) -> u32 {
    parse_clock(time_str).unwrap_or(0)
}

/// Parses a boolean value from various string representations
fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "yes" || lower == "true" || lower == "1"
}

// Cells are taken verbatim, the same as JSON strings; only an empty cell is absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Loads assignments from a CSV file
pub fn load_assignments<P: AsRef<Path>>(
    csv_path: P,
) -> Result<Vec<AssignmentRecord>, ParseError> {
    read_assignments(File::open(csv_path)?)
}

/// Loads assignments from any CSV source with a header row
pub fn read_assignments<R: Read>(source: R) -> Result<Vec<AssignmentRecord>, ParseError> {
    let mut reader = Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let id_col = column("id").ok_or(ParseError::MissingColumn("id"))?;
    let shift_col = column("shiftId");
    let employee_col = column("employeeId");
    let role_col = column("role");
    let start_col = column("startTime");
    let end_col = column("endTime");
    let manual_col = column("isManual");

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let row = result?;
        let get = |col: Option<usize>| non_empty(col.and_then(|c| row.get(c)));

        let Some(id) = get(Some(id_col)) else {
            tracing::warn!(row = line + 1, "skipping assignment row without an id");
            continue;
        };

        records.push(AssignmentRecord {
            id,
            shift_id: get(shift_col).map(RefId::Text),
            employee_id: get(employee_col).map(RefId::Text),
            role: get(role_col),
            start_time: get(start_col),
            end_time: get(end_col),
            is_manual: get(manual_col).map(|v| parse_bool(&v)),
            created_at: None,
        });
    }

    Ok(records)
}
