use serde::Deserialize;
use serde_json::Value;

use crate::parser::{parse_clock, RefId};
use crate::store::NewAssignment;

/// Manual assignment request from the roster editor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignmentRequest {
    #[serde(default)]
    pub week: String,
    #[serde(default)]
    pub shift_id: Value,
    #[serde(default)]
    pub employee_id: Value,
    #[serde(default)]
    pub role: String,
    #[serde(default, rename = "start_time")]
    pub start_time: Option<String>,
    #[serde(default, rename = "end_time")]
    pub end_time: Option<String>,
}

// Ids are stored as sent, so 7 and "7" stay different shifts.
fn ref_id(value: &Value) -> Option<RefId> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(RefId::Text(s.clone())),
        Value::Number(n) => Some(RefId::Num(n.clone())),
        _ => None,
    }
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Validates a manual assignment and turns it into a record for the store
pub fn validate_manual_assignment(
    req: &ManualAssignmentRequest,
) -> Result<NewAssignment, String> {
    if req.week.trim().is_empty() {
        return Err("Week is required".to_string());
    }

    let shift_id = ref_id(&req.shift_id).ok_or_else(|| "Shift ID is required".to_string())?;
    let employee_id =
        ref_id(&req.employee_id).ok_or_else(|| "Employee ID is required".to_string())?;

    if req.role.trim().is_empty() {
        return Err("Role is required".to_string());
    }

    let times = (blank_to_none(&req.start_time), blank_to_none(&req.end_time));
    let (start_time, end_time) = match times {
        (None, None) => (None, None),
        (Some(start), Some(end)) => {
            let start_minutes =
                parse_clock(start).ok_or_else(|| format!("Invalid start time: {start}"))?;
            let end_minutes = parse_clock(end).ok_or_else(|| format!("Invalid end time: {end}"))?;
            if end_minutes <= start_minutes {
                return Err("End time must be after start time".to_string());
            }
            (Some(start.to_string()), Some(end.to_string()))
        }
        _ => return Err("Start and end time must be given together".to_string()),
    };

    Ok(NewAssignment {
        shift_id: Some(shift_id),
        employee_id: Some(employee_id),
        role: Some(req.role.trim().to_string()),
        start_time,
        end_time,
        is_manual: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ManualAssignmentRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn accepts_numeric_ids_and_time_range() {
        let req = request(json!({
            "week": "2025-W14",
            "shiftId": 12,
            "employeeId": 7,
            "role": "BARISTA",
            "start_time": "7:00 am",
            "end_time": "7:30 am"
        }));
        let assignment = validate_manual_assignment(&req).unwrap();

        assert_eq!(assignment.shift_id, Some(RefId::from(12)));
        assert_eq!(assignment.employee_id, Some(RefId::from(7)));
        assert_eq!(assignment.start_time.as_deref(), Some("7:00 am"));
        assert!(assignment.is_manual);
    }

    #[test]
    fn text_ids_are_stored_as_sent() {
        let req =
            request(json!({"week": "w", "shiftId": "12", "employeeId": " E1", "role": "cook"}));
        let assignment = validate_manual_assignment(&req).unwrap();

        assert_eq!(assignment.shift_id, Some(RefId::from("12")));
        assert_ne!(assignment.shift_id, Some(RefId::from(12)));
        assert_eq!(assignment.employee_id, Some(RefId::from(" E1")));
    }

    #[test]
    fn times_are_optional() {
        let req =
            request(json!({"week": "w", "shiftId": "S1", "employeeId": "E1", "role": "cook"}));
        let assignment = validate_manual_assignment(&req).unwrap();
        assert_eq!(assignment.start_time, None);
        assert_eq!(assignment.end_time, None);
    }

    #[test]
    fn rejects_missing_identity() {
        let req =
            request(json!({"week": "w", "shiftId": null, "employeeId": "E1", "role": "cook"}));
        assert_eq!(validate_manual_assignment(&req).unwrap_err(), "Shift ID is required");

        let req = request(json!({"week": "w", "shiftId": 1, "employeeId": 2, "role": "  "}));
        assert_eq!(validate_manual_assignment(&req).unwrap_err(), "Role is required");
    }

    #[test]
    fn rejects_bad_time_ranges() {
        let half = request(json!({
            "week": "w", "shiftId": 1, "employeeId": 2, "role": "cook", "start_time": "9:00 am"
        }));
        assert_eq!(
            validate_manual_assignment(&half).unwrap_err(),
            "Start and end time must be given together"
        );

        let malformed = request(json!({
            "week": "w", "shiftId": 1, "employeeId": 2, "role": "cook",
            "start_time": "nine", "end_time": "5:00 pm"
        }));
        assert_eq!(
            validate_manual_assignment(&malformed).unwrap_err(),
            "Invalid start time: nine"
        );

        let inverted = request(json!({
            "week": "w", "shiftId": 1, "employeeId": 2, "role": "cook",
            "start_time": "5:00 pm", "end_time": "9:00 am"
        }));
        assert_eq!(
            validate_manual_assignment(&inverted).unwrap_err(),
            "End time must be after start time"
        );
    }
}
