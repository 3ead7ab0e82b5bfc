use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error::ParseError;
use crate::parser::AssignmentRecord;

const HEADERS: [&str; 7] = [
    "id",
    "shiftId",
    "employeeId",
    "role",
    "startTime",
    "endTime",
    "isManual",
];

/// Writes assignments to a CSV file in the same layout `load_assignments` reads
pub fn write_assignments<P: AsRef<Path>>(
    csv_path: P,
    records: &[AssignmentRecord],
) -> Result<(), ParseError> {
    write_assignments_to(File::create(csv_path)?, records)
}

/// Writes assignments as CSV to any sink
pub fn write_assignments_to<W: Write>(
    sink: W,
    records: &[AssignmentRecord],
) -> Result<(), ParseError> {
    let mut wtr = Writer::from_writer(sink);
    wtr.write_record(HEADERS)?;

    for record in records {
        let shift_id = record.shift_id.as_ref().map(ToString::to_string).unwrap_or_default();
        let employee_id = record
            .employee_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let manual = match record.is_manual {
            Some(true) => "true",
            Some(false) => "false",
            None => "",
        };
        wtr.write_record([
            record.id.as_str(),
            shift_id.as_str(),
            employee_id.as_str(),
            record.role.as_deref().unwrap_or(""),
            record.start_time.as_deref().unwrap_or(""),
            record.end_time.as_deref().unwrap_or(""),
            manual,
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_assignments;

    #[test]
    fn exported_rows_load_back() {
        let records = vec![
            AssignmentRecord {
                id: "a1".into(),
                shift_id: Some("S1".into()),
                employee_id: Some("E1".into()),
                role: Some("cook".into()),
                start_time: Some("9:00 am".into()),
                end_time: Some("5:00 pm".into()),
                is_manual: Some(true),
                created_at: None,
            },
            AssignmentRecord {
                id: "a2".into(),
                ..Default::default()
            },
        ];

        let mut buf = Vec::new();
        write_assignments_to(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("id,shiftId,employeeId,role,startTime,endTime,isManual\n"));

        assert_eq!(read_assignments(buf.as_slice()).unwrap(), records);
    }
}
