use chrono::{NaiveDate, NaiveTime};

use crate::common::{CodeError, CodeResult};
use crate::template::validation::{DATE_FORMAT, TIME_FORMAT};

use super::{push_line, Fields};

pub fn geo(fields: &Fields) -> CodeResult<String> {
    let lat = fields.require("latitude")?;
    let lon = fields.require("longitude")?;
    Ok(format!("geo:{lat},{lon}"))
}

fn parse_date(key: &str, value: &str) -> CodeResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| CodeError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn parse_time(key: &str, value: &str) -> CodeResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| CodeError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

const ICAL_DATE: &str = "%Y%m%d";
const ICAL_DATE_TIME: &str = "%Y%m%dT%H%M%S";
const ENDS_BEFORE_START: &str = "The event cannot end before it starts";

fn invalid(key: &str, reason: &str) -> CodeError {
    CodeError::InvalidValue { key: key.to_string(), reason: reason.to_string() }
}

/// `DTSTART` and optional `DTEND` values in iCalendar local time. Without a
/// start time both stamps are dates; with one, an end given only as a date
/// takes the start time.
pub(crate) fn event_stamps(fields: &Fields) -> CodeResult<(String, Option<String>)> {
    let start_date = parse_date("start_date", fields.require("start_date")?)?;
    let start_time = fields.get("start_time").map(|t| parse_time("start_time", t)).transpose()?;
    let end_date = fields.get("end_date").map(|d| parse_date("end_date", d)).transpose()?;
    let end_time = fields.get("end_time").map(|t| parse_time("end_time", t)).transpose()?;
    let end_day = end_date.unwrap_or(start_date);

    let Some(start_time) = start_time else {
        if end_time.is_some() {
            return Err(invalid("end_time", "Set a start time to use an end time"));
        }
        if end_day < start_date {
            return Err(invalid("end_date", ENDS_BEFORE_START));
        }
        let start = start_date.format(ICAL_DATE).to_string();
        return Ok((start, end_date.map(|d| d.format(ICAL_DATE).to_string())));
    };

    let start = start_date.and_time(start_time);
    let end = (end_date.is_some() || end_time.is_some())
        .then(|| end_day.and_time(end_time.unwrap_or(start_time)));
    if end.is_some_and(|e| e < start) {
        let key = if end_time.is_some() { "end_time" } else { "end_date" };
        return Err(invalid(key, ENDS_BEFORE_START));
    }
    Ok((
        start.format(ICAL_DATE_TIME).to_string(),
        end.map(|e| e.format(ICAL_DATE_TIME).to_string()),
    ))
}

pub fn event(fields: &Fields) -> CodeResult<String> {
    let title = fields.require("title")?;
    let (start, end) = event_stamps(fields)?;

    let mut lines = vec!["BEGIN:VEVENT".to_string(), format!("SUMMARY:{title}")];
    lines.push(format!("DTSTART:{start}"));
    push_line(&mut lines, "DTEND:", end.as_deref());
    push_line(&mut lines, "LOCATION:", fields.get("location"));
    push_line(&mut lines, "DESCRIPTION:", fields.raw("description"));
    lines.push("END:VEVENT".to_string());
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod location_tests {
    use test_case::test_case;

    use crate::template::{get_template_by_id, FieldValues};
    use crate::CodeError;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_geo() {
        let t = get_template_by_id("location").unwrap();
        let out = t.format(&values(&[("latitude", "40.7128"), ("longitude", "-74.0060")])).unwrap();
        assert_eq!(out, "geo:40.7128,-74.0060");
    }

    #[test]
    fn test_event_full() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[
            ("title", "Launch"),
            ("start_date", "2024-05-01"),
            ("start_time", "09:30"),
            ("end_date", "2024-05-01"),
            ("end_time", "11:00"),
            ("location", "Main Hall"),
            ("description", "Bring badges"),
        ]);
        let exp = "BEGIN:VEVENT\nSUMMARY:Launch\nDTSTART:20240501T093000\nDTEND:20240501T110000\nLOCATION:Main Hall\nDESCRIPTION:Bring badges\nEND:VEVENT";
        assert_eq!(t.format(&v).unwrap(), exp);
    }

    #[test]
    fn test_event_all_day() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[("title", "Holiday"), ("start_date", "2024-12-25"), ("location", " ")]);
        assert_eq!(
            t.format(&v).unwrap(),
            "BEGIN:VEVENT\nSUMMARY:Holiday\nDTSTART:20241225\nEND:VEVENT"
        );
    }

    #[test]
    fn test_event_end_time_same_day() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[
            ("title", "Sync"),
            ("start_date", "2024-05-01"),
            ("start_time", "09:30"),
            ("end_time", "10:15"),
        ]);
        assert!(t.format(&v).unwrap().contains("DTEND:20240501T101500"));
    }

    #[test]
    fn test_event_end_date_takes_start_time() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[
            ("title", "Offsite"),
            ("start_date", "2024-05-01"),
            ("start_time", "09:30"),
            ("end_date", "2024-05-03"),
        ]);
        let out = t.format(&v).unwrap();
        assert!(out.contains("DTSTART:20240501T093000\nDTEND:20240503T093000"));
    }

    #[test]
    fn test_event_all_day_span() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[("title", "Fair"), ("start_date", "2024-05-01"), ("end_date", "2024-05-03")]);
        assert!(t.format(&v).unwrap().contains("DTSTART:20240501\nDTEND:20240503\n"));
    }

    #[test_case(&[("start_date", "2024-05-01"), ("end_time", "10:00")], "end_time"; "end time without start time")]
    #[test_case(&[("start_date", "2024-05-03"), ("end_date", "2024-05-01")], "end_date"; "all day ends early")]
    #[test_case(&[("start_date", "2024-05-01"), ("start_time", "10:00"), ("end_time", "09:00")], "end_time"; "timed ends early")]
    #[test_case(&[("start_date", "2024-05-02"), ("start_time", "10:00"), ("end_date", "2024-05-01")], "end_date"; "end date before start")]
    fn test_event_rejected_span(pairs: &[(&str, &str)], key: &str) {
        let t = get_template_by_id("event").unwrap();
        let mut v = values(pairs);
        v.insert("title".to_string(), "Sync".to_string());
        assert!(matches!(t.format(&v), Err(CodeError::Formatting(_))));
        assert!(t.validate(&v).contains_key(key));
    }

    #[test]
    fn test_event_keeps_description_as_typed() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[("title", "Demo"), ("start_date", "2024-05-01"), ("description", "  Room 4 ")]);
        assert!(t.format(&v).unwrap().contains("\nDESCRIPTION:  Room 4 \n"));
    }

    #[test]
    fn test_event_bad_date() {
        let t = get_template_by_id("event").unwrap();
        let v = values(&[("title", "Sync"), ("start_date", "01/05/2024")]);
        assert!(matches!(t.format(&v), Err(CodeError::Formatting(_))));
    }
}
