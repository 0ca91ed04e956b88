use crate::common::CodeResult;

use super::{push_line, Fields};

pub fn event_ticket(fields: &Fields) -> CodeResult<String> {
    let ticket_id = fields.require("ticket_id")?;
    let event = fields.require("event_name")?;
    let mut lines = vec![format!("TICKET:{ticket_id}"), format!("EVENT:{event}")];
    push_line(&mut lines, "HOLDER:", fields.get("holder"));
    push_line(&mut lines, "DATE:", fields.get("date"));
    push_line(&mut lines, "VENUE:", fields.get("venue"));
    push_line(&mut lines, "SEAT:", fields.get("seat"));
    Ok(lines.join("\n"))
}

pub fn boarding_pass(fields: &Fields) -> CodeResult<String> {
    let passenger = fields.require("passenger")?;
    let flight = fields.require("flight")?.to_uppercase();
    let from = fields.require("origin")?.to_uppercase();
    let to = fields.require("destination")?.to_uppercase();
    let mut out = format!("FLIGHT:{flight};FROM:{from};TO:{to};PAX:{passenger};");
    for (tag, key) in [("DATE", "date"), ("SEAT", "seat"), ("GATE", "gate")] {
        if let Some(v) = fields.get(key) {
            out.push_str(&format!("{tag}:{v};"));
        }
    }
    Ok(out)
}
