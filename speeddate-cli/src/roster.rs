/// Roster parsing: JSON array of records, or one participant per text line.
///
/// Text lines hold a name followed by five booleans, in this order:
/// is_woman, is_man, is_nonbinary, dates_women, dates_men.
/// Spaces, tabs and commas all separate fields, so `Ada True False False False True`
/// and `Ada, true, false, false, false, true` read the same.
use speeddate_core::ParticipantRecord;

const FLAG_COUNT: usize = 5;

/// Parse a roster file's content. Content starting with `[` is read as JSON.
pub fn parse_roster(content: &str) -> Result<Vec<ParticipantRecord>, String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| format!("Roster looks like JSON but failed to parse: {e}"));
    }

    let mut records = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_line(line).map_err(|e| format!("line {}: {e}", line_idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn parse_line(line: &str) -> Result<ParticipantRecord, String> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.len() <= FLAG_COUNT {
        return Err(format!(
            "expected a name followed by {FLAG_COUNT} true/false values, got {} fields",
            tokens.len()
        ));
    }

    let (name_parts, flag_tokens) = tokens.split_at(tokens.len() - FLAG_COUNT);
    let mut flags = [false; FLAG_COUNT];
    for (slot, token) in flags.iter_mut().zip(flag_tokens) {
        *slot = parse_flag(token).ok_or_else(|| format!("\"{token}\" is not a true/false value"))?;
    }

    Ok(ParticipantRecord {
        name: name_parts.join(" "),
        is_woman: flags[0],
        is_man: flags[1],
        is_nonbinary: flags[2],
        dates_women: flags[3],
        dates_men: flags[4],
    })
}

fn parse_flag(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Format a record as a roster text line (the inverse of `parse_line`).
pub fn format_line(record: &ParticipantRecord) -> String {
    let flag = |b: bool| if b { "True" } else { "False" };
    format!(
        "{} {} {} {} {} {}",
        record.name,
        flag(record.is_woman),
        flag(record.is_man),
        flag(record.is_nonbinary),
        flag(record.dates_women),
        flag(record.dates_men),
    )
}
