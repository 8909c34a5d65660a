/// Output formatting: text report and JSON.
use serde::Serialize;
use speeddate_core::{Plan, Roster, Seat, TableOptions};
use std::fmt::Write;

#[derive(Serialize)]
struct JsonTable<'a> {
    table: usize,
    people: [&'a str; 2],
}

#[derive(Serialize)]
struct JsonRound<'a> {
    round: usize,
    tables: Vec<JsonTable<'a>>,
}

#[derive(Serialize)]
struct JsonSeating<'a> {
    round: usize,
    table: usize,
    partner: &'a str,
}

#[derive(Serialize)]
struct JsonItinerary<'a> {
    name: &'a str,
    seatings: Vec<JsonSeating<'a>>,
}

#[derive(Serialize)]
struct JsonPlan<'a> {
    tables: usize,
    rounds: usize,
    weighting: &'static str,
    selection: &'static str,
    empty_table_penalty: usize,
    schedule: Vec<JsonRound<'a>>,
    itineraries: Vec<JsonItinerary<'a>>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    participants: usize,
    most_tables: JsonPlan<'a>,
    most_efficient: JsonPlan<'a>,
}

fn seat_name(roster: &Roster, seat: Seat) -> &str {
    roster.name(seat).unwrap_or("-")
}

fn person_name(roster: &Roster, idx: usize) -> &str {
    roster.get(idx).map(|p| p.name.as_str()).unwrap_or("-")
}

/// Attendance list. `full` adds gender and dating preferences.
pub fn render_attendance(roster: &Roster, full: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Attendance ({} people):", roster.len());
    for p in roster.participants() {
        if full {
            let _ = writeln!(
                out,
                "Name: {}  Gender: {}  Dates: {}",
                p.name,
                p.gender,
                p.interest
            );
        } else {
            let _ = writeln!(out, "Name: {}", p.name);
        }
    }
    out
}

/// Round-by-round table map.
pub fn render_rounds(roster: &Roster, plan: &Plan) -> String {
    let mut out = String::new();
    for (i, round) in plan.schedule.rounds.iter().enumerate() {
        let _ = writeln!(out, "======== Round {} ========", i + 1);
        for (t, pair) in round.pairs.iter().enumerate() {
            let _ = writeln!(
                out,
                "Table {}: {}  {}",
                t + 1,
                seat_name(roster, pair.first),
                seat_name(roster, pair.second)
            );
        }
    }
    out
}

/// Everyone's personal itinerary, in roster order.
pub fn render_itineraries(roster: &Roster, plan: &Plan) -> String {
    let mut out = String::new();
    for it in &plan.itineraries {
        let _ = writeln!(out, "\nName: {}", person_name(roster, it.participant));
        if it.assignments.is_empty() {
            let _ = writeln!(out, "(no compatible partners)");
        }
        for a in &it.assignments {
            let _ = writeln!(out, "{a} (with {})", person_name(roster, a.partner));
        }
    }
    out
}

fn render_summary(title: &str, plan: &Plan) -> String {
    format!(
        "{title}: {} rounds, {} tables ({} dates, weights: {}, selection: {})",
        plan.schedule.round_count(),
        plan.tables,
        plan.schedule.seated_pairs(),
        plan.weighting.label(),
        plan.selection.label(),
    )
}

/// Full text report covering both table options.
pub fn render_report(roster: &Roster, options: &TableOptions, full_listing: bool) -> String {
    let mut out = render_attendance(roster, full_listing);

    let _ = writeln!(out, "\n{}", render_summary("Most tables option", &options.most_tables));
    out.push_str(&render_rounds(roster, &options.most_tables));
    let _ = writeln!(out, "\nPersonal schedules for most tables option:");
    out.push_str(&render_itineraries(roster, &options.most_tables));

    if options.most_efficient.tables == options.most_tables.tables {
        let _ = writeln!(out, "\nNo smaller table count fits in the same number of rounds.");
    } else {
        let _ = writeln!(out, "\n{}", render_summary("Most table efficient option", &options.most_efficient));
        out.push_str(&render_rounds(roster, &options.most_efficient));
        let _ = writeln!(out, "\nPersonal schedules for efficiency option:");
        out.push_str(&render_itineraries(roster, &options.most_efficient));
    }
    out
}

fn json_plan<'a>(roster: &'a Roster, plan: &Plan) -> JsonPlan<'a> {
    let schedule = plan
        .schedule
        .rounds
        .iter()
        .enumerate()
        .map(|(i, round)| JsonRound {
            round: i + 1,
            tables: round
                .pairs
                .iter()
                .enumerate()
                .map(|(t, pair)| JsonTable {
                    table: t + 1,
                    people: [seat_name(roster, pair.first), seat_name(roster, pair.second)],
                })
                .collect(),
        })
        .collect();

    let itineraries = plan
        .itineraries
        .iter()
        .map(|it| JsonItinerary {
            name: person_name(roster, it.participant),
            seatings: it
                .assignments
                .iter()
                .map(|a| JsonSeating {
                    round: a.round + 1,
                    table: a.table + 1,
                    partner: person_name(roster, a.partner),
                })
                .collect(),
        })
        .collect();

    JsonPlan {
        tables: plan.tables,
        rounds: plan.schedule.round_count(),
        weighting: plan.weighting.label(),
        selection: plan.selection.label(),
        empty_table_penalty: plan.schedule.empty_table_penalty(),
        schedule,
        itineraries,
    }
}

/// Both table options as pretty-printed JSON.
pub fn render_json(roster: &Roster, options: &TableOptions) -> Result<String, serde_json::Error> {
    let output = JsonOutput {
        participants: roster.len(),
        most_tables: json_plan(roster, &options.most_tables),
        most_efficient: json_plan(roster, &options.most_efficient),
    };
    serde_json::to_string_pretty(&output)
}
