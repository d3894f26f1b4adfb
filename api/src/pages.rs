//! Server-rendered HTML pages.

use league_common::leaderboard::{EventBreakdown, Standing};
use league_common::scoring::ScoringTable;
use league_common::{EventRecord, PersonRecord, PlayerRecord, Round};
use rocket::http::Status;

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
nav { background: #1b5e20; padding: 12px 24px; }
nav a { color: #fff; margin-right: 18px; text-decoration: none; font-weight: 600; }
.container { max-width: 860px; margin: 24px auto; padding: 0 16px; }
table { border-collapse: collapse; width: 100%; margin-bottom: 24px; background: #fff; }
th, td { border-bottom: 1px solid #e0e0e0; padding: 6px 10px; text-align: left; }
th { background: #f1f8e9; }
td.num { text-align: right; }
form { background: #fff; padding: 12px; border: 1px solid #e0e0e0; border-radius: 4px; margin-bottom: 24px; }
label { display: block; margin: 6px 0; }
.muted { color: #888; }
.warning { background: #fff3e0; border: 1px solid #ffb74d; padding: 10px; border-radius: 4px; margin-bottom: 16px; }
.error { background: #ffebee; border: 1px solid #e57373; padding: 10px; border-radius: 4px; }
";

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Leaderboard</a><a href="/picks">Picks</a><a href="/results">Results</a><a href="/scoring">Scoring</a></nav>
<div class="container">
{content}
</div>
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn round_cell(round: Option<Round>) -> &'static str {
    round.map_or("—", Round::as_str)
}

fn event_options(events: &[EventRecord]) -> String {
    events
        .iter()
        .map(|e| {
            format!(
                r#"<option value="{id}">{short} - {name}</option>"#,
                id = html_escape(&e.event_id),
                short = html_escape(&e.short_id),
                name = html_escape(&e.name),
            )
        })
        .collect()
}

fn round_options() -> String {
    Round::ALL
        .iter()
        .map(|r| format!(r#"<option value="{r}">{r}</option>"#))
        .collect()
}

fn datalist(id: &str, values: impl Iterator<Item = String>) -> String {
    let options: String = values
        .map(|v| format!(r#"<option value="{}">"#, html_escape(&v)))
        .collect();
    format!(r#"<datalist id="{id}">{options}</datalist>"#)
}

fn render_standings_table(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return r#"<p class="muted">Nobody has joined the league yet.</p>"#.to_string();
    }

    let rows: String = standings
        .iter()
        .map(|s| {
            format!(
                r#"<tr><td>{rank}</td><td>{medal} {person}</td><td class="num">{points}</td></tr>"#,
                rank = s.rank,
                medal = s.medal.map_or("", |m| m.emoji()),
                person = html_escape(&s.person),
                points = s.points,
            )
        })
        .collect();
    format!(
        r"<table><thead><tr><th>Rank</th><th>Person</th><th>Points</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn render_breakdown_table(breakdown: &EventBreakdown) -> String {
    if breakdown.rows.is_empty() {
        return r#"<p class="muted">No picks yet.</p>"#.to_string();
    }

    let rows: String = breakdown
        .rows
        .iter()
        .map(|row| {
            format!(
                r#"<tr><td>{person}</td><td>{player}</td><td>{round}</td><td class="num">{points}</td></tr>"#,
                person = html_escape(&row.person),
                player = html_escape(&row.player),
                round = round_cell(row.round),
                points = row.points,
            )
        })
        .collect();
    format!(
        r"<table><thead><tr><th>Person</th><th>Player</th><th>Round</th><th>Points</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn event_heading(event: &EventRecord) -> String {
    format!(
        r#"<a href="/events/{id}">{short} - {name}</a> <span class="muted">{category}</span>"#,
        id = html_escape(&event.event_id),
        short = html_escape(&event.short_id),
        name = html_escape(&event.name),
        category = event.category.label(),
    )
}

/// Render the home page: leaderboard, per-event breakdown and the schedule.
pub fn render_home(
    year: u32,
    standings: &[Standing],
    breakdown: &[EventBreakdown],
    events: &[EventRecord],
) -> String {
    let mut content = format!("<h1>{year} Pick League</h1><h2>Leaderboard</h2>");
    content.push_str(&render_standings_table(standings));

    content.push_str(
        r#"<form method="post" action="/people">
<label>Add a person <input name="name" required></label>
<button type="submit">Add</button>
</form>"#,
    );

    content.push_str("<h2>Picks by event</h2>");
    if breakdown.is_empty() {
        content.push_str(r#"<p class="muted">No picks have been made this season.</p>"#);
    }
    for event in breakdown {
        content.push_str(&format!("<h3>{}</h3>", event_heading(&event.event)));
        content.push_str(&render_breakdown_table(event));
    }

    content.push_str("<h2>Schedule</h2><ul>");
    for event in events {
        content.push_str(&format!("<li>{}</li>", event_heading(event)));
    }
    content.push_str("</ul>");

    build_page(&format!("{year} Leaderboard"), &content)
}

/// Render the pick submission page.
pub fn render_picks(
    year: u32,
    people: &[PersonRecord],
    events: &[EventRecord],
    players: &[PlayerRecord],
) -> String {
    let content = format!(
        r#"<h1>{year} Picks</h1>
<p>One pick per person per event. Submitting again replaces your earlier pick.</p>
<form method="post" action="/picks">
<label>Person <input name="person" list="people" required></label>
<label>Event <select name="event_id">{events}</select></label>
<label>Player <input name="player" list="players" required></label>
<button type="submit">Save pick</button>
</form>
{people_list}
{player_list}"#,
        events = event_options(events),
        people_list = datalist("people", people.iter().map(|p| p.name.clone())),
        player_list = datalist("players", players.iter().map(|p| p.name.clone())),
    );

    build_page(&format!("{year} Picks"), &content)
}

/// Render the commissioner's result entry page.
pub fn render_results(year: u32, events: &[EventRecord], players: &[PlayerRecord]) -> String {
    let content = format!(
        r#"<h1>{year} Results</h1>
<p>Commissioner only. Record the furthest round each player reached.</p>
<form method="post" action="/results">
<label>Commissioner key <input name="commissioner_key" type="password" required></label>
<label>Event <select name="event_id">{events}</select></label>
<label>Player <input name="player" list="players" required></label>
<label>Round reached <select name="round_reached">{rounds}</select></label>
<button type="submit">Save result</button>
</form>
{player_list}"#,
        events = event_options(events),
        rounds = round_options(),
        player_list = datalist("players", players.iter().map(|p| p.name.clone())),
    );

    build_page(&format!("{year} Results"), &content)
}

/// Render the scoring table with the commissioner's edit forms.
pub fn render_scoring(table: &ScoringTable) -> String {
    let mut content = String::from("<h1>Scoring</h1>");

    let missing = table.missing_rounds();
    if !missing.is_empty() {
        let labels = missing
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        content.push_str(&format!(
            r#"<div class="warning">No points are configured for: {labels}. The leaderboard cannot be computed once a picked player is recorded in one of these rounds.</div>"#
        ));
    }

    let rows: String = table
        .rules()
        .iter()
        .map(|rule| {
            format!(
                r#"<tr><td>{round}</td><td class="num">{points}</td></tr>"#,
                round = rule.round,
                points = rule.points,
            )
        })
        .collect();
    content.push_str(&format!(
        r"<table><thead><tr><th>Round</th><th>Points</th></tr></thead><tbody>{rows}</tbody></table>"
    ));

    content.push_str(&format!(
        r#"<h2>Set points</h2>
<form method="post" action="/scoring">
<label>Commissioner key <input name="commissioner_key" type="password" required></label>
<label>Round <select name="round">{rounds}</select></label>
<label>Points <input name="points" type="number" min="0" required></label>
<button type="submit">Save</button>
</form>
<h2>Remove a rule</h2>
<form method="post" action="/scoring/delete">
<label>Commissioner key <input name="commissioner_key" type="password" required></label>
<label>Round <select name="round">{rounds}</select></label>
<button type="submit">Remove</button>
</form>"#,
        rounds = round_options(),
    ));

    build_page("Scoring", &content)
}

/// Render the breakdown of a single event.
pub fn render_event(breakdown: &EventBreakdown) -> String {
    let content = format!(
        "<h1>{heading}</h1>{table}",
        heading = event_heading(&breakdown.event),
        table = render_breakdown_table(breakdown),
    );

    build_page(&breakdown.event.name, &content)
}

/// Render an error page.
pub fn render_error(status: Status, message: &str) -> String {
    let content = format!(
        r#"<h1>{code} {reason}</h1><div class="error">{message}</div><p><a href="/">Back to the leaderboard</a></p>"#,
        code = status.code,
        reason = status.reason().unwrap_or("Error"),
        message = html_escape(message),
    );

    build_page(&format!("{}", status.code), &content)
}
