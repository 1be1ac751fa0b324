use crate::calendar::PickerDates;
use crate::models::{OvernightResponse, TraceQuery, TraceSearchResponse};

pub fn render_index(overnight: &OvernightResponse) -> String {
    let mut bars = String::new();
    for day in &overnight.streak {
        let modifier = if day.present { "yes" } else { "no" };
        let overnight_status = if day.present {
            "at home overnight"
        } else {
            "not at home overnight"
        };
        bars.push_str(&format!(
            r#"      <div class="app-streak__item">
        <div class="app-streak__bar app-streak__bar--{modifier}" title="{title}" aria-label="{date} - {overnight_status}"></div>
        <div class="app-streak__label">{label}</div>
      </div>
"#,
            title = escape_html(&day.title),
            date = escape_html(&day.date),
            label = escape_html(&day.label),
        ));
    }

    INDEX_HTML
        .replace("{{SUMMARY}}", &escape_html(&overnight.summary))
        .replace("{{ANCHOR}}", &escape_html(&overnight.anchor))
        .replace("{{STREAK}}", &bars)
}

pub fn render_location(
    dates: &PickerDates,
    query: &TraceQuery,
    result: Option<&TraceSearchResponse>,
) -> String {
    let status = result.map(|r| r.message.as_str()).unwrap_or("");
    let points = result
        .and_then(|r| r.trace.as_ref())
        .map(|trace| {
            let mut rows = String::new();
            for (idx, pt) in trace.points.iter().enumerate() {
                let label = pt.label.clone().unwrap_or_else(|| (idx + 1).to_string());
                rows.push_str(&format!(
                    "        <tr><td>{}</td><td>{:.6}</td><td>{:.6}</td><td>{}</td></tr>\n",
                    escape_html(&label),
                    pt.lat,
                    pt.lng,
                    escape_html(pt.time.as_deref().unwrap_or("")),
                ));
            }
            rows
        })
        .unwrap_or_default();

    LOCATION_HTML
        .replace("{{TODAY_MAX}}", &escape_html(&dates.today_max))
        .replace("{{TODAY_DISPLAY}}", &escape_html(&dates.today_display))
        .replace("{{FROM_DATE}}", &escape_html(&query.from_date))
        .replace("{{TO_DATE}}", &escape_html(&query.to_date))
        .replace("{{FROM_TIME}}", &escape_html(&query.from_time))
        .replace("{{TO_TIME}}", &escape_html(&query.to_time))
        .replace("{{STATUS}}", &escape_html(status))
        .replace("{{POINTS}}", &points)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Home overnight</title>
  <style>
    :root {
      --ink: #0b0c0c;
      --muted: #505a5f;
      --yes: #00703c;
      --no: #d4351c;
      --line: #b1b4b6;
    }

    body {
      margin: 0;
      padding: 32px 18px 48px;
      color: var(--ink);
      font-family: Arial, sans-serif;
    }

    main {
      max-width: 860px;
      margin: 0 auto;
    }

    .app-streak {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
      margin: 24px 0;
    }

    .app-streak__bar {
      height: 48px;
      border-radius: 4px;
    }

    .app-streak__bar--yes {
      background: var(--yes);
    }

    .app-streak__bar--no {
      background: var(--no);
      opacity: 0.35;
    }

    .app-streak__label {
      margin-top: 6px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .summary {
      font-size: 1.1rem;
      border-left: 4px solid var(--line);
      padding-left: 12px;
    }
  </style>
</head>
<body>
  <main>
    <h1>Home overnight (19:00 to 07:00)</h1>
    <p class="summary" id="home-overnight-summary">{{SUMMARY}}</p>
    <div class="app-streak" id="home-overnight-streak" data-anchor="{{ANCHOR}}">
{{STREAK}}    </div>
  </main>
</body>
</html>
"#;

const LOCATION_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Location history</title>
  <style>
    body {
      margin: 0;
      padding: 32px 18px 48px;
      color: #0b0c0c;
      font-family: Arial, sans-serif;
    }

    main {
      max-width: 860px;
      margin: 0 auto;
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 4px;
      font-weight: 600;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      margin-top: 24px;
    }

    td {
      border-bottom: 1px solid #b1b4b6;
      padding: 6px 4px;
    }
  </style>
</head>
<body>
  <main>
    <h1>Location history</h1>
    <p>Today is {{TODAY_DISPLAY}}.</p>
    <form id="bh-search-form" method="get" action="/bh-location">
      <label>From date <input name="from_date" placeholder="DD/MM/YYYY" data-max-date="{{TODAY_MAX}}" value="{{FROM_DATE}}" /></label>
      <label>To date <input name="to_date" placeholder="DD/MM/YYYY" data-max-date="{{TODAY_MAX}}" value="{{TO_DATE}}" /></label>
      <label>From time <input name="from_time" placeholder="HH:MM" value="{{FROM_TIME}}" /></label>
      <label>To time <input name="to_time" placeholder="HH:MM" value="{{TO_TIME}}" /></label>
      <button type="submit" id="bh-update-map">Update map</button>
    </form>
    <p id="map-status" role="status">{{STATUS}}</p>
    <table>
      <tbody>
{{POINTS}}      </tbody>
    </table>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StreakDayView;

    #[test]
    fn index_lists_every_streak_day() {
        let overnight = OvernightResponse {
            anchor: "2025-09-10".into(),
            consecutive_nights: 1,
            last_absent_date: None,
            summary: "Penny remained at home overnight for the last 1 consecutive night.".into(),
            streak: (4..=10)
                .map(|day| StreakDayView {
                    date: format!("2025-09-{day:02}"),
                    present: day == 10,
                    label: format!("Day {day}"),
                    title: format!("Day {day} - status"),
                })
                .collect(),
        };

        let html = render_index(&overnight);
        assert_eq!(html.matches("app-streak__item").count(), 7);
        assert_eq!(html.matches("app-streak__bar app-streak__bar--yes").count(), 1);
        assert!(html.contains("for the last 1 consecutive night."));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn location_page_escapes_query_values() {
        let dates = PickerDates {
            today_max: "21/08/2025".into(),
            today_display: "21/8/25".into(),
        };
        let query = TraceQuery {
            from_date: "<script>".into(),
            ..TraceQuery::default()
        };

        let html = render_location(&dates, &query, None);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Today is 21/8/25."));
        assert!(!html.contains("{{"));
    }
}
