//! Workout email rendering
//!
//! Pure functions from a `DayEntry` to the email subject, HTML body and
//! plain-text alternative. Output is deterministic for a given entry.

use chrono::Weekday;
use quick_xml::escape::escape;

use crate::selector::weekday_name;
use crate::types::{DayEntry, Exercise};

const STYLE: &str = r#"    <style>
        body {
            font-family: Arial, sans-serif;
        }
        .day-title {
            background-color: #f2f2f2;
            padding: 10px;
            border-radius: 5px;
            font-size: 20px;
            margin-bottom: 20px;
        }
        .exercise {
            margin-bottom: 15px;
        }
        .exercise a {
            text-decoration: none;
            color: #007BFF;
        }
    </style>
"#;

const TIP: &str = "Always warm up properly, focus on form, and stay hydrated!";

/// Subject line: "{title} - {Weekday}"
pub fn subject_line(day: &DayEntry, weekday: Weekday) -> String {
    format!("{} - {}", day.title(), weekday_name(weekday))
}

/// Render a day-entry as a standalone HTML document
pub fn render_html(day: &DayEntry) -> String {
    let mut html = String::from("<html>\n<head>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "    <div class=\"day-title\">{}</div>\n",
        escape(day.title())
    ));

    for exercise in &day.exercises {
        html.push_str(&render_exercise(exercise));
    }

    html.push_str(&format!("    <p><em>Tip:</em> {}</p>\n", TIP));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_exercise(exercise: &Exercise) -> String {
    let name = escape(exercise.name());
    let label = match exercise.link() {
        Some(url) => format!("<a href=\"{}\" target=\"_blank\">{}</a>", escape(url), name),
        None => name.into_owned(),
    };

    format!(
        "    <div class=\"exercise\">\n        <p><strong>{}</strong></p>\n        <p>Sets/Reps: {}</p>\n        <p>Rest: {}</p>\n    </div>\n",
        label,
        escape(exercise.sets.as_str()),
        escape(exercise.rest.as_str()),
    )
}

/// Render a day-entry as the plain-text alternative part
pub fn render_plain(day: &DayEntry) -> String {
    let mut text = format!("{}\n\n", day.title());
    for exercise in &day.exercises {
        match exercise.link() {
            Some(url) => text.push_str(&format!("{} <{}>\n", exercise.name(), url)),
            None => text.push_str(&format!("{}\n", exercise.name())),
        }
        text.push_str(&format!("  Sets/Reps: {}\n", exercise.sets));
        text.push_str(&format!("  Rest: {}\n\n", exercise.rest));
    }
    text.push_str(&format!("Tip: {}\n", TIP));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_loader::parse_workouts;

    fn leg_day() -> DayEntry {
        let plan = parse_workouts(
            r#"{"days":[{"title":"Leg Day","exercises":[{"name":"Squat","sets":"5x5","rest":"90s","url":"http://example.com/squat"}]}]}"#,
        )
        .unwrap();
        plan.days()[0].clone()
    }

    #[test]
    fn test_render_html_leg_day() {
        let html = render_html(&leg_day());
        assert!(html.contains("<div class=\"day-title\">Leg Day</div>"));
        assert!(html.contains(
            "<a href=\"http://example.com/squat\" target=\"_blank\">Squat</a>"
        ));
        assert!(html.contains("Sets/Reps: 5x5"));
        assert!(html.contains("Rest: 90s"));
        assert!(html.contains("<em>Tip:</em>"));
    }

    #[test]
    fn test_render_html_is_deterministic() {
        let day = leg_day();
        assert_eq!(render_html(&day), render_html(&day));
    }

    #[test]
    fn test_no_url_means_no_anchor() {
        let day = DayEntry {
            title: Some("Push".to_string()),
            exercises: vec![Exercise {
                name: Some("Bench Press".to_string()),
                sets: "3x8".to_string(),
                rest: "2m".to_string(),
                url: None,
            }],
        };
        let html = render_html(&day);
        assert!(html.contains("<strong>Bench Press</strong>"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let day = DayEntry {
            title: None,
            exercises: vec![Exercise::default()],
        };
        let html = render_html(&day);
        assert!(html.contains("<div class=\"day-title\">Workout</div>"));
        assert!(html.contains("<strong>Unknown Exercise</strong>"));
        assert!(html.contains("<p>Sets/Reps: </p>"));
        assert!(html.contains("<p>Rest: </p>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let day = DayEntry {
            title: Some("Arms & <Abs>".to_string()),
            exercises: Vec::new(),
        };
        let html = render_html(&day);
        assert!(html.contains("Arms &amp; &lt;Abs&gt;"));
    }

    #[test]
    fn test_render_plain() {
        let text = render_plain(&leg_day());
        assert!(text.starts_with("Leg Day\n"));
        assert!(text.contains("Squat <http://example.com/squat>"));
        assert!(text.contains("Sets/Reps: 5x5"));
        assert!(text.contains("Rest: 90s"));
    }

    #[test]
    fn test_subject_line() {
        assert_eq!(subject_line(&leg_day(), Weekday::Mon), "Leg Day - Monday");
        assert_eq!(
            subject_line(&DayEntry::default(), Weekday::Sat),
            "Workout - Saturday"
        );
    }
}
