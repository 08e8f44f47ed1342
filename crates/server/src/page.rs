//! HTML rendering for the estimator page

use estimator_lib::advisory::{AdvisoryPanel, FaqQuestion, Mood};
use estimator_lib::collector::{Control, InputCollector};
use estimator_lib::predictor::FOLLOW_UP_NOTE;
use estimator_lib::{Attribute, FieldValue, Presentation};
use std::fmt::Write;

/// Ranges longer than this render as a bounded number input instead of a list
const MAX_LISTED_OPTIONS: usize = 100;

const STYLE: &str = r#"
    body {
        margin: 0;
        font-family: 'Segoe UI', sans-serif;
        color: black;
        background: linear-gradient(rgba(255,255,255,0.7), rgba(240,240,240,0.9)),
                    url("https://images.unsplash.com/photo-1600585154340-be6161a56a0c");
        background-size: cover;
        background-position: center;
    }
    .layout { display: flex; gap: 2rem; max-width: 1100px; margin: 0 auto; padding: 2rem; }
    aside { width: 280px; }
    main { flex: 1; }
    h1, h4, h5 { text-align: center; }
    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem 2rem; }
    .amenities { display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 1rem 2rem; }
    label { display: block; font-weight: 600; margin-bottom: 0.25rem; }
    input, select { background-color: #ffffffaa; color: black; width: 100%; padding: 6px; }
    .radio input { width: auto; }
    button {
        display: block; width: 75%; margin: 2rem auto; background-color: #e50914; color: white;
        border: none; padding: 10px 20px; border-radius: 10px; font-size: 16px; font-weight: bold;
    }
    .result { text-align: center; margin-top: 2rem; padding: 2rem; background-color: rgba(255,255,255,0.8); border-radius: 12px; }
    .result h2 { color: #e50914; }
    .price { font-size: 40px; }
    .success, .info, .warning, .error { padding: 0.75rem; border-radius: 8px; margin: 0.5rem 0; }
    .success { background: #d4edda; }
    .info { background: #d1ecf1; }
    .warning { background: #fff3cd; }
    .error { background: #f8d7da; }
"#;

/// What the result region of the page shows
#[derive(Debug, Clone, Copy)]
pub enum ResultRegion<'a> {
    Empty,
    Shown(&'a Presentation),
    Rejected(&'a str),
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
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

fn icon(attribute: Attribute) -> &'static str {
    match attribute {
        Attribute::Area => "📏",
        Attribute::Bedrooms => "🛏️",
        Attribute::Bathrooms => "🚿",
        Attribute::Stories => "🏢",
        Attribute::Mainroad => "🛣️",
        Attribute::Guestroom => "🛋️",
        Attribute::Basement => "🏚️",
        Attribute::Hotwaterheating => "🔥",
        Attribute::Airconditioning => "❄️",
        Attribute::Parking => "🚗",
        Attribute::Prefarea => "🌆",
        Attribute::Furnishingstatus => "🪑",
    }
}

/// Render one bounded-choice control with the current selection marked
fn render_control(out: &mut String, attribute: Attribute, control: Control, selected: FieldValue) {
    let name = attribute.name();
    let _ = write!(
        out,
        r#"<div class="field"><label for="{name}">{} {}</label>"#,
        icon(attribute),
        attribute.label()
    );

    match control {
        Control::Range { min, max, .. } if control.len() > MAX_LISTED_OPTIONS => {
            let _ = write!(
                out,
                r#"<input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{selected}" required>"#
            );
        }
        Control::Range { min, max, .. } => {
            let _ = write!(out, r#"<select id="{name}" name="{name}">"#);
            for value in min..=max {
                let mark = if FieldValue::Integer(value) == selected { " selected" } else { "" };
                let _ = write!(out, r#"<option value="{value}"{mark}>{value}</option>"#);
            }
            out.push_str("</select>");
        }
        Control::Choice { options, .. } if options.len() == 2 => {
            out.push_str(r#"<div class="radio">"#);
            for option in options {
                let mark = if selected.to_string() == *option { " checked" } else { "" };
                let _ = write!(
                    out,
                    r#"<label><input type="radio" name="{name}" value="{option}"{mark}> {option}</label>"#
                );
            }
            out.push_str("</div>");
        }
        Control::Choice { options, .. } => {
            let _ = write!(out, r#"<select id="{name}" name="{name}">"#);
            for option in options {
                let mark = if selected.to_string() == *option { " selected" } else { "" };
                let _ = write!(out, r#"<option value="{option}"{mark}>{option}</option>"#);
            }
            out.push_str("</select>");
        }
    }

    out.push_str("</div>");
}

fn render_result(out: &mut String, region: ResultRegion<'_>) {
    match region {
        ResultRegion::Empty => {}
        ResultRegion::Shown(Presentation::Estimate(estimate)) => {
            let _ = write!(
                out,
                r#"<div class="result" id="result">
    <h2>💰 Estimated House Price</h2>
    <div class="price">🏷️ {}</div>
    <p>🔍 {}</p>
</div>
<hr>
<h3>✨ Ready to Take the Next Step?</h3>
<p><em>{}</em></p>"#,
                escape_html(&estimate.formatted),
                escape_html(&estimate.note),
                escape_html(FOLLOW_UP_NOTE),
            );
        }
        ResultRegion::Shown(Presentation::Failed { message }) => {
            let _ = write!(out, r#"<div class="error" id="result">❌ {}</div>"#, escape_html(message));
        }
        ResultRegion::Rejected(message) => {
            let _ = write!(out, r#"<div class="error" id="result">⚠ {}</div>"#, escape_html(message));
        }
    }
}

fn render_sidebar(out: &mut String, panel: &AdvisoryPanel) {
    out.push_str("<h2>👋 Welcome, Home Explorer!</h2>");
    out.push_str("<p>Get ready to discover your home's worth: fast, smart, and beautifully!</p>");

    out.push_str(r#"<label for="mood">How are you feeling today?</label><select id="mood" name="mood" form="estimate">"#);
    for mood in Mood::ALL {
        let mark = if mood == panel.mood { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{}"{mark}>{}</option>"#, mood.id(), mood.label());
    }
    out.push_str("</select>");
    let _ = write!(
        out,
        r#"<div class="{}">{}</div>"#,
        panel.mood_tone.as_str(),
        escape_html(panel.mood_message)
    );

    let _ = write!(
        out,
        r#"<h3>🏡 House Tip of the Day</h3><div class="info">{}</div>"#,
        escape_html(panel.tip)
    );

    out.push_str(r#"<h3>🤖 Ask HouseBot</h3><label for="question">Have a question?</label><select id="question" name="question" form="estimate">"#);
    for question in FaqQuestion::ALL {
        let mark = if question == panel.question { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{mark}>{}</option>"#,
            question.id(),
            escape_html(question.question())
        );
    }
    out.push_str("</select>");
    let _ = write!(out, r#"<div class="info">💬 {}</div>"#, escape_html(panel.answer));
}

/// Render the whole page
pub fn render_page(collector: &InputCollector, panel: &AdvisoryPanel, region: ResultRegion<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>🏡 House Price Predictor</title>
    <style>{STYLE}</style>
</head>
<body>
<div class="layout">
<aside>"#
    );
    render_sidebar(&mut out, panel);
    out.push_str("</aside>\n<main>");

    out.push_str("<h1>🏠 HomeValueIQ</h1><h5>Estimate the value of your dream home with ease</h5><hr>");
    out.push_str(r#"<h4>📝 Enter House Details</h4><form id="estimate" method="post" action="/">"#);

    out.push_str(r#"<div class="grid">"#);
    for (attribute, control) in collector.controls() {
        if matches!(control, Control::Range { .. }) || attribute == Attribute::Furnishingstatus {
            render_control(&mut out, attribute, control, collector.selection(attribute));
        }
    }
    out.push_str("</div><hr><h3>🧰 Extra Amenities</h3>");

    out.push_str(r#"<div class="amenities">"#);
    for (attribute, control) in collector.controls() {
        if matches!(control, Control::Choice { .. }) && attribute != Attribute::Furnishingstatus {
            render_control(&mut out, attribute, control, collector.selection(attribute));
        }
    }
    out.push_str("</div>");

    out.push_str(r#"<button type="submit">🔮 Predict House Price</button></form>"#);
    render_result(&mut out, region);
    out.push_str("</main>\n</div>\n</body>\n</html>\n");
    out
}
