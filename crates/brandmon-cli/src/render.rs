//! Plain-text rendering of pipeline results.

use brandmon_sentiment::{SearchReport, TextPrediction};

/// Newest posts listed in the text report.
const MAX_LISTED_ITEMS: usize = 200;

/// Text longer than this is cut in the item listing.
const MAX_TEXT_CHARS: usize = 80;

pub(crate) fn render_report(report: &SearchReport) -> String {
    let mut lines = vec![
        format!("query:  {}", report.query),
        format!("source: {}", report.source),
        format!("posts:  {}", report.items.len()),
    ];

    if report.items.is_empty() {
        lines.push("no posts found".to_string());
        return finish(lines);
    }

    lines.push(String::new());
    lines.push(format!("{:<10}{:>7}", "LABEL", "COUNT"));
    for (label, count) in &report.summary.counts {
        lines.push(format!("{:<10}{count:>7}", label.as_str()));
    }

    lines.push(String::new());
    let columns: Vec<_> = report
        .trend
        .first()
        .map(|row| row.counts.iter().map(|(label, _)| *label).collect())
        .unwrap_or_default();
    let mut header = format!("{:<12}", "DAY");
    for label in &columns {
        header.push_str(&format!("{:>10}", label.as_str()));
    }
    lines.push(header);
    for row in &report.trend {
        let mut line = format!("{:<12}", row.day.format("%Y-%m-%d"));
        for label in &columns {
            line.push_str(&format!("{:>10}", row.count(*label)));
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(format!(
        "{:<18}{:<18}{:<10}{:<7}TEXT",
        "POSTED", "AUTHOR", "LABEL", "CONF"
    ));
    for item in report.items.iter().take(MAX_LISTED_ITEMS) {
        lines.push(format!(
            "{:<18}{:<18}{:<10}{:<7.3}{}",
            item.post.timestamp.format("%Y-%m-%d %H:%M"),
            item.post.author,
            item.tri_label.as_str(),
            item.confidence,
            truncate(&item.post.text.replace('\n', " "), MAX_TEXT_CHARS),
        ));
    }
    if report.items.len() > MAX_LISTED_ITEMS {
        lines.push(format!(
            "... {} older posts omitted",
            report.items.len() - MAX_LISTED_ITEMS
        ));
    }

    finish(lines)
}

pub(crate) fn render_prediction(prediction: &TextPrediction) -> String {
    format!(
        "{} ({} @ {:.3})",
        prediction.tri_label, prediction.binary_label, prediction.confidence
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
