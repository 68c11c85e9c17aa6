use crate::schemas::Record;

/// Render the console summary of one accepted record.
///
/// Three labeled lines, four when the item carried a creation time.
pub fn format_record(record: &Record, permalink_domain: &str, use_color: bool) -> String {
    use colored::Colorize;

    let author = format!("@{}", record.screen_name);
    let url = record.permalink(permalink_domain);

    let mut lines = Vec::with_capacity(4);
    if use_color {
        lines.push(format!("Username: {}", author.bright_yellow()));
        lines.push(format!("Tweet: {}", record.text));
        lines.push(format!("URL: {}", url.bright_blue()));
        if let Some(created_at) = record.created_at {
            lines.push(format!("Time created: {}", created_at.to_string().dimmed()));
        }
    } else {
        lines.push(format!("Username: {author}"));
        lines.push(format!("Tweet: {}", record.text));
        lines.push(format!("URL: {url}"));
        if let Some(created_at) = record.created_at {
            lines.push(format!("Time created: {created_at}"));
        }
    }
    lines.join("\n")
}
