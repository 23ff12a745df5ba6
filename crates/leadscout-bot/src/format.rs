//! MarkdownV2 rendering of business records for chat delivery.

use leadscout_core::BusinessRecord;

/// Upper bound on record messages per search. Each record may trigger a
/// secondary fetch for email scraping, so this caps both message volume and
/// worst-case latency.
pub const MAX_CHAT_RESULTS: usize = 10;

/// Characters MarkdownV2 treats as markup; every occurrence in inserted
/// text must be backslash-prefixed or Telegram rejects the message.
const MARKDOWN_RESERVED: &str = "_*[]()~`>#+-=|{}.!";

/// Escapes MarkdownV2 reserved characters by prefixing each with `\`.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_RESERVED.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders one record as a multi-line MarkdownV2 message block.
#[must_use]
pub fn format_record(record: &BusinessRecord) -> String {
    let emails = match &record.emails {
        Some(set) if !set.is_empty() => {
            // Sets carry no order; sort for a stable message.
            let mut sorted: Vec<&str> = set.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            sorted
                .iter()
                .map(|e| escape_markdown(e))
                .collect::<Vec<_>>()
                .join(", ")
        }
        _ => "none found".to_string(),
    };

    format!(
        "*{name}*\nAddress: {address}\nPhone: {phone}\nWebsite: {website}\nRating: {rating} \\({reviews} reviews\\)\nEmails: {emails}",
        name = escape_markdown(&record.name),
        address = escape_markdown(&record.address),
        phone = escape_markdown(&record.phone),
        website = escape_markdown(&record.website),
        rating = escape_markdown(&record.rating),
        reviews = escape_markdown(&record.reviews),
    )
}

/// Reply for a search that produced nothing deliverable.
#[must_use]
pub fn no_results_message() -> String {
    "No results found\\. Try a broader keyword or another engine\\.".to_string()
}

/// Reply for `/start`, `/help`, and malformed commands' companion hint.
#[must_use]
pub fn usage_message() -> String {
    [
        "Search for local business leads:",
        "`/keyword,country`",
        "`/keyword,city,country`",
        "`/keyword,city,country,engine`",
        "",
        "Countries: usa, uk, australia, canada",
        "Engines: google\\_maps, google, bing\\_maps, apple\\_maps",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn escape_prefixes_every_reserved_character() {
        assert_eq!(escape_markdown("A+B (test)"), "A\\+B \\(test\\)");
    }

    #[test]
    fn escape_covers_the_full_reserved_set() {
        let input = "_*[]()~`>#+-=|{}.!";
        let escaped = escape_markdown(input);
        assert_eq!(
            escaped,
            "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_markdown("Joe's Pizza 42"), "Joe's Pizza 42");
    }

    #[test]
    fn format_record_escapes_upstream_text() {
        let record = BusinessRecord {
            name: "Joe's Pizza (Downtown)".to_string(),
            address: "1 Main St.".to_string(),
            ..BusinessRecord::default()
        };
        let message = format_record(&record);
        assert!(message.starts_with("*Joe's Pizza \\(Downtown\\)*"));
        assert!(message.contains("Address: 1 Main St\\."));
    }

    #[test]
    fn format_record_lists_sorted_emails() {
        let record = BusinessRecord {
            emails: Some(HashSet::from([
                "zeta@example.com".to_string(),
                "alpha@example.com".to_string(),
            ])),
            ..BusinessRecord::default()
        };
        let message = format_record(&record);
        assert!(
            message.contains("Emails: alpha@example\\.com, zeta@example\\.com"),
            "emails must be sorted and escaped: {message}"
        );
    }

    #[test]
    fn format_record_reports_missing_emails() {
        let record = BusinessRecord {
            emails: Some(HashSet::new()),
            ..BusinessRecord::default()
        };
        assert!(format_record(&record).contains("Emails: none found"));
    }

    #[test]
    fn sentinel_fields_render_unescaped_slash_free() {
        let message = format_record(&BusinessRecord::default());
        assert!(message.contains("Address: N/A"));
        assert!(message.contains("Rating: N/A \\(N/A reviews\\)"));
    }
}
