/// Generic headings paired with the topic, in suggestion order.
pub const DEFAULT_HEADINGS: [&str; 10] = [
    "Overview",
    "Key Insights",
    "Analysis",
    "Recommendations",
    "Next Steps",
    "Conclusion",
    "Background",
    "Current State",
    "Future Outlook",
    "Implementation",
];

/// A backend reply no longer than this is treated as unusable.
const MIN_REPLY_LEN: usize = 20;
const MIN_TITLE_LEN: usize = 4;

pub fn default_outline(topic: &str, item_count: usize) -> Vec<String> {
    (0..item_count)
        .map(|i| match DEFAULT_HEADINGS.get(i) {
            Some(heading) => format!("{heading}: {topic}"),
            None => format!("{topic} - Section {}", i + 1),
        })
        .collect()
}

/// Extracts exactly `item_count` headings from a newline-separated reply,
/// or `None` when the reply is too short or has too few usable lines.
pub fn parse_outline_reply(raw: &str, item_count: usize) -> Option<Vec<String>> {
    if raw.chars().count() <= MIN_REPLY_LEN {
        return None;
    }

    let titles: Vec<String> = raw
        .lines()
        .map(|line| line.trim().trim_matches(|c: char| c == '-' || c == ' ').trim())
        .filter(|line| line.chars().count() >= MIN_TITLE_LEN)
        .map(str::to_string)
        .collect();

    (titles.len() >= item_count).then(|| titles.into_iter().take(item_count).collect())
}
