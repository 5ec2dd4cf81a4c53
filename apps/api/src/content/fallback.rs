//! Deterministic fallback composer.
//!
//! Used whenever no generative backend is configured or a backend call fails.
//! The branch is chosen from the prompt wording alone, and the only varying
//! part of the output is the keyword phrase extracted from that prompt.

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "about", "section", "heading", "document", "write", "detailed", "concise", "business",
    "ready", "focus", "titled",
];

const MAX_KEYWORDS: usize = 5;
const MIN_KEYWORD_LEN: usize = 4;
const GENERIC_SUBJECT: &str = "the subject matter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Overview,
    Insights,
    NextSteps,
    General,
}

impl SectionKind {
    /// First match wins, checked in declaration order.
    pub fn detect(prompt: &str) -> Self {
        let lower = prompt.to_lowercase();
        if lower.contains("overview") || lower.contains("introduction") {
            SectionKind::Overview
        } else if lower.contains("insight") || lower.contains("analysis") {
            SectionKind::Insights
        } else if lower.contains("next step")
            || lower.contains("recommendation")
            || lower.contains("action")
        {
            SectionKind::NextSteps
        } else {
            SectionKind::General
        }
    }
}

/// First five non-stop-word tokens longer than three characters, or a
/// generic phrase when none survive. Tokens are raw whitespace splits of the
/// lowercased prompt, so attached punctuation stays part of the token.
pub fn extract_topic_keywords(prompt: &str) -> String {
    let lower = prompt.to_lowercase();
    let keywords: Vec<&str> = lower
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
        .take(MAX_KEYWORDS)
        .collect();

    if keywords.is_empty() {
        GENERIC_SUBJECT.to_string()
    } else {
        keywords.join(" ")
    }
}

/// Three canned paragraphs for the detected section kind, joined by spaces.
pub fn compose(prompt: &str) -> String {
    let keywords = extract_topic_keywords(prompt);
    paragraphs(SectionKind::detect(prompt), &keywords).join(" ")
}

fn paragraphs(kind: SectionKind, keywords: &str) -> [String; 3] {
    match kind {
        SectionKind::Overview => [
            format!(
                "This comprehensive analysis provides an in-depth examination of {keywords}. \
                 The current market landscape presents both significant opportunities and notable challenges \
                 that require careful strategic consideration. Understanding the fundamental dynamics at play \
                 is essential for making informed decisions and developing effective approaches."
            ),
            "Recent developments in this sector have reshaped traditional expectations and created \
             new pathways for growth and innovation. Key factors driving change include technological \
             advancements, evolving consumer preferences, regulatory shifts, and competitive pressures. \
             These elements combine to form a complex ecosystem that demands nuanced understanding."
                .to_string(),
            "Stakeholders across the industry are increasingly recognizing the importance of \
             data-driven insights and evidence-based strategies. Organizations that successfully \
             navigate this environment will be those that can adapt quickly, leverage emerging \
             opportunities, and mitigate potential risks through proactive planning."
                .to_string(),
        ],
        SectionKind::Insights => [
            format!(
                "Critical insights reveal several important patterns and trends within {keywords}. \
                 Analysis of current data indicates that organizations are experiencing both unprecedented \
                 opportunities and complex challenges. The most successful approaches combine strategic \
                 vision with practical implementation capabilities."
            ),
            "Market research suggests that key success factors include understanding customer needs, \
             maintaining competitive advantages, and building sustainable operational models. \
             Companies that invest in innovation and adapt to changing conditions tend to outperform \
             those that maintain rigid, traditional approaches."
                .to_string(),
            "Emerging trends point toward increased emphasis on digital transformation, \
             sustainability initiatives, and customer-centric strategies. These developments \
             require organizations to rethink their business models and operational frameworks. \
             Early adopters of these approaches are positioning themselves for long-term success."
                .to_string(),
        ],
        SectionKind::NextSteps => [
            format!(
                "Based on comprehensive analysis of {keywords}, several strategic next steps \
                 emerge as priorities for forward-looking organizations. These recommendations are \
                 designed to address current challenges while positioning for future growth and success."
            ),
            "Immediate actions should focus on establishing clear objectives, allocating appropriate \
             resources, and building necessary capabilities. Short-term initiatives might include \
             pilot programs, stakeholder engagement, and process improvements that deliver \
             measurable results within defined timeframes."
                .to_string(),
            "Long-term strategic planning requires consideration of market evolution, competitive \
             dynamics, and emerging opportunities. Organizations should develop flexible roadmaps \
             that allow for adaptation as conditions change. Success will depend on consistent \
             execution, continuous monitoring, and willingness to adjust strategies based on \
             performance data and market feedback."
                .to_string(),
        ],
        SectionKind::General => [
            format!(
                "This section examines important aspects of {keywords} that are critical for \
                 understanding the broader context and implications. The subject matter encompasses \
                 multiple dimensions that require careful analysis and thoughtful consideration."
            ),
            "Key considerations include the interplay between various factors, the impact of \
             external forces, and the potential outcomes of different strategic choices. \
             Organizations must balance competing priorities while maintaining focus on core \
             objectives and long-term sustainability."
                .to_string(),
            "Effective approaches typically involve comprehensive planning, stakeholder alignment, \
             and systematic implementation. Success requires not only sound strategy but also \
             strong execution capabilities and the ability to adapt to changing circumstances. \
             Organizations that master these elements are well-positioned to achieve their goals."
                .to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_overview_beats_other_keywords() {
        assert_eq!(
            SectionKind::detect("An Introduction with analysis and next steps"),
            SectionKind::Overview
        );
    }

    #[test]
    fn test_detect_each_branch() {
        assert_eq!(SectionKind::detect("Market ANALYSIS"), SectionKind::Insights);
        assert_eq!(SectionKind::detect("key insights"), SectionKind::Insights);
        assert_eq!(SectionKind::detect("Next Steps"), SectionKind::NextSteps);
        assert_eq!(SectionKind::detect("our recommendations"), SectionKind::NextSteps);
        assert_eq!(SectionKind::detect("call to action"), SectionKind::NextSteps);
        assert_eq!(SectionKind::detect("Budget and costs"), SectionKind::General);
    }

    #[test]
    fn test_keywords_drop_stop_words_and_short_tokens() {
        assert_eq!(
            extract_topic_keywords("Write the section about Electric Vehicle adoption in Europe"),
            "electric vehicle adoption europe"
        );
    }

    #[test]
    fn test_keywords_capped_at_five() {
        assert_eq!(
            extract_topic_keywords("alpha bravo charlie delta echoes foxtrot golf"),
            "alpha bravo charlie delta echoes"
        );
    }

    #[test]
    fn test_keywords_keep_attached_punctuation() {
        assert_eq!(
            extract_topic_keywords("'quantum' (computing), roadmap."),
            "'quantum' (computing), roadmap."
        );
        // "detailed," is not the stop word "detailed".
        assert_eq!(extract_topic_keywords("Detailed, plan"), "detailed, plan");
    }

    #[test]
    fn test_keywords_from_section_prompt() {
        let prompt = crate::content::prompts::section_prompt("Ocean Shipping", "Overview");
        assert_eq!(
            extract_topic_keywords(&prompt),
            "comprehensive, business-ready least words) 'ocean"
        );
    }

    #[test]
    fn test_keywords_generic_when_nothing_survives() {
        assert_eq!(extract_topic_keywords("the a of it"), "the subject matter");
        assert_eq!(extract_topic_keywords(""), "the subject matter");
    }

    #[test]
    fn test_compose_has_three_paragraphs_with_keywords() {
        let text = compose("Overview of solar panel recycling");
        assert!(text.starts_with("This comprehensive analysis provides an in-depth examination of overview solar panel recycling."));
        assert!(text.contains("Stakeholders across the industry"));
    }

    #[test]
    fn test_compose_is_deterministic_modulo_keywords() {
        let a = compose("Budget planning for hospital logistics");
        let b = compose("Budget planning for hospital logistics");
        assert_eq!(a, b);

        let c = compose("Budget planning for airport logistics");
        assert_eq!(
            a.replace("hospital", "airport"),
            c,
            "only the keyword phrase may differ"
        );
    }
}
