// Prompt builders for the content service. The fallback composer keys off
// the wording of these prompts, so changing them changes fallback output.

pub fn section_prompt(topic: &str, section_title: &str) -> String {
    format!(
        "Write a comprehensive, detailed business-ready section (at least 300 words) for the document titled \
         '{topic}'. Focus specifically on the section heading '{section_title}'. \
         Use professional tone, include relevant details, examples, and actionable insights. \
         Make the content substantial and informative."
    )
}

pub fn refine_prompt(
    topic: &str,
    section_title: &str,
    current_text: &str,
    instruction: &str,
) -> String {
    format!(
        "You are improving a section named '{section_title}' in a document about {topic}. \
         Current text:\n{current_text}\n\nApply this instruction: {instruction}. \
         Return the updated section text only."
    )
}

pub fn outline_prompt(topic: &str, doc_type_upper: &str, item_count: usize) -> String {
    format!(
        "Create {item_count} concise headings for a {doc_type_upper} document about {topic}. \
         Provide only the headings separated by newline."
    )
}
