// Cross-cutting prompt fragments. Each module that calls the LLM keeps its
// own prompts.rs alongside it and pulls shared pieces from here.

/// Appended to every system prompt that expects a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated text tied to what the résumé actually says.
pub const RESUME_GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Only state qualifications, employers, dates, and achievements that \
    appear in the résumé text provided. Do NOT invent experience, degrees, or \
    metrics. If the résumé does not support a claim, leave it out.";

/// Joins a role description with the JSON-only instruction.
pub fn json_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_INSTRUCTION}")
}
