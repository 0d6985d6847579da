/// System instruction sent with every summarization request.
pub const SYSTEM_PROMPT: &str = "You are an expert meeting summarizer. Your task is to analyze meeting transcripts and create clear, actionable summaries.

Guidelines:
- Be concise but comprehensive
- Focus on actionable items and decisions
- Use bullet points for clarity
- Maintain professional tone
- Highlight important deadlines and commitments
- If information is unclear, note it as \"needs clarification\"";

/// Placed between the resolved prompt and the raw transcript.
pub const TRANSCRIPT_SEPARATOR: &str = "\n\nMeeting Transcript:\n";

/// Join the resolved prompt and the transcript into the final user prompt.
pub fn build_summary_prompt(resolved_prompt: &str, transcript: &str) -> String {
    format!("{resolved_prompt}{TRANSCRIPT_SEPARATOR}{transcript}")
}
