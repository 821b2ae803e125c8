//! Prompt template: instructions, retrieved context, then the question.

use rag_store::RagHit;

/// Fixed RAG prompt. `{context}` and `{question}` are substituted verbatim.
pub const RAG_PROMPT_TEMPLATE: &str = "Use the following pieces of context to answer the question at the end.
If you don't know the answer, just say that you don't know.
Always provide the most thorough and detailed answer.
Always say \"thanks for asking!\" at the end of the answer.
{context}
Question: {question}
Helpful Answer:";

/// Joins hit texts in ranking order, separated by a blank line.
pub fn join_context(hits: &[RagHit]) -> String {
    hits.iter()
        .map(|h| h.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Substitutes both placeholders in [`RAG_PROMPT_TEMPLATE`].
///
/// `{context}` is replaced first, so a literal `{question}` inside the
/// retrieved text is left alone.
///
/// # Example
/// ```
/// use contextor::prompt::build_prompt;
/// let p = build_prompt("CV is a field of AI.", "What is computer vision?");
/// assert!(p.contains("Question: What is computer vision?"));
/// ```
pub fn build_prompt(context: &str, question: &str) -> String {
    let (head, tail) = RAG_PROMPT_TEMPLATE
        .split_once("{context}")
        .unwrap_or((RAG_PROMPT_TEMPLATE, ""));
    let tail = tail.replace("{question}", question);
    format!("{head}{context}{tail}")
}
