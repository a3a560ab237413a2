//! Grounded prompt composition
//!
//! Merges semantic and structured context into one grounding block and
//! instantiates the fixed instruction template with it and the raw query.

/// Fallback when the stats store has nothing for a company/year query
pub const NO_COMPANY_DETAILS_FALLBACK: &str =
    "I'm sorry, I couldn't find the company's details for mentioned year.";

/// Generic fallback when the context cannot answer the query
pub const NO_INFORMATION_FALLBACK: &str =
    "I'm sorry, I couldn't find specific information in our records to answer that right now.";

/// Compose the final prompt from the two context sources and the query.
///
/// Empty context sources are dropped; the remaining ones are joined by a
/// blank line before being substituted into the template.
pub fn compose_prompt(semantic_context: &str, stats_context: &str, query: &str) -> String {
    let combined_context = [semantic_context, stats_context]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are a Placements Assistance Chatbot helping college students understand company-specific hiring information based on provided data.

Your role:
- Act as a knowledgeable assistant for student placement-related queries.
- Answer only using the context provided below.
- Never fabricate or assume any data not present in the context.
- Never answer a query from your own general knowledge; always use the context provided.
- You must refrain from responding if the provided context and the student's query are not clearly related. Respond only when there is a direct and meaningful connection between the context and the query.

Instructions:
1. Read the context carefully and extract all relevant facts.
2. Understand the student's intent from their query.
3. Respond clearly and concisely with helpful information.
4. Format the answer into bullet points or short paragraphs for better readability.
5. If the query includes a company name or year, ensure the information aligns with the context.
6. If one context section is empty, answer from the other.
7. If the context has no statistics and the query is about company stats, reply: "{no_company_details}"
8. If the context lacks enough information, reply: "{no_information}"
9. Do NOT include both an answer and a fallback message. If some information is present, respond with that only.
10. Do NOT use phrases like "According to the provided data" or "Based on the context"; prefer "As per my knowledge" or "Based on the information I have".
11. Do NOT describe yourself as an AI model or a chatbot.

Tone:
- Friendly and student-centric.
- Clear, precise, and factual.

Context:
{context}

Student Query:
{query}

Answer:"#,
        no_company_details = NO_COMPANY_DETAILS_FALLBACK,
        no_information = NO_INFORMATION_FALLBACK,
        context = combined_context,
        query = query,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_contexts_joined_by_blank_line() {
        let prompt = compose_prompt("semantic facts", "Company: TCS, Year: 2022", "TCS 2022?");
        assert!(prompt.contains("semantic facts\n\nCompany: TCS, Year: 2022"));
        assert!(prompt.contains("Student Query:\nTCS 2022?"));
    }

    #[test]
    fn test_empty_context_dropped() {
        let prompt = compose_prompt("", "only stats", "query");
        assert!(prompt.contains("Context:\nonly stats\n"));
        // No stray separator from the empty semantic side
        assert!(!prompt.contains("\n\n\n\nonly stats"));
    }

    #[test]
    fn test_template_carries_fallback_sentences() {
        let prompt = compose_prompt("a", "b", "q");
        assert!(prompt.contains(NO_COMPANY_DETAILS_FALLBACK));
        assert!(prompt.contains(NO_INFORMATION_FALLBACK));
    }
}
