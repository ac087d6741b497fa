use crate::models::ExtractionTarget;

/// Describes the reply the model must produce for a `T` record.
pub fn schema_prompt<T: ExtractionTarget>(task: &str) -> String {
    let schema = serde_json::to_string_pretty(&T::extraction_schema()).unwrap_or_default();
    format!(
        "{}. Return in a JSON format as `{}`. Respond with the JSON only. \
         The JSON must validate against this JSON Schema:\n{}",
        task,
        T::shape(),
        schema
    )
}

/// Embeds the whole page verbatim; no truncation is applied.
pub fn build_prompt(markdown: &str, schema_prompt: &str) -> String {
    let mut result = String::with_capacity(markdown.len() + schema_prompt.len() + 64);
    result.push_str("Understand the following markdown\n\n\n\n");
    result.push_str(markdown);
    result.push_str("\n\n\n\n");
    result.push_str(schema_prompt);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticlesList;

    #[test]
    fn prompt_embeds_page_and_shape() {
        let schema = schema_prompt::<ArticlesList>("extract the top 3 newest articles");
        let prompt = build_prompt("# Front page\n\n- Story", &schema);

        assert!(prompt.starts_with("Understand the following markdown"));
        assert!(prompt.contains("# Front page\n\n- Story"));
        assert!(prompt.contains("extract the top 3 newest articles. Return in a JSON format as `{articles: [{title: str, date: mm/dd/yyyy, url: str}]}`"));
        assert!(prompt.contains("\"ArticleListItem\""));
    }
}
