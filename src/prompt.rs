/// Builds the instruction sent to the generation service.
///
/// Inputs are taken as-is; checking that the fields are filled in is the
/// controller's job.
pub fn build(topic: &str, level: u8, n_questions: u8) -> String {
    format!(
        "I am currently learning the topic {topic}, but I want to test myself, so give me \
         {n_questions} questions to evaluate myself based on difficulty level {level}. \
         Give all questions randomly for use cases like interviews, things used often \
         professionally, etc."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_topic_count_and_level() {
        let prompt = build("Graph Theory", 5, 3);
        assert!(prompt.contains("topic Graph Theory,"));
        assert!(prompt.contains("give me 3 questions"));
        assert!(prompt.contains("difficulty level 5."));
    }

    #[test]
    fn mentions_usage_contexts() {
        let prompt = build("SQL", 1, 10);
        assert!(prompt.contains("interviews"));
        assert!(prompt.contains("professionally"));
    }

    #[test]
    fn accepts_empty_topic_without_failing() {
        let prompt = build("", 10, 1);
        assert!(prompt.contains("give me 1 questions"));
        assert!(prompt.contains("difficulty level 10."));
    }
}
