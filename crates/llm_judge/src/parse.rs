use paper_core::JudgeVerdict;
use serde_json::{Map, Value};

/// Pull a JSON object out of a model answer.
///
/// The whole text is tried first, then the span from the first `{` to the
/// last `}`. Anything that is not an object yields `None`.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str(text) {
        return Some(map);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn field_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Turn a judge answer object into a verdict; unknown winners become a tie.
pub fn verdict_from_json(object: &Map<String, Value>) -> JudgeVerdict {
    let winner = field_text(object, "winner");
    JudgeVerdict::from_raw(winner.trim(), &field_text(object, "rationale"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paper_core::{Winner, JUDGE_RATIONALE_LIMIT};

    #[test]
    fn plain_json_answer() {
        let obj =
            extract_json_object(r#"{"winner": "paperB", "rationale": "cleaner design"}"#).unwrap();
        let verdict = verdict_from_json(&obj);
        assert_eq!(verdict.winner, Winner::B);
        assert_eq!(verdict.rationale, "cleaner design");
    }

    #[test]
    fn json_wrapped_in_prose_or_fences() {
        let text =
            "Sure, here you go:\n```json\n{\"winner\": \"paperA\", \"rationale\": \"x\"}\n```";
        let obj = extract_json_object(text).unwrap();
        assert_eq!(verdict_from_json(&obj).winner, Winner::A);
    }

    #[test]
    fn non_object_answers_are_rejected() {
        assert!(extract_json_object("").is_none());
        assert!(extract_json_object("   ").is_none());
        assert!(extract_json_object("[1, 2]").is_none());
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{ broken").is_none());
    }

    #[test]
    fn unknown_or_missing_winner_is_a_tie() {
        let obj = extract_json_object(r#"{"winner": "paperC"}"#).unwrap();
        let verdict = verdict_from_json(&obj);
        assert_eq!(verdict.winner, Winner::Tie);
        assert_eq!(verdict.rationale, "");

        let obj = extract_json_object(r#"{"rationale": "undecided"}"#).unwrap();
        assert_eq!(verdict_from_json(&obj).winner, Winner::Tie);
    }

    #[test]
    fn winner_tokens_are_case_sensitive() {
        for token in ["PAPERA", "papera", "a", "B", "Paperb"] {
            let obj = extract_json_object(&format!(r#"{{"winner": "{token}"}}"#)).unwrap();
            assert_eq!(verdict_from_json(&obj).winner, Winner::Tie, "{token}");
        }
    }

    #[test]
    fn long_rationale_is_clipped() {
        let long = "z".repeat(1000);
        let answer = format!(r#"{{"winner": "tie", "rationale": "{long}"}}"#);
        let obj = extract_json_object(&answer).unwrap();
        assert_eq!(
            verdict_from_json(&obj).rationale.chars().count(),
            JUDGE_RATIONALE_LIMIT
        );
    }

    #[test]
    fn non_string_rationale_is_stringified() {
        let obj = extract_json_object(r#"{"winner": " paperA ", "rationale": 42}"#).unwrap();
        let verdict = verdict_from_json(&obj);
        assert_eq!(verdict.winner, Winner::A);
        assert_eq!(verdict.rationale, "42");
    }
}
