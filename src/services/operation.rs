//! GraphQL pseudo-operation classification
//!
//! Operations are recognized by keyword co-occurrence in the query text, not
//! by parsing it. A query that merely mentions a keyword will still match.

/// Pseudo-operations understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateSession,
    ChatHistory,
    SendMessage,
    GetAIResponse,
    GenerateImage,
}

impl Operation {
    /// Field name the payload is returned under in `data`
    pub fn field_name(&self) -> &'static str {
        match self {
            Operation::CreateSession => "createSession",
            Operation::ChatHistory => "chatHistory",
            Operation::SendMessage => "sendMessage",
            Operation::GetAIResponse => "getAIResponse",
            Operation::GenerateImage => "generateImage",
        }
    }

    /// Whether handling this operation calls the upstream provider
    pub fn requires_upstream(&self) -> bool {
        matches!(self, Operation::GetAIResponse | Operation::GenerateImage)
    }
}

/// Decides which operation a raw query asks for
pub trait OperationClassifier: Send + Sync + std::fmt::Debug {
    fn classify(&self, query: &str) -> Option<Operation>;
}

/// Keyword rules in priority order; first match wins
const KEYWORD_RULES: &[(&str, &str, Operation)] = &[
    ("mutation", "createsession", Operation::CreateSession),
    ("query", "chathistory", Operation::ChatHistory),
    ("mutation", "sendmessage", Operation::SendMessage),
    ("mutation", "getairesponse", Operation::GetAIResponse),
    ("mutation", "generateimage", Operation::GenerateImage),
];

/// Substring co-occurrence classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl OperationClassifier for KeywordClassifier {
    fn classify(&self, query: &str) -> Option<Operation> {
        let normalized = normalize_query(query);

        KEYWORD_RULES
            .iter()
            .find(|rule| normalized.contains(rule.0) && normalized.contains(rule.1))
            .map(|rule| rule.2)
    }
}

/// Collapse whitespace runs to a single space and lower-case
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Mutation\n\t CreateSession {  }"), "mutation createsession { }");
    }

    #[test]
    fn test_classify_each_operation() {
        let classifier = KeywordClassifier;
        let cases = [
            ("mutation { createSession { sessionId } }", Operation::CreateSession),
            ("query { chatHistory(sessionId: \"x\") { id } }", Operation::ChatHistory),
            ("mutation Send($input: X) { sendMessage(input: $input) { id } }", Operation::SendMessage),
            ("mutation { getAIResponse(input: $input) { content } }", Operation::GetAIResponse),
            ("mutation { generateImage(input: $input) { images } }", Operation::GenerateImage),
        ];

        for (query, expected) in cases {
            assert_eq!(classifier.classify(query), Some(expected), "query: {}", query);
        }
    }

    #[test]
    fn test_priority_order() {
        // Both sendmessage and getairesponse appear; sendMessage is checked first
        let query = "mutation { sendMessage { id } getAIResponse { id } }";
        assert_eq!(KeywordClassifier.classify(query), Some(Operation::SendMessage));
    }

    #[test]
    fn test_keyword_requires_operation_kind() {
        assert_eq!(KeywordClassifier.classify("query { createSession }"), None);
        assert_eq!(KeywordClassifier.classify(""), None);
    }

    #[test]
    fn test_requires_upstream() {
        assert!(Operation::GetAIResponse.requires_upstream());
        assert!(!Operation::SendMessage.requires_upstream());
    }
}
