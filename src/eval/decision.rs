use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Report,
    Warn,
    Block,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Report => "report",
            Decision::Warn => "warn",
            Decision::Block => "block",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Report => "REPORT",
            Decision::Warn => "WARN",
            Decision::Block => "BLOCK",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub decision: Decision,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Decision::Allow < Decision::Report);
        assert!(Decision::Report < Decision::Warn);
        assert!(Decision::Warn < Decision::Block);
    }

    #[test]
    fn parses_from_policy_string() {
        let d: Decision = serde_json::from_str("\"block\"").unwrap();
        assert_eq!(d, Decision::Block);
    }
}
