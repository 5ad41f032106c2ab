use std::collections::HashSet;

/// Compiled `--status` expression
///
/// Built once per run and applied to every entry. Malformed terms are
/// ignored; an expression with no usable terms accepts every status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusPredicate {
    /// No filter given, or nothing usable in it
    #[default]
    Any,
    /// A single hundred-block, e.g. `4xx`
    Class(u16),
    /// Union of literal codes and expanded classes
    Set(HashSet<i64>),
}

impl StatusPredicate {
    /// Compiles a comma-separated list of `Nxx` classes and literal codes.
    pub fn parse(expr: Option<&str>) -> Self {
        let Some(expr) = expr else {
            return StatusPredicate::Any;
        };
        let expr = expr.trim();
        if expr.is_empty() {
            return StatusPredicate::Any;
        }

        if let Some(base) = parse_class(expr) {
            return StatusPredicate::Class(base);
        }

        let mut allowed = HashSet::new();
        for term in expr.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(base) = parse_class(term) {
                let start = i64::from(base) * 100;
                allowed.extend(start..start + 100);
            } else if let Ok(code) = term.parse::<i64>() {
                allowed.insert(code);
            }
        }

        if allowed.is_empty() {
            StatusPredicate::Any
        } else {
            StatusPredicate::Set(allowed)
        }
    }

    pub fn matches(&self, status: u16) -> bool {
        match self {
            StatusPredicate::Any => true,
            StatusPredicate::Class(base) => status / 100 == *base,
            StatusPredicate::Set(allowed) => allowed.contains(&i64::from(status)),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, StatusPredicate::Any)
    }
}

/// Shorthand for [`StatusPredicate::parse`]
pub fn build_status_predicate(expr: Option<&str>) -> StatusPredicate {
    StatusPredicate::parse(expr)
}

/// `Nxx` where N is a single ASCII digit
fn parse_class(term: &str) -> Option<u16> {
    let bytes = term.as_bytes();
    if bytes.len() == 3 && bytes[0].is_ascii_digit() && &bytes[1..] == b"xx" {
        Some(u16::from(bytes[0] - b'0'))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class() {
        assert_eq!(parse_class("4xx"), Some(4));
        assert_eq!(parse_class("0xx"), Some(0));
        assert_eq!(parse_class("4XX"), None);
        assert_eq!(parse_class("40x"), None);
        assert_eq!(parse_class("44xx"), None);
        assert_eq!(parse_class("xx"), None);
    }

    #[test]
    fn test_solitary_class_uses_fast_path() {
        assert_eq!(StatusPredicate::parse(Some(" 5xx ")), StatusPredicate::Class(5));
    }

    #[test]
    fn test_class_inside_list_expands_to_set() {
        let predicate = StatusPredicate::parse(Some("5xx,404"));
        match &predicate {
            StatusPredicate::Set(allowed) => assert_eq!(allowed.len(), 101),
            other => panic!("expected a set, got {other:?}"),
        }
        assert!(predicate.matches(404));
        assert!(predicate.matches(599));
        assert!(!predicate.matches(403));
    }
}
