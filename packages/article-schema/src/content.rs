//! Content model expressions.
//!
//! A content model is a small grammar over node names and group names:
//! `block+`, `inline*`, `(text | hard_break)*`, `table_row{1,}`. An empty
//! expression means the node admits no children.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SchemaError};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\s\w]").expect("valid regex"));

/// Parsed content expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentExpr {
    /// Matches exactly the empty child sequence.
    Empty,
    /// A node name or a group name.
    Name(String),
    Seq(Vec<ContentExpr>),
    Choice(Vec<ContentExpr>),
    Repeat {
        expr: Box<ContentExpr>,
        min: usize,
        max: Option<usize>,
    },
}

impl ContentExpr {
    /// Parse an expression.
    ///
    /// # Errors
    /// Returns `InvalidContentExpression` for unbalanced parentheses,
    /// dangling operators or malformed `{n,m}` ranges.
    ///
    /// # Examples
    /// ```
    /// use article_schema::content::ContentExpr;
    ///
    /// let expr = ContentExpr::parse("(text | hard_break)*").unwrap();
    /// let accepts = |name: &str, child: &str| name == child;
    /// assert!(expr.matches(&["text", "hard_break", "text"], &accepts));
    /// assert!(!expr.matches(&["paragraph"], &accepts));
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(source)
            .map(|m| m.as_str())
            .collect();
        if tokens.is_empty() {
            return Ok(Self::Empty);
        }

        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
        };
        let expr = parser.parse_choice()?;
        if let Some(token) = parser.peek() {
            return Err(parser.error(format!("unexpected token '{token}'")));
        }
        Ok(expr)
    }

    /// All node and group names the expression refers to.
    #[must_use]
    pub fn references(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Self::Empty => {}
            Self::Name(name) => {
                names.insert(name.as_str());
            }
            Self::Seq(items) | Self::Choice(items) => {
                for item in items {
                    item.collect_references(names);
                }
            }
            Self::Repeat { expr, .. } => expr.collect_references(names),
        }
    }

    /// Check a child type sequence against the expression.
    ///
    /// `accepts(name, child_type)` decides whether a name in the
    /// expression (node or group) admits a child of the given type.
    pub fn matches(&self, children: &[&str], accepts: &dyn Fn(&str, &str) -> bool) -> bool {
        self.advance(children, 0, accepts)
            .contains(&children.len())
    }

    /// Positions reachable after matching this expression from `from`.
    fn advance(
        &self,
        children: &[&str],
        from: usize,
        accepts: &dyn Fn(&str, &str) -> bool,
    ) -> BTreeSet<usize> {
        match self {
            Self::Empty => BTreeSet::from([from]),
            Self::Name(name) => match children.get(from) {
                Some(&child) if accepts(name.as_str(), child) => BTreeSet::from([from + 1]),
                _ => BTreeSet::new(),
            },
            Self::Seq(items) => items.iter().fold(BTreeSet::from([from]), |positions, item| {
                positions
                    .into_iter()
                    .flat_map(|pos| item.advance(children, pos, accepts))
                    .collect()
            }),
            Self::Choice(alternatives) => alternatives
                .iter()
                .flat_map(|alt| alt.advance(children, from, accepts))
                .collect(),
            Self::Repeat { expr, min, max } => {
                let mut reachable = BTreeSet::new();
                let mut frontier = BTreeSet::from([from]);
                let mut count = 0;
                loop {
                    if count >= *min {
                        reachable.extend(frontier.iter().copied());
                    }
                    if max.is_some_and(|max| count >= max) || frontier.is_empty() {
                        break;
                    }
                    let next: BTreeSet<usize> = frontier
                        .iter()
                        .flat_map(|pos| expr.advance(children, *pos, accepts))
                        .collect();
                    count += 1;
                    // Past the minimum, a step that adds nothing new is a fixpoint
                    if count > *min && next.is_subset(&reachable) {
                        break;
                    }
                    frontier = next;
                }
                reachable
            }
        }
    }
}

impl fmt::Display for ContentExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Name(name) => f.write_str(name),
            Self::Seq(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(" "))
            }
            Self::Choice(alternatives) => {
                let parts: Vec<String> = alternatives.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(" | "))
            }
            Self::Repeat { expr, min, max } => {
                let inner = match expr.as_ref() {
                    Self::Seq(_) => format!("({expr})"),
                    _ => expr.to_string(),
                };
                match (min, max) {
                    (0, None) => write!(f, "{inner}*"),
                    (1, None) => write!(f, "{inner}+"),
                    (0, Some(1)) => write!(f, "{inner}?"),
                    (min, None) => write!(f, "{inner}{{{min},}}"),
                    (min, Some(max)) if min == max => write!(f, "{inner}{{{min}}}"),
                    (min, Some(max)) => write!(f, "{inner}{{{min},{max}}}"),
                }
            }
        }
    }
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<&'s str>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn peek(&self) -> Option<&'s str> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'s str> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: impl Into<String>) -> SchemaError {
        SchemaError::InvalidContentExpression {
            expr: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_choice(&mut self) -> Result<ContentExpr> {
        let mut alternatives = vec![self.parse_seq()?];
        while self.eat("|") {
            alternatives.push(self.parse_seq()?);
        }
        Ok(if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            ContentExpr::Choice(alternatives)
        })
    }

    fn parse_seq(&mut self) -> Result<ContentExpr> {
        let mut items = Vec::new();
        while let Some(token) = self.peek() {
            if token == ")" || token == "|" {
                break;
            }
            items.push(self.parse_term()?);
        }
        match items.len() {
            0 => Err(self.error("expected a name or '('")),
            1 => Ok(items.remove(0)),
            _ => Ok(ContentExpr::Seq(items)),
        }
    }

    fn parse_term(&mut self) -> Result<ContentExpr> {
        let mut expr = self.parse_atom()?;
        loop {
            let (min, max) = if self.eat("*") {
                (0, None)
            } else if self.eat("+") {
                (1, None)
            } else if self.eat("?") {
                (0, Some(1))
            } else if self.eat("{") {
                self.parse_range()?
            } else {
                break;
            };
            expr = ContentExpr::Repeat {
                expr: Box::new(expr),
                min,
                max,
            };
        }
        Ok(expr)
    }

    fn parse_range(&mut self) -> Result<(usize, Option<usize>)> {
        let min = self.parse_count()?;
        let max = if self.eat(",") {
            if self.peek() == Some("}") {
                None
            } else {
                Some(self.parse_count()?)
            }
        } else {
            Some(min)
        };
        if !self.eat("}") {
            return Err(self.error("unclosed '{'"));
        }
        if max.is_some_and(|max| max < min) {
            return Err(self.error(format!("empty range {{{min},..}}")));
        }
        Ok((min, max))
    }

    fn parse_count(&mut self) -> Result<usize> {
        let token = self.next().unwrap_or_default();
        token
            .parse()
            .map_err(|_| self.error(format!("expected a number, found '{token}'")))
    }

    fn parse_atom(&mut self) -> Result<ContentExpr> {
        match self.next() {
            Some("(") => {
                let expr = self.parse_choice()?;
                if !self.eat(")") {
                    return Err(self.error("missing ')'"));
                }
                Ok(expr)
            }
            Some(token) if token.chars().all(|c| c.is_alphanumeric() || c == '_') => {
                Ok(ContentExpr::Name(token.to_string()))
            }
            Some(token) => Err(self.error(format!("unexpected token '{token}'"))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_name(name: &str, child: &str) -> bool {
        name == child || (name == "inline" && (child == "text" || child == "hard_break"))
    }

    fn check(expr: &str, children: &[&str]) -> bool {
        ContentExpr::parse(expr).unwrap().matches(children, &by_name)
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(ContentExpr::parse("").unwrap(), ContentExpr::Empty);
        assert!(check("", &[]));
        assert!(!check("", &["text"]));
    }

    #[test]
    fn test_star_and_plus() {
        assert!(check("inline*", &[]));
        assert!(check("inline*", &["text", "hard_break", "text"]));
        assert!(!check("paragraph+", &[]));
        assert!(check("paragraph+", &["paragraph", "paragraph"]));
    }

    #[test]
    fn test_choice_group() {
        assert!(check("(table_cell | table_header)*", &["table_header", "table_cell"]));
        assert!(!check("(table_cell | table_header)*", &["paragraph"]));
    }

    #[test]
    fn test_sequence_and_optional() {
        assert!(check("heading paragraph?", &["heading"]));
        assert!(check("heading paragraph?", &["heading", "paragraph"]));
        assert!(!check("heading paragraph?", &["paragraph"]));
    }

    #[test]
    fn test_ranges() {
        assert!(check("paragraph{2}", &["paragraph", "paragraph"]));
        assert!(!check("paragraph{2}", &["paragraph"]));
        assert!(check("paragraph{1,}", &["paragraph", "paragraph", "paragraph"]));
        assert!(!check("paragraph{1,2}", &["paragraph", "paragraph", "paragraph"]));
    }

    #[test]
    fn test_nested_star_terminates() {
        assert!(check("(inline*)*", &["text"]));
        assert!(check("(paragraph?)+", &[]));
    }

    #[test]
    fn test_references() {
        let expr = ContentExpr::parse("(text | hard_break)* image?").unwrap();
        let refs: Vec<_> = expr.references().into_iter().collect();
        assert_eq!(refs, vec!["hard_break", "image", "text"]);
    }

    #[test]
    fn test_parse_errors() {
        for source in ["(text", "text |", "*", "text{2,1}", "text{x}", "text)"] {
            let err = ContentExpr::parse(source).unwrap_err();
            assert!(
                matches!(err, SchemaError::InvalidContentExpression { .. }),
                "source {source:?}"
            );
        }
    }

    #[test]
    fn test_display() {
        let expr = ContentExpr::parse("(text|hard_break)*").unwrap();
        assert_eq!(expr.to_string(), "(text | hard_break)*");
    }
}
