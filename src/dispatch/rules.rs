//! Ordered rule table for classifying inbound text.
//!
//! Rules are evaluated top to bottom against the normalized message and the
//! first match wins. The standard table is:
//! 1. greeting (exact phrase)
//! 2. blessing (all tokens present anywhere)
//! 3. page number (digits only) → image + recitation
//! 4. recitation command (`ترتيل <digits>`) → recitation only
//! 5. named tajweed rules (exact key)
//! 6. help synonyms
//!
//! Anything else falls through to silence.

use tracing::debug;

use super::action::TextReply;
use super::catalogue;

/// Input reduced to the form used for matching: trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage(String);

impl NormalizedMessage {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Value of a decimal digit in ASCII, Arabic-Indic or Extended Arabic-Indic.
///
/// These are the only scripts accepted as page numbers. Other Unicode
/// decimal digits (Devanagari, Bengali, fullwidth and so on) are not digits
/// here, so such input falls through to the later rules.
pub fn decimal_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - 0x06F0),
        _ => None,
    }
}

/// True for a non-empty string made only of decimal digits.
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| decimal_digit(c).is_some())
}

/// Parse an all-digit string. `None` if it is not all digits or overflows.
pub fn parse_digits(s: &str) -> Option<u32> {
    if !is_all_digits(s) {
        return None;
    }
    s.chars().try_fold(0u32, |acc, c| {
        acc.checked_mul(10)?.checked_add(decimal_digit(c)?)
    })
}

/// What a matcher extracted from the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Matched with nothing to extract.
    Whole,
    /// Matched a digit run; `None` when the value does not fit.
    Number(Option<u32>),
}

/// Predicate over a normalized message.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Text equals the phrase.
    Exact(String),
    /// Text equals any of the phrases.
    AnyOf(Vec<String>),
    /// Text contains every token, anywhere.
    ContainsAll(Vec<String>),
    /// Text is only decimal digits.
    Digits,
    /// Exactly two whitespace-separated tokens: the keyword, then digits.
    Command { keyword: String },
}

impl Matcher {
    pub fn matches(&self, message: &NormalizedMessage) -> Option<Capture> {
        let text = message.as_str();
        match self {
            Matcher::Exact(phrase) => (text == phrase).then_some(Capture::Whole),
            Matcher::AnyOf(phrases) => phrases
                .iter()
                .any(|p| p == text)
                .then_some(Capture::Whole),
            Matcher::ContainsAll(tokens) => tokens
                .iter()
                .all(|t| text.contains(t.as_str()))
                .then_some(Capture::Whole),
            Matcher::Digits => is_all_digits(text).then(|| Capture::Number(parse_digits(text))),
            Matcher::Command { keyword } => {
                let mut tokens = text.split_whitespace();
                match (tokens.next(), tokens.next(), tokens.next()) {
                    (Some(first), Some(arg), None) if first == keyword && is_all_digits(arg) => {
                        Some(Capture::Number(parse_digits(arg)))
                    }
                    _ => None,
                }
            }
        }
    }
}

/// What a matched rule produces.
#[derive(Debug, Clone)]
pub enum Responder {
    /// A fixed text reply.
    Reply(TextReply),
    /// Page image and recitation for the captured number.
    PageMedia,
    /// Recitation only for the captured number.
    Recitation,
}

/// One entry of the rule table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub matcher: Matcher,
    pub responder: Responder,
}

impl Rule {
    pub fn reply(name: impl Into<String>, matcher: Matcher, reply: TextReply) -> Self {
        Self {
            name: name.into(),
            matcher,
            responder: Responder::Reply(reply),
        }
    }

    pub fn page_media(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: Matcher::Digits,
            responder: Responder::PageMedia,
        }
    }

    pub fn recitation(name: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: Matcher::Command {
                keyword: keyword.into(),
            },
            responder: Responder::Recitation,
        }
    }
}

/// Immutable, ordered list of rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The production table.
    pub fn standard() -> Self {
        let mut rules = vec![
            Rule::reply(
                "greeting",
                Matcher::Exact(catalogue::GREETING.to_string()),
                TextReply::plain(catalogue::GREETING_REPLY),
            ),
            Rule::reply(
                "blessing",
                Matcher::ContainsAll(
                    catalogue::BLESSING_TOKENS
                        .iter()
                        .map(|t| t.to_string())
                        .collect(),
                ),
                TextReply::plain(catalogue::BLESSING_REPLY),
            ),
            Rule::page_media("page"),
            Rule::recitation("recitation", catalogue::RECITATION_KEYWORD),
        ];

        rules.extend(catalogue::NAMED_RULES.iter().map(|(key, body)| {
            Rule::reply(
                format!("named:{key}"),
                Matcher::Exact(key.to_string()),
                TextReply::markdown(*body),
            )
        }));

        rules.push(Rule::reply(
            "help",
            Matcher::AnyOf(catalogue::HELP_KEYS.iter().map(|k| k.to_string()).collect()),
            TextReply::markdown(catalogue::help_text()),
        ));

        Self { rules }
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule that matches, with its capture. Later rules are not tried.
    pub fn first_match(&self, message: &NormalizedMessage) -> Option<(&Rule, Capture)> {
        for rule in &self.rules {
            if let Some(capture) = rule.matcher.matches(message) {
                debug!(rule = %rule.name, "Message matched rule");
                return Some((rule, capture));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> NormalizedMessage {
        NormalizedMessage::new(s)
    }

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(norm("  Help Me \n").as_str(), "help me");
        assert_eq!(norm("\tمساعدة ").as_str(), "مساعدة");
    }

    #[test]
    fn digits_accepts_leading_zeros() {
        assert!(is_all_digits("007"));
        assert_eq!(parse_digits("007"), Some(7));
    }

    #[test]
    fn digits_accepts_arabic_indic() {
        assert_eq!(parse_digits("٤٥"), Some(45));
        assert_eq!(parse_digits("۶۰۴"), Some(604));
        assert_eq!(parse_digits("4٥"), Some(45));
    }

    #[test]
    fn digits_outside_arabic_scripts_are_rejected() {
        assert_eq!(decimal_digit('५'), None);
        assert_eq!(decimal_digit('৪'), None);
        assert_eq!(decimal_digit('４'), None);
        assert!(!is_all_digits("४५"));
        assert!(!is_all_digits("４５"));
    }

    #[test]
    fn digits_rejects_mixed_and_empty() {
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("12a"));
        assert!(!is_all_digits("-5"));
        assert!(!is_all_digits("4 5"));
        assert!(!is_all_digits("+45"));
    }

    #[test]
    fn digits_overflow_is_none_but_still_digits() {
        let huge = "99999999999999999999";
        assert!(is_all_digits(huge));
        assert_eq!(parse_digits(huge), None);
        assert_eq!(
            Matcher::Digits.matches(&norm(huge)),
            Some(Capture::Number(None))
        );
    }

    #[test]
    fn exact_matcher_requires_equality() {
        let m = Matcher::Exact("السلام عليكم ورحمة الله".into());
        assert!(m.matches(&norm(" السلام عليكم ورحمة الله ")).is_some());
        assert!(m.matches(&norm("السلام عليكم")).is_none());
        assert!(m.matches(&norm("السلام عليكم ورحمة الله وبركاته")).is_none());
    }

    #[test]
    fn contains_all_is_conjunctive() {
        let m = Matcher::ContainsAll(vec!["صلوات".into(), "محمد".into(), "آل".into()]);
        assert!(m.matches(&norm("أكثروا من الصلوات على محمد وآله")).is_some());
        assert!(m.matches(&norm("آل محمد ... صلوات")).is_some());
        assert!(m.matches(&norm("صلوات على محمد")).is_none());
        assert!(m.matches(&norm("صلوات")).is_none());
        assert!(m.matches(&norm("محمد")).is_none());
    }

    #[test]
    fn command_matcher_requires_two_tokens() {
        let m = Matcher::Command {
            keyword: "ترتيل".into(),
        };
        assert_eq!(m.matches(&norm("ترتيل 45")), Some(Capture::Number(Some(45))));
        assert_eq!(m.matches(&norm("ترتيل    ٤٥")), Some(Capture::Number(Some(45))));
        assert!(m.matches(&norm("ترتيل")).is_none());
        assert!(m.matches(&norm("ترتيل 45 46")).is_none());
        assert!(m.matches(&norm("ترتيل abc")).is_none());
        assert!(m.matches(&norm("تلاوة 45")).is_none());
    }

    #[test]
    fn standard_table_order() {
        let table = RuleTable::standard();
        let names = table.names();
        assert_eq!(&names[..4], &["greeting", "blessing", "page", "recitation"]);
        assert_eq!(*names.last().unwrap(), "help");
        assert!(names[4..names.len() - 1].iter().all(|n| n.starts_with("named:")));
        assert_eq!(table.len(), 4 + catalogue::NAMED_RULES.len() + 1);
    }

    #[test]
    fn first_match_stops_at_numeric_rule() {
        let table = RuleTable::standard();
        let (rule, capture) = table.first_match(&norm("621")).unwrap();
        assert_eq!(rule.name, "page");
        assert_eq!(capture, Capture::Number(Some(621)));
    }

    #[test]
    fn numeric_rule_precedes_named_rules_even_for_numeric_keys() {
        let mut rules = RuleTable::standard().rules;
        rules.push(Rule::reply(
            "numeric-key",
            Matcher::Exact("45".into()),
            TextReply::plain("never"),
        ));
        let table = RuleTable::new(rules);
        let (rule, _) = table.first_match(&norm("45")).unwrap();
        assert_eq!(rule.name, "page");
    }

    #[test]
    fn unmatched_text_has_no_rule() {
        let table = RuleTable::standard();
        assert!(table.first_match(&norm("random chatter")).is_none());
        assert!(table.first_match(&norm("")).is_none());
    }

    #[test]
    fn empty_table_matches_nothing() {
        let table = RuleTable::new(Vec::new());
        assert!(table.is_empty());
        assert!(table.first_match(&norm("45")).is_none());
    }
}
