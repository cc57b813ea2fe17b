use std::fmt;

/// Characters that separate a filter keyword from its value.
const RELATIONS: [char; 5] = ['=', '~', '<', '>', ':'];

/// A single whitespace-separated term of a GMP filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterTerm {
    raw: String,
    keyword: Option<String>,
}

impl FilterTerm {
    fn parse(raw: String) -> Self {
        let keyword = raw
            .find(RELATIONS)
            .filter(|&index| index > 0)
            .map(|index| raw[..index].to_string())
            .filter(|keyword| {
                keyword
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            });
        Self { raw, keyword }
    }

    fn value(&self) -> Option<&str> {
        self.keyword
            .as_ref()
            .map(|keyword| &self.raw[keyword.len() + 1..])
    }
}

/// Sort direction for one sort term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    fn keyword(&self) -> &'static str {
        if self.descending {
            "sort-reverse"
        } else {
            "sort"
        }
    }
}

/// Parsed GMP filter string.
///
/// Keeps the user's terms in order and only rewrites the control keywords
/// (`first`, `rows`, `sort`, `sort-reverse`) the gateway owns. Double-quoted
/// values may contain whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterString {
    terms: Vec<FilterTerm>,
}

impl FilterString {
    pub fn parse(input: &str) -> Self {
        let mut terms = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in input.chars() {
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    current.push(c);
                }
                c if c.is_whitespace() && !in_quotes => {
                    if !current.is_empty() {
                        terms.push(FilterTerm::parse(std::mem::take(&mut current)));
                    }
                }
                c => current.push(c),
            }
        }
        if !current.is_empty() {
            terms.push(FilterTerm::parse(current));
        }

        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn value_of(&self, keyword: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|term| term.keyword.as_deref() == Some(keyword))
            .and_then(FilterTerm::value)
    }

    pub fn remove_keyword(&mut self, keyword: &str) {
        self.terms
            .retain(|term| term.keyword.as_deref() != Some(keyword));
    }

    /// Replaces any existing term for `keyword` with `keyword=value`.
    pub fn set_keyword(&mut self, keyword: &str, value: impl fmt::Display) {
        self.remove_keyword(keyword);
        self.terms
            .push(FilterTerm::parse(format!("{}={}", keyword, value)));
    }

    pub fn sort_orders(&self) -> Vec<SortOrder> {
        self.terms
            .iter()
            .filter_map(|term| match (term.keyword.as_deref(), term.value()) {
                (Some("sort"), Some(field)) => Some(SortOrder::ascending(field)),
                (Some("sort-reverse"), Some(field)) => Some(SortOrder::descending(field)),
                _ => None,
            })
            .collect()
    }

    pub fn set_sort_orders(&mut self, orders: &[SortOrder]) {
        self.remove_keyword("sort");
        self.remove_keyword("sort-reverse");
        for order in orders {
            self.terms.push(FilterTerm::parse(format!(
                "{}={}",
                order.keyword(),
                order.field
            )));
        }
    }

    /// Flips every sort term; sorts descending by name when none is set.
    pub fn reverse_sort_orders(&mut self) {
        let orders = self.sort_orders();
        let reversed: Vec<SortOrder> = if orders.is_empty() {
            vec![SortOrder::descending("name")]
        } else {
            orders
                .into_iter()
                .map(|order| SortOrder {
                    field: order.field,
                    descending: !order.descending,
                })
                .collect()
        };
        self.set_sort_orders(&reversed);
    }
}

impl fmt::Display for FilterString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .terms
            .iter()
            .map(|term| term.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", joined)
    }
}
