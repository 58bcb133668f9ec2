// Fuzzy name matching of free-text questions against known names.

/// How a candidate matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The whole name appears in the query.
    FullName,
    /// The last token (longer than 2 characters) of a multi-token name.
    Surname,
    /// The first token (longer than 3 characters). Only taken while nothing
    /// else is selected.
    FirstName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatch<'a> {
    pub name: &'a str,
    pub kind: MatchKind,
    /// Length of the matched text in characters; 0 for a first-name match.
    pub matched_len: usize,
}

/// Best candidate mentioned in `query`, with how it matched.
///
/// Candidates are scanned in the given order. Full-name and surname matches
/// compete on matched length (strictly longer wins, so earlier candidates
/// win ties) and always beat a first-name match.
pub fn best_match<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Option<NameMatch<'a>> {
    let query = query.to_lowercase();
    let mut best: Option<NameMatch<'a>> = None;
    let best_len = |b: &Option<NameMatch<'a>>| b.map_or(0, |m| m.matched_len);

    for candidate in candidates {
        let name = candidate.as_ref();
        let lower = name.to_lowercase();
        if lower.is_empty() {
            continue;
        }

        let len = lower.chars().count();
        if query.contains(&lower) && len > best_len(&best) {
            best = Some(NameMatch {
                name,
                kind: MatchKind::FullName,
                matched_len: len,
            });
        }

        let tokens: Vec<&str> = lower.split_whitespace().collect();
        if tokens.len() > 1 {
            let last = tokens[tokens.len() - 1];
            let len = last.chars().count();
            if len > 2 && query.contains(last) && len > best_len(&best) {
                best = Some(NameMatch {
                    name,
                    kind: MatchKind::Surname,
                    matched_len: len,
                });
            }
        }

        if let Some(first) = tokens.first() {
            if best.is_none() && first.chars().count() > 3 && query.contains(first) {
                best = Some(NameMatch {
                    name,
                    kind: MatchKind::FirstName,
                    matched_len: 0,
                });
            }
        }
    }
    best
}

/// Name of the best candidate mentioned in `query`, if any.
pub fn find_best_match<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Option<&'a str> {
    best_match(query, candidates).map(|m| m.name)
}
