/// Name matching for user-typed queries. Card names arrive with arbitrary
/// casing, punctuation and the occasional typo, so lookups go through a
/// normalized form with a fuzzy fallback.

pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            'æ' | 'Æ' => out.push_str("ae"),
            c if c.is_alphanumeric() => out.extend(c.to_lowercase()),
            _ => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
        }
    }
    out.trim_end().to_string()
}

/// Levenshtein distance over characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(prev[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}

/// How many edits a query of this length may be off by and still count as a
/// match. Short queries get no slack so "ban" does not resolve to "bat".
pub fn fuzzy_threshold(query_len: usize) -> usize {
    match query_len {
        0..=4 => 0,
        5..=8 => 1,
        9..=14 => 2,
        _ => 3,
    }
}

/// Index of the candidate closest to `query`, when close enough to be meant.
pub fn closest<I, S>(query: &str, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let threshold = fuzzy_threshold(query.chars().count());
    let mut best: Option<(usize, usize)> = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let distance = edit_distance(query, candidate.as_ref());
        if distance <= threshold && best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_punctuation() {
        assert_eq!(normalize("Jace, the Mind Sculptor"), "jace the mind sculptor");
        assert_eq!(normalize("Æther Vial"), "aether vial");
        assert_eq!(normalize("  Fire // Ice  "), "fire ice");
        assert_eq!(normalize("Lim-Dûl's Vault"), "lim dûl s vault");
    }

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("shock", "shock"), 0);
    }

    #[test]
    fn closest_respects_threshold() {
        let names = ["lightning bolt", "lightning helix", "shock"];

        assert_eq!(closest("lightning bolt", names), Some(0));
        // Too short for any slack.
        assert_eq!(closest("shok", names), None);
        assert_eq!(closest("counterspell", names), None);
    }

    #[test]
    fn closest_prefers_the_nearest_candidate() {
        let names = ["giant growth", "giant strength"];
        assert_eq!(closest("giant growt", names), Some(0));
    }
}
