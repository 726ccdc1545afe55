use std::collections::HashMap;

use crate::utils::matching;

/// One numbered section of a tournament document, e.g. `1.1 Tournament Types`.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub number: String,
    pub title: String,
    pub body: String,
}

/// Split a numbered document into sections. A header line is a section
/// number token followed by a title; everything up to the next header is the
/// section body. Preamble before the first header is dropped.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();

    let mut flush = |sections: &mut Vec<Section>, body_lines: &mut Vec<&str>| {
        if let Some(section) = sections.last_mut() {
            section.body = body_lines.join("\n").trim().to_string();
        }
        body_lines.clear();
    };

    for line in text.lines() {
        let trimmed = line.trim();
        let header = trimmed
            .split_once(' ')
            .and_then(|(token, rest)| parse_section_number(token).map(|n| (n, rest.trim())));

        match header {
            Some((number, title)) if !title.is_empty() => {
                flush(&mut sections, &mut body_lines);
                sections.push(Section {
                    number,
                    title: title.to_string(),
                    body: String::new(),
                });
            }
            _ => body_lines.push(trimmed),
        }
    }
    flush(&mut sections, &mut body_lines);

    sections
}

fn parse_section_number(token: &str) -> Option<String> {
    let trimmed = token.trim_end_matches('.');
    if trimmed.is_empty() || token == trimmed {
        // Headers write their number with a trailing dot (`1.` / `1.1.`) or
        // as a dotted pair (`1.1`); a bare integer is list prose.
        if !trimmed.contains('.') {
            return None;
        }
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    if parts
        .iter()
        .any(|part| part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    Some(trimmed.to_string())
}

/// Number- and title-addressable collection of sections.
pub struct SectionIndex {
    sections: Vec<Section>,
    by_number: HashMap<String, usize>,
}

impl SectionIndex {
    pub fn empty() -> Self {
        SectionIndex {
            sections: Vec::new(),
            by_number: HashMap::new(),
        }
    }

    pub fn new(sections: Vec<Section>) -> Self {
        let by_number = sections
            .iter()
            .enumerate()
            .map(|(index, section)| (section.number.clone(), index))
            .collect();

        SectionIndex {
            sections,
            by_number,
        }
    }

    pub fn get(&self, number: &str) -> Option<&Section> {
        let canonical = number.trim().trim_end_matches('.');
        self.by_number
            .get(canonical)
            .map(|&index| &self.sections[index])
    }

    /// Section number first, then (partial) title match.
    pub fn search(&self, query: &str) -> Option<&Section> {
        if let Some(section) = self.get(query) {
            return Some(section);
        }

        let needle = matching::normalize(query);
        if needle.is_empty() {
            return None;
        }
        self.sections
            .iter()
            .find(|section| matching::normalize(&section.title) == needle)
            .or_else(|| {
                self.sections
                    .iter()
                    .find(|section| matching::normalize(&section.title).contains(&needle))
            })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
Magic: The Gathering Tournament Rules

Introduction prose that precedes any numbered content.

1. Tournament Fundamentals

1.1 Tournament Types

Sanctioned Magic tournaments fall into one of two categories.
Each category has its own expectations.

1.2 Publishing Tournament Information

Organizers must publish the information below.

2. Tournament Mechanics

2.1 Match Structure

A match consists of a series of games.
";

    #[test]
    fn splits_headers_and_bodies() {
        let sections = parse_sections(FIXTURE);
        assert_eq!(sections.len(), 5);

        let types = &sections[1];
        assert_eq!(types.number, "1.1");
        assert_eq!(types.title, "Tournament Types");
        assert!(types.body.starts_with("Sanctioned Magic tournaments"));
        assert!(types.body.ends_with("its own expectations."));
    }

    #[test]
    fn preamble_is_dropped() {
        let sections = parse_sections(FIXTURE);
        assert_eq!(sections[0].number, "1");
        assert!(!sections[0].body.contains("Introduction prose"));
    }

    #[test]
    fn section_number_token_shapes() {
        assert_eq!(parse_section_number("1.").as_deref(), Some("1"));
        assert_eq!(parse_section_number("1.1").as_deref(), Some("1.1"));
        assert_eq!(parse_section_number("10.2.").as_deref(), Some("10.2"));
        assert_eq!(parse_section_number("1"), None);
        assert_eq!(parse_section_number("1.1.1.1"), None);
        assert_eq!(parse_section_number("A."), None);
    }

    #[test]
    fn index_finds_by_number_and_title() {
        let index = SectionIndex::new(parse_sections(FIXTURE));

        assert_eq!(index.get("2.1").unwrap().title, "Match Structure");
        assert_eq!(index.get("2.1.").unwrap().number, "2.1");
        assert_eq!(index.search("match structure").unwrap().number, "2.1");
        assert_eq!(index.search("publishing").unwrap().number, "1.2");
        assert!(index.search("sideboard").is_none());
    }

    #[test]
    fn empty_index_answers_empty() {
        let index = SectionIndex::empty();
        assert!(index.is_empty());
        assert!(index.search("1.1").is_none());
    }
}
