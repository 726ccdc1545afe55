use std::collections::HashMap;

use anyhow::{Context as _, Result};
use tracing::info;

pub const COMPREHENSIVE_RULES_URL: &str =
    "https://media.wizards.com/downloads/MagicCompRules.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Canonical number without a trailing dot, e.g. `601`, `601.2`, `601.2a`.
    pub number: String,
    pub text: String,
}

/// Numbered paragraphs of the comprehensive rules document.
pub struct ComprehensiveRules {
    rules: Vec<Rule>,
    by_number: HashMap<String, usize>,
}

impl ComprehensiveRules {
    pub fn new() -> Self {
        ComprehensiveRules {
            rules: Vec::new(),
            by_number: HashMap::new(),
        }
    }

    pub async fn load(&mut self, http: &reqwest::Client) -> Result<()> {
        let body = http
            .get(COMPREHENSIVE_RULES_URL)
            .send()
            .await
            .context("comprehensive rules request failed")?
            .error_for_status()?
            .text()
            .await?;

        let rules = Self::parse(&body);
        if rules.is_empty() {
            anyhow::bail!("no rule paragraphs found in comprehensive rules document");
        }
        info!("Loaded {} comprehensive rule paragraphs", rules.len());
        self.install(rules);
        Ok(())
    }

    /// Pull every `NNN.Nx` paragraph out of the document. The glossary and
    /// credits at the end are left to the definitions registry.
    pub fn parse(text: &str) -> Vec<Rule> {
        let body = match text.rfind("\nGlossary") {
            Some(position) => &text[..position],
            None => text,
        };

        let mut rules: Vec<Rule> = Vec::new();
        let mut by_number: HashMap<String, usize> = HashMap::new();
        let mut current: Option<usize> = None;

        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                current = None;
                continue;
            }

            let parsed = line
                .split_once(' ')
                .and_then(|(token, rest)| parse_rule_number(token).map(|n| (n, rest)));

            match parsed {
                Some((number, rest)) => {
                    let rule = Rule {
                        number: number.clone(),
                        text: rest.trim().to_string(),
                    };
                    match by_number.get(&number) {
                        // The table of contents repeats section headers;
                        // the body version wins.
                        Some(&index) => {
                            rules[index] = rule;
                            current = Some(index);
                        }
                        None => {
                            by_number.insert(number, rules.len());
                            current = Some(rules.len());
                            rules.push(rule);
                        }
                    }
                }
                None => {
                    // Wrapped continuation of the paragraph above.
                    if let Some(index) = current {
                        let rule = &mut rules[index];
                        rule.text.push(' ');
                        rule.text.push_str(line);
                    }
                }
            }
        }

        rules
    }

    pub fn install(&mut self, rules: Vec<Rule>) {
        let by_number = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (rule.number.clone(), index))
            .collect();

        self.rules = rules;
        self.by_number = by_number;
    }

    pub fn get(&self, number: &str) -> Option<&Rule> {
        let canonical = number.trim().trim_end_matches('.');
        self.by_number
            .get(canonical)
            .map(|&index| &self.rules[index])
    }

    /// Direct sub-rules of a paragraph: `601.2` yields `601.2a`, `601.2b`, …
    pub fn children(&self, number: &str) -> Vec<&Rule> {
        let canonical = number.trim().trim_end_matches('.');
        self.rules
            .iter()
            .filter(|rule| {
                rule.number.len() > canonical.len()
                    && rule.number.starts_with(canonical)
                    && is_direct_child(canonical, &rule.number)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Accepts `1.`, `100.`, `100.1.`, `100.1a` style tokens; returns the number
/// without the trailing dot.
fn parse_rule_number(token: &str) -> Option<String> {
    let trimmed = token.trim_end_matches('.');
    if trimmed.is_empty() || !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut parts = trimmed.split('.');
    let major = parts.next()?;
    if !major.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Some(minor) = parts.next() {
        if parts.next().is_some() {
            return None;
        }
        let digits = minor.trim_end_matches(|c: char| c.is_ascii_lowercase());
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        // At most one trailing letter, as in `601.2a`.
        if minor.len() - digits.len() > 1 {
            return None;
        }
    } else if !token.ends_with('.') {
        // A bare number with no dot at all is prose, not a rule reference.
        return None;
    }

    Some(trimmed.to_string())
}

fn is_direct_child(parent: &str, child: &str) -> bool {
    let suffix = &child[parent.len()..];
    if parent.contains('.') {
        // 601.2 -> 601.2a
        suffix.chars().all(|c| c.is_ascii_lowercase()) && !suffix.is_empty()
    } else {
        // 601 -> 601.2
        suffix.starts_with('.') && suffix[1..].chars().all(|c| c.is_ascii_digit())
    }
}
