// src/segment.rs
//! Greedy maximal-munch segmentation of raw text into vocabulary terms.
//!
//! Candidates are bucketed by first character and tried longest first,
//! unless a priority list moves them forward. Characters no candidate
//! covers are skipped without output. Greedy, not globally optimal.

use std::collections::{HashMap, HashSet};

/// Reusable segmenter over a fixed vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    buckets: HashMap<char, Vec<String>>,
    stopwords: HashSet<String>,
}

impl Segmenter {
    /// Builds the first-character buckets.
    ///
    /// `priority_lists` earlier in the slice take precedence over later ones.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        vocabulary: &[S],
        stopwords: &[S],
        priority_lists: &[HashSet<String>],
    ) -> Self {
        let mut buckets: HashMap<char, Vec<String>> = HashMap::new();
        let unique: HashSet<&str> = vocabulary.iter().map(|s| s.as_ref()).collect();
        for term in unique {
            if let Some(first) = term.chars().next() {
                buckets.entry(first).or_default().push(term.to_string());
            }
        }

        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| {
                b.chars()
                    .count()
                    .cmp(&a.chars().count())
                    .then_with(|| a.cmp(b))
            });
            for preference in priority_lists.iter().rev() {
                promote(bucket, preference);
            }
        }

        Self {
            buckets,
            stopwords: stopwords.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Candidates for `first`, in match order.
    #[must_use]
    pub fn bucket(&self, first: char) -> &[String] {
        self.buckets.get(&first).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Splits `sequence` into known terms, dropping stopwords and unmatched characters.
    #[must_use]
    pub fn segment(&self, sequence: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut rest = sequence;

        while let Some(first) = rest.chars().next() {
            match self.longest_match(first, rest) {
                Some(term) => {
                    if !self.stopwords.contains(term) {
                        tokens.push(term.to_string());
                    }
                    rest = &rest[term.len()..];
                }
                None => rest = &rest[first.len_utf8()..],
            }
        }

        tokens
    }

    fn longest_match(&self, first: char, rest: &str) -> Option<&str> {
        self.bucket(first)
            .iter()
            .find(|candidate| rest.starts_with(candidate.as_str()))
            .map(String::as_str)
    }

    /// Segments several sentences and concatenates the tokens.
    #[must_use]
    pub fn find_terms<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        sentences
            .iter()
            .flat_map(|s| self.segment(s.as_ref()))
            .collect()
    }
}

/// Moves bucket terms found in `preference` to the front, keeping relative order.
fn promote(bucket: &mut Vec<String>, preference: &HashSet<String>) {
    let (mut front, back): (Vec<String>, Vec<String>) =
        bucket.drain(..).partition(|t| preference.contains(t));
    front.extend(back);
    *bucket = front;
}

/// One-shot segmentation.
#[must_use]
pub fn segment<S: AsRef<str>>(
    sequence: &str,
    vocabulary: &[S],
    stopwords: &[S],
    priority_lists: &[HashSet<String>],
) -> Vec<String> {
    Segmenter::new(vocabulary, stopwords, priority_lists).segment(sequence)
}

/// Drops repeated terms, keeping the first occurrence.
#[must_use]
pub fn uniq<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();
    for term in terms {
        let term: &str = term.as_ref();
        if seen.insert(term) {
            unique.push(term.to_string());
        }
    }
    unique
}

/// Reads a comma and newline separated term list.
#[must_use]
pub fn parse_term_list(content: &str) -> Vec<String> {
    content
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
