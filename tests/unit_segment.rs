// tests/unit_segment.rs
use ontorank_core::segment::{segment, uniq, Segmenter};
use std::collections::HashSet;

fn set(terms: &[&str]) -> HashSet<String> {
    terms.iter().map(|t| (*t).to_string()).collect()
}

#[test]
fn test_longest_match_wins() {
    let out = segment("abcab", &["abc", "ab", "a", "b", "c"], &[], &[]);
    assert_eq!(out, ["abc", "ab"]);
}

#[test]
fn test_unmatched_characters_are_skipped() {
    let out = segment("xxabyy", &["ab"], &[], &[]);
    assert_eq!(out, ["ab"]);
    assert!(segment("zzz", &["ab"], &[], &[]).is_empty());
    assert!(segment("", &["ab"], &[], &[]).is_empty());
}

#[test]
fn test_empty_vocabulary_yields_nothing() {
    let vocab: [&str; 0] = [];
    assert!(segment("anything", &vocab, &vocab, &[]).is_empty());
}

#[test]
fn test_stopwords_consumed_not_emitted() {
    let vocab = [
        "agoo", "uboo", "boo", "goo", "oo", "aboo", "ugoo", "abebe",
    ];
    let out = segment(
        "agooooboouboogooobebeagooooabebebooobebeuboogooabebeooooagooaboougooabebeagoo",
        &vocab,
        &["abebe", "obebe"],
        &[],
    );
    let expected: Vec<&str> = "agoo,oo,boo,uboo,goo,agoo,oo,boo,uboo,goo,oo,oo,agoo,aboo,ugoo,agoo"
        .split(',')
        .collect();
    assert_eq!(out, expected);
    assert!(!out.iter().any(|t| t == "abebe"), "Stopword must not be emitted");
}

#[test]
fn test_priority_list_beats_length() {
    let out = segment("abc", &["abc", "ab", "a", "b", "c"], &[], &[set(&["a"])]);
    assert_eq!(out, ["a", "b", "c"]);
}

#[test]
fn test_earlier_priority_list_takes_precedence() {
    let first = set(&["ab"]);
    let second = set(&["a"]);
    let out = segment("ab", &["a", "ab", "b"], &[], &[first.clone(), second.clone()]);
    assert_eq!(out, ["ab"]);
    let out = segment("ab", &["a", "ab", "b"], &[], &[second, first]);
    assert_eq!(out, ["a", "b"]);
}

#[test]
fn test_layered_preferences() {
    let prepared_a = ["a", "b", "c", "d", "cd", "e", "f", "ef", "ghi"];
    let prepared_b = ["a", "b", "ab", "c", "d", "e", "f", "ef", "g", "h", "i", "gh"];
    let vocab: Vec<&str> = prepared_a.iter().chain(prepared_b.iter()).copied().collect();
    let prefer: HashSet<String> = set(&prepared_a)
        .intersection(&set(&prepared_b))
        .cloned()
        .collect();

    let out = segment(
        "axbxabcdxcxdxefeefaxabaxcdcxghi",
        &vocab,
        &[],
        &[prefer, set(&prepared_b)],
    );
    let expected: Vec<&str> = "a,b,a,b,c,d,c,d,ef,e,ef,a,a,b,a,c,d,c,gh,i"
        .split(',')
        .collect();
    assert_eq!(out, expected);
}

#[test]
fn test_multibyte_terms() {
    let out = segment("売買契約の解除", &["売買", "売買契約", "解除"], &["の"], &[]);
    assert_eq!(out, ["売買契約", "解除"]);
}

#[test]
fn test_find_terms_concatenates_sentences() {
    let s = Segmenter::new(&["ab", "c"], &[], &[]);
    assert_eq!(s.find_terms(&["abx", "cab"]), ["ab", "c", "ab"]);
}

#[test]
fn test_uniq_keeps_first_occurrence() {
    assert_eq!(uniq(&["b", "a", "b", "c", "a"]), ["b", "a", "c"]);
}
