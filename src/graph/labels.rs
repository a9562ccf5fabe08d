// src/graph/labels.rs
//! Relation label taxonomy used by the expansion rules.

/// Hypernym (is-a) links.
pub const HYPER_PROPS: &[&str] = &["hyper", "hyperx"];

/// Semantic-frame slot links.
pub const FRAME_PROPS: &[&str] = &["sbj", "obj", "attr_slot"];

/// Frame slots plus the other slot-like relations.
pub const SLOT_PROPS: &[&str] = &[
    "sbj",
    "obj",
    "attr_slot",
    "antecedent_to",
    "auth",
    "auth_by",
    "within",
];

/// Every label the expansion rules look at.
pub const ALL_PROPS: &[&str] = &[
    "sbj",
    "obj",
    "attr_slot",
    "antecedent_to",
    "auth",
    "auth_by",
    "within",
    "hyper",
    "hyperx",
];

pub const ATTR_SLOT: &[&str] = &["attr_slot"];
