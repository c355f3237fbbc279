use crate::types::entry::{AnyEntry, TierKind};
use thiserror::Error;

fn join_entries(entries: &[AnyEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum TextgridError {
    #[error("Couldn't create tier: {0}")]
    TierCreation(String),

    #[error("Tier name '{0}' already exists in textgrid")]
    TierExists(String),

    #[error("Tier name '{0}' does not exist in textgrid")]
    TierNotFound(String),

    #[error(
        "Attempted to insert {entry} into tier '{tier_name}' of textgrid but overlapping entries {} already exist.",
        join_entries(.matches)
    )]
    EntryCollision {
        tier_name: String,
        entry: AnyEntry,
        matches: Vec<AnyEntry>,
    },

    #[error(
        "Attempted to change {old} to {new} in tier '{tier_name}' however, this exceeds the bounds ({min},{max})."
    )]
    Overshoot {
        tier_name: String,
        old: AnyEntry,
        new: AnyEntry,
        min: f64,
        max: f64,
    },

    #[error("Entry {entry} does not exist in tier '{tier_name}'")]
    EntryNotFound { tier_name: String, entry: AnyEntry },

    #[error("Expected value '{value}' to be one value in [{}].", .expected.join(","))]
    InvalidArgument {
        value: String,
        expected: &'static [&'static str],
    },

    #[error("Tier types must match when appending tiers.")]
    NonMatchingTiers,

    #[error("Tier '{tier_name}' is not {}", .expected.article_name())]
    UnexpectedTierKind { tier_name: String, expected: TierKind },

    #[error("Tier '{tier_name}': {message}")]
    OutOfRange { tier_name: String, message: String },

    #[error("Invalid search pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}
