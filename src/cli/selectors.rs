//! Item selection capability used by the sell and purchase flows.
//!
//! The engine only needs a confirmed item name or a cancellation signal; how
//! candidates are rendered and narrowed is a front-end concern. The trait
//! here is the seam, with a dialoguer-backed interactive implementation and
//! a fixed one for tests and scripted callers.

use dialoguer::{theme::ColorfulTheme, FuzzySelect};

use crate::errors::CliError;

/// Outcome of a selection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    Cancelled,
}

/// Contract for resolving one item name out of a candidate set.
pub trait ItemSelector {
    /// Renders `candidates`, collects input, and returns the confirmed name
    /// or [`Selection::Cancelled`] when the user aborts. An empty candidate
    /// set always cancels.
    fn select(&mut self, candidates: &[String]) -> Result<Selection, CliError>;
}

/// Interactive selector with live fuzzy filtering over the candidate list.
#[derive(Default)]
pub struct FuzzyItemSelector;

impl ItemSelector for FuzzyItemSelector {
    fn select(&mut self, candidates: &[String]) -> Result<Selection, CliError> {
        if candidates.is_empty() {
            return Ok(Selection::Cancelled);
        }
        let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select item (Esc to cancel)")
            .items(candidates)
            .default(0)
            .interact_opt()
            .map_err(|err| CliError::Input(err.to_string()))?;
        Ok(match choice {
            Some(index) => Selection::Chosen(candidates[index].clone()),
            None => Selection::Cancelled,
        })
    }
}

/// Pre-decided selection for non-interactive callers and tests.
pub struct FixedSelector(pub Selection);

impl ItemSelector for FixedSelector {
    fn select(&mut self, _candidates: &[String]) -> Result<Selection, CliError> {
        Ok(self.0.clone())
    }
}

/// Narrows `candidates` against a partial input: case-insensitive prefix
/// matches first (in candidate order), then near matches ranked by
/// Jaro-Winkler similarity. An empty partial keeps the full list.
pub fn filter_candidates(candidates: &[String], partial: &str) -> Vec<String> {
    let partial = partial.trim().to_lowercase();
    if partial.is_empty() {
        return candidates.to_vec();
    }

    let mut prefixed = Vec::new();
    let mut near: Vec<(f64, &String)> = Vec::new();
    for candidate in candidates {
        let lowered = candidate.to_lowercase();
        if lowered.starts_with(&partial) {
            prefixed.push(candidate.clone());
        } else {
            let score = strsim::jaro_winkler(&lowered, &partial);
            if score >= 0.8 {
                near.push((score, candidate));
            }
        }
    }
    near.sort_by(|a, b| b.0.total_cmp(&a.0));
    prefixed.extend(near.into_iter().map(|(_, candidate)| candidate.clone()));
    prefixed
}
