//! Picks the parameter set a token bag belongs to.
//!
//! Exact positional fit wins over a set with a variadic parameter, which wins
//! over a set with more positional room than needed. Ties fall back to the
//! default set.

use log::debug;

use crate::error::{Error, Result};
use crate::parameter_set::ParameterSet;
use crate::tokenize::TokenBag;

fn default_among<'s>(
    candidates: &[&'s ParameterSet],
    default_set: &str,
) -> Option<&'s ParameterSet> {
    candidates
        .iter()
        .copied()
        .find(|set| set.is_named(default_set))
}

fn chosen<'s>(set: &'s ParameterSet, reason: &str) -> Result<&'s ParameterSet> {
    debug!("Selected parameter set `{}`: {reason}", set.display_name());
    Ok(set)
}

fn by_position<'s>(
    sets: &'s [ParameterSet],
    default_set: &str,
    positional: usize,
) -> Result<&'s ParameterSet> {
    let exact: Vec<&ParameterSet> = sets
        .iter()
        .filter(|set| set.positional_count() == positional)
        .collect();

    match exact.as_slice() {
        &[only] => chosen(only, "exact positional count"),
        &[] => {
            if let Some(variadic) = sets.iter().find(|set| set.has_variadic()) {
                return chosen(variadic, "variadic parameter absorbs positionals");
            }
            let roomier: Vec<&ParameterSet> = sets
                .iter()
                .filter(|set| set.positional_count() > positional)
                .collect();
            if let &[only] = roomier.as_slice() {
                return chosen(only, "only set with more positional slots");
            }
            match default_among(&roomier, default_set) {
                Some(set) => chosen(set, "default set among sets with more positional slots"),
                None => Err(Error::no_matching_set(
                    "No set found matching position parameters.",
                )),
            }
        }
        _ => match default_among(&exact, default_set) {
            Some(set) => chosen(set, "default set among exact positional matches"),
            None => Err(Error::no_matching_set(
                "No set found matching position parameters.",
            )),
        },
    }
}

fn by_name<'s>(
    sets: &'s [ParameterSet],
    default_set: &str,
    bag: &TokenBag,
) -> Result<&'s ParameterSet> {
    let candidates: Vec<&ParameterSet> = sets
        .iter()
        .filter(|set| set.contains_all(bag.named_names()))
        .collect();

    if let &[only] = candidates.as_slice() {
        return chosen(only, "only set containing every named parameter");
    }
    if candidates.is_empty() {
        return Err(Error::no_matching_set(
            "No set found matching parameter names.",
        ));
    }

    let positional = bag.positional.len();
    if positional == 0 {
        return match default_among(&candidates, default_set) {
            Some(set) => chosen(set, "default set among sets containing the named parameters"),
            None => Err(Error::no_matching_set(
                "Multiple sets match the named parameters and none of them are the default set.",
            )),
        };
    }

    if let Some(set) = candidates
        .iter()
        .copied()
        .find(|set| set.positional_remaining(bag.named_names()) == positional)
    {
        return chosen(set, "exact count of remaining positional slots");
    }
    if let Some(set) = candidates.iter().copied().find(|set| set.has_variadic()) {
        return chosen(set, "variadic parameter absorbs positionals");
    }
    if let Some(set) = candidates
        .iter()
        .copied()
        .find(|set| set.positional_remaining(bag.named_names()) > positional)
    {
        return chosen(set, "more remaining positional slots than tokens");
    }
    Err(Error::no_matching_set(
        "No set found matching parameter names and position parameters.",
    ))
}

/// Selects exactly one of `sets` for `bag`, or explains why none fits.
pub fn select_set<'s>(
    sets: &'s [ParameterSet],
    default_set: &str,
    bag: &TokenBag,
) -> Result<&'s ParameterSet> {
    if bag.is_empty() {
        return match sets.iter().find(|set| set.is_named(default_set)) {
            Some(set) => chosen(set, "no tokens given"),
            None => Err(Error::no_matching_set("No set found matching parameters.")),
        };
    }

    if bag.named.is_empty() {
        by_position(sets, default_set, bag.positional.len())
    } else {
        by_name(sets, default_set, bag)
    }
}
