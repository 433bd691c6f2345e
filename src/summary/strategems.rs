//! Strategem list for an army: detachment strategems, then core strategems minus the army's
//! ignore-list, then an optional turn filter.

use serde::Serialize;

use crate::data::army::Army;
use crate::data::detachment::Detachment;
use crate::data::strategem::{Strategem, Turn};

/// Detachment strategems come first and are never filtered by the ignore-list.
/// With a `filter`, a strategem is kept if its turn equals the filter or is `Either`.
pub fn army_strategems<'a>(
    army: Option<&Army>,
    detachment: Option<&'a Detachment>,
    core: Option<&'a [Strategem]>,
    filter: Option<Turn>,
) -> Vec<&'a Strategem> {
    let detachment_strats = detachment.map(|d| d.strategems.as_slice()).unwrap_or(&[]);
    let core_strats = core
        .unwrap_or(&[])
        .iter()
        .filter(|strat| !army.map_or(false, |a| a.ignores_strategem(&strat.name)));

    detachment_strats
        .iter()
        .chain(core_strats)
        .filter(|strat| applies_to_turn(strat, filter))
        .collect()
}

fn applies_to_turn(strategem: &Strategem, filter: Option<Turn>) -> bool {
    match filter {
        None => true,
        Some(turn) => strategem.turn == turn || strategem.turn == Turn::Either,
    }
}

/// Strategems grouped by their turn tag, for display.
#[derive(Debug, Default, Serialize)]
pub struct TurnGroups<'a> {
    pub your: Vec<&'a Strategem>,
    pub opponent: Vec<&'a Strategem>,
    pub either: Vec<&'a Strategem>,
    pub unspecified: Vec<&'a Strategem>,
}

pub fn group_by_turn<'a>(strategems: &[&'a Strategem]) -> TurnGroups<'a> {
    let mut groups = TurnGroups::default();
    for strat in strategems.iter().copied() {
        match strat.turn {
            Turn::Your => groups.your.push(strat),
            Turn::Opponent => groups.opponent.push(strat),
            Turn::Either => groups.either.push(strat),
            Turn::Unspecified => groups.unspecified.push(strat),
        }
    }
    groups
}
