//! Identity joins across independently loaded collections. Every function accepts absent
//! inputs (datasets still loading or failed) and answers with absent/empty, never an error.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::data::army::Army;
use crate::data::detachment::Detachment;
use crate::data::unit::Unit;

/// Menu order for army categories; anything unlisted sorts after these.
const CATEGORY_ORDER: [&str; 3] = ["Combat Patrol", "King of the Colloseum", "Incursion"];

/// Replace percent-encoded spaces (`%20`, any case) with literal spaces.
pub fn normalize_unit_id(id: &str) -> Cow<'_, str> {
    if !id.contains('%') {
        return Cow::Borrowed(id);
    }
    let mut out = String::with_capacity(id.len());
    let mut rest = id;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.len() >= 3 && tail.as_bytes()[1..3].eq_ignore_ascii_case(b"20") {
            out.push(' ');
            rest = &tail[3..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// First army whose id equals `id` exactly.
pub fn find_army<'a>(armies: Option<&'a [Army]>, id: &str) -> Option<&'a Army> {
    armies?.iter().find(|army| army.id == id)
}

/// First detachment named by `army.detachment`.
pub fn find_detachment<'a>(
    detachments: Option<&'a [Detachment]>,
    army: Option<&Army>,
) -> Option<&'a Detachment> {
    let army = army?;
    detachments?
        .iter()
        .find(|detachment| detachment.name == army.detachment)
}

/// Unit by exact name; `name` may carry `%20` for spaces.
pub fn find_unit<'a>(units: Option<&'a [Unit]>, name: &str) -> Option<&'a Unit> {
    let name = normalize_unit_id(name);
    units?.iter().find(|unit| unit.name == name.as_ref())
}

/// Units listed by `army`, in the unit collection's order. Unresolved names are dropped.
pub fn units_for_army<'a>(army: Option<&Army>, units: Option<&'a [Unit]>) -> Vec<&'a Unit> {
    let (Some(army), Some(units)) = (army, units) else {
        return Vec::new();
    };
    units
        .iter()
        .filter(|unit| army.includes_unit(&unit.name))
        .collect()
}

fn category_rank(category: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|known| *known == category)
        .unwrap_or(CATEGORY_ORDER.len())
}

fn compare_armies(a: &Army, b: &Army) -> Ordering {
    category_rank(&a.category)
        .cmp(&category_rank(&b.category))
        .then_with(|| a.faction.cmp(&b.faction))
        .then_with(|| a.name.cmp(&b.name))
}

/// Armies in menu order: category rank, then faction, then name.
pub fn sorted_armies(armies: Option<&[Army]>) -> Vec<&Army> {
    let mut sorted: Vec<&Army> = armies.map(|a| a.iter().collect()).unwrap_or_default();
    sorted.sort_by(|a, b| compare_armies(a, b));
    sorted
}
