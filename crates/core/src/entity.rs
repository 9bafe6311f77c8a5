//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Identifiers that occur more than once, in order of their second occurrence.
///
/// Each duplicated id is reported once, however many times it repeats.
pub fn duplicate_ids<'a, E, I>(items: I) -> Vec<E::Id>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut seen: HashSet<&E::Id> = HashSet::new();
    let mut reported: HashSet<&E::Id> = HashSet::new();
    let mut dups = Vec::new();

    for item in items {
        let id = item.id();
        if !seen.insert(id) && reported.insert(id) {
            dups.push(id.clone());
        }
    }

    dups
}
