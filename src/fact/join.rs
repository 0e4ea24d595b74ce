//! Full outer hash join over row positions.
//!
//! The intermediate result of the fact join plan is a list of [`JoinRow`]s,
//! each holding the position of the traveler record and of the matched row
//! in every dimension joined so far. A `None` position means "no row on that
//! side", which is how outer-join null fill is represented.
//!
//! Key semantics follow SQL equality: a key with any null component never
//! matches, on either side.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Dimension sides of the fact join plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Airport,
    Temperature,
    Migrant,
    Status,
    Visa,
    State,
    Time,
}

/// One row of the intermediate join result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinRow {
    pub traveler: Option<usize>,
    pub airport: Option<usize>,
    pub temperature: Option<usize>,
    pub migrant: Option<usize>,
    pub status: Option<usize>,
    pub visa: Option<usize>,
    pub state: Option<usize>,
    pub time: Option<usize>,
}

impl JoinRow {
    /// A row carrying only a traveler position
    #[must_use]
    pub fn anchor(traveler: usize) -> Self {
        Self {
            traveler: Some(traveler),
            ..Self::default()
        }
    }

    /// Position slot for a dimension side
    pub fn slot_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Airport => &mut self.airport,
            Side::Temperature => &mut self.temperature,
            Side::Migrant => &mut self.migrant,
            Side::Status => &mut self.status,
            Side::Visa => &mut self.visa,
            Side::State => &mut self.state,
            Side::Time => &mut self.time,
        }
    }
}

/// Full outer join of the intermediate rows against one dimension
///
/// * every intermediate row appears once per matching dimension row, or once
///   with an empty slot if nothing matches
/// * every dimension row that matched nothing appears once on its own
///
/// A dimension with more than one row per key multiplies the matching
/// intermediate rows. Callers are expected to pass dimensions that are
/// unique on the join key.
pub fn full_outer_join<'d, K, D>(
    rows: Vec<JoinRow>,
    side: Side,
    dimension: &'d [D],
    row_key: impl Fn(&JoinRow) -> Option<K>,
    dimension_key: impl Fn(&'d D) -> Option<K>,
) -> Vec<JoinRow>
where
    K: Eq + Hash,
{
    let mut index: FxHashMap<K, Vec<usize>> = FxHashMap::default();
    for (position, row) in dimension.iter().enumerate() {
        if let Some(key) = dimension_key(row) {
            index.entry(key).or_default().push(position);
        }
    }

    let mut matched = vec![false; dimension.len()];
    let mut joined = Vec::with_capacity(rows.len());

    for row in rows {
        match row_key(&row).and_then(|key| index.get(&key)) {
            Some(positions) => {
                for &position in positions {
                    matched[position] = true;
                    let mut out = row;
                    *out.slot_mut(side) = Some(position);
                    joined.push(out);
                }
            }
            None => joined.push(row),
        }
    }

    for (position, _) in matched.iter().enumerate().filter(|(_, hit)| !**hit) {
        let mut orphan = JoinRow::default();
        *orphan.slot_mut(side) = Some(position);
        joined.push(orphan);
    }

    joined
}
