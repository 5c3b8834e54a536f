use crate::cities::CityCoords;
use crate::route::RouteSet;

use thiserror::Error;

/// The single source of truth every view reads: the working set and the
/// index of the route highlighted across all of them, if any. Mutated only
/// by the `Dashboard` that owns it; a rebuild of the working set always
/// clears the selection.
pub struct DashboardState {
    pub working_set: RouteSet,
    pub selected: Option<usize>,
    pub cities: CityCoords,
}

impl DashboardState {
    pub fn new(cities: CityCoords) -> DashboardState {
        DashboardState {
            working_set: RouteSet::default(),
            selected: None,
            cities,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("selected index {index} outside working set of {len} routes")]
pub struct SelectionOutOfRangeError {
    pub index: usize,
    pub len: usize,
}
