use crate::route::{Route, RouteSet};

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("cannot derive metrics from an empty route set")]
pub struct EmptySetError;

/// Summary statistics over the working set. Recomputed on every rebuild,
/// aligned by index with the set, never stored alongside the selection.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedMetrics {
    pub cheapest: Route,
    pub fastest: Route,
    pub cost_per_hour: Vec<Option<f64>>,
}

pub fn compute_metrics(working_set: &RouteSet) -> Result<DerivedMetrics, EmptySetError> {
    if working_set.is_empty() {
        return Err(EmptySetError);
    }
    Ok(DerivedMetrics {
        cheapest: min_by_measure(working_set, Route::cost).clone(),
        fastest: min_by_measure(working_set, Route::duration_h).clone(),
        cost_per_hour: working_set.iter().map(cost_per_hour).collect(),
    })
}

/// Stable left-to-right fold: the earliest route wins ties, and a route
/// with an absent measure never beats one with a finite measure.
fn min_by_measure(working_set: &RouteSet, measure: fn(&Route) -> Option<f64>) -> &Route {
    working_set
        .iter()
        .fold(None, |best: Option<&Route>, candidate| match best {
            Some(best) if measure_or_infinite(best, measure) <= measure_or_infinite(candidate, measure) => {
                Some(best)
            }
            _ => Some(candidate),
        })
        .unwrap()
}

fn measure_or_infinite(route: &Route, measure: fn(&Route) -> Option<f64>) -> f64 {
    measure(route).unwrap_or(f64::INFINITY)
}

/// Cost per hour for one route. A non-positive duration is unusable as a
/// divisor and the cost alone is shown instead; that fallback is part of
/// the contract. Routes missing either measure get no value at all.
pub fn cost_per_hour(route: &Route) -> Option<f64> {
    let cost = route.cost()?;
    match route.duration_h() {
        Some(duration) if duration > 0.0 => Some(round2(cost / duration)),
        Some(_) => Some(round2(cost)),
        None => None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
