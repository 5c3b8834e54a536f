use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Joins path identities; not a valid character inside a city identifier.
const KEY_SEPARATOR: &str = "→";

/// One candidate route as returned by the search server. Numeric measures
/// are optional: the server may omit them and the dashboard must still
/// render the route, showing placeholders for whatever is missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub total_distance_km: Option<f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub total_duration_h: Option<f64>,
    #[serde(default)]
    pub total_co2: Option<f64>,
}

impl Route {
    /// Identity: two routes over the same path are the same route,
    /// whatever their measures say.
    pub fn key(&self) -> String {
        self.path.join(KEY_SEPARATOR)
    }

    pub fn display_path(&self) -> String {
        self.path.join(" → ")
    }

    pub fn distance_km(&self) -> Option<f64> {
        finite(self.total_distance_km)
    }

    pub fn cost(&self) -> Option<f64> {
        finite(self.total_cost)
    }

    pub fn duration_h(&self) -> Option<f64> {
        finite(self.total_duration_h)
    }

    pub fn co2(&self) -> Option<f64> {
        finite(self.total_co2)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

/// The working set: ordered, unique by identity key, insertion order
/// preserved from the first occurrence in the input. Rebuilt whole on every
/// server response, never mutated in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    pub fn normalize(raw: Vec<Route>) -> RouteSet {
        let mut seen = HashSet::new();
        let mut routes = vec![];
        for route in raw {
            if seen.insert(route.key()) {
                routes.push(route);
            }
        }
        RouteSet { routes }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use hamcrest::prelude::*;

    pub fn route(path: &[&str], cost: f64) -> Route {
        Route {
            path: path.iter().map(|city| city.to_string()).collect(),
            total_distance_km: Some(100.0),
            total_cost: Some(cost),
            total_duration_h: Some(2.0),
            total_co2: Some(15.0),
        }
    }

    #[test]
    fn normalize_empty_input_is_empty_set() {
        assert_that!(RouteSet::normalize(vec![]).len(), is(equal_to(0)));
    }

    #[test]
    fn normalize_drops_exact_duplicate() {
        let r = route(&["Lima", "Cusco"], 30.0);
        let set = RouteSet::normalize(vec![r.clone(), r.clone()]);
        assert_that!(set.len(), is(equal_to(1)));
        assert_that!(set.get(0), is(equal_to(Some(&r))));
    }

    #[test]
    fn normalize_first_occurrence_wins_whatever_the_measures() {
        let first = route(&["Lima", "Cusco"], 30.0);
        let second = route(&["Lima", "Cusco"], 99.0);
        let set = RouteSet::normalize(vec![first.clone(), second]);
        assert_that!(set.len(), is(equal_to(1)));
        assert_that!(set.get(0).unwrap().total_cost, is(equal_to(Some(30.0))));
    }

    #[test]
    fn normalize_preserves_first_occurrence_order() {
        let a = route(&["Lima", "Cusco"], 1.0);
        let b = route(&["Lima", "Puno", "Cusco"], 2.0);
        let c = route(&["Lima", "Arequipa"], 3.0);
        let set = RouteSet::normalize(vec![a.clone(), b.clone(), a.clone(), c.clone(), b.clone()]);
        let keys: Vec<String> = set.iter().map(|route| route.key()).collect();
        assert_that!(
            keys,
            is(equal_to(vec![a.key(), b.key(), c.key()]))
        );
    }

    #[test]
    fn normalize_output_has_no_duplicate_keys() {
        let routes = vec![
            route(&["Lima", "Cusco"], 1.0),
            route(&["Lima", "Cusco"], 2.0),
            route(&["Cusco", "Lima"], 3.0),
            route(&["Lima", "Cusco"], 4.0),
        ];
        let set = RouteSet::normalize(routes);
        let keys: Vec<String> = set.iter().map(|route| route.key()).collect();
        let unique: HashSet<String> = keys.iter().cloned().collect();
        assert_that!(keys.len(), is(equal_to(unique.len())));
        assert_that!(set.len(), is(equal_to(2)));
    }

    #[test]
    fn key_distinguishes_direction() {
        assert_ne!(
            route(&["Lima", "Cusco"], 1.0).key(),
            route(&["Cusco", "Lima"], 1.0).key()
        );
    }

    #[test]
    fn non_finite_measures_read_as_absent() {
        let mut r = route(&["Lima", "Cusco"], 1.0);
        r.total_cost = Some(f64::NAN);
        r.total_duration_h = None;
        assert_eq!(r.cost(), None);
        assert_eq!(r.duration_h(), None);
        assert_eq!(r.distance_km(), Some(100.0));
    }
}
