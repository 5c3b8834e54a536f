use crate::color::Color;
use crate::coords::V2;

/// One named visual item owned by exactly one view.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Polyline {
        points: Vec<V2<f64>>,
        color: Color,
        weight: f32,
        popup: Option<String>,
    },
    Bar {
        chart: String,
        series: String,
        label: String,
        value: Option<f64>,
        color: Color,
    },
    Point {
        at: V2<f64>,
        label: String,
        color: Color,
    },
    Label {
        text: String,
    },
    Row {
        cells: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub element: Element,
    pub emphasised: bool,
}

/// Named elements in insertion order. Creating under an existing name
/// replaces the element in place and clears its emphasis.
#[derive(Default)]
pub struct Scene {
    entries: Vec<(String, Entry)>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene { entries: vec![] }
    }

    pub fn create(&mut self, name: String, element: Element) {
        let entry = Entry {
            element,
            emphasised: false,
        };
        match self.entries.iter_mut().find(|(other, _)| *other == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn set_emphasis(&mut self, name: &str, emphasised: bool) -> bool {
        match self.entries.iter_mut().find(|(other, _)| other == name) {
            Some((_, entry)) => {
                entry.emphasised = emphasised;
                true
            }
            None => false,
        }
    }

    pub fn erase(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(other, _)| other != name);
        self.entries.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(other, _)| other == name)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }
}
