mod comparison_chart;
mod map;
mod notices;
mod route_list;
mod scatter_chart;
mod summary;
mod value_chart;

pub use comparison_chart::ComparisonChartView;
pub use map::MapView;
pub use notices::NoticeView;
pub use route_list::RouteListView;
pub use scatter_chart::ScatterChartView;
pub use summary::SummaryView;
pub use value_chart::ValueChartView;

use crate::duration::PLACEHOLDER;

use canvas::Command;
use log::warn;
use std::sync::mpsc::Sender;

/// Resolves a clicked element name back to the route index of the view
/// that owns the prefix.
fn element_index(name: &str, prefix: &str) -> Option<usize> {
    name.strip_prefix(prefix)?.parse().ok()
}

fn quantity(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{} {}", value, unit),
        None => PLACEHOLDER.to_string(),
    }
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${}", value),
        None => PLACEHOLDER.to_string(),
    }
}

/// A view that cannot reach the canvas logs and carries on; its failure
/// must never spill into the other views' broadcasts.
fn send_commands(view: &'static str, command_tx: &Sender<Vec<Command>>, commands: Vec<Command>) {
    if command_tx.send(commands).is_err() {
        warn!("View {} could not reach the canvas", view);
    }
}
