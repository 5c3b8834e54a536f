use super::{element_index, send_commands};
use crate::dashboard::{
    CaptureEvent, Dashboard, DashboardEvent, DashboardEventConsumer, DashboardState,
};
use crate::metrics::DerivedMetrics;
use crate::update::UpdateSender;

use canvas::{Color, Command, Element};
use log::warn;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "value_chart";
const CHART: &str = "value";
const SERIES: &str = "cost_per_hour";
const ELEMENT_PREFIX: &str = "value_";

const BAR_COLOR: Color = Color {
    r: 0.55,
    g: 0.36,
    b: 0.96,
    a: 1.0,
};

/// Cost-efficiency chart: one bar per route carrying that route's cost per
/// hour, placeholder bars for routes whose measures cannot produce one.
pub struct ValueChartView {
    command_tx: Sender<Vec<Command>>,
    dashboard_tx: UpdateSender<Dashboard>,
    drawn: usize,
}

impl ValueChartView {
    pub fn new(
        command_tx: Sender<Vec<Command>>,
        dashboard_tx: &UpdateSender<Dashboard>,
    ) -> ValueChartView {
        ValueChartView {
            command_tx,
            dashboard_tx: dashboard_tx.clone_with_handle(NAME),
            drawn: 0,
        }
    }

    fn element_name(index: usize) -> String {
        format!("{}{}", ELEMENT_PREFIX, index)
    }

    fn draw_all(&mut self, state: &DashboardState, metrics: Option<&DerivedMetrics>) {
        let mut commands: Vec<Command> = (0..self.drawn)
            .map(|index| Command::Erase(Self::element_name(index)))
            .collect();
        for (index, route) in state.working_set.iter().enumerate() {
            let value = metrics.and_then(|metrics| metrics.cost_per_hour.get(index).copied().flatten());
            commands.push(Command::CreateElement {
                name: Self::element_name(index),
                element: Element::Bar {
                    chart: CHART.to_string(),
                    series: SERIES.to_string(),
                    label: route.display_path(),
                    value,
                    color: BAR_COLOR,
                },
            });
        }
        self.drawn = state.working_set.len();
        send_commands(NAME, &self.command_tx, commands);
    }

    fn apply_highlight(&mut self, state: &DashboardState) {
        let commands = (0..self.drawn)
            .map(|index| Command::SetEmphasis {
                name: Self::element_name(index),
                emphasised: state.selected == Some(index),
            })
            .collect();
        send_commands(NAME, &self.command_tx, commands);
    }
}

impl DashboardEventConsumer for ValueChartView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn consume_dashboard_event(
        &mut self,
        state: &DashboardState,
        event: &DashboardEvent,
    ) -> CaptureEvent {
        match event {
            DashboardEvent::Init => self.draw_all(state, None),
            DashboardEvent::WorkingSetChanged { metrics } => self.draw_all(state, metrics.as_ref()),
            DashboardEvent::SelectionChanged => self.apply_highlight(state),
            _ => (),
        }
        CaptureEvent::No
    }

    fn consume_canvas_event(
        &mut self,
        _: &DashboardState,
        event: Arc<canvas::Event>,
    ) -> CaptureEvent {
        if let canvas::Event::ElementClicked(name) = &*event {
            if let Some(index) = element_index(name, ELEMENT_PREFIX) {
                self.dashboard_tx.update(move |dashboard| {
                    if let Err(error) = dashboard.select_route(index) {
                        warn!("Ignoring stale click: {}", error);
                    }
                });
                return CaptureEvent::Yes;
            }
        }
        CaptureEvent::No
    }
}
