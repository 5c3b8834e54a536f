use super::{element_index, send_commands};
use crate::dashboard::{
    CaptureEvent, Dashboard, DashboardEvent, DashboardEventConsumer, DashboardState,
};
use crate::update::UpdateSender;

use canvas::coords::v2;
use canvas::{Color, Command, Element};
use log::warn;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "scatter_chart";
const ELEMENT_PREFIX: &str = "scatter_";

const POINT_COLOR: Color = Color {
    r: 0.97,
    g: 0.44,
    b: 0.44,
    a: 1.0,
};

/// CO₂ against cost, one point per route. Routes missing either measure
/// plot nothing; their indices stay reserved so clicks keep resolving.
pub struct ScatterChartView {
    command_tx: Sender<Vec<Command>>,
    dashboard_tx: UpdateSender<Dashboard>,
    drawn: Vec<String>,
}

impl ScatterChartView {
    pub fn new(
        command_tx: Sender<Vec<Command>>,
        dashboard_tx: &UpdateSender<Dashboard>,
    ) -> ScatterChartView {
        ScatterChartView {
            command_tx,
            dashboard_tx: dashboard_tx.clone_with_handle(NAME),
            drawn: vec![],
        }
    }

    fn element_name(index: usize) -> String {
        format!("{}{}", ELEMENT_PREFIX, index)
    }

    fn draw_all(&mut self, state: &DashboardState) {
        let mut commands: Vec<Command> = self
            .drawn
            .drain(..)
            .map(Command::Erase)
            .collect();
        for (index, route) in state.working_set.iter().enumerate() {
            let (cost, co2) = match (route.cost(), route.co2()) {
                (Some(cost), Some(co2)) => (cost, co2),
                _ => continue,
            };
            let name = Self::element_name(index);
            self.drawn.push(name.clone());
            commands.push(Command::CreateElement {
                name,
                element: Element::Point {
                    at: v2(cost, co2),
                    label: format!("{}: (${}, {}kg)", route.display_path(), cost, co2),
                    color: POINT_COLOR,
                },
            });
        }
        send_commands(NAME, &self.command_tx, commands);
    }

    fn apply_highlight(&mut self, state: &DashboardState) {
        let selected = state.selected.map(Self::element_name);
        let commands = self
            .drawn
            .iter()
            .map(|name| Command::SetEmphasis {
                name: name.clone(),
                emphasised: Some(name) == selected.as_ref(),
            })
            .collect();
        send_commands(NAME, &self.command_tx, commands);
    }
}

impl DashboardEventConsumer for ScatterChartView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn consume_dashboard_event(
        &mut self,
        state: &DashboardState,
        event: &DashboardEvent,
    ) -> CaptureEvent {
        match event {
            DashboardEvent::Init | DashboardEvent::WorkingSetChanged { .. } => self.draw_all(state),
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
