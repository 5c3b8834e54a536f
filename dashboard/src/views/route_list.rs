use super::{element_index, money, quantity, send_commands};
use crate::dashboard::{
    CaptureEvent, Dashboard, DashboardEvent, DashboardEventConsumer, DashboardState,
};
use crate::duration::format_duration;
use crate::route::Route;
use crate::update::UpdateSender;

use canvas::{Command, Element};
use log::warn;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "route_list";
const ELEMENT_PREFIX: &str = "list_row_";

/// One row per route in working-set order: path, distance, cost, formatted
/// duration, emissions.
pub struct RouteListView {
    command_tx: Sender<Vec<Command>>,
    dashboard_tx: UpdateSender<Dashboard>,
    drawn: usize,
}

impl RouteListView {
    pub fn new(
        command_tx: Sender<Vec<Command>>,
        dashboard_tx: &UpdateSender<Dashboard>,
    ) -> RouteListView {
        RouteListView {
            command_tx,
            dashboard_tx: dashboard_tx.clone_with_handle(NAME),
            drawn: 0,
        }
    }

    fn element_name(index: usize) -> String {
        format!("{}{}", ELEMENT_PREFIX, index)
    }

    fn cells(route: &Route) -> Vec<String> {
        vec![
            route.display_path(),
            quantity(route.distance_km(), "km"),
            money(route.cost()),
            format_duration(route.duration_h()),
            quantity(route.co2(), "kg"),
        ]
    }

    fn draw_all(&mut self, state: &DashboardState) {
        let mut commands: Vec<Command> = (0..self.drawn)
            .map(|index| Command::Erase(Self::element_name(index)))
            .collect();
        for (index, route) in state.working_set.iter().enumerate() {
            commands.push(Command::CreateElement {
                name: Self::element_name(index),
                element: Element::Row {
                    cells: Self::cells(route),
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

impl DashboardEventConsumer for RouteListView {
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
