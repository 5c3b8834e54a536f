use super::{element_index, send_commands};
use crate::dashboard::{
    CaptureEvent, Dashboard, DashboardEvent, DashboardEventConsumer, DashboardState,
};
use crate::duration::format_duration;
use crate::update::UpdateSender;

use canvas::coords::{BoundingBox, V2};
use canvas::{Color, Command, Element};
use log::warn;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "map";
const ELEMENT_PREFIX: &str = "map_route_";
const POLYLINE_WEIGHT: f32 = 3.0;
const FRAME_PADDING: f64 = 0.5;

/// Route polylines over the city-coordinate table. Cities without a known
/// coordinate are dropped from the geometry, so an incomplete table renders
/// a shorter line than the logical path.
pub struct MapView {
    command_tx: Sender<Vec<Command>>,
    dashboard_tx: UpdateSender<Dashboard>,
    drawn: usize,
}

impl MapView {
    pub fn new(
        command_tx: Sender<Vec<Command>>,
        dashboard_tx: &UpdateSender<Dashboard>,
    ) -> MapView {
        MapView {
            command_tx,
            dashboard_tx: dashboard_tx.clone_with_handle(NAME),
            drawn: 0,
        }
    }

    fn element_name(index: usize) -> String {
        format!("{}{}", ELEMENT_PREFIX, index)
    }

    fn draw_all(&mut self, state: &DashboardState) {
        let mut commands: Vec<Command> = (0..self.drawn)
            .map(|index| Command::Erase(Self::element_name(index)))
            .collect();
        let mut all_points = vec![];
        for (index, route) in state.working_set.iter().enumerate() {
            let points: Vec<V2<f64>> = route
                .path
                .iter()
                .filter_map(|city| state.cities.get(city))
                .collect();
            all_points.extend_from_slice(&points);
            commands.push(Command::CreateElement {
                name: Self::element_name(index),
                element: Element::Polyline {
                    points,
                    color: route_color(index),
                    weight: POLYLINE_WEIGHT,
                    popup: Some(format_duration(route.duration_h())),
                },
            });
        }
        if let Some(bounds) = BoundingBox::containing(&all_points) {
            if !bounds.is_point() {
                commands.push(Command::Frame {
                    min: bounds.min,
                    max: bounds.max,
                    padding: FRAME_PADDING,
                });
            }
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

fn route_color(index: usize) -> Color {
    if index == 0 {
        Color::new(0.0, 1.0, 1.0, 1.0)
    } else {
        Color::new(0.96, 0.62, 0.04, 1.0)
    }
}

impl DashboardEventConsumer for MapView {
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
