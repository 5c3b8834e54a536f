use super::send_commands;
use crate::dashboard::{
    CaptureEvent, Dashboard, DashboardEvent, DashboardEventConsumer, DashboardState,
};
use crate::route::Route;
use crate::update::UpdateSender;

use canvas::{Color, Command, Element};
use log::warn;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "comparison_chart";
const CHART: &str = "comparison";
const ELEMENT_PREFIX: &str = "comparison_";

const SERIES: [(&str, fn(&Route) -> Option<f64>, Color); 3] = [
    (
        "distance_km",
        Route::distance_km,
        Color {
            r: 0.23,
            g: 0.51,
            b: 0.96,
            a: 1.0,
        },
    ),
    (
        "cost",
        Route::cost,
        Color {
            r: 0.06,
            g: 0.73,
            b: 0.51,
            a: 1.0,
        },
    ),
    (
        "co2",
        Route::co2,
        Color {
            r: 0.96,
            g: 0.62,
            b: 0.04,
            a: 1.0,
        },
    ),
];

/// Grouped bars comparing distance, cost and CO₂ across the working set,
/// one bar per series per route, labeled with the joined path.
pub struct ComparisonChartView {
    command_tx: Sender<Vec<Command>>,
    dashboard_tx: UpdateSender<Dashboard>,
    drawn: usize,
}

impl ComparisonChartView {
    pub fn new(
        command_tx: Sender<Vec<Command>>,
        dashboard_tx: &UpdateSender<Dashboard>,
    ) -> ComparisonChartView {
        ComparisonChartView {
            command_tx,
            dashboard_tx: dashboard_tx.clone_with_handle(NAME),
            drawn: 0,
        }
    }

    fn element_name(series: &str, index: usize) -> String {
        format!("{}{}_{}", ELEMENT_PREFIX, series, index)
    }

    fn element_index(name: &str) -> Option<usize> {
        let (_, index) = name.strip_prefix(ELEMENT_PREFIX)?.rsplit_once('_')?;
        index.parse().ok()
    }

    fn draw_all(&mut self, state: &DashboardState) {
        let mut commands = self.erase_commands();
        for (index, route) in state.working_set.iter().enumerate() {
            for (series, measure, color) in &SERIES {
                commands.push(Command::CreateElement {
                    name: Self::element_name(series, index),
                    element: Element::Bar {
                        chart: CHART.to_string(),
                        series: series.to_string(),
                        label: route.display_path(),
                        value: measure(route),
                        color: *color,
                    },
                });
            }
        }
        self.drawn = state.working_set.len();
        send_commands(NAME, &self.command_tx, commands);
    }

    fn erase_commands(&self) -> Vec<Command> {
        (0..self.drawn)
            .flat_map(|index| {
                SERIES
                    .iter()
                    .map(move |(series, ..)| Command::Erase(Self::element_name(series, index)))
            })
            .collect()
    }

    fn apply_highlight(&mut self, state: &DashboardState) {
        let commands = (0..self.drawn)
            .flat_map(|index| {
                let emphasised = state.selected == Some(index);
                SERIES.iter().map(move |(series, ..)| Command::SetEmphasis {
                    name: Self::element_name(series, index),
                    emphasised,
                })
            })
            .collect();
        send_commands(NAME, &self.command_tx, commands);
    }
}

impl DashboardEventConsumer for ComparisonChartView {
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
            if let Some(index) = Self::element_index(name) {
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

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cities::CityCoords;
    use canvas::Canvas;
    use std::sync::mpsc::{channel, Receiver};

    fn route(path: &[&str], cost: Option<f64>) -> Route {
        Route {
            path: path.iter().map(|city| city.to_string()).collect(),
            total_distance_km: Some(100.0),
            total_cost: cost,
            total_duration_h: Some(2.0),
            total_co2: Some(15.0),
        }
    }

    fn view_and_dashboard() -> (Dashboard, Receiver<Vec<Command>>) {
        let mut dashboard = Dashboard::new(CityCoords::builtin());
        let (command_tx, command_rx) = channel();
        let view = ComparisonChartView::new(command_tx, dashboard.update_tx());
        dashboard.add_consumer(view);
        (dashboard, command_rx)
    }

    fn apply_all(canvas: &mut Canvas, command_rx: &Receiver<Vec<Command>>) {
        while let Ok(commands) = command_rx.try_recv() {
            canvas.process(commands);
        }
    }

    #[test]
    fn full_redraw_creates_three_bars_per_route() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![
            route(&["Lima", "Cusco"], Some(30.0)),
            route(&["Lima", "Puno"], Some(10.0)),
        ]);
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        assert_eq!(canvas.scene().len(), 6);
        match &canvas.scene().get("comparison_cost_1").unwrap().element {
            Element::Bar { value, label, .. } => {
                assert_eq!(*value, Some(10.0));
                assert_eq!(label, "Lima → Puno");
            }
            element => panic!("Unexpected element {:?}", element),
        }
    }

    #[test]
    fn malformed_measure_renders_placeholder_bar() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![route(&["Lima", "Cusco"], None)]);
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        match &canvas.scene().get("comparison_cost_0").unwrap().element {
            Element::Bar { value, .. } => assert_eq!(*value, None),
            element => panic!("Unexpected element {:?}", element),
        }
    }

    #[test]
    fn repeated_redraw_leaks_no_bars() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        let routes = vec![route(&["Lima", "Cusco"], Some(30.0))];
        dashboard.update_routes(routes.clone());
        dashboard.update_routes(routes);
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        assert_eq!(canvas.scene().len(), 3);
    }

    #[test]
    fn selection_emphasises_only_the_selected_routes_bars() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![
            route(&["Lima", "Cusco"], Some(30.0)),
            route(&["Lima", "Puno"], Some(10.0)),
        ]);
        dashboard.select_route(0).unwrap();
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        let emphasised: Vec<&str> = canvas
            .scene()
            .iter()
            .filter(|(_, entry)| entry.emphasised)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            emphasised,
            vec![
                "comparison_distance_km_0",
                "comparison_cost_0",
                "comparison_co2_0"
            ]
        );
    }

    #[test]
    fn click_on_any_series_bar_selects_the_route() {
        let (mut dashboard, _command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![
            route(&["Lima", "Cusco"], Some(30.0)),
            route(&["Lima", "Puno"], Some(10.0)),
        ]);
        dashboard.consume_event(DashboardEvent::CanvasEvent(Arc::new(
            canvas::Event::ElementClicked("comparison_co2_1".to_string()),
        )));
        assert!(dashboard.process_next_update());
        assert_eq!(dashboard.state().selected, Some(1));
    }
}
