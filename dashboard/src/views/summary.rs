use super::{money, quantity, send_commands};
use crate::dashboard::{CaptureEvent, DashboardEvent, DashboardEventConsumer, DashboardState};
use crate::duration::PLACEHOLDER;
use crate::metrics::DerivedMetrics;

use canvas::{Command, Element};
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "summary";

/// Headline statistics: cheapest path and its cost and emissions, fastest
/// path. Replaces its labels in place, so there is nothing to tear down;
/// an empty working set shows a neutral placeholder for every figure.
pub struct SummaryView {
    command_tx: Sender<Vec<Command>>,
}

impl SummaryView {
    pub fn new(command_tx: Sender<Vec<Command>>) -> SummaryView {
        SummaryView { command_tx }
    }

    fn draw(&mut self, metrics: Option<&DerivedMetrics>) {
        let (cheapest, fastest, cost, co2) = match metrics {
            Some(metrics) => (
                metrics.cheapest.display_path(),
                metrics.fastest.display_path(),
                money(metrics.cheapest.cost()),
                quantity(metrics.cheapest.co2(), "kg"),
            ),
            None => (
                PLACEHOLDER.to_string(),
                PLACEHOLDER.to_string(),
                PLACEHOLDER.to_string(),
                PLACEHOLDER.to_string(),
            ),
        };
        let commands = vec![
            label("stat_cheapest", cheapest),
            label("stat_fastest", fastest),
            label("stat_cost", cost),
            label("stat_co2", co2),
        ];
        send_commands(NAME, &self.command_tx, commands);
    }
}

fn label(name: &str, text: String) -> Command {
    Command::CreateElement {
        name: name.to_string(),
        element: Element::Label { text },
    }
}

impl DashboardEventConsumer for SummaryView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn consume_dashboard_event(
        &mut self,
        _: &DashboardState,
        event: &DashboardEvent,
    ) -> CaptureEvent {
        match event {
            DashboardEvent::Init => self.draw(None),
            DashboardEvent::WorkingSetChanged { metrics } => self.draw(metrics.as_ref()),
            _ => (),
        }
        CaptureEvent::No
    }

    fn consume_canvas_event(
        &mut self,
        _: &DashboardState,
        _: Arc<canvas::Event>,
    ) -> CaptureEvent {
        CaptureEvent::No
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cities::CityCoords;
    use crate::dashboard::Dashboard;
    use crate::route::Route;
    use canvas::Canvas;
    use std::sync::mpsc::{channel, Receiver};

    fn route(path: &[&str], cost: f64, duration: f64) -> Route {
        Route {
            path: path.iter().map(|city| city.to_string()).collect(),
            total_distance_km: Some(100.0),
            total_cost: Some(cost),
            total_duration_h: Some(duration),
            total_co2: Some(15.5),
        }
    }

    fn view_and_dashboard() -> (Dashboard, Receiver<Vec<Command>>) {
        let mut dashboard = Dashboard::new(CityCoords::builtin());
        let (command_tx, command_rx) = channel();
        dashboard.add_consumer(SummaryView::new(command_tx));
        (dashboard, command_rx)
    }

    fn apply_all(canvas: &mut Canvas, command_rx: &Receiver<Vec<Command>>) {
        while let Ok(commands) = command_rx.try_recv() {
            canvas.process(commands);
        }
    }

    fn label_text(canvas: &Canvas, name: &str) -> String {
        match &canvas.scene().get(name).unwrap().element {
            Element::Label { text } => text.clone(),
            element => panic!("Unexpected element {:?}", element),
        }
    }

    #[test]
    fn shows_cheapest_and_fastest() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![
            route(&["Lima", "Cusco"], 30.0, 1.0),
            route(&["Lima", "Puno"], 10.0, 4.0),
        ]);
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        assert_eq!(label_text(&canvas, "stat_cheapest"), "Lima → Puno");
        assert_eq!(label_text(&canvas, "stat_fastest"), "Lima → Cusco");
        assert_eq!(label_text(&canvas, "stat_cost"), "$10");
        assert_eq!(label_text(&canvas, "stat_co2"), "15.5 kg");
    }

    #[test]
    fn empty_working_set_shows_neutral_state() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![]);
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        assert_eq!(label_text(&canvas, "stat_cheapest"), "—");
        assert_eq!(label_text(&canvas, "stat_fastest"), "—");
        assert_eq!(label_text(&canvas, "stat_cost"), "—");
        assert_eq!(label_text(&canvas, "stat_co2"), "—");
    }

    #[test]
    fn selection_does_not_touch_the_summary() {
        let (mut dashboard, command_rx) = view_and_dashboard();
        dashboard.update_routes(vec![
            route(&["Lima", "Cusco"], 30.0, 1.0),
            route(&["Lima", "Puno"], 10.0, 4.0),
        ]);
        let mut canvas = Canvas::new();
        apply_all(&mut canvas, &command_rx);
        dashboard.select_route(1).unwrap();
        assert!(command_rx.try_recv().is_err());
    }
}
