#[cfg(test)]
#[macro_use]
extern crate hamcrest;

mod almost;
mod args;
mod cities;
mod console;
mod dashboard;
mod duration;
mod metrics;
mod remote;
mod route;
mod update;
mod views;

use crate::args::Args;
use crate::cities::CityCoords;
use crate::console::Console;
use crate::dashboard::{CanvasEventForwarder, Dashboard};
use crate::remote::SearchClient;
use crate::views::{
    ComparisonChartView, MapView, NoticeView, RouteListView, ScatterChartView, SummaryView,
    ValueChartView,
};

use canvas::Canvas;
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::env;
use std::thread;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .init()
        .unwrap();

    let args = Args::new(env::args().collect());

    let cities = match &args.city_file {
        Some(path) => match CityCoords::from_file(path) {
            Ok(cities) => cities,
            Err(error) => {
                warn!("Falling back to builtin cities: {}", error);
                CityCoords::builtin()
            }
        },
        None => CityCoords::builtin(),
    };

    let mut canvas = Canvas::new();
    let command_tx = canvas.command_tx();

    let mut dashboard = Dashboard::new(cities);
    canvas.add_event_consumer(CanvasEventForwarder::new(dashboard.update_tx()));
    dashboard.add_consumer(MapView::new(command_tx.clone(), dashboard.update_tx()));
    dashboard.add_consumer(ComparisonChartView::new(
        command_tx.clone(),
        dashboard.update_tx(),
    ));
    dashboard.add_consumer(ScatterChartView::new(
        command_tx.clone(),
        dashboard.update_tx(),
    ));
    dashboard.add_consumer(ValueChartView::new(
        command_tx.clone(),
        dashboard.update_tx(),
    ));
    dashboard.add_consumer(RouteListView::new(
        command_tx.clone(),
        dashboard.update_tx(),
    ));
    dashboard.add_consumer(SummaryView::new(command_tx.clone()));
    dashboard.add_consumer(NoticeView::new(command_tx.clone()));

    let console = Console::new(
        SearchClient::new(args.server.clone()),
        dashboard.update_tx(),
        command_tx,
    );
    let _console = console.spawn();

    let dashboard_handle = thread::spawn(move || dashboard.run());

    canvas.run();

    info!("Joining dashboard");
    dashboard_handle.join().unwrap();
}
