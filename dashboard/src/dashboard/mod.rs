mod state;

pub use state::*;

use crate::cities::CityCoords;
use crate::metrics::{compute_metrics, DerivedMetrics};
use crate::route::{Route, RouteSet};
use crate::update::{process_update, update_channel, UpdateReceiver, UpdateSender};

use canvas::EventConsumer;
use log::debug;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Notice {
    NoFeasibleRoute,
    NoRecommendations,
    TransportFailure,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoFeasibleRoute => "No feasible route for this search",
            Notice::NoRecommendations => "No recommendations within this budget",
            Notice::TransportFailure => "Could not reach the route server",
        }
    }
}

pub enum DashboardEvent {
    Init,
    WorkingSetChanged { metrics: Option<DerivedMetrics> },
    SelectionChanged,
    NoticePosted(Notice),
    CanvasEvent(Arc<canvas::Event>),
}

impl DashboardEvent {
    fn describe(&self) -> &'static str {
        match self {
            DashboardEvent::Init => "init",
            DashboardEvent::WorkingSetChanged { .. } => "working set changed",
            DashboardEvent::SelectionChanged => "selection changed",
            DashboardEvent::NoticePosted(..) => "notice posted",
            DashboardEvent::CanvasEvent(..) => "canvas event",
        }
    }
}

pub enum CaptureEvent {
    Yes,
    No,
}

/// One registered view. Full redraws and highlight-only updates arrive as
/// dashboard events; raw interaction events arrive from the canvas. A view
/// must catch its own render failures: one failing view never blocks the
/// rest of the broadcast.
pub trait DashboardEventConsumer: Send {
    fn name(&self) -> &'static str;
    fn consume_dashboard_event(&mut self, state: &DashboardState, event: &DashboardEvent)
        -> CaptureEvent;
    fn consume_canvas_event(&mut self, state: &DashboardState, event: Arc<canvas::Event>)
        -> CaptureEvent;
}

/// Owns the selection state and fans events out to the registered views,
/// one queued update at a time; views dispatch selections back through the
/// update channel, so a view can never re-enter the broadcast that is
/// notifying it.
pub struct Dashboard {
    state: DashboardState,
    consumers: Vec<Box<dyn DashboardEventConsumer>>,
    update_tx: UpdateSender<Dashboard>,
    update_rx: UpdateReceiver<Dashboard>,
    run: bool,
}

impl Dashboard {
    pub fn new(cities: CityCoords) -> Dashboard {
        let (update_tx, update_rx) = update_channel();
        Dashboard {
            state: DashboardState::new(cities),
            consumers: vec![],
            update_tx,
            update_rx,
            run: true,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn update_tx(&self) -> &UpdateSender<Dashboard> {
        &self.update_tx
    }

    pub fn add_consumer<T>(&mut self, consumer: T)
    where
        T: DashboardEventConsumer + 'static,
    {
        self.consumers.push(Box::new(consumer));
    }

    /// Installs a freshly normalized working set. Any selection is cleared,
    /// even when the new set contains a route identical to the selected
    /// one, and every view redraws in full.
    pub fn update_routes(&mut self, raw: Vec<Route>) {
        let working_set = RouteSet::normalize(raw);
        let metrics = compute_metrics(&working_set).ok();
        self.state.working_set = working_set;
        self.state.selected = None;
        self.consume_event(DashboardEvent::WorkingSetChanged { metrics });
    }

    /// Highlights one route across every view. Out-of-range indices leave
    /// the state untouched; that only happens on a dispatch bug, so it is
    /// reported to the caller rather than to the user.
    pub fn select_route(&mut self, index: usize) -> Result<(), SelectionOutOfRangeError> {
        let len = self.state.working_set.len();
        if index >= len {
            return Err(SelectionOutOfRangeError { index, len });
        }
        self.state.selected = Some(index);
        self.consume_event(DashboardEvent::SelectionChanged);
        Ok(())
    }

    pub fn post_notice(&mut self, notice: Notice) {
        self.consume_event(DashboardEvent::NoticePosted(notice));
    }

    pub fn consume_event(&mut self, event: DashboardEvent) {
        if let DashboardEvent::CanvasEvent(event) = event {
            for consumer in self.consumers.iter_mut() {
                let capture = consumer.consume_canvas_event(&self.state, event.clone());
                if let CaptureEvent::Yes = capture {
                    return;
                }
            }
        } else {
            debug!("Broadcasting {}", event.describe());
            for consumer in self.consumers.iter_mut() {
                let capture = consumer.consume_dashboard_event(&self.state, &event);
                if let CaptureEvent::Yes = capture {
                    return;
                }
            }
        }
    }

    /// Processes the next queued update, blocking until one arrives.
    /// Returns false once every sender is gone.
    pub fn process_next_update(&mut self) -> bool {
        match self.update_rx.wait_update() {
            Some(update) => {
                debug!("Processing update from {}", update.sender_handle());
                process_update(update, self);
                true
            }
            None => false,
        }
    }

    pub fn run(&mut self) {
        self.consume_event(DashboardEvent::Init);
        while self.run {
            if !self.process_next_update() {
                self.run = false;
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.run = false;
    }
}

/// Bridges the canvas event fan-out into the dashboard's update queue.
pub struct CanvasEventForwarder {
    dashboard_tx: UpdateSender<Dashboard>,
}

impl CanvasEventForwarder {
    pub fn new(dashboard_tx: &UpdateSender<Dashboard>) -> CanvasEventForwarder {
        CanvasEventForwarder {
            dashboard_tx: dashboard_tx.clone_with_handle("canvas_event_forwarder"),
        }
    }
}

impl EventConsumer for CanvasEventForwarder {
    fn consume_event(&mut self, event: Arc<canvas::Event>) {
        self.dashboard_tx
            .update(move |dashboard| dashboard.consume_event(DashboardEvent::CanvasEvent(event)));
    }
}
