use super::send_commands;
use crate::dashboard::{CaptureEvent, DashboardEvent, DashboardEventConsumer, DashboardState};

use canvas::{Command, Element};
use log::warn;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const NAME: &str = "notices";
const ELEMENT: &str = "notice";

/// Non-fatal notices (no routes, no recommendations, transport failure).
/// A later successful rebuild clears whatever notice is showing.
pub struct NoticeView {
    command_tx: Sender<Vec<Command>>,
}

impl NoticeView {
    pub fn new(command_tx: Sender<Vec<Command>>) -> NoticeView {
        NoticeView { command_tx }
    }
}

impl DashboardEventConsumer for NoticeView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn consume_dashboard_event(
        &mut self,
        _: &DashboardState,
        event: &DashboardEvent,
    ) -> CaptureEvent {
        match event {
            DashboardEvent::NoticePosted(notice) => {
                warn!("{}", notice.message());
                send_commands(
                    NAME,
                    &self.command_tx,
                    vec![Command::CreateElement {
                        name: ELEMENT.to_string(),
                        element: Element::Label {
                            text: notice.message().to_string(),
                        },
                    }],
                );
            }
            DashboardEvent::WorkingSetChanged { .. } => {
                send_commands(
                    NAME,
                    &self.command_tx,
                    vec![Command::Erase(ELEMENT.to_string())],
                );
            }
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
