use crate::engine::Event;

use std::sync::Arc;

pub trait EventConsumer: Send {
    fn consume_event(&mut self, event: Arc<Event>);
}
