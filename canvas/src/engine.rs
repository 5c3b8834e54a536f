use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::coords::V2;
use crate::events::EventConsumer;
use crate::scene::{Element, Entry, Scene};
use log::debug;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Start,
    ElementClicked(String),
    Shutdown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    CreateElement { name: String, element: Element },
    SetEmphasis { name: String, emphasised: bool },
    Erase(String),
    Frame { min: V2<f64>, max: V2<f64>, padding: f64 },
    Event(Event),
    Shutdown,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub min: V2<f64>,
    pub max: V2<f64>,
    pub padding: f64,
}

/// Headless display surface. Views mutate the scene by sending `Command`
/// batches over the channel; interaction events fan out to every registered
/// `EventConsumer`. The terminal is the display: each processed batch is
/// followed by a textual render of the scene.
pub struct Canvas {
    scene: Scene,
    viewport: Option<Viewport>,
    running: bool,
    event_consumers: Vec<Box<dyn EventConsumer>>,
    command_tx: Sender<Vec<Command>>,
    command_rx: Receiver<Vec<Command>>,
}

impl Canvas {
    pub fn new() -> Canvas {
        let (command_tx, command_rx) = channel();
        Canvas {
            scene: Scene::new(),
            viewport: None,
            running: true,
            event_consumers: vec![],
            command_tx,
            command_rx,
        }
    }

    pub fn command_tx(&self) -> Sender<Vec<Command>> {
        self.command_tx.clone()
    }

    pub fn add_event_consumer<T>(&mut self, event_consumer: T)
    where
        T: EventConsumer + 'static,
    {
        self.event_consumers.push(Box::new(event_consumer));
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn run(&mut self) {
        self.consume_event(Event::Start);
        while self.running {
            match self.command_rx.recv() {
                Ok(commands) => {
                    self.process(commands);
                    self.draw();
                }
                Err(_) => self.running = false,
            }
        }
        self.consume_event(Event::Shutdown);
    }

    pub fn process(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::CreateElement { name, element } => self.scene.create(name, element),
            Command::SetEmphasis { name, emphasised } => {
                if !self.scene.set_emphasis(&name, emphasised) {
                    debug!("No element {} to emphasise", name);
                }
            }
            Command::Erase(name) => {
                self.scene.erase(&name);
            }
            Command::Frame { min, max, padding } => {
                self.viewport = Some(Viewport { min, max, padding })
            }
            Command::Event(event) => self.consume_event(event),
            Command::Shutdown => self.running = false,
        }
    }

    fn consume_event(&mut self, event: Event) {
        let event_arc = Arc::new(event);
        for consumer in self.event_consumers.iter_mut() {
            consumer.consume_event(event_arc.clone());
        }
    }

    fn draw(&self) {
        println!("{}", self.render());
    }

    pub fn render(&self) -> String {
        let mut out = vec![format!("── canvas · {} elements", self.scene.len())];
        for (name, entry) in self.scene.iter() {
            out.push(render_entry(name, entry));
        }
        if let Some(Viewport { min, max, padding }) = self.viewport {
            out.push(format!(
                "   viewport ({:.4}, {:.4})..({:.4}, {:.4}) pad {}",
                min.x, min.y, max.x, max.y, padding
            ));
        }
        out.join("\n")
    }
}

fn render_entry(name: &str, entry: &Entry) -> String {
    let mark = if entry.emphasised { '▶' } else { ' ' };
    match &entry.element {
        Element::Polyline {
            points,
            weight,
            popup,
            ..
        } => {
            let weight = if entry.emphasised {
                weight + 2.0
            } else {
                *weight
            };
            let popup = popup.as_deref().unwrap_or("");
            format!(
                "{} {}: polyline · {} pts · weight {} {}",
                mark,
                name,
                points.len(),
                weight,
                popup
            )
        }
        Element::Bar {
            chart,
            series,
            label,
            value,
            ..
        } => {
            let value = match value {
                Some(value) => format!("{}", value),
                None => "—".to_string(),
            };
            let border = if entry.emphasised { " [bordered]" } else { "" };
            format!(
                "{} {}: {}/{} · {} = {}{}",
                mark, name, chart, series, label, value, border
            )
        }
        Element::Point { at, label, .. } => format!(
            "{} {}: point ({}, {}) · {}",
            mark, name, at.x, at.y, label
        ),
        Element::Label { text } => format!("{} {}: {}", mark, name, text),
        Element::Row { cells } => format!("{} {}: {}", mark, name, cells.join(" | ")),
    }
}
