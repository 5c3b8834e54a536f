use crate::dashboard::Dashboard;
use crate::remote::{spawn_query, Query, SearchClient};
use crate::update::UpdateSender;

use canvas::Command;
use log::{info, warn};
use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;
use thiserror::Error;

const NAME: &str = "console";

const USAGE: &str = "search ORIGIN DESTINATION BUDGET | recommend ORIGIN BUDGET | \
                     select INDEX | click ELEMENT | quit";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown instruction {0:?}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Search {
        origin: String,
        destination: String,
        budget: f64,
    },
    Recommend {
        origin: String,
        budget: f64,
    },
    Select(usize),
    Click(String),
    Quit,
}

pub fn parse_instruction(line: &str) -> Result<Instruction, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["search", origin, destination, budget] => Ok(Instruction::Search {
            origin: origin.to_string(),
            destination: destination.to_string(),
            budget: parse_budget(budget)?,
        }),
        ["search", ..] => Err(ParseError::Usage("search ORIGIN DESTINATION BUDGET")),
        ["recommend", origin, budget] => Ok(Instruction::Recommend {
            origin: origin.to_string(),
            budget: parse_budget(budget)?,
        }),
        ["recommend", ..] => Err(ParseError::Usage("recommend ORIGIN BUDGET")),
        ["select", index] => index
            .parse()
            .map(Instruction::Select)
            .map_err(|_| ParseError::Usage("select INDEX")),
        ["select", ..] => Err(ParseError::Usage("select INDEX")),
        ["click", element] => Ok(Instruction::Click(element.to_string())),
        ["click", ..] => Err(ParseError::Usage("click ELEMENT")),
        ["quit"] => Ok(Instruction::Quit),
        _ => Err(ParseError::Unknown(line.trim().to_string())),
    }
}

fn parse_budget(word: &str) -> Result<f64, ParseError> {
    word.parse()
        .map_err(|_| ParseError::Usage("BUDGET must be a number"))
}

/// Stand-in for the browser's form and pointer input: one thread reading
/// stdin, translating lines into remote queries, queued selections and
/// injected canvas clicks.
pub struct Console {
    client: SearchClient,
    dashboard_tx: UpdateSender<Dashboard>,
    command_tx: Sender<Vec<Command>>,
}

impl Console {
    pub fn new(
        client: SearchClient,
        dashboard_tx: &UpdateSender<Dashboard>,
        command_tx: Sender<Vec<Command>>,
    ) -> Console {
        Console {
            client,
            dashboard_tx: dashboard_tx.clone_with_handle(NAME),
            command_tx,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    fn run(self) {
        info!("Ready: {}", USAGE);
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_instruction(&line) {
                Ok(instruction) => {
                    if !self.apply(instruction) {
                        return;
                    }
                }
                Err(error) => warn!("{}", error),
            }
        }
        self.apply(Instruction::Quit);
    }

    /// Returns false once the session is over.
    fn apply(&self, instruction: Instruction) -> bool {
        match instruction {
            Instruction::Search {
                origin,
                destination,
                budget,
            } => spawn_query(
                self.client.clone(),
                Query::Search {
                    origin,
                    destination,
                    budget,
                },
                &self.dashboard_tx,
            ),
            Instruction::Recommend { origin, budget } => spawn_query(
                self.client.clone(),
                Query::Recommend { origin, budget },
                &self.dashboard_tx,
            ),
            Instruction::Select(index) => self.dashboard_tx.update(move |dashboard| {
                if let Err(error) = dashboard.select_route(index) {
                    warn!("{}", error);
                }
            }),
            Instruction::Click(element) => {
                let _ = self
                    .command_tx
                    .send(vec![Command::Event(canvas::Event::ElementClicked(element))]);
            }
            Instruction::Quit => {
                self.dashboard_tx.update(Dashboard::shutdown);
                let _ = self.command_tx.send(vec![Command::Shutdown]);
                return false;
            }
        }
        true
    }
}
