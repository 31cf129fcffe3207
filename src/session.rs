//! Session Module
//!
//! Executes REPL input lines against an open store.
//!
//! ## Responsibilities
//! - Dispatch meta commands and statements
//! - Translate recoverable store errors into user-facing messages
//! - Propagate I/O and capacity failures to the caller

use crate::btree::PAGE_HEADER_SIZE;
use crate::command::{MetaCommand, PrepareError, Statement};
use crate::config::Config;
use crate::error::{LeafError, Result};
use crate::pager::PAGE_SIZE;
use crate::store::Store;
use crate::table::{Row, ROW_SIZE};

/// What one input line produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Lines to print, without trailing newlines
    pub lines: Vec<String>,

    /// The caller should close the session and stop reading input
    pub exit: bool,
}

impl Output {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            exit: false,
        }
    }

    fn exit() -> Self {
        Self {
            lines: Vec::new(),
            exit: true,
        }
    }
}

/// An interactive session over the `users` table
pub struct Session {
    store: Store,
}

impl Session {
    pub const EXECUTED: &'static str = "Executed.";
    pub const DUPLICATE_KEY: &'static str = "Error: duplicate key.";
    pub const NODE_FULL: &'static str = "Need to implement splitting a leaf node.";

    /// Open the table store described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let store = Store::open_with_config(config, ROW_SIZE)?;
        Ok(Self { store })
    }

    /// Wrap an already opened store (its value length must be `ROW_SIZE`)
    pub fn with_store(store: Store) -> Result<Self> {
        let actual = store.geometry().value_length();
        if actual != ROW_SIZE {
            return Err(LeafError::ValueLength {
                expected: ROW_SIZE,
                actual,
            });
        }
        Ok(Self { store })
    }

    /// Execute one line of input (trailing newline already stripped)
    pub fn execute_line(&mut self, input: &str) -> Result<Output> {
        if MetaCommand::is_meta(input) {
            return self.execute_meta(MetaCommand::parse(input));
        }

        match Statement::prepare(input) {
            Ok(statement) => self.execute_statement(statement),
            Err(PrepareError::SyntaxError) => Ok(Output {
                lines: vec![
                    PrepareError::SyntaxError.to_string(),
                    Statement::INSERT_USAGE.to_string(),
                ],
                exit: false,
            }),
            Err(err) => Ok(Output::line(err.to_string())),
        }
    }

    /// Close the underlying store, flushing every resident page
    pub fn close(self) -> Result<()> {
        self.store.close()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn execute_meta(&mut self, command: MetaCommand) -> Result<Output> {
        match command {
            MetaCommand::Exit => Ok(Output::exit()),
            MetaCommand::Btree => {
                let dump = self.store.dump()?.to_string();
                Ok(Output {
                    lines: dump.lines().map(str::to_string).collect(),
                    exit: false,
                })
            }
            MetaCommand::Constants => {
                let geometry = self.store.geometry();
                Ok(Output {
                    lines: vec![
                        format!("PAGE_SIZE: {}", PAGE_SIZE),
                        format!("PAGE_HEADER_SIZE: {}", PAGE_HEADER_SIZE),
                        format!("ROW_SIZE: {}", ROW_SIZE),
                        format!("NO_PAIRS: {}", geometry.no_pairs()),
                        format!("MAX_PAGES: {}", self.store.pager().max_pages()),
                    ],
                    exit: false,
                })
            }
            MetaCommand::Unrecognized(input) => {
                Ok(Output::line(format!("Unrecognized command '{}'.", input)))
            }
        }
    }

    fn execute_statement(&mut self, statement: Statement) -> Result<Output> {
        match statement {
            Statement::Insert(row) => match self.store.insert(row.id(), &row.serialize()) {
                Ok(()) => Ok(Output::line(Self::EXECUTED)),
                Err(LeafError::DuplicateKey { .. }) => Ok(Output::line(Self::DUPLICATE_KEY)),
                Err(LeafError::NodeFull { .. }) => Ok(Output::line(Self::NODE_FULL)),
                Err(e) => Err(e),
            },
            Statement::Select => {
                let mut lines = Vec::new();
                for value in self.store.iterate_all()? {
                    lines.push(Row::deserialize(value)?.to_string());
                }
                lines.push(Self::EXECUTED.to_string());
                Ok(Output {
                    lines,
                    exit: false,
                })
            }
        }
    }
}
