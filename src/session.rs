//! Interactive session
//!
//! Brings the lists up through the `StorageManager`, then reads one command
//! per line until `exit` or the end of input, and saves the lists on the way
//! out. A rejected command is reported and the loop carries on; only startup
//! and save failures end the session with an error.

use crate::command::create_command;
use crate::core::LendingContext;
use crate::io::console::Ui;
use crate::storage::{Startup, StorageManager};
use crate::types::LendingError;
use chrono::NaiveDate;

const WELCOME: &str = "Welcome to the lending pool!\n\
    Type 'list-commands' to see what you can do.";

/// One run of the read-parse-execute loop against a set of data files
pub struct Session<'a> {
    storage: &'a StorageManager,
    today: Option<NaiveDate>,
}

impl<'a> Session<'a> {
    pub fn new(storage: &'a StorageManager) -> Self {
        Session {
            storage,
            today: None,
        }
    }

    /// Pin the date commands see as "today"
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Run the session to completion
    ///
    /// # Errors
    ///
    /// * `FilesIllegallyDeleted` - The data files are not all present or all absent
    /// * `StoreFailure` - The lists could not be saved
    /// * `IoError` - A file or the console input could not be read
    pub fn run(&self, ui: &mut dyn Ui) -> Result<(), LendingError> {
        let lists = match self.storage.initialize(ui)? {
            Startup::Ready(lists) => lists,
            Startup::Declined => return Ok(()),
        };

        let mut context = LendingContext::new(lists);
        if let Some(today) = self.today {
            context = context.with_today(today);
        }

        ui.print_response(WELCOME);
        tracing::info!(
            users = context.lists.users.len(),
            items = context.lists.items.len(),
            transactions = context.lists.transactions.len(),
            "session started"
        );

        while let Some(line) = ui.read_input()? {
            if line.trim().is_empty() {
                continue;
            }
            let outcome = create_command(&line).and_then(|command| {
                tracing::debug!(command = command.name(), "executing command");
                command.execute(&mut context, ui)
            });
            match outcome {
                Ok(true) => break,
                Ok(false) => {}
                Err(error) => {
                    tracing::debug!(input = %line, %error, "command rejected");
                    ui.print_error(&error.to_string());
                }
            }
        }

        self.storage.write_data_to_file(&context.into_lists())
    }
}
