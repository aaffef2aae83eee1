use crate::core::engine::Action;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const FAREWELL: &str = "Exiting...";

struct MenuOption {
    key: &'static str,
    label: &'static str,
    action: Action,
}

/// Numbered choice of reports, read from an interactive prompt.
pub struct Menu {
    options: Vec<MenuOption>,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            options: vec![
                MenuOption {
                    key: "1",
                    label: "Print team hierarchy",
                    action: Action::Hierarchy,
                },
                MenuOption {
                    key: "2",
                    label: "Print department salary report",
                    action: Action::Pivot,
                },
                MenuOption {
                    key: "3",
                    label: "Save department salary report to file",
                    action: Action::Save,
                },
                MenuOption {
                    key: "4",
                    label: "Exit",
                    action: Action::Exit,
                },
            ],
        }
    }
}

impl Menu {
    pub fn prompt_text(&self) -> String {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|option| format!("{}) {}", option.key, option.label))
            .collect();
        format!("Choose an option: \n{}", options.join(";\n"))
    }

    fn lookup(&self, choice: &str) -> Option<Action> {
        self.options
            .iter()
            .find(|option| option.key == choice)
            .map(|option| option.action)
    }

    /// Prints the options and reads lines until one names a valid option.
    /// End of input is treated as [`Action::Exit`].
    pub fn prompt<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<Action> {
        let mut line = String::new();
        loop {
            writeln!(output, "{}", self.prompt_text())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("Input closed, exiting");
                return Ok(Action::Exit);
            }

            match self.lookup(line.trim()) {
                Some(action) => return Ok(action),
                None => tracing::debug!("Ignoring invalid option: {:?}", line.trim()),
            }
        }
    }
}
