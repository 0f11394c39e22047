//! Screen router for the interactive session.
//!
//! The flow mirrors a wizard: pick an algorithm, pick how to enter the input,
//! enter it, see the result, start over. Transitions are a pure function of the
//! current screen and an event; running the engine is the driver's job.

use crate::core::types::AlgorithmId;
use crate::matching::scoring::ScoreReport;

/// How the text and pattern are provided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typed at the prompt
    Manual,
    /// Read from files
    File,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    SelectAlgorithm,
    SelectInputMode { algorithm: AlgorithmId },
    ManualInput { algorithm: AlgorithmId },
    FileInput { algorithm: AlgorithmId },
    Result {
        algorithm: AlgorithmId,
        report: ScoreReport,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    ChooseAlgorithm(AlgorithmId),
    ChooseInputMode(InputMode),
    /// Input was accepted and checked
    Submitted(ScoreReport),
    Back,
    CheckAgain,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Goto(Screen),
    Stay,
    Exit,
}

impl Screen {
    /// Next screen for `event`. Events that make no sense on a screen leave it unchanged.
    #[must_use]
    pub fn handle(self, event: Event) -> Transition {
        use Screen::{FileInput, ManualInput, Result, SelectAlgorithm, SelectInputMode};

        match (self, event) {
            (_, Event::Quit) => Transition::Exit,

            (SelectAlgorithm, Event::ChooseAlgorithm(algorithm)) => {
                Transition::Goto(SelectInputMode { algorithm })
            }

            (SelectInputMode { algorithm }, Event::ChooseInputMode(InputMode::Manual)) => {
                Transition::Goto(ManualInput { algorithm })
            }
            (SelectInputMode { algorithm }, Event::ChooseInputMode(InputMode::File)) => {
                Transition::Goto(FileInput { algorithm })
            }
            (SelectInputMode { .. }, Event::Back) => Transition::Goto(SelectAlgorithm),

            (ManualInput { algorithm } | FileInput { algorithm }, Event::Submitted(report)) => {
                Transition::Goto(Result { algorithm, report })
            }
            (ManualInput { algorithm } | FileInput { algorithm }, Event::Back) => {
                Transition::Goto(SelectInputMode { algorithm })
            }

            (Result { .. }, Event::CheckAgain | Event::Back) => Transition::Goto(SelectAlgorithm),

            _ => Transition::Stay,
        }
    }

    /// Title shown when entering the screen
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::SelectAlgorithm => "Choose an algorithm for the plagiarism check",
            Self::SelectInputMode { .. } => "Choose how to enter the input",
            Self::ManualInput { .. } => "Enter the text and the pattern",
            Self::FileInput { .. } => "Enter the paths of the text and pattern files",
            Self::Result { .. } => "Plagiarism check results",
        }
    }

    fn is_menu(self) -> bool {
        !matches!(self, Self::ManualInput { .. } | Self::FileInput { .. })
    }

    /// Interpret a menu line on a menu screen.
    ///
    /// Input screens and the result screen only recognise the navigation words
    /// (`back`, `quit`, `again`); everything else on an input screen is data.
    ///
    /// # Errors
    ///
    /// Returns a message for the user when the line is not a valid choice. An
    /// unknown algorithm selector is reported this way rather than ending the session.
    pub fn parse_command(&self, line: &str) -> std::result::Result<Option<Event>, String> {
        let line = line.trim();
        match line {
            "quit" | "exit" => return Ok(Some(Event::Quit)),
            "back" => return Ok(Some(Event::Back)),
            // Single letters are data on input screens
            "q" if self.is_menu() => return Ok(Some(Event::Quit)),
            "b" if self.is_menu() => return Ok(Some(Event::Back)),
            _ => {}
        }

        match self {
            Self::SelectAlgorithm => {
                let algorithm = match line {
                    "1" => AlgorithmId::BadCharacter,
                    "2" => AlgorithmId::PrefixFunction,
                    "3" => AlgorithmId::RollingHash,
                    selector => selector.parse().map_err(|e| format!("{e}"))?,
                };
                Ok(Some(Event::ChooseAlgorithm(algorithm)))
            }
            Self::SelectInputMode { .. } => match line {
                "1" | "m" | "manual" => Ok(Some(Event::ChooseInputMode(InputMode::Manual))),
                "2" | "f" | "file" => Ok(Some(Event::ChooseInputMode(InputMode::File))),
                other => Err(format!("Unknown choice: '{other}' (expected manual or file)")),
            },
            Self::Result { .. } => match line {
                "" | "a" | "again" => Ok(Some(Event::CheckAgain)),
                other => Err(format!("Unknown choice: '{other}' (expected again or quit)")),
            },
            Self::ManualInput { .. } | Self::FileInput { .. } => Ok(None),
        }
    }
}
