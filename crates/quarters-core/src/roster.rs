//! Bulk roster import.
//!
//! One occupant per non-blank line: `<first> <last> <designation>
//! [accommodation]`, where `accommodation` is `Y` (case-insensitive) to
//! request a living space. Bad lines are reported and skipped; the import
//! never stops early. Reading the text from disk and rendering the report
//! are the caller's job.

use crate::engine::AllocationEngine;
use crate::error::EngineError;
use crate::model::OccupantId;

/// Outcome of one roster import
#[derive(Debug, Default)]
pub struct RosterReport {
    /// Ids of everyone added, in file order
    pub loaded: Vec<OccupantId>,
    /// Lines that were skipped, with why
    pub failures: Vec<LineFailure>,
}

impl RosterReport {
    /// True when every line loaded ("everyone" rather than "some people")
    pub fn all_loaded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One skipped roster line
#[derive(Debug)]
pub struct LineFailure {
    /// 1-based line number in the input
    pub line: usize,
    pub error: RosterError,
}

#[derive(Debug)]
pub enum RosterError {
    /// Not 3 or 4 whitespace-separated tokens
    InvalidParameters,
    /// Tokenized fine but the engine refused the occupant
    Rejected(EngineError),
}

/// Feed a roster text into the engine, line by line
pub fn load_roster(engine: &mut AllocationEngine, text: &str) -> RosterReport {
    let mut report = RosterReport::default();
    for (line_index, line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 && tokens.len() != 4 {
            report.failures.push(LineFailure {
                line: line_number,
                error: RosterError::InvalidParameters,
            });
            continue;
        }
        let name = format!("{} {}", tokens[0], tokens[1]);
        let wants_accommodation = tokens.len() == 4 && tokens[3].eq_ignore_ascii_case("y");
        match engine.add_occupant(&name, tokens[2], wants_accommodation) {
            Ok(id) => report.loaded.push(id),
            Err(error) => report.failures.push(LineFailure {
                line: line_number,
                error: RosterError::Rejected(error),
            }),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::FirstAvailable;
    use crate::model::Role;

    fn engine() -> AllocationEngine {
        AllocationEngine::with_chooser(Box::new(FirstAvailable))
    }

    #[test]
    fn test_clean_roster_loads_everyone() {
        let mut engine = engine();
        let text = "Amy Pond STAFF\n\nRory Williams fellow Y\nClara Oswald fellow\n";

        let report = load_roster(&mut engine, text);
        assert!(report.all_loaded());
        assert_eq!(report.loaded.len(), 3);
        assert_eq!(engine.staff_count(), 1);
        assert_eq!(engine.fellow_count(), 2);

        let rory = engine.occupant(&report.loaded[1]).unwrap();
        assert_eq!(rory.role(), Role::Fellow);
        assert!(rory.wants_accommodation());
    }

    #[test]
    fn test_bad_lines_are_skipped_not_fatal() {
        let mut engine = engine();
        let text = "Amy Pond staff\n\
                    Rory\n\
                    Clara Oswald intern\n\
                    River Song staff Y\n\
                    Jack Harkness fellow y extra\n\
                    Martha Jones fellow Y\n";

        let report = load_roster(&mut engine, text);
        assert!(!report.all_loaded());
        assert_eq!(report.loaded.len(), 2); // Amy and Martha
        assert_eq!(report.failures.len(), 4);

        assert_eq!(report.failures[0].line, 2); // token count
        assert!(matches!(
            report.failures[0].error,
            RosterError::InvalidParameters
        ));
        assert_eq!(report.failures[1].line, 3); // bad designation
        assert_eq!(report.failures[2].line, 4); // staff wanting a dorm
        assert_eq!(report.failures[3].line, 5); // five tokens
    }

    #[test]
    fn test_accommodation_flag_must_be_y() {
        let mut engine = engine();
        let report = load_roster(&mut engine, "Rory Williams fellow N\n");
        assert!(report.all_loaded());

        let rory = engine.occupant(&report.loaded[0]).unwrap();
        assert!(!rory.wants_accommodation());
    }
}
