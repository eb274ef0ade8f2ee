//! Operator actions

use classifier::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

const ANSI_RESET: &str = "\x1b[0m";

/// Action advised for an overall severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    ContinueMission,
    ReturnHomeSoon,
    ReturnHomeImmediately,
    EmergencyLanding,
}

impl Action {
    /// Total mapping from severity to action
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Normal => Action::ContinueMission,
            Severity::Mild => Action::ReturnHomeSoon,
            Severity::Severe => Action::ReturnHomeImmediately,
            Severity::Critical => Action::EmergencyLanding,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Action::ContinueMission => "Continue mission",
            Action::ReturnHomeSoon => "Consider returning to home soon",
            Action::ReturnHomeImmediately => "Plan to return to home immediately",
            Action::EmergencyLanding => "Emergency landing is advised",
        }
    }

    /// Terminal colour: green, yellow, light red, red
    pub fn ansi_color(&self) -> &'static str {
        match self {
            Action::ContinueMission => "\x1b[92m",
            Action::ReturnHomeSoon => "\x1b[93m",
            Action::ReturnHomeImmediately => "\x1b[91m",
            Action::EmergencyLanding => "\x1b[31m",
        }
    }

    /// "Action: <message>", optionally wrapped in the action's colour
    pub fn render(&self, ansi: bool) -> String {
        if ansi {
            format!("{}Action: {}{}", self.ansi_color(), self.message(), ANSI_RESET)
        } else {
            format!("Action: {}", self.message())
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
