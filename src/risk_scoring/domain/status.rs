use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage status of a risk. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Open,
    Monitoring,
    Closed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::Monitoring, Status::Closed];

    /// Label in the register's display language (Spanish)
    pub fn display_label(&self) -> &'static str {
        match self {
            Status::Open => "Abierto",
            Status::Monitoring => "Monitoreando",
            Status::Closed => "Cerrado",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Monitoring => "Monitoring",
            Status::Closed => "Closed",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Status::Open),
            "Monitoring" => Ok(Status::Monitoring),
            "Closed" => Ok(Status::Closed),
            _ => Err(format!(
                "Invalid status: {}. Expected one of Open, Monitoring, Closed",
                s
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
