//! Severity levels and stream routing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordinal log severity
///
/// `Debug < Info < Notice < Warning < Error < Fatal`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Debug = 0,
    Info = 1,
    Notice = 2,
    #[serde(alias = "warn")]
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Fixed-width label written into every line header
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG  :",
            Severity::Info => "INFO   :",
            Severity::Notice => "NOTICE :",
            Severity::Warning => "WARNING:",
            Severity::Error => "ERROR  :",
            Severity::Fatal => "FATAL  :",
        }
    }

    /// Lowercase name, as accepted in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Output stream records of this severity are written to
    pub fn stream(&self) -> StreamKind {
        if *self >= Severity::Warning {
            StreamKind::Warning
        } else {
            StreamKind::Normal
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "notice" => Ok(Severity::Notice),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// One of the two output destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// `<prefix>.log`: debug, info, notice
    Normal,
    /// `<prefix>.log.wf`: warning and above
    Warning,
}

impl StreamKind {
    /// File name suffix appended to the configured prefix
    pub fn suffix(&self) -> &'static str {
        match self {
            StreamKind::Normal => ".log",
            StreamKind::Warning => ".log.wf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Notice);
        assert!(Severity::Notice < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::default(), Severity::Debug);
    }

    #[test]
    fn test_labels_are_fixed_width() {
        for severity in Severity::ALL {
            assert_eq!(severity.label().len(), 8, "{:?}", severity);
            assert!(severity.label().ends_with(':'));
        }
        assert_eq!(Severity::Debug.label(), "DEBUG  :");
        assert_eq!(Severity::Warning.label(), "WARNING:");
    }

    #[test]
    fn test_stream_routing() {
        assert_eq!(Severity::Debug.stream(), StreamKind::Normal);
        assert_eq!(Severity::Info.stream(), StreamKind::Normal);
        assert_eq!(Severity::Notice.stream(), StreamKind::Normal);
        assert_eq!(Severity::Warning.stream(), StreamKind::Warning);
        assert_eq!(Severity::Error.stream(), StreamKind::Warning);
        assert_eq!(Severity::Fatal.stream(), StreamKind::Warning);
    }

    #[test]
    fn test_parse() {
        assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!(" warn ".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("fatal".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Notice).unwrap();
        assert_eq!(json, "\"notice\"");
        let parsed: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Severity::Error);
    }
}
