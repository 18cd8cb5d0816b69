use std::error::Error;
use std::fmt;

/// Rejections raised while normalizing an inbound trip request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: String,
    },
    BudgetTooLow {
        budget: u64,
        days: u32,
        minimum: u64,
        currency: String,
    },
}

impl ValidationError {
    /// Stable identifier returned alongside the message in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "MissingField",
            ValidationError::InvalidNumber { .. } => "InvalidNumber",
            ValidationError::BudgetTooLow { .. } => "BudgetTooLow",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ValidationError::InvalidNumber {
                field,
                value,
                reason,
            } => write!(f, "Invalid number for {}: '{}' ({})", field, value, reason),
            ValidationError::BudgetTooLow {
                budget,
                days,
                minimum,
                currency,
            } => write!(
                f,
                "Budget too low: a {}-day trip needs at least {}{}, got {}{}",
                days, currency, minimum, currency, budget
            ),
        }
    }
}

impl Error for ValidationError {}

/// A third-party service (AI text generation, geocoding, places) could not be used.
///
/// These never fail a request; the planner logs them and synthesizes locally.
#[derive(Debug)]
pub enum CollaboratorError {
    NotConfigured(&'static str),
    Timeout(&'static str),
    Http {
        service: &'static str,
        source: reqwest::Error,
    },
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    Rejected {
        service: &'static str,
        reason: String,
    },
    Parse {
        service: &'static str,
        message: String,
    },
    Empty(&'static str),
}

impl CollaboratorError {
    pub fn request(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CollaboratorError::Timeout(service)
        } else {
            CollaboratorError::Http {
                service,
                source: err,
            }
        }
    }

    pub fn parse(service: &'static str, message: impl Into<String>) -> Self {
        CollaboratorError::Parse {
            service,
            message: message.into(),
        }
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, CollaboratorError::NotConfigured(_))
    }
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaboratorError::NotConfigured(service) => write!(f, "{} is not configured", service),
            CollaboratorError::Timeout(service) => write!(f, "{} request timed out", service),
            CollaboratorError::Http { service, source } => {
                write!(f, "{} request failed: {}", service, source)
            }
            CollaboratorError::Status {
                service,
                status,
                body,
            } => write!(f, "{} returned status {}: {}", service, status, body),
            CollaboratorError::Rejected { service, reason } => {
                write!(f, "{} rejected the request: {}", service, reason)
            }
            CollaboratorError::Parse { service, message } => {
                write!(f, "Failed to parse {} response: {}", service, message)
            }
            CollaboratorError::Empty(service) => write!(f, "No content from {}", service),
        }
    }
}

impl Error for CollaboratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CollaboratorError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Internal invariant violation while building an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    InvalidDays(u32),
    EmptyPool(&'static str),
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::InvalidDays(days) => {
                write!(f, "Cannot synthesize an itinerary for {} days", days)
            }
            SynthesisError::EmptyPool(slot) => write!(f, "Activity pool has no {} entries", slot),
        }
    }
}

impl Error for SynthesisError {}
