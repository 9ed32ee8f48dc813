use std::fmt;

/// Category labels reported in place of a verdict when classification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// The provider client was never configured.
    Error,
    /// The provider was unreachable, throttled us, or answered with an error.
    ServiceError,
    /// The provider answered but the answer did not fit the expected shape.
    UnexpectedError,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::Error => "Error",
            Sentinel::ServiceError => "Service Error",
            Sentinel::UnexpectedError => "Unexpected Error",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
