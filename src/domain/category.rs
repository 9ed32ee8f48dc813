use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict the classifier assigns to an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Requires an action, a specific reply or a status change.
    Productive,
    /// Needs no action or immediate reply.
    Unproductive,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Productive => "Productive",
            Category::Unproductive => "Unproductive",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
