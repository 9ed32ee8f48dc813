use super::category::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub suggested_response: String,
}

impl Classification {
    pub fn new(category: Category, suggested_response: impl Into<String>) -> Self {
        Self {
            category,
            suggested_response: suggested_response.into(),
        }
    }
}
