/// Chat messages sent to the provider for one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_message: String,
    pub user_message: String,
}
