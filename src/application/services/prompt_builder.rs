use crate::domain::{Category, Prompt};

pub const DEFAULT_REPLY_LANGUAGE: &str = "Brazilian Portuguese";
pub const DEFAULT_SIGNATURE: &str = "Equipe de Suporte";

const EMAIL_DELIMITER: &str = "---";

/// Builds the chat messages for one classification request.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    reply_language: String,
    signature: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_LANGUAGE, DEFAULT_SIGNATURE)
    }
}

impl PromptBuilder {
    pub fn new(reply_language: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            reply_language: reply_language.into(),
            signature: signature.into(),
        }
    }

    pub fn build(&self, normalized_text: &str) -> Prompt {
        Prompt {
            system_message: self.system_message(),
            user_message: self.user_message(normalized_text),
        }
    }

    fn system_message(&self) -> String {
        format!(
            "You are a customer support assistant for a financial services company. \
             You read incoming emails, classify them and draft the reply the support team will send. \
             Every reply you draft is formal and professional, is written in {language}, \
             always addresses the original sender of the email and is always signed as \"{signature}\". \
             You answer only with a valid JSON object.",
            language = self.reply_language,
            signature = self.signature,
        )
    }

    fn user_message(&self, normalized_text: &str) -> String {
        let productive = Category::Productive.as_str();
        let unproductive = Category::Unproductive.as_str();

        format!(
            "Classify the email below and draft a suggested reply to it.\n\
             \n\
             Email:\n\
             {EMAIL_DELIMITER}\n\
             {normalized_text}\n\
             {EMAIL_DELIMITER}\n\
             \n\
             Rules:\n\
             1. \"category\" must be exactly \"{productive}\" or \"{unproductive}\".\n\
             2. \"{productive}\": the email requires a mandatory action, a specific reply or a status \
             change to move a business process forward. Examples: support requests, approval requests, \
             questions about a system, ticket status inquiries, credential or access requests.\n\
             3. \"{unproductive}\": the email needs no action and no immediate reply. Examples: courtesy \
             messages, congratulations, simple thanks, FYI or information sharing, spam.\n\
             4. \"suggestedResponse\": the reply to send to the sender, appropriate for the category, \
             written in {language} and signed as \"{signature}\".\n\
             \n\
             Respond with a valid JSON object with strictly two keys, \"category\" and \
             \"suggestedResponse\", and nothing else.",
            language = self.reply_language,
            signature = self.signature,
        )
    }
}
