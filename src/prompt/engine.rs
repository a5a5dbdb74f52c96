use crate::error::{HbbError, Result};
use crate::prompt::{Metadata, PromptField, PromptSource};

/// Asks on the terminal with inquire.
pub struct InteractivePrompt;

impl PromptSource for InteractivePrompt {
    fn collect(&self, fields: &[PromptField]) -> Result<Metadata> {
        let mut values = Metadata::new();
        for field in fields {
            let answer = inquire::Text::new(&field.message)
                .with_default(&field.default)
                .prompt()
                .map_err(|_| HbbError::PromptCancelled)?;
            values.insert(field.key.clone(), answer);
        }
        Ok(values)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        inquire::Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(|_| HbbError::PromptCancelled)
    }
}

/// Accepts every default without asking. Used with `--yes`.
pub struct DefaultsPrompt;

impl PromptSource for DefaultsPrompt {
    fn collect(&self, fields: &[PromptField]) -> Result<Metadata> {
        Ok(fields
            .iter()
            .map(|f| (f.key.clone(), f.default.clone()))
            .collect())
    }

    fn confirm(&self, _message: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}
