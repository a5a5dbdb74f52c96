pub mod engine;

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::name::ProjectName;

pub use engine::{DefaultsPrompt, InteractivePrompt};

/// Values substituted into template placeholders, looked up by key.
pub type Metadata = BTreeMap<String, String>;

/// One value to ask the user for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptField {
    pub key: String,
    pub message: String,
    pub default: String,
}

impl PromptField {
    pub fn new(key: &str, message: &str, default: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            message: message.to_string(),
            default: default.into(),
        }
    }
}

/// Where metadata and yes/no answers come from.
pub trait PromptSource {
    /// Return a value for every field, falling back to its default.
    fn collect(&self, fields: &[PromptField]) -> Result<Metadata>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// The fields every template can rely on: `name` and `projectDes`.
pub fn project_fields(name: &ProjectName) -> Vec<PromptField> {
    vec![
        PromptField::new("name", "Project name", name.as_str()),
        PromptField::new(
            "projectDes",
            "Project description",
            format!("A project named {name}"),
        ),
    ]
}

/// Collect metadata for `fields`, asking `source` only for keys missing from `overrides`.
///
/// Override keys that are not fields are passed through, so templates can use extra
/// placeholders supplied with `-d`.
pub fn collect_metadata(
    source: &dyn PromptSource,
    fields: &[PromptField],
    overrides: &HashMap<String, String>,
) -> Result<Metadata> {
    let remaining: Vec<PromptField> = fields
        .iter()
        .filter(|f| !overrides.contains_key(&f.key))
        .cloned()
        .collect();

    let mut metadata = if remaining.is_empty() {
        Metadata::new()
    } else {
        source.collect(&remaining)?
    };

    for (key, value) in overrides {
        metadata.insert(key.clone(), value.clone());
    }
    for field in fields {
        metadata
            .entry(field.key.clone())
            .or_insert_with(|| field.default.clone());
    }

    Ok(metadata)
}
