//! Task documents and their prompt rendering

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Separator between a query and its answer
pub const TARGET_DELIMITER: &str = " ";
/// Separator between solved examples in a few-shot prefix
pub const FEWSHOT_DELIMITER: &str = "\n\n";

/// One line of a task file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskDocument {
    /// Pick the best of several continuations
    MultipleChoice {
        query: String,
        choices: Vec<String>,
        gold: usize,
    },
    /// Free generation compared against a reference
    Generation {
        query: String,
        target: String,
        #[serde(default)]
        until: Vec<String>,
    },
    /// Whole-text likelihood
    Rolling { text: String },
}

/// Kind of scoring a task needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    MultipleChoice,
    Generation,
    Rolling,
}

impl TaskKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskKind::MultipleChoice => "multiple_choice",
            TaskKind::Generation => "generate_until",
            TaskKind::Rolling => "loglikelihood_rolling",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TaskDocument {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskDocument::MultipleChoice { .. } => TaskKind::MultipleChoice,
            TaskDocument::Generation { .. } => TaskKind::Generation,
            TaskDocument::Rolling { .. } => TaskKind::Rolling,
        }
    }

    /// Prompt text the model sees
    pub fn query(&self) -> &str {
        match self {
            TaskDocument::MultipleChoice { query, .. } | TaskDocument::Generation { query, .. } => {
                query
            }
            TaskDocument::Rolling { text } => text,
        }
    }

    /// Query followed by its correct answer, for few-shot prefixes
    pub fn render_solved(&self) -> String {
        match self {
            TaskDocument::MultipleChoice {
                query,
                choices,
                gold,
            } => {
                let answer = choices.get(*gold).map(String::as_str).unwrap_or_default();
                format!("{}{}{}", query, TARGET_DELIMITER, answer)
            }
            TaskDocument::Generation { query, target, .. } => {
                format!("{}{}{}", query, TARGET_DELIMITER, target)
            }
            TaskDocument::Rolling { text } => text.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let TaskDocument::MultipleChoice { choices, gold, .. } = self {
            if choices.is_empty() {
                bail!("multiple-choice document has no choices");
            }
            if *gold >= choices.len() {
                bail!(
                    "gold index {} out of range for {} choices",
                    gold,
                    choices.len()
                );
            }
        }
        Ok(())
    }
}

/// A named, validated list of documents of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub kind: TaskKind,
    pub documents: Vec<TaskDocument>,
}

impl Task {
    /// Prefix of `num_fewshot` solved documents, skipping the one at `index`
    pub fn fewshot_prefix(&self, index: usize, num_fewshot: usize) -> String {
        if num_fewshot == 0 || self.kind == TaskKind::Rolling {
            return String::new();
        }

        let examples: Vec<String> = self
            .documents
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .take(num_fewshot)
            .map(|(_, doc)| doc.render_solved())
            .collect();

        if examples.is_empty() {
            return String::new();
        }

        format!(
            "{}{}",
            examples.join(FEWSHOT_DELIMITER),
            FEWSHOT_DELIMITER
        )
    }
}
