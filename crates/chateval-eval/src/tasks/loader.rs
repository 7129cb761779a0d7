//! Task loading from JSONL files
//!
//! A task named `arc_easy` lives in `<tasks_dir>/arc_easy.jsonl`, one
//! document per line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use super::{Task, TaskDocument};

const TASK_EXTENSION: &str = "jsonl";

/// Loader for benchmark tasks
#[derive(Debug, Clone)]
pub struct TaskLoader {
    /// Base directory for tasks
    tasks_dir: PathBuf,
}

impl TaskLoader {
    /// Create a new task loader with the given tasks directory
    pub fn new(tasks_dir: impl AsRef<Path>) -> Self {
        Self {
            tasks_dir: tasks_dir.as_ref().to_path_buf(),
        }
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }

    /// Names of all tasks in the directory, sorted
    pub fn available(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if !self.tasks_dir.exists() {
            return Ok(names);
        }

        for entry in WalkDir::new(&self.tasks_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if Self::is_task_file(path) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Load a single task by name
    pub fn load(&self, name: &str) -> Result<Task> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            bail!("Invalid task name: '{}'", name);
        }

        let path = self
            .tasks_dir
            .join(format!("{}.{}", name, TASK_EXTENSION));

        if !path.is_file() {
            let available = self.available().unwrap_or_default();
            bail!(
                "Task not found: {} (available in {}: {})",
                name,
                self.tasks_dir.display(),
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            );
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read task file: {}", path.display()))?;
        let documents = parse_documents(&content)
            .with_context(|| format!("Failed to parse task '{}'", name))?;

        let kind = match documents.first() {
            Some(doc) => doc.kind(),
            None => bail!("Task '{}' has no documents", name),
        };

        if let Some(position) = documents.iter().position(|d| d.kind() != kind) {
            bail!(
                "Task '{}' mixes document kinds: document {} is {}, expected {}",
                name,
                position + 1,
                documents[position].kind(),
                kind
            );
        }

        Ok(Task {
            name: name.to_string(),
            kind,
            documents,
        })
    }

    /// Check if a path is a task file
    fn is_task_file(path: &Path) -> bool {
        path.is_file() && path.extension().is_some_and(|ext| ext == TASK_EXTENSION)
    }
}

/// Parse JSONL content, skipping blank lines
fn parse_documents(content: &str) -> Result<Vec<TaskDocument>> {
    let mut documents = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let document: TaskDocument = serde_json::from_str(line)
            .with_context(|| format!("line {}: not a recognized task document", index + 1))?;
        document
            .validate()
            .with_context(|| format!("line {}", index + 1))?;
        documents.push(document);
    }

    Ok(documents)
}
