//! Seam to the external documentation generation service

use crate::block::BlockKind;

/// Style instructions sent alongside every request.
pub const STYLE_PROMPT: &str = "\
Generate documentation for functions and classes using Google Style Python.
Follow these formatting standards:
- Only use single quotation marks if needed.
- Do not respond with the triple quotation marks for the start and end of the docstring.
- Limit each line to the required number of characters requested below.
- Avoid any escaping characters such as slashes, or backslashes.
- Ensure no trailing spaces at the end of each line.
- If the object type is a module, describe its contents and its purpose.";

/// Everything the generation service needs to document one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    pub name: &'a str,
    pub kind: BlockKind,
    pub code_sample: &'a str,
    /// Maximum characters per line; 0 means unconstrained.
    pub max_line_length: usize,
    pub language: &'a str,
}

impl GenerationRequest<'_> {
    /// Render the user message for this request.
    pub fn prompt(&self) -> String {
        let limit = if self.max_line_length == 0 {
            "Lines have no length limit".to_string()
        } else {
            format!(
                "Each line should not exceed {} characters",
                self.max_line_length
            )
        };
        format!(
            "Write a docstring for a {language} {kind} named '{name}'.\n\
             {limit} for the following {kind}:\n\n{sample}",
            language = self.language,
            kind = self.kind,
            name = self.name,
            sample = self.code_sample,
        )
    }
}

/// Failure reported by a [`Generator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces documentation text for a code block.
///
/// Implementations are shared by every worker, hence `Send + Sync`.
pub trait Generator: Send + Sync {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError>;
}

impl<F> Generator for F
where
    F: Fn(&GenerationRequest<'_>) -> Result<String, GenerationError> + Send + Sync,
{
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(max_line_length: usize) -> GenerationRequest<'static> {
        GenerationRequest {
            name: "load",
            kind: BlockKind::Function,
            code_sample: "def load():\n    pass\n",
            max_line_length,
            language: "Python",
        }
    }

    #[test]
    fn prompt_names_block_and_limit() {
        let prompt = request(71).prompt();
        assert!(prompt.starts_with("Write a docstring for a Python function named 'load'."));
        assert!(prompt.contains("Each line should not exceed 71 characters"));
        assert!(prompt.ends_with("def load():\n    pass\n"));
    }

    #[test]
    fn prompt_for_unconstrained_module() {
        let prompt = request(0).prompt();
        assert!(prompt.contains("no length limit"));
    }

    #[test]
    fn closures_are_generators() {
        let generator =
            |req: &GenerationRequest<'_>| Ok::<_, GenerationError>(format!("Documents {}.", req.name));
        assert_eq!(generator.generate(&request(0)).unwrap(), "Documents load.");
    }
}
