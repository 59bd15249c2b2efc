//! Enhancement kinds and the instruction template each one renders.

use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

const GENERAL_TEMPLATE: &str = "Rewrite this text to be clear and professional. Do not include any explanations, options, or additional text. Return only the rewritten version:\n\n\"{{ task_text }}\"";
const SPEC_TEMPLATE: &str = "As a product manager, convert this into a technical specification with requirements and acceptance criteria. Return only the specification, no explanations:\n\n\"{{ task_text }}\"";
const BUG_TEMPLATE: &str = "As an IT specialist, format this as a bug report with steps to reproduce, expected vs actual behavior. Return only the bug report, no explanations:\n\n\"{{ task_text }}\"";
const PROMPT_TEMPLATE: &str = "Convert this into an optimized AI prompt. Return only the prompt, no explanations:\n\n\"{{ task_text }}\"";

/// The kind of rewrite requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementKind {
    /// Clarity and grammar rewrite.
    #[default]
    General,
    /// Technical specification with requirements and acceptance criteria.
    Spec,
    /// Bug report with reproduction steps and expected vs actual behaviour.
    Bug,
    /// Optimized instruction for a generative model.
    Prompt,
}

impl EnhancementKind {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Spec => "spec",
            Self::Bug => "bug",
            Self::Prompt => "prompt",
        }
    }

    /// Parses a wire value; anything unrecognised is [`Self::General`].
    #[must_use]
    pub fn parse_or_general(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "spec" => Self::Spec,
            "bug" => Self::Bug,
            "prompt" => Self::Prompt,
            _ => Self::General,
        }
    }

    const fn template(self) -> &'static str {
        match self {
            Self::General => GENERAL_TEMPLATE,
            Self::Spec => SPEC_TEMPLATE,
            Self::Bug => BUG_TEMPLATE,
            Self::Prompt => PROMPT_TEMPLATE,
        }
    }

    /// Renders the provider instruction with the task text embedded.
    ///
    /// # Errors
    ///
    /// Returns the template engine error if rendering fails.
    pub fn render_instruction(self, task_text: &str) -> Result<String, minijinja::Error> {
        Environment::new().render_str(self.template(), context! { task_text => task_text })
    }
}
