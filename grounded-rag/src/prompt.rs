//! Prompt assembly from a template with `{question}` and `{context}` slots.

use std::fmt;

use crate::document::Document;
use crate::error::{RagError, Result};

/// The default question-answering template.
///
/// With no retrieved context the instruction to say "I don't know" still
/// applies; that policy lives in this text, not in code.
pub const DEFAULT_TEMPLATE: &str = concat!(
    "\n",
    "    You are an assistant for question-answering tasks. Use the following pieces of ",
    "retrieved context to answer the question. \n",
    "    If you don't know the answer, just say that you don't know. Use three sentences ",
    "maximum and keep the answer concise.\n",
    "\n",
    "    Question: {question} \n",
    "    Context: {context} \n",
    "    Answer:\n",
);

/// Separator placed between document texts in the context.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Question,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// A parsed prompt template with exactly the `{question}` and `{context}`
/// slots.
///
/// `{{` and `}}` produce literal braces. Substitution is single-pass, so
/// braces inside a question or a document are copied as-is.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_rag::PromptTemplate;
///
/// let template = PromptTemplate::from_template("Q: {question}\nC: {context}")?;
/// let prompt = template.assemble("What is on at the museum?", &documents);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PromptError`] for unbalanced braces, an unknown
    /// slot name, or a missing `{question}` or `{context}` slot.
    pub fn from_template(template: impl Into<String>) -> Result<Self> {
        let source = template.into();
        let segments = parse(&source)?;
        for (slot, name) in [(Slot::Question, "question"), (Slot::Context, "context")] {
            if !segments.contains(&Segment::Slot(slot)) {
                return Err(RagError::PromptError(format!("template has no {{{name}}} slot")));
            }
        }
        Ok(Self { source, segments })
    }

    /// Substitute `question` and `context` into the template.
    pub fn format(&self, question: &str, context: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + question.len() + context.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(Slot::Question) => out.push_str(question),
                Segment::Slot(Slot::Context) => out.push_str(context),
            }
        }
        out
    }

    /// Build the prompt for `question` grounded in `documents`, in order.
    pub fn assemble(&self, question: &str, documents: &[Document]) -> String {
        self.format(question, &format_documents(documents))
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: parse(DEFAULT_TEMPLATE).unwrap_or_default(),
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Join document texts with a blank line between them.
pub fn format_documents(documents: &[Document]) -> String {
    documents.iter().map(|d| d.text.as_str()).collect::<Vec<_>>().join(DOCUMENT_SEPARATOR)
}

fn parse(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(RagError::PromptError(format!(
                                "unclosed slot '{{{name}' in template"
                            )));
                        }
                        Some(ch) => name.push(ch),
                    }
                }
                let slot = match name.as_str() {
                    "question" => Slot::Question,
                    "context" => Slot::Context,
                    other => {
                        return Err(RagError::PromptError(format!("unknown slot '{{{other}}}'")));
                    }
                };
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot(slot));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => {
                return Err(RagError::PromptError("unmatched '}' in template".to_string()));
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
