//! Tests for prompt assembly.

use grounded_rag::{DEFAULT_TEMPLATE, Document, PromptTemplate, format_documents};

const QUESTION: &str = "Tell me something about the exhibit";

#[test]
fn empty_context_keeps_question_and_dont_know_instruction() {
    let prompt = PromptTemplate::default().assemble(QUESTION, &[]);

    assert!(prompt.contains(QUESTION));
    assert!(prompt.contains("If you don't know the answer, just say that you don't know."));
    assert!(prompt.contains("Context:  \n"));
}

#[test]
fn context_is_texts_joined_by_blank_lines() {
    let d1 = Document::new("5", "the new art exhibit is fascinating");
    let d2 = Document::new("6", "a sculpture exhibit is also at the museum");

    let template = PromptTemplate::from_template("{question}|{context}").unwrap();
    let prompt = template.assemble(QUESTION, &[d1.clone(), d2.clone()]);
    let (question, context) = prompt.split_once('|').unwrap();

    assert_eq!(question, QUESTION);
    assert_eq!(context, format!("{}\n\n{}", d1.text, d2.text));
}

#[test]
fn default_template_matches_reference_layout() {
    let documents = [
        Document::new("5", "the new art exhibit is fascinating"),
        Document::new("6", "a sculpture exhibit is also at the museum"),
    ];
    let prompt = PromptTemplate::default().assemble(QUESTION, &documents);

    let expected = "\n    You are an assistant for question-answering tasks. Use the following \
pieces of retrieved context to answer the question. \n    If you don't know the answer, just say \
that you don't know. Use three sentences maximum and keep the answer concise.\n\n    Question: \
Tell me something about the exhibit \n    Context: the new art exhibit is fascinating\n\na \
sculpture exhibit is also at the museum \n    Answer:\n";
    assert_eq!(prompt, expected);
}

#[test]
fn document_order_is_preserved() {
    let documents = [Document::new("b", "second"), Document::new("a", "first")];
    assert_eq!(format_documents(&documents), "second\n\nfirst");
    assert_eq!(format_documents(&documents[..1]), "second");
}

#[test]
fn assembly_is_deterministic() {
    let template = PromptTemplate::from_template(DEFAULT_TEMPLATE).unwrap();
    let documents = [Document::new("1", "there are cats in the pond")];
    assert_eq!(template.assemble("cats?", &documents), template.assemble("cats?", &documents));
    assert_eq!(template.to_string(), DEFAULT_TEMPLATE);
}
