//! The demo document set: ten short neighbourhood notes.

use grounded_rag::Document;

const NOTES: [(&str, &str, &str); 10] = [
    ("there are cats in the pond", "pond", "animals"),
    ("ducks are also found in the pond", "pond", "animals"),
    ("fresh apples are available at the market", "market", "food"),
    ("the market also sells fresh oranges", "market", "food"),
    ("the new art exhibit is fascinating", "museum", "art"),
    ("a sculpture exhibit is also at the museum", "museum", "art"),
    ("a new coffee shop opened on Main Street", "Main Street", "food"),
    ("the book club meets at the library", "library", "reading"),
    ("the library hosts a weekly story time for kids", "library", "reading"),
    (
        "a cooking class for beginners is offered at the community center",
        "community center",
        "classes",
    ),
];

/// Build the sample documents, ids `"1"` through `"10"`.
pub fn sample_documents() -> Vec<Document> {
    NOTES
        .iter()
        .zip(1i64..)
        .map(|(&(text, location, topic), id)| {
            Document::new(id.to_string(), text)
                .with_metadata("id", id)
                .with_metadata("location", location)
                .with_metadata("topic", topic)
        })
        .collect()
}
