//! The demo flow: ingest, inspect retrieval, answer.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use futures::StreamExt;
use grounded_model::openai::{OpenAIClient, OpenAIConfig};
use grounded_rag::{
    DocumentStore, EmbeddingProvider, InMemoryVectorStore, OpenAIEmbeddingProvider,
    PgVectorConfig, PgVectorStore, PreparedPrompt, RagChain, RagConfig, Retriever, SearchResult,
    VectorStore,
};
use tracing::{info, warn};

use crate::cli::{Cli, StoreKind};
use crate::data::sample_documents;
use crate::settings::Settings;

/// Text embedded once at startup to check the embedding model answers.
const SMOKE_TEST_TEXT: &str = "Testing the embedding model";

/// Run the whole demo against the configured services, printing to stdout.
pub async fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let embedder = embedding_provider(settings)?;
    let vector = embedder.embed(SMOKE_TEST_TEXT).await.context("embedding smoke test failed")?;
    let embedder = sized_to_model(embedder, vector.len());
    info!(model = %settings.embedding_model, dimensions = vector.len(), "embedding model ready");
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);

    let vector_store = vector_store(cli.store, settings).await?;
    let store = Arc::new(
        DocumentStore::from_documents(
            &sample_documents(),
            embedder,
            vector_store,
            settings.collection.as_str(),
        )
        .await
        .context("failed to store sample documents")?,
    );

    let config = RagConfig::builder().top_k(cli.top_k).build()?;
    let model = OpenAIClient::new(openai_config(settings))?;
    let chain = RagChain::builder()
        .retriever(Retriever::new(store.clone(), config))
        .model(Arc::new(model))
        .build()?;

    let mut out = std::io::stdout();

    if cli.show_scores {
        let scored = store.similarity_search_with_score(&cli.query, cli.top_k).await?;
        write_scores(&scored, &mut out)?;
    }

    let prepared = chain.prepare(&cli.query).await?;
    write_retrieved(&prepared, &mut out)?;

    if cli.mode.invokes() {
        let answer = chain.answer(&cli.query).await?;
        writeln!(out, "{answer}")?;
    }

    if cli.mode.streams() {
        write_answer_stream(&chain, &cli.query, &mut out).await?;
    }

    Ok(())
}

/// Build the embedding provider described by `settings`.
pub fn embedding_provider(settings: &Settings) -> anyhow::Result<OpenAIEmbeddingProvider> {
    let mut provider = OpenAIEmbeddingProvider::new(settings.openai_api_key.as_str())?
        .with_model(settings.embedding_model.as_str());
    if let Some(base_url) = &settings.openai_base_url {
        provider = provider.with_base_url(base_url.as_str());
    }
    if let Some(dims) = settings.embedding_dimensions {
        provider = provider.with_reported_dimensions(dims);
    }
    Ok(provider)
}

/// Make `provider` report `observed` dimensions, the length of a vector the
/// model actually returned, so collections are created with the right size.
pub fn sized_to_model(
    provider: OpenAIEmbeddingProvider,
    observed: usize,
) -> OpenAIEmbeddingProvider {
    if provider.dimensions() == observed {
        return provider;
    }
    warn!(
        model = provider.model(),
        expected = provider.dimensions(),
        observed,
        "embedding size differs from the configured one; using the observed size"
    );
    provider.with_reported_dimensions(observed)
}

fn openai_config(settings: &Settings) -> OpenAIConfig {
    let config = OpenAIConfig::new(settings.openai_api_key.as_str(), settings.chat_model.as_str());
    match &settings.openai_base_url {
        Some(base_url) => config.with_base_url(base_url.as_str()),
        None => config,
    }
}

async fn vector_store(
    kind: StoreKind,
    settings: &Settings,
) -> anyhow::Result<Arc<dyn VectorStore>> {
    Ok(match kind {
        StoreKind::Memory => Arc::new(InMemoryVectorStore::new()),
        StoreKind::Pgvector => {
            let config = PgVectorConfig::new(settings.database_url.as_str());
            Arc::new(
                PgVectorStore::connect(&config).await.context("failed to connect to pgvector")?,
            )
        }
    })
}

/// Print `SIM: <score> <text>` per result.
pub fn write_scores(results: &[SearchResult], out: &mut impl Write) -> std::io::Result<()> {
    for result in results {
        writeln!(out, "SIM: {:.6} {}", result.score, result.document.text)?;
    }
    Ok(())
}

/// Print the text of each retrieved document, one per line.
pub fn write_retrieved(prepared: &PreparedPrompt, out: &mut impl Write) -> std::io::Result<()> {
    for document in &prepared.documents {
        writeln!(out, "{}", document.text)?;
    }
    Ok(())
}

/// Print answer chunks as they arrive, flushing after each one.
///
/// On a failure the chunks already printed stay printed and the error is
/// returned.
pub async fn write_answer_stream(
    chain: &RagChain,
    question: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut stream = chain.answer_stream(question);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        write!(out, "{chunk}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
