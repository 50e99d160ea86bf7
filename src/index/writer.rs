//! Incremental construction of the sentence index.

use ahash::AHashMap;
use log::info;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::corpus::{CorpusDocument, TokenizedSentence};
use crate::error::{AlaudaError, Result};
use crate::index::{DocId, PostingsList, SentenceIndex};

/// Writer building a [`SentenceIndex`].
///
/// Documents can be added one at a time or in bulk; the writer hands out
/// document ids in insertion order. Freezing consumes the writer, so no
/// queries can observe a half-built index: only the frozen
/// [`SentenceIndex`] can be searched.
#[derive(Debug, Default)]
pub struct IndexWriter {
    state: Mutex<WriterState>,
}

#[derive(Debug, Default)]
struct WriterState {
    terms: AHashMap<String, PostingsList>,
    docs: Vec<CorpusDocument>,
}

impl IndexWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        IndexWriter::default()
    }

    /// Add one document, returning its assigned id.
    pub fn add(&self, document: CorpusDocument) -> Result<DocId> {
        let terms = extract_terms(&document.sentence)?;
        let mut state = self.state.lock();
        state.insert(document, terms)
    }

    /// Add documents in bulk, returning their assigned ids.
    ///
    /// Term extraction runs in parallel; the merge is sequential, so ids
    /// follow input order. A malformed document aborts the whole batch
    /// without touching the writer.
    pub fn add_all(&self, documents: Vec<CorpusDocument>) -> Result<Vec<DocId>> {
        let analyzed: Vec<(CorpusDocument, Vec<(String, u32)>)> = documents
            .into_par_iter()
            .map(|document| {
                let terms = extract_terms(&document.sentence)?;
                Ok((document, terms))
            })
            .collect::<Result<_>>()?;

        let mut state = self.state.lock();
        analyzed
            .into_iter()
            .map(|(document, terms)| state.insert(document, terms))
            .collect()
    }

    /// Number of documents added so far.
    pub fn doc_count(&self) -> usize {
        self.state.lock().docs.len()
    }

    /// Freeze the writer into a read-only index.
    pub fn freeze(self) -> SentenceIndex {
        let state = self.state.into_inner();
        info!(
            "froze sentence index: {} documents, {} terms",
            state.docs.len(),
            state.terms.len()
        );
        SentenceIndex::from_parts(state.terms, state.docs)
    }
}

impl WriterState {
    fn insert(&mut self, document: CorpusDocument, terms: Vec<(String, u32)>) -> Result<DocId> {
        let doc_id: DocId = self
            .docs
            .len()
            .try_into()
            .map_err(|_| AlaudaError::index("document count exceeds u32::MAX"))?;
        for (term, position) in terms {
            self.terms.entry(term).or_default().push(doc_id, position);
        }
        self.docs.push(document);
        Ok(doc_id)
    }
}

/// Lowercased terms of a sentence with their token ordinals.
///
/// The ordinal counts indexed tokens only, so terms of adjacent words stay
/// adjacent even for tokenizers that emit whitespace tokens. Tokens whose
/// offsets do not line up with the sentence text are rejected: a document
/// that cannot be indexed faithfully aborts the build.
fn extract_terms(sentence: &TokenizedSentence) -> Result<Vec<(String, u32)>> {
    let mut terms = Vec::with_capacity(sentence.tokens.len());
    let mut ordinal: u32 = 0;
    for token in &sentence.tokens {
        if token.start > token.end || token.end > sentence.text.len() {
            return Err(AlaudaError::index(format!(
                "token `{}` offsets {}..{} out of range for sentence of {} bytes",
                token.text,
                token.start,
                token.end,
                sentence.text.len()
            )));
        }
        if token.text.trim().is_empty() {
            continue;
        }
        terms.push((token.text.to_lowercase(), ordinal));
        ordinal += 1;
    }
    Ok(terms)
}
