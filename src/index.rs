//! Inverted index over a sentence corpus.
//!
//! The index maps lowercased token terms to postings (document id plus the
//! token ordinals where the term occurs) and keeps the original documents
//! in an arena addressed by document id, so candidates found through the
//! postings can be handed back to the verifier as full tokenized
//! sentences.
//!
//! Construction goes through [`IndexWriter`]; freezing the writer yields a
//! read-only [`SentenceIndex`] that is safe to share across concurrent
//! searches.

pub mod writer;

use ahash::AHashMap;

use crate::corpus::CorpusDocument;

pub use writer::IndexWriter;

/// Identifier of a document inside one index, assigned in insertion order
/// starting at zero.
pub type DocId = u32;

/// Term occurrences within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// The document the term occurs in.
    pub doc_id: DocId,
    /// Token ordinals of the occurrences, ascending.
    pub positions: Vec<u32>,
}

/// All postings for one term, ordered by ascending document id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingsList {
    entries: Vec<Posting>,
}

impl PostingsList {
    /// The posting for `doc_id`, if the term occurs in that document.
    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.entries
            .binary_search_by_key(&doc_id, |posting| posting.doc_id)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Whether the term occurs in `doc_id`.
    pub fn contains(&self, doc_id: DocId) -> bool {
        self.get(doc_id).is_some()
    }

    /// Number of documents the term occurs in.
    pub fn doc_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the postings in ascending document order.
    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.entries.iter()
    }

    /// Record an occurrence. Documents must be appended in ascending order
    /// and positions in ascending order within a document, which insertion
    /// order guarantees.
    pub(crate) fn push(&mut self, doc_id: DocId, position: u32) {
        match self.entries.last_mut() {
            Some(last) if last.doc_id == doc_id => last.positions.push(position),
            _ => self.entries.push(Posting {
                doc_id,
                positions: vec![position],
            }),
        }
    }
}

/// A frozen inverted index over a sentence corpus.
///
/// Read-only once built: term lookups and postings iteration are
/// deterministic and stable for the index's lifetime, and the index is
/// safe for concurrent use without locking. Postings hold document ids
/// into the arena, never references into it.
#[derive(Debug)]
pub struct SentenceIndex {
    terms: AHashMap<String, PostingsList>,
    docs: Vec<CorpusDocument>,
}

impl SentenceIndex {
    /// Build an index over `documents` in one shot.
    ///
    /// Term extraction runs in parallel across the input documents; the
    /// merge is sequential, so document ids follow input order. An empty
    /// input yields a valid empty index.
    pub fn build(documents: Vec<CorpusDocument>) -> crate::error::Result<Self> {
        let writer = IndexWriter::new();
        writer.add_all(documents)?;
        Ok(writer.freeze())
    }

    pub(crate) fn from_parts(terms: AHashMap<String, PostingsList>, docs: Vec<CorpusDocument>) -> Self {
        SentenceIndex { terms, docs }
    }

    /// Postings for a term, or `None` when the term never occurs.
    /// Terms are stored lowercased; callers pass lowercased terms.
    pub fn postings(&self, term: &str) -> Option<&PostingsList> {
        self.terms.get(term)
    }

    /// The document stored under `doc_id`.
    pub fn document(&self, doc_id: DocId) -> Option<&CorpusDocument> {
        self.docs.get(doc_id as usize)
    }

    /// Number of documents in the index.
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Number of distinct terms in the index.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
