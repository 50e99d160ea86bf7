//! Deadline-bounded candidate retrieval from the frozen index.

use crate::index::{DocId, PostingsList, SentenceIndex};
use crate::query::Query;
use crate::search::deadline::Deadline;

/// Raw candidates plus scan metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieval {
    /// Candidate document ids, ascending.
    pub candidates: Vec<DocId>,
    /// How many documents were actually inspected. Equals the corpus size
    /// unless the scan was cut short.
    pub scanned: usize,
    /// Whether the scan stopped early because the deadline passed.
    pub time_limited: bool,
}

/// Run `query` against `index`, sweeping document ids in ascending order.
///
/// The deadline is polled every `check_interval` documents; on expiry the
/// scan stops, keeps the candidates accumulated so far, and reports
/// `time_limited`. A timeout is a normal, reportable outcome, not an
/// error. Because the sweep is a strict prefix of the document id space,
/// shrinking the deadline can only shrink the candidate set.
pub fn retrieve(
    index: &SentenceIndex,
    query: &Query,
    deadline: &Deadline,
    check_interval: usize,
) -> Retrieval {
    let check_interval = check_interval.max(1);
    let test = CandidateTest::prepare(index, query);

    let mut candidates = Vec::new();
    let mut scanned = 0usize;
    let mut time_limited = false;

    for doc_id in 0..index.doc_count() as DocId {
        if scanned % check_interval == 0 && deadline.expired() {
            time_limited = true;
            break;
        }
        if test.matches(doc_id) {
            candidates.push(doc_id);
        }
        scanned += 1;
    }

    Retrieval {
        candidates,
        scanned,
        time_limited,
    }
}

/// Per-document membership test, resolved from the query once per scan.
enum CandidateTest<'a> {
    /// Phrase over the terms' postings; `None` entries are terms absent
    /// from the index, which no document can satisfy.
    Phrase(Vec<Option<&'a PostingsList>>),
    /// Conjunction over the terms' postings.
    Conjunction(Vec<Option<&'a PostingsList>>),
    All,
}

impl<'a> CandidateTest<'a> {
    fn prepare(index: &'a SentenceIndex, query: &Query) -> Self {
        let lookup = |terms: &[String]| -> Vec<Option<&'a PostingsList>> {
            terms.iter().map(|term| index.postings(term)).collect()
        };
        match query {
            Query::Phrase(terms) => CandidateTest::Phrase(lookup(terms)),
            Query::Conjunction(terms) => CandidateTest::Conjunction(lookup(terms)),
            Query::MatchAll => CandidateTest::All,
        }
    }

    fn matches(&self, doc_id: DocId) -> bool {
        match self {
            CandidateTest::Phrase(lists) => phrase_matches(lists, doc_id),
            CandidateTest::Conjunction(lists) => lists
                .iter()
                .all(|list| list.is_some_and(|list| list.contains(doc_id))),
            CandidateTest::All => true,
        }
    }
}

/// Whether the document contains the phrase terms at adjacent, ordered
/// positions: some position `p` of the first term with term `i` occurring
/// at `p + i` for every following term.
fn phrase_matches(lists: &[Option<&PostingsList>], doc_id: DocId) -> bool {
    let mut postings = Vec::with_capacity(lists.len());
    for list in lists {
        match list.and_then(|list| list.get(doc_id)) {
            Some(posting) => postings.push(posting),
            None => return false,
        }
    }
    let Some((first, rest)) = postings.split_first() else {
        return false;
    };
    first.positions.iter().any(|&start| {
        rest.iter().enumerate().all(|(index, posting)| {
            let wanted = start + 1 + index as u32;
            posting.positions.binary_search(&wanted).is_ok()
        })
    })
}
