// patterns.rs - Pattern table: lengths always, bytes on request.
//
// Lengths are enough to turn a match end into a match start, so the
// pattern bytes themselves can be thrown away once the trie is built.

/// Index of a pattern, equal to its position in the construction input.
pub type PatternID = usize;

/// When storage is left to the builder, patterns are kept until their total
/// size passes this many bytes.
pub(crate) const AUTO_STORE_LIMIT: usize = 4096;

#[derive(Debug, Clone)]
struct Stored {
    bytes: Vec<u8>,
    /// Offset of each pattern in `bytes`.
    starts: Vec<usize>,
}

/// Pattern lengths plus, optionally, the verbatim pattern bytes.
#[derive(Debug, Clone)]
pub(crate) struct PatternTable {
    lens: Vec<usize>,
    stored: Option<Stored>,
    all_utf8: bool,
    max_len: usize,
}

impl PatternTable {
    pub(crate) fn len(&self) -> usize {
        self.lens.len()
    }

    /// Length of pattern `pid`. Panics if `pid` is out of range.
    #[inline]
    pub(crate) fn pattern_len(&self, pid: PatternID) -> usize {
        self.lens[pid]
    }

    pub(crate) fn max_len(&self) -> usize {
        self.max_len
    }

    /// Whether every pattern is valid UTF-8.
    pub(crate) fn all_utf8(&self) -> bool {
        self.all_utf8
    }

    pub(crate) fn is_stored(&self) -> bool {
        self.stored.is_some()
    }

    pub(crate) fn get(&self, pid: PatternID) -> Option<&[u8]> {
        let stored = self.stored.as_ref()?;
        let start = *stored.starts.get(pid)?;
        Some(&stored.bytes[start..start + self.lens[pid]])
    }

    pub(crate) fn iter(&self) -> Option<Patterns<'_>> {
        if self.stored.is_none() {
            return None;
        }
        Some(Patterns {
            table: self,
            next: 0,
        })
    }

    pub(crate) fn memory_usage(&self) -> usize {
        let stored = self.stored.as_ref().map_or(0, |s| {
            s.bytes.capacity() + s.starts.capacity() * std::mem::size_of::<usize>()
        });
        self.lens.capacity() * std::mem::size_of::<usize>() + stored
    }
}

/// Incrementally fills a [`PatternTable`] while the patterns are consumed.
pub(crate) struct PatternTableBuilder {
    lens: Vec<usize>,
    stored: Option<Stored>,
    /// `None` means decide automatically by total size.
    store: Option<bool>,
    total: usize,
    all_utf8: bool,
    max_len: usize,
}

impl PatternTableBuilder {
    pub(crate) fn new(store: Option<bool>) -> Self {
        let stored = if store == Some(false) {
            None
        } else {
            Some(Stored {
                bytes: Vec::new(),
                starts: Vec::new(),
            })
        };
        PatternTableBuilder {
            lens: Vec::new(),
            stored,
            store,
            total: 0,
            all_utf8: true,
            max_len: 0,
        }
    }

    /// Record a pattern and return its index.
    pub(crate) fn push(&mut self, pattern: &[u8]) -> PatternID {
        let pid = self.lens.len();
        self.lens.push(pattern.len());
        self.total += pattern.len();
        self.max_len = self.max_len.max(pattern.len());
        if self.all_utf8 && std::str::from_utf8(pattern).is_err() {
            self.all_utf8 = false;
        }
        if self.store.is_none() && self.total > AUTO_STORE_LIMIT && self.stored.is_some() {
            log::trace!(
                "pattern bytes exceed {} bytes, not storing patterns",
                AUTO_STORE_LIMIT
            );
            self.stored = None;
        }
        if let Some(stored) = self.stored.as_mut() {
            stored.starts.push(stored.bytes.len());
            stored.bytes.extend_from_slice(pattern);
        }
        pid
    }

    pub(crate) fn finish(self) -> PatternTable {
        let mut lens = self.lens;
        lens.shrink_to_fit();
        let stored = self.stored.map(|mut s| {
            s.bytes.shrink_to_fit();
            s.starts.shrink_to_fit();
            s
        });
        PatternTable {
            lens,
            stored,
            all_utf8: self.all_utf8,
            max_len: self.max_len,
        }
    }
}

/// Iterator over the stored patterns of an automaton, in index order.
#[derive(Debug, Clone)]
pub struct Patterns<'a> {
    table: &'a PatternTable,
    next: PatternID,
}

impl<'a> Iterator for Patterns<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let pattern = self.table.get(self.next)?;
        self.next += 1;
        Some(pattern)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Patterns<'_> {}
