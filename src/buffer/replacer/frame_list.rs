//! Intrusive recency list over frame slots.
//!
//! Links live in a slice indexed by frame slot, shared by every list that
//! threads through it. A frame belongs to at most one list at a time, so a
//! single `Link` per slot is enough, and unlinking or pushing a frame is O(1)
//! without touching any other frame's position.

/// Neighbours of one slot. Both `None` when the slot is in no list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Link {
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly-linked list ordered most-recent first.
#[derive(Debug, Default)]
pub(crate) struct FrameList {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl FrameList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Link `slot` in as the most recent entry.
    ///
    /// `slot` must not currently be in any list.
    pub(crate) fn push_front(&mut self, links: &mut [Link], slot: usize) {
        debug_assert_eq!(links[slot], Link::default(), "slot {slot} already linked");

        links[slot] = Link {
            prev: None,
            next: self.head,
        };
        match self.head {
            Some(old_head) => links[old_head].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;
    }

    /// Detach `slot` from this list. `slot` must be a member.
    pub(crate) fn unlink(&mut self, links: &mut [Link], slot: usize) {
        let Link { prev, next } = links[slot];

        match prev {
            Some(p) => links[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => links[n].prev = prev,
            None => self.tail = prev,
        }

        links[slot] = Link::default();
        self.len -= 1;
    }

    /// Walk from least recent to most recent.
    pub(crate) fn iter_lru<'a>(&self, links: &'a [Link]) -> Walk<'a> {
        Walk {
            links,
            cursor: self.tail,
            backwards: true,
        }
    }

    /// Walk from most recent to least recent.
    #[cfg(test)]
    pub(crate) fn iter_mru<'a>(&self, links: &'a [Link]) -> Walk<'a> {
        Walk {
            links,
            cursor: self.head,
            backwards: false,
        }
    }
}

/// Iterator over the slots of a [`FrameList`].
pub(crate) struct Walk<'a> {
    links: &'a [Link],
    cursor: Option<usize>,
    backwards: bool,
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let slot = self.cursor?;
        let link = self.links[slot];
        self.cursor = if self.backwards { link.prev } else { link.next };
        Some(slot)
    }
}
