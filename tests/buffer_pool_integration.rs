//! Integration tests driving both components the way a buffer pool does.
//!
//! `MiniPool` is a stand-in for the pool manager: it owns the free list and
//! pin counts, keeps a `PageTable` and asks an `LruKReplacer` for victims.

mod common;

use bufcore::{FrameId, LruKReplacer, PageId, PageTable};
use common::init_tracing;

struct MiniPool {
    page_table: PageTable,
    replacer: LruKReplacer,
    free_list: Vec<FrameId>,
    /// Page and pin count per frame.
    frames: Vec<Option<(PageId, u32)>>,
}

impl MiniPool {
    fn new(pool_size: usize, k: usize) -> Self {
        Self {
            page_table: PageTable::new(2),
            replacer: LruKReplacer::new(pool_size, k),
            free_list: (0..pool_size).rev().map(FrameId::new).collect(),
            frames: vec![None; pool_size],
        }
    }

    /// Pin `page`, loading it if needed. `None` when every frame is pinned.
    fn fetch(&mut self, page: PageId) -> Option<FrameId> {
        if let Some(frame_id) = self.page_table.find(&page) {
            if let Some((_, pins)) = self.frames[frame_id.index()].as_mut() {
                *pins += 1;
            }
            self.replacer.record_access(frame_id);
            self.replacer.set_evictable(frame_id, false);
            return Some(frame_id);
        }

        let frame_id = match self.free_list.pop() {
            Some(frame_id) => frame_id,
            None => {
                let victim = self.replacer.evict()?;
                if let Some((old_page, _)) = self.frames[victim.index()].take() {
                    assert!(self.page_table.remove(&old_page));
                }
                victim
            }
        };

        self.frames[frame_id.index()] = Some((page, 1));
        self.page_table.insert(page, frame_id);
        self.replacer.record_access(frame_id);
        self.replacer.set_evictable(frame_id, false);
        Some(frame_id)
    }

    fn unpin(&mut self, page: PageId) {
        let Some(frame_id) = self.page_table.find(&page) else {
            return;
        };
        if let Some((_, pins)) = self.frames[frame_id.index()].as_mut() {
            *pins -= 1;
            if *pins == 0 {
                self.replacer.set_evictable(frame_id, true);
            }
        }
    }

    fn delete(&mut self, page: PageId) -> bool {
        let Some(frame_id) = self.page_table.find(&page) else {
            return false;
        };
        if matches!(self.frames[frame_id.index()], Some((_, pins)) if pins > 0) {
            return false;
        }
        self.replacer.remove(frame_id);
        self.page_table.remove(&page);
        self.frames[frame_id.index()] = None;
        self.free_list.push(frame_id);
        true
    }

    fn resident(&self, page: PageId) -> bool {
        self.page_table.contains(&page)
    }
}

fn pid(id: u32) -> PageId {
    PageId::new(id)
}

#[test]
fn test_fill_then_evict_coldest() {
    init_tracing();
    let mut pool = MiniPool::new(3, 2);

    for page in 0..3 {
        pool.fetch(pid(page)).unwrap();
        pool.unpin(pid(page));
    }
    // Page 0 is touched again and reaches K.
    pool.fetch(pid(0)).unwrap();
    pool.unpin(pid(0));

    // Loading page 3 evicts page 1, the oldest single-access page.
    pool.fetch(pid(3)).unwrap();
    assert!(!pool.resident(pid(1)));
    assert!(pool.resident(pid(0)));
    assert!(pool.resident(pid(2)));
    assert!(pool.resident(pid(3)));
}

#[test]
fn test_pinned_pages_block_eviction() {
    let mut pool = MiniPool::new(2, 2);

    pool.fetch(pid(10)).unwrap();
    pool.fetch(pid(11)).unwrap();
    assert_eq!(pool.fetch(pid(12)), None);

    pool.unpin(pid(11));
    let frame = pool.fetch(pid(12)).unwrap();
    assert_eq!(pool.page_table.find(&pid(12)), Some(frame));
    assert!(!pool.resident(pid(11)));
}

#[test]
fn test_delete_returns_frame_to_free_list() {
    let mut pool = MiniPool::new(2, 2);

    let frame = pool.fetch(pid(1)).unwrap();
    assert!(!pool.delete(pid(1)), "pinned page must not be deleted");

    pool.unpin(pid(1));
    assert!(pool.delete(pid(1)));
    assert_eq!(pool.replacer.access_count(frame), None);
    assert_eq!(pool.replacer.size(), 0);

    // The freed frame is reused before anything is evicted.
    assert_eq!(pool.fetch(pid(2)), Some(frame));
    assert_eq!(pool.replacer.stats().snapshot().evictions, 0);
}

#[test]
fn test_page_table_and_replacer_stay_in_step() {
    let mut pool = MiniPool::new(4, 2);

    for round in 0..20u32 {
        let page = pid(round % 7);
        pool.fetch(page).unwrap();
        pool.unpin(page);

        // Every resident page sits in a distinct, tracked frame.
        let mut frames: Vec<usize> = (0..7)
            .filter_map(|p| pool.page_table.find(&pid(p)))
            .map(|f| f.index())
            .collect();
        frames.sort_unstable();
        frames.dedup();
        assert_eq!(frames.len(), pool.page_table.len());
        for &f in &frames {
            assert!(pool.replacer.access_count(FrameId::new(f)).is_some());
        }
        assert_eq!(pool.replacer.size(), pool.page_table.len());
    }
}
