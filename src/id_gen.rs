/// Allocates the small dense integers used as rule ids.
///
/// A dissolved rule's id goes back on a free stack and is handed out again
/// before the allocator mints a fresh one, so a grammar that churns through
/// many short-lived rules never runs its id space ahead of its actual rule
/// count.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    free_ids: Vec<u32>,
    high_water_mark: u32,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns an id not currently held by any live rule: the most recently
    /// freed one if there is one, otherwise the next unused integer.
    pub(crate) fn acquire(&mut self) -> u32 {
        match self.free_ids.pop() {
            Some(reused) => reused,
            None => self.mint(),
        }
    }

    /// Returns `id` to the free stack for reuse. Panics if `id` was never
    /// handed out by `acquire` — that would mean a caller is confusing two
    /// unrelated ids.
    pub(crate) fn release(&mut self, id: u32) {
        assert!(
            id < self.high_water_mark,
            "id {id} was released but never acquired"
        );
        self.free_ids.push(id);
    }

    fn mint(&mut self) -> u32 {
        let id = self.high_water_mark;
        self.high_water_mark += 1;
        id
    }
}
