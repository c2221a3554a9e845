use crate::error::Error;

/// Monotonic identity counter shared by the registry's collections.
///
/// The counter runs one past `u32::MAX` so that issuing the last id is
/// distinguishable from never issuing it.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    #[inline]
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Next auto id, `None` once every id has been issued
    #[inline]
    pub fn peek(&self) -> Option<u32> {
        u32::try_from(self.next).ok()
    }

    /// Picks the id for a new member without committing it.
    ///
    /// `in_use` reports whether an id is currently registered.
    pub fn propose(&self, explicit: Option<u32>, in_use: impl Fn(u32) -> bool) -> Result<u32, Error> {
        match explicit {
            Some(id) if in_use(id) => Err(Error::DuplicateId(id)),
            Some(id) => Ok(id),
            None => self.peek().ok_or(Error::IdsExhausted),
        }
    }

    /// Records `id` as issued, keeping the counter past every issued id.
    #[inline]
    pub fn commit(&mut self, id: u32) {
        self.next = self.next.max(id as u64 + 1);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
