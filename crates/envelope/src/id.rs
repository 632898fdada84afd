use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Supplies identifiers for newly constructed envelopes.
pub trait IdSource {
    fn next_id(&self) -> Uuid;
}

/// Random v4 identifiers. Used unless another source is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic identifiers counting up from a starting value.
///
/// Zero is skipped so the nil UUID is never handed out.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start.max(1)),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::Relaxed)))
    }
}

impl<F> IdSource for F
where
    F: Fn() -> Uuid,
{
    fn next_id(&self) -> Uuid {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), Uuid::from_u128(1));
        assert_eq!(ids.next_id(), Uuid::from_u128(2));
    }

    #[test]
    fn test_random_ids_are_not_reused() {
        let ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_closure_as_source() {
        let fixed = Uuid::from_u128(42);
        let source = move || fixed;
        assert_eq!(source.next_id(), fixed);
    }
}
