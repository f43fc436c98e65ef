//! A mock array runtime that counts reference activity.

use std::cell::Cell;
use std::rc::Rc;

use cairn::{ArrayError, ArrayRuntime, Schema};

#[derive(Debug, Default)]
struct Counters {
    materialized: Cell<usize>,
    released: Cell<usize>,
    live: Cell<usize>,
    fail_next: Cell<bool>,
}

/// Snapshot of a [`CountingRuntime`]'s activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Buffers materialized into arrays.
    pub materialized: usize,
    /// Array references released (dropped).
    pub released: usize,
    /// Array references currently live.
    pub live: usize,
}

/// Mock [`ArrayRuntime`] backed by shared counters.
///
/// Clones share the same counters, so a test can keep one clone as a probe
/// while a handle consumes the other. Single-threaded by design, matching
/// the conversion model.
#[derive(Clone, Debug)]
pub struct CountingRuntime {
    counters: Rc<Counters>,
}

impl CountingRuntime {
    /// A fresh runtime with zeroed counters.
    pub fn new() -> Self {
        Self {
            counters: Rc::new(Counters::default()),
        }
    }

    /// Copy out the current counters.
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            materialized: self.counters.materialized.get(),
            released: self.counters.released.get(),
            live: self.counters.live.get(),
        }
    }

    /// Make the next `materialize` call fail.
    pub fn fail_next_materialize(&self) {
        self.counters.fail_next.set(true);
    }

    /// Mint a standalone array reference, as if created by external code.
    pub fn external_array(&self) -> MockArray {
        self.mint(true, 0)
    }

    /// Mint an object that fails the array check, for rejection tests.
    pub fn non_array(&self) -> MockArray {
        self.mint(false, 0)
    }

    fn mint(&self, array_like: bool, aliased: usize) -> MockArray {
        self.counters.live.set(self.counters.live.get() + 1);
        MockArray {
            counters: Rc::clone(&self.counters),
            array_like,
            aliased,
        }
    }
}

impl Default for CountingRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayRuntime for CountingRuntime {
    type Array = MockArray;

    fn materialize(&self, schema: &Schema, data: &mut [u8]) -> Result<MockArray, ArrayError> {
        if self.counters.fail_next.replace(false) {
            return Err(ArrayError::Materialize {
                reason: "injected materialize failure".into(),
            });
        }
        if schema.row_stride() != 0 && data.len() % schema.row_stride() != 0 {
            return Err(ArrayError::Materialize {
                reason: format!(
                    "buffer length {} is not a multiple of row stride {}",
                    data.len(),
                    schema.row_stride()
                ),
            });
        }
        self.counters
            .materialized
            .set(self.counters.materialized.get() + 1);
        Ok(self.mint(true, data.len()))
    }

    fn is_array(&self, candidate: &MockArray) -> bool {
        candidate.array_like
    }

    fn retain(&self, array: &MockArray) -> MockArray {
        self.mint(array.array_like, array.aliased)
    }
}

/// A mock array reference. Dropping it releases the reference in the shared
/// counters.
#[derive(Debug)]
pub struct MockArray {
    counters: Rc<Counters>,
    array_like: bool,
    aliased: usize,
}

impl MockArray {
    /// Bytes of packed buffer this array aliases (0 for external arrays).
    pub fn aliased_len(&self) -> usize {
        self.aliased
    }
}

impl Drop for MockArray {
    fn drop(&mut self) {
        self.counters.released.set(self.counters.released.get() + 1);
        self.counters.live.set(self.counters.live.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn::{DimKind, Dimension};

    #[test]
    fn retain_and_drop_balance() {
        let runtime = CountingRuntime::new();
        let a = runtime.external_array();
        let b = runtime.retain(&a);
        assert_eq!(runtime.stats().live, 2);
        drop(a);
        drop(b);
        assert_eq!(runtime.stats().live, 0);
        assert_eq!(runtime.stats().released, 2);
    }

    #[test]
    fn materialize_rejects_ragged_buffers() {
        let runtime = CountingRuntime::new();
        let dims = vec![Dimension::new(0u32, "X", DimKind::Floating, 8)];
        let schema = Schema::from_dims(&dims).unwrap();
        let mut data = vec![0u8; 12];
        assert!(matches!(
            runtime.materialize(&schema, &mut data),
            Err(ArrayError::Materialize { .. })
        ));
        assert_eq!(runtime.stats().materialized, 0);
    }
}
