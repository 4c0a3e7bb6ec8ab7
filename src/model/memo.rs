/// A single-slot cache: holds the value computed for the last key and
/// recomputes only when asked for a different key.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        let stale = !matches!(&self.slot, Some((cached, _)) if *cached == key);
        if stale {
            self.slot = None;
        }
        let (_, value) = self.slot.get_or_insert_with(|| {
            let value = compute(&key);
            (key, value)
        });
        value
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputes_only_on_key_change() {
        let mut memo = Memo::new();
        let mut calls = 0;
        let mut last = 0;
        for key in [1, 1, 2, 2, 1] {
            last = *memo.get_or_compute(key, |k| {
                calls += 1;
                k * 10
            });
        }
        assert_eq!(calls, 3);
        assert_eq!(last, 10);
    }

    #[test]
    fn clear_forces_recompute() {
        let mut memo = Memo::new();
        memo.get_or_compute("a", |_| 1);
        assert_eq!(*memo.get_or_compute("a", |_| 2), 1);
        memo.clear();
        assert_eq!(*memo.get_or_compute("a", |_| 2), 2);
    }
}
