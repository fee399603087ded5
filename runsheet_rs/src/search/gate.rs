use std::collections::HashMap;
use std::hash::Hash;

/// 検索を投げたときに発行される整理券
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket<K> {
    key: K,
    generation: u64,
}

impl<K> SearchTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// キーごとの世代番号。新しい整理券を出すと古い整理券は無効になる
#[derive(Debug)]
pub struct SearchGate<K> {
    generations: HashMap<K, u64>,
}

impl<K> Default for SearchGate<K> {
    fn default() -> Self {
        Self {
            generations: HashMap::new(),
        }
    }
}

impl<K> SearchGate<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, key: K) -> SearchTicket<K> {
        let generation = self.generations.entry(key.clone()).or_insert(0);
        *generation += 1;
        SearchTicket {
            key,
            generation: *generation,
        }
    }

    /// 同じキーでこれより新しい整理券が出ていなければ true
    pub fn is_current(&self, ticket: &SearchTicket<K>) -> bool {
        self.generations.get(&ticket.key) == Some(&ticket.generation)
    }

    /// 発行済みの整理券をすべて無効にします
    pub fn invalidate(&mut self, key: &K) {
        if let Some(generation) = self.generations.get_mut(key) {
            *generation += 1;
        }
    }

    pub fn invalidate_all(&mut self) {
        for generation in self.generations.values_mut() {
            *generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchGate;

    #[test]
    fn simple() {
        let mut gate = SearchGate::new();
        let first = gate.issue("praise");
        assert!(gate.is_current(&first));

        let second = gate.issue("praise");
        assert!(!gate.is_current(&first));
        assert!(gate.is_current(&second));
        assert!(second.generation() > first.generation());
    }

    // キーが違えば互いに影響しない
    #[test]
    fn independent_keys() {
        let mut gate = SearchGate::new();
        let praise = gate.issue("praise");
        let worship = gate.issue("worship");
        let _ = gate.issue("worship");

        assert!(gate.is_current(&praise));
        assert!(!gate.is_current(&worship));
        assert_eq!(*praise.key(), "praise");
    }

    #[test]
    fn invalidate() {
        let mut gate = SearchGate::new();
        let praise = gate.issue("praise");
        let worship = gate.issue("worship");

        gate.invalidate(&"praise");
        assert!(!gate.is_current(&praise));
        assert!(gate.is_current(&worship));

        gate.invalidate_all();
        assert!(!gate.is_current(&worship));

        // 未発行のキーは何もしない
        gate.invalidate(&"revival");
        let revival = gate.issue("revival");
        assert!(gate.is_current(&revival));
    }
}
