use std::collections::BTreeMap;

use crate::{CandidateId, SlotId};

/// 枠 → 選ばれた候補
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selections {
    table: BTreeMap<SlotId, CandidateId>,
}

impl Selections {
    /// すでに選択があれば置き換えて、以前の候補を返します
    pub fn select(&mut self, slot: SlotId, id: CandidateId) -> Option<CandidateId> {
        self.table.insert(slot, id)
    }

    /// 未選択に戻します。他の枠での候補の復活は次の計算で反映される
    pub fn clear(&mut self, slot: SlotId) -> Option<CandidateId> {
        self.table.remove(&slot)
    }

    pub fn get(&self, slot: SlotId) -> Option<&CandidateId> {
        self.table.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotId, &CandidateId)> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FromIterator<(SlotId, CandidateId)> for Selections {
    fn from_iter<T: IntoIterator<Item = (SlotId, CandidateId)>>(iter: T) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}
