use std::collections::HashSet;

use itertools::Itertools;

use super::filter_decorators::{
    CategoryDecorator, ConflictDecorator, FilterOperation, IFilterDecorator, PassThrough,
    SelectedDecorator,
};
use super::Selections;
use crate::{Candidate, CandidateId, Roster, SlotId};

/// 別枠との重複を何で判定するか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictKey {
    /// 表示名が同じなら同一人物とみなす。同名の別人も弾かれる
    #[default]
    Name,

    /// 名簿上の id で判定する
    Id,
}

/// 同じグループ内で同一人物が割り当てられている枠の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub first: SlotId,
    pub second: SlotId,
    pub name: String,
}

/// 枠ひとつぶんの判定に使う情報
pub struct ResolveContext<'a> {
    slot: SlotId,
    selected: Option<&'a CandidateId>,
    conflict_key: ConflictKey,

    // 同じグループの別枠で選ばれている人のキー
    blocked: HashSet<String>,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(
        slot: SlotId,
        selected: Option<&'a CandidateId>,
        conflict_key: ConflictKey,
        blocked: HashSet<String>,
    ) -> Self {
        Self {
            slot,
            selected,
            conflict_key,
            blocked,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn selected(&self) -> Option<&CandidateId> {
        self.selected
    }

    pub fn is_blocked(&self, candidate: &Candidate) -> bool {
        self.blocked
            .contains(conflict_key_of(self.conflict_key, candidate))
    }
}

fn conflict_key_of(conflict_key: ConflictKey, candidate: &Candidate) -> &str {
    match conflict_key {
        ConflictKey::Name => candidate.name(),
        ConflictKey::Id => candidate.id().as_str(),
    }
}

/// 各枠の選択肢に出してよい候補を求めます
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentResolver {
    conflict_key: ConflictKey,
}

impl AssignmentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conflict_key(conflict_key: ConflictKey) -> Self {
        Self { conflict_key }
    }

    pub fn conflict_key(&self) -> ConflictKey {
        self.conflict_key
    }

    /// 枠に選べる候補の一覧。空でもエラーにはしない
    pub fn eligible<'a>(
        &self,
        slot: SlotId,
        roster: &'a Roster,
        selections: &Selections,
    ) -> Vec<&'a Candidate> {
        let context = self.create_context(slot, roster, selections);

        // 内側から順に評価される
        let decorator = PassThrough;
        let decorator = SelectedDecorator::new(decorator);
        let decorator = CategoryDecorator::new(decorator);
        let decorator = ConflictDecorator::new(decorator);

        let candidates = roster
            .pool(slot)
            .iter()
            .filter(|candidate| decorator.invoke(candidate, &context) != FilterOperation::Exclude);

        if slot.is_sorted_by_name() {
            candidates
                .sorted_by_key(|candidate| candidate.name().to_lowercase())
                .collect()
        } else {
            candidates.collect()
        }
    }

    pub fn is_eligible(
        &self,
        slot: SlotId,
        id: &CandidateId,
        roster: &Roster,
        selections: &Selections,
    ) -> bool {
        self.eligible(slot, roster, selections)
            .iter()
            .any(|candidate| candidate.id() == id)
    }

    /// `candidate` と重複している同グループの別枠
    pub fn conflicting_slot(
        &self,
        slot: SlotId,
        candidate: &Candidate,
        roster: &Roster,
        selections: &Selections,
    ) -> Option<SlotId> {
        let key = conflict_key_of(self.conflict_key, candidate);
        self.iter_group_selections(slot, roster, selections)
            .find(|(_, other)| conflict_key_of(self.conflict_key, other) == key)
            .map(|(other_slot, _)| other_slot)
    }

    /// 選択全体を検査して重複している枠の組を列挙します
    pub fn conflicts(&self, roster: &Roster, selections: &Selections) -> Vec<Conflict> {
        let resolved: Vec<(SlotId, &Candidate)> = selections
            .iter()
            .filter_map(|(slot, id)| {
                roster
                    .find(slot.roster_kind(), id)
                    .map(|candidate| (*slot, candidate))
            })
            .collect();

        resolved
            .iter()
            .tuple_combinations()
            .filter(|((first, _), (second, _))| {
                first.group().is_some() && first.group() == second.group()
            })
            .filter(|((_, a), (_, b))| {
                conflict_key_of(self.conflict_key, a) == conflict_key_of(self.conflict_key, b)
            })
            .map(|((first, a), (second, _))| Conflict {
                first: *first,
                second: *second,
                name: a.name().to_string(),
            })
            .collect()
    }

    fn create_context<'a>(
        &self,
        slot: SlotId,
        roster: &Roster,
        selections: &'a Selections,
    ) -> ResolveContext<'a> {
        let blocked = self
            .iter_group_selections(slot, roster, selections)
            .map(|(_, candidate)| conflict_key_of(self.conflict_key, candidate).to_string())
            .collect();

        ResolveContext::new(slot, selections.get(slot), self.conflict_key, blocked)
    }

    // 同じグループに属する別枠の選択を名簿で解決して列挙
    fn iter_group_selections<'a>(
        &self,
        slot: SlotId,
        roster: &'a Roster,
        selections: &'a Selections,
    ) -> impl Iterator<Item = (SlotId, &'a Candidate)> + 'a {
        let group = slot.group();
        selections
            .iter()
            .filter(move |(other, _)| {
                group.is_some() && **other != slot && other.group() == group
            })
            .filter_map(move |(other, id)| {
                roster
                    .find(other.roster_kind(), id)
                    .map(|candidate| (*other, candidate))
            })
    }
}
