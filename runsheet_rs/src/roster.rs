use std::collections::BTreeMap;

use crate::{Candidate, CandidateId, InstrumentType, SlotId};

/// 役割ごとの名簿。保存先のテーブルと 1 対 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RosterKind {
    Preachers,
    PreachingSupport,
    WorshipLeaders,
    Vocalists,
    Musicians,
    Creatives,
}

impl RosterKind {
    pub const ALL: [RosterKind; 6] = [
        RosterKind::Preachers,
        RosterKind::PreachingSupport,
        RosterKind::WorshipLeaders,
        RosterKind::Vocalists,
        RosterKind::Musicians,
        RosterKind::Creatives,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            RosterKind::Preachers => "preachers",
            RosterKind::PreachingSupport => "preaching_support",
            RosterKind::WorshipLeaders => "worship_leaders",
            RosterKind::Vocalists => "vocalists",
            RosterKind::Musicians => "musicians",
            RosterKind::Creatives => "creatives",
        }
    }

    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.table_name() == name.trim())
    }
}

/// 読み込み済みの名簿一式
#[derive(Debug, Default, Clone)]
pub struct Roster {
    table: BTreeMap<RosterKind, Vec<Candidate>>,
}

impl Roster {
    pub fn push(&mut self, kind: RosterKind, candidate: Candidate) {
        self.table.entry(kind).or_default().push(candidate);
    }

    pub fn candidates(&self, kind: RosterKind) -> &[Candidate] {
        self.table.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, kind: RosterKind, id: &CandidateId) -> Option<&Candidate> {
        self.candidates(kind)
            .iter()
            .find(|candidate| candidate.id() == id)
    }

    /// 枠の候補になりうる名簿。楽器・役割の絞り込みはしない
    pub fn pool(&self, slot: SlotId) -> &[Candidate] {
        self.candidates(slot.roster_kind())
    }

    /// 指定した楽器のいずれかを担当する演奏者
    pub fn musicians_with_filter(
        &self,
        filter: InstrumentType,
    ) -> impl Iterator<Item = &Candidate> {
        self.candidates(RosterKind::Musicians)
            .iter()
            .filter(move |candidate| {
                candidate
                    .category()
                    .and_then(InstrumentType::from_label)
                    .is_some_and(|instrument| filter.contains(instrument))
            })
    }

    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
