use std::fmt;

use crate::{CreativeRole, Error, InstrumentType, Result, RosterKind};

/// 候補者をひとり割り当てられる枠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotId {
    Preacher,
    PreachingSupport,
    WorshipLeader,

    // ボーカルの何番目のパートか
    Vocal(usize),

    // 単一フラグのみ
    Musician(InstrumentType),

    // 単一フラグのみ
    Creative(CreativeRole),
}

/// 重複チェックの対象になる枠のまとまり
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    // ボーカル全パートとワーシップリーダー
    Vocal,
    Musician,
    Creative,
}

impl SlotId {
    /// 説教と説教サポートはどのグループにも属さない
    pub fn group(&self) -> Option<SlotGroup> {
        match self {
            SlotId::Preacher | SlotId::PreachingSupport => None,
            SlotId::WorshipLeader | SlotId::Vocal(_) => Some(SlotGroup::Vocal),
            SlotId::Musician(_) => Some(SlotGroup::Musician),
            SlotId::Creative(_) => Some(SlotGroup::Creative),
        }
    }

    /// 候補を引いてくる名簿
    pub fn roster_kind(&self) -> RosterKind {
        match self {
            SlotId::Preacher => RosterKind::Preachers,
            SlotId::PreachingSupport => RosterKind::PreachingSupport,
            SlotId::WorshipLeader => RosterKind::WorshipLeaders,
            SlotId::Vocal(_) => RosterKind::Vocalists,
            SlotId::Musician(_) => RosterKind::Musicians,
            SlotId::Creative(_) => RosterKind::Creatives,
        }
    }

    /// 候補の楽器・役割と一致しなければならない値
    pub fn category(&self) -> Option<&'static str> {
        match self {
            SlotId::Musician(instrument) => instrument.label(),
            SlotId::Creative(role) => role.label(),
            _ => None,
        }
    }

    /// ボーカルとクリエイティブは名前順で並べる
    pub fn is_sorted_by_name(&self) -> bool {
        matches!(self, SlotId::Vocal(_) | SlotId::Creative(_))
    }

    pub fn musicians() -> impl Iterator<Item = SlotId> {
        InstrumentType::all().singles().map(SlotId::Musician)
    }

    pub fn creatives() -> impl Iterator<Item = SlotId> {
        CreativeRole::all().singles().map(SlotId::Creative)
    }

    /// `preacher`, `support`, `worship-leader`, `vocal:0`, `musician:Drums`, `creative:Lighting`
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let unknown = || Error::UnknownSlot(value.to_string());

        let (kind, label) = match value.split_once(':') {
            Some((kind, label)) => (kind.trim(), Some(label.trim())),
            None => (value, None),
        };

        match (kind, label) {
            ("preacher", None) => Ok(SlotId::Preacher),
            ("support", None) | ("preaching-support", None) => Ok(SlotId::PreachingSupport),
            ("worship-leader", None) => Ok(SlotId::WorshipLeader),
            ("vocal", Some(index)) => index.parse().map(SlotId::Vocal).map_err(|_| unknown()),
            ("musician", Some(label)) => InstrumentType::from_label(label)
                .map(SlotId::Musician)
                .ok_or_else(unknown),
            ("creative", Some(label)) => CreativeRole::from_label(label)
                .map(SlotId::Creative)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Preacher => f.write_str("preacher"),
            SlotId::PreachingSupport => f.write_str("support"),
            SlotId::WorshipLeader => f.write_str("worship-leader"),
            SlotId::Vocal(index) => write!(f, "vocal:{index}"),
            SlotId::Musician(instrument) => {
                write!(f, "musician:{}", instrument.label().unwrap_or("?"))
            }
            SlotId::Creative(role) => write!(f, "creative:{}", role.label().unwrap_or("?")),
        }
    }
}
