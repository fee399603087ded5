use std::fmt;

use serde::{Deserialize, Serialize};

pub mod algorithm;
pub mod form;
pub mod http;
pub mod search;
pub mod summary;

mod error;
mod roster;
mod slot;

pub use error::{Error, Result};
pub use roster::{Roster, RosterKind};
pub use slot::{SlotGroup, SlotId};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct InstrumentType: u32 {
        const ACOUSTIC_GUITAR = 0b00001;
        const ELECTRIC_GUITAR = 0b00010;
        const BASS_GUITAR     = 0b00100;
        const KEYBOARD        = 0b01000;
        const DRUMS           = 0b10000;
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CreativeRole: u32 {
        const LIGHTING       = 0b00001;
        const VISUAL_LYRICS  = 0b00010;
        const PROMPTER       = 0b00100;
        const PHOTOGRAPHY    = 0b01000;
        const CONTENT_WRITER = 0b10000;
    }
}

// 画面の並び順どおり
const INSTRUMENT_LABELS: [(InstrumentType, &str); 5] = [
    (InstrumentType::ACOUSTIC_GUITAR, "Acoustic Guitar"),
    (InstrumentType::ELECTRIC_GUITAR, "Electric Guitar"),
    (InstrumentType::BASS_GUITAR, "Bass Guitar"),
    (InstrumentType::KEYBOARD, "Keyboard"),
    (InstrumentType::DRUMS, "Drums"),
];

// (役割, 名簿上の名前, サマリーでの表示名)
const CREATIVE_LABELS: [(CreativeRole, &str, &str); 5] = [
    (CreativeRole::LIGHTING, "Lighting", "Lighting Director"),
    (
        CreativeRole::VISUAL_LYRICS,
        "Visual Lyrics",
        "Visual Lyrics Operator",
    ),
    (CreativeRole::PROMPTER, "Prompter", "Prompter Operator"),
    (CreativeRole::PHOTOGRAPHY, "Photography", "Photographer"),
    (CreativeRole::CONTENT_WRITER, "Content Writer", "Content Writer"),
];

impl InstrumentType {
    /// 名簿の楽器名からフラグを引きます
    pub fn from_label(label: &str) -> Option<Self> {
        INSTRUMENT_LABELS
            .iter()
            .find(|(_, x)| x.eq_ignore_ascii_case(label.trim()))
            .map(|(instrument, _)| *instrument)
    }

    /// 単一フラグのときだけ名前を返します
    pub fn label(self) -> Option<&'static str> {
        INSTRUMENT_LABELS
            .iter()
            .find(|(instrument, _)| *instrument == self)
            .map(|(_, label)| *label)
    }

    /// 立っているフラグを画面の並び順で列挙します
    pub fn singles(self) -> impl Iterator<Item = InstrumentType> {
        INSTRUMENT_LABELS
            .iter()
            .map(|(instrument, _)| *instrument)
            .filter(move |instrument| self.contains(*instrument))
    }
}

impl CreativeRole {
    pub fn from_label(label: &str) -> Option<Self> {
        CREATIVE_LABELS
            .iter()
            .find(|(_, x, _)| x.eq_ignore_ascii_case(label.trim()))
            .map(|(role, _, _)| *role)
    }

    pub fn label(self) -> Option<&'static str> {
        CREATIVE_LABELS
            .iter()
            .find(|(role, _, _)| *role == self)
            .map(|(_, label, _)| *label)
    }

    /// 「Lighting」→「Lighting Director」のような肩書き
    pub fn title(self) -> Option<&'static str> {
        CREATIVE_LABELS
            .iter()
            .find(|(role, _, _)| *role == self)
            .map(|(_, _, title)| *title)
    }

    pub fn singles(self) -> impl Iterator<Item = CreativeRole> {
        CREATIVE_LABELS
            .iter()
            .map(|(role, _, _)| *role)
            .filter(move |role| self.contains(*role))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId {
    value: String,
}

impl CandidateId {
    pub fn new<T>(value: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// 枠に割り当てられる人
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    id: CandidateId,
    name: String,

    // 演奏者なら楽器、クリエイティブなら役割
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl Candidate {
    pub fn new<T, U>(id: T, name: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            id: CandidateId::new(id),
            name: name.into(),
            category: None,
        }
    }

    pub fn with_category<T, U, V>(id: T, name: U, category: V) -> Self
    where
        T: Into<String>,
        U: Into<String>,
        V: Into<String>,
    {
        Self {
            id: CandidateId::new(id),
            name: name.into(),
            category: Some(category.into()),
        }
    }

    pub fn id(&self) -> &CandidateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}
