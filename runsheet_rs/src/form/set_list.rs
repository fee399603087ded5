use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http::Track;
use crate::{Error, Result};

/// セットリストの区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetListCategory {
    Praise,
    Worship,
    AltarCall,
    Revival,
}

impl SetListCategory {
    pub const ALL: [SetListCategory; 4] = [
        SetListCategory::Praise,
        SetListCategory::Worship,
        SetListCategory::AltarCall,
        SetListCategory::Revival,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SetListCategory::Praise => "praise",
            SetListCategory::Worship => "worship",
            SetListCategory::AltarCall => "altarCall",
            SetListCategory::Revival => "revival",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|category| {
            category.key() == key || category.label().eq_ignore_ascii_case(key)
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            SetListCategory::Praise => "Praise",
            SetListCategory::Worship => "Worship",
            SetListCategory::AltarCall => "Altar Call",
            SetListCategory::Revival => "Revival",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetListEntry {
    title: String,
    artist: String,

    #[serde(rename = "youtubeLink", default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,

    // カタログの候補から選んだとき
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track: Option<Track>,
}

impl SetListEntry {
    pub fn new<T, U>(title: T, artist: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            title: title.into(),
            artist: artist.into(),
            link: None,
            track: None,
        }
    }

    pub fn with_link<T>(mut self, link: T) -> Self
    where
        T: Into<String>,
    {
        let link = link.into();
        self.link = (!link.trim().is_empty()).then_some(link);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }
}

/// 区分ごとの入力途中の曲
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetListDraft {
    pub title: String,
    pub artist: String,
    pub link: String,
    track: Option<Track>,
}

impl SetListDraft {
    /// 候補の曲名とアーティストで埋めます。リンクは消す
    pub fn apply(&mut self, track: Track) {
        self.title = track.title().to_string();
        self.artist = track.artist().to_string();
        self.link.clear();
        self.track = Some(track);
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    fn to_entry(&self) -> SetListEntry {
        let mut entry = SetListEntry::new(self.title.trim(), self.artist.trim())
            .with_link(self.link.trim());
        // 手で書き換えたなら候補とは別の曲
        entry.track = self
            .track
            .as_ref()
            .filter(|track| track.title() == entry.title)
            .cloned();
        entry
    }
}

/// 区分ごとの曲の並び。重複はまとめない
#[derive(Debug, Clone, Default)]
pub struct SetList {
    buckets: BTreeMap<SetListCategory, Vec<SetListEntry>>,
    drafts: BTreeMap<SetListCategory, SetListDraft>,
}

impl SetList {
    /// 末尾に追加します。曲名が空白だけなら何もしないで false
    pub fn append(&mut self, category: SetListCategory, entry: SetListEntry) -> bool {
        if entry.title.trim().is_empty() {
            return false;
        }

        self.buckets.entry(category).or_default().push(entry);
        true
    }

    pub fn remove(&mut self, category: SetListCategory, index: usize) -> Result<SetListEntry> {
        let bucket = self
            .buckets
            .get_mut(&category)
            .filter(|bucket| index < bucket.len())
            .ok_or(Error::OutOfRange { index })?;
        Ok(bucket.remove(index))
    }

    pub fn entries(&self, category: SetListCategory) -> &[SetListEntry] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 曲のある区分だけを区分の順に列挙します
    pub fn iter(&self) -> impl Iterator<Item = (SetListCategory, &[SetListEntry])> {
        self.buckets
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, entries)| (*category, entries.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    pub fn draft(&self, category: SetListCategory) -> Option<&SetListDraft> {
        self.drafts.get(&category)
    }

    pub fn draft_mut(&mut self, category: SetListCategory) -> &mut SetListDraft {
        self.drafts.entry(category).or_default()
    }

    pub fn apply_suggestion(&mut self, category: SetListCategory, track: Track) {
        self.draft_mut(category).apply(track);
    }

    /// 入力途中の曲を追加して、入力欄を空に戻します。曲名が空なら何もしない
    pub fn commit_draft(&mut self, category: SetListCategory) -> bool {
        let Some(entry) = self.drafts.get(&category).map(SetListDraft::to_entry) else {
            return false;
        };

        if !self.append(category, entry) {
            return false;
        }

        self.drafts.remove(&category);
        true
    }

    pub(crate) fn to_map(&self) -> BTreeMap<SetListCategory, Vec<SetListEntry>> {
        self.iter()
            .map(|(category, entries)| (category, entries.to_vec()))
            .collect()
    }
}
