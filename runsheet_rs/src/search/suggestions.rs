use std::collections::{HashMap, HashSet};

use super::{SearchGate, SearchTicket};
use crate::form::SetListCategory;
use crate::http::Track;

/// セットリストの区分ごとの検索候補
#[derive(Debug, Default)]
pub struct Suggestions {
    gate: SearchGate<SetListCategory>,
    tracks: HashMap<SetListCategory, Vec<Track>>,
    loading: HashSet<SetListCategory>,
}

impl Suggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検索を始めます。返した整理券で結果を受け取る
    pub fn begin(&mut self, category: SetListCategory) -> SearchTicket<SetListCategory> {
        let ticket = self.issue(category);
        self.start(&ticket);
        ticket
    }

    /// 入力を受けた時点で整理券を出します。以前の整理券は無効になる
    pub fn issue(&mut self, category: SetListCategory) -> SearchTicket<SetListCategory> {
        self.gate.issue(category)
    }

    /// 整理券がまだ有効なら読み込み中にして true を返します
    pub fn start(&mut self, ticket: &SearchTicket<SetListCategory>) -> bool {
        if !self.gate.is_current(ticket) {
            return false;
        }

        self.loading.insert(*ticket.key());
        true
    }

    /// 整理券が古ければ結果を捨てて false を返します
    pub fn finish(&mut self, ticket: SearchTicket<SetListCategory>, tracks: Vec<Track>) -> bool {
        if !self.gate.is_current(&ticket) {
            return false;
        }

        let category = *ticket.key();
        self.loading.remove(&category);
        self.tracks.insert(category, tracks);
        true
    }

    /// 候補を消して、実行中の検索結果も受け取らないようにします
    pub fn clear(&mut self, category: SetListCategory) {
        self.gate.invalidate(&category);
        self.tracks.remove(&category);
        self.loading.remove(&category);
    }

    /// 候補の外側がクリックされたとき
    pub fn close_all(&mut self) {
        self.gate.invalidate_all();
        self.tracks.clear();
        self.loading.clear();
    }

    pub fn tracks(&self, category: SetListCategory) -> &[Track] {
        self.tracks.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loading(&self, category: SetListCategory) -> bool {
        self.loading.contains(&category)
    }

    /// 候補のドロップダウンを開いているか
    pub fn is_open(&self, category: SetListCategory) -> bool {
        !self.tracks(category).is_empty()
    }

    /// 選ばれた候補を取り出して、その区分の候補を閉じます
    pub fn take(&mut self, category: SetListCategory, index: usize) -> Option<Track> {
        let track = self.tracks(category).get(index).cloned()?;
        self.clear(category);
        Some(track)
    }
}

#[cfg(test)]
mod tests {
    use super::Suggestions;
    use crate::form::SetListCategory;
    use crate::http::Track;

    fn tracks(title: &str) -> Vec<Track> {
        vec![Track::from_parts("id", title, "Artist")]
    }

    #[test]
    fn simple() {
        let mut suggestions = Suggestions::new();
        let ticket = suggestions.begin(SetListCategory::Praise);
        assert!(suggestions.is_loading(SetListCategory::Praise));
        assert!(!suggestions.is_open(SetListCategory::Praise));

        assert!(suggestions.finish(ticket, tracks("Gratitude")));
        assert!(!suggestions.is_loading(SetListCategory::Praise));
        assert!(suggestions.is_open(SetListCategory::Praise));
        assert_eq!(
            suggestions.tracks(SetListCategory::Praise)[0].title(),
            "Gratitude"
        );
        assert!(suggestions.tracks(SetListCategory::Worship).is_empty());
    }

    // 後から出した検索が先に返っても、古い方で上書きされない
    #[test]
    fn stale() {
        let mut suggestions = Suggestions::new();
        let old = suggestions.begin(SetListCategory::Worship);
        let new = suggestions.begin(SetListCategory::Worship);

        assert!(suggestions.finish(new, tracks("Goodness of God")));
        assert!(!suggestions.finish(old, tracks("Good Good Father")));
        assert_eq!(
            suggestions.tracks(SetListCategory::Worship)[0].title(),
            "Goodness of God"
        );
    }

    // 入力時に出した整理券は、検索が始まる前に消されても無効になる
    #[test]
    fn clear_before_start() {
        let mut suggestions = Suggestions::new();
        let ticket = suggestions.issue(SetListCategory::Praise);
        assert!(!suggestions.is_loading(SetListCategory::Praise));

        suggestions.clear(SetListCategory::Praise);
        assert!(!suggestions.start(&ticket));
        assert!(!suggestions.is_loading(SetListCategory::Praise));
        assert!(!suggestions.finish(ticket, tracks("Gratitude")));
        assert!(!suggestions.is_open(SetListCategory::Praise));

        let ticket = suggestions.issue(SetListCategory::Praise);
        assert!(suggestions.start(&ticket));
        assert!(suggestions.is_loading(SetListCategory::Praise));
    }

    #[test]
    fn close_all() {
        let mut suggestions = Suggestions::new();
        let praise = suggestions.begin(SetListCategory::Praise);
        assert!(suggestions.finish(praise, tracks("Gratitude")));
        let revival = suggestions.begin(SetListCategory::Revival);

        suggestions.close_all();
        assert!(!suggestions.is_open(SetListCategory::Praise));
        assert!(!suggestions.is_loading(SetListCategory::Revival));

        // 閉じた後に返ってきた結果は捨てる
        assert!(!suggestions.finish(revival, tracks("Revival Fire")));
        assert!(!suggestions.is_open(SetListCategory::Revival));
    }

    #[test]
    fn take() {
        let mut suggestions = Suggestions::new();
        let ticket = suggestions.begin(SetListCategory::AltarCall);
        assert!(suggestions.finish(ticket, tracks("Here I Am to Worship")));

        assert!(suggestions.take(SetListCategory::AltarCall, 3).is_none());
        let track = suggestions.take(SetListCategory::AltarCall, 0).unwrap();
        assert_eq!(track.title(), "Here I Am to Worship");
        assert!(!suggestions.is_open(SetListCategory::AltarCall));
    }
}
