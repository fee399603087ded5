use serde::{Deserialize, Serialize};

use super::input;
use crate::{Error, Result};

pub const BIBLE_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// 部分一致 (大文字小文字を区別しない) で書名を探します。空白だけなら何も返さない
pub fn search_books(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    BIBLE_BOOKS
        .iter()
        .filter(|book| book.to_lowercase().contains(&query))
        .copied()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sermon {
    series: String,
    title: String,
    book: Option<String>,
    chapter: String,
    verse: String,
}

impl Sermon {
    pub fn set_series(&mut self, series: &str) -> bool {
        if !input::accept_letters(series) {
            return false;
        }
        self.series = series.to_string();
        true
    }

    pub fn set_title(&mut self, title: &str) -> bool {
        if !input::accept_letters(title) {
            return false;
        }
        self.title = title.to_string();
        true
    }

    /// 正典の書名だけ受け付けます。表記ゆれは大文字小文字のみ許す
    pub fn select_book(&mut self, book: &str) -> Result<()> {
        let found = BIBLE_BOOKS
            .iter()
            .find(|x| x.eq_ignore_ascii_case(book.trim()))
            .ok_or_else(|| Error::UnknownBook(book.to_string()))?;

        self.book = Some(found.to_string());
        Ok(())
    }

    pub fn clear_book(&mut self) {
        self.book = None;
    }

    pub fn set_chapter(&mut self, chapter: &str) -> bool {
        if !input::accept_chapter(chapter) {
            return false;
        }
        self.chapter = chapter.to_string();
        true
    }

    pub fn set_verse(&mut self, verse: &str) -> bool {
        if !input::accept_verse(verse) {
            return false;
        }
        self.verse = verse.to_string();
        true
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn book(&self) -> Option<&str> {
        self.book.as_deref()
    }

    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    pub fn verse(&self) -> &str {
        &self.verse
    }

    /// `John 3:16` のような表記。書名がなければ None
    pub fn reference(&self) -> Option<String> {
        let book = self.book.as_deref()?;
        let reference = match (self.chapter.is_empty(), self.verse.is_empty()) {
            (true, _) => book.to_string(),
            (false, true) => format!("{} {}", book, self.chapter),
            (false, false) => format!("{} {}:{}", book, self.chapter, self.verse),
        };
        Some(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::{search_books, Sermon, BIBLE_BOOKS};

    #[test]
    fn books() {
        assert_eq!(BIBLE_BOOKS.len(), 66);
        assert_eq!(BIBLE_BOOKS[0], "Genesis");
        assert_eq!(BIBLE_BOOKS[65], "Revelation");
    }

    #[test]
    fn search() {
        itertools::assert_equal(
            search_books("john"),
            ["John", "1 John", "2 John", "3 John"],
        );
        itertools::assert_equal(search_books("PSA"), ["Psalms"]);
        assert!(search_books("  ").is_empty());
        assert!(search_books("Gospel").is_empty());
    }

    #[test]
    fn select_book() {
        let mut sermon = Sermon::default();
        sermon.select_book("romans").unwrap();
        assert_eq!(sermon.book(), Some("Romans"));
        assert!(sermon.select_book("Enoch").is_err());
        assert_eq!(sermon.book(), Some("Romans"));
    }

    #[test]
    fn reference() {
        let mut sermon = Sermon::default();
        assert!(sermon.reference().is_none());

        sermon.select_book("John").unwrap();
        assert_eq!(sermon.reference().unwrap(), "John");

        assert!(sermon.set_chapter("3"));
        assert!(sermon.set_verse("16"));
        assert_eq!(sermon.reference().unwrap(), "John 3:16");

        // 受け付けない入力は無視される
        assert!(!sermon.set_chapter("3000"));
        assert!(!sermon.set_verse("16a"));
        assert_eq!(sermon.reference().unwrap(), "John 3:16");
    }

    #[test]
    fn series_and_title() {
        let mut sermon = Sermon::default();
        assert!(sermon.set_series("Faith Over Fear"));
        assert!(!sermon.set_title("Week #2"));
        assert!(sermon.set_title("Walking on Water"));
        assert_eq!(sermon.series(), "Faith Over Fear");
        assert_eq!(sermon.title(), "Walking on Water");
    }
}
