//! 入力欄ごとの受け付け条件。弾いた入力は黙って捨てる

pub const NAME_LENGTH_MAX: usize = 20;
pub const CHAPTER_DIGITS_MAX: usize = 3;
pub const VERSE_LENGTH_MAX: usize = 5;

/// 英字と空白だけなら true。空文字は false
pub fn is_letters_only(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// 説教シリーズ・タイトル。空にするのは常に許す
pub fn accept_letters(value: &str) -> bool {
    value.is_empty() || is_letters_only(value)
}

/// イベント名・プログラム名
pub fn accept_short_name(value: &str) -> bool {
    value.is_empty() || (is_letters_only(value) && value.chars().count() <= NAME_LENGTH_MAX)
}

/// 章は 3 桁までの数字
pub fn accept_chapter(value: &str) -> bool {
    value.len() <= CHAPTER_DIGITS_MAX && value.chars().all(|c| c.is_ascii_digit())
}

/// 節は数字と `-`。最初の `-` を除いて 5 文字まで
pub fn accept_verse(value: &str) -> bool {
    if !value.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return false;
    }

    value.replacen('-', "", 1).len() <= VERSE_LENGTH_MAX
}
