use thiserror::Error;

use crate::{CandidateId, SlotId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// 通信まわりの失敗
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// トークンが取得できなかった、または失効した
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    /// 枠の名簿にいない候補を指定した
    #[error("Unknown candidate `{id}` for {slot}")]
    UnknownCandidate { slot: SlotId, id: CandidateId },

    /// 同種の別枠ですでに選ばれている
    #[error("{name} is already assigned to {other} and cannot take {slot}")]
    Conflict {
        slot: SlotId,
        other: SlotId,
        name: String,
    },

    /// 楽器や役割が枠と合わない
    #[error("{name} cannot take {slot}")]
    CategoryMismatch { slot: SlotId, name: String },

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid time range for `{name}`: {start} - {end}")]
    InvalidTimeRange {
        name: String,
        start: String,
        end: String,
    },

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// 入力チェックで弾かれた値
    #[error("Invalid input for {field}: `{value}`")]
    InvalidInput { field: &'static str, value: String },

    #[error("Index {index} out of range")]
    OutOfRange { index: usize },
}
