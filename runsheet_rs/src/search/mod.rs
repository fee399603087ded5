mod debounce;
mod gate;
mod set_list_search;
mod suggestions;

pub use debounce::Debouncer;
pub use gate::{SearchGate, SearchTicket};
pub use set_list_search::{SetListSearch, DEFAULT_DELAY, DEFAULT_LIMIT};
pub use suggestions::Suggestions;

use std::future::Future;

use crate::http::Track;
use crate::Result;

/// 楽曲カタログの検索
pub trait ICatalogSearch {
    fn search(&self, query: &str, limit: u32) -> impl Future<Output = Result<Vec<Track>>> + Send;
}
