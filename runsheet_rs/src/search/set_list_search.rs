use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{Debouncer, ICatalogSearch, SearchTicket, Suggestions};
use crate::form::SetListCategory;
use crate::http::Track;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_LIMIT: u32 = 5;

// 入力された曲名と、入力時点で出した整理券
type Query = (String, SearchTicket<SetListCategory>);

/// セットリストの曲名入力に合わせてカタログを検索します。
/// 区分ごとに独立したタイマーを持つ
pub struct SetListSearch<C> {
    client: Arc<C>,
    suggestions: Arc<Mutex<Suggestions>>,
    debouncers: HashMap<SetListCategory, Debouncer<Query>>,
}

impl<C> SetListSearch<C>
where
    C: ICatalogSearch + Send + Sync + 'static,
{
    pub fn new(client: C) -> Self {
        Self::with_options(client, DEFAULT_DELAY, DEFAULT_LIMIT)
    }

    pub fn with_options(client: C, delay: Duration, limit: u32) -> Self {
        let client = Arc::new(client);
        let suggestions = Arc::new(Mutex::new(Suggestions::new()));

        let debouncers = SetListCategory::ALL
            .into_iter()
            .map(|category| {
                let debouncer =
                    Self::create_debouncer(category, delay, limit, &client, &suggestions);
                (category, debouncer)
            })
            .collect();

        Self {
            client,
            suggestions,
            debouncers,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 曲名の入力。空なら候補を消す
    pub fn input(&self, category: SetListCategory, query: &str) {
        let Some(debouncer) = self.debouncers.get(&category) else {
            return;
        };

        if query.trim().is_empty() {
            debouncer.cancel();
            self.lock().clear(category);
            return;
        }

        // 整理券は入力の時点で出す。後から消されたら検索は始まらない
        let ticket = self.lock().issue(category);
        debouncer.call((query.to_string(), ticket));
    }

    pub fn tracks(&self, category: SetListCategory) -> Vec<Track> {
        self.lock().tracks(category).to_vec()
    }

    pub fn is_loading(&self, category: SetListCategory) -> bool {
        self.lock().is_loading(category)
    }

    pub fn is_open(&self, category: SetListCategory) -> bool {
        self.lock().is_open(category)
    }

    pub fn close_all(&self) {
        for debouncer in self.debouncers.values() {
            debouncer.cancel();
        }
        self.lock().close_all();
    }

    /// 候補から 1 曲選びます。その区分の候補は閉じる
    pub fn choose(&self, category: SetListCategory, index: usize) -> Option<Track> {
        self.lock().take(category, index)
    }

    fn lock(&self) -> MutexGuard<'_, Suggestions> {
        lock(&self.suggestions)
    }

    fn create_debouncer(
        category: SetListCategory,
        delay: Duration,
        limit: u32,
        client: &Arc<C>,
        suggestions: &Arc<Mutex<Suggestions>>,
    ) -> Debouncer<Query> {
        let client = client.clone();
        let suggestions = suggestions.clone();

        Debouncer::new(delay, move |(query, ticket): Query| {
            let client = client.clone();
            let suggestions = suggestions.clone();
            async move {
                if !lock(&suggestions).start(&ticket) {
                    log::debug!("skipped search for `{query}` cleared before start");
                    return;
                }

                // 失敗しても画面には出さず、候補なしとして扱う
                let tracks = match client.search(&query, limit).await {
                    Ok(tracks) => tracks,
                    Err(error) => {
                        log::error!("search for `{query}` ({}) failed: {error}", category.key());
                        Vec::new()
                    }
                };

                if !lock(&suggestions).finish(ticket, tracks) {
                    log::debug!("discarded stale results for `{query}`");
                }
            }
        })
    }
}

fn lock(suggestions: &Mutex<Suggestions>) -> MutexGuard<'_, Suggestions> {
    suggestions.lock().unwrap_or_else(PoisonError::into_inner)
}
