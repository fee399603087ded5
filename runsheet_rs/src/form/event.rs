use chrono::NaiveDate;

use super::input;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    SundayService,
    SundaySpecial,
    SundayPraiseParty,
    WednesdayRevival,

    // 「その他」を選んで自由入力した名前
    Other(String),
}

impl EventType {
    pub const PRESETS: [EventType; 4] = [
        EventType::SundayService,
        EventType::SundaySpecial,
        EventType::SundayPraiseParty,
        EventType::WednesdayRevival,
    ];

    /// `sunday-service` などの選択肢の値から。`others` は空の自由入力になる
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "sunday-service" => Some(EventType::SundayService),
            "sunday-special" => Some(EventType::SundaySpecial),
            "sunday-praise-party" => Some(EventType::SundayPraiseParty),
            "wednesday-revival" => Some(EventType::WednesdayRevival),
            "others" => Some(EventType::Other(String::new())),
            _ => None,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            EventType::SundayService => "sunday-service",
            EventType::SundaySpecial => "sunday-special",
            EventType::SundayPraiseParty => "sunday-praise-party",
            EventType::WednesdayRevival => "wednesday-revival",
            EventType::Other(_) => "others",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            EventType::SundayService => "Sunday Service",
            EventType::SundaySpecial => "Sunday Special",
            EventType::SundayPraiseParty => "Sunday Praise Party",
            EventType::WednesdayRevival => "Wednesday Revival",
            EventType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventDetails {
    event_type: Option<EventType>,
    date: Option<NaiveDate>,
}

impl EventDetails {
    /// 種類を選びます。`Other` の名前は入力チェックを通らなければ空になる
    pub fn select(&mut self, event_type: EventType) {
        let event_type = match event_type {
            EventType::Other(name) if !input::accept_short_name(&name) => {
                EventType::Other(String::new())
            }
            event_type => event_type,
        };
        self.event_type = Some(event_type);
    }

    /// 自由入力の名前。受け付けなければ何もしないで false
    pub fn set_custom_name(&mut self, name: &str) -> bool {
        if !input::accept_short_name(name) {
            return false;
        }

        self.event_type = Some(EventType::Other(name.to_string()));
        true
    }

    /// 自由入力をやめて未選択に戻します
    pub fn leave_custom(&mut self) {
        if self.is_custom() {
            self.event_type = None;
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.event_type, Some(EventType::Other(_)))
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn clear_date(&mut self) {
        self.date = None;
    }

    pub fn event_type(&self) -> Option<&EventType> {
        self.event_type.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn display_name(&self) -> &str {
        self.event_type
            .as_ref()
            .map(EventType::display_name)
            .unwrap_or("Not set")
    }
}
