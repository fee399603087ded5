use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::input;
use crate::algorithm::{DurationAggregator, TotalDuration};
use crate::{Error, Result};

const TIME_FORMAT: &str = "%H:%M";

/// `09:30` 形式の時刻を読みます
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| Error::InvalidTime(value.to_string()))
}

/// `9:30 AM` 形式
pub fn format_time_12h(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    // 未入力は空文字
    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_str(&time.format(super::TIME_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        if value.trim().is_empty() {
            return Ok(None);
        }

        super::parse_time(&value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeItem {
    name: String,

    #[serde(rename = "startTime", with = "hh_mm", default)]
    start_time: Option<NaiveTime>,

    #[serde(rename = "endTime", with = "hh_mm", default)]
    end_time: Option<NaiveTime>,
}

impl ProgrammeItem {
    pub fn new<T>(name: T, start_time: Option<NaiveTime>, end_time: Option<NaiveTime>) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            start_time,
            end_time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    /// 分単位の長さ。時刻がそろっていなければ None
    pub fn minutes(&self) -> Option<i64> {
        DurationAggregator::span_minutes(self.start_time, self.end_time)
    }
}

/// 当日の進行表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammeFlow {
    items: Vec<ProgrammeItem>,
}

impl Default for ProgrammeFlow {
    fn default() -> Self {
        Self {
            items: vec![ProgrammeItem::new(
                "Countdown Begins",
                NaiveTime::from_hms_opt(8, 55, 0),
                NaiveTime::from_hms_opt(9, 0, 0),
            )],
        }
    }
}

impl ProgrammeFlow {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// 空の項目を追加します。開始時刻は直前の項目の終了時刻を引き継ぐ
    pub fn push(&mut self) -> usize {
        let start_time = self.items.last().and_then(ProgrammeItem::end_time);
        self.items.push(ProgrammeItem::new("", start_time, None));
        self.items.len() - 1
    }

    /// 読み込み済みの項目をそのまま追加します
    pub fn push_item(&mut self, item: ProgrammeItem) {
        self.items.push(item);
    }

    pub fn set_name(&mut self, index: usize, name: &str) -> Result<bool> {
        let item = self.get_mut(index)?;
        if !input::accept_short_name(name) {
            return Ok(false);
        }

        item.name = name.to_string();
        Ok(true)
    }

    pub fn set_start(&mut self, index: usize, time: Option<NaiveTime>) -> Result<()> {
        self.get_mut(index)?.start_time = time;
        Ok(())
    }

    pub fn set_end(&mut self, index: usize, time: Option<NaiveTime>) -> Result<()> {
        self.get_mut(index)?.end_time = time;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<ProgrammeItem> {
        if index >= self.items.len() {
            return Err(Error::OutOfRange { index });
        }
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[ProgrammeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_duration(&self) -> TotalDuration {
        DurationAggregator::aggregate(
            self.items
                .iter()
                .map(|item| (item.start_time, item.end_time)),
        )
    }

    /// 終了が開始より前の項目があればエラー。合計では 0 分として扱われている
    pub fn validate(&self) -> Result<()> {
        let invalid = self
            .items
            .iter()
            .find(|item| item.minutes().is_some_and(|minutes| minutes < 0));

        match invalid {
            Some(item) => Err(Error::InvalidTimeRange {
                name: item.name.clone(),
                start: format_time(item.start_time),
                end: format_time(item.end_time),
            }),
            None => Ok(()),
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut ProgrammeItem> {
        self.items
            .get_mut(index)
            .ok_or(Error::OutOfRange { index })
    }
}

fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|time| time.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{format_time_12h, parse_time, ProgrammeFlow, ProgrammeItem};

    #[test]
    fn default_flow() {
        let flow = ProgrammeFlow::default();
        assert_eq!(flow.len(), 1);
        assert_eq!(flow.items()[0].name(), "Countdown Begins");
        assert_eq!(flow.total_duration().to_string(), "0h 5m");
    }

    #[test]
    fn push_seeds_start_time() {
        let mut flow = ProgrammeFlow::default();
        let index = flow.push();
        assert_eq!(index, 1);
        assert_eq!(flow.items()[1].start_time(), parse_time("09:00").ok());
        assert!(flow.items()[1].end_time().is_none());

        // 終了時刻がなければ引き継ぐものもない
        flow.push();
        assert!(flow.items()[2].start_time().is_none());

        let mut flow = ProgrammeFlow::empty();
        flow.push();
        assert!(flow.items()[0].start_time().is_none());
    }

    #[test]
    fn total_duration() {
        let mut flow = ProgrammeFlow::default();
        let index = flow.push();
        flow.set_name(index, "Praise and Worship").unwrap();
        flow.set_end(index, parse_time("10:30").ok()).unwrap();
        assert_eq!(flow.total_duration().to_string(), "1h 35m");

        // 終了時刻のない項目は 0 分
        flow.push();
        assert_eq!(flow.total_duration().total_minutes(), 95);
    }

    #[test]
    fn set_name() {
        let mut flow = ProgrammeFlow::default();
        assert!(flow.set_name(0, "Welcome").unwrap());
        assert!(!flow.set_name(0, "Welcome 2").unwrap());
        assert_eq!(flow.items()[0].name(), "Welcome");
        assert!(flow.set_name(5, "Welcome").is_err());
    }

    #[test]
    fn remove() {
        let mut flow = ProgrammeFlow::default();
        flow.push();
        let removed = flow.remove(0).unwrap();
        assert_eq!(removed.name(), "Countdown Begins");
        assert_eq!(flow.len(), 1);
        assert!(flow.remove(1).is_err());
    }

    #[test]
    fn validate() {
        let mut flow = ProgrammeFlow::default();
        assert!(flow.validate().is_ok());

        let index = flow.push();
        flow.set_end(index, parse_time("08:30").ok()).unwrap();
        assert!(flow.validate().is_err());
        assert_eq!(flow.total_duration().to_string(), "0h 5m");
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time_12h(parse_time("09:05").unwrap()), "9:05 AM");
        assert_eq!(format_time_12h(parse_time("12:00").unwrap()), "12:00 PM");
        assert_eq!(format_time_12h(parse_time("00:15").unwrap()), "12:15 AM");
        assert_eq!(format_time_12h(parse_time("18:45").unwrap()), "6:45 PM");
        assert!(parse_time("9am").is_err());
    }

    #[test]
    fn serialize() {
        let item = ProgrammeItem::new("Sermon", parse_time("10:00").ok(), None);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"name":"Sermon","startTime":"10:00","endTime":""}"#);

        let item: ProgrammeItem = serde_json::from_str(&json).unwrap();
        assert!(item.end_time().is_none());
    }
}
