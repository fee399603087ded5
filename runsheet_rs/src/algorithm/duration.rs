use std::fmt;

use chrono::NaiveTime;

/// 時間と分に分けた合計時間
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalDuration {
    hours: i64,
    minutes: i64,
}

impl TotalDuration {
    pub fn from_minutes(total_minutes: i64) -> Self {
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for TotalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

pub struct DurationAggregator;

impl DurationAggregator {
    /// 開始と終了がそろっている項目だけを合計します。
    /// 同じ日の時刻とみなし、終了が開始より前の項目は 0 分として扱う
    pub fn aggregate<T>(spans: T) -> TotalDuration
    where
        T: IntoIterator<Item = (Option<NaiveTime>, Option<NaiveTime>)>,
    {
        let total_minutes = spans
            .into_iter()
            .filter_map(|(start, end)| Self::span_minutes(start, end))
            .map(|minutes| minutes.max(0))
            .sum();

        TotalDuration::from_minutes(total_minutes)
    }

    /// 終了 - 開始 (分)。逆転していれば負の値
    pub fn span_minutes(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<i64> {
        let (Some(start), Some(end)) = (start, end) else {
            return None;
        };

        Some((end - start).num_minutes())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::{DurationAggregator, TotalDuration};

    fn time(value: &str) -> Option<NaiveTime> {
        Some(NaiveTime::parse_from_str(value, "%H:%M").unwrap())
    }

    #[test]
    fn empty() {
        let total = DurationAggregator::aggregate(Vec::new());
        assert_eq!(total, TotalDuration::default());
        assert_eq!(total.to_string(), "0h 0m");
    }

    #[test]
    fn simple() {
        let total = DurationAggregator::aggregate([
            (time("08:55"), time("09:00")),
            (time("09:00"), time("10:30")),
        ]);
        assert_eq!(total.hours(), 1);
        assert_eq!(total.minutes(), 35);
        assert_eq!(total.to_string(), "1h 35m");
    }

    // 終了時刻がない項目は数えない
    #[test]
    fn missing_end_time() {
        assert!(DurationAggregator::span_minutes(time("09:00"), None).is_none());

        let total = DurationAggregator::aggregate([
            (time("09:00"), time("09:45")),
            (time("09:45"), None),
            (None, time("11:00")),
        ]);
        assert_eq!(total.total_minutes(), 45);
    }

    // 逆転した項目は 0 分
    #[test]
    fn reversed() {
        assert_eq!(
            DurationAggregator::span_minutes(time("10:00"), time("09:30")),
            Some(-30)
        );

        let total = DurationAggregator::aggregate([
            (time("10:00"), time("09:30")),
            (time("10:00"), time("10:20")),
        ]);
        assert_eq!(total.to_string(), "0h 20m");
    }
}
