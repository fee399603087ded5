use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::{DurationAggregator, TotalDuration};
use crate::form::{
    format_time_12h, DressCode, ProgrammeItem, Sermon, ServiceForm, SetListCategory, SetListEntry,
};
use crate::{CreativeRole, InstrumentType, Result, SlotId};

const NOT_SET: &str = "Not set";
const NOT_SELECTED: &str = "Not selected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocalAssignment {
    pub part: String,
    pub name: String,
}

/// 枠ごとに割り当てられた人の名前
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignments {
    #[serde(default)]
    pub preacher: Option<String>,

    #[serde(default)]
    pub preaching_support: Option<String>,

    #[serde(default)]
    pub worship_leader: Option<String>,

    // 選ばれたパートだけ
    #[serde(default)]
    pub vocalists: Vec<VocalAssignment>,

    // 楽器名 → 名前
    #[serde(default)]
    pub musicians: BTreeMap<String, String>,

    // 役割名 → 名前
    #[serde(default)]
    pub creatives: BTreeMap<String, String>,
}

/// 共有リンクで開く運営表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub token: Uuid,
    pub event_name: String,
    pub event_date: Option<NaiveDate>,
    pub dress_code: DressCode,
    pub sermon: Sermon,
    pub programme_flow: Vec<ProgrammeItem>,
    pub set_list: BTreeMap<SetListCategory, Vec<SetListEntry>>,
    pub team_assignments: TeamAssignments,
}

impl Schedule {
    pub fn new(form: &ServiceForm) -> Self {
        let event_name = match form.event.event_type() {
            Some(event_type) => event_type.display_name().to_string(),
            None => String::new(),
        };

        Self {
            token: Uuid::new_v4(),
            event_name,
            event_date: form.event.date(),
            dress_code: form.dress_code,
            sermon: form.sermon.clone(),
            programme_flow: form.programme.items().to_vec(),
            set_list: form.set_list.to_map(),
            team_assignments: Self::create_team_assignments(form),
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn total_duration(&self) -> TotalDuration {
        DurationAggregator::aggregate(
            self.programme_flow
                .iter()
                .map(|item| (item.start_time(), item.end_time())),
        )
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary { schedule: self }
    }

    fn create_team_assignments(form: &ServiceForm) -> TeamAssignments {
        let name = |slot: SlotId| form.selected(slot).map(|x| x.name().to_string());
        let team = form.team();

        let vocalists = team
            .vocal_parts()
            .iter()
            .enumerate()
            .filter_map(|(index, part)| {
                name(SlotId::Vocal(index)).map(|name| VocalAssignment {
                    part: part.clone(),
                    name,
                })
            })
            .collect();

        let labeled = |slots: Vec<SlotId>| -> BTreeMap<String, String> {
            slots
                .into_iter()
                .filter_map(|slot| Some((slot.category()?.to_string(), name(slot)?)))
                .collect()
        };

        TeamAssignments {
            preacher: name(SlotId::Preacher),
            preaching_support: name(SlotId::PreachingSupport),
            worship_leader: name(SlotId::WorshipLeader),
            vocalists,
            musicians: labeled(SlotId::musicians().collect()),
            creatives: labeled(SlotId::creatives().collect()),
        }
    }
}

/// 運営表のテキスト表示
pub struct Summary<'a> {
    schedule: &'a Schedule,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.schedule;
        writeln!(f, "TechScript")?;

        writeln!(f)?;
        writeln!(f, "Event Details")?;
        writeln!(f, "Event Type: {}", or(&schedule.event_name, NOT_SET))?;
        match schedule.event_date {
            Some(date) => writeln!(f, "Date: {}", date.format("%B %-d, %Y"))?,
            None => writeln!(f, "Date: {NOT_SET}")?,
        }
        writeln!(f, "Duration: {}", schedule.total_duration())?;
        writeln!(
            f,
            "Dress Code: {} & {}",
            schedule.dress_code.primary(),
            schedule.dress_code.secondary()
        )?;

        writeln!(f)?;
        writeln!(f, "Programme Flow")?;
        for item in &schedule.programme_flow {
            let time = |x: Option<chrono::NaiveTime>| x.map(format_time_12h).unwrap_or_default();
            writeln!(
                f,
                "{}: {} - {}",
                item.name(),
                time(item.start_time()),
                time(item.end_time())
            )?;
        }

        let sermon = &schedule.sermon;
        writeln!(f)?;
        writeln!(f, "Sermon Details")?;
        writeln!(f, "Series: {}", or(sermon.series(), NOT_SET))?;
        writeln!(f, "Title: {}", or(sermon.title(), NOT_SET))?;
        writeln!(
            f,
            "Bible Verse: {}",
            sermon.reference().as_deref().unwrap_or(NOT_SET)
        )?;

        self.fmt_team(f)?;

        writeln!(f)?;
        writeln!(f, "Set List")?;
        for (category, entries) in &schedule.set_list {
            if entries.is_empty() {
                continue;
            }

            writeln!(f, "{}", category.label())?;
            for (index, entry) in entries.iter().enumerate() {
                writeln!(f, "{}. {}: {}", index + 1, entry.title(), entry.artist())?;
            }
        }

        Ok(())
    }
}

impl Summary<'_> {
    fn fmt_team(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team = &self.schedule.team_assignments;
        let selected = |x: &Option<String>| x.clone().unwrap_or_else(|| NOT_SELECTED.to_string());

        writeln!(f)?;
        writeln!(f, "Team")?;
        writeln!(f, "Preacher: {}", selected(&team.preacher))?;
        writeln!(f, "Support: {}", selected(&team.preaching_support))?;
        writeln!(f, "Worship Leader: {}", selected(&team.worship_leader))?;

        for vocalist in &team.vocalists {
            writeln!(f, "{}: {}", vocalist.part, vocalist.name)?;
        }

        // 画面の並び順で出す
        for label in InstrumentType::all().singles().filter_map(InstrumentType::label) {
            if let Some(name) = team.musicians.get(label) {
                writeln!(f, "{label}: {name}")?;
            }
        }

        for role in CreativeRole::all().singles() {
            let (Some(label), Some(title)) = (role.label(), role.title()) else {
                continue;
            };
            if let Some(name) = team.creatives.get(label) {
                writeln!(f, "{title}: {name}")?;
            }
        }

        Ok(())
    }
}

fn or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Schedule;
    use crate::form::{parse_time, EventType, ServiceForm, SetListCategory, SetListEntry};
    use crate::{Candidate, CandidateId, CreativeRole, InstrumentType, Roster, RosterKind, SlotId};

    fn create_form() -> ServiceForm {
        let mut roster = Roster::default();
        roster.push(RosterKind::Preachers, Candidate::new("p1", "Grace"));
        roster.push(RosterKind::Vocalists, Candidate::new("v1", "Eve"));
        roster.push(RosterKind::Musicians, Candidate::with_category("m1", "Ann", "Drums"));
        roster.push(RosterKind::Creatives, Candidate::with_category("c1", "Lia", "Lighting"));

        let mut form = ServiceForm::new(roster);
        form.event.select(EventType::SundayService);
        form.event
            .set_date(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());

        let index = form.programme.push();
        form.programme.set_name(index, "Worship").unwrap();
        form.programme
            .set_end(index, parse_time("10:30").ok())
            .unwrap();

        form.sermon.set_series("Advent");
        form.sermon.select_book("John").unwrap();
        form.sermon.set_chapter("1");
        form.sermon.set_verse("1-5");

        form.set_list.append(
            SetListCategory::AltarCall,
            SetListEntry::new("Amazing Grace", "Traditional"),
        );

        form.assign(SlotId::Preacher, CandidateId::new("p1")).unwrap();
        form.assign(SlotId::Vocal(1), CandidateId::new("v1")).unwrap();
        form.assign(SlotId::Musician(InstrumentType::DRUMS), CandidateId::new("m1"))
            .unwrap();
        form.assign(SlotId::Creative(CreativeRole::LIGHTING), CandidateId::new("c1"))
            .unwrap();
        form
    }

    #[test]
    fn team_assignments() {
        let schedule = create_form().to_schedule();
        let team = &schedule.team_assignments;
        assert_eq!(team.preacher.as_deref(), Some("Grace"));
        assert!(team.preaching_support.is_none());
        assert_eq!(team.vocalists.len(), 1);
        assert_eq!(team.vocalists[0].part, "Alto");
        assert_eq!(team.musicians.get("Drums").map(String::as_str), Some("Ann"));
        assert_eq!(team.creatives.get("Lighting").map(String::as_str), Some("Lia"));
    }

    #[test]
    fn json() {
        let schedule = create_form().to_schedule();
        let json = schedule.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event_name"], "Sunday Service");
        assert_eq!(value["event_date"], "2024-12-01");
        assert_eq!(value["programme_flow"][1]["startTime"], "09:00");
        assert_eq!(value["programme_flow"][1]["endTime"], "10:30");
        assert_eq!(value["set_list"]["altarCall"][0]["title"], "Amazing Grace");
        assert_eq!(value["team_assignments"]["preacher"], "Grace");
        assert!(value["team_assignments"]["preachingSupport"].is_null());

        assert_eq!(Schedule::from_json(&json).unwrap(), schedule);
    }

    #[test]
    fn token_is_unique() {
        let form = create_form();
        assert_ne!(form.to_schedule().token, form.to_schedule().token);
    }

    #[test]
    fn summary() {
        let text = create_form().to_schedule().summary().to_string();
        let expected = "\
TechScript

Event Details
Event Type: Sunday Service
Date: December 1, 2024
Duration: 1h 35m
Dress Code: #00ff00 & #ffffff

Programme Flow
Countdown Begins: 8:55 AM - 9:00 AM
Worship: 9:00 AM - 10:30 AM

Sermon Details
Series: Advent
Title: Not set
Bible Verse: John 1:1-5

Team
Preacher: Grace
Support: Not selected
Worship Leader: Not selected
Alto: Eve
Drums: Ann
Lighting Director: Lia

Set List
Altar Call
1. Amazing Grace: Traditional
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_summary() {
        let text = ServiceForm::default().to_schedule().summary().to_string();
        assert!(text.contains("Event Type: Not set\n"));
        assert!(text.contains("Date: Not set\n"));
        assert!(text.contains("Bible Verse: Not set\n"));
        assert!(text.ends_with("Set List\n"));
    }
}
