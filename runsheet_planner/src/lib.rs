use std::collections::BTreeMap;

use chrono::NaiveDate;
use runsheet_rs::algorithm::{AssignmentResolver, ConflictKey};
use runsheet_rs::form::{parse_time, EventType, ServiceForm, SetListCategory, SetListEntry};
use runsheet_rs::{CandidateId, Error, Result, Roster, SlotId};
use serde::Deserialize;

/// TOML で書く運営表の下書き
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub event: PlanEvent,

    #[serde(default)]
    pub dress_code: Option<PlanDressCode>,

    #[serde(default)]
    pub sermon: PlanSermon,

    // 空ならカウントダウンだけの既定の進行
    #[serde(default)]
    pub programme: Vec<PlanProgrammeItem>,

    #[serde(default)]
    pub set_list: PlanSetList,

    #[serde(default)]
    pub team: PlanTeam,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanEvent {
    /// `sunday-service` / `sunday-special` / `sunday-praise-party` / `wednesday-revival` / `others`
    #[serde(rename = "type")]
    pub event_type: Option<String>,

    // `others` のときの名前
    pub name: Option<String>,

    /// `2024-12-01`
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanDressCode {
    pub primary: Option<String>,
    pub secondary: Option<String>,

    #[serde(default)]
    pub randomize: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanSermon {
    pub series: Option<String>,
    pub title: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<String>,
    pub verse: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanProgrammeItem {
    pub name: String,

    // 省略したら直前の項目の終了時刻
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanSetList {
    #[serde(default)]
    pub praise: Vec<PlanSong>,

    #[serde(default)]
    pub worship: Vec<PlanSong>,

    #[serde(default, rename = "altarCall", alias = "altar_call")]
    pub altar_call: Vec<PlanSong>,

    #[serde(default)]
    pub revival: Vec<PlanSong>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanSong {
    pub title: String,

    #[serde(default)]
    pub artist: String,

    pub link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanTeam {
    /// Soprano/Alto/Tenor/Bass のあとに足すパートの数
    #[serde(default)]
    pub extra_voices: usize,

    /// `name` (既定) か `id`
    #[serde(default)]
    pub conflict_key: Option<String>,

    /// 枠 → 候補 id。枠は `vocal:0` や `musician:Drums` の形式
    #[serde(default)]
    pub assignments: BTreeMap<String, String>,
}

impl PlanSetList {
    fn iter(&self) -> impl Iterator<Item = (SetListCategory, &PlanSong)> {
        [
            (SetListCategory::Praise, &self.praise),
            (SetListCategory::Worship, &self.worship),
            (SetListCategory::AltarCall, &self.altar_call),
            (SetListCategory::Revival, &self.revival),
        ]
        .into_iter()
        .flat_map(|(category, songs)| songs.iter().map(move |song| (category, song)))
    }
}

pub fn parse_plan(data: &str) -> std::result::Result<Plan, toml::de::Error> {
    toml::from_str(data)
}

pub fn parse_conflict_key(value: Option<&str>) -> Result<ConflictKey> {
    match value.map(str::trim) {
        None | Some("name") => Ok(ConflictKey::Name),
        Some("id") => Ok(ConflictKey::Id),
        Some(value) => Err(Error::InvalidInput {
            field: "team.conflict_key",
            value: value.to_string(),
        }),
    }
}

/// 名簿と下書きから入力済みのフォームを作ります
pub fn create_form(plan: &Plan, roster: Roster) -> Result<ServiceForm> {
    let conflict_key = parse_conflict_key(plan.team.conflict_key.as_deref())?;
    let mut form =
        ServiceForm::with_resolver(roster, AssignmentResolver::with_conflict_key(conflict_key));
    apply(plan, &mut form)?;
    Ok(form)
}

pub fn apply(plan: &Plan, form: &mut ServiceForm) -> Result<()> {
    apply_event(&plan.event, form)?;

    if let Some(dress_code) = &plan.dress_code {
        if dress_code.randomize {
            form.dress_code.randomize();
        }
        if let Some(primary) = &dress_code.primary {
            form.dress_code.set_primary(primary)?;
        }
        if let Some(secondary) = &dress_code.secondary {
            form.dress_code.set_secondary(secondary)?;
        }
    }

    apply_sermon(&plan.sermon, form)?;
    apply_programme(&plan.programme, form)?;

    for (category, song) in plan.set_list.iter() {
        let mut entry = SetListEntry::new(song.title.trim(), song.artist.trim());
        if let Some(link) = &song.link {
            entry = entry.with_link(link.trim());
        }

        if !form.set_list.append(category, entry) {
            log::warn!("skipped a song without title in {}", category.label());
        }
    }

    apply_team(&plan.team, form)
}

fn apply_event(event: &PlanEvent, form: &mut ServiceForm) -> Result<()> {
    if let Some(value) = &event.event_type {
        let event_type = EventType::from_value(value).ok_or_else(|| Error::InvalidInput {
            field: "event.type",
            value: value.clone(),
        })?;

        match event_type {
            EventType::Other(_) => {
                let name = event.name.as_deref().unwrap_or_default();
                if !form.event.set_custom_name(name) {
                    return Err(Error::InvalidInput {
                        field: "event.name",
                        value: name.to_string(),
                    });
                }
            }
            event_type => form.event.select(event_type),
        }
    }

    if let Some(date) = &event.date {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            Error::InvalidInput {
                field: "event.date",
                value: date.clone(),
            }
        })?;
        form.event.set_date(date);
    }

    Ok(())
}

fn apply_sermon(sermon: &PlanSermon, form: &mut ServiceForm) -> Result<()> {
    let check = |accepted: bool, field: &'static str, value: &str| {
        if accepted {
            Ok(())
        } else {
            Err(Error::InvalidInput {
                field,
                value: value.to_string(),
            })
        }
    };

    if let Some(series) = &sermon.series {
        check(form.sermon.set_series(series), "sermon.series", series)?;
    }
    if let Some(title) = &sermon.title {
        check(form.sermon.set_title(title), "sermon.title", title)?;
    }
    if let Some(book) = &sermon.book {
        form.sermon.select_book(book)?;
    }
    if let Some(chapter) = &sermon.chapter {
        check(form.sermon.set_chapter(chapter), "sermon.chapter", chapter)?;
    }
    if let Some(verse) = &sermon.verse {
        check(form.sermon.set_verse(verse), "sermon.verse", verse)?;
    }

    Ok(())
}

fn apply_programme(items: &[PlanProgrammeItem], form: &mut ServiceForm) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    form.programme = runsheet_rs::form::ProgrammeFlow::empty();
    for item in items {
        let index = form.programme.push();
        if !form.programme.set_name(index, item.name.trim())? {
            return Err(Error::InvalidInput {
                field: "programme.name",
                value: item.name.clone(),
            });
        }

        if let Some(start) = &item.start {
            form.programme.set_start(index, Some(parse_time(start)?))?;
        }
        if let Some(end) = &item.end {
            form.programme.set_end(index, Some(parse_time(end)?))?;
        }
    }

    Ok(())
}

fn apply_team(team: &PlanTeam, form: &mut ServiceForm) -> Result<()> {
    for _ in 0..team.extra_voices {
        form.add_vocal_part();
    }

    // 枠の並び順で割り当てる
    let mut assignments = team
        .assignments
        .iter()
        .map(|(slot, id)| -> Result<(SlotId, CandidateId)> {
            Ok((SlotId::parse(slot)?, CandidateId::new(id.trim())))
        })
        .collect::<Result<Vec<_>>>()?;
    assignments.sort_by_key(|(slot, _)| *slot);

    for (slot, id) in assignments {
        form.assign(slot, id)?;
    }

    Ok(())
}
