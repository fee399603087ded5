pub mod input;

mod dress_code;
mod event;
mod programme;
mod sermon;
mod set_list;
mod team;

pub use dress_code::{DressCode, HexColor};
pub use event::{EventDetails, EventType};
pub use programme::{format_time_12h, parse_time, ProgrammeFlow, ProgrammeItem};
pub use sermon::{search_books, Sermon, BIBLE_BOOKS};
pub use set_list::{SetList, SetListCategory, SetListDraft, SetListEntry};
pub use team::{Team, DEFAULT_VOCAL_PARTS};

use crate::algorithm::AssignmentResolver;
use crate::summary::Schedule;
use crate::{Candidate, CandidateId, Result, Roster, SlotId};

/// 運営表の入力一式
#[derive(Debug, Clone, Default)]
pub struct ServiceForm {
    roster: Roster,
    pub event: EventDetails,
    pub programme: ProgrammeFlow,
    pub sermon: Sermon,
    pub dress_code: DressCode,
    pub set_list: SetList,
    team: Team,
}

impl ServiceForm {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Default::default()
        }
    }

    pub fn with_resolver(roster: Roster, resolver: AssignmentResolver) -> Self {
        Self {
            roster,
            team: Team::with_resolver(resolver),
            ..Default::default()
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn add_vocal_part(&mut self) -> SlotId {
        self.team.add_vocal_part()
    }

    pub fn assign(&mut self, slot: SlotId, id: CandidateId) -> Result<Option<CandidateId>> {
        self.team.assign(slot, id, &self.roster)
    }

    pub fn clear(&mut self, slot: SlotId) -> Option<CandidateId> {
        self.team.clear(slot)
    }

    pub fn eligible(&self, slot: SlotId) -> Result<Vec<&Candidate>> {
        self.team.eligible(slot, &self.roster)
    }

    pub fn selected(&self, slot: SlotId) -> Option<&Candidate> {
        self.team.selected(slot, &self.roster)
    }

    /// 共有用の文書を作ります。呼ぶたびに新しいトークンが振られる
    pub fn to_schedule(&self) -> Schedule {
        Schedule::new(self)
    }
}
