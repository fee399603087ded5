use crate::algorithm::{AssignmentResolver, Selections};
use crate::{Candidate, CandidateId, Error, Result, Roster, SlotId};

pub const DEFAULT_VOCAL_PARTS: [&str; 4] = ["Soprano", "Alto", "Tenor", "Bass"];

/// 役割の割り当て
#[derive(Debug, Clone)]
pub struct Team {
    vocal_parts: Vec<String>,
    selections: Selections,
    resolver: AssignmentResolver,
}

impl Default for Team {
    fn default() -> Self {
        Self::with_resolver(AssignmentResolver::default())
    }
}

impl Team {
    pub fn with_resolver(resolver: AssignmentResolver) -> Self {
        Self {
            vocal_parts: DEFAULT_VOCAL_PARTS.iter().map(|x| x.to_string()).collect(),
            selections: Selections::default(),
            resolver,
        }
    }

    /// ボーカルの枠を増やします。名前は `Voice N`
    pub fn add_vocal_part(&mut self) -> SlotId {
        let index = self.vocal_parts.len();
        self.vocal_parts.push(format!("Voice {}", index + 1));
        SlotId::Vocal(index)
    }

    pub fn vocal_parts(&self) -> &[String] {
        &self.vocal_parts
    }

    /// 画面に並ぶ順の全枠
    pub fn slots(&self) -> Vec<SlotId> {
        [
            SlotId::Preacher,
            SlotId::PreachingSupport,
            SlotId::WorshipLeader,
        ]
        .into_iter()
        .chain((0..self.vocal_parts.len()).map(SlotId::Vocal))
        .chain(SlotId::musicians())
        .chain(SlotId::creatives())
        .collect()
    }

    pub fn has_slot(&self, slot: SlotId) -> bool {
        match slot {
            SlotId::Vocal(index) => index < self.vocal_parts.len(),
            SlotId::Musician(_) | SlotId::Creative(_) => slot.category().is_some(),
            _ => true,
        }
    }

    pub fn slot_label(&self, slot: SlotId) -> Option<&str> {
        match slot {
            SlotId::Preacher => Some("Preacher"),
            SlotId::PreachingSupport => Some("Support"),
            SlotId::WorshipLeader => Some("Worship Leader"),
            SlotId::Vocal(index) => self.vocal_parts.get(index).map(String::as_str),
            SlotId::Musician(_) | SlotId::Creative(_) => slot.category(),
        }
    }

    pub fn eligible<'a>(&self, slot: SlotId, roster: &'a Roster) -> Result<Vec<&'a Candidate>> {
        self.check_slot(slot)?;
        Ok(self.resolver.eligible(slot, roster, &self.selections))
    }

    /// 枠に候補を割り当てます。選べない候補ならエラーで、選択は変わらない
    pub fn assign(
        &mut self,
        slot: SlotId,
        id: CandidateId,
        roster: &Roster,
    ) -> Result<Option<CandidateId>> {
        self.check_slot(slot)?;

        let candidate = roster
            .find(slot.roster_kind(), &id)
            .ok_or_else(|| Error::UnknownCandidate {
                slot,
                id: id.clone(),
            })?;

        if let Some(category) = slot.category() {
            if candidate.category() != Some(category) {
                return Err(Error::CategoryMismatch {
                    slot,
                    name: candidate.name().to_string(),
                });
            }
        }

        if let Some(other) =
            self.resolver
                .conflicting_slot(slot, candidate, roster, &self.selections)
        {
            return Err(Error::Conflict {
                slot,
                other,
                name: candidate.name().to_string(),
            });
        }

        Ok(self.selections.select(slot, id))
    }

    pub fn clear(&mut self, slot: SlotId) -> Option<CandidateId> {
        self.selections.clear(slot)
    }

    pub fn selected<'a>(&self, slot: SlotId, roster: &'a Roster) -> Option<&'a Candidate> {
        let id = self.selections.get(slot)?;
        roster.find(slot.roster_kind(), id)
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn resolver(&self) -> &AssignmentResolver {
        &self.resolver
    }

    fn check_slot(&self, slot: SlotId) -> Result<()> {
        if self.has_slot(slot) {
            Ok(())
        } else {
            Err(Error::UnknownSlot(slot.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Team;
    use crate::algorithm::{AssignmentResolver, ConflictKey};
    use crate::{Candidate, CandidateId, CreativeRole, Error, InstrumentType, Roster, RosterKind, SlotId};

    const DRUMS: SlotId = SlotId::Musician(InstrumentType::DRUMS);
    const KEYBOARD: SlotId = SlotId::Musician(InstrumentType::KEYBOARD);

    fn create_roster() -> Roster {
        let mut roster = Roster::default();
        roster.push(RosterKind::Musicians, Candidate::with_category("1", "Ann", "Drums"));
        roster.push(RosterKind::Musicians, Candidate::with_category("2", "Ann", "Keyboard"));
        roster.push(RosterKind::Musicians, Candidate::with_category("3", "Ben", "Keyboard"));
        roster.push(RosterKind::Vocalists, Candidate::new("4", "Eve"));
        roster.push(RosterKind::Vocalists, Candidate::new("5", "Dan"));
        roster.push(RosterKind::WorshipLeaders, Candidate::new("6", "Eve"));
        roster
    }

    fn ids(candidates: &[&Candidate]) -> Vec<String> {
        candidates.iter().map(|x| x.id().to_string()).collect()
    }

    #[test]
    fn slots() {
        let mut team = Team::default();
        assert_eq!(team.slots().len(), 3 + 4 + 5 + 5);
        assert_eq!(team.slot_label(SlotId::Vocal(3)), Some("Bass"));
        assert!(!team.has_slot(SlotId::Vocal(4)));

        let slot = team.add_vocal_part();
        assert_eq!(slot, SlotId::Vocal(4));
        assert_eq!(team.slot_label(slot), Some("Voice 5"));
        assert!(team.slots().contains(&slot));
        assert_eq!(
            team.slot_label(SlotId::Creative(CreativeRole::PROMPTER)),
            Some("Prompter")
        );
    }

    // 同名の別人も弾かれる
    #[test]
    fn namesake_excluded() {
        let roster = create_roster();
        let mut team = Team::default();
        team.assign(DRUMS, CandidateId::new("1"), &roster).unwrap();

        let eligible = team.eligible(KEYBOARD, &roster).unwrap();
        assert_eq!(ids(&eligible), vec!["3"]);

        let error = team.assign(KEYBOARD, CandidateId::new("2"), &roster).unwrap_err();
        assert!(matches!(error, Error::Conflict { other, .. } if other == DRUMS));
        assert!(team.selections().get(KEYBOARD).is_none());
    }

    #[test]
    fn namesake_allowed_by_id() {
        let roster = create_roster();
        let mut team = Team::with_resolver(AssignmentResolver::with_conflict_key(ConflictKey::Id));
        team.assign(DRUMS, CandidateId::new("1"), &roster).unwrap();
        team.assign(KEYBOARD, CandidateId::new("2"), &roster).unwrap();
        assert_eq!(team.selected(KEYBOARD, &roster).unwrap().name(), "Ann");
    }

    #[test]
    fn clear_restores() {
        let roster = create_roster();
        let mut team = Team::default();
        team.assign(SlotId::WorshipLeader, CandidateId::new("6"), &roster).unwrap();
        assert_eq!(ids(&team.eligible(SlotId::Vocal(0), &roster).unwrap()), vec!["5"]);

        assert_eq!(team.clear(SlotId::WorshipLeader), Some(CandidateId::new("6")));
        assert_eq!(
            ids(&team.eligible(SlotId::Vocal(0), &roster).unwrap()),
            vec!["5", "4"]
        );
    }

    #[test]
    fn selected_stays_eligible() {
        let roster = create_roster();
        let mut team = Team::default();
        team.assign(SlotId::Vocal(1), CandidateId::new("4"), &roster).unwrap();

        // 自分の枠では消えない
        let eligible = team.eligible(SlotId::Vocal(1), &roster).unwrap();
        assert!(eligible.iter().any(|x| x.id().as_str() == "4"));

        let eligible = team.eligible(SlotId::Vocal(2), &roster).unwrap();
        assert!(!eligible.iter().any(|x| x.id().as_str() == "4"));

        // 同じ枠に選び直すのは構わない
        assert!(team.assign(SlotId::Vocal(1), CandidateId::new("4"), &roster).is_ok());
    }

    #[test]
    fn invalid_assignment() {
        let roster = create_roster();
        let mut team = Team::default();

        let error = team.assign(DRUMS, CandidateId::new("3"), &roster).unwrap_err();
        assert!(matches!(error, Error::CategoryMismatch { .. }));

        let error = team.assign(DRUMS, CandidateId::new("99"), &roster).unwrap_err();
        assert!(matches!(error, Error::UnknownCandidate { .. }));

        let error = team.assign(SlotId::Vocal(9), CandidateId::new("4"), &roster).unwrap_err();
        assert!(matches!(error, Error::UnknownSlot(_)));

        let both = SlotId::Musician(InstrumentType::DRUMS | InstrumentType::KEYBOARD);
        assert!(team.eligible(both, &roster).is_err());
    }
}
