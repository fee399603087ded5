use runsheet_rs::{Candidate, InstrumentType, Roster, RosterKind};

/// 読み込んだ名簿と演奏者の楽器フィルター
pub struct RosterList {
    roster: Roster,

    instrument_filter: InstrumentType,
}

impl RosterList {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            instrument_filter: Default::default(),
        }
    }

    pub fn from_csv(data: &str) -> Result<Self, crate::Error> {
        let roster = crate::deserialize(data)?;
        Ok(Self::new(roster))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn filter(&self) -> InstrumentType {
        self.instrument_filter
    }

    pub fn add_filter(&mut self, filter: InstrumentType) {
        self.instrument_filter = self.instrument_filter.union(filter);
    }

    pub fn remove_filter(&mut self, filter: InstrumentType) {
        self.instrument_filter.remove(filter);
    }

    pub fn clear_instrument_filter(&mut self) {
        self.instrument_filter = self.instrument_filter.intersection(Default::default());
    }

    /// フィルターが空なら全員
    pub fn musicians(&self) -> Vec<&Candidate> {
        if self.instrument_filter.is_empty() {
            return self.roster.candidates(RosterKind::Musicians).iter().collect();
        }

        self.roster
            .musicians_with_filter(self.instrument_filter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use runsheet_rs::InstrumentType;

    use super::RosterList;

    const DATA: &str = "\
table,id,name,category
musicians,1,Ann,Drums
musicians,2,Ben,Keyboard
musicians,3,Levi,Bass Guitar
vocalists,1,Eve,
";

    fn names(list: &RosterList) -> Vec<&str> {
        list.musicians().iter().map(|x| x.name()).collect()
    }

    #[test]
    fn filter() {
        let mut list = RosterList::from_csv(DATA).unwrap();
        assert_eq!(names(&list), vec!["Ann", "Ben", "Levi"]);

        list.add_filter(InstrumentType::DRUMS);
        list.add_filter(InstrumentType::BASS_GUITAR);
        assert_eq!(names(&list), vec!["Ann", "Levi"]);

        list.remove_filter(InstrumentType::DRUMS);
        assert_eq!(names(&list), vec!["Levi"]);
        assert_eq!(list.filter(), InstrumentType::BASS_GUITAR);

        list.clear_instrument_filter();
        assert!(list.filter().is_empty());
        assert_eq!(names(&list).len(), 3);
    }
}
