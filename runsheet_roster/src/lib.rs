pub mod clients;
mod roster_list;

use std::collections::HashSet;

pub use roster_list::RosterList;
use runsheet_rs::{Candidate, CreativeRole, InstrumentType, Roster, RosterKind};
use thiserror::Error;

use crate::clients::IClient;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `table,id,name,category` の 1 行
#[derive(Debug, serde::Deserialize)]
pub struct Record {
    table: String,
    id: String,
    name: String,

    // 演奏者は楽器、クリエイティブは役割
    #[serde(default)]
    category: Option<String>,
}

/// CSV から名簿を読みます。知らない表や不正な行は読み飛ばす
pub fn deserialize(str: &str) -> Result<Roster, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(str.as_bytes());

    let mut roster = Roster::default();
    let mut ids = HashSet::<(RosterKind, String)>::default();
    for record in rdr.deserialize::<Record>() {
        let record = record?;

        let Some(kind) = RosterKind::from_table_name(&record.table) else {
            log::warn!("skipped a row of unknown table `{}`", record.table);
            continue;
        };

        if record.id.is_empty() || record.name.is_empty() {
            log::warn!("skipped a row without id or name in `{}`", record.table);
            continue;
        }

        if !ids.insert((kind, record.id.clone())) {
            log::warn!("skipped duplicated id `{}` in `{}`", record.id, record.table);
            continue;
        }

        let candidate = match (kind, record.category) {
            (RosterKind::Musicians, Some(category)) => {
                if InstrumentType::from_label(&category).is_none() {
                    log::warn!("unknown instrument `{}` for {}", category, record.name);
                }
                Candidate::with_category(record.id, record.name, category)
            }
            (RosterKind::Creatives, Some(category)) => {
                if CreativeRole::from_label(&category).is_none() {
                    log::warn!("unknown role `{}` for {}", category, record.name);
                }
                Candidate::with_category(record.id, record.name, category)
            }
            (RosterKind::Musicians, None) | (RosterKind::Creatives, None) => {
                log::warn!("{} has no category and fills no slot", record.name);
                Candidate::new(record.id, record.name)
            }
            // 役割ごとの名簿なので区分は使わない
            (_, _) => Candidate::new(record.id, record.name),
        };
        roster.push(kind, candidate);
    }

    Ok(roster)
}

pub fn load<T: IClient>(client: &mut T) -> Result<Roster, Error> {
    let data = client.fetch()?;
    deserialize(&data)
}
