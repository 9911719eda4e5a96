//! Record builders shared by unit tests

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    dataset::CirculationDataset,
    record::{CirculationRecord, TransactionKind},
};

/// A timestamp in January 2024 on `day` at `hour`:00.
pub(crate) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}

/// A dataset where each patron checks out `subjects` in order, one day apart.
pub(crate) fn journeys(patrons: &[(&str, &[&str])]) -> CirculationDataset {
    patrons
        .iter()
        .flat_map(|(patron, subjects)| {
            subjects.iter().enumerate().map(move |(i, subject)| {
                let day = u32::try_from(i).unwrap() + 1;
                CirculationRecord::new(*patron, Some(at(day, 10)), TransactionKind::CheckOut, *subject)
            })
        })
        .collect()
}
