//! Export per-fight PvE trial records as CSV for offline analysis.
//!
//! Columns: fight, outcome, rounds, mob_hp_remaining, squad_hits, mob_hits.

use std::io::Write;

use crate::combat::pve::FightRecord;

const HEADER: [&str; 6] = [
    "fight",
    "outcome",
    "rounds",
    "mob_hp_remaining",
    "squad_hits",
    "mob_hits",
];

/// Write `records` with a header row to `writer`.
pub fn write_fight_records<W: Write>(writer: W, records: &[FightRecord]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;
    for record in records {
        out.write_record([
            record.index.to_string(),
            record.outcome.label().to_string(),
            record.outcome.rounds().to_string(),
            format!("{:.2}", record.mob_hp_remaining),
            record.squad_hits.to_string(),
            record.mob_hits.to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Render `records` to a CSV string.
pub fn fight_records_to_csv(records: &[FightRecord]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_fight_records(&mut buffer, records)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
