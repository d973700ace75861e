//! CSV export of group standings, one row per player (`date,name,group,rank,points,detail`).

use crate::logic::{Rank, TournamentView};
use crate::models::ViewerError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PointsRow<'a> {
    date: &'a str,
    name: &'a str,
    group: u32,
    rank: String,
    points: u32,
    detail: String,
}

/// Standings of every group as CSV. Players without a rank get an empty rank column.
pub fn standings_csv(view: &TournamentView) -> Result<String, ViewerError> {
    let export_err = |e: csv::Error| ViewerError::Export(e.to_string());
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for group in &view.groups {
        for record in &group.standings.records {
            let rank = group
                .final_ranks
                .iter()
                .find(|r| r.player == record.player)
                .map(|r| r.final_rank)
                .unwrap_or(Rank::Unranked);
            wtr.serialize(PointsRow {
                date: &view.metadata.date,
                name: &record.player,
                group: group.number,
                rank: rank.to_string(),
                points: record.points(),
                detail: format!(
                    "{}W {}L ({}-{})",
                    record.win, record.lose, record.sets_for, record.sets_against
                ),
            })
            .map_err(export_err)?;
        }
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ViewerError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ViewerError::Export(e.to_string()))
}
