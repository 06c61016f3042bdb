//! Turns the rendered schedule table into per-queue disruption states.
//!
//! Everything here is synchronous and free of I/O; fetching the page and
//! writing the result live in [`crate::fetcher`] and [`crate::store`].

pub mod assembly;
pub mod classifier;
pub mod extractor;

use scraper::Html;

use crate::domain::{CellFlags, QueueSchedule};

pub use assembly::assemble;
pub use classifier::classify;
pub use extractor::{DayClass, RowValidator, StructureError, TableExtractor};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySchedules {
    pub today: QueueSchedule,
    pub tomorrow: QueueSchedule,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Report `maybe_first`/`maybe_second` as plain `maybe`.
    pub simplify_states: bool,
}

/// Parses both days out of an HTML page.
pub fn parse_page<V: RowValidator>(
    html: &str,
    extractor: &TableExtractor<V>,
    options: ParseOptions,
) -> Result<DaySchedules, StructureError> {
    let document = Html::parse_document(html);
    parse_document(&document, extractor, options)
}

pub fn parse_document<V: RowValidator>(
    document: &Html,
    extractor: &TableExtractor<V>,
    options: ParseOptions,
) -> Result<DaySchedules, StructureError> {
    let today = extractor.extract(document, DayClass::Current)?;
    let tomorrow = extractor.extract(document, DayClass::Other)?;
    Ok(DaySchedules {
        today: fold_schedule(today, options),
        tomorrow: fold_schedule(tomorrow, options),
    })
}

/// Classifies each cell; a repeated queue id keeps the last cell's state.
pub fn fold_schedule(
    cells: impl IntoIterator<Item = (String, CellFlags)>,
    options: ParseOptions,
) -> QueueSchedule {
    cells
        .into_iter()
        .map(|(queue, flags)| {
            let state = classify(flags);
            let state = if options.simplify_states {
                state.simplified()
            } else {
                state
            };
            (queue, state)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisruptionState;

    fn page(rows: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><body>
            <table class="disconnection-detailed-table">
                <thead><tr><th>Дата</th><th>00:00</th></tr></thead>
                <tbody>{rows}</tbody>
            </table></body></html>"#
        )
    }

    #[test]
    fn three_cell_row() {
        let html = page(
            r#"<tr>
                <td><div class="disconnection-detailed-table-cell cell current_day" data-queue="A"></div></td>
                <td><div class="disconnection-detailed-table-cell cell current_day has_disconnection full_hour confirm_1" data-queue="B"></div></td>
                <td><div class="disconnection-detailed-table-cell cell current_day has_disconnection confirm_1">
                    <div class="half left has_disconnection"></div><div class="half right"></div>
                </div></td>
            </tr>"#,
        );
        let schedules =
            parse_page(&html, &TableExtractor::new(), ParseOptions::default()).unwrap();

        let today: Vec<_> = schedules
            .today
            .iter()
            .map(|(queue, state)| (queue.as_str(), *state))
            .collect();
        assert_eq!(
            today,
            [
                ("A", DisruptionState::Yes),
                ("B", DisruptionState::No),
                ("Queue_2", DisruptionState::First),
            ]
        );
        assert!(schedules.tomorrow.is_empty());
    }

    #[test]
    fn empty_body_is_structure_error() {
        let html = page("");
        assert_eq!(
            parse_page(&html, &TableExtractor::new(), ParseOptions::default()),
            Err(StructureError::NoRows)
        );
    }

    #[test]
    fn later_duplicate_wins() {
        let cells = vec![
            ("1".to_string(), CellFlags::default()),
            (
                "1".to_string(),
                CellFlags {
                    has_disconnection: true,
                    is_full_hour: true,
                    is_confirm_0: true,
                    ..CellFlags::default()
                },
            ),
        ];
        let schedule = fold_schedule(cells, ParseOptions::default());
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule["1"], DisruptionState::Maybe);
    }

    #[test]
    fn simplify_collapses_half_forecasts() {
        let html = page(
            r#"<tr><td><div class="disconnection-detailed-table-cell cell current_day" data-queue="1"></div></td></tr>
               <tr><td><div class="disconnection-detailed-table-cell cell other_day has_disconnection confirm_0" data-queue="1">
                   <div class="half left"></div><div class="half right has_disconnection"></div>
               </div></td></tr>"#,
        );
        let extractor = TableExtractor::new();

        let plain = parse_page(&html, &extractor, ParseOptions::default()).unwrap();
        assert_eq!(plain.tomorrow["1"], DisruptionState::MaybeSecond);

        let simplified = parse_page(
            &html,
            &extractor,
            ParseOptions {
                simplify_states: true,
            },
        )
        .unwrap();
        assert_eq!(simplified.tomorrow["1"], DisruptionState::Maybe);
        assert_eq!(simplified.today["1"], DisruptionState::Yes);
    }
}
