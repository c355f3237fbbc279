use crate::types::entry::TierKind;
use crate::types::policy::CropMode;
use crate::util::format_time;
use crate::{Result, Textgrid, TextgridError};

#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Columns to write, in order. Every tier when `None`.
    pub tier_names: Option<Vec<String>>,
    pub include_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            tier_names: None,
            include_header: true,
        }
    }
}

/// One row per interval of the `pivot` tier: the first label each requested
/// tier has inside that interval, then the interval's start and end.
///
/// Cells are joined with commas as-is; labels containing commas or newlines
/// will break the table.
pub fn serialize_textgrid_to_csv(tg: &Textgrid, pivot: &str, options: &CsvOptions) -> Result<String> {
    let pivot_tier = tg
        .require_tier(pivot)?
        .as_interval_tier()
        .ok_or_else(|| TextgridError::UnexpectedTierKind {
            tier_name: pivot.to_string(),
            expected: TierKind::Interval,
        })?;
    let names: Vec<String> = options
        .tier_names
        .clone()
        .unwrap_or_else(|| tg.tier_names().to_vec());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(pivot_tier.len() + 1);
    if options.include_header {
        let mut header = names.clone();
        header.push("Start Time".to_string());
        header.push("End Time".to_string());
        rows.push(header);
    }

    for entry in pivot_tier.entries() {
        let window = tg.crop(entry.start, entry.end, CropMode::Truncated, false)?;
        let mut row: Vec<String> = names
            .iter()
            .map(|name| {
                window
                    .tier(name)
                    .and_then(|tier| tier.first_label())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        row.push(format_time(entry.start));
        row.push(format_time(entry.end));
        rows.push(row);
    }

    Ok(rows
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n"))
}
