use crate::types::entry::{Interval, Point, TierKind};
use crate::types::tier::{AnyTier, IntervalTier, PointTier};
use crate::Textgrid;
use anyhow::{Context, Result, bail};

const INTERVAL_MARKER: &str = "\"IntervalTier\"";
const POINT_MARKER: &str = "\"TextTier\"";

/// Walks a block of text row by row, either to the value following a
/// keyword or to the next bare line. Only ever moves forward.
pub(crate) struct RowCursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> RowCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    /// The rest of the line after the next `key`, dequoted and trimmed.
    pub fn value_after(&mut self, key: &str) -> Option<String> {
        let found = self.text[self.position..].find(key)?;
        self.take_line_from(self.position + found + key.len())
    }

    /// The next line, dequoted and trimmed. `None` once only whitespace remains.
    pub fn next_row(&mut self) -> Option<String> {
        if self.text[self.position..].trim().is_empty() {
            return None;
        }
        self.take_line_from(self.position)
    }

    fn take_line_from(&mut self, start: usize) -> Option<String> {
        let end = self.text[start..]
            .find('\n')
            .map_or(self.text.len(), |offset| start + offset);
        self.position = (end + 1).min(self.text.len());
        Some(clean_value(&self.text[start..end]))
    }
}

/// Trims a raw value and strips one pair of surrounding quotes.
pub(crate) fn clean_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

fn parse_time(value: &str, what: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .with_context(|| format!("Invalid {} '{}'", what, value))
}

/// Rows collected for one tier before it is validated.
#[derive(Debug)]
struct TierBlock {
    kind: TierKind,
    name: String,
    min_timestamp: f64,
    max_timestamp: f64,
    intervals: Vec<Interval>,
    points: Vec<Point>,
}

impl TierBlock {
    fn into_tier(self, read_raw: bool) -> Result<AnyTier> {
        let min = Some(self.min_timestamp);
        let max = Some(self.max_timestamp);
        let name = self.name;

        let tier: AnyTier = match self.kind {
            TierKind::Interval => {
                let entries = self
                    .intervals
                    .into_iter()
                    .filter(|entry| read_raw || !entry.label.is_empty())
                    .collect();
                IntervalTier::new(name.clone(), entries, min, max)
                    .with_context(|| format!("Tier '{}'", name))?
                    .into()
            }
            TierKind::Point => {
                let entries = self
                    .points
                    .into_iter()
                    .filter(|entry| read_raw || !entry.label.is_empty())
                    .collect();
                PointTier::new(name.clone(), entries, min, max)
                    .with_context(|| format!("Tier '{}'", name))?
                    .into()
            }
        };
        Ok(tier)
    }
}

fn header_value(header: &str, key: &str) -> Result<f64> {
    let value = RowCursor::new(header)
        .value_after(key)
        .with_context(|| format!("Missing '{}' in header", key.trim()))?;
    parse_time(&value, key.trim_end_matches(" = "))
}

const ITEM_MARKER: &str = "item [";

/// Byte offsets of every `item [` that opens a line. Labels mentioning
/// `item [` are quoted, so they never match.
pub(crate) fn item_offsets(text: &str) -> Vec<usize> {
    text.match_indices(ITEM_MARKER)
        .map(|(offset, _)| offset)
        .filter(|&offset| {
            let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
            text[line_start..offset].trim().is_empty()
        })
        .collect()
}

/// Parses the verbose `key = value` form.
pub(crate) fn parse_long_form(text: &str, read_raw: bool) -> Result<Textgrid> {
    let offsets = item_offsets(text);
    let header = &text[..offsets.first().copied().unwrap_or(text.len())];
    let mut pieces = offsets.iter().enumerate().map(|(i, &offset)| {
        let end = offsets.get(i + 1).copied().unwrap_or(text.len());
        &text[offset + ITEM_MARKER.len()..end]
    });
    let min = header_value(header, "xmin = ")?;
    let max = header_value(header, "xmax = ")?;

    let mut textgrid = Textgrid::with_bounds(min, max);
    // the first piece is the `item []:` root
    pieces.next();
    for (index, block) in pieces.enumerate() {
        let tier = parse_long_tier(block)
            .with_context(|| format!("Tier #{}", index + 1))?
            .into_tier(read_raw)?;
        textgrid.add_tier(tier, None)?;
    }
    Ok(textgrid)
}

fn parse_long_tier(block: &str) -> Result<TierBlock> {
    let (kind, section) = if block.contains("class = \"IntervalTier\"") {
        (TierKind::Interval, "intervals:")
    } else {
        (TierKind::Point, "points:")
    };
    let (header, rows) = block.split_once(section).unwrap_or((block, ""));

    let mut cursor = RowCursor::new(header);
    let name = cursor.value_after("name = ").context("Missing tier name")?;
    let min_timestamp = header_value(header, "xmin = ")?;
    let max_timestamp = header_value(header, "xmax = ")?;

    let mut tier = TierBlock {
        kind,
        name,
        min_timestamp,
        max_timestamp,
        intervals: Vec::new(),
        points: Vec::new(),
    };

    let mut cursor = RowCursor::new(rows);
    match kind {
        TierKind::Interval => {
            while let Some(start) = cursor.value_after("xmin = ") {
                let end = cursor.value_after("xmax = ").context("Interval without xmax")?;
                let label = cursor.value_after("text =").context("Interval without text")?;
                tier.intervals.push(Interval::new(
                    parse_time(&start, "xmin")?,
                    parse_time(&end, "xmax")?,
                    label,
                ));
            }
        }
        TierKind::Point => {
            while let Some(time) = cursor.value_after("number = ") {
                let label = cursor.value_after("mark =").context("Point without mark")?;
                tier.points.push(Point::new(parse_time(&time, "number")?, label));
            }
        }
    }
    Ok(tier)
}

/// Parses the compact one-value-per-line form.
pub(crate) fn parse_short_form(text: &str, read_raw: bool) -> Result<Textgrid> {
    let mut markers: Vec<(usize, TierKind)> = text
        .match_indices(INTERVAL_MARKER)
        .map(|(index, _)| (index, TierKind::Interval))
        .chain(
            text.match_indices(POINT_MARKER)
                .map(|(index, _)| (index, TierKind::Point)),
        )
        .collect();
    markers.sort_by_key(|&(index, _)| index);

    let header_end = markers.first().map_or(text.len(), |&(index, _)| index);
    let header: Vec<&str> = text[..header_end].split('\n').collect();
    let (Some(min), Some(max)) = (header.get(3), header.get(4)) else {
        bail!("Header is missing the xmin and xmax rows");
    };
    let mut textgrid = Textgrid::with_bounds(
        parse_time(min.trim(), "xmin")?,
        parse_time(max.trim(), "xmax")?,
    );

    for (index, &(start, kind)) in markers.iter().enumerate() {
        let end = markers.get(index + 1).map_or(text.len(), |&(next, _)| next);
        let tier = parse_short_tier(&text[start..end], kind)
            .with_context(|| format!("Tier #{}", index + 1))?
            .into_tier(read_raw)?;
        textgrid.add_tier(tier, None)?;
    }
    Ok(textgrid)
}

fn parse_short_tier(block: &str, kind: TierKind) -> Result<TierBlock> {
    let mut cursor = RowCursor::new(block);
    let mut row = |what: &str| {
        cursor
            .next_row()
            .with_context(|| format!("Missing {}", what))
    };

    row("tier class")?;
    let name = row("tier name")?;
    let min_timestamp = parse_time(&row("tier xmin")?, "xmin")?;
    let max_timestamp = parse_time(&row("tier xmax")?, "xmax")?;
    row("entry count")?;

    let mut tier = TierBlock {
        kind,
        name,
        min_timestamp,
        max_timestamp,
        intervals: Vec::new(),
        points: Vec::new(),
    };

    match kind {
        TierKind::Interval => {
            while let Some(start) = cursor.next_row() {
                let end = cursor.next_row().context("Interval without xmax")?;
                let label = cursor.next_row().context("Interval without text")?;
                tier.intervals.push(Interval::new(
                    parse_time(&start, "xmin")?,
                    parse_time(&end, "xmax")?,
                    label,
                ));
            }
        }
        TierKind::Point => {
            while let Some(time) = cursor.next_row() {
                let label = cursor.next_row().context("Point without mark")?;
                tier.points.push(Point::new(parse_time(&time, "number")?, label));
            }
        }
    }
    Ok(tier)
}
