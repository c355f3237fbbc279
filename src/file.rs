use crate::Textgrid;
use crate::transforms::normalize::prep_for_saving;
use crate::types::tier::AnyTier;
use crate::util::{MIN_INTERVAL_LENGTH, format_time};
use std::fmt;

const TAB: &str = "    ";

/// The two text encodings of a TextGrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextgridForm {
    /// One value per line.
    #[default]
    Short,
    /// Indented `key = value` blocks.
    Long,
}

impl fmt::Display for TextgridForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextgridForm::Short => write!(f, "short"),
            TextgridForm::Long => write!(f, "long"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SerializeOptions {
    /// Intervals shorter than this are folded into their neighbour. `None` keeps them.
    pub min_interval_length: Option<f64>,
    /// Range written to the file; the textgrid's own range when `None`.
    pub min_timestamp: Option<f64>,
    pub max_timestamp: Option<f64>,
    pub form: TextgridForm,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            min_interval_length: Some(MIN_INTERVAL_LENGTH),
            min_timestamp: None,
            max_timestamp: None,
            form: TextgridForm::Short,
        }
    }
}

/// Renders an already normalized textgrid. Use [`serialize_textgrid`] unless
/// the textgrid came out of [`prep_for_saving`].
pub struct TextgridFormatter<'a> {
    textgrid: &'a Textgrid,
    min_timestamp: f64,
    max_timestamp: f64,
    form: TextgridForm,
}

impl<'a> TextgridFormatter<'a> {
    pub fn new(textgrid: &'a Textgrid, min_timestamp: f64, max_timestamp: f64, form: TextgridForm) -> Self {
        Self {
            textgrid,
            min_timestamp,
            max_timestamp,
            form,
        }
    }

    fn fmt_short(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", format_time(self.min_timestamp))?;
        writeln!(f, "{}", format_time(self.max_timestamp))?;
        writeln!(f, "<exists>")?;
        writeln!(f, "{}", self.textgrid.len())?;

        for tier in self.textgrid.tiers() {
            writeln!(f, "\"{}\"", tier.kind().class_name())?;
            writeln!(f, "\"{}\"", tier.name())?;
            writeln!(f, "{}", format_time(tier.min_timestamp()))?;
            writeln!(f, "{}", format_time(tier.max_timestamp()))?;
            writeln!(f, "{}", tier.len())?;

            match tier {
                AnyTier::Interval(tier) => {
                    for entry in tier.entries() {
                        writeln!(f, "{}", format_time(entry.start))?;
                        writeln!(f, "{}", format_time(entry.end))?;
                        writeln!(f, "\"{}\"", entry.label)?;
                    }
                }
                AnyTier::Point(tier) => {
                    for entry in tier.entries() {
                        writeln!(f, "{}", format_time(entry.time))?;
                        writeln!(f, "\"{}\"", entry.label)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn fmt_long(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = format_time(self.min_timestamp);
        let max = format_time(self.max_timestamp);

        writeln!(f, "xmin = {} ", min)?;
        writeln!(f, "xmax = {} ", max)?;
        writeln!(f, "tiers? <exists> ")?;
        writeln!(f, "size = {} ", self.textgrid.len())?;
        writeln!(f, "item []: ")?;

        let (t1, t2, t3) = (TAB, TAB.repeat(2), TAB.repeat(3));
        for (i, tier) in self.textgrid.tiers().enumerate() {
            writeln!(f, "{t1}item [{}]:", i + 1)?;
            writeln!(f, "{t2}class = \"{}\" ", tier.kind().class_name())?;
            writeln!(f, "{t2}name = \"{}\" ", tier.name())?;
            writeln!(f, "{t2}xmin = {} ", min)?;
            writeln!(f, "{t2}xmax = {} ", max)?;

            match tier {
                AnyTier::Interval(tier) => {
                    writeln!(f, "{t2}intervals: size = {} ", tier.len())?;
                    for (j, entry) in tier.entries().iter().enumerate() {
                        writeln!(f, "{t2}intervals [{}]:", j + 1)?;
                        writeln!(f, "{t3}xmin = {} ", format_time(entry.start))?;
                        writeln!(f, "{t3}xmax = {} ", format_time(entry.end))?;
                        writeln!(f, "{t3}text = \"{}\" ", entry.label)?;
                    }
                }
                AnyTier::Point(tier) => {
                    writeln!(f, "{t2}points: size = {} ", tier.len())?;
                    for (j, entry) in tier.entries().iter().enumerate() {
                        writeln!(f, "{t2}points [{}]:", j + 1)?;
                        writeln!(f, "{t3}number = {} ", format_time(entry.time))?;
                        writeln!(f, "{t3}mark = \"{}\" ", entry.label)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a> fmt::Display for TextgridFormatter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File type = \"ooTextFile\"")?;
        writeln!(f, "Object class = \"TextGrid\"")?;
        writeln!(f)?;
        match self.form {
            TextgridForm::Short => self.fmt_short(f),
            TextgridForm::Long => self.fmt_long(f),
        }
    }
}

/// Normalizes `textgrid` with [`prep_for_saving`] and renders it as text.
pub fn serialize_textgrid(textgrid: &Textgrid, options: &SerializeOptions) -> crate::Result<String> {
    let min = options.min_timestamp.unwrap_or(textgrid.min_timestamp());
    let max = options.max_timestamp.unwrap_or(textgrid.max_timestamp());

    let prepared = prep_for_saving(textgrid, options.min_interval_length, Some(min), Some(max))?;
    Ok(TextgridFormatter::new(&prepared, min, max, options.form).to_string())
}

impl Textgrid {
    /// Renders this textgrid as-is, without the normalization pass.
    pub fn display_as(&self, form: TextgridForm) -> TextgridFormatter<'_> {
        TextgridFormatter::new(self, self.min_timestamp(), self.max_timestamp(), form)
    }
}
