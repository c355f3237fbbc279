use crate::block_parser::{item_offsets, parse_long_form, parse_short_form};
use crate::decode::decode_buffer;
use crate::file::TextgridForm;
use crate::Textgrid;
use anyhow::{Context, Result};

/// Which encoding `text` is written in: short when the header says so or
/// when no line opens an `item [` block.
pub fn detect_form(text: &str) -> TextgridForm {
    if text.contains("ooTextFile short") || item_offsets(text).is_empty() {
        TextgridForm::Short
    } else {
        TextgridForm::Long
    }
}

/// Parses TextGrid text in either form.
///
/// Unless `read_raw` is set, entries with an empty label are dropped; those
/// are the blanks written by [`serialize_textgrid`](crate::serialize_textgrid).
pub fn parse_textgrid(text: &str, read_raw: bool) -> Result<Textgrid> {
    let text = text.replace("\r\n", "\n");
    let form = detect_form(&text);

    let textgrid = match form {
        TextgridForm::Short => parse_short_form(&text, read_raw),
        TextgridForm::Long => parse_long_form(&text, read_raw),
    }
    .with_context(|| format!("Failed to parse {} form TextGrid", form))?;

    log::debug!(
        "Parsed {} form TextGrid with {} tiers ({}..{})",
        form,
        textgrid.len(),
        textgrid.min_timestamp(),
        textgrid.max_timestamp()
    );
    Ok(textgrid)
}

/// Decodes `bytes` with [`decode_buffer`] and parses the result.
pub fn parse_textgrid_bytes(bytes: &[u8], read_raw: bool) -> Result<Textgrid> {
    parse_textgrid(&decode_buffer(bytes), read_raw)
}
