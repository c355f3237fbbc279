pub mod append;
pub mod crop;
pub mod erase;
pub mod insert_space;
pub mod merge;
pub mod normalize;
pub mod offset;
pub mod set_ops;

use crate::types::policy::CropMode;
use crate::{Result, Textgrid};

/// Whole-textgrid edits applied by the converter before writing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformDescriptor {
    pub offset_amount: f64,
    pub crop: Option<(f64, f64)>,
    pub crop_mode: CropMode,
    pub rebase_to_zero: bool,
}

impl Default for TransformDescriptor {
    fn default() -> Self {
        Self {
            offset_amount: 0.0,
            crop: None,
            crop_mode: CropMode::Truncated,
            rebase_to_zero: false,
        }
    }
}

pub fn apply_transforms(tg: &Textgrid, transforms: &TransformDescriptor) -> Result<Textgrid> {
    let mut current = tg.clone();

    // order is important here: the crop window is in shifted time

    if transforms.offset_amount != 0.0 {
        current = current.edit_timestamps(transforms.offset_amount, true)?;
    }

    if let Some((start, end)) = transforms.crop {
        current = current.crop(start, end, transforms.crop_mode, transforms.rebase_to_zero)?;
    }

    Ok(current)
}
