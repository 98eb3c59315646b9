use itertools::Itertools;

use crate::entities::Piece;
use crate::error::{CutError, Result};
use crate::io::ext_repr::ExtRequest;

/// Internal form of an [`ExtRequest`], with validated dimensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CutRequest {
    pub bin_width: u32,
    pub bin_height: u32,
    pub pieces: Vec<Piece>,
}

/// Validates an external request and converts it into a [`CutRequest`].
///
/// Non-positive or out-of-range dimensions and duplicate ids are rejected with
/// [`CutError::InvalidInput`], before anything is packed.
pub fn import_request(ext_request: &ExtRequest) -> Result<CutRequest> {
    let bin_width = import_dimension(ext_request.bin_width, "bin_width")?;
    let bin_height = import_dimension(ext_request.bin_height, "bin_height")?;

    let pieces = ext_request
        .rectangles
        .iter()
        .map(|r| {
            let w = import_dimension(r.w, &format!("w of rectangle {}", r.id))?;
            let h = import_dimension(r.h, &format!("h of rectangle {}", r.id))?;
            Ok(Piece::new(r.id, w, h))
        })
        .collect::<Result<Vec<Piece>>>()?;

    if let Some(id) = pieces.iter().map(|p| p.id).duplicates().next() {
        return Err(CutError::InvalidInput(format!(
            "duplicate rectangle id {id}"
        )));
    }

    Ok(CutRequest {
        bin_width,
        bin_height,
        pieces,
    })
}

fn import_dimension(value: i64, field: &str) -> Result<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(CutError::InvalidInput(format!(
            "{field} must be a positive integer below 2^32, got {value}"
        ))),
    }
}
