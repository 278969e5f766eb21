//! Settings validation errors

use thiserror::Error;

use crate::types::{GameSettings, MAX_GRID_DIM, MIN_GRID_HEIGHT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("grid width {0} is outside 1..={max}", max = MAX_GRID_DIM)]
    Width(u8),
    #[error("grid height {0} is outside {min}..={max}", min = MIN_GRID_HEIGHT, max = MAX_GRID_DIM)]
    Height(u8),
    #[error("tick interval must be positive")]
    Speed,
    #[error("{rows} starting rows do not fit a grid {height} rows tall")]
    StartingRows { rows: u8, height: u8 },
    #[error("grid is {width}x{height} but the settings describe a different size")]
    GridMismatch { width: usize, height: usize },
}

/// Check settings before a game is built from them
pub fn validate(settings: &GameSettings) -> Result<(), SettingsError> {
    let width = settings.width as usize;
    let height = settings.height as usize;

    if width == 0 || width > MAX_GRID_DIM {
        return Err(SettingsError::Width(settings.width));
    }
    if !(MIN_GRID_HEIGHT..=MAX_GRID_DIM).contains(&height) {
        return Err(SettingsError::Height(settings.height));
    }
    if settings.speed_ms == 0 {
        return Err(SettingsError::Speed);
    }
    if settings.starting_rows >= settings.height {
        return Err(SettingsError::StartingRows {
            rows: settings.starting_rows,
            height: settings.height,
        });
    }
    Ok(())
}
