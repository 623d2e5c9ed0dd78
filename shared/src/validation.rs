//! Validation utilities for advisory requests

// ============================================================================
// Location Validations
// ============================================================================

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Longest crop name accepted in a request
pub const MAX_CROP_LENGTH: usize = 32;

/// Validate latitude is within [-90, 90] decimal degrees
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within [-180, 180] decimal degrees
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Crop Validations
// ============================================================================

/// Validate crop name length (counted in characters)
pub fn validate_crop(crop: &str) -> Result<(), &'static str> {
    if crop.chars().count() > MAX_CROP_LENGTH {
        return Err("Crop name must be at most 32 characters");
    }
    Ok(())
}
