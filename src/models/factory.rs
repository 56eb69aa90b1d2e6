//! Tag-keyed registry of base-learner drivers.
//!
//! The ensemble and training loop never branch on learner types themselves;
//! they resolve a driver here by its tag. Adding a learner type means
//! implementing the traits in [`crate::models::learner`] and appending the
//! driver to [`DRIVERS`].
use crate::error::BoostError;
use crate::models::gbdt::GbdtDriver;
use crate::models::learner::LearnerDriver;

static GBDT_DRIVER: GbdtDriver = GbdtDriver;

/// Every registered driver, looked up by `LearnerDriver::tag`.
static DRIVERS: [&(dyn LearnerDriver); 1] = [&GBDT_DRIVER];

/// Resolve a tag to its driver, or `UnsupportedType` for unknown tags.
pub fn driver_for(tag: &str) -> Result<&'static dyn LearnerDriver, BoostError> {
    DRIVERS
        .iter()
        .copied()
        .find(|d| d.tag() == tag)
        .ok_or_else(|| BoostError::UnsupportedType(tag.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tag_resolves() {
        let driver = driver_for("gbdt").unwrap();
        assert_eq!(driver.tag(), "gbdt");
        assert_eq!(driver.dtype(), "dense");
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        match driver_for("xgboost") {
            Err(BoostError::UnsupportedType(tag)) => assert_eq!(tag, "xgboost"),
            other => panic!("expected UnsupportedType, got {:?}", other.map(|d| d.tag())),
        }
    }
}
