use uuid::Uuid;

use super::types::{DomainError, DomainResult, PaginationParams};

/// Normalise raw `page` / `limit` query values.
///
/// Page is 1-based; limit is clamped to `1..=max_limit`. A page whose
/// offset does not fit the store's signed 64-bit OFFSET is rejected.
pub fn validate_pagination(
    page: Option<u64>,
    limit: Option<u64>,
    default_limit: u64,
    max_limit: u64,
) -> DomainResult<PaginationParams> {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(default_limit).clamp(1, max_limit.max(1));

    let last_page = (i64::MAX as u64 / limit).saturating_add(1);
    if page > last_page {
        return Err(DomainError::Validation(format!(
            "page must be at most {} for limit {}",
            last_page, limit
        )));
    }
    Ok(PaginationParams::new(page, limit))
}

/// Check that a record id has the store-native shape (UUID) and return it
/// in canonical hyphenated form.
pub fn parse_record_id(raw: &str) -> DomainResult<String> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| DomainError::Validation(format!("Invalid id: '{}'", raw)))
}

/// Generate a fresh record id.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(
            validate_pagination(None, None, 10, 100).unwrap(),
            PaginationParams::new(1, 10)
        );
        assert_eq!(
            validate_pagination(Some(0), Some(0), 10, 100).unwrap(),
            PaginationParams::new(1, 1)
        );
        assert_eq!(
            validate_pagination(Some(3), Some(500), 10, 100).unwrap(),
            PaginationParams::new(3, 100)
        );
    }

    #[test]
    fn page_beyond_offset_range_is_rejected() {
        let err = validate_pagination(Some(u64::MAX), Some(100), 10, 100).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let last = i64::MAX as u64 / 100 + 1;
        let params = validate_pagination(Some(last), Some(100), 10, 100).unwrap();
        assert!(params.offset() <= i64::MAX as u64);
        assert!(validate_pagination(Some(last + 1), Some(100), 10, 100).is_err());
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        assert!(matches!(parse_record_id("not-an-id"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn id_is_canonicalised() {
        let id = parse_record_id("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id, "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }
}
