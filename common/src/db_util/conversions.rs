//! Safe-ish conversions between rust and sql types.

use super::*;
use crate::EventCategory;

pub fn i32_to_u32(i: i32) -> Result<u32> {
    u32::try_from(i)
        .map_err(|_| anyhow!("i32 value {i} is negative and cannot be converted to u32"))
}
pub fn u32_to_i32(i: u32) -> Result<i32> {
    i32::try_from(i)
        .map_err(|_| anyhow!("u32 value {i} exceeds i32::MAX and cannot be converted to i32"))
}

pub fn usize_to_i32(i: usize) -> Result<i32> {
    i32::try_from(i)
        .map_err(|_| anyhow!("usize value {i} exceeds i32::MAX and cannot be converted to i32"))
}

pub fn deserialize_round(i: String) -> Result<Round> {
    i.parse::<Round>()
        .map_err(|e| anyhow!("Invalid round stored in database: {e}"))
}
pub fn serialize_round(i: Round) -> String {
    i.as_str().to_string()
}

pub fn deserialize_category(i: String) -> Result<EventCategory> {
    i.parse::<EventCategory>()
        .map_err(|e| anyhow!("Invalid event level stored in database: {e}"))
}
pub fn serialize_category(i: EventCategory) -> String {
    i.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversions() {
        assert_eq!(i32_to_u32(5).unwrap(), 5);
        assert!(i32_to_u32(-1).is_err());
        assert_eq!(u32_to_i32(2026).unwrap(), 2026);
        assert!(u32_to_i32(u32::MAX).is_err());
        assert!(usize_to_i32(usize::MAX).is_err());
    }

    #[test]
    fn test_round_and_category_strings() {
        assert_eq!(deserialize_round(serialize_round(Round::R64)).unwrap(), Round::R64);
        assert!(deserialize_round("X".to_string()).is_err());
        assert_eq!(
            deserialize_category(serialize_category(EventCategory::Finals)).unwrap(),
            EventCategory::Finals
        );
    }
}
