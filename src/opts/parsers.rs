use std::str::FromStr;

use crate::prelude::*;

pub fn test_size(value: &str) -> Result<f64> {
    match f64::from_str(value)? {
        value if value > 0.0 && value < 1.0 => Ok(value),
        value => Err(anyhow!("expected a fraction within (0, 1), got {}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_ok() -> Result {
        assert_eq!(test_size("0.25")?, 0.25);
        Ok(())
    }

    #[test]
    fn test_size_out_of_range_fails() {
        assert!(test_size("0").is_err());
        assert!(test_size("1").is_err());
        assert!(test_size("NaN").is_err());
        assert!(test_size("abc").is_err());
    }
}
